// Agents that answer one turn at a time through an ActionSink
//
// An agent never returns its move directly. It publishes into the sink as
// often as it likes and the driver takes whatever was published last when
// the turn budget runs out.

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;
use std::sync::atomic::AtomicBool;

use crate::config::{Config, SearchConfig};
use crate::error::SearchError;
use crate::heuristic::{Evaluator, PositionalHeuristic};
use crate::isolation::GEOMETRY;
use crate::output::{ActionSink, Publication};
use crate::search::AlphaBeta;
use crate::types::{GameState, Player};

/// A player that can be driven turn by turn
pub trait Agent<S: GameState>: Send {
    fn name(&self) -> &str;

    fn player(&self) -> Player;

    /// Searches `state` and publishes actions into `sink` until done or until
    /// `cancel` is raised. Cancellation is not an error.
    fn get_action(
        &mut self,
        state: &S,
        sink: &dyn ActionSink<S::Action>,
        cancel: &AtomicBool,
    ) -> Result<(), SearchError>;
}

/// What an agent carries over from one turn to the next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchContext {
    /// Deepest iteration completed on the previous turn
    pub last_completed_depth: u32,
    pub turns_searched: u32,
}

fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    }
}

/// Iterative deepening alpha-beta agent
pub struct AlphaBetaAgent<E> {
    player: Player,
    evaluator: E,
    search: SearchConfig,
    rng: StdRng,
    context: Option<SearchContext>,
}

impl AlphaBetaAgent<PositionalHeuristic> {
    /// Agent for the standard Isolation board using the positional heuristic
    pub fn new(player: Player, config: &Config) -> Self {
        let heuristic = PositionalHeuristic::new(GEOMETRY, &config.heuristic);
        Self::with_evaluator(player, heuristic, &config.search)
    }
}

impl<E> AlphaBetaAgent<E> {
    pub fn with_evaluator(player: Player, evaluator: E, search: &SearchConfig) -> Self {
        AlphaBetaAgent {
            player,
            evaluator,
            search: search.clone(),
            rng: rng_from_seed(search.seed),
            context: None,
        }
    }

    pub fn context(&self) -> Option<&SearchContext> {
        self.context.as_ref()
    }
}

impl<S, E> Agent<S> for AlphaBetaAgent<E>
where
    S: GameState,
    E: Evaluator<S>,
{
    fn name(&self) -> &str {
        "alpha-beta"
    }

    fn player(&self) -> Player {
        self.player
    }

    fn get_action(
        &mut self,
        state: &S,
        sink: &dyn ActionSink<S::Action>,
        cancel: &AtomicBool,
    ) -> Result<(), SearchError> {
        if let Some(context) = &self.context {
            debug!(
                "Previous turn completed depth {}",
                context.last_completed_depth
            );
        }

        let mut depth = self.search.initial_depth;
        let mut completed = 0;

        let outcome = loop {
            // Safety cap on depth
            if depth > self.search.max_search_depth {
                info!("Stopping search: reached max depth ({})", self.search.max_search_depth);
                break Ok(());
            }

            debug!("Starting iteration at depth {}", depth);
            let mut search = AlphaBeta::new(self.player, &self.evaluator, cancel);

            match search.best_action(state, depth, &mut self.rng) {
                Ok(Some(choice)) => {
                    let stats = search.stats();
                    sink.publish(Publication {
                        action: choice.action,
                        depth,
                        score: choice.score,
                    });
                    completed = depth;
                    debug!(
                        "Depth {}: best {} (score: {}, nodes: {}, cutoffs: {})",
                        depth, choice.action, choice.score, stats.nodes, stats.cutoffs
                    );

                    if !search.reached_cutoff() {
                        info!("Stopping search: game tree exhausted at depth {}", depth);
                        break Ok(());
                    }
                }
                Ok(None) => {
                    warn!("No legal actions available");
                    break Ok(());
                }
                Err(SearchError::Cancelled) => {
                    debug!("Cut off during depth {}, discarding partial iteration", depth);
                    break Ok(());
                }
                Err(e) => break Err(e),
            }

            depth += 1;
        };

        sink.complete();

        let turns_searched = self.context.map_or(0, |c| c.turns_searched) + 1;
        self.context = Some(SearchContext {
            last_completed_depth: completed,
            turns_searched,
        });

        outcome
    }
}

/// Publishes a uniformly random legal action
pub struct RandomAgent {
    player: Player,
    rng: StdRng,
}

impl RandomAgent {
    pub fn new(player: Player, seed: Option<u64>) -> Self {
        RandomAgent {
            player,
            rng: rng_from_seed(seed),
        }
    }
}

impl<S: GameState> Agent<S> for RandomAgent {
    fn name(&self) -> &str {
        "random"
    }

    fn player(&self) -> Player {
        self.player
    }

    fn get_action(
        &mut self,
        state: &S,
        sink: &dyn ActionSink<S::Action>,
        _cancel: &AtomicBool,
    ) -> Result<(), SearchError> {
        if let Some(&action) = state.actions().choose(&mut self.rng) {
            sink.publish(Publication {
                action,
                depth: 0,
                score: 0.0,
            });
        }
        sink.complete();
        Ok(())
    }
}
