// Depth-bounded minimax with fail-hard alpha-beta pruning
//
// The root is a MAX node for the searching player; plies then alternate
// MIN/MAX. Terminal states return the exact game utility, states at the depth
// cutoff return the static evaluation. The cancel flag is polled on entry to
// every node so the driver can abandon an iteration at any point.

use log::debug;
use rand::seq::IndexedRandom;
use rand::Rng;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::SearchError;
use crate::heuristic::Evaluator;
use crate::types::{GameState, Player};

/// Counters collected over one bounded search
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SearchStats {
    /// MIN and MAX nodes entered
    pub nodes: u64,
    /// Early returns taken because the window closed
    pub cutoffs: u64,
    /// Static evaluations at the depth limit
    pub evaluations: u64,
}

/// Best root action together with its backed-up value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RootChoice<A> {
    pub action: A,
    pub score: f64,
}

/// One bounded alpha-beta search on behalf of `player`
pub struct AlphaBeta<'a, E> {
    player: Player,
    evaluator: &'a E,
    cancel: &'a AtomicBool,
    stats: SearchStats,
}

impl<'a, E> AlphaBeta<'a, E> {
    pub fn new(player: Player, evaluator: &'a E, cancel: &'a AtomicBool) -> Self {
        AlphaBeta {
            player,
            evaluator,
            cancel,
            stats: SearchStats::default(),
        }
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// True if some leaf was scored by the evaluator rather than by the game rules.
    /// When false the search was exhaustive and deeper searches return the same answer.
    pub fn reached_cutoff(&self) -> bool {
        self.stats.evaluations > 0
    }

    /// Picks the best root action at `depth`.
    ///
    /// Ties keep the earliest action. If every action is a proven loss a random
    /// legal action is returned; `None` means the root has no legal action.
    pub fn best_action<S, R>(
        &mut self,
        state: &S,
        depth: u32,
        rng: &mut R,
    ) -> Result<Option<RootChoice<S::Action>>, SearchError>
    where
        S: GameState,
        E: Evaluator<S>,
        R: Rng + ?Sized,
    {
        let actions = state.actions();
        let mut alpha = f64::NEG_INFINITY;
        let beta = f64::INFINITY;
        let mut best: Option<RootChoice<S::Action>> = None;
        let mut best_score = f64::NEG_INFINITY;

        for &action in &actions {
            let child = state.result(action)?;
            let value = self.min_value(&child, alpha, beta, depth as i32 - 1)?;
            alpha = alpha.max(value);
            if value > best_score {
                best_score = value;
                best = Some(RootChoice { action, score: value });
            }
        }

        if best.is_none() && !actions.is_empty() {
            debug!("Every action loses at depth {}, choosing at random", depth);
            return Ok(actions.choose(rng).map(|&action| RootChoice {
                action,
                score: f64::NEG_INFINITY,
            }));
        }

        Ok(best)
    }

    /// Value of a node where the opponent is to move
    pub fn min_value<S>(
        &mut self,
        state: &S,
        alpha: f64,
        mut beta: f64,
        depth: i32,
    ) -> Result<f64, SearchError>
    where
        S: GameState,
        E: Evaluator<S>,
    {
        self.enter_node()?;

        if state.terminal_test() {
            return Ok(state.utility(self.player));
        }
        if depth <= 0 {
            return Ok(self.evaluate(state));
        }

        let mut value = f64::INFINITY;
        for action in state.actions() {
            let child = state.result(action)?;
            value = value.min(self.max_value(&child, alpha, beta, depth - 1)?);
            if value <= alpha {
                self.stats.cutoffs += 1;
                return Ok(value);
            }
            beta = beta.min(value);
        }
        Ok(value)
    }

    /// Value of a node where the searching player is to move
    pub fn max_value<S>(
        &mut self,
        state: &S,
        mut alpha: f64,
        beta: f64,
        depth: i32,
    ) -> Result<f64, SearchError>
    where
        S: GameState,
        E: Evaluator<S>,
    {
        self.enter_node()?;

        if state.terminal_test() {
            return Ok(state.utility(self.player));
        }
        if depth <= 0 {
            return Ok(self.evaluate(state));
        }

        let mut value = f64::NEG_INFINITY;
        for action in state.actions() {
            let child = state.result(action)?;
            value = value.max(self.min_value(&child, alpha, beta, depth - 1)?);
            if value >= beta {
                self.stats.cutoffs += 1;
                return Ok(value);
            }
            alpha = alpha.max(value);
        }
        Ok(value)
    }

    fn enter_node(&mut self) -> Result<(), SearchError> {
        if self.cancel.load(Ordering::Relaxed) {
            return Err(SearchError::Cancelled);
        }
        self.stats.nodes += 1;
        Ok(())
    }

    fn evaluate<S>(&mut self, state: &S) -> f64
    where
        S: GameState,
        E: Evaluator<S>,
    {
        self.stats.evaluations += 1;
        self.evaluator.evaluate(state, self.player)
    }
}
