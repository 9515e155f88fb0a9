// Turn driver: runs an agent against a time budget
//
// This module orchestrates the async polling and CPU-bound search computation:
// 1. Spawns the agent on a blocking worker
// 2. Polls the shared output until the budget is spent or the agent is done
// 3. Takes the last published action (anytime property), then cancels and
//    joins the worker so no search outlives its turn

use log::{info, warn};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::agent::Agent;
use crate::config::TimingConfig;
use crate::error::DriverError;
use crate::output::SearchOutput;
use crate::types::GameState;

/// An agent shared between the match loop and the search worker
pub type SharedAgent<S> = Arc<Mutex<Box<dyn Agent<S>>>>;

/// Wraps an agent so it can be handed to [`TurnDriver::request_action`]
pub fn share<S, A>(agent: A) -> SharedAgent<S>
where
    S: GameState,
    A: Agent<S> + 'static,
{
    let boxed: Box<dyn Agent<S>> = Box::new(agent);
    Arc::new(Mutex::new(boxed))
}

/// What the driver observed for one turn
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TurnOutcome<A> {
    /// Last action published before the budget ran out, if any
    pub action: Option<A>,
    pub depth: u32,
    pub score: f64,
    pub publications: usize,
    pub elapsed_ms: u64,
}

pub struct TurnDriver {
    timing: TimingConfig,
}

impl TurnDriver {
    pub fn new(timing: TimingConfig) -> Self {
        TurnDriver { timing }
    }

    /// Runs one turn of `agent` on `state` and returns what it published in time
    pub async fn request_action<S: GameState>(
        &self,
        agent: &SharedAgent<S>,
        state: &S,
    ) -> Result<TurnOutcome<S::Action>, DriverError> {
        let start_time = Instant::now();

        let output: Arc<SearchOutput<S::Action>> = Arc::new(SearchOutput::new());
        let cancel = Arc::new(AtomicBool::new(false));

        let worker = {
            let agent = agent.clone();
            let state = state.clone();
            let output = output.clone();
            let cancel = cancel.clone();
            tokio::task::spawn_blocking(move || {
                let mut agent = agent.lock();
                agent.get_action(&state, &*output, &cancel)
            })
        };

        // Polling loop: check for results or timeout
        let effective_budget = self.timing.effective_budget_ms();
        let polling_interval = Duration::from_millis(self.timing.polling_interval_ms);

        loop {
            tokio::time::sleep(polling_interval).await;

            let elapsed = start_time.elapsed().as_millis() as u64;

            if elapsed >= effective_budget || output.is_complete() {
                break;
            }
        }

        // Publications after this point are too late
        let (latest, publications) = output.snapshot();

        cancel.store(true, Ordering::Release);
        worker.await??;

        let elapsed_ms = start_time.elapsed().as_millis() as u64;

        let outcome = match latest {
            Some(publication) => {
                info!(
                    "{}: chose {} (score: {}, depth: {}, time: {}ms)",
                    state.active_player().as_str(),
                    publication.action,
                    publication.score,
                    publication.depth,
                    elapsed_ms
                );
                TurnOutcome {
                    action: Some(publication.action),
                    depth: publication.depth,
                    score: publication.score,
                    publications,
                    elapsed_ms,
                }
            }
            None => {
                warn!(
                    "{}: no action published within {}ms",
                    state.active_player().as_str(),
                    effective_budget
                );
                TurnOutcome {
                    action: None,
                    depth: 0,
                    score: f64::NEG_INFINITY,
                    publications,
                    elapsed_ms,
                }
            }
        };

        Ok(outcome)
    }
}
