// Output channel between a searching agent and the turn driver
//
// The agent publishes after every completed iteration; the driver only ever
// reads the most recent publication once its budget runs out.

use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

/// One answer published by an agent
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Publication<A> {
    pub action: A,
    /// Depth of the iteration that produced the action; 0 for agents that do not search
    pub depth: u32,
    pub score: f64,
}

/// Sink an agent writes its current best action to
pub trait ActionSink<A>: Send + Sync {
    fn publish(&self, publication: Publication<A>);

    /// Signals that the agent will not publish again this turn
    fn complete(&self) {}
}

#[derive(Debug)]
struct Slot<A> {
    latest: Option<Publication<A>>,
    count: usize,
}

/// Single-slot sink shared between the search worker and the driver
#[derive(Debug)]
pub struct SearchOutput<A> {
    slot: Mutex<Slot<A>>,
    search_complete: AtomicBool,
}

impl<A: Copy> SearchOutput<A> {
    pub fn new() -> Self {
        SearchOutput {
            slot: Mutex::new(Slot {
                latest: None,
                count: 0,
            }),
            search_complete: AtomicBool::new(false),
        }
    }

    /// Most recent publication, if any
    pub fn latest(&self) -> Option<Publication<A>> {
        self.slot.lock().latest
    }

    pub fn publication_count(&self) -> usize {
        self.slot.lock().count
    }

    /// Latest publication and the number of publications, read together
    pub fn snapshot(&self) -> (Option<Publication<A>>, usize) {
        let slot = self.slot.lock();
        (slot.latest, slot.count)
    }

    pub fn is_complete(&self) -> bool {
        self.search_complete.load(Ordering::Acquire)
    }
}

impl<A: Copy> Default for SearchOutput<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: Copy + Send> ActionSink<A> for SearchOutput<A> {
    fn publish(&self, publication: Publication<A>) {
        let mut slot = self.slot.lock();
        slot.latest = Some(publication);
        slot.count += 1;
    }

    fn complete(&self) {
        self.search_complete.store(true, Ordering::Release);
    }
}
