//! Search pipeline state.
//!
//! [`PipelineState`] is the controller's private bookkeeping: the query waiting
//! out its quiet interval, the last value that made it through debouncing, the
//! generation counter used for cancel-and-replace, and the current result.
//! It is mutated only by [`handle_event`](crate::app::handle_event).

use crate::domain::FetchResult;

/// Controller state for one search session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineState {
    /// Latest query received but not yet debounced.
    ///
    /// Overwritten by every `QueryChanged`; taken when the quiet interval
    /// elapses.
    pub pending_query: Option<String>,

    /// Last query value that survived debouncing.
    ///
    /// Used for de-duplication. `None` until the first debounce fires and after
    /// a reset.
    pub last_debounced: Option<String>,

    /// Generation of the most recently issued request.
    ///
    /// Bumped on every debounced value that changes the result (including
    /// blank ones) and on reset. Only a completion carrying this generation
    /// may write the result.
    pub generation: u64,

    /// Generation of the fetch currently running, if any.
    pub in_flight: Option<u64>,

    /// The result currently visible to observers.
    pub result: FetchResult,
}

impl PipelineState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a completion for `generation` is still allowed to publish.
    #[must_use]
    pub fn is_current(&self, generation: u64) -> bool {
        self.in_flight == Some(generation) && self.generation == generation
    }

    /// Whether a query is waiting for its quiet interval to elapse.
    #[must_use]
    pub const fn has_pending_query(&self) -> bool {
        self.pending_query.is_some()
    }

    /// Starts a new generation and returns it.
    pub(crate) fn next_generation(&mut self) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        self.generation
    }
}
