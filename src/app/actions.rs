//! Side effects requested by the pipeline handler.
//!
//! [`handle_event`](crate::app::handle_event) is pure: it mutates
//! [`PipelineState`](crate::app::PipelineState) and returns a `Vec<Action>` that
//! the session's controller task executes in order (timers, spawning and
//! aborting fetch tasks, publishing results).
//!
//! # Example
//!
//! ```rust
//! use photosearch::app::{handle_event, Action, Event, PipelineState};
//!
//! let mut state = PipelineState::new();
//! let actions = handle_event(&mut state, Event::QueryChanged("cats".to_string()));
//! assert_eq!(actions, vec![Action::ArmDebounce]);
//! ```

use crate::domain::FetchResult;

/// Commands for the controller runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// (Re)starts the quiet-interval timer, replacing any running one.
    ArmDebounce,

    /// Stops the quiet-interval timer without firing it.
    DisarmDebounce,

    /// Aborts the fetch task tagged with `generation`.
    ///
    /// The task's eventual completion, if it still arrives, is discarded.
    CancelFetch {
        /// Generation of the fetch to abandon.
        generation: u64,
    },

    /// Forgets the fetch task tagged with `generation`, which has already
    /// delivered its result.
    ReleaseFetch {
        /// Generation of the finished fetch.
        generation: u64,
    },

    /// Spawns a fetch for `query` tagged with `generation`.
    StartFetch {
        /// Generation the completion must carry to be accepted.
        generation: u64,
        /// Non-blank query to look up.
        query: String,
    },

    /// Replaces the observable result.
    Publish(FetchResult),
}
