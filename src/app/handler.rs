//! Event handling for the search pipeline.
//!
//! Turns a bursty stream of query edits into at most one live fetch and one
//! current [`FetchResult`]. Time and I/O are kept out of this module: the
//! controller task feeds it events and executes the returned actions.
//!
//! # Flow
//!
//! ```text
//! QueryChanged ─► ArmDebounce
//!                     │ (quiet interval, no newer QueryChanged)
//!                     ▼
//! DebounceElapsed ─► same as last debounced? ─► nothing
//!                 ─► cancel in-flight fetch
//!                 ─► blank?  ─► Publish(Idle)
//!                 ─► else    ─► Publish(Loading), StartFetch(generation)
//!
//! FetchCompleted(generation) ─► current generation? ─► ReleaseFetch, Publish(result)
//!                            ─► otherwise discarded
//! ```
//!
//! Superseded fetches are cancelled when the next value is debounced, and the
//! generation check drops any completion that was already queued when the
//! cancel happened.

use crate::app::{Action, PipelineState};
use crate::domain::FetchResult;

/// Inputs to the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The user edited the query. Sent for every edit, changed or not.
    QueryChanged(String),

    /// The quiet interval elapsed since the last `QueryChanged`.
    DebounceElapsed,

    /// A fetch task finished.
    FetchCompleted {
        /// Generation the fetch was started with.
        generation: u64,
        /// Classified outcome.
        result: FetchResult,
    },

    /// Return to the initial state, abandoning any pending work.
    Reset,
}

/// Applies `event` to `state` and returns the side effects to execute.
///
/// # Example
///
/// ```rust
/// use photosearch::app::{handle_event, Action, Event, PipelineState};
/// use photosearch::FetchResult;
///
/// let mut state = PipelineState::new();
/// handle_event(&mut state, Event::QueryChanged("sunset".to_string()));
/// let actions = handle_event(&mut state, Event::DebounceElapsed);
/// assert_eq!(
///     actions,
///     vec![
///         Action::Publish(FetchResult::Loading),
///         Action::StartFetch { generation: 1, query: "sunset".to_string() },
///     ]
/// );
/// ```
pub fn handle_event(state: &mut PipelineState, event: Event) -> Vec<Action> {
    match event {
        Event::QueryChanged(query) => {
            tracing::trace!(query_len = query.len(), "query changed");
            state.pending_query = Some(query);
            vec![Action::ArmDebounce]
        }

        Event::DebounceElapsed => on_debounce_elapsed(state),

        Event::FetchCompleted { generation, result } => {
            if !state.is_current(generation) {
                tracing::debug!(
                    generation = generation,
                    current_generation = state.generation,
                    "discarding superseded fetch result"
                );
                return vec![];
            }

            state.in_flight = None;
            state.result = result.clone();
            vec![Action::ReleaseFetch { generation }, Action::Publish(result)]
        }

        Event::Reset => {
            let mut actions = vec![Action::DisarmDebounce];
            if let Some(generation) = state.in_flight.take() {
                actions.push(Action::CancelFetch { generation });
            }

            state.pending_query = None;
            state.last_debounced = None;
            state.next_generation();
            state.result = FetchResult::Idle;

            tracing::debug!(generation = state.generation, "pipeline reset");
            actions.push(Action::Publish(FetchResult::Idle));
            actions
        }
    }
}

fn on_debounce_elapsed(state: &mut PipelineState) -> Vec<Action> {
    let Some(query) = state.pending_query.take() else {
        return vec![];
    };

    if state.last_debounced.as_deref() == Some(query.as_str()) {
        tracing::trace!("debounced query unchanged, skipping");
        return vec![];
    }
    state.last_debounced = Some(query.clone());

    let mut actions = Vec::with_capacity(3);
    if let Some(previous) = state.in_flight.take() {
        actions.push(Action::CancelFetch {
            generation: previous,
        });
    }

    let generation = state.next_generation();

    if query.trim().is_empty() {
        tracing::debug!(generation = generation, "blank query, result idle");
        state.result = FetchResult::Idle;
        actions.push(Action::Publish(FetchResult::Idle));
        return actions;
    }

    tracing::debug!(generation = generation, query = %query, "dispatching fetch");
    state.in_flight = Some(generation);
    state.result = FetchResult::Loading;
    actions.push(Action::Publish(FetchResult::Loading));
    actions.push(Action::StartFetch { generation, query });
    actions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Photo;

    fn debounce(state: &mut PipelineState, query: &str) -> Vec<Action> {
        handle_event(state, Event::QueryChanged(query.to_string()));
        handle_event(state, Event::DebounceElapsed)
    }

    fn success(title: &str) -> FetchResult {
        FetchResult::Success(vec![Photo {
            title: title.to_string(),
            ..Photo::default()
        }])
    }

    #[test]
    fn every_edit_rearms_debounce() {
        let mut state = PipelineState::new();
        for q in ["a", "a", "ab"] {
            assert_eq!(
                handle_event(&mut state, Event::QueryChanged(q.to_string())),
                vec![Action::ArmDebounce]
            );
        }
        assert_eq!(state.pending_query.as_deref(), Some("ab"));
    }

    #[test]
    fn burst_collapses_to_last_value() {
        let mut state = PipelineState::new();
        for q in ["a", "ab", "abc"] {
            handle_event(&mut state, Event::QueryChanged(q.to_string()));
        }
        let actions = handle_event(&mut state, Event::DebounceElapsed);
        assert_eq!(
            actions,
            vec![
                Action::Publish(FetchResult::Loading),
                Action::StartFetch {
                    generation: 1,
                    query: "abc".to_string()
                },
            ]
        );
        assert!(!state.has_pending_query());
    }

    #[test]
    fn spurious_debounce_is_ignored() {
        let mut state = PipelineState::new();
        assert!(handle_event(&mut state, Event::DebounceElapsed).is_empty());
    }

    #[test]
    fn same_value_is_not_refetched() {
        let mut state = PipelineState::new();
        debounce(&mut state, "cat");
        handle_event(
            &mut state,
            Event::FetchCompleted {
                generation: 1,
                result: success("cat"),
            },
        );

        assert!(debounce(&mut state, "cat").is_empty());
        assert_eq!(state.result, success("cat"));
    }

    #[test]
    fn blank_publishes_idle_and_cancels() {
        let mut state = PipelineState::new();
        debounce(&mut state, "cat");
        assert_eq!(state.in_flight, Some(1));

        let actions = debounce(&mut state, "   ");
        assert_eq!(
            actions,
            vec![
                Action::CancelFetch { generation: 1 },
                Action::Publish(FetchResult::Idle),
            ]
        );
        assert_eq!(state.in_flight, None);
        assert!(state.result.is_idle());
    }

    #[test]
    fn new_query_replaces_in_flight_fetch() {
        let mut state = PipelineState::new();
        debounce(&mut state, "slow");
        let actions = debounce(&mut state, "fast");
        assert_eq!(
            actions,
            vec![
                Action::CancelFetch { generation: 1 },
                Action::Publish(FetchResult::Loading),
                Action::StartFetch {
                    generation: 2,
                    query: "fast".to_string()
                },
            ]
        );
    }

    #[test]
    fn stale_completion_is_discarded() {
        let mut state = PipelineState::new();
        debounce(&mut state, "slow");
        debounce(&mut state, "fast");

        let stale = handle_event(
            &mut state,
            Event::FetchCompleted {
                generation: 1,
                result: success("slow"),
            },
        );
        assert!(stale.is_empty());
        assert!(state.result.is_loading());

        let fresh = handle_event(
            &mut state,
            Event::FetchCompleted {
                generation: 2,
                result: success("fast"),
            },
        );
        assert_eq!(
            fresh,
            vec![
                Action::ReleaseFetch { generation: 2 },
                Action::Publish(success("fast")),
            ]
        );
        assert_eq!(state.in_flight, None);
    }

    #[test]
    fn next_query_after_completion_cancels_nothing() {
        let mut state = PipelineState::new();
        debounce(&mut state, "cat");
        handle_event(
            &mut state,
            Event::FetchCompleted {
                generation: 1,
                result: success("cat"),
            },
        );

        let actions = debounce(&mut state, "dog");
        assert!(!actions
            .iter()
            .any(|a| matches!(a, Action::CancelFetch { .. })));
        assert!(actions.contains(&Action::StartFetch {
            generation: 2,
            query: "dog".to_string()
        }));
    }

    #[test]
    fn completion_after_blank_is_discarded() {
        let mut state = PipelineState::new();
        debounce(&mut state, "cat");
        debounce(&mut state, "");

        let actions = handle_event(
            &mut state,
            Event::FetchCompleted {
                generation: 1,
                result: success("cat"),
            },
        );
        assert!(actions.is_empty());
        assert!(state.result.is_idle());
    }

    #[test]
    fn duplicate_completion_is_discarded() {
        let mut state = PipelineState::new();
        debounce(&mut state, "cat");
        let completed = Event::FetchCompleted {
            generation: 1,
            result: success("cat"),
        };
        assert_eq!(handle_event(&mut state, completed.clone()).len(), 2);
        assert!(handle_event(&mut state, completed).is_empty());
    }

    #[test]
    fn reset_clears_everything() {
        let mut state = PipelineState::new();
        debounce(&mut state, "cat");
        handle_event(&mut state, Event::QueryChanged("dog".to_string()));

        let actions = handle_event(&mut state, Event::Reset);
        assert_eq!(
            actions,
            vec![
                Action::DisarmDebounce,
                Action::CancelFetch { generation: 1 },
                Action::Publish(FetchResult::Idle),
            ]
        );
        assert!(state.pending_query.is_none());
        assert!(state.last_debounced.is_none());
        assert!(state.result.is_idle());

        // the de-duplication memory is gone, so the same query fetches again
        let again = debounce(&mut state, "cat");
        assert!(again.contains(&Action::StartFetch {
            generation: 3,
            query: "cat".to_string()
        }));
    }
}
