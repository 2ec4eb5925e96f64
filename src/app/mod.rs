//! Application layer: the search controller.
//!
//! The controller follows a unidirectional data flow:
//!
//! ```text
//! set_query → Events → handle_event → PipelineState mutations → Actions → Side Effects
//!                 ↑                                                  ↓
//!                 └──────── timer expiry, fetch completions ─────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effects emitted by the handler
//! - [`handler`]: Debounce, de-duplication, blank short-circuit and
//!   cancel-and-replace as a pure state machine
//! - [`session`]: [`SearchSession`], the async runtime around the handler and the
//!   observable query, result and selection values
//! - [`state`]: [`PipelineState`], the controller's bookkeeping
//!
//! # Example
//!
//! ```rust
//! use photosearch::app::{handle_event, Event, PipelineState};
//!
//! let mut state = PipelineState::new();
//! let actions = handle_event(&mut state, Event::QueryChanged("owls".to_string()));
//! assert_eq!(actions.len(), 1);
//! ```

pub mod actions;
pub mod handler;
pub mod session;
pub mod state;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use session::{SearchSession, DEFAULT_DEBOUNCE};
pub use state::PipelineState;
