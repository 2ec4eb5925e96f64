//! Domain layer for photosearch.
//!
//! Holds the types the rest of the crate passes around, independent of the HTTP
//! client and the async runtime.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`photo`]: Photo model, selection holder value, display helpers
//! - [`result`]: The observable [`FetchResult`] and its user-facing messages
//!
//! # Examples
//!
//! ```
//! use photosearch::domain::{FetchResult, Photo};
//!
//! let photo = Photo { title: "Sunset by the Ocean".to_string(), ..Photo::default() };
//! let result = FetchResult::from_photos("sunset", vec![photo]);
//! assert_eq!(result.photos()[0].title, "Sunset by the Ocean");
//! ```

pub mod error;
pub mod photo;
pub mod result;

pub use error::{FetchError, PhotoSearchError, Result};
pub use photo::{Photo, SelectedPhoto};
pub use result::FetchResult;
