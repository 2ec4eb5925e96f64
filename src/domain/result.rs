//! The search result model.
//!
//! [`FetchResult`] is the single value a UI observes. Exactly one variant is
//! current at any instant; the controller is its only writer.

use crate::domain::photo::Photo;
use serde::{Deserialize, Serialize};

/// Shown when the feed host cannot be reached.
pub const MSG_NO_CONNECTION: &str =
    "Unable to connect. Please check your internet connection and try again.";

/// Shown for server errors, empty bodies, and any unclassified failure.
pub const MSG_GENERIC: &str = "An error occurred. Please try again later.";

/// Builds the message for a successful lookup that matched nothing.
///
/// ```
/// use photosearch::domain::result::no_results_message;
///
/// assert_eq!(
///     no_results_message("zzzznoresults"),
///     "No results found for your search: 'zzzznoresults'"
/// );
/// ```
#[must_use]
pub fn no_results_message(query: &str) -> String {
    format!("No results found for your search: '{query}'")
}

/// Current state of the search pipeline.
///
/// `Success` always carries at least one photo. A successful lookup with no
/// items is reported as [`FetchResult::Failure`] with the "no results" message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "data", rename_all = "snake_case")]
pub enum FetchResult {
    /// No search performed, or the query was cleared.
    #[default]
    Idle,

    /// A fetch is in flight for the current query.
    Loading,

    /// The fetch completed with one or more photos, in feed order.
    Success(Vec<Photo>),

    /// The fetch failed or matched nothing; the message is user-facing.
    Failure(String),
}

impl FetchResult {
    /// Wraps mapped photos, turning an empty set into the "no results" failure.
    ///
    /// ```
    /// use photosearch::FetchResult;
    ///
    /// let result = FetchResult::from_photos("cats", vec![]);
    /// assert_eq!(
    ///     result,
    ///     FetchResult::Failure("No results found for your search: 'cats'".to_string())
    /// );
    /// ```
    #[must_use]
    pub fn from_photos(query: &str, photos: Vec<Photo>) -> Self {
        if photos.is_empty() {
            Self::Failure(no_results_message(query))
        } else {
            Self::Success(photos)
        }
    }

    /// Generic failure for anything that went wrong without a better category.
    #[must_use]
    pub fn generic_failure() -> Self {
        Self::Failure(MSG_GENERIC.to_string())
    }

    #[must_use]
    pub const fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Photos of a successful result, empty for every other variant.
    #[must_use]
    pub fn photos(&self) -> &[Photo] {
        match self {
            Self::Success(photos) => photos,
            _ => &[],
        }
    }

    /// Failure message, if this is a failure.
    #[must_use]
    pub fn failure_message(&self) -> Option<&str> {
        match self {
            Self::Failure(message) => Some(message),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn photo(title: &str) -> Photo {
        Photo {
            link: format!("https://example.com/{title}.jpg"),
            title: title.to_string(),
            description: String::new(),
            author: String::new(),
            date_taken: String::new(),
        }
    }

    #[test]
    fn empty_photos_never_become_success() {
        let result = FetchResult::from_photos("zzzznoresults", Vec::new());
        assert_eq!(
            result.failure_message(),
            Some("No results found for your search: 'zzzznoresults'")
        );
        assert!(result.photos().is_empty());
    }

    #[test]
    fn non_empty_photos_are_success() {
        let result = FetchResult::from_photos("sunset", vec![photo("a"), photo("b")]);
        assert_eq!(result.photos().len(), 2);
        assert!(result.failure_message().is_none());
    }

    #[test]
    fn default_is_idle() {
        assert!(FetchResult::default().is_idle());
        assert!(!FetchResult::Loading.is_idle());
        assert!(FetchResult::Loading.is_loading());
    }

    #[test]
    fn serializes_with_state_tag() {
        let json = serde_json::to_value(FetchResult::Failure("x".to_string())).unwrap();
        assert_eq!(json["state"], "failure");
        assert_eq!(json["data"], "x");

        let idle = serde_json::to_value(FetchResult::Idle).unwrap();
        assert_eq!(idle["state"], "idle");
    }
}
