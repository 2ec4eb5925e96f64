//! Wire types for the public photo feed.
//!
//! These mirror the JSON document returned by the feed endpoint when called
//! with `format=json&nojsoncallback=1`. They are kept separate from the domain
//! [`Photo`](crate::domain::Photo) so feed quirks stay in this module.
//!
//! Only `items` and each item's `media.m` are required; every other field
//! falls back to an empty string when the feed omits it.
//!
//! The feed escapes apostrophes as `\'`, which strict JSON rejects, so bodies
//! are normalized before decoding.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Top-level feed document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedResponse {
    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub link: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub modified: String,

    #[serde(default)]
    pub generator: String,

    /// Photos in feed order.
    pub items: Vec<FeedItem>,
}

/// One photo entry in the feed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedItem {
    #[serde(default)]
    pub title: String,

    /// Link to the photo page (not the image itself).
    #[serde(default)]
    pub link: String,

    pub media: FeedMedia,

    #[serde(default)]
    pub date_taken: String,

    /// HTML fragment with an embedded `<img>` tag.
    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub published: String,

    #[serde(default)]
    pub author: String,

    #[serde(default)]
    pub author_id: String,

    /// Space-separated tag list.
    #[serde(default)]
    pub tags: String,
}

/// Media block of a feed item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedMedia {
    /// Thumbnail image URL.
    #[serde(rename = "m")]
    pub thumbnail_url: String,
}

impl FeedResponse {
    /// Parses a feed body.
    ///
    /// # Errors
    ///
    /// Returns the underlying `serde_json` error for malformed documents.
    pub fn from_slice(body: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(&unescape_apostrophes(body))
    }
}

/// Rewrites `\'` to `'`, leaving escaped backslashes (`\\'`) alone.
///
/// Borrows the input unchanged when it holds no such escape.
fn unescape_apostrophes(body: &[u8]) -> Cow<'_, [u8]> {
    if !body.windows(2).any(|w| w == b"\\'") {
        return Cow::Borrowed(body);
    }

    let mut out = Vec::with_capacity(body.len());
    let mut bytes = body.iter().copied();
    while let Some(b) = bytes.next() {
        if b != b'\\' {
            out.push(b);
            continue;
        }
        match bytes.next() {
            Some(b'\'') => out.push(b'\''),
            Some(next) => {
                out.push(b'\\');
                out.push(next);
            }
            None => out.push(b'\\'),
        }
    }
    Cow::Owned(out)
}
