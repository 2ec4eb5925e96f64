//! Photo domain model.
//!
//! A [`Photo`] is built once per successful fetch from a raw feed item and is
//! never mutated afterwards. The helpers on it derive display values (image
//! dimensions, a readable date, share text) from the raw fields without
//! touching the network.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Title carried by the "nothing selected" placeholder.
pub const PLACEHOLDER_TITLE: &str = "No Image Selected";

/// Display format for [`Photo::formatted_date`], e.g. `Jan 14, 2025`.
const DISPLAY_DATE_FORMAT: &str = "%b %-d, %Y";

/// A single photo returned by the feed.
///
/// # Fields
///
/// - `link`: thumbnail URL used as the display image source
/// - `title`: photo title, may be empty
/// - `description`: HTML fragment; usually embeds `width="W" height="H"`
/// - `author`: raw author string, typically `nobody@flickr.com ("name")`
/// - `date_taken`: opaque date string as sent by the feed
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Photo {
    pub link: String,
    pub title: String,
    pub description: String,
    pub author: String,
    pub date_taken: String,
}

fn dimensions_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"width="(\d+)"\s+height="(\d+)""#).expect("dimensions pattern is valid")
    })
}

fn tag_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<[^>]*>").expect("tag pattern is valid"))
}

fn author_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"\("(.+)"\)"#).expect("author pattern is valid"))
}

impl Photo {
    /// Extracts the image size embedded in the description.
    ///
    /// The feed describes each photo with an `<img>` tag carrying
    /// `width="W" height="H"`. Returns `None` when the pattern is absent.
    ///
    /// ```
    /// use photosearch::Photo;
    ///
    /// let photo = Photo {
    ///     description: r#"<img src="x.jpg" width="240" height="160" />"#.to_string(),
    ///     ..Photo::default()
    /// };
    /// assert_eq!(photo.dimensions(), Some((240, 160)));
    /// ```
    #[must_use]
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        let caps = dimensions_regex().captures(&self.description)?;
        let width = caps.get(1)?.as_str().parse().ok()?;
        let height = caps.get(2)?.as_str().parse().ok()?;
        Some((width, height))
    }

    /// Renders `date_taken` as `Jan 14, 2025`.
    ///
    /// Accepts RFC 3339 timestamps, naive `YYYY-MM-DDTHH:MM:SS` timestamps and
    /// bare `YYYY-MM-DD` dates. Anything else is returned unchanged.
    #[must_use]
    pub fn formatted_date(&self) -> String {
        let raw = self.date_taken.trim();

        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return dt.format(DISPLAY_DATE_FORMAT).to_string();
        }
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
            return dt.format(DISPLAY_DATE_FORMAT).to_string();
        }
        if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            return date.format(DISPLAY_DATE_FORMAT).to_string();
        }

        tracing::debug!(date_taken = %self.date_taken, "unrecognised date format");
        self.date_taken.clone()
    }

    /// Description with markup removed and common entities decoded.
    #[must_use]
    pub fn plain_description(&self) -> String {
        let stripped = tag_regex().replace_all(&self.description, " ");
        let decoded = stripped
            .replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&quot;", "\"")
            .replace("&#39;", "'")
            .replace("&nbsp;", " ")
            .replace("&amp;", "&");

        decoded.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    /// Display name of the author.
    ///
    /// The feed sends authors as `nobody@flickr.com ("Jane Doe")`; the quoted
    /// part is returned when present, otherwise the raw string.
    ///
    /// ```
    /// use photosearch::Photo;
    ///
    /// let photo = Photo {
    ///     author: r#"nobody@flickr.com ("Jane Doe")"#.to_string(),
    ///     ..Photo::default()
    /// };
    /// assert_eq!(photo.author_name(), "Jane Doe");
    /// ```
    #[must_use]
    pub fn author_name(&self) -> &str {
        author_regex()
            .captures(&self.author)
            .and_then(|caps| caps.get(1))
            .map_or(self.author.as_str(), |m| m.as_str())
    }

    /// Plain-text message used by the share action of the detail view.
    #[must_use]
    pub fn share_text(&self) -> String {
        let mut text = String::from("Check out this photo!\n\n");
        text.push_str(&format!("Title: {}\n", self.title));
        text.push_str(&format!("Author: {}\n", self.author_name()));
        text.push_str(&format!("Date taken: {}\n", self.formatted_date()));
        text.push_str(&format!("Link: {}\n", self.link));
        if let Some((width, height)) = self.dimensions() {
            text.push_str(&format!("Dimensions: {width} x {height}\n"));
        }
        text
    }
}

/// The photo handed from the grid to the detail view.
///
/// Defaults to a placeholder whose title is [`PLACEHOLDER_TITLE`] and whose
/// other fields are empty. Only changed by explicit user selection or a
/// session reset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedPhoto(Photo);

impl SelectedPhoto {
    /// The "nothing selected" placeholder.
    #[must_use]
    pub fn placeholder() -> Self {
        Self(Photo {
            title: PLACEHOLDER_TITLE.to_string(),
            ..Photo::default()
        })
    }

    #[must_use]
    pub const fn new(photo: Photo) -> Self {
        Self(photo)
    }

    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        *self == Self::placeholder()
    }

    #[must_use]
    pub const fn photo(&self) -> &Photo {
        &self.0
    }

    #[must_use]
    pub fn into_photo(self) -> Photo {
        self.0
    }
}

impl Default for SelectedPhoto {
    fn default() -> Self {
        Self::placeholder()
    }
}

impl From<Photo> for SelectedPhoto {
    fn from(photo: Photo) -> Self {
        Self::new(photo)
    }
}
