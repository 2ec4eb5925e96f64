//! Feed item to domain photo mapping.
//!
//! The mapping is pure and total: every [`FeedItem`] yields exactly one
//! [`Photo`], and [`map_items`] keeps the feed's order.

use crate::domain::Photo;
use crate::feed::models::FeedItem;

/// Projects a feed item onto a photo.
///
/// The photo's `link` is the thumbnail URL from the media block, not the
/// item's page link.
#[must_use]
pub fn map_item(item: FeedItem) -> Photo {
    Photo {
        link: item.media.thumbnail_url,
        title: item.title,
        description: item.description,
        author: item.author,
        date_taken: item.date_taken,
    }
}

/// Maps every item, preserving order.
#[must_use]
pub fn map_items(items: Vec<FeedItem>) -> Vec<Photo> {
    items.into_iter().map(map_item).collect()
}
