//! Feed layer: wire types, mapping, transport, and fetch classification.
//!
//! # Modules
//!
//! - `models`: serde types for the feed JSON document
//! - `mapper`: order-preserving `FeedItem -> Photo` projection
//! - `client`: [`FeedSource`] trait and the `reqwest`-backed [`HttpFeedSource`]
//! - `fetcher`: [`Fetcher`] trait and [`FeedFetcher`], which turn one lookup
//!   into a [`FetchResult`](crate::domain::FetchResult)

pub mod client;
pub mod fetcher;
pub mod mapper;
pub mod models;

pub use client::{FeedSource, HttpFeedSource};
pub use fetcher::{classify, FeedFetcher, Fetcher};
pub use mapper::{map_item, map_items};
pub use models::{FeedItem, FeedMedia, FeedResponse};
