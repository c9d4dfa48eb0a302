//! Operator notification feed built from the four record collections.

pub mod aggregator;
pub mod feed;
pub mod formatter;

pub use aggregator::{FeedPage, NotificationAggregator};
pub use feed::NotificationFeed;
pub use formatter::NotificationFormatter;
