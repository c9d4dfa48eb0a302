//! Concurrent fetch and merge of the four notification sources.

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, error, warn};

use dinehub_core::config::NotificationConfig;
use dinehub_core::error::{AppError, ErrorKind};
use dinehub_core::result::AppResult;
use dinehub_core::types::{PageRequest, PageResponse};
use dinehub_entity::{NotificationItem, NotificationKind};
use dinehub_store::{OrderQuery, RecordStore, ReservationQuery};

use super::feed::NotificationFeed;
use super::formatter::NotificationFormatter;

/// The head of a freshly built feed.
#[derive(Debug, Clone, Serialize)]
pub struct FeedPage {
    /// The newest items, at most the requested limit.
    pub items: Vec<NotificationItem>,
    /// Size of the whole feed.
    pub total_items: usize,
    /// Sources skipped because they could not be read.
    pub failed_sources: Vec<NotificationKind>,
}

/// Builds the operator notification feed.
///
/// The most recent full feed is retained so that `see_more` pages the same
/// list the head was cut from.
pub struct NotificationAggregator {
    /// Backing record store.
    store: Arc<dyn RecordStore>,
    /// Limits and failure mode.
    config: NotificationConfig,
    /// Last feed built by `get_notification_feed`.
    latest: RwLock<Option<Arc<NotificationFeed>>>,
}

impl std::fmt::Debug for NotificationAggregator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationAggregator")
            .field("config", &self.config)
            .finish()
    }
}

impl NotificationAggregator {
    /// Creates a new aggregator.
    pub fn new(store: Arc<dyn RecordStore>, config: NotificationConfig) -> Self {
        Self {
            store,
            config,
            latest: RwLock::new(None),
        }
    }

    /// Rebuilds the feed and returns its first `limit` items.
    ///
    /// `None` uses the configured default limit.
    pub async fn get_notification_feed(&self, limit: Option<usize>) -> Result<FeedPage, AppError> {
        let feed = self.refresh().await?;
        let limit = limit.unwrap_or(self.config.default_limit);

        Ok(FeedPage {
            items: feed.top(limit).to_vec(),
            total_items: feed.len(),
            failed_sources: feed.failed_sources().to_vec(),
        })
    }

    /// Pages through the retained feed, building one if none exists yet.
    pub async fn see_more(
        &self,
        request: PageRequest,
    ) -> Result<PageResponse<NotificationItem>, AppError> {
        let retained = self.latest.read().await.clone();
        let feed = match retained {
            Some(feed) => feed,
            None => self.refresh().await?,
        };
        Ok(feed.page(&request))
    }

    /// Fetches every source, builds a new feed and retains it.
    pub async fn refresh(&self) -> Result<Arc<NotificationFeed>, AppError> {
        let feed = Arc::new(self.build().await?);
        *self.latest.write().await = Some(feed.clone());
        Ok(feed)
    }

    async fn build(&self) -> Result<NotificationFeed, AppError> {
        let reservations_query = ReservationQuery::all();
        let orders_query = OrderQuery::all();

        let (reservations, orders, contacts, feedback) = tokio::join!(
            self.store.list_reservations(&reservations_query),
            self.store.list_orders(&orders_query),
            self.store.list_contacts(),
            self.store.list_feedback(),
        );

        let mut merge = Merge::new(self.config.tolerate_source_failures);
        merge.add(
            NotificationKind::Reservation,
            reservations,
            NotificationFormatter::reservation,
        )?;
        merge.add(NotificationKind::Order, orders, NotificationFormatter::order)?;
        merge.add(NotificationKind::Contact, contacts, NotificationFormatter::contact)?;
        merge.add(NotificationKind::Feedback, feedback, NotificationFormatter::feedback)?;

        if merge.failed.len() == NotificationKind::ALL.len() {
            error!("Every notification source failed");
            return Err(AppError::new(
                ErrorKind::SourceFetchFailure,
                "Every notification source failed",
            ));
        }

        debug!(
            items = merge.items.len(),
            failed = merge.failed.len(),
            "Notification feed built"
        );

        Ok(NotificationFeed::new(merge.items, merge.failed, Utc::now()))
    }
}

/// Accumulates items from each source in merge order.
struct Merge {
    tolerant: bool,
    items: Vec<NotificationItem>,
    failed: Vec<NotificationKind>,
}

impl Merge {
    fn new(tolerant: bool) -> Self {
        Self {
            tolerant,
            items: Vec::new(),
            failed: Vec::new(),
        }
    }

    fn add<T>(
        &mut self,
        kind: NotificationKind,
        fetched: AppResult<Vec<T>>,
        format: fn(&T) -> NotificationItem,
    ) -> Result<(), AppError> {
        match fetched {
            Ok(records) => {
                self.items.extend(records.iter().map(format));
                Ok(())
            }
            Err(e) if self.tolerant => {
                warn!(source = %kind, error = %e, "Notification source unavailable, skipping");
                self.failed.push(kind);
                Ok(())
            }
            Err(e) => {
                error!(source = %kind, error = %e, "Notification source failed");
                Err(AppError::with_source(
                    ErrorKind::SourceFetchFailure,
                    format!("Failed to fetch {kind} notifications"),
                    e,
                ))
            }
        }
    }
}
