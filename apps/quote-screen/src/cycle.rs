//! One display cycle: `CHECK_CACHE → FRESH | STALE → ACQUIRE → SAVE`.
//!
//! Both paths end with content ready for composition. Nothing here can fail:
//! a failed save is logged and the freshly acquired content is still returned.

use std::sync::Arc;

use tracing::{error, info};

use crate::cache::{is_stale, seconds_until_stale, QuoteCache};
use crate::clock::Clock;
use crate::content::{Acquisition, ContentAcquirer, FittedContent};

/// What the renderer needs from one cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleOutcome {
    pub content: FittedContent,
    /// True when the content was just acquired. The panel is fully cleared before
    /// drawing new content to remove ghosting; cached content is drawn directly.
    pub refreshed: bool,
    /// Seconds until the cached content goes stale. `None` after a refresh.
    pub next_refresh_in: Option<u64>,
    /// Present only when this cycle acquired content.
    pub acquisition: Option<Acquisition>,
}

pub struct DisplayCycle {
    cache: Arc<dyn QuoteCache>,
    acquirer: ContentAcquirer,
    clock: Arc<dyn Clock>,
    ttl_secs: u64,
}

impl DisplayCycle {
    pub fn new(
        cache: Arc<dyn QuoteCache>,
        acquirer: ContentAcquirer,
        clock: Arc<dyn Clock>,
        ttl_secs: u64,
    ) -> Self {
        Self {
            cache,
            acquirer,
            clock,
            ttl_secs,
        }
    }

    pub async fn run(&self) -> CycleOutcome {
        let now = self.clock.now();
        let record = self.cache.load();

        if !is_stale(record.as_ref(), now, self.ttl_secs) {
            if let Some((record, content)) = record.and_then(|r| r.content().map(|c| (r, c))) {
                let remaining = seconds_until_stale(&record, now, self.ttl_secs);
                info!("Using cached quote ({remaining}s until next refresh)");
                return CycleOutcome {
                    content,
                    refreshed: false,
                    next_refresh_in: Some(remaining),
                    acquisition: None,
                };
            }
        }

        info!("Quote cache stale, acquiring new quote");
        let acquisition = self.acquirer.acquire().await;

        if let Err(e) = self.cache.save(&acquisition.content, now) {
            error!("Failed to save quote cache: {e}");
        }

        CycleOutcome {
            content: acquisition.content.clone(),
            refreshed: true,
            next_refresh_in: None,
            acquisition: Some(acquisition),
        }
    }
}
