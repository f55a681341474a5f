//! Content acquisition: fetch, fit, retry, fall back.
//!
//! # Retry policy
//! - At most `max_attempts` fetch-or-fit attempts per run.
//! - A fetch failure, an empty fit and a too-long fit all consume one attempt.
//! - Between attempts the acquirer sleeps `backoff` through the injected clock.
//! - Too-long quotes are rejected, never truncated.
//! - After the last rejected attempt the built-in fallback is returned.
//!
//! Fetch failures and shape rejections share one counter, so a run of network
//! errors can exhaust the budget on its own. This keeps the worst-case latency at
//! `max_attempts x (request timeout + backoff)`.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::clock::Clock;
use crate::config::Config;
use crate::content::footer::build_footer;
use crate::content::models::{Acquisition, ContentOrigin, FittedContent};
use crate::errors::Rejection;
use crate::layout::{fit_lines, FontSpec, TextMeasurer};
use crate::quote_client::QuoteSource;

/// Retry and layout parameters for one acquirer.
#[derive(Debug, Clone, Copy)]
pub struct AcquireSettings {
    pub max_attempts: u32,
    pub max_lines: usize,
    pub width_budget: u32,
    pub backoff: Duration,
    /// The font the quote lines will be rendered in.
    pub font: FontSpec,
}

impl AcquireSettings {
    pub fn from_config(config: &Config, font: FontSpec) -> Self {
        Self {
            max_attempts: config.max_attempts,
            max_lines: config.max_lines,
            width_budget: config.width_budget_px,
            backoff: config.backoff,
            font,
        }
    }
}

pub struct ContentAcquirer {
    source: Arc<dyn QuoteSource>,
    measurer: Arc<dyn TextMeasurer>,
    clock: Arc<dyn Clock>,
    settings: AcquireSettings,
}

impl ContentAcquirer {
    pub fn new(
        source: Arc<dyn QuoteSource>,
        measurer: Arc<dyn TextMeasurer>,
        clock: Arc<dyn Clock>,
        settings: AcquireSettings,
    ) -> Self {
        Self {
            source,
            measurer,
            clock,
            settings,
        }
    }

    /// Produces displayable content. Never fails; exhaustion yields the fallback.
    pub async fn acquire(&self) -> Acquisition {
        let max_attempts = self.settings.max_attempts;

        for attempt in 1..=max_attempts {
            match self.attempt().await {
                Ok(content) => {
                    info!(
                        "Accepted quote on attempt {}/{} ({} lines)",
                        attempt,
                        max_attempts,
                        content.lines().len()
                    );
                    return Acquisition {
                        content,
                        attempts: attempt,
                        origin: ContentOrigin::Fetched,
                    };
                }
                Err(rejection) => {
                    warn!(
                        "Quote attempt {}/{} rejected: {}",
                        attempt, max_attempts, rejection
                    );
                    if attempt < max_attempts {
                        self.clock.sleep(self.settings.backoff).await;
                    }
                }
            }
        }

        warn!(
            "All {} quote attempts rejected, using fallback content",
            max_attempts
        );
        Acquisition {
            content: FittedContent::fallback(),
            attempts: max_attempts,
            origin: ContentOrigin::Fallback,
        }
    }

    /// One fetch-then-fit attempt.
    async fn attempt(&self) -> Result<FittedContent, Rejection> {
        let quote = self.source.fetch().await?;
        let footer = build_footer(quote.author.as_deref(), quote.source.as_deref());

        let lines = fit_lines(
            &quote.text,
            self.measurer.as_ref(),
            &self.settings.font,
            self.settings.width_budget,
        );

        if lines.len() > self.settings.max_lines {
            return Err(Rejection::TooLong {
                lines: lines.len(),
                max_lines: self.settings.max_lines,
            });
        }

        FittedContent::new(lines, footer).ok_or(Rejection::Empty)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::clock::testing::ManualClock;
    use crate::content::Quote;
    use crate::errors::FetchError;
    use crate::layout::{FontFamily, MetricTableMeasurer};

    /// Replays scripted responses; repeats the last one when the script runs out.
    struct ScriptedSource {
        script: Mutex<VecDeque<Result<Quote, FetchError>>>,
        last: fn() -> Result<Quote, FetchError>,
        calls: AtomicU32,
    }

    impl ScriptedSource {
        fn new(
            script: Vec<Result<Quote, FetchError>>,
            last: fn() -> Result<Quote, FetchError>,
        ) -> Self {
            Self {
                script: Mutex::new(script.into()),
                last,
                calls: AtomicU32::new(0),
            }
        }

        fn calls(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl QuoteSource for ScriptedSource {
        async fn fetch(&self) -> Result<Quote, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let next = self.script.lock().unwrap().pop_front();
            next.unwrap_or_else(self.last)
        }
    }

    fn short_quote() -> Result<Quote, FetchError> {
        Ok(Quote::new(
            "人生如逆旅，我亦是行人。",
            Some("苏轼".to_string()),
            Some("临江仙".to_string()),
        ))
    }

    fn long_quote() -> Result<Quote, FetchError> {
        // 80 ideographs → 5 lines of 16 at 22px / 360px.
        Ok(Quote::new("永".repeat(80), None, None))
    }

    fn network_error() -> Result<Quote, FetchError> {
        Err(FetchError::Status { status: 503 })
    }

    fn settings() -> AcquireSettings {
        AcquireSettings {
            max_attempts: 5,
            max_lines: 4,
            width_budget: 360,
            backoff: Duration::from_secs(1),
            font: FontSpec::new(FontFamily::WqyMicroHei, 22),
        }
    }

    fn acquirer(source: Arc<ScriptedSource>, clock: Arc<ManualClock>) -> ContentAcquirer {
        ContentAcquirer::new(source, Arc::new(MetricTableMeasurer), clock, settings())
    }

    #[tokio::test]
    async fn test_first_attempt_accepted() {
        let source = Arc::new(ScriptedSource::new(vec![], short_quote));
        let clock = Arc::new(ManualClock::at(0));
        let result = acquirer(source.clone(), clock.clone()).acquire().await;

        assert_eq!(result.origin, ContentOrigin::Fetched);
        assert_eq!(result.attempts, 1);
        assert_eq!(result.content.lines(), ["人生如逆旅，我亦是行人。"]);
        assert_eq!(result.content.footer(), "—— 苏轼 · 临江仙");
        assert_eq!(source.calls(), 1);
        assert_eq!(clock.sleep_count(), 0);
    }

    #[tokio::test]
    async fn test_always_too_long_exhausts_budget_then_falls_back() {
        let source = Arc::new(ScriptedSource::new(vec![], long_quote));
        let clock = Arc::new(ManualClock::at(0));
        let result = acquirer(source.clone(), clock.clone()).acquire().await;

        assert_eq!(source.calls(), 5);
        assert_eq!(result.attempts, 5);
        assert_eq!(result.origin, ContentOrigin::Fallback);
        assert_eq!(result.content, FittedContent::fallback());
        // Backoff between attempts only, none after the last.
        assert_eq!(clock.sleep_count(), 4);
    }

    #[tokio::test]
    async fn test_two_failures_then_success_takes_three_attempts() {
        let source = Arc::new(ScriptedSource::new(
            vec![network_error(), network_error()],
            short_quote,
        ));
        let clock = Arc::new(ManualClock::at(100));
        let result = acquirer(source.clone(), clock.clone()).acquire().await;

        assert_eq!(source.calls(), 3);
        assert_eq!(result.attempts, 3);
        assert_eq!(result.origin, ContentOrigin::Fetched);
        assert_eq!(result.content.footer(), "—— 苏轼 · 临江仙");
        assert_eq!(clock.sleep_count(), 2);
        assert_eq!(clock.now(), 102);
    }

    #[tokio::test]
    async fn test_network_errors_and_too_long_share_one_budget() {
        let source = Arc::new(ScriptedSource::new(
            vec![network_error(), long_quote(), network_error(), long_quote()],
            network_error,
        ));
        let clock = Arc::new(ManualClock::at(0));
        let result = acquirer(source.clone(), clock).acquire().await;

        assert_eq!(source.calls(), 5);
        assert_eq!(result.origin, ContentOrigin::Fallback);
    }

    #[tokio::test]
    async fn test_exactly_max_lines_is_accepted() {
        fn four_lines() -> Result<Quote, FetchError> {
            Ok(Quote::new("永".repeat(64), None, None))
        }
        let source = Arc::new(ScriptedSource::new(vec![], four_lines));
        let result = acquirer(source, Arc::new(ManualClock::at(0))).acquire().await;

        assert_eq!(result.origin, ContentOrigin::Fetched);
        assert_eq!(result.content.lines().len(), 4);
        assert_eq!(result.content.footer(), "—— 佚名");
    }

    #[tokio::test]
    async fn test_single_attempt_budget_never_sleeps() {
        let source = Arc::new(ScriptedSource::new(vec![], network_error));
        let clock = Arc::new(ManualClock::at(0));
        let acquirer = ContentAcquirer::new(
            source.clone(),
            Arc::new(MetricTableMeasurer),
            clock.clone(),
            AcquireSettings {
                max_attempts: 1,
                ..settings()
            },
        );
        let result = acquirer.acquire().await;

        assert_eq!(source.calls(), 1);
        assert_eq!(result.origin, ContentOrigin::Fallback);
        assert_eq!(clock.sleep_count(), 0);
    }
}
