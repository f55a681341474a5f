mod cache;
mod clock;
mod config;
mod content;
mod cycle;
mod errors;
mod layout;
mod quote_client;

use std::sync::Arc;

use anyhow::Result;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cache::FileQuoteCache;
use crate::clock::SystemClock;
use crate::config::Config;
use crate::content::{AcquireSettings, ContentAcquirer};
use crate::cycle::DisplayCycle;
use crate::layout::{echo_lines, layout_quote_region, MetricTableMeasurer, QuoteRegion};
use crate::quote_client::HitokotoClient;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on malformed values)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("quote_screen={}", &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting quote-screen v{}", env!("CARGO_PKG_VERSION"));

    let clock = Arc::new(SystemClock);
    let measurer = Arc::new(MetricTableMeasurer);

    let source = HitokotoClient::new(
        config.quote_api_url.clone(),
        config.quote_categories.clone(),
        config.request_timeout,
    )?;
    info!(
        "Quote client initialized ({} categories {:?})",
        config.quote_api_url, config.quote_categories
    );

    let cache = FileQuoteCache::new(config.state_file.clone());
    info!("Quote cache at {}", cache.path().display());

    let quote_font = config.quote_font();
    let footer_font = config.footer_font();
    info!(
        "Quote region: {:?} {}px, {}px budget, max {} lines",
        quote_font.family, quote_font.size_px, config.width_budget_px, config.max_lines
    );

    let acquirer = ContentAcquirer::new(
        Arc::new(source),
        measurer.clone(),
        clock.clone(),
        AcquireSettings::from_config(&config, quote_font),
    );
    let cycle = DisplayCycle::new(Arc::new(cache), acquirer, clock, config.cache_ttl_secs);

    let outcome = cycle.run().await;
    if let Some(acquisition) = &outcome.acquisition {
        info!(
            "New quote ({:?} after {} attempts): full panel clear before drawing",
            acquisition.origin, acquisition.attempts
        );
    }

    let placed = layout_quote_region(
        &outcome.content,
        &QuoteRegion::default(),
        measurer.as_ref(),
        &footer_font,
    );
    for text in &placed {
        debug!("{:?} at ({}, {}): {}", text.role, text.x, text.y, text.text);
    }

    info!("Panel content at {}", chrono::Local::now().format("%H:%M"));
    for line in echo_lines(&outcome.content) {
        info!("{line}");
    }

    // Hand the positioned quote region to the screen composer on stdout.
    let frame = serde_json::json!({
        "refreshed": outcome.refreshed,
        "next_refresh_in": outcome.next_refresh_in,
        "quote_region": placed,
    });
    println!("{frame}");

    Ok(())
}
