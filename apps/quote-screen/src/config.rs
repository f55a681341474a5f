use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::layout::{FontFamily, FontSpec};

const DEFAULT_QUOTE_API_URL: &str = "https://v1.hitokoto.cn/";
/// d = literature, k = philosophy, i = poetry.
const DEFAULT_QUOTE_CATEGORIES: &str = "d,k,i";
const DEFAULT_STATE_FILE: &str = "/tmp/smart_screen_state.json";

/// Application configuration loaded from environment variables.
/// Every key is optional; unset keys fall back to the values the panel was tuned for.
#[derive(Debug, Clone)]
pub struct Config {
    pub quote_api_url: String,
    pub quote_categories: Vec<String>,
    pub state_file: PathBuf,
    pub cache_ttl_secs: u64,
    pub max_attempts: u32,
    pub max_lines: usize,
    pub width_budget_px: u32,
    pub backoff: Duration,
    pub request_timeout: Duration,
    pub font_family: FontFamily,
    pub quote_font_size_px: u32,
    pub footer_font_size_px: u32,
    pub rust_log: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            quote_api_url: DEFAULT_QUOTE_API_URL.to_string(),
            quote_categories: split_categories(DEFAULT_QUOTE_CATEGORIES),
            state_file: PathBuf::from(DEFAULT_STATE_FILE),
            cache_ttl_secs: 600,
            max_attempts: 5,
            max_lines: 4,
            width_budget_px: 360,
            backoff: Duration::from_millis(1000),
            request_timeout: Duration::from_secs(5),
            font_family: FontFamily::WqyMicroHei,
            quote_font_size_px: 22,
            footer_font_size_px: 18,
            rust_log: "info".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();

        let config = Config {
            quote_api_url: std::env::var("QUOTE_API_URL").unwrap_or(defaults.quote_api_url),
            quote_categories: std::env::var("QUOTE_CATEGORIES")
                .map(|v| split_categories(&v))
                .unwrap_or(defaults.quote_categories),
            state_file: std::env::var("STATE_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.state_file),
            cache_ttl_secs: parse_env("CACHE_TTL_SECS", defaults.cache_ttl_secs)?,
            max_attempts: parse_env("MAX_ATTEMPTS", defaults.max_attempts)?,
            max_lines: parse_env("MAX_LINES", defaults.max_lines)?,
            width_budget_px: parse_env("WIDTH_BUDGET_PX", defaults.width_budget_px)?,
            backoff: Duration::from_millis(parse_env("BACKOFF_MS", 1000u64)?),
            request_timeout: Duration::from_secs(parse_env("REQUEST_TIMEOUT_SECS", 5u64)?),
            font_family: match std::env::var("FONT_FAMILY") {
                Ok(raw) => FontFamily::from_config(&raw)
                    .with_context(|| format!("FONT_FAMILY '{raw}' is not a known font"))?,
                Err(_) => defaults.font_family,
            },
            quote_font_size_px: parse_env("QUOTE_FONT_SIZE_PX", defaults.quote_font_size_px)?,
            footer_font_size_px: parse_env("FOOTER_FONT_SIZE_PX", defaults.footer_font_size_px)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or(defaults.rust_log),
        };

        config.validate()?;
        Ok(config)
    }

    /// Font for the quote lines. Fitting and rendering both use this font.
    pub fn quote_font(&self) -> FontSpec {
        FontSpec::new(self.font_family, self.quote_font_size_px)
    }

    pub fn footer_font(&self) -> FontSpec {
        FontSpec::new(self.font_family, self.footer_font_size_px)
    }

    fn validate(&self) -> Result<()> {
        anyhow::ensure!(self.max_attempts >= 1, "MAX_ATTEMPTS must be at least 1");
        anyhow::ensure!(self.max_lines >= 1, "MAX_LINES must be at least 1");
        anyhow::ensure!(self.width_budget_px > 0, "WIDTH_BUDGET_PX must be positive");
        anyhow::ensure!(self.cache_ttl_secs > 0, "CACHE_TTL_SECS must be positive");
        anyhow::ensure!(
            self.quote_font_size_px > 0 && self.footer_font_size_px > 0,
            "font sizes must be positive"
        );
        Ok(())
    }
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        Err(_) => Ok(default),
    }
}

fn split_categories(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .collect()
}
