use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::cache::{CacheRecord, QuoteCache};
use crate::content::FittedContent;
use crate::errors::CacheError;

/// JSON file at a fixed path acting as a single-slot mailbox.
///
/// Writes go to a temp file in the same directory and are renamed over the
/// target, so a concurrent reader sees either the old record or the new one.
#[derive(Debug, Clone)]
pub struct FileQuoteCache {
    path: PathBuf,
}

impl FileQuoteCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parent_dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }
}

impl QuoteCache for FileQuoteCache {
    fn load(&self) -> Option<CacheRecord> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No quote cache at {}", self.path.display());
                return None;
            }
            Err(e) => {
                warn!("Quote cache {} unreadable: {e}", self.path.display());
                return None;
            }
        };

        match serde_json::from_str::<CacheRecord>(&raw) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!("Quote cache {} is corrupt: {e}", self.path.display());
                None
            }
        }
    }

    fn save(&self, content: &FittedContent, timestamp: i64) -> Result<(), CacheError> {
        let dir = self.parent_dir();
        std::fs::create_dir_all(dir)?;

        let record = CacheRecord::new(content, timestamp);
        let mut tmp = NamedTempFile::new_in(dir)?;
        serde_json::to_writer(&mut tmp, &record)?;
        tmp.flush()?;
        tmp.persist(&self.path)?;

        debug!("Saved quote cache to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let cache = FileQuoteCache::new(dir.path().join("state.json"));
        assert!(cache.load().is_none());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let cache = FileQuoteCache::new(dir.path().join("state.json"));
        let content =
            FittedContent::new(vec!["人生如逆旅，".to_string()], "—— 苏轼".to_string()).unwrap();

        cache.save(&content, 1_700_000_000).unwrap();
        let record = cache.load().unwrap();

        assert_eq!(record.timestamp, 1_700_000_000);
        assert_eq!(record.content(), Some(content));
    }

    #[test]
    fn test_save_creates_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let cache = FileQuoteCache::new(dir.path().join("nested/deeper/state.json"));
        cache.save(&FittedContent::fallback(), 5).unwrap();
        assert!(cache.path().exists());
    }

    #[test]
    fn test_save_replaces_previous_record() {
        let dir = tempfile::tempdir().unwrap();
        let cache = FileQuoteCache::new(dir.path().join("state.json"));
        cache.save(&FittedContent::fallback(), 1).unwrap();
        let newer = FittedContent::new(vec!["新".to_string()], "—— B".to_string()).unwrap();
        cache.save(&newer, 2).unwrap();

        let record = cache.load().unwrap();
        assert_eq!(record.timestamp, 2);
        assert_eq!(record.lines, vec!["新"]);
        // Only the target remains: the temp file was renamed, not copied.
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_corrupt_file_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, "{\"lines\": [\"half").unwrap();
        assert!(FileQuoteCache::new(path).load().is_none());
    }

    #[test]
    fn test_extreme_float_timestamp_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, r#"{"lines":["a"],"footer":"x","timestamp":-1e300}"#).unwrap();
        let record = FileQuoteCache::new(path).load();
        assert!(record.is_none());
        assert!(crate::cache::is_stale(record.as_ref(), 1_700_000_000, 600));
    }

    #[test]
    fn test_reads_record_written_with_float_timestamp() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(
            &path,
            r#"{"lines": ["会的话，"], "footer": "—— 岛上书店", "timestamp": 1712345678.5}"#,
        )
        .unwrap();
        let record = FileQuoteCache::new(path).load().unwrap();
        assert_eq!(record.timestamp, 1_712_345_678);
    }
}
