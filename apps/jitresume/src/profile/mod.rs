/// Profile acquisition — the raw payload, where it comes from, and the local cache.
///
/// The payload is kept as an opaque JSON value here; only `content` interprets it.
use std::io::Write;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, info};

use crate::errors::ResumeError;

pub mod linkedin;

pub use linkedin::LinkedInSource;

/// Unprocessed profile payload as returned by the source.
#[derive(Debug, Clone, PartialEq)]
pub struct RawProfile {
    value: Value,
}

impl RawProfile {
    /// Parses a payload body. Anything that is not JSON is a fatal decode error.
    pub fn parse(body: &str) -> Result<Self, ResumeError> {
        Self::from_slice(body.as_bytes())
    }

    /// Same as `parse`, but bytes that are not UTF-8 are a decode error rather than I/O.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, ResumeError> {
        Ok(Self {
            value: serde_json::from_slice(bytes)?,
        })
    }

    pub fn as_value(&self) -> &Value {
        &self.value
    }
}

impl From<Value> for RawProfile {
    fn from(value: Value) -> Self {
        Self { value }
    }
}

/// Something that can produce a raw profile body for the requested field selector.
pub trait ProfileSource {
    fn fetch(&self, fields: &str) -> Result<String, ResumeError>;
}

/// Cache-first profile access.
///
/// A present cache file short-circuits the source entirely. On a miss the source
/// is called once (no retry) and a body that parses is persisted before returning.
/// Delete the cache file to pick up profile edits.
pub struct ProfileStore<S> {
    cache_file: PathBuf,
    source: S,
}

impl<S: ProfileSource> ProfileStore<S> {
    pub fn new(cache_file: impl Into<PathBuf>, source: S) -> Self {
        Self {
            cache_file: cache_file.into(),
            source,
        }
    }

    pub fn load(&self, fields: &str) -> Result<RawProfile, ResumeError> {
        match std::fs::read(&self.cache_file) {
            Ok(bytes) => {
                info!(path = %self.cache_file.display(), "Using cached profile");
                return RawProfile::from_slice(&bytes);
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.cache_file.display(), "Profile cache miss");
            }
            Err(e) => return Err(e.into()),
        }

        let body = self.source.fetch(fields)?;
        let profile = RawProfile::parse(&body)?;
        self.persist(&body)?;
        info!(
            path = %self.cache_file.display(),
            bytes = body.len(),
            "Fetched profile and cached it"
        );
        Ok(profile)
    }

    fn persist(&self, body: &str) -> Result<(), ResumeError> {
        write_atomically(&self.cache_file, body.as_bytes())
    }
}

/// Writes through a temp file in the destination directory, then renames it over
/// `path`. The temp file is removed if anything fails before the rename.
pub fn write_atomically(path: &Path, bytes: &[u8]) -> Result<(), ResumeError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let mut file = tempfile::NamedTempFile::new_in(&dir)?;
    file.write_all(bytes)?;
    file.flush()?;
    file.persist(path).map_err(|e| ResumeError::Io(e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct CountingSource {
        body: String,
        calls: Cell<u32>,
    }

    impl CountingSource {
        fn new(body: &str) -> Self {
            Self {
                body: body.to_string(),
                calls: Cell::new(0),
            }
        }
    }

    impl ProfileSource for CountingSource {
        fn fetch(&self, _fields: &str) -> Result<String, ResumeError> {
            self.calls.set(self.calls.get() + 1);
            Ok(self.body.clone())
        }
    }

    struct FailingSource;

    impl ProfileSource for FailingSource {
        fn fetch(&self, _fields: &str) -> Result<String, ResumeError> {
            Err(ResumeError::Api {
                status: 401,
                message: "Invalid access token".to_string(),
            })
        }
    }

    #[test]
    fn test_cache_hit_skips_source() {
        let dir = tempfile::tempdir().unwrap();
        let cache = dir.path().join(".jitresume");
        std::fs::write(&cache, r#"{"firstName":"A","lastName":"B"}"#).unwrap();

        let store = ProfileStore::new(&cache, CountingSource::new("{}"));
        let raw = store.load("first-name").unwrap();

        assert_eq!(raw.as_value()["firstName"], "A");
        assert_eq!(raw.as_value()["lastName"], "B");
        assert_eq!(store.source.calls.get(), 0);
    }

    #[test]
    fn test_cache_miss_fetches_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let cache = dir.path().join(".jitresume");
        let body = r#"{"firstName":"C"}"#;

        let store = ProfileStore::new(&cache, CountingSource::new(body));
        let raw = store.load("first-name").unwrap();

        assert_eq!(raw.as_value()["firstName"], "C");
        assert_eq!(store.source.calls.get(), 1);
        assert_eq!(std::fs::read_to_string(&cache).unwrap(), body);

        // Second load is served from disk.
        store.load("first-name").unwrap();
        assert_eq!(store.source.calls.get(), 1);
    }

    #[test]
    fn test_fetch_failure_is_fatal_and_not_cached() {
        let dir = tempfile::tempdir().unwrap();
        let cache = dir.path().join(".jitresume");

        let store = ProfileStore::new(&cache, FailingSource);
        let err = store.load("first-name").unwrap_err();

        assert!(matches!(err, ResumeError::Api { status: 401, .. }));
        assert!(!cache.exists());
    }

    #[test]
    fn test_garbage_payload_not_cached() {
        let dir = tempfile::tempdir().unwrap();
        let cache = dir.path().join(".jitresume");

        let store = ProfileStore::new(&cache, CountingSource::new("<html>oops</html>"));
        let err = store.load("first-name").unwrap_err();

        assert!(matches!(err, ResumeError::Decode(_)));
        assert!(!cache.exists());
    }

    #[test]
    fn test_corrupt_cache_is_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let cache = dir.path().join(".jitresume");
        std::fs::write(&cache, "not json").unwrap();

        let store = ProfileStore::new(&cache, CountingSource::new("{}"));
        assert!(matches!(store.load("x"), Err(ResumeError::Decode(_))));
        assert_eq!(store.source.calls.get(), 0);
    }

    #[test]
    fn test_non_utf8_cache_is_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let cache = dir.path().join(".jitresume");
        std::fs::write(&cache, [0xff, 0xfe, b'{']).unwrap();

        let store = ProfileStore::new(&cache, CountingSource::new("{}"));
        let err = store.load("x").unwrap_err();

        assert!(matches!(err, ResumeError::Decode(_)));
        assert_eq!(err.code(), "DECODE_ERROR");
        assert_eq!(store.source.calls.get(), 0);
    }
}
