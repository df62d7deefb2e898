// ── TTL cache collaborator ──
//
// Components never own cache state; they are handed an `Arc<dyn Cache>`.
// Values are stored as JSON so one cache can hold devices, sensor lists and
// summaries side by side, the way a shared host cache would.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use dashmap::DashMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio::time::Instant;
use tracing::{debug, trace};
use url::Url;

use crate::model::ObjectId;

/// Key/value store with per-entry time-to-live.
///
/// Implementations must treat a read past an entry's TTL as a miss and must
/// be safe for concurrent use; components add no locking of their own.
pub trait Cache: Send + Sync {
    fn get(&self, key: &str) -> Option<serde_json::Value>;
    fn set(&self, key: &str, value: serde_json::Value, ttl: Duration);
    fn delete(&self, key: &str);
}

// ── Keys ─────────────────────────────────────────────────────────────

pub mod keys {
    use super::ObjectId;

    /// Fixed key for the system-wide summary.
    pub const AGGREGATE_SUMMARY: &str = "prtg_aggregate_summary";

    /// Resolved device, keyed by the lowercased search name.
    pub fn device(name: &str) -> String {
        format!("prtg_device_{}", name.to_lowercase())
    }

    pub fn sensors(device_id: ObjectId) -> String {
        format!("prtg_sensors_{device_id}")
    }
}

// ── Typed access ─────────────────────────────────────────────────────

/// Read and decode an entry. An entry that no longer decodes is a miss.
pub(crate) fn get_as<T: DeserializeOwned>(cache: &dyn Cache, key: &str) -> Option<T> {
    let value = cache.get(key)?;
    match serde_json::from_value(value) {
        Ok(v) => Some(v),
        Err(e) => {
            debug!(key, error = %e, "discarding undecodable cache entry");
            cache.delete(key);
            None
        }
    }
}

pub(crate) fn set_as<T: Serialize>(cache: &dyn Cache, key: &str, value: &T, ttl: Duration) {
    match serde_json::to_value(value) {
        Ok(v) => cache.set(key, v, ttl),
        Err(e) => debug!(key, error = %e, "value not cacheable"),
    }
}

// ── In-memory implementation ─────────────────────────────────────────

struct Entry {
    value: serde_json::Value,
    expires_at: Instant,
}

/// Process-local cache backed by `DashMap`.
///
/// Reads time from `tokio::time::Instant`, so tests drive expiry with
/// `tokio::time::pause()` / `advance()`. Expired entries are dropped lazily
/// on read.
#[derive(Default)]
pub struct MemoryCache {
    entries: DashMap<String, Entry>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Cache for MemoryCache {
    fn get(&self, key: &str) -> Option<serde_json::Value> {
        let now = Instant::now();
        let hit = self
            .entries
            .get(key)
            .map(|entry| (entry.expires_at > now).then(|| entry.value.clone()))?;
        if hit.is_none() {
            trace!(key, "cache entry expired");
            self.entries.remove_if(key, |_, entry| entry.expires_at <= now);
        }
        hit
    }

    fn set(&self, key: &str, value: serde_json::Value, ttl: Duration) {
        let expires_at = Instant::now() + ttl;
        self.entries
            .insert(key.to_owned(), Entry { value, expires_at });
    }

    fn delete(&self, key: &str) {
        self.entries.remove(key);
    }
}

// ── File-backed implementation ───────────────────────────────────────

#[derive(Serialize, Deserialize)]
struct StoredEntry {
    /// Unix time in milliseconds after which the entry is stale.
    expires_at_ms: u64,
    value: serde_json::Value,
}

/// Cache that outlives the process: one JSON file per key under `dir`.
///
/// Short-lived callers (one CLI invocation per lookup) share entries this
/// way. Every I/O or decode failure is a miss; the cache never fails a read.
pub struct FileCache {
    dir: PathBuf,
}

impl FileCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// `root/<server>`, so entries from different PRTG servers never mix.
    pub fn for_server(root: &Path, server: &Url) -> Self {
        let mut name = server.host_str().unwrap_or("local").to_owned();
        if let Some(port) = server.port() {
            name.push_str(&format!("_{port}"));
        }
        let path = server.path().trim_matches('/');
        if !path.is_empty() {
            name.push('_');
            name.push_str(path);
        }
        Self::new(root.join(file_safe(&name)))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", file_safe(key)))
    }
}

/// Escape everything outside `[A-Za-z0-9_.-]` as `%XX`.
fn file_safe(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'_' | b'-' | b'.') {
            out.push(char::from(byte));
        } else {
            out.push_str(&format!("%{byte:02X}"));
        }
    }
    out
}

fn millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

fn unix_now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, millis)
}

impl Cache for FileCache {
    fn get(&self, key: &str) -> Option<serde_json::Value> {
        let path = self.path_for(key);
        let raw = fs::read(&path).ok()?;
        let entry: StoredEntry = match serde_json::from_slice(&raw) {
            Ok(entry) => entry,
            Err(e) => {
                debug!(key, error = %e, "discarding corrupt cache file");
                let _ = fs::remove_file(&path);
                return None;
            }
        };
        if entry.expires_at_ms <= unix_now_ms() {
            trace!(key, "cache entry expired");
            let _ = fs::remove_file(&path);
            return None;
        }
        Some(entry.value)
    }

    fn set(&self, key: &str, value: serde_json::Value, ttl: Duration) {
        let entry = StoredEntry {
            expires_at_ms: unix_now_ms().saturating_add(millis(ttl)),
            value,
        };
        let path = self.path_for(key);
        // Write to a sibling and rename so readers never see a partial file.
        let tmp = path.with_extension(format!("json.{}.tmp", std::process::id()));
        let written = fs::create_dir_all(&self.dir)
            .and_then(|()| serde_json::to_vec(&entry).map_err(std::io::Error::other))
            .and_then(|bytes| fs::write(&tmp, bytes))
            .and_then(|()| fs::rename(&tmp, &path));
        if let Err(e) = written {
            debug!(key, dir = %self.dir.display(), error = %e, "cache write failed");
            let _ = fs::remove_file(&tmp);
        }
    }

    fn delete(&self, key: &str) {
        let _ = fs::remove_file(self.path_for(key));
    }
}
