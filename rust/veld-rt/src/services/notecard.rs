//! Notecard line cache with idle-time eviction.
//!
//! Scripts read notecards one line at a time, so the runtime keeps the
//! split lines of recently-read notecards in memory. Entries are
//! write-once: caching an id that is already present neither replaces the
//! lines nor refreshes the timestamp. There is no eviction timer; every
//! [`NotecardCache::cache`] call sweeps entries idle for more than 30
//! seconds before inserting, and reads refresh the entry's timestamp.
//!
//! Cache misses are ordinary, retryable states reported through sentinel
//! returns, never through errors: an uncached id reads as -1 lines or an
//! empty line, and a line number past the end yields the end-of-file
//! marker.
//!
//! # Example
//!
//! ```rust
//! use uuid::Uuid;
//! use veld_rt::services::notecard::{NotecardCache, EOF_MARKER};
//!
//! let cache = NotecardCache::new();
//! let id = Uuid::new_v4();
//! cache.cache(id, "first\nsecond");
//! assert_eq!(cache.get_lines(id), 2);
//! assert_eq!(cache.get_line(id, 1), "second");
//! assert_eq!(cache.get_line(id, 7), EOF_MARKER);
//! ```

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::Mutex;
use uuid::Uuid;

/// Seconds a cached notecard may sit unreferenced before a sweep drops it.
const IDLE_EXPIRY_SECS: i64 = 30;

/// Returned for a line number at or past the end of the notecard. Script
/// code matches this exact three-newline string, so it is part of the
/// contract.
pub const EOF_MARKER: &str = "\n\n\n";

/// One cached notecard: its pre-split lines and the last reference time.
struct Notecard {
    lines: Vec<String>,
    last_ref: DateTime<Utc>,
}

/// Shared cache of notecard lines keyed by asset id.
///
/// Construct one per runtime and pass it by reference; every operation
/// serializes on the internal table lock, so `&NotecardCache` is freely
/// shareable across script-execution threads.
pub struct NotecardCache {
    entries: Mutex<HashMap<Uuid, Notecard>>,
}

impl NotecardCache {
    pub fn new() -> Self {
        NotecardCache {
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Sweep stale entries, then cache `text` under `asset_id` unless an
    /// entry already exists.
    pub fn cache(&self, asset_id: Uuid, text: &str) {
        self.cache_at(asset_id, text, Utc::now());
    }

    /// [`NotecardCache::cache`] with an explicit current time.
    pub fn cache_at(&self, asset_id: Uuid, text: &str, now: DateTime<Utc>) {
        self.sweep(now);
        let mut entries = self.entries.lock().expect("notecard cache lock poisoned");
        entries.entry(asset_id).or_insert_with(|| Notecard {
            lines: split_lines(text),
            last_ref: now,
        });
    }

    /// Whether `asset_id` currently has an entry. Does not refresh it.
    pub fn is_cached(&self, asset_id: Uuid) -> bool {
        self.entries
            .lock()
            .expect("notecard cache lock poisoned")
            .contains_key(&asset_id)
    }

    /// Number of cached lines, refreshing the entry; -1 when uncached.
    pub fn get_lines(&self, asset_id: Uuid) -> i32 {
        self.get_lines_at(asset_id, Utc::now())
    }

    /// [`NotecardCache::get_lines`] with an explicit current time.
    pub fn get_lines_at(&self, asset_id: Uuid, now: DateTime<Utc>) -> i32 {
        let mut entries = self.entries.lock().expect("notecard cache lock poisoned");
        match entries.get_mut(&asset_id) {
            Some(nc) => {
                nc.last_ref = now;
                nc.lines.len() as i32
            }
            None => -1,
        }
    }

    /// Text of line `line` (0-indexed), refreshing the entry. A negative
    /// line number or an uncached id reads as the empty string; a line
    /// number at or past the end reads as [`EOF_MARKER`].
    pub fn get_line(&self, asset_id: Uuid, line: i32) -> String {
        self.get_line_at(asset_id, line, Utc::now())
    }

    /// [`NotecardCache::get_line`] with an explicit current time.
    pub fn get_line_at(&self, asset_id: Uuid, line: i32, now: DateTime<Utc>) -> String {
        if line < 0 {
            return String::new();
        }
        let mut entries = self.entries.lock().expect("notecard cache lock poisoned");
        let Some(nc) = entries.get_mut(&asset_id) else {
            return String::new();
        };
        nc.last_ref = now;
        match nc.lines.get(line as usize) {
            Some(text) => text.clone(),
            None => EOF_MARKER.to_owned(),
        }
    }

    /// [`NotecardCache::get_line`] truncated to at most `max_len`
    /// characters. The EOF marker is capped like any other return.
    pub fn get_line_capped(&self, asset_id: Uuid, line: i32, max_len: usize) -> String {
        self.get_line_capped_at(asset_id, line, max_len, Utc::now())
    }

    /// [`NotecardCache::get_line_capped`] with an explicit current time.
    pub fn get_line_capped_at(
        &self,
        asset_id: Uuid,
        line: i32,
        max_len: usize,
        now: DateTime<Utc>,
    ) -> String {
        let text = self.get_line_at(asset_id, line, now);
        if text.chars().count() > max_len {
            text.chars().take(max_len).collect()
        } else {
            text
        }
    }

    /// Evict every entry unreferenced for more than 30 seconds.
    pub fn cache_check(&self) {
        self.sweep(Utc::now());
    }

    /// [`NotecardCache::cache_check`] with an explicit current time.
    pub fn cache_check_at(&self, now: DateTime<Utc>) {
        self.sweep(now);
    }

    fn sweep(&self, now: DateTime<Utc>) {
        self.entries
            .lock()
            .expect("notecard cache lock poisoned")
            .retain(|_, nc| now.signed_duration_since(nc.last_ref)
                <= Duration::seconds(IDLE_EXPIRY_SECS));
    }
}

impl Default for NotecardCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Split decoded notecard text into lines. All three historical line
/// terminators occur in the wild; a trailing terminator does not produce
/// a trailing empty line.
fn split_lines(text: &str) -> Vec<String> {
    let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
    normalized.lines().map(str::to_owned).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn after_expiry() -> DateTime<Utc> {
        Utc::now() + Duration::seconds(IDLE_EXPIRY_SECS + 1)
    }

    // =====================================================================
    // 1. Caching and line counting
    // =====================================================================
    #[test]
    fn cache_and_count_lines() {
        let cache = NotecardCache::new();
        let id = Uuid::new_v4();
        assert!(!cache.is_cached(id));
        assert_eq!(cache.get_lines(id), -1);

        cache.cache(id, "a\nb\nc");
        assert!(cache.is_cached(id));
        assert_eq!(cache.get_lines(id), 3);
    }

    // =====================================================================
    // 2. Line reads and sentinels
    // =====================================================================
    #[test]
    fn line_reads_and_sentinels() {
        let cache = NotecardCache::new();
        let id = Uuid::new_v4();
        cache.cache(id, "a\nb\nc");

        assert_eq!(cache.get_line(id, 0), "a");
        assert_eq!(cache.get_line(id, 2), "c");
        assert_eq!(cache.get_line(id, 3), EOF_MARKER);
        assert_eq!(cache.get_line(id, 5), EOF_MARKER);
        assert_eq!(cache.get_line(id, -1), "");
        assert_eq!(cache.get_line(Uuid::new_v4(), 0), "");
    }

    // =====================================================================
    // 3. Write-once until evicted
    // =====================================================================
    #[test]
    fn cache_is_write_once() {
        let cache = NotecardCache::new();
        let id = Uuid::new_v4();
        cache.cache(id, "original");
        cache.cache(id, "replacement\nwith\nmore\nlines");
        assert_eq!(cache.get_lines(id), 1);
        assert_eq!(cache.get_line(id, 0), "original");
    }

    // =====================================================================
    // 4. Length cap
    // =====================================================================
    #[test]
    fn line_length_cap() {
        let cache = NotecardCache::new();
        let id = Uuid::new_v4();
        cache.cache(id, "abcdefgh");
        assert_eq!(cache.get_line_capped(id, 0, 3), "abc");
        assert_eq!(cache.get_line_capped(id, 0, 100), "abcdefgh");
        // the EOF marker is capped too
        assert_eq!(cache.get_line_capped(id, 9, 2), "\n\n");
    }

    // =====================================================================
    // 5. Idle entries are swept
    // =====================================================================
    #[test]
    fn idle_entries_are_swept() {
        let cache = NotecardCache::new();
        let id = Uuid::new_v4();
        cache.cache(id, "a\nb\nc");
        assert_eq!(cache.get_lines(id), 3);

        cache.cache_check_at(after_expiry());
        assert!(!cache.is_cached(id));
        assert_eq!(cache.get_lines(id), -1);
        assert_eq!(cache.get_line(id, 0), "");
    }

    // =====================================================================
    // 6. Reads keep an entry alive
    // =====================================================================
    #[test]
    fn reads_refresh_last_ref() {
        let cache = NotecardCache::new();
        let id = Uuid::new_v4();
        cache.cache(id, "alive");

        // read 20 seconds in, then sweep 20 seconds after the read
        let later = Utc::now() + Duration::seconds(20);
        assert_eq!(cache.get_lines_at(id, later), 1);
        cache.cache_check_at(later + Duration::seconds(20));
        assert!(cache.is_cached(id));

        // a full idle window after the read evicts
        cache.cache_check_at(later + Duration::seconds(IDLE_EXPIRY_SECS + 1));
        assert!(!cache.is_cached(id));
    }

    // =====================================================================
    // 7. Inserting sweeps first
    // =====================================================================
    #[test]
    fn insert_sweeps_stale_entries() {
        let cache = NotecardCache::new();
        let stale = Uuid::new_v4();
        let fresh = Uuid::new_v4();
        cache.cache(stale, "old");

        cache.cache_at(fresh, "new", after_expiry());
        assert!(!cache.is_cached(stale));
        assert!(cache.is_cached(fresh));
    }

    // =====================================================================
    // 8. Line splitting normalizes terminators
    // =====================================================================
    #[test]
    fn line_splitting() {
        assert_eq!(split_lines("a\nb\nc"), vec!["a", "b", "c"]);
        assert_eq!(split_lines("a\r\nb\rc"), vec!["a", "b", "c"]);
        assert_eq!(split_lines("a\nb\n"), vec!["a", "b"]);
        assert_eq!(split_lines(""), Vec::<String>::new());
        assert_eq!(split_lines("a\n\nb"), vec!["a", "", "b"]);
    }

    // =====================================================================
    // 9. Shared across threads
    // =====================================================================
    #[test]
    fn shared_across_threads() {
        use std::sync::Arc;

        let cache = Arc::new(NotecardCache::new());
        let id = Uuid::new_v4();
        cache.cache(id, "x\ny");

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let cache = Arc::clone(&cache);
                std::thread::spawn(move || cache.get_lines(id))
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), 2);
        }
    }
}
