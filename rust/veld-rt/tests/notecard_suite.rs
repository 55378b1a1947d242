//! Notecard cache lifecycle: populate, read, idle out, re-populate.

use chrono::{Duration, Utc};
use uuid::Uuid;
use veld_rt::services::notecard::{NotecardCache, EOF_MARKER};

#[test]
fn full_lifecycle() {
    let cache = NotecardCache::new();
    let id = Uuid::new_v4();

    // uncached reads are sentinels, not errors
    assert!(!cache.is_cached(id));
    assert_eq!(cache.get_lines(id), -1);
    assert_eq!(cache.get_line(id, 0), "");

    cache.cache(id, "a\nb\nc");
    assert_eq!(cache.get_lines(id), 3);
    assert_eq!(cache.get_line(id, 0), "a");
    assert_eq!(cache.get_line(id, 5), EOF_MARKER);

    // 31 idle seconds later a sweep evicts the entry
    cache.cache_check_at(Utc::now() + Duration::seconds(31));
    assert!(!cache.is_cached(id));

    // and the id can be populated afresh with new content
    cache.cache(id, "replacement");
    assert_eq!(cache.get_lines(id), 1);
    assert_eq!(cache.get_line(id, 0), "replacement");
}

#[test]
fn duplicate_cache_calls_do_not_refresh() {
    let cache = NotecardCache::new();
    let id = Uuid::new_v4();
    cache.cache(id, "original");

    // a duplicate insert 20 seconds in neither replaces the text nor
    // refreshes the timestamp, so the entry still ages from first insert
    cache.cache_at(id, "other", Utc::now() + Duration::seconds(20));
    assert_eq!(cache.get_line_at(id, 0, Utc::now() + Duration::seconds(20)), "original");
}

#[test]
fn capped_reads_truncate_by_characters() {
    let cache = NotecardCache::new();
    let id = Uuid::new_v4();
    cache.cache(id, "déjà vu all over again");

    assert_eq!(cache.get_line_capped(id, 0, 7), "déjà vu");
    assert_eq!(cache.get_line_capped(id, 0, 1000), "déjà vu all over again");
    assert_eq!(cache.get_line_capped(id, 3, 1), "\n");
}

#[test]
fn entries_age_independently() {
    let cache = NotecardCache::new();
    let old = Uuid::new_v4();
    let young = Uuid::new_v4();
    let start = Utc::now();

    cache.cache_at(old, "old", start);
    cache.cache_at(young, "young", start + Duration::seconds(20));

    // at +40s the first entry is 40s idle, the second only 20s
    cache.cache_check_at(start + Duration::seconds(40));
    assert!(!cache.is_cached(old));
    assert!(cache.is_cached(young));
}

#[test]
fn mixed_terminators_split_into_lines() {
    let cache = NotecardCache::new();
    let id = Uuid::new_v4();
    cache.cache(id, "one\r\ntwo\rthree\n");

    assert_eq!(cache.get_lines(id), 3);
    assert_eq!(cache.get_line(id, 1), "two");
    assert_eq!(cache.get_line(id, 2), "three");
    assert_eq!(cache.get_line(id, 3), EOF_MARKER);
}
