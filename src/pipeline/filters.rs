// Playlist shaping: shorts exclusion, recency ranking, capping

use std::cmp::Ordering;

use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use super::models::{MediaItem, SHORTS_THRESHOLD_SECS};

/// Drop items below the shorts threshold. Pure predicate, no reordering.
pub fn shorts_filter(items: Vec<MediaItem>) -> Vec<MediaItem> {
    items
        .into_iter()
        .filter(|item| item.duration_secs >= SHORTS_THRESHOLD_SECS)
        .collect()
}

fn published_ts(item: &MediaItem) -> Option<OffsetDateTime> {
    item.published_at
        .as_deref()
        .and_then(|s| OffsetDateTime::parse(s, &Rfc3339).ok())
}

/// Order items by publish timestamp, newest first. Items without a
/// timestamp (or with one that fails to parse) sort after all timestamped
/// items. The sort is stable, so equal keys keep their input order and
/// repeated runs over the same data produce the same playlist.
pub fn rank_by_recency(mut items: Vec<MediaItem>) -> Vec<MediaItem> {
    items.sort_by(|a, b| match (published_ts(a), published_ts(b)) {
        (Some(a_ts), Some(b_ts)) => b_ts.cmp(&a_ts),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    items
}

/// Truncate to the first `limit` items, preserving order.
pub fn cap(mut items: Vec<MediaItem>, limit: usize) -> Vec<MediaItem> {
    items.truncate(limit);
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_item(id: &str, duration_secs: u64, published_at: Option<&str>) -> MediaItem {
        MediaItem {
            id: id.to_string(),
            title: format!("Item {}", id),
            thumbnail: format!("https://i.ytimg.com/vi/{}/mqdefault.jpg", id),
            duration_secs,
            published_at: published_at.map(str::to_string),
        }
    }

    #[test]
    fn test_shorts_filter_boundary() {
        let items = vec![
            make_item("a", 59, None),
            make_item("b", 60, None),
            make_item("c", 61, None),
            make_item("d", 0, None),
        ];

        let kept = shorts_filter(items);
        let ids: Vec<&str> = kept.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c"]);
        assert!(kept.iter().all(|i| i.duration_secs >= SHORTS_THRESHOLD_SECS));
    }

    #[test]
    fn test_rank_newest_first() {
        let items = vec![
            make_item("old", 120, Some("2020-01-01T00:00:00Z")),
            make_item("new", 120, Some("2024-06-15T12:00:00Z")),
            make_item("mid", 120, Some("2022-03-10T08:30:00Z")),
        ];

        let ranked = rank_by_recency(items);
        let ids: Vec<&str> = ranked.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["new", "mid", "old"]);
    }

    #[test]
    fn test_rank_missing_timestamps_last() {
        let items = vec![
            make_item("none1", 120, None),
            make_item("dated", 120, Some("2021-05-01T00:00:00Z")),
            make_item("none2", 120, None),
            make_item("newer", 120, Some("2023-05-01T00:00:00Z")),
        ];

        let ranked = rank_by_recency(items);
        let ids: Vec<&str> = ranked.iter().map(|i| i.id.as_str()).collect();
        // Stable sort keeps none1 before none2
        assert_eq!(ids, vec!["newer", "dated", "none1", "none2"]);
    }

    #[test]
    fn test_rank_unparseable_timestamp_sorts_last() {
        let items = vec![
            make_item("bad", 120, Some("yesterday")),
            make_item("good", 120, Some("2021-05-01T00:00:00Z")),
        ];

        let ranked = rank_by_recency(items);
        assert_eq!(ranked[0].id, "good");
        assert_eq!(ranked[1].id, "bad");
    }

    #[test]
    fn test_cap_is_prefix() {
        let items: Vec<MediaItem> = (0..10)
            .map(|i| make_item(&format!("v{}", i), 120, None))
            .collect();

        let capped = cap(items.clone(), 3);
        assert_eq!(capped.len(), 3);
        assert_eq!(capped[..], items[..3]);

        // A limit beyond the input length is a no-op
        let capped = cap(items.clone(), 100);
        assert_eq!(capped.len(), 10);
    }
}
