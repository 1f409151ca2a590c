// src/history.rs
//! Bounded, URL-deduplicated log of past searches.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::outreach::OutreachBundle;

/// Most entries a user's history keeps; oldest beyond the cap are dropped.
pub const HISTORY_CAP: usize = 10;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHistoryEntry {
    pub id: String,
    pub job_title: String,
    pub company: String,
    pub url: String,
    pub timestamp: DateTime<Utc>,
    pub data: OutreachBundle,
}

impl SearchHistoryEntry {
    pub fn from_bundle(bundle: &OutreachBundle, now: DateTime<Utc>) -> Option<Self> {
        let job = bundle.job_details.as_ref()?;
        Some(Self {
            id: Uuid::new_v4().to_string(),
            job_title: job.title.clone(),
            company: job.company.clone(),
            url: job.url.clone(),
            timestamp: now,
            data: bundle.clone(),
        })
    }
}

/// The serialized history list, newest first.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchHistory {
    entries: Vec<SearchHistoryEntry>,
}

impl SearchHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Record a freshly generated bundle: any existing entry with the same
    /// URL is removed first, the new entry goes to the head, then the list
    /// is truncated to [`HISTORY_CAP`].
    ///
    /// Bundles without job details are not recordable and are ignored.
    pub fn record(&mut self, bundle: &OutreachBundle, now: DateTime<Utc>) {
        let Some(entry) = SearchHistoryEntry::from_bundle(bundle, now) else {
            return;
        };
        self.entries.retain(|e| e.url != entry.url);
        self.entries.insert(0, entry);
        self.entries.truncate(HISTORY_CAP);
    }

    /// Remove an entry by id. Returns whether anything was removed. The
    /// currently displayed bundle is unaffected; the two are decoupled
    /// after load.
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    pub fn find(&self, id: &str) -> Option<&SearchHistoryEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Entries ordered for display: descending by timestamp, regardless of
    /// on-disk insertion order.
    pub fn sorted_for_display(&self) -> Vec<SearchHistoryEntry> {
        let mut sorted = self.entries.clone();
        sorted.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        sorted
    }
}

/// Render a timestamp relative to `now`, with floor semantics on the hour
/// and day boundaries.
pub fn format_relative_time(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(timestamp);
    let hours = elapsed.num_hours();

    if hours < 1 {
        "Just now".to_string()
    } else if hours < 24 {
        format!("{}h ago", hours)
    } else if hours < 24 * 7 {
        format!("{}d ago", hours / 24)
    } else {
        timestamp.format("%b %-d, %Y").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::fallback::fallback_output;
    use chrono::Duration;

    fn bundle_for(url: &str) -> OutreachBundle {
        OutreachBundle::from_extraction(fallback_output(url))
    }

    #[test]
    fn test_cap_keeps_ten_most_recent() {
        let mut history = SearchHistory::new();
        let base = Utc::now();
        for i in 0..11 {
            let bundle = bundle_for(&format!("https://jobs.example.com/{}", i));
            history.record(&bundle, base + Duration::minutes(i));
        }

        assert_eq!(history.len(), 10);
        let display = history.sorted_for_display();
        assert_eq!(display[0].url, "https://jobs.example.com/10");
        assert!(display.iter().all(|e| e.url != "https://jobs.example.com/0"));
    }

    #[test]
    fn test_same_url_replaces_and_moves_to_head() {
        let mut history = SearchHistory::new();
        let base = Utc::now();
        history.record(&bundle_for("https://a.com/1"), base);
        history.record(&bundle_for("https://a.com/2"), base + Duration::minutes(1));
        history.record(&bundle_for("https://a.com/1"), base + Duration::minutes(2));

        assert_eq!(history.len(), 2);
        let display = history.sorted_for_display();
        assert_eq!(display[0].url, "https://a.com/1");
        let dupes = display.iter().filter(|e| e.url == "https://a.com/1").count();
        assert_eq!(dupes, 1);
    }

    #[test]
    fn test_delete_by_id() {
        let mut history = SearchHistory::new();
        history.record(&bundle_for("https://a.com/1"), Utc::now());
        let id = history.sorted_for_display()[0].id.clone();

        assert!(history.delete(&id));
        assert!(history.is_empty());
        assert!(!history.delete(&id));
    }

    #[test]
    fn test_display_order_is_timestamp_desc() {
        let mut history = SearchHistory::new();
        let base = Utc::now();
        // Insert out of chronological order.
        history.record(&bundle_for("https://a.com/new"), base + Duration::hours(2));
        history.record(&bundle_for("https://a.com/old"), base);
        history.record(&bundle_for("https://a.com/mid"), base + Duration::hours(1));

        let urls: Vec<String> = history
            .sorted_for_display()
            .into_iter()
            .map(|e| e.url)
            .collect();
        assert_eq!(
            urls,
            vec![
                "https://a.com/new".to_string(),
                "https://a.com/mid".to_string(),
                "https://a.com/old".to_string(),
            ]
        );
    }

    #[test]
    fn test_relative_time_boundaries() {
        let now = Utc::now();
        assert_eq!(format_relative_time(now, now), "Just now");
        assert_eq!(
            format_relative_time(now - Duration::minutes(59), now),
            "Just now"
        );
        assert_eq!(format_relative_time(now - Duration::hours(1), now), "1h ago");
        assert_eq!(
            format_relative_time(now - Duration::hours(23), now),
            "23h ago"
        );
        assert_eq!(format_relative_time(now - Duration::hours(25), now), "1d ago");
        assert_eq!(format_relative_time(now - Duration::days(6), now), "6d ago");

        let old = now - Duration::days(30);
        assert_eq!(
            format_relative_time(old, now),
            old.format("%b %-d, %Y").to_string()
        );
    }

    #[test]
    fn test_relative_time_uses_floor() {
        let now = Utc::now();
        // 1h59m is still "1h ago".
        assert_eq!(
            format_relative_time(now - Duration::minutes(119), now),
            "1h ago"
        );
        // 47h is still "1d ago".
        assert_eq!(
            format_relative_time(now - Duration::hours(47), now),
            "1d ago"
        );
    }
}
