//! Aggregation result types for GET /api/analytics/stats.
//!
//! Every field defaults to zero/empty so the dashboard can always render a
//! number; a fresh database produces a fully-populated snapshot of zeros,
//! never nulls.

use serde::Serialize;

/// Page-view and visitor counts for one time window (or the all-time total).
///
/// Windowed visitor counts are keyed on `last_visit`: they measure visitors
/// *active* in the window, not visitors first seen in it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowCounts {
    pub page_views: i64,
    pub visitors: i64,
}

/// Global engagement means. `avg_scroll_depth` is scaled to a whole
/// percentage (stored fraction x 100, rounded); the other two are rounded to
/// whole units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EngagementAverages {
    pub avg_time_on_page: i64,
    pub avg_scroll_depth: i64,
    pub avg_interactions: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct TopPage {
    pub page_path: String,
    pub views: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecentVisitor {
    pub visitor_id: String,
    pub last_visit: String,
    pub total_visits: i64,
    pub total_page_views: i64,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSnapshot {
    pub total: WindowCounts,
    pub today: WindowCounts,
    pub week: WindowCounts,
    pub month: WindowCounts,
    pub engagement: EngagementAverages,
    pub top_pages: Vec<TopPage>,
    pub recent_visitors: Vec<RecentVisitor>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_snapshot_serializes_to_zeros() {
        let snapshot = AnalyticsSnapshot::default();
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["total"]["pageViews"], 0);
        assert_eq!(json["total"]["visitors"], 0);
        assert_eq!(json["engagement"]["avgTimeOnPage"], 0);
        assert_eq!(json["engagement"]["avgScrollDepth"], 0);
        assert!(json["topPages"].as_array().unwrap().is_empty());
        assert!(json["recentVisitors"].as_array().unwrap().is_empty());
    }
}
