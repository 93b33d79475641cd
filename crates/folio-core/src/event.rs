use serde::{Deserialize, Serialize};

/// The payload the tracker sends to POST /api/analytics/track.
/// Wire shape: `{ "type": "page_view" | "engagement", "data": { ... } }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum TrackRequest {
    PageView(PageViewData),
    Engagement(EngagementData),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PageViewData {
    pub page_path: String,
    pub visitor_id: String,
    pub session_id: String,
}

/// One engagement flush: accumulated interaction/scroll/time metrics for the
/// current view. `scroll_depth` is a 0..1 fraction; `exit_page` marks the
/// flush fired from an unload signal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngagementData {
    pub visitor_id: String,
    pub session_id: String,
    pub page_path: String,
    pub time_on_page: u32,
    pub scroll_depth: f64,
    pub interactions: u32,
    pub exit_page: bool,
}

/// Request-context fields attached to a visitor on upsert. All optional:
/// UA parsing and GeoIP are best-effort enrichment.
#[derive(Debug, Clone, Default)]
pub struct VisitorProfile {
    pub country: Option<String>,
    pub city: Option<String>,
    pub device_type: Option<String>,
    pub browser: Option<String>,
    pub os: Option<String>,
}

/// A page-view ready for storage: the wire payload plus the server-side
/// context (headers, client address, parsed profile).
#[derive(Debug, Clone)]
pub struct PageViewRecord {
    pub page_path: String,
    pub visitor_id: String,
    pub session_id: String,
    pub user_agent: String,
    pub referrer: String,
    pub ip_address: String,
    pub profile: VisitorProfile,
}
