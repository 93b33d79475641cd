//! Minimal tracker usage: simulate one visit against a local server.
//!
//! Run the server, then: `cargo run -p folio-tracker --example track_visit`

use std::sync::Arc;

use folio_tracker::{
    Clock, FileVisitorStore, HttpTransport, SystemClock, Tracker, TrackerConfig, Transport,
    VisitorStore,
};

#[tokio::main]
async fn main() {
    // Surface the tracker's warn-level delivery logs.
    tracing_subscriber::fmt().init();

    let store = Arc::new(FileVisitorStore::new("./tracker-state.json"));
    let transport = Arc::new(HttpTransport::new(
        "http://localhost:3000/api/analytics/track",
    ));
    let tracker = Arc::new(Tracker::new(
        TrackerConfig::default(),
        store as Arc<dyn VisitorStore>,
        transport as Arc<dyn Transport>,
        Arc::new(SystemClock) as Arc<dyn Clock>,
    ));

    tracker.clone().start("/").await;
    tracker.record_scroll(0.6).await;
    tracker.record_interaction().await;
    tracker.track_page_view("/projects").await;

    // Leaving the page: always flushes, regardless of cooldowns.
    tracker.track_engagement("/projects", true).await;
    tracker.dispose().await;
}
