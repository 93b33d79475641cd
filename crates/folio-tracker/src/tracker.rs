//! The tracking agent itself.
//!
//! Lifecycle: `new` (uninitialized) → `start` (resolves identity, flushes the
//! first page view, spawns the periodic engagement flush) → `dispose`
//! (stops the flush task). The embedding page feeds it scroll/interaction/
//! visibility signals; the tracker owns every counter and both rate-limit
//! windows.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use folio_core::event::{EngagementData, PageViewData, TrackRequest};

use crate::clock::Clock;
use crate::store::{VisitorStore, VISITOR_ID_KEY};
use crate::transport::{absorb_delivery_error, Transport};

#[derive(Debug, Clone)]
pub struct TrackerConfig {
    /// Minimum gap between page-view flushes.
    pub page_view_cooldown_ms: u64,
    /// Minimum gap between non-exit engagement flushes.
    pub engagement_cooldown_ms: u64,
    /// Cadence of the background engagement flush.
    pub flush_interval: Duration,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            page_view_cooldown_ms: 5_000,
            engagement_cooldown_ms: 30_000,
            flush_interval: Duration::from_secs(30),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Uninitialized,
    Initialized,
    Tracking,
}

struct TrackerState {
    phase: Phase,
    visitor_id: Option<String>,
    session_id: Option<String>,
    /// Rolling marker for time-on-page; reset when the page becomes visible
    /// again.
    start_time_ms: u64,
    interactions: u32,
    /// Maximum scroll fraction observed since the marker was last reset.
    /// Never decreases within a tracking window.
    max_scroll_depth: f64,
    last_page_view_ms: Option<u64>,
    last_engagement_ms: Option<u64>,
    current_path: String,
}

pub struct Tracker {
    config: TrackerConfig,
    store: Arc<dyn VisitorStore>,
    transport: Arc<dyn Transport>,
    clock: Arc<dyn Clock>,
    state: Mutex<TrackerState>,
    flush_task: Mutex<Option<JoinHandle<()>>>,
}

impl Tracker {
    pub fn new(
        config: TrackerConfig,
        store: Arc<dyn VisitorStore>,
        transport: Arc<dyn Transport>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            config,
            store,
            transport,
            clock,
            state: Mutex::new(TrackerState {
                phase: Phase::Uninitialized,
                visitor_id: None,
                session_id: None,
                start_time_ms: 0,
                interactions: 0,
                max_scroll_depth: 0.0,
                last_page_view_ms: None,
                last_engagement_ms: None,
                current_path: "/".to_string(),
            }),
            flush_task: Mutex::new(None),
        }
    }

    /// Resolve or mint the durable visitor id and mint a fresh session id.
    ///
    /// Idempotent: later calls are no-ops. A store write failure degrades to
    /// an in-memory identity (logged, not raised).
    pub async fn initialize(&self) {
        let mut state = self.state.lock().await;
        if state.phase != Phase::Uninitialized {
            return;
        }
        let now = self.clock.now_millis();
        let visitor_id = match self.store.get(VISITOR_ID_KEY) {
            Some(id) => id,
            None => {
                let id = opaque_token("visitor", now);
                if let Err(error) = self.store.set(VISITOR_ID_KEY, &id) {
                    tracing::warn!(
                        error = %error,
                        "could not persist visitor id; identity will not survive a restart"
                    );
                }
                id
            }
        };
        state.visitor_id = Some(visitor_id);
        state.session_id = Some(opaque_token("session", now));
        state.start_time_ms = now;
        state.phase = Phase::Initialized;
    }

    /// Begin tracking: flush the first page view and spawn the periodic
    /// engagement flush. Idempotent. Takes an owned handle because the
    /// background task keeps the tracker alive; call as
    /// `tracker.clone().start(path)`.
    pub async fn start(self: Arc<Self>, path: &str) {
        {
            let state = self.state.lock().await;
            if state.phase == Phase::Tracking {
                return;
            }
        }
        self.initialize().await;
        {
            let mut state = self.state.lock().await;
            state.phase = Phase::Tracking;
            state.current_path = path.to_string();
        }

        self.track_page_view(path).await;

        let tracker = Arc::clone(&self);
        let interval = self.config.flush_interval;
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // The first tick completes immediately; the flush belongs at the
            // end of the first interval, not at start time.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let path = { tracker.state.lock().await.current_path.clone() };
                tracker.track_engagement(&path, false).await;
            }
        });
        *self.flush_task.lock().await = Some(handle);
    }

    /// Stop the periodic flush. The tracker itself stays usable (explicit
    /// calls still work); only the background cadence ends.
    pub async fn dispose(&self) {
        if let Some(handle) = self.flush_task.lock().await.take() {
            handle.abort();
        }
    }

    /// Flush a page view, unless one was flushed within the cooldown window.
    /// Delivery failures are absorbed; this never raises.
    pub async fn track_page_view(&self, path: &str) {
        let request = {
            let mut state = self.state.lock().await;
            if state.phase == Phase::Uninitialized {
                return;
            }
            let (Some(visitor_id), Some(session_id)) =
                (state.visitor_id.clone(), state.session_id.clone())
            else {
                return;
            };
            let now = self.clock.now_millis();
            if let Some(last) = state.last_page_view_ms {
                if now.saturating_sub(last) < self.config.page_view_cooldown_ms {
                    return;
                }
            }
            state.last_page_view_ms = Some(now);
            state.current_path = path.to_string();
            TrackRequest::PageView(PageViewData {
                page_path: path.to_string(),
                visitor_id,
                session_id,
            })
        };
        absorb_delivery_error("page_view", self.transport.send(&request).await);
    }

    /// Flush the accumulated engagement counters.
    ///
    /// Non-exit flushes honour the cooldown; an exit flush always sends
    /// (unload signals must not be dropped by the timer). Counters are NOT
    /// reset here; only a visibility resume resets them.
    pub async fn track_engagement(&self, path: &str, exit_page: bool) {
        let request = {
            let mut state = self.state.lock().await;
            if state.phase == Phase::Uninitialized {
                return;
            }
            let (Some(visitor_id), Some(session_id)) =
                (state.visitor_id.clone(), state.session_id.clone())
            else {
                return;
            };
            let now = self.clock.now_millis();
            if !exit_page {
                if let Some(last) = state.last_engagement_ms {
                    if now.saturating_sub(last) < self.config.engagement_cooldown_ms {
                        return;
                    }
                }
            }
            state.last_engagement_ms = Some(now);

            let elapsed_ms = now.saturating_sub(state.start_time_ms);
            let time_on_page = ((elapsed_ms as f64) / 1000.0).round() as u32;

            TrackRequest::Engagement(EngagementData {
                visitor_id,
                session_id,
                page_path: path.to_string(),
                time_on_page,
                scroll_depth: state.max_scroll_depth,
                interactions: state.interactions,
                exit_page,
            })
        };
        absorb_delivery_error("engagement", self.transport.send(&request).await);
    }

    /// Click/keydown signal from the host page.
    pub async fn record_interaction(&self) {
        let mut state = self.state.lock().await;
        state.interactions = state.interactions.saturating_add(1);
    }

    /// Scroll signal: `fraction` is scrolled-distance / scrollable-height.
    /// Only the maximum ever observed is kept.
    pub async fn record_scroll(&self, fraction: f64) {
        let clamped = fraction.clamp(0.0, 1.0);
        let mut state = self.state.lock().await;
        if clamped > state.max_scroll_depth {
            state.max_scroll_depth = clamped;
        }
    }

    /// Visibility change to hidden: flush what we have, keep counting.
    pub async fn page_hidden(&self) {
        let path = { self.state.lock().await.current_path.clone() };
        self.track_engagement(&path, false).await;
    }

    /// Visibility change back to visible: a new view session starts; reset
    /// the rolling markers.
    pub async fn page_visible(&self) {
        let mut state = self.state.lock().await;
        state.start_time_ms = self.clock.now_millis();
        state.interactions = 0;
        state.max_scroll_depth = 0.0;
    }

    pub async fn visitor_id(&self) -> Option<String> {
        self.state.lock().await.visitor_id.clone()
    }

    pub async fn session_id(&self) -> Option<String> {
        self.state.lock().await.session_id.clone()
    }
}

/// Opaque token: prefix + 9 random alphanumerics + current millis.
fn opaque_token(prefix: &str, now_millis: u64) -> String {
    use rand::Rng;
    let mut rng = rand::thread_rng();
    let random: String = (0..9)
        .map(|_| {
            let idx = rng.gen_range(0..36);
            if idx < 10 {
                (b'0' + idx) as char
            } else {
                (b'a' + idx - 10) as char
            }
        })
        .collect();
    format!("{prefix}_{random}_{now_millis}")
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex as StdMutex;

    use super::*;
    use crate::clock::ManualClock;
    use crate::store::MemoryVisitorStore;
    use anyhow::Result;
    use async_trait::async_trait;

    /// Captures every request instead of sending it.
    #[derive(Default)]
    struct RecordingTransport {
        sent: StdMutex<Vec<TrackRequest>>,
    }

    impl RecordingTransport {
        fn count(&self) -> usize {
            self.sent.lock().unwrap().len()
        }

        fn last(&self) -> TrackRequest {
            self.sent.lock().unwrap().last().unwrap().clone()
        }
    }

    #[async_trait]
    impl Transport for RecordingTransport {
        async fn send(&self, request: &TrackRequest) -> Result<()> {
            self.sent.lock().unwrap().push(request.clone());
            Ok(())
        }
    }

    /// Always fails; for verifying the absorb policy.
    struct FailingTransport;

    #[async_trait]
    impl Transport for FailingTransport {
        async fn send(&self, _request: &TrackRequest) -> Result<()> {
            anyhow::bail!("connection refused")
        }
    }

    struct Harness {
        tracker: Arc<Tracker>,
        transport: Arc<RecordingTransport>,
        clock: Arc<ManualClock>,
        store: Arc<MemoryVisitorStore>,
    }

    fn harness() -> Harness {
        let transport = Arc::new(RecordingTransport::default());
        let clock = Arc::new(ManualClock::new(1_700_000_000_000));
        let store = Arc::new(MemoryVisitorStore::default());
        let tracker = Arc::new(Tracker::new(
            TrackerConfig::default(),
            Arc::clone(&store) as Arc<dyn VisitorStore>,
            Arc::clone(&transport) as Arc<dyn Transport>,
            Arc::clone(&clock) as Arc<dyn Clock>,
        ));
        Harness {
            tracker,
            transport,
            clock,
            store,
        }
    }

    #[tokio::test]
    async fn page_views_within_cooldown_are_suppressed() {
        let h = harness();
        h.tracker.initialize().await;

        h.tracker.track_page_view("/").await;
        h.tracker.track_page_view("/").await;
        assert_eq!(h.transport.count(), 1);

        h.clock.advance(5_001);
        h.tracker.track_page_view("/").await;
        assert_eq!(h.transport.count(), 2);
    }

    #[tokio::test]
    async fn rapid_page_view_burst_sends_exactly_once() {
        let h = harness();
        h.tracker.initialize().await;
        for _ in 0..5 {
            h.tracker.track_page_view("/x").await;
            h.clock.advance(100);
        }
        assert_eq!(h.transport.count(), 1);
    }

    #[tokio::test]
    async fn engagement_cooldown_is_overridden_by_exit_flush() {
        let h = harness();
        h.tracker.initialize().await;

        h.tracker.track_engagement("/", false).await;
        h.tracker.track_engagement("/", false).await;
        assert_eq!(h.transport.count(), 1, "second non-exit flush suppressed");

        h.tracker.track_engagement("/", true).await;
        assert_eq!(h.transport.count(), 2, "exit flush always sends");
    }

    #[tokio::test]
    async fn tracking_before_initialize_is_a_no_op() {
        let h = harness();
        h.tracker.track_page_view("/").await;
        h.tracker.track_engagement("/", true).await;
        assert_eq!(h.transport.count(), 0);
    }

    #[tokio::test]
    async fn visitor_id_survives_across_instances_session_id_does_not() {
        let h = harness();
        h.tracker.initialize().await;
        let visitor_a = h.tracker.visitor_id().await.unwrap();
        let session_a = h.tracker.session_id().await.unwrap();
        assert!(visitor_a.starts_with("visitor_"));
        assert!(session_a.starts_with("session_"));

        // Second tracker over the same store: same visitor, new session.
        let second = Arc::new(Tracker::new(
            TrackerConfig::default(),
            Arc::clone(&h.store) as Arc<dyn VisitorStore>,
            Arc::clone(&h.transport) as Arc<dyn Transport>,
            Arc::clone(&h.clock) as Arc<dyn Clock>,
        ));
        second.initialize().await;
        assert_eq!(second.visitor_id().await.unwrap(), visitor_a);
        assert_ne!(second.session_id().await.unwrap(), session_a);
    }

    #[tokio::test]
    async fn engagement_reports_elapsed_time_and_counters() {
        let h = harness();
        h.tracker.initialize().await;

        h.tracker.record_interaction().await;
        h.tracker.record_interaction().await;
        h.tracker.record_scroll(0.4).await;
        h.tracker.record_scroll(0.9).await;
        h.tracker.record_scroll(0.2).await; // must not lower the max
        h.clock.advance(12_400);

        h.tracker.track_engagement("/about", true).await;
        match h.transport.last() {
            TrackRequest::Engagement(data) => {
                assert_eq!(data.time_on_page, 12);
                assert_eq!(data.interactions, 2);
                assert!((data.scroll_depth - 0.9).abs() < f64::EPSILON);
                assert!(data.exit_page);
                assert_eq!(data.page_path, "/about");
            }
            TrackRequest::PageView(_) => panic!("expected engagement"),
        }
    }

    #[tokio::test]
    async fn scroll_input_is_clamped_to_unit_range() {
        let h = harness();
        h.tracker.initialize().await;
        h.tracker.record_scroll(3.5).await;
        h.tracker.track_engagement("/", true).await;
        match h.transport.last() {
            TrackRequest::Engagement(data) => {
                assert!((data.scroll_depth - 1.0).abs() < f64::EPSILON)
            }
            TrackRequest::PageView(_) => panic!("expected engagement"),
        }
    }

    #[tokio::test]
    async fn hidden_flushes_without_reset_visible_resets() {
        let h = harness();
        h.tracker.initialize().await;
        h.tracker.record_interaction().await;
        h.tracker.record_scroll(0.5).await;
        h.clock.advance(3_000);

        h.tracker.page_hidden().await;
        assert_eq!(h.transport.count(), 1);

        // Counters survived the hidden flush.
        h.tracker.track_engagement("/", true).await;
        match h.transport.last() {
            TrackRequest::Engagement(data) => {
                assert_eq!(data.interactions, 1);
                assert!((data.scroll_depth - 0.5).abs() < f64::EPSILON);
            }
            TrackRequest::PageView(_) => panic!("expected engagement"),
        }

        // Resume: markers reset, a new view session starts.
        h.clock.advance(1_000);
        h.tracker.page_visible().await;
        h.tracker.track_engagement("/", true).await;
        match h.transport.last() {
            TrackRequest::Engagement(data) => {
                assert_eq!(data.interactions, 0);
                assert!(data.scroll_depth.abs() < f64::EPSILON);
                assert_eq!(data.time_on_page, 0);
            }
            TrackRequest::PageView(_) => panic!("expected engagement"),
        }
    }

    #[tokio::test]
    async fn delivery_failures_are_absorbed() {
        let transport = Arc::new(FailingTransport);
        let clock = Arc::new(ManualClock::new(0));
        let store = Arc::new(MemoryVisitorStore::default());
        let tracker = Arc::new(Tracker::new(
            TrackerConfig::default(),
            store as Arc<dyn VisitorStore>,
            transport as Arc<dyn Transport>,
            clock as Arc<dyn Clock>,
        ));
        tracker.initialize().await;
        // Both calls must return normally despite the failing transport.
        tracker.track_page_view("/").await;
        tracker.track_engagement("/", true).await;
    }

    #[tokio::test(start_paused = true)]
    async fn start_flushes_first_page_view_and_schedules_engagement() {
        let h = harness();
        h.tracker.clone().start("/").await;
        assert_eq!(h.transport.count(), 1, "initial page view");
        match h.transport.last() {
            TrackRequest::PageView(data) => assert_eq!(data.page_path, "/"),
            TrackRequest::Engagement(_) => panic!("expected page view first"),
        }

        // Let the 30s interval fire once (tokio time is paused, so this
        // advances virtual time deterministically).
        tokio::time::sleep(Duration::from_secs(31)).await;
        assert_eq!(h.transport.count(), 2, "periodic engagement flush");

        h.tracker.dispose().await;
        tokio::time::sleep(Duration::from_secs(120)).await;
        assert_eq!(h.transport.count(), 2, "no flushes after dispose");
    }

    #[tokio::test]
    async fn start_is_idempotent() {
        let h = harness();
        h.tracker.clone().start("/").await;
        h.tracker.clone().start("/").await;
        assert_eq!(h.transport.count(), 1);
        h.tracker.dispose().await;
    }
}
