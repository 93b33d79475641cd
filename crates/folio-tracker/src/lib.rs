//! First-party analytics client for the portfolio site.
//!
//! A single long-lived [`Tracker`] instance owns the visitor/session
//! identity and all engagement counters; the embedding page drives it with
//! navigation and interaction signals. Delivery is strictly fire-and-forget:
//! tracking must never surface an error to the visitor.

pub mod clock;
pub mod store;
pub mod tracker;
pub mod transport;

pub use clock::{Clock, ManualClock, SystemClock};
pub use store::{FileVisitorStore, MemoryVisitorStore, VisitorStore, VISITOR_ID_KEY};
pub use tracker::{Tracker, TrackerConfig};
pub use transport::{HttpTransport, Transport};
