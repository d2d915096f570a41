//! Outgoing notification layer for the embedding host.
//!
//! Measurement changes leave the engine as JSON-RPC 2.0 notifications:
//!
//! ```text
//! MeasureTool ── notify ──> MeasurementFeed ── push ──> FeedQueue
//!                                                          │
//!                              Last schedule: drain ───────┘
//! ```
//!
//! ## Methods
//!
//! - `measurement_updated`: after a point is added, removed, or all points are cleared
//! - `measurement_completed`: once, when the measurement is completed
//!
//! Both carry the measurement result as `params`:
//!
//! ```json
//! {
//!   "points": [{ "id": 1, "x": 0.0, "y": 0.0, "z": 0.0 }],
//!   "area": null,
//!   "perimeter": null,
//!   "distances": null
//! }
//! ```

/// Measurement listener queueing JSON-RPC notifications.
pub mod measurement_feed;
