//! Spatial measurement model for points placed in AR space.
//!
//! Platform independent: positions come in from a hit-test collaborator,
//! results go out to listeners. Nothing here touches the render world.
//!
//! ## Geometry
//!
//! ```text
//! points    p0 ── p1 ── p2 ── … ── pn-1
//! distances |p0p1|, |p1p2|, …            (full 3D)
//! perimeter Σ distances + |pn-1 p0|      (closing edge once n ≥ 3)
//! area      ½·|Σ xi·zi+1 − xi+1·zi|      (x–z footprint, n ≥ 3)
//! ```
//!
//! Area is the footprint on the horizontal plane. Points at different
//! heights give the projected area, not a surface area.

pub mod engine;
pub mod error;
pub mod geometry;
pub mod listener;
pub mod markers;
pub mod point;
pub mod result;

pub use engine::MeasurementEngine;
pub use error::MeasurementError;
pub use listener::{
    ListenerId, ListenerRegistry, MeasurementListener, MeasurementUpdate, UpdateKind,
};
pub use markers::{LineKey, LineSegment, MarkerLedger, MissingVisual};
pub use point::{MeasurementPoint, PointId};
pub use result::MeasurementResult;
