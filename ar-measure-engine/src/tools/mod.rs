//! Interactive tools driving the measurement model.
//!
//! ## Measure Tool
//!
//! - **Start**: `M` key or a `MeasureAction::Start` event
//! - **Workflow**:
//!   1. Aim the screen centre at the ground; the reticle shows the placement target
//!   2. `Space`/`Enter` places a point, linked to the previous one by a line
//!   3. `Backspace` removes the last point, `C` clears every point
//!   4. `M` again completes the measurement and publishes the final result
//! - **Features**:
//!   - Distances, perimeter and footprint area recomputed after every change
//!   - Marker entities reconciled against the point sequence, never rebuilt wholesale
//!   - Listeners notified synchronously after each successful mutation

/// Point placement, measurement actions and marker rendering.
pub mod measure;
