//! Shared constants for the AR measurement workspace.

/// Axis conventions of the AR world space.
pub mod coordinate_system;

/// Point-count thresholds, id seeds and notification method names.
pub mod measurement;

/// Marker, line and reticle sizes and colours.
pub mod render_settings;
