//! Host application standing in for the AR runtime.
//!
//! Supplies placement positions to the measure tool and draws its output.

/// Viewport camera and centre-of-screen placement ray-cast.
pub mod camera;

/// Application setup and state.
pub mod core;

/// On-screen measurement summary.
pub mod readout;

/// JSON-backed runtime settings.
pub mod settings;
