//! First-person viewport camera standing in for the AR device pose.
//!
//! Keyboard and mouse move the view; every frame a ray from the screen
//! centre is cast onto the ground plane to produce the placement target,
//! the same centre-of-screen hit-test an AR session performs.

/// Viewport camera resource, controller and placement ray-cast.
pub mod viewport_camera;
