//! Core application setup and state management.

/// Application setup and plugin configuration for the Bevy engine.
pub mod app_setup;

/// Loading-to-running state machine.
pub mod app_state;

/// Primary window configuration.
pub mod window_config;
