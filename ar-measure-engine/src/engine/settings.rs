//! Runtime settings read from `assets/measure_settings.json`.
//!
//! Missing fields fall back to the workspace constants, and a missing
//! file leaves every default in place.

use bevy::asset::LoadState;
use bevy::prelude::*;
use constants::coordinate_system::DEFAULT_GROUND_HEIGHT;
use constants::render_settings::{LINE_RADIUS, PLACEMENT_RETICLE_RADIUS, POINT_MARKER_RADIUS};
use serde::Deserialize;

pub const SETTINGS_PATH: &str = "measure_settings.json";

#[derive(Asset, TypePath, Resource, Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MeasureSettings {
    /// Height of the plane placement rays are cast against.
    pub ground_height: f32,
    pub marker_radius: f32,
    pub line_radius: f32,
    pub reticle_radius: f32,
    /// Camera walk speed in metres per second.
    pub move_speed: f32,
}

impl Default for MeasureSettings {
    fn default() -> Self {
        Self {
            ground_height: DEFAULT_GROUND_HEIGHT,
            marker_radius: POINT_MARKER_RADIUS,
            line_radius: LINE_RADIUS,
            reticle_radius: PLACEMENT_RETICLE_RADIUS,
            move_speed: 1.5,
        }
    }
}

#[derive(Resource, Default)]
pub struct SettingsLoader {
    handle: Option<Handle<MeasureSettings>>,
    pub finished: bool,
}

pub fn start_loading_settings(mut loader: ResMut<SettingsLoader>, asset_server: Res<AssetServer>) {
    loader.handle = Some(asset_server.load(SETTINGS_PATH));
}

/// Copy the loaded settings into the resource, or keep defaults if loading failed.
pub fn load_settings_system(
    mut loader: ResMut<SettingsLoader>,
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    settings_assets: Res<Assets<MeasureSettings>>,
) {
    if loader.finished {
        return;
    }
    let Some(handle) = loader.handle.clone() else {
        return;
    };

    if let Some(settings) = settings_assets.get(&handle) {
        info!("Measure settings loaded: {:?}", settings);
        commands.insert_resource(settings.clone());
        loader.finished = true;
    } else if let LoadState::Failed(err) = asset_server.load_state(handle.id()) {
        warn!("Measure settings unavailable ({err}), using defaults");
        loader.finished = true;
    }
}
