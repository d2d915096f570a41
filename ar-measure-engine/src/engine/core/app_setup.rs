use bevy::asset::AssetMetaCheck;
use bevy::prelude::*;
use bevy::render::view::RenderLayers;
use bevy_common_assets::json::JsonAssetPlugin;
use constants::render_settings::MEASURE_RENDER_LAYER;

use crate::engine::camera::viewport_camera::{
    ViewportCamera, camera_controller, update_placement_target,
};
use crate::engine::core::app_state::{AppState, transition_to_running};
use crate::engine::core::window_config::create_window_config;
use crate::engine::readout::{readout_update_system, spawn_readout};
use crate::engine::settings::{
    MeasureSettings, SettingsLoader, load_settings_system, start_loading_settings,
};
use crate::rpc::measurement_feed::MeasurementFeedPlugin;
use crate::tools::measure::{MeasureRenderPlugin, MeasureToolPlugin};

pub fn create_app() -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .init_state::<AppState>()
        // Registers MeasureSettings as a loadable asset type from JSON files.
        .add_plugins(JsonAssetPlugin::<MeasureSettings>::new(&["json"]))
        .add_plugins(MeasureToolPlugin)
        .add_plugins(MeasureRenderPlugin)
        .add_plugins(MeasurementFeedPlugin);

    app.init_resource::<SettingsLoader>()
        .init_resource::<MeasureSettings>()
        .init_resource::<ViewportCamera>();

    app.add_systems(Startup, (setup, start_loading_settings))
        .add_systems(
            Update,
            (load_settings_system, transition_to_running)
                .chain()
                .run_if(in_state(AppState::Loading)),
        )
        .add_systems(
            Update,
            (camera_controller, update_placement_target, readout_update_system)
                .chain()
                .run_if(in_state(AppState::Running)),
        );

    app
}

fn spawn_lighting(commands: &mut Commands) {
    commands.spawn((
        DirectionalLight {
            shadows_enabled: true,
            ..default()
        },
        Transform::from_rotation(Quat::from_euler(
            EulerRot::ZYX,
            0.0,
            1.0,
            -std::f32::consts::FRAC_PI_4,
        )),
    ));
}

fn spawn_camera(commands: &mut Commands, viewport_camera: &ViewportCamera) {
    commands.spawn((
        Camera3d::default(),
        Transform::from_translation(viewport_camera.position)
            .with_rotation(viewport_camera.rotation()),
        RenderLayers::default().with(MEASURE_RENDER_LAYER),
    ));
}

/// Floor the placement rays land on.
fn spawn_ground(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) {
    commands.spawn((
        Mesh3d(meshes.add(Plane3d::default().mesh().size(20.0, 20.0))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(0.35, 0.35, 0.38),
            perceptual_roughness: 0.9,
            ..default()
        })),
        Transform::default(),
    ));
}

fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    viewport_camera: Res<ViewportCamera>,
) {
    spawn_lighting(&mut commands);
    spawn_camera(&mut commands, &viewport_camera);
    spawn_ground(&mut commands, &mut meshes, &mut materials);
    spawn_readout(&mut commands);
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    DefaultPlugins.set(window_config).set(asset_config)
}
