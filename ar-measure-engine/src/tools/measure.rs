use crate::engine::camera::viewport_camera::PlacementTarget;
use crate::engine::settings::MeasureSettings;
use crate::measurement::{
    ListenerId, ListenerRegistry, MarkerLedger, MeasurementEngine, MeasurementError,
    MeasurementListener, MeasurementPoint, MeasurementResult, MissingVisual, UpdateKind,
};
use bevy::math::DVec3;
use bevy::prelude::*;
use bevy::render::view::RenderLayers;
use constants::render_settings::{
    LINE_COLOUR, MEASURE_RENDER_LAYER, POINT_MARKER_COLOUR, RETICLE_COLOUR,
};

/// Measurement state owned by the app: the point sequence plus its observers.
///
/// Every successful mutation notifies the registered listeners synchronously
/// with a fresh [`MeasurementResult`].
#[derive(Resource, Default)]
pub struct MeasureTool {
    is_active: bool,
    engine: MeasurementEngine,
    listeners: ListenerRegistry,
}

impl MeasureTool {
    pub fn set_active(&mut self, active: bool) {
        self.is_active = active;
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn engine(&self) -> &MeasurementEngine {
        &self.engine
    }

    pub fn subscribe(&mut self, listener: impl MeasurementListener + 'static) -> ListenerId {
        self.listeners.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }

    pub fn place_point(&mut self, position: DVec3) -> MeasurementPoint {
        let point = self.engine.add_point(position);
        self.publish(UpdateKind::PointAdded);
        point
    }

    pub fn remove_last_point(&mut self) -> Result<MeasurementPoint, MeasurementError> {
        let point = self.engine.remove_last_point()?;
        self.publish(UpdateKind::PointRemoved);
        Ok(point)
    }

    pub fn clear(&mut self) {
        self.engine.clear();
        self.publish(UpdateKind::Cleared);
    }

    /// Publish the final result and leave placement mode. Points stay in place.
    pub fn complete(&mut self) -> MeasurementResult {
        let result = self.engine.compute_measurement();
        self.listeners.notify(UpdateKind::Completed, &result);
        self.is_active = false;
        result
    }

    pub fn measurement(&self) -> MeasurementResult {
        self.engine.compute_measurement()
    }

    fn publish(&mut self, kind: UpdateKind) {
        let result = self.engine.compute_measurement();
        self.listeners.notify(kind, &result);
    }
}

/// Requests driving the measure tool, from keyboard shortcuts or an embedding host.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasureAction {
    Start,
    AddPoint,
    RemoveLastPoint,
    Complete,
    Clear,
}

/// Keyboard shortcuts: M start/complete, Space or Enter add, Backspace undo, C clear.
pub fn handle_measure_keyboard_shortcuts(
    keyboard: Res<ButtonInput<KeyCode>>,
    measure_tool: Res<MeasureTool>,
    mut actions: EventWriter<MeasureAction>,
) {
    if keyboard.just_pressed(KeyCode::KeyM) {
        actions.write(if measure_tool.is_active() {
            MeasureAction::Complete
        } else {
            MeasureAction::Start
        });
    }
    if keyboard.any_just_pressed([KeyCode::Space, KeyCode::Enter]) {
        actions.write(MeasureAction::AddPoint);
    }
    if keyboard.just_pressed(KeyCode::Backspace) {
        actions.write(MeasureAction::RemoveLastPoint);
    }
    if keyboard.just_pressed(KeyCode::KeyC) {
        actions.write(MeasureAction::Clear);
    }
}

pub fn handle_measure_actions(
    mut actions: EventReader<MeasureAction>,
    mut measure_tool: ResMut<MeasureTool>,
    target: Res<PlacementTarget>,
) {
    for action in actions.read() {
        match action {
            MeasureAction::Start => {
                measure_tool.set_active(true);
                info!("Measurement session started");
            }
            MeasureAction::AddPoint => {
                if !measure_tool.is_active() {
                    warn!("Measure tool inactive, press M to start placing points");
                    continue;
                }
                let Some(position) = target.position else {
                    warn!("No surface detected. Move your device to scan the area.");
                    continue;
                };
                let point = measure_tool.place_point(position.as_dvec3());
                info!(
                    "Point {} added at ({:.3}, {:.3}, {:.3})",
                    point.id, point.x, point.y, point.z
                );
            }
            MeasureAction::RemoveLastPoint => match measure_tool.remove_last_point() {
                Ok(point) => info!("Point {} removed", point.id),
                Err(err) => warn!("{err}"),
            },
            MeasureAction::Complete => {
                if !measure_tool.is_active() {
                    continue;
                }
                let result = measure_tool.complete();
                info!(
                    "Measurement complete: {} points, perimeter {:?} m, area {:?} m²",
                    result.points.len(),
                    result.perimeter,
                    result.area
                );
            }
            MeasureAction::Clear => {
                measure_tool.clear();
                info!("All measurement points cleared");
            }
        }
    }
}

/// Point marker visual.
#[derive(Component)]
pub struct PointMarker;

/// Segment visual between consecutive points.
#[derive(Component)]
pub struct LineMarker;

/// Sphere following the current placement target.
#[derive(Component)]
pub struct PlacementReticle;

/// Entities currently drawn for the point sequence.
#[derive(Resource, Default)]
pub struct MeasureMarkers(pub MarkerLedger<Entity>);

/// Shared unit meshes and materials, scaled per instance.
#[derive(Resource)]
pub struct MeasureVisualAssets {
    sphere: Handle<Mesh>,
    cylinder: Handle<Mesh>,
    marker_material: Handle<StandardMaterial>,
    line_material: Handle<StandardMaterial>,
    reticle_material: Handle<StandardMaterial>,
}

fn unlit(colour: Color) -> StandardMaterial {
    StandardMaterial {
        base_color: colour,
        emissive: colour.to_linear(),
        unlit: true,
        ..default()
    }
}

pub fn setup_measure_visuals(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let visuals = MeasureVisualAssets {
        sphere: meshes.add(Sphere::new(1.0)),
        cylinder: meshes.add(Cylinder::new(1.0, 1.0)),
        marker_material: materials.add(unlit(POINT_MARKER_COLOUR)),
        line_material: materials.add(unlit(LINE_COLOUR)),
        reticle_material: materials.add(unlit(RETICLE_COLOUR)),
    };

    commands.spawn((
        Mesh3d(visuals.sphere.clone()),
        MeshMaterial3d(visuals.reticle_material.clone()),
        Transform::default(),
        Visibility::Hidden,
        PlacementReticle,
        RenderLayers::layer(MEASURE_RENDER_LAYER),
    ));
    commands.insert_resource(visuals);
}

/// Bring the drawn markers and lines in line with the point sequence.
pub fn sync_measure_markers(
    mut commands: Commands,
    measure_tool: Res<MeasureTool>,
    mut markers: ResMut<MeasureMarkers>,
    visuals: Res<MeasureVisualAssets>,
    settings: Res<MeasureSettings>,
) {
    if !measure_tool.is_changed() {
        return;
    }

    let engine = measure_tool.engine();
    let plan = markers.0.reconcile(engine.points(), engine.epoch());

    for entity in plan.stale {
        commands.entity(entity).despawn();
    }

    for visual in plan.missing {
        match visual {
            MissingVisual::Marker { id, position } => {
                let entity = commands
                    .spawn((
                        Mesh3d(visuals.sphere.clone()),
                        MeshMaterial3d(visuals.marker_material.clone()),
                        Transform::from_translation(position.as_vec3())
                            .with_scale(Vec3::splat(settings.marker_radius)),
                        PointMarker,
                        RenderLayers::layer(MEASURE_RENDER_LAYER),
                    ))
                    .id();
                markers.0.record_marker(id, entity);
            }
            MissingVisual::Line { key, segment } => {
                let Some(direction) = segment.direction() else {
                    continue;
                };
                // Unit cylinder runs along Y; stretch it to the segment.
                let rotation = Quat::from_rotation_arc(Vec3::Y, direction.as_vec3());
                let scale = Vec3::new(
                    settings.line_radius,
                    segment.length() as f32,
                    settings.line_radius,
                );
                let entity = commands
                    .spawn((
                        Mesh3d(visuals.cylinder.clone()),
                        MeshMaterial3d(visuals.line_material.clone()),
                        Transform::from_translation(segment.midpoint().as_vec3())
                            .with_rotation(rotation)
                            .with_scale(scale),
                        LineMarker,
                        RenderLayers::layer(MEASURE_RENDER_LAYER),
                    ))
                    .id();
                markers.0.record_line(key, entity);
            }
        }
    }
}

pub fn update_placement_reticle(
    target: Res<PlacementTarget>,
    measure_tool: Res<MeasureTool>,
    settings: Res<MeasureSettings>,
    mut reticles: Query<(&mut Transform, &mut Visibility), With<PlacementReticle>>,
) {
    for (mut transform, mut visibility) in &mut reticles {
        match target.position {
            Some(position) if measure_tool.is_active() => {
                transform.translation = position;
                transform.scale = Vec3::splat(settings.reticle_radius);
                *visibility = Visibility::Visible;
            }
            _ => *visibility = Visibility::Hidden,
        }
    }
}

/// Measure state, actions and shortcuts. Renders nothing.
pub struct MeasureToolPlugin;

impl Plugin for MeasureToolPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MeasureTool>()
            .init_resource::<PlacementTarget>()
            .add_event::<MeasureAction>()
            .add_systems(
                Update,
                (handle_measure_keyboard_shortcuts, handle_measure_actions).chain(),
            );
    }
}

/// Markers, lines and reticle for the measure tool.
pub struct MeasureRenderPlugin;

impl Plugin for MeasureRenderPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MeasureMarkers>()
            .init_resource::<MeasureSettings>()
            .add_systems(Startup, setup_measure_visuals)
            .add_systems(
                PostUpdate,
                (sync_measure_markers, update_placement_reticle)
                    .before(bevy::transform::TransformSystem::TransformPropagate),
            );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measurement::MeasurementUpdate;
    use std::sync::{Arc, Mutex};

    fn test_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.init_resource::<ButtonInput<KeyCode>>();
        app.add_plugins(MeasureToolPlugin);
        app
    }

    fn aim_at(app: &mut App, position: Option<Vec3>) {
        app.world_mut().resource_mut::<PlacementTarget>().position = position;
    }

    fn act(app: &mut App, action: MeasureAction) {
        app.world_mut().send_event(action);
        app.update();
    }

    fn point_count(app: &App) -> usize {
        app.world().resource::<MeasureTool>().engine().len()
    }

    struct KindLog(Arc<Mutex<Vec<UpdateKind>>>);

    impl MeasurementListener for KindLog {
        fn on_update(&mut self, update: &MeasurementUpdate<'_>) {
            self.0.lock().unwrap().push(update.kind);
        }
    }

    #[test]
    fn add_point_places_at_target() {
        let mut app = test_app();
        aim_at(&mut app, Some(Vec3::new(1.0, 0.0, 2.0)));
        act(&mut app, MeasureAction::Start);
        act(&mut app, MeasureAction::AddPoint);

        let tool = app.world().resource::<MeasureTool>();
        let point = tool.engine().last_point().copied().unwrap();
        assert_eq!(point.id, 1);
        assert_eq!(point.position(), DVec3::new(1.0, 0.0, 2.0));
    }

    #[test]
    fn add_point_without_surface_changes_nothing() {
        let mut app = test_app();
        aim_at(&mut app, None);
        act(&mut app, MeasureAction::Start);
        act(&mut app, MeasureAction::AddPoint);
        assert_eq!(point_count(&app), 0);
    }

    #[test]
    fn add_point_ignored_until_started() {
        let mut app = test_app();
        aim_at(&mut app, Some(Vec3::ZERO));
        act(&mut app, MeasureAction::AddPoint);
        assert_eq!(point_count(&app), 0);
    }

    #[test]
    fn remove_on_empty_is_harmless() {
        let mut app = test_app();
        act(&mut app, MeasureAction::RemoveLastPoint);
        assert_eq!(point_count(&app), 0);
        assert_eq!(app.world().resource::<MeasureTool>().engine().next_id(), 1);
    }

    #[test]
    fn rectangle_through_actions_then_complete() {
        let mut app = test_app();
        act(&mut app, MeasureAction::Start);
        for corner in [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(4.0, 0.0, 0.0),
            Vec3::new(4.0, 0.0, 3.0),
            Vec3::new(0.0, 0.0, 3.0),
        ] {
            aim_at(&mut app, Some(corner));
            act(&mut app, MeasureAction::AddPoint);
        }
        act(&mut app, MeasureAction::Complete);

        let tool = app.world().resource::<MeasureTool>();
        assert!(!tool.is_active());
        let result = tool.measurement();
        assert!((result.area.unwrap() - 12.0).abs() < 1e-6);
        assert!((result.perimeter.unwrap() - 14.0).abs() < 1e-6);
    }

    #[test]
    fn clear_restarts_ids() {
        let mut app = test_app();
        aim_at(&mut app, Some(Vec3::ONE));
        act(&mut app, MeasureAction::Start);
        act(&mut app, MeasureAction::AddPoint);
        act(&mut app, MeasureAction::AddPoint);
        act(&mut app, MeasureAction::Clear);
        act(&mut app, MeasureAction::AddPoint);

        let tool = app.world().resource::<MeasureTool>();
        assert_eq!(tool.engine().len(), 1);
        assert_eq!(tool.engine().last_point().map(|p| p.id), Some(1));
    }

    #[test]
    fn keyboard_shortcuts_drive_the_tool() {
        let mut app = test_app();
        aim_at(&mut app, Some(Vec3::new(0.5, 0.0, 0.5)));

        for key in [KeyCode::KeyM, KeyCode::Space] {
            {
                let mut input = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
                input.clear();
                input.press(key);
            }
            app.update();
            app.world_mut().resource_mut::<ButtonInput<KeyCode>>().release(key);
        }

        assert!(app.world().resource::<MeasureTool>().is_active());
        assert_eq!(point_count(&app), 1);
    }

    #[test]
    fn listeners_hear_each_successful_mutation() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut tool = MeasureTool::default();
        tool.subscribe(KindLog(log.clone()));

        tool.place_point(DVec3::ZERO);
        tool.remove_last_point().unwrap();
        assert!(tool.remove_last_point().is_err());
        tool.clear();
        tool.complete();

        assert_eq!(
            *log.lock().unwrap(),
            vec![
                UpdateKind::PointAdded,
                UpdateKind::PointRemoved,
                UpdateKind::Cleared,
                UpdateKind::Completed,
            ]
        );
    }

    #[test]
    fn unsubscribed_listener_stops_hearing() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut tool = MeasureTool::default();
        let id = tool.subscribe(KindLog(log.clone()));
        tool.place_point(DVec3::ZERO);
        assert!(tool.unsubscribe(id));
        tool.place_point(DVec3::ONE);
        assert_eq!(log.lock().unwrap().len(), 1);
    }

    fn render_app() -> App {
        let mut app = test_app();
        app.init_resource::<Assets<Mesh>>();
        app.init_resource::<Assets<StandardMaterial>>();
        app.add_plugins(MeasureRenderPlugin);
        app
    }

    fn transforms_with<C: Component>(app: &mut App) -> Vec<Transform> {
        let mut query = app.world_mut().query_filtered::<&Transform, With<C>>();
        query.iter(app.world()).copied().collect()
    }

    fn add_at(app: &mut App, position: Vec3) {
        aim_at(app, Some(position));
        act(app, MeasureAction::AddPoint);
    }

    #[test]
    fn markers_follow_adds_and_removes() {
        let mut app = render_app();
        act(&mut app, MeasureAction::Start);
        add_at(&mut app, Vec3::new(0.0, 0.0, 0.0));
        add_at(&mut app, Vec3::new(3.0, 0.0, 0.0));
        add_at(&mut app, Vec3::new(3.0, 0.0, 4.0));

        assert_eq!(transforms_with::<PointMarker>(&mut app).len(), 3);
        assert_eq!(transforms_with::<LineMarker>(&mut app).len(), 2);
        assert_eq!(app.world().resource::<MeasureMarkers>().0.marker_count(), 3);

        act(&mut app, MeasureAction::RemoveLastPoint);

        let markers = transforms_with::<PointMarker>(&mut app);
        assert_eq!(markers.len(), 2);
        assert!(markers.iter().all(|t| t.translation.z == 0.0));

        let lines = transforms_with::<LineMarker>(&mut app);
        assert_eq!(lines.len(), 1);
        let line = lines[0];
        let settings = app.world().resource::<MeasureSettings>();
        assert!((line.scale.y - 3.0).abs() < 1e-5);
        assert_eq!(line.scale.x, settings.line_radius);
        assert!((line.translation - Vec3::new(1.5, 0.0, 0.0)).length() < 1e-5);
        assert!((line.rotation * Vec3::Y - Vec3::X).length() < 1e-5);
    }

    #[test]
    fn clear_and_add_in_one_frame_leaves_a_single_marker() {
        let mut app = render_app();
        act(&mut app, MeasureAction::Start);
        add_at(&mut app, Vec3::new(0.0, 0.0, 0.0));
        add_at(&mut app, Vec3::new(1.0, 0.0, 0.0));
        add_at(&mut app, Vec3::new(1.0, 0.0, 1.0));

        aim_at(&mut app, Some(Vec3::new(2.0, 0.0, 2.0)));
        app.world_mut().send_event(MeasureAction::Clear);
        app.world_mut().send_event(MeasureAction::AddPoint);
        app.update();

        let markers = transforms_with::<PointMarker>(&mut app);
        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].translation, Vec3::new(2.0, 0.0, 2.0));
        assert!(transforms_with::<LineMarker>(&mut app).is_empty());

        let tool = app.world().resource::<MeasureTool>();
        assert_eq!(tool.engine().epoch(), 1);
        assert_eq!(tool.engine().points()[0].id, 1);
    }

    #[test]
    fn reticle_shows_only_while_measuring() {
        let mut app = render_app();
        aim_at(&mut app, Some(Vec3::new(0.5, 0.0, 0.5)));
        app.update();

        let mut reticles = app
            .world_mut()
            .query_filtered::<(&Transform, &Visibility), With<PlacementReticle>>();
        let (_, visibility) = reticles.single(app.world()).unwrap();
        assert_eq!(*visibility, Visibility::Hidden);

        act(&mut app, MeasureAction::Start);
        let (transform, visibility) = reticles.single(app.world()).unwrap();
        assert_eq!(*visibility, Visibility::Visible);
        assert_eq!(transform.translation, Vec3::new(0.5, 0.0, 0.5));
    }
}
