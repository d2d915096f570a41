use crate::engine::settings::MeasureSettings;
use bevy::math::EulerRot;
use bevy::{input::mouse::MouseMotion, prelude::*, window::PrimaryWindow};

#[derive(Resource)]
pub struct ViewportCamera {
    pub position: Vec3,
    pub pitch: f32,
    pub yaw: f32,
}

impl ViewportCamera {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            pitch: -0.6,
            yaw: 0.0,
        }
    }

    pub fn rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0)
    }
}

impl Default for ViewportCamera {
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 1.5, 3.0))
    }
}

/// Surface position under the screen centre, `None` when nothing is hit.
#[derive(Resource, Default, Debug, Clone, Copy)]
pub struct PlacementTarget {
    pub position: Option<Vec3>,
}

/// Intersect `ray` with the horizontal plane at `plane_y`.
///
/// Rays parallel to the plane or pointing away from it miss.
pub fn flat_plane_intersection(ray: &Ray3d, plane_y: f32) -> Option<Vec3> {
    if ray.direction.y.abs() < 0.001 {
        return None;
    }
    let t = (plane_y - ray.origin.y) / ray.direction.y;
    if t > 0.0 {
        Some(ray.origin + ray.direction * t)
    } else {
        None
    }
}

pub fn camera_controller(
    mut camera_query: Query<&mut Transform, With<Camera3d>>,
    mut viewport_camera: ResMut<ViewportCamera>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: EventReader<MouseMotion>,
    keyboard: Res<ButtonInput<KeyCode>>,
    settings: Res<MeasureSettings>,
    time: Res<Time>,
) {
    let Ok(mut camera_transform) = camera_query.single_mut() else {
        return;
    };

    let mouse_delta: Vec2 = mouse_motion.read().map(|m| m.delta).sum();

    // Right drag to look around.
    if mouse_button.pressed(MouseButton::Right) && mouse_delta != Vec2::ZERO {
        let yaw_sens = 0.0035;
        let pitch_sens = 0.0030;
        viewport_camera.yaw += -mouse_delta.x * yaw_sens;
        viewport_camera.pitch += -mouse_delta.y * pitch_sens;
        viewport_camera.pitch = viewport_camera.pitch.clamp(-1.55, 1.55);
    }

    let mut move_input = Vec3::ZERO;
    if keyboard.pressed(KeyCode::KeyW) {
        move_input.z -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyS) {
        move_input.z += 1.0;
    }
    if keyboard.pressed(KeyCode::KeyD) {
        move_input.x += 1.0;
    }
    if keyboard.pressed(KeyCode::KeyA) {
        move_input.x -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyE) {
        move_input.y += 1.0;
    }
    if keyboard.pressed(KeyCode::KeyQ) {
        move_input.y -= 1.0;
    }

    if move_input != Vec3::ZERO {
        // Walk on the horizontal plane regardless of pitch.
        let heading = Quat::from_rotation_y(viewport_camera.yaw);
        let forward = heading * Vec3::Z;
        let right = heading * Vec3::X;

        let mut speed = settings.move_speed;
        if keyboard.any_pressed([KeyCode::ShiftLeft, KeyCode::ShiftRight]) {
            speed *= 3.5;
        }
        if keyboard.any_pressed([KeyCode::ControlLeft, KeyCode::ControlRight]) {
            speed *= 0.25;
        }

        let world_delta = right * move_input.x + Vec3::Y * move_input.y + forward * move_input.z;
        viewport_camera.position += world_delta.normalize() * speed * time.delta_secs();
    }

    let lerp_speed = (12.0 * time.delta_secs()).min(1.0);
    let target_rot = viewport_camera.rotation();
    camera_transform.translation = camera_transform
        .translation
        .lerp(viewport_camera.position, lerp_speed);
    camera_transform.rotation = camera_transform.rotation.slerp(target_rot, lerp_speed);
}

/// Cast from the screen centre onto the ground plane each frame.
pub fn update_placement_target(
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&GlobalTransform, &Camera), With<Camera3d>>,
    settings: Res<MeasureSettings>,
    mut target: ResMut<PlacementTarget>,
) {
    let (Ok(window), Ok((cam_xform, camera))) = (windows.single(), cameras.single()) else {
        target.position = None;
        return;
    };

    let centre = Vec2::new(window.width() * 0.5, window.height() * 0.5);
    target.position = camera
        .viewport_to_world(cam_xform, centre)
        .ok()
        .and_then(|ray| flat_plane_intersection(&ray, settings.ground_height));
}
