use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use std::f32::consts::TAU;

use crate::config::{CameraPose, DeskConfig};
use crate::view::{FocusHistory, View};
use crate::MainCamera;

/// Look-at point the camera is currently easing toward.
#[derive(Component, Debug)]
pub struct CameraRig {
    pub look_at: Vec3,
}

impl CameraRig {
    pub fn bundle(pose: &CameraPose) -> (Transform, CameraRig) {
        (
            Transform::from_translation(pose.position).looking_at(pose.target, Dir3::Y),
            CameraRig {
                look_at: pose.target,
            },
        )
    }
}

#[derive(Resource, Default)]
struct IdleOrbit {
    angle: f32,
}

pub struct CameraPlugin;
impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<IdleOrbit>()
            .add_systems(Update, follow_view);
    }
}

/// Fraction of the remaining distance covered in `dt`. Frame-rate independent.
pub fn damp_factor(smooth_time: f32, dt: f32) -> f32 {
    (1.0 - (-dt / smooth_time.max(1e-6)).exp()).clamp(0.0, 1.0)
}

pub fn damp(current: f32, target: f32, smooth_time: f32, dt: f32) -> f32 {
    current + (target - current) * damp_factor(smooth_time, dt)
}

pub fn damp_vec3(current: Vec3, target: Vec3, smooth_time: f32, dt: f32) -> Vec3 {
    current.lerp(target, damp_factor(smooth_time, dt))
}

/// Pose position rotated about the look-at point around the vertical axis.
pub fn orbit(pose: &CameraPose, angle: f32) -> Vec3 {
    pose.target + Quat::from_rotation_y(angle) * (pose.position - pose.target)
}

/// Cursor x in [-1, 1] across the window, 0 when the cursor is outside.
fn pointer_x(window: &Window) -> f32 {
    let width = window.width();
    match window.cursor_position() {
        Some(cursor) if width > 0.0 => (cursor.x / width) * 2.0 - 1.0,
        _ => 0.0,
    }
}

fn follow_view(
    time: Res<Time>,
    config: Res<DeskConfig>,
    view: Res<State<View>>,
    history: Res<FocusHistory>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut idle: ResMut<IdleOrbit>,
    mut q_cam: Query<(&mut Transform, &mut CameraRig), With<MainCamera>>,
) {
    let Ok((mut t, mut rig)) = q_cam.get_single_mut() else {
        return;
    };
    let dt = time.delta_seconds();
    let view = *view.get();
    let pose = config.pose(view);

    let goal = if view == View::Default {
        if config.idles(history.visited_focus) {
            idle.angle = (idle.angle + config.auto_rotate_speed * dt) % TAU;
        } else {
            idle.angle = 0.0;
        }
        let parallax = windows
            .get_single()
            .map(pointer_x)
            .unwrap_or(0.0)
            * config.parallax_strength;
        orbit(pose, idle.angle - parallax)
    } else {
        pose.position
    };

    t.translation = damp_vec3(t.translation, goal, config.camera_smooth_time, dt);
    rig.look_at = damp_vec3(rig.look_at, pose.target, config.camera_smooth_time, dt);
    let look_at = rig.look_at;
    if look_at != t.translation {
        t.look_at(look_at, Dir3::Y);
    }
}
