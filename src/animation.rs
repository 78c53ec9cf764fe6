use bevy::prelude::*;

use crate::camera::{damp, damp_factor, damp_vec3};
use crate::config::{DeskConfig, PhoneFocus};
use crate::input::HoverState;
use crate::resolver::Target;
use crate::scene_index::{Liftable, SceneIndex};
use crate::view::View;

/// Below this distance an easing value snaps onto its goal.
const SETTLE_EPS: f32 = 1e-5;

/// Local transform recorded the first frame an animated node is seen.
/// Animations always ease relative to this, never to the live transform.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct RestPose {
    pub translation: Vec3,
    pub rotation: Quat,
}

impl From<&Transform> for RestPose {
    fn from(t: &Transform) -> Self {
        Self {
            translation: t.translation,
            rotation: t.rotation,
        }
    }
}

pub struct AnimationPlugin;
impl Plugin for AnimationPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (capture_rest_poses, (hover_lift, phone_focus)).chain(),
        );
    }
}

pub fn lift_goal(rest_y: f32, hovered: bool, amount: f32) -> f32 {
    if hovered {
        rest_y + amount
    } else {
        rest_y
    }
}

fn settle(current: f32, goal: f32, smooth_time: f32, dt: f32) -> f32 {
    let next = damp(current, goal, smooth_time, dt);
    if (goal - next).abs() < SETTLE_EPS {
        goal
    } else {
        next
    }
}

/// Where the phone body should sit for the active view.
pub fn phone_goal(rest: &RestPose, focus: &PhoneFocus, view: View, hovered: bool) -> (Vec3, Quat) {
    match view {
        View::Phone => (
            rest.translation + Vec3::new(focus.slide_x, focus.lift, focus.slide_z),
            Quat::from_rotation_x(focus.tilt) * rest.rotation,
        ),
        View::Default if hovered => (
            rest.translation + Vec3::Y * focus.hover_lift,
            rest.rotation,
        ),
        _ => (rest.translation, rest.rotation),
    }
}

fn capture_rest_poses(
    mut commands: Commands,
    index: Res<SceneIndex>,
    liftables: Query<(Entity, &Transform), (With<Liftable>, Without<RestPose>)>,
    unposed: Query<&Transform, Without<RestPose>>,
) {
    for (entity, t) in &liftables {
        commands.entity(entity).insert(RestPose::from(t));
    }
    if let Some(phone) = index.phone {
        if let Ok(t) = unposed.get(phone) {
            commands.entity(phone).insert(RestPose::from(t));
        }
    }
}

fn hovered_in(view: View, hover: &HoverState) -> Option<Target> {
    (view == View::Default).then_some(hover.0).flatten()
}

fn hover_lift(
    time: Res<Time>,
    config: Res<DeskConfig>,
    hover: Res<HoverState>,
    view: Res<State<View>>,
    mut q: Query<(&Liftable, &RestPose, &mut Transform)>,
) {
    let dt = time.delta_seconds();
    let active = hovered_in(*view.get(), &hover);
    for (lift, rest, mut t) in &mut q {
        let goal = lift_goal(
            rest.translation.y,
            active == Some(lift.0),
            config.lift_for(lift.0),
        );
        if t.translation.y != goal {
            t.translation.y = settle(t.translation.y, goal, config.hover_smooth_time, dt);
        }
    }
}

fn phone_focus(
    time: Res<Time>,
    config: Res<DeskConfig>,
    index: Res<SceneIndex>,
    hover: Res<HoverState>,
    view: Res<State<View>>,
    mut q: Query<(&RestPose, &mut Transform), Without<Liftable>>,
) {
    let Some((rest, mut t)) = index.phone.and_then(|phone| q.get_mut(phone).ok()) else {
        return;
    };
    let dt = time.delta_seconds();
    let view = *view.get();
    let hovered = hovered_in(view, &hover) == Some(Target::Phone);
    let (goal_t, goal_r) = phone_goal(rest, &config.phone_focus, view, hovered);

    let smooth = config.phone_smooth_time;
    t.translation = damp_vec3(t.translation, goal_t, smooth, dt);
    t.rotation = t.rotation.slerp(goal_r, damp_factor(smooth, dt));
}
