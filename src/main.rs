mod animation;
mod camera;
mod config;
mod content;
mod input;
mod picking;
mod resolver;
mod scene_index;
mod ui;
mod view;

use animation::AnimationPlugin;
use bevy::core_pipeline::bloom::BloomSettings;
use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::pbr::NotShadowCaster;
use bevy::prelude::*;
use camera::{CameraPlugin, CameraRig};
use config::DeskConfig;
use input::{DeskLamp, InputPlugin};
use picking::PickingPlugin;
use scene_index::{ContactShadow, SceneIndexPlugin};
use ui::UiPlugin;
use view::{View, ViewPlugin};

const DESK_CENTER: Vec3 = Vec3::new(-1.0, 0.905, -4.9);
const LAMP_POSITION: Vec3 = Vec3::new(-0.564, 1.162, -5.526);
const LAMP_INTENSITY: f32 = 20_000.0;

fn main() {
    App::new()
        .insert_resource(ClearColor(Color::srgb(0.02, 0.02, 0.02)))
        .insert_resource(Msaa::Sample4)
        .insert_resource(AmbientLight {
            color: Color::WHITE,
            brightness: 400.0,
        })
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Vibe Coding Ethics".into(),
                resolution: (1400., 900.).into(),
                ..default()
            }),
            ..default()
        }))
        // after DefaultPlugins so config loading can log
        .insert_resource(DeskConfig::from_env())
        .add_plugins((
            ViewPlugin,
            SceneIndexPlugin,
            PickingPlugin,
            InputPlugin,
            CameraPlugin,
            AnimationPlugin,
            UiPlugin,
        ))
        .add_systems(Startup, (setup_camera, setup_scene))
        .run();
}

fn setup_camera(mut commands: Commands, config: Res<DeskConfig>) {
    let (transform, rig) = CameraRig::bundle(config.pose(View::Default));
    commands.spawn((
        Camera3dBundle {
            camera: Camera {
                hdr: true,
                ..default()
            },
            tonemapping: Tonemapping::TonyMcMapface,
            projection: PerspectiveProjection {
                fov: 50f32.to_radians(),
                ..default()
            }
            .into(),
            transform,
            ..default()
        },
        BloomSettings::NATURAL,
        MainCamera,
        rig,
    ));
}

fn setup_scene(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    config: Res<DeskConfig>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    // a missing file only leaves the room empty; the asset server logs it
    commands.spawn(SceneBundle {
        scene: asset_server.load(config.scene_path.clone()),
        ..default()
    });

    commands.spawn(PointLightBundle {
        point_light: PointLight {
            intensity: 250_000.0,
            range: 12.0,
            shadows_enabled: true,
            ..default()
        },
        transform: Transform::from_xyz(DESK_CENTER.x, 2.4, DESK_CENTER.z),
        ..default()
    });

    commands.spawn((
        PointLightBundle {
            point_light: PointLight {
                intensity: LAMP_INTENSITY,
                range: 3.0,
                color: Color::srgb(1.0, 0.88, 0.7),
                shadows_enabled: true,
                ..default()
            },
            transform: Transform::from_translation(LAMP_POSITION - Vec3::Y * 0.05),
            ..default()
        },
        DeskLamp {
            intensity: LAMP_INTENSITY,
        },
        Name::new("DeskLampLight"),
    ));

    commands.spawn((
        PbrBundle {
            mesh: meshes.add(Plane3d::default().mesh().size(1.6, 1.2)),
            material: materials.add(StandardMaterial {
                base_color: Color::srgba(0.0, 0.0, 0.0, config.contact_shadow_opacity),
                alpha_mode: AlphaMode::Blend,
                unlit: true,
                ..default()
            }),
            transform: Transform::from_translation(DESK_CENTER),
            ..default()
        },
        ContactShadow,
        NotShadowCaster,
    ));
}

#[derive(Component)]
pub struct MainCamera;
