use bevy::prelude::*;
use bevy::window::{CursorIcon, PrimaryWindow};

use crate::picking::PointerHit;
use crate::resolver::{Action, AncestorNames, NodeQuery, RuleSet, Target};
use crate::view::{View, ViewRequest};

/// Target under the pointer, consumed by the cursor and hover-lift systems.
#[derive(Resource, Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoverState(pub Option<Target>);

/// Whether the pointer sits over an egui panel; such pointers never reach
/// the scene.
#[derive(Resource, Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerOverUi(pub bool);

#[derive(Event, Default)]
pub struct ToggleLamp;

#[derive(Resource, Debug)]
pub struct LampState {
    pub on: bool,
}

impl Default for LampState {
    fn default() -> Self {
        Self { on: true }
    }
}

/// Desk lamp light; `intensity` is its lit value.
#[derive(Component)]
pub struct DeskLamp {
    pub intensity: f32,
}

pub struct InputPlugin;
impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<HoverState>()
            .init_resource::<PointerOverUi>()
            .init_resource::<LampState>()
            .init_resource::<RuleSet>()
            .add_event::<ToggleLamp>()
            .add_systems(
                Update,
                (
                    back_on_escape,
                    resolve_pointer,
                    update_cursor.run_if(resource_changed::<HoverState>),
                    toggle_lamp,
                ),
            );
    }
}

/// Hover is dropped while zoomed onto the monitor or phone.
pub fn hover_target(view: View, resolved: Option<Target>) -> Option<Target> {
    if view.suppresses_hover() {
        None
    } else {
        resolved
    }
}

fn back_on_escape(keys: Res<ButtonInput<KeyCode>>, mut requests: EventWriter<ViewRequest>) {
    if keys.just_pressed(KeyCode::Escape) {
        requests.send(ViewRequest::Back);
    }
}

#[allow(clippy::too_many_arguments)]
fn resolve_pointer(
    over_ui: Res<PointerOverUi>,
    buttons: Res<ButtonInput<MouseButton>>,
    hit: Res<PointerHit>,
    rules: Res<RuleSet>,
    view: Res<State<View>>,
    nodes: NodeQuery,
    mut hover: ResMut<HoverState>,
    mut requests: EventWriter<ViewRequest>,
    mut lamp: EventWriter<ToggleLamp>,
) {
    let leaf = hit.0.filter(|_| !over_ui.0);
    let resolved = leaf.and_then(|leaf| rules.resolve(AncestorNames::new(&nodes, leaf)));

    let next = HoverState(hover_target(*view.get(), resolved.map(|r| r.target)));
    if hover.set_if_neq(next) {
        debug!("hover: {:?}", next.0);
    }

    if !buttons.just_pressed(MouseButton::Left) {
        return;
    }
    match (resolved, leaf) {
        (Some(rule), _) => {
            debug!("clicked {:?}", rule.target);
            match rule.action {
                Action::Focus(view) => {
                    requests.send(ViewRequest::Focus(view));
                }
                Action::ToggleLamp => {
                    lamp.send(ToggleLamp);
                }
            }
        }
        (None, Some(leaf)) => {
            let name = nodes
                .get(leaf)
                .ok()
                .and_then(|(name, _)| name)
                .map_or("<unnamed>", Name::as_str);
            debug!("click on {} matched no target", name);
        }
        (None, None) => {}
    }
}

fn update_cursor(hover: Res<HoverState>, mut windows: Query<&mut Window, With<PrimaryWindow>>) {
    let Ok(mut window) = windows.get_single_mut() else {
        return;
    };
    window.cursor.icon = if hover.0.is_some() {
        CursorIcon::Pointer
    } else {
        CursorIcon::Default
    };
}

fn toggle_lamp(
    mut toggles: EventReader<ToggleLamp>,
    mut state: ResMut<LampState>,
    mut lamps: Query<(&DeskLamp, &mut PointLight)>,
) {
    let flips = toggles.read().count();
    if flips % 2 == 1 {
        state.on = !state.on;
        info!("desk lamp {}", if state.on { "on" } else { "off" });
    }
    if state.is_changed() {
        for (lamp, mut light) in &mut lamps {
            light.intensity = if state.on { lamp.intensity } else { 0.0 };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::ViewPlugin;
    use bevy::state::app::StatesPlugin;

    fn app() -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, StatesPlugin, ViewPlugin, InputPlugin))
            .init_resource::<ButtonInput<KeyCode>>()
            .init_resource::<ButtonInput<MouseButton>>()
            .init_resource::<PointerHit>();
        app.update();
        app
    }

    /// Spawns `names` as a chain from root to leaf and returns the leaf.
    fn spawn_chain(app: &mut App, names: &[&str]) -> Entity {
        let world = app.world_mut();
        let mut parent: Option<Entity> = None;
        for name in names {
            let node = world.spawn(Name::new(name.to_string())).id();
            if let Some(parent) = parent {
                world.entity_mut(parent).add_child(node);
            }
            parent = Some(node);
        }
        parent.unwrap()
    }

    fn point_at(app: &mut App, leaf: Option<Entity>) {
        app.insert_resource(PointerHit(leaf));
    }

    fn click(app: &mut App) {
        app.world_mut()
            .resource_mut::<ButtonInput<MouseButton>>()
            .press(MouseButton::Left);
        app.update();
        let mut buttons = app.world_mut().resource_mut::<ButtonInput<MouseButton>>();
        buttons.release(MouseButton::Left);
        buttons.clear();
        // let the view transition land
        app.update();
        app.update();
    }

    fn press_escape(app: &mut App) {
        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(KeyCode::Escape);
        app.update();
        let mut keys = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
        keys.release(KeyCode::Escape);
        keys.clear();
        app.update();
        app.update();
    }

    fn current(app: &App) -> View {
        *app.world().resource::<State<View>>().get()
    }

    fn hover(app: &App) -> Option<Target> {
        app.world().resource::<HoverState>().0
    }

    #[test]
    fn hover_suppressed_while_zoomed() {
        let t = Some(Target::Phone);
        assert_eq!(hover_target(View::Default, t), t);
        assert_eq!(hover_target(View::Notepad, t), t);
        assert_eq!(hover_target(View::Monitor, t), None);
        assert_eq!(hover_target(View::Phone, t), None);
    }

    #[test]
    fn clicking_a_nested_mesh_focuses_its_object() {
        let mut app = app();
        let leaf = spawn_chain(&mut app, &["Desk_Group", "Keyboard", "Cube.012"]);
        point_at(&mut app, Some(leaf));
        app.update();
        assert_eq!(hover(&app), Some(Target::Keyboard));

        click(&mut app);
        assert_eq!(current(&app), View::Monitor);
        assert_eq!(hover(&app), None);
    }

    #[test]
    fn escape_goes_back_from_every_focus_view() {
        let mut app = app();
        for view in View::FOCUS {
            app.world_mut().send_event(ViewRequest::Focus(view));
            app.update();
            app.update();
            assert_eq!(current(&app), view);

            press_escape(&mut app);
            assert_eq!(current(&app), View::Default);
        }
        press_escape(&mut app);
        assert_eq!(current(&app), View::Default);
    }

    #[test]
    fn room_shell_leaf_swallows_the_click() {
        let mut app = app();
        let wall = spawn_chain(&mut app, &["Lamp", "Wall_North"]);
        point_at(&mut app, Some(wall));
        click(&mut app);

        assert_eq!(hover(&app), None);
        assert_eq!(current(&app), View::Default);
        assert!(app.world().resource::<LampState>().on);
    }

    #[test]
    fn missed_click_changes_nothing() {
        let mut app = app();
        let chair = spawn_chain(&mut app, &["Chair003_1"]);
        point_at(&mut app, Some(chair));
        click(&mut app);
        assert_eq!(current(&app), View::Default);

        point_at(&mut app, None);
        click(&mut app);
        assert_eq!(current(&app), View::Default);
        assert_eq!(hover(&app), None);
    }

    #[test]
    fn lamp_click_toggles_instead_of_focusing() {
        let mut app = app();
        let bulb = spawn_chain(&mut app, &["Desk_Lamp", "Bulb_Glass"]);
        point_at(&mut app, Some(bulb));
        click(&mut app);
        assert!(!app.world().resource::<LampState>().on);
        assert_eq!(current(&app), View::Default);

        click(&mut app);
        assert!(app.world().resource::<LampState>().on);
    }

    #[test]
    fn pointer_over_ui_blocks_hover_and_clicks() {
        let mut app = app();
        let leaf = spawn_chain(&mut app, &["Notepad"]);
        app.insert_resource(PointerOverUi(true));
        point_at(&mut app, Some(leaf));
        click(&mut app);
        assert_eq!(hover(&app), None);
        assert_eq!(current(&app), View::Default);

        app.insert_resource(PointerOverUi(false));
        app.update();
        assert_eq!(hover(&app), Some(Target::Notepad));
    }

    #[test]
    fn hover_drops_while_on_the_phone() {
        let mut app = app();
        let phone = spawn_chain(&mut app, &["Smartphone"]);
        point_at(&mut app, Some(phone));
        app.update();
        assert_eq!(hover(&app), Some(Target::Phone));

        click(&mut app);
        assert_eq!(current(&app), View::Phone);
        assert_eq!(hover(&app), None);
    }

    #[test]
    fn lamp_toggles_light_intensity() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .init_resource::<LampState>()
            .add_event::<ToggleLamp>()
            .add_systems(Update, toggle_lamp);
        let light = app
            .world_mut()
            .spawn((
                DeskLamp { intensity: 5000.0 },
                PointLight {
                    intensity: 5000.0,
                    ..default()
                },
            ))
            .id();
        app.update();

        app.world_mut().send_event(ToggleLamp);
        app.update();
        assert!(!app.world().resource::<LampState>().on);
        assert_eq!(app.world().get::<PointLight>(light).unwrap().intensity, 0.0);

        app.world_mut().send_event(ToggleLamp);
        app.update();
        assert_eq!(app.world().get::<PointLight>(light).unwrap().intensity, 5000.0);
    }
}
