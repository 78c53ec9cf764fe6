//! Handles resolved once as the scene spawns, plus the shadow settings that
//! depend on node names.

use bevy::pbr::{NotShadowCaster, NotShadowReceiver};
use bevy::prelude::*;

use crate::config::{DeskConfig, ShadowMode};
use crate::resolver::{AncestorNames, NodeQuery, RuleSet, Target};

const KEY_OBJECTS: [&str; 7] = ["phone", "monitor", "lamp", "book", "keyboard", "mouse", "cup"];

#[derive(Resource, Default, Debug)]
pub struct SceneIndex {
    pub phone: Option<Entity>,
}

/// Outermost node of a hover-lifted object. Its descendants move with it.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Liftable(pub Target);

#[derive(Component)]
pub struct ContactShadow;

pub struct SceneIndexPlugin;
impl Plugin for SceneIndexPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SceneIndex>()
            .init_resource::<RuleSet>()
            .add_systems(
                Update,
                (index_named_nodes, apply_shadow_mode, update_contact_shadow),
            );
    }
}

fn is_phone_body(name: &str) -> bool {
    let name = name.to_lowercase();
    name.contains("phone") || name.contains("smartphone")
}

fn is_key_object(name: &str) -> bool {
    let name = name.to_lowercase();
    KEY_OBJECTS.iter().any(|k| name.contains(k))
}

/// (cast, receive) for a mesh under `mode`.
pub fn shadow_flags(mode: ShadowMode, key_object: bool) -> (bool, bool) {
    match mode {
        ShadowMode::All => (true, true),
        ShadowMode::Essential => (key_object, true),
        ShadowMode::None => (false, false),
    }
}

fn is_ancestor(ancestor: Entity, of: Entity, parents: &Query<&Parent>) -> bool {
    parents.iter_ancestors(of).any(|e| e == ancestor)
}

fn index_named_nodes(
    mut commands: Commands,
    mut index: ResMut<SceneIndex>,
    rules: Res<RuleSet>,
    added: Query<(Entity, &Name), Added<Name>>,
    names: Query<&Name>,
    parents: Query<&Parent>,
) {
    for (entity, name) in &added {
        if is_phone_body(name.as_str()) {
            let outer = match index.phone {
                Some(current) => is_ancestor(entity, current, &parents),
                None => true,
            };
            if outer {
                debug!("phone body: {}", name);
                index.phone = Some(entity);
            }
        }

        let Some(rule) = rules.classify(name.as_str()) else {
            continue;
        };
        if !rule.lift {
            continue;
        }
        let nested = parents.iter_ancestors(entity).any(|a| {
            names
                .get(a)
                .ok()
                .and_then(|n| rules.classify(n.as_str()))
                .is_some_and(|r| r.target == rule.target)
        });
        if !nested {
            commands.entity(entity).insert(Liftable(rule.target));
        }
    }
}

fn apply_shadow_mode(
    mut commands: Commands,
    config: Res<DeskConfig>,
    meshes: Query<(Entity, Ref<Handle<Mesh>>), Without<ContactShadow>>,
    nodes: NodeQuery,
    mut lights: Query<&mut PointLight>,
) {
    let all = config.is_changed();
    for (entity, mesh) in &meshes {
        if !all && !mesh.is_added() {
            continue;
        }
        let key = AncestorNames::new(&nodes, entity).any(is_key_object);
        let (cast, receive) = shadow_flags(config.shadow_mode, key);
        let mut e = commands.entity(entity);
        if cast {
            e.remove::<NotShadowCaster>();
        } else {
            e.insert(NotShadowCaster);
        }
        if receive {
            e.remove::<NotShadowReceiver>();
        } else {
            e.insert(NotShadowReceiver);
        }
    }

    if all {
        for mut light in &mut lights {
            light.shadows_enabled = config.shadow_mode != ShadowMode::None;
        }
    }
}

fn update_contact_shadow(
    config: Res<DeskConfig>,
    q: Query<&Handle<StandardMaterial>, With<ContactShadow>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    if !config.is_changed() {
        return;
    }
    for handle in &q {
        if let Some(material) = materials.get_mut(handle) {
            material.base_color = Color::srgba(0.0, 0.0, 0.0, config.contact_shadow_opacity);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .init_resource::<RuleSet>()
            .init_resource::<DeskConfig>()
            .init_resource::<Assets<StandardMaterial>>()
            .add_plugins(SceneIndexPlugin);
        app
    }

    #[test]
    fn only_outermost_lift_node_is_tagged() {
        let mut app = app();
        let world = app.world_mut();
        let group = world.spawn(Name::new("Keyboard")).id();
        let keys = world.spawn(Name::new("Keyboard_Keys_001")).id();
        let chair = world.spawn(Name::new("Chair")).id();
        world.entity_mut(group).add_child(keys);
        app.update();

        let world = app.world();
        assert_eq!(world.get::<Liftable>(group), Some(&Liftable(Target::Keyboard)));
        assert!(world.get::<Liftable>(keys).is_none());
        assert!(world.get::<Liftable>(chair).is_none());
    }

    #[test]
    fn phone_reference_is_captured_once_and_prefers_outer_node() {
        let mut app = app();
        let world = app.world_mut();
        let inner = world.spawn(Name::new("Phone_1")).id();
        let outer = world.spawn(Name::new("Smartphone")).id();
        world.entity_mut(outer).add_child(inner);
        app.update();

        let index = app.world().resource::<SceneIndex>();
        assert_eq!(index.phone, Some(outer));
    }

    #[test]
    fn phone_focus_never_needs_a_rescan() {
        let mut app = app();
        let phone = app.world_mut().spawn(Name::new("Phone")).id();
        app.update();
        app.world_mut().spawn(Name::new("Lamp"));
        app.update();
        assert_eq!(app.world().resource::<SceneIndex>().phone, Some(phone));
    }

    #[test]
    fn shadow_modes() {
        assert_eq!(shadow_flags(ShadowMode::All, false), (true, true));
        assert_eq!(shadow_flags(ShadowMode::Essential, false), (false, true));
        assert_eq!(shadow_flags(ShadowMode::Essential, true), (true, true));
        assert_eq!(shadow_flags(ShadowMode::None, true), (false, false));
        assert!(is_key_object("Cup001|Cup|Dupli|"));
        assert!(!is_key_object("Chair003_1"));
    }
}
