use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::view::View;

/// Room surfaces that never resolve to a target when hit directly.
const ROOM_SHELL: [&str; 3] = ["desk", "wall", "floor"];

/// Semantic identity of an interactive desk object.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Target {
    Notepad,
    Phone,
    Lamp,
    Keyboard,
    Mouse,
    Book,
    PaperStack,
}

/// What a click on a target does.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Focus(View),
    ToggleLamp,
}

#[derive(Clone, Debug)]
pub struct InteractionRule {
    pub target: Target,
    pub action: Action,
    pub lift: bool,
    contains: Vec<String>,
    excludes: Vec<String>,
}

impl InteractionRule {
    pub fn new(target: Target, action: Action) -> Self {
        Self {
            target,
            action,
            lift: false,
            contains: Vec::new(),
            excludes: Vec::new(),
        }
    }

    pub fn contains(mut self, patterns: &[&str]) -> Self {
        self.contains
            .extend(patterns.iter().map(|p| p.to_lowercase()));
        self
    }

    pub fn excludes(mut self, patterns: &[&str]) -> Self {
        self.excludes
            .extend(patterns.iter().map(|p| p.to_lowercase()));
        self
    }

    pub fn lift(mut self) -> Self {
        self.lift = true;
        self
    }

    /// `name` must already be lowercase. Exclusion wins over inclusion.
    fn matches(&self, name: &str) -> bool {
        self.contains.iter().any(|p| name.contains(p.as_str()))
            && !self.excludes.iter().any(|p| name.contains(p.as_str()))
    }
}

pub fn is_room_shell(name: &str) -> bool {
    let name = name.to_lowercase();
    ROOM_SHELL.iter().any(|s| name.contains(s))
}

/// Ordered rule table. Order only breaks ties between rules matching the
/// same node; a nearer ancestor always wins over a farther one.
#[derive(Resource, Clone, Debug)]
pub struct RuleSet(pub Vec<InteractionRule>);

impl Default for RuleSet {
    fn default() -> Self {
        Self(vec![
            InteractionRule::new(Target::Notepad, Action::Focus(View::Notepad))
                .contains(&["notebook", "notepad", "notepad_plane"])
                .excludes(&["stack", "paper", "papers"]),
            InteractionRule::new(Target::Phone, Action::Focus(View::Phone)).contains(&[
                "phone",
                "smartphone",
                "phone_plane",
                "screen",
                "node003_1",
            ]),
            InteractionRule::new(Target::Lamp, Action::ToggleLamp)
                .contains(&["lamp", "light", "bulb"])
                .excludes(&["phone", "screen", "node003_1"]),
            InteractionRule::new(Target::Keyboard, Action::Focus(View::Monitor))
                .contains(&["keyboard", "keys"])
                .lift(),
            InteractionRule::new(Target::Mouse, Action::Focus(View::Monitor))
                .contains(&["mouse"])
                .excludes(&["pad"])
                .lift(),
            InteractionRule::new(Target::Book, Action::Focus(View::Reading))
                .contains(&["book", "values", "play"])
                .excludes(&["notebook", "phone", "node003"])
                .lift(),
            InteractionRule::new(Target::PaperStack, Action::Focus(View::Papers))
                .contains(&["stack", "paper", "papers"])
                .lift(),
        ])
    }
}

impl RuleSet {
    /// Rule matching a single node name, if any.
    pub fn classify(&self, name: &str) -> Option<&InteractionRule> {
        let name = name.to_lowercase();
        self.0.iter().find(|rule| rule.matches(&name))
    }

    /// Resolve a hit given its ancestor chain, leaf first. A leaf that belongs
    /// to the room shell is a miss no matter what its parents are called.
    pub fn resolve<'a, I>(&self, chain: I) -> Option<&InteractionRule>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut chain = chain.into_iter().peekable();
        if is_room_shell(chain.peek()?) {
            return None;
        }
        chain.find_map(|name| self.classify(name))
    }
}

pub type NodeQuery<'w, 's> = Query<'w, 's, (Option<&'static Name>, Option<&'static Parent>)>;

/// Names from `entity` up to the scene root, skipping unnamed nodes.
pub struct AncestorNames<'a, 'w, 's> {
    nodes: &'a NodeQuery<'w, 's>,
    next: Option<Entity>,
}

impl<'a, 'w, 's> AncestorNames<'a, 'w, 's> {
    pub fn new(nodes: &'a NodeQuery<'w, 's>, leaf: Entity) -> Self {
        Self {
            nodes,
            next: Some(leaf),
        }
    }
}

impl<'a, 'w, 's> Iterator for AncestorNames<'a, 'w, 's> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let nodes = self.nodes;
        loop {
            let entity = self.next?;
            let (name, parent) = nodes.get(entity).ok()?;
            self.next = parent.map(Parent::get);
            if let Some(name) = name {
                return Some(name.as_str());
            }
        }
    }
}
