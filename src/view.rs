use bevy::prelude::*;

/// Which part of the desk the camera is framing. Exactly one is active.
#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum View {
    #[default]
    Default,
    Monitor,
    Phone,
    Notepad,
    Reading,
    Papers,
}

impl View {
    #[cfg(test)]
    pub const FOCUS: [View; 5] = [
        View::Monitor,
        View::Phone,
        View::Notepad,
        View::Reading,
        View::Papers,
    ];

    pub fn is_focus(self) -> bool {
        self != View::Default
    }

    /// Views where the desk objects stop reacting to the pointer.
    pub fn suppresses_hover(self) -> bool {
        matches!(self, View::Monitor | View::Phone)
    }

    /// Resulting view for `request`, or `None` when the request is not legal
    /// from `self`. Focus only leaves `Default`; back only leaves a focus view.
    pub fn after(self, request: ViewRequest) -> Option<View> {
        match request {
            ViewRequest::Focus(target) if self == View::Default && target.is_focus() => {
                Some(target)
            }
            ViewRequest::Focus(_) => None,
            ViewRequest::Back if self.is_focus() => Some(View::Default),
            ViewRequest::Back => None,
        }
    }
}

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewRequest {
    Focus(View),
    Back,
}

/// Whether any focus view has been entered since startup.
#[derive(Resource, Default, Debug)]
pub struct FocusHistory {
    pub visited_focus: bool,
}

pub struct ViewPlugin;
impl Plugin for ViewPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<View>()
            .init_resource::<FocusHistory>()
            .add_event::<ViewRequest>()
            .add_systems(Update, apply_view_requests);
    }
}

fn apply_view_requests(
    mut requests: EventReader<ViewRequest>,
    state: Res<State<View>>,
    mut next_state: ResMut<NextState<View>>,
    mut history: ResMut<FocusHistory>,
) {
    let start = *state.get();
    let mut current = start;

    for request in requests.read() {
        match current.after(*request) {
            Some(view) => {
                info!("view {:?} -> {:?}", current, view);
                if view.is_focus() {
                    history.visited_focus = true;
                }
                current = view;
            }
            None => debug!("ignoring {:?} while in {:?}", request, current),
        }
    }

    if current != start {
        next_state.set(current);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::state::app::StatesPlugin;

    fn app() -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, StatesPlugin, ViewPlugin));
        app.update();
        app
    }

    fn request(app: &mut App, request: ViewRequest) {
        app.world_mut().send_event(request);
        // one frame to read the event, one for the state transition
        app.update();
        app.update();
    }

    fn current(app: &App) -> View {
        *app.world().resource::<State<View>>().get()
    }

    #[test]
    fn focus_only_leaves_default() {
        for view in View::FOCUS {
            assert_eq!(View::Default.after(ViewRequest::Focus(view)), Some(view));
            for other in View::FOCUS {
                assert_eq!(view.after(ViewRequest::Focus(other)), None);
            }
        }
        assert_eq!(View::Default.after(ViewRequest::Focus(View::Default)), None);
    }

    #[test]
    fn back_always_returns_to_default() {
        for view in View::FOCUS {
            assert_eq!(view.after(ViewRequest::Back), Some(View::Default));
        }
        assert_eq!(View::Default.after(ViewRequest::Back), None);
    }

    #[test]
    fn each_focus_view_is_entered_from_default() {
        let mut app = app();
        for view in View::FOCUS {
            request(&mut app, ViewRequest::Focus(view));
            assert_eq!(current(&app), view);
            request(&mut app, ViewRequest::Back);
            assert_eq!(current(&app), View::Default);
        }
        assert!(app.world().resource::<FocusHistory>().visited_focus);
    }

    #[test]
    fn second_hotspot_click_is_ignored_while_focused() {
        let mut app = app();
        request(&mut app, ViewRequest::Focus(View::Monitor));
        assert_eq!(current(&app), View::Monitor);
        request(&mut app, ViewRequest::Focus(View::Phone));
        assert_eq!(current(&app), View::Monitor);
    }

    #[test]
    fn back_in_default_is_a_no_op() {
        let mut app = app();
        request(&mut app, ViewRequest::Back);
        assert_eq!(current(&app), View::Default);
        assert!(!app.world().resource::<FocusHistory>().visited_focus);
    }

    #[test]
    fn requests_in_one_frame_apply_in_order() {
        let mut app = app();
        app.world_mut().send_event(ViewRequest::Focus(View::Notepad));
        app.world_mut().send_event(ViewRequest::Focus(View::Papers));
        app.update();
        app.update();
        assert_eq!(current(&app), View::Notepad);
    }
}
