//! Input routing
//!
//! Raw events drained from the window backend are mapped to a small set of
//! application commands once per frame. Unrecognized events route to `None`
//! and are dropped silently; that is policy, not an error.

use crate::foundation::math::Rect;
use std::collections::HashMap;
use std::str::FromStr;

/// Key symbols the router understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)] // variant names are the documentation
pub enum Key {
    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,
    Key0, Key1, Key2, Key3, Key4, Key5, Key6, Key7, Key8, Key9,
    Up, Down, Left, Right,
    Space, Enter, Escape,
}

impl FromStr for Key {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = match s.to_ascii_lowercase().as_str() {
            "a" => Self::A, "b" => Self::B, "c" => Self::C, "d" => Self::D,
            "e" => Self::E, "f" => Self::F, "g" => Self::G, "h" => Self::H,
            "i" => Self::I, "j" => Self::J, "k" => Self::K, "l" => Self::L,
            "m" => Self::M, "n" => Self::N, "o" => Self::O, "p" => Self::P,
            "q" => Self::Q, "r" => Self::R, "s" => Self::S, "t" => Self::T,
            "u" => Self::U, "v" => Self::V, "w" => Self::W, "x" => Self::X,
            "y" => Self::Y, "z" => Self::Z,
            "0" => Self::Key0, "1" => Self::Key1, "2" => Self::Key2,
            "3" => Self::Key3, "4" => Self::Key4, "5" => Self::Key5,
            "6" => Self::Key6, "7" => Self::Key7, "8" => Self::Key8,
            "9" => Self::Key9,
            "up" => Self::Up,
            "down" => Self::Down,
            "left" => Self::Left,
            "right" => Self::Right,
            "space" => Self::Space,
            "enter" => Self::Enter,
            "escape" => Self::Escape,
            other => return Err(format!("unknown key name '{other}'")),
        };
        Ok(key)
    }
}

/// Mouse buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Left mouse button
    Left,
    /// Right mouse button
    Right,
    /// Middle mouse button
    Middle,
}

/// Raw events consumed from the windowing backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawEvent {
    /// Window close requested
    Quit,
    /// Key was pressed
    KeyDown(Key),
    /// Mouse button was pressed at window coordinates
    MouseButtonDown {
        /// X coordinate in pixels
        x: i32,
        /// Y coordinate in pixels
        y: i32,
        /// The button that was pressed
        button: MouseButton,
    },
}

/// Application commands produced by routing raw events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Terminate the frame loop after the current iteration
    Quit,
    /// Flip the pause flag
    TogglePause,
    /// Select the image registered under the given logical name
    SetImage(String),
}

/// Event-to-command mapping configuration
#[derive(Debug, Clone)]
pub struct InputBindings {
    /// Key that quits the application
    pub cancel_key: Key,
    /// Key that toggles pause
    pub toggle_key: Key,
    /// Clicking inside this rectangle toggles pause
    pub toggle_hit_rect: Option<Rect>,
    /// Keys that select a named image
    pub image_keys: HashMap<Key, String>,
    /// Image selected by any key without another binding
    pub fallback_image: Option<String>,
}

impl Default for InputBindings {
    fn default() -> Self {
        let image_keys = [
            (Key::Up, "up".to_string()),
            (Key::Down, "down".to_string()),
            (Key::Left, "left".to_string()),
            (Key::Right, "right".to_string()),
        ]
        .into();

        Self {
            cancel_key: Key::Escape,
            toggle_key: Key::Space,
            toggle_hit_rect: None,
            image_keys,
            fallback_image: Some("press".to_string()),
        }
    }
}

/// Maps drained raw events to commands once per frame
pub struct InputRouter {
    bindings: InputBindings,
}

impl InputRouter {
    /// Create a router with the given bindings
    pub fn new(bindings: InputBindings) -> Self {
        Self { bindings }
    }

    /// The active bindings
    pub fn bindings(&self) -> &InputBindings {
        &self.bindings
    }

    /// Route one raw event to a command.
    ///
    /// `None` means the event carries no meaning for the application and is
    /// dropped silently.
    pub fn route(&self, event: &RawEvent) -> Option<Command> {
        match *event {
            RawEvent::Quit => Some(Command::Quit),
            RawEvent::KeyDown(key) if key == self.bindings.cancel_key => Some(Command::Quit),
            RawEvent::KeyDown(key) if key == self.bindings.toggle_key => {
                Some(Command::TogglePause)
            }
            RawEvent::KeyDown(key) => self
                .bindings
                .image_keys
                .get(&key)
                .cloned()
                .or_else(|| self.bindings.fallback_image.clone())
                .map(Command::SetImage),
            RawEvent::MouseButtonDown {
                x,
                y,
                button: MouseButton::Left,
            } => match self.bindings.toggle_hit_rect {
                Some(rect) if rect.contains(x, y) => Some(Command::TogglePause),
                _ => None,
            },
            RawEvent::MouseButtonDown { .. } => None,
        }
    }

    /// Lazily route a batch of events drained this frame.
    ///
    /// The sequence is finite (bounded by the drained batch) and consumed by
    /// iteration; it is not restartable across frames.
    pub fn route_all<'a, I>(&'a self, events: I) -> impl Iterator<Item = Command> + 'a
    where
        I: IntoIterator<Item = RawEvent>,
        I::IntoIter: 'a,
    {
        events.into_iter().filter_map(|event| self.route(&event))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn router_with_hit_rect() -> InputRouter {
        InputRouter::new(InputBindings {
            toggle_hit_rect: Some(Rect::new(20, 540, 160, 40)),
            ..InputBindings::default()
        })
    }

    #[test]
    fn close_and_cancel_key_quit() {
        let router = router_with_hit_rect();
        assert_eq!(router.route(&RawEvent::Quit), Some(Command::Quit));
        assert_eq!(
            router.route(&RawEvent::KeyDown(Key::Escape)),
            Some(Command::Quit)
        );
    }

    #[test]
    fn toggle_key_and_click_inside_rect_toggle_pause() {
        let router = router_with_hit_rect();
        assert_eq!(
            router.route(&RawEvent::KeyDown(Key::Space)),
            Some(Command::TogglePause)
        );
        assert_eq!(
            router.route(&RawEvent::MouseButtonDown {
                x: 25,
                y: 550,
                button: MouseButton::Left
            }),
            Some(Command::TogglePause)
        );
    }

    #[test]
    fn click_outside_rect_or_wrong_button_is_dropped() {
        let router = router_with_hit_rect();
        assert_eq!(
            router.route(&RawEvent::MouseButtonDown {
                x: 400,
                y: 300,
                button: MouseButton::Left
            }),
            None
        );
        assert_eq!(
            router.route(&RawEvent::MouseButtonDown {
                x: 25,
                y: 550,
                button: MouseButton::Right
            }),
            None
        );
    }

    #[test]
    fn directional_keys_select_their_image() {
        let router = router_with_hit_rect();
        assert_eq!(
            router.route(&RawEvent::KeyDown(Key::Up)),
            Some(Command::SetImage("up".to_string()))
        );
        assert_eq!(
            router.route(&RawEvent::KeyDown(Key::Left)),
            Some(Command::SetImage("left".to_string()))
        );
    }

    #[test]
    fn other_keys_fall_back_to_default_image() {
        let router = router_with_hit_rect();
        assert_eq!(
            router.route(&RawEvent::KeyDown(Key::X)),
            Some(Command::SetImage("press".to_string()))
        );
    }

    #[test]
    fn unbound_key_without_fallback_is_dropped() {
        let router = InputRouter::new(InputBindings {
            image_keys: HashMap::new(),
            fallback_image: None,
            ..InputBindings::default()
        });
        assert_eq!(router.route(&RawEvent::KeyDown(Key::X)), None);
    }

    #[test]
    fn route_all_drops_silent_events() {
        let router = router_with_hit_rect();
        let events = vec![
            RawEvent::KeyDown(Key::Space),
            RawEvent::MouseButtonDown {
                x: 0,
                y: 0,
                button: MouseButton::Middle,
            },
            RawEvent::Quit,
        ];
        let commands: Vec<_> = router.route_all(events).collect();
        assert_eq!(commands, vec![Command::TogglePause, Command::Quit]);
    }

    #[test]
    fn key_names_parse() {
        assert_eq!("escape".parse::<Key>(), Ok(Key::Escape));
        assert_eq!("Space".parse::<Key>(), Ok(Key::Space));
        assert_eq!("p".parse::<Key>(), Ok(Key::P));
        assert_eq!("7".parse::<Key>(), Ok(Key::Key7));
        assert!("super+q".parse::<Key>().is_err());
    }
}
