//! Window backend seam
//!
//! [`WindowBackend`] is the contract between the app context and the
//! windowing system: report liveness, drain pending input, and publish a
//! finished framebuffer. The production implementation wraps `minifb`;
//! tests and headless runs supply their own implementations.

use crate::input::{Key, MouseButton, RawEvent};
use crate::render::ContextError;
use minifb::{KeyRepeat, MouseMode, Window, WindowOptions};

/// Contract between the render context and the windowing system
pub trait WindowBackend {
    /// Whether the OS window still exists
    fn is_open(&self) -> bool;

    /// Drain the input events pending at the instant of the call.
    ///
    /// Emits [`RawEvent::Quit`] when the window has been closed.
    fn poll_events(&mut self) -> Vec<RawEvent>;

    /// Publish a finished frame to the window surface.
    ///
    /// Every draw call made before this point is visible afterwards and not
    /// before.
    fn present(&mut self, buffer: &[u32], width: u32, height: u32) -> Result<(), ContextError>;

    /// Change the window title
    fn set_title(&mut self, title: &str);
}

/// `minifb`-backed window
pub struct MinifbWindow {
    window: Window,
    left_down: bool,
    right_down: bool,
    middle_down: bool,
}

impl MinifbWindow {
    /// Create and show an OS window.
    ///
    /// Fails with [`ContextError::Window`] when the window itself cannot be
    /// created and [`ContextError::Backend`] for any other backend failure.
    pub fn open(title: &str, width: u32, height: u32) -> Result<Self, ContextError> {
        let mut window = Window::new(title, width as usize, height as usize, WindowOptions::default())
            .map_err(open_error)?;

        // The frame loop owns throttling; disable the backend's limiter.
        window.set_target_fps(0);

        Ok(Self {
            window,
            left_down: false,
            right_down: false,
            middle_down: false,
        })
    }

    fn mouse_edge(&mut self, button: MouseButton, events: &mut Vec<RawEvent>) {
        let (minifb_button, was_down) = match button {
            MouseButton::Left => (minifb::MouseButton::Left, &mut self.left_down),
            MouseButton::Right => (minifb::MouseButton::Right, &mut self.right_down),
            MouseButton::Middle => (minifb::MouseButton::Middle, &mut self.middle_down),
        };
        let down = self.window.get_mouse_down(minifb_button);
        if down && !*was_down {
            if let Some((x, y)) = self.window.get_mouse_pos(MouseMode::Discard) {
                events.push(RawEvent::MouseButtonDown {
                    x: x as i32,
                    y: y as i32,
                    button,
                });
            }
        }
        *was_down = down;
    }
}

impl WindowBackend for MinifbWindow {
    fn is_open(&self) -> bool {
        self.window.is_open()
    }

    fn poll_events(&mut self) -> Vec<RawEvent> {
        let mut events = Vec::new();

        if !self.window.is_open() {
            events.push(RawEvent::Quit);
            return events;
        }

        for key in self.window.get_keys_pressed(KeyRepeat::No) {
            if let Some(key) = translate_key(key) {
                events.push(RawEvent::KeyDown(key));
            }
        }

        self.mouse_edge(MouseButton::Left, &mut events);
        self.mouse_edge(MouseButton::Right, &mut events);
        self.mouse_edge(MouseButton::Middle, &mut events);

        events
    }

    fn present(&mut self, buffer: &[u32], width: u32, height: u32) -> Result<(), ContextError> {
        self.window
            .update_with_buffer(buffer, width as usize, height as usize)
            .map_err(|e| ContextError::Present(e.to_string()))
    }

    fn set_title(&mut self, title: &str) {
        self.window.set_title(title);
    }
}

/// Classify a window-open failure: creation failures report as
/// [`ContextError::Window`], anything else as [`ContextError::Backend`].
fn open_error(e: minifb::Error) -> ContextError {
    match e {
        minifb::Error::WindowCreate(_) => ContextError::Window(e.to_string()),
        other => ContextError::Backend(other.to_string()),
    }
}

/// Translate a `minifb` key into the router's key symbol; keys outside the
/// supported set are dropped.
fn translate_key(key: minifb::Key) -> Option<Key> {
    use minifb::Key as M;
    let key = match key {
        M::A => Key::A, M::B => Key::B, M::C => Key::C, M::D => Key::D,
        M::E => Key::E, M::F => Key::F, M::G => Key::G, M::H => Key::H,
        M::I => Key::I, M::J => Key::J, M::K => Key::K, M::L => Key::L,
        M::M => Key::M, M::N => Key::N, M::O => Key::O, M::P => Key::P,
        M::Q => Key::Q, M::R => Key::R, M::S => Key::S, M::T => Key::T,
        M::U => Key::U, M::V => Key::V, M::W => Key::W, M::X => Key::X,
        M::Y => Key::Y, M::Z => Key::Z,
        M::Key0 => Key::Key0, M::Key1 => Key::Key1, M::Key2 => Key::Key2,
        M::Key3 => Key::Key3, M::Key4 => Key::Key4, M::Key5 => Key::Key5,
        M::Key6 => Key::Key6, M::Key7 => Key::Key7, M::Key8 => Key::Key8,
        M::Key9 => Key::Key9,
        M::Up => Key::Up,
        M::Down => Key::Down,
        M::Left => Key::Left,
        M::Right => Key::Right,
        M::Space => Key::Space,
        M::Enter => Key::Enter,
        M::Escape => Key::Escape,
        _ => return None,
    };
    Some(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_errors_map_to_their_failure_class() {
        let creation = open_error(minifb::Error::WindowCreate("no display".to_string()));
        assert!(matches!(creation, ContextError::Window(_)));

        let other = open_error(minifb::Error::MenusNotSupported);
        assert!(matches!(other, ContextError::Backend(_)));
    }

    #[test]
    fn unsupported_keys_are_dropped() {
        assert_eq!(translate_key(minifb::Key::Space), Some(Key::Space));
        assert_eq!(translate_key(minifb::Key::F1), None);
    }
}
