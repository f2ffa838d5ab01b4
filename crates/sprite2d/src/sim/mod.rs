//! Animation state
//!
//! The mutable simulation state advanced once per frame: a moving object's
//! position and velocity inside the drawable bounds, the pause flag, and the
//! currently selected image. Commands are applied before the physics step;
//! while paused, elapsed time is never banked and later replayed.

use crate::foundation::math::Vec2;
use crate::input::Command;

/// Per-frame mutable simulation state
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationState {
    /// Top-left position of the object in pixels
    pub position: Vec2,
    /// Velocity in pixels per second
    pub velocity: Vec2,
    /// Whether the physics step is suspended
    pub paused: bool,
    /// Logical name of the image to draw, if any
    pub current_image: Option<String>,
    /// Object extent (width, height) in pixels
    pub extent: Vec2,
    /// Drawable bounds (width, height) in pixels
    pub bounds: Vec2,
    quit: bool,
}

impl AnimationState {
    /// Create a state for an object of `extent` centered in `bounds`,
    /// at rest and running.
    pub fn new(bounds: Vec2, extent: Vec2) -> Self {
        Self {
            position: (bounds - extent) / 2.0,
            velocity: Vec2::zeros(),
            paused: false,
            current_image: None,
            extent,
            bounds,
            quit: false,
        }
    }

    /// Set the initial position
    pub fn with_position(mut self, position: Vec2) -> Self {
        self.position = position;
        self
    }

    /// Set the initial velocity
    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    /// Set the initially selected image
    pub fn with_image(mut self, key: impl Into<String>) -> Self {
        self.current_image = Some(key.into());
        self
    }

    /// Whether a Quit command has been observed.
    ///
    /// Quit is not a state of the animation; it is a terminal instruction
    /// surfaced here for the frame loop to observe.
    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    /// Apply this frame's commands, then integrate `dt` seconds of motion.
    ///
    /// All commands are applied before the physics step. The physics step is
    /// skipped entirely while paused. Boundary handling is a perfectly
    /// elastic bounce: per axis, positions past a bound are clamped to it
    /// and that axis's velocity is negated. No sub-frame collision time
    /// correction is attempted.
    pub fn advance<I>(&mut self, commands: I, dt: f32)
    where
        I: IntoIterator<Item = Command>,
    {
        for command in commands {
            match command {
                Command::Quit => self.quit = true,
                Command::TogglePause => {
                    self.paused = !self.paused;
                    log::debug!(
                        "animation {}",
                        if self.paused { "paused" } else { "resumed" }
                    );
                }
                Command::SetImage(key) => self.current_image = Some(key),
            }
        }

        if self.paused {
            return;
        }

        self.position += self.velocity * dt;
        self.bounce_axis(0);
        self.bounce_axis(1);
    }

    fn bounce_axis(&mut self, axis: usize) {
        let max = (self.bounds[axis] - self.extent[axis]).max(0.0);
        if self.position[axis] < 0.0 {
            self.position[axis] = 0.0;
            self.velocity[axis] = -self.velocity[axis];
        } else if self.position[axis] > max {
            self.position[axis] = max;
            self.velocity[axis] = -self.velocity[axis];
        }
    }
}
