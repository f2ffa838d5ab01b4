//! # sprite2d
//!
//! A small 2D windowed-app framework built around the lifecycle every
//! interactive graphical demo re-implements ad hoc: acquire a window and a
//! renderer, load named image resources, run a fixed-rate event/render loop
//! over a little mutable state, and release everything deterministically on
//! exit.
//!
//! ## Features
//!
//! - **Deterministic teardown**: window, renderer, and images are owned by
//!   exactly-once-release handles; cleanup runs on every exit path
//! - **Typed failure classes**: initialization, asset loading, and lookup
//!   failures are distinct, so callers can abort, degrade, or skip a frame
//! - **Backend seam**: the windowing system sits behind a trait, keeping the
//!   loop testable without a display
//! - **Fixed-rate loop**: monotonic frame deltas and a cooperative throttle,
//!   no busy-spinning
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sprite2d::prelude::*;
//!
//! fn main() -> Result<(), EngineError> {
//!     let config = AppConfig::default();
//!     let mut engine = Engine::new(&config)?;
//!
//!     let mut state = AnimationState::new(Vec2::new(800.0, 600.0), Vec2::new(50.0, 50.0))
//!         .with_velocity(Vec2::new(300.0, 0.0));
//!
//!     engine.run(&mut state, &mut |context, _media, state| {
//!         let rect = Rect::new(state.position.x as i32, state.position.y as i32, 50, 50);
//!         context.fill_rect(&rect, sprite2d::assets::image_loader::pack_rgb(230, 42, 42));
//!     })
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod assets;
pub mod config;
pub mod foundation;
pub mod input;
pub mod render;
pub mod sim;

mod engine;

pub use engine::{DrawFn, Engine, EngineError};

/// Common imports for framework users
pub mod prelude {
    pub use crate::{
        assets::{AssetError, ImageData, MediaCache},
        config::{AppConfig, ConfigError, InputConfig, TimingConfig, WindowConfig},
        foundation::{
            math::{Rect, Vec2},
            time::{FrameLimiter, Timer},
        },
        input::{Command, InputBindings, InputRouter, Key, MouseButton, RawEvent},
        render::{ContextError, RenderContext, WindowBackend},
        sim::AnimationState,
        Engine, EngineError,
    };
}
