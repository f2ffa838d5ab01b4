//! Core frame loop implementation
//!
//! [`Engine`] owns the render context, the media cache, and the input router
//! for the program's lifetime, and drives the per-frame sequence:
//! poll → route → advance → draw → present → throttle, until Quit. Cleanup
//! runs on every exit path, normal or error.

use crate::assets::{AssetError, MediaCache};
use crate::config::{AppConfig, ConfigError};
use crate::foundation::time::{FrameLimiter, Timer};
use crate::input::{Command, InputRouter};
use crate::render::{ContextError, RenderContext};
use crate::sim::AnimationState;
use std::time::{Duration, Instant};
use thiserror::Error;

/// Engine-level errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// Window or renderer acquisition failed; fatal at startup
    #[error("initialization failed: {0}")]
    Init(#[from] ContextError),

    /// Asset loading failed in a context that requires the asset
    #[error("asset loading failed: {0}")]
    Asset(#[from] AssetError),

    /// Configuration was rejected
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A frame could not be presented
    #[error("rendering failed: {0}")]
    Render(ContextError),
}

/// Per-frame draw callback: renders the current state onto the context,
/// consulting the media cache for the selected image.
pub type DrawFn<'a> = dyn FnMut(&mut RenderContext, &MediaCache, &AnimationState) + 'a;

/// Main engine struct
///
/// The engine coordinates the display, media, and input subsystems and
/// drives the main loop.
pub struct Engine {
    context: RenderContext,
    media: MediaCache,
    router: InputRouter,
    timer: Timer,
    limiter: FrameLimiter,
    auto_quit: Option<Duration>,
    running: bool,
}

impl Engine {
    /// Create a new engine instance from a validated configuration.
    ///
    /// Asset failures are not fatal here: the cache continues past them and
    /// records the failed keys ([`Engine::media`] exposes them). Callers
    /// that require every asset check the failed set and decide.
    pub fn new(config: &AppConfig) -> Result<Self, EngineError> {
        config.validate()?;

        log::info!("initializing engine...");
        let context = RenderContext::create(
            &config.window.title,
            config.window.width,
            config.window.height,
            config.background_pixel(),
        )?;

        let (media, failed) = MediaCache::load_all(&config.asset_paths());
        if !failed.is_empty() {
            log::warn!("continuing without {} asset(s): {:?}", failed.len(), failed);
        }

        let router = InputRouter::new(config.bindings()?);

        Ok(Self::from_parts(context, media, router, config))
    }

    /// Assemble an engine from already-built subsystems.
    ///
    /// This is the seam for tests and headless runs, paired with
    /// [`RenderContext::from_backend`].
    pub fn from_parts(
        context: RenderContext,
        media: MediaCache,
        router: InputRouter,
        config: &AppConfig,
    ) -> Self {
        Self {
            context,
            media,
            router,
            timer: Timer::new(),
            limiter: FrameLimiter::from_millis(config.timing.target_frame_interval_ms),
            auto_quit: config.timing.auto_quit_ms.map(Duration::from_millis),
            running: true,
        }
    }

    /// The media cache
    pub fn media(&self) -> &MediaCache {
        &self.media
    }

    /// Mutable access to the media cache
    pub fn media_mut(&mut self) -> &mut MediaCache {
        &mut self.media
    }

    /// The render context
    pub fn context(&self) -> &RenderContext {
        &self.context
    }

    /// Mutable access to the render context
    pub fn context_mut(&mut self) -> &mut RenderContext {
        &mut self.context
    }

    /// Run the main loop until Quit, then tear everything down.
    ///
    /// The draw callback runs once per frame between `begin_frame` and
    /// `present`. Cleanup (media release, context destruction) runs no
    /// matter how the loop terminated.
    pub fn run(
        &mut self,
        state: &mut AnimationState,
        draw: &mut DrawFn<'_>,
    ) -> Result<(), EngineError> {
        log::info!("starting main loop...");
        let result = self.run_loop(state, draw);

        // Unified teardown on every exit path.
        self.media.release_all();
        self.context.destroy();
        log::info!(
            "engine shutdown complete after {} frame(s) in {:.2}s ({:.1} fps average)",
            self.timer.frame_count(),
            self.timer.total_time(),
            self.timer.average_fps()
        );

        result
    }

    fn run_loop(
        &mut self,
        state: &mut AnimationState,
        draw: &mut DrawFn<'_>,
    ) -> Result<(), EngineError> {
        let started = Instant::now();
        self.timer.reset();

        while self.running {
            let dt = self.timer.tick();

            let events = self.context.poll_events();
            let commands: Vec<Command> = self.router.route_all(events).collect();
            state.advance(commands, dt);

            // Quit stops the loop after this iteration; the frame in flight
            // still completes so resources wind down from a consistent state.
            if state.quit_requested() {
                log::info!("quit requested");
                self.running = false;
            }
            if let Some(deadline) = self.auto_quit {
                if started.elapsed() >= deadline {
                    log::info!("auto-quit deadline reached");
                    self.running = false;
                }
            }

            self.context.begin_frame();
            draw(&mut self.context, &self.media, state);
            self.context.present().map_err(EngineError::Render)?;

            self.limiter.wait();
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TimingConfig;
    use crate::foundation::math::Vec2;
    use crate::input::{InputBindings, RawEvent};
    use crate::render::tests::MockBackend;
    use std::cell::Cell;
    use std::rc::Rc;

    fn test_config(auto_quit_ms: Option<u64>) -> AppConfig {
        AppConfig {
            timing: TimingConfig {
                target_frame_interval_ms: 1,
                auto_quit_ms,
            },
            ..AppConfig::default()
        }
    }

    fn headless_engine(backend: MockBackend, config: &AppConfig) -> Engine {
        let context = RenderContext::from_backend(Box::new(backend), 64, 48, 0).unwrap();
        Engine::from_parts(
            context,
            MediaCache::new(),
            InputRouter::new(InputBindings::default()),
            config,
        )
    }

    #[test]
    fn quit_event_stops_the_loop_after_one_more_frame() {
        let mut backend = MockBackend::new();
        backend.queued.push(vec![RawEvent::Quit]);
        let presented = Rc::clone(&backend.presented);
        let released = Rc::clone(&backend.released);

        let config = test_config(None);
        let mut engine = headless_engine(backend, &config);
        let mut state = AnimationState::new(Vec2::new(64.0, 48.0), Vec2::new(8.0, 8.0));

        engine.run(&mut state, &mut |_, _, _| {}).unwrap();

        // The quitting iteration still rendered its frame.
        assert_eq!(presented.get(), 1);
        assert_eq!(released.get(), 1);
        assert!(engine.context().is_destroyed());
        assert!(engine.media().is_released());
    }

    #[test]
    fn auto_quit_deadline_terminates_a_headless_run() {
        let backend = MockBackend::new();
        let presented = Rc::clone(&backend.presented);

        let config = test_config(Some(5));
        let mut engine = headless_engine(backend, &config);
        let mut state = AnimationState::new(Vec2::new(64.0, 48.0), Vec2::new(8.0, 8.0))
            .with_velocity(Vec2::new(30.0, 0.0));

        engine.run(&mut state, &mut |_, _, _| {}).unwrap();

        assert!(presented.get() >= 1);
        assert!(engine.context().is_destroyed());
    }

    #[test]
    fn draw_callback_sees_cache_and_state_each_frame() {
        let mut backend = MockBackend::new();
        backend.queued.push(vec![RawEvent::Quit]);

        let config = test_config(None);
        let mut engine = headless_engine(backend, &config);
        engine.media_mut().insert_image(
            "press",
            crate::assets::ImageData::solid_color(4, 4, [1, 2, 3, 255]),
        );

        let mut state = AnimationState::new(Vec2::new(64.0, 48.0), Vec2::new(8.0, 8.0))
            .with_image("press");
        let frames = Rc::new(Cell::new(0u32));
        let seen = Rc::clone(&frames);

        engine
            .run(&mut state, &mut |context, media, state| {
                seen.set(seen.get() + 1);
                if let Some(key) = state.current_image.as_deref() {
                    if let Ok(image) = media.get(key) {
                        context.draw_image(image, None);
                    }
                }
            })
            .unwrap();

        assert_eq!(frames.get(), 1);
    }

    #[test]
    fn missing_image_key_does_not_crash_the_loop() {
        let mut backend = MockBackend::new();
        backend.queued.push(vec![RawEvent::Quit]);

        let config = test_config(None);
        let mut engine = headless_engine(backend, &config);
        let mut state = AnimationState::new(Vec2::new(64.0, 48.0), Vec2::new(8.0, 8.0))
            .with_image("ghost");

        let result = engine.run(&mut state, &mut |context, media, state| {
            if let Some(key) = state.current_image.as_deref() {
                match media.get(key) {
                    Ok(image) => context.draw_image(image, None),
                    Err(_) => {} // skip this frame's draw
                }
            }
        });

        assert!(result.is_ok());
    }
}
