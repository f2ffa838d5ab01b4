//! Bouncing-square demo
//!
//! A red square travels horizontally across a white 800x600 window and
//! bounces off the left and right edges. Space, or a click on the button in
//! the lower-left corner, pauses and resumes the animation; Escape or
//! closing the window quits. The window title tracks the running/paused
//! state.
//!
//! Pass a TOML config path as the first argument to override the defaults.

use sprite2d::assets::image_loader::pack_rgb;
use sprite2d::prelude::*;
use std::process::ExitCode;

const SQUARE: u32 = 50;
const SPEED: f32 = 300.0;
const BUTTON: [i32; 4] = [20, 540, 160, 40];

fn build_config() -> Result<AppConfig, ConfigError> {
    if let Some(path) = std::env::args().nth(1) {
        return AppConfig::from_file(path);
    }

    let mut config = AppConfig {
        window: WindowConfig {
            title: "Bounce - Running".to_string(),
            width: 800,
            height: 600,
        },
        background: [255, 255, 255, 255],
        ..AppConfig::default()
    };
    config.input.toggle_hit_rect = Some(BUTTON);
    Ok(config)
}

fn run() -> Result<(), EngineError> {
    let config = build_config()?;
    let mut engine = Engine::new(&config)?;

    let (width, height) = engine.context().size();
    let bounds = Vec2::new(width as f32, height as f32);
    let mut state = AnimationState::new(bounds, Vec2::new(SQUARE as f32, SQUARE as f32))
        .with_velocity(Vec2::new(SPEED, 0.0));

    let button = config
        .bindings()?
        .toggle_hit_rect
        .unwrap_or(Rect::new(BUTTON[0], BUTTON[1], BUTTON[2] as u32, BUTTON[3] as u32));
    let mut was_paused = state.paused;

    engine.run(&mut state, &mut |context, _media, state| {
        if state.paused != was_paused {
            was_paused = state.paused;
            context.set_title(if state.paused {
                "Bounce - Paused"
            } else {
                "Bounce - Running"
            });
        }

        // The moving square (red)
        let square = Rect::new(
            state.position.x as i32,
            state.position.y as i32,
            SQUARE,
            SQUARE,
        );
        context.fill_rect(&square, pack_rgb(0xE6, 0x2A, 0x2A));

        // The toggle button: green means "resume", red means "pause"
        let fill = if state.paused {
            pack_rgb(0x2E, 0xCC, 0x71)
        } else {
            pack_rgb(0xE7, 0x4C, 0x3C)
        };
        context.fill_rect(&button, fill);
        context.draw_rect(&button, pack_rgb(0x33, 0x33, 0x33));
    })
}

fn main() -> ExitCode {
    sprite2d::foundation::logging::init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            match e {
                EngineError::Asset(_) => ExitCode::from(2),
                _ => ExitCode::from(1),
            }
        }
    }
}
