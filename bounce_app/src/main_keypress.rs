//! Key-press image-switching demo
//!
//! Loads five named images ("press" plus the four directions) and shows the
//! one matching the last arrow key pressed; any other key returns to the
//! default. Escape or closing the window quits.
//!
//! This demo takes the strict asset policy: if any required image fails to
//! load it reports the failed set and exits with code 2, the way the
//! source material aborts when its media is missing. Pass a TOML config
//! path as the first argument to override the defaults.

use sprite2d::prelude::*;
use std::process::ExitCode;

const IMAGE_KEYS: [&str; 5] = ["press", "up", "down", "left", "right"];

fn build_config() -> Result<AppConfig, ConfigError> {
    if let Some(path) = std::env::args().nth(1) {
        return AppConfig::from_file(path);
    }

    let mut config = AppConfig {
        window: WindowConfig {
            title: "Key Press Demo".to_string(),
            width: 640,
            height: 480,
        },
        ..AppConfig::default()
    };
    for key in IMAGE_KEYS {
        config.assets.insert(key.to_string(), format!("assets/{key}.bmp"));
    }
    for key in ["up", "down", "left", "right"] {
        config.input.image_keys.insert(key.to_string(), key.to_string());
    }
    config.input.fallback_image = Some("press".to_string());
    Ok(config)
}

fn run() -> Result<(), EngineError> {
    let config = build_config()?;
    let mut engine = Engine::new(&config)?;

    // Strict policy: every image in the manifest is required.
    if let Some(key) = engine.media().failed_keys().first() {
        let path = config.assets.get(key).cloned().unwrap_or_default();
        return Err(EngineError::Asset(AssetError::LoadFailed {
            source_id: path,
            reason: format!(
                "required image '{key}' missing ({} of {} failed)",
                engine.media().failed_keys().len(),
                config.assets.len()
            ),
        }));
    }

    let (width, height) = engine.context().size();
    let mut state = AnimationState::new(
        Vec2::new(width as f32, height as f32),
        Vec2::new(width as f32, height as f32),
    )
    .with_image("press");

    engine.run(&mut state, &mut |context, media, state| {
        let Some(key) = state.current_image.as_deref() else {
            return;
        };
        match media.get(key).or_else(|_| media.get("press")) {
            Ok(image) => context.draw_image(image, None),
            Err(e) => log::debug!("skipping frame draw: {e}"),
        }
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
