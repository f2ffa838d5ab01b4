//! Application configuration
//!
//! Serde-backed configuration for the whole app lifecycle: window, frame
//! timing, background color, input bindings, and the asset manifest. Configs
//! are buildable in code via `Default` plus struct update syntax, or loaded
//! from a TOML file.

use crate::foundation::math::Rect;
use crate::input::{InputBindings, Key};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid TOML
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Config contents fail validation
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title
    pub title: String,

    /// Window width in pixels
    pub width: u32,

    /// Window height in pixels
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "sprite2d".to_string(),
            width: 800,
            height: 600,
        }
    }
}

/// Frame timing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Target frame interval in milliseconds (~60 FPS by default)
    pub target_frame_interval_ms: u64,

    /// Quit automatically after this many milliseconds of wall-clock time;
    /// useful for non-interactive runs
    pub auto_quit_ms: Option<u64>,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            target_frame_interval_ms: 16,
            auto_quit_ms: None,
        }
    }
}

/// Input binding configuration; key names are parsed by [`Key::from_str`]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Key that quits the application
    pub cancel_key: String,

    /// Key that toggles pause
    pub toggle_key: String,

    /// Pause-toggle hit rectangle as `[x, y, w, h]`
    pub toggle_hit_rect: Option<[i32; 4]>,

    /// Key-name to image-name selection map
    pub image_keys: HashMap<String, String>,

    /// Image selected by any key without another binding
    pub fallback_image: Option<String>,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            cancel_key: "escape".to_string(),
            toggle_key: "space".to_string(),
            toggle_hit_rect: None,
            image_keys: HashMap::new(),
            fallback_image: None,
        }
    }
}

/// Top-level application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Window configuration
    pub window: WindowConfig,

    /// Frame timing configuration
    pub timing: TimingConfig,

    /// Background color as RGBA bytes
    pub background: [u8; 4],

    /// Input bindings
    pub input: InputConfig,

    /// Asset manifest: logical name to file path
    pub assets: HashMap<String, String>,
}

impl AppConfig {
    /// Load a configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate dimensions, timing, and key names
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "window size {}x{} has zero area",
                self.window.width, self.window.height
            )));
        }
        if self.timing.target_frame_interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "target frame interval must be at least 1 ms".to_string(),
            ));
        }

        let cancel = parse_key(&self.input.cancel_key)?;
        let toggle = parse_key(&self.input.toggle_key)?;
        if cancel == toggle {
            return Err(ConfigError::Invalid(format!(
                "cancel and toggle keys are both '{}'",
                self.input.cancel_key
            )));
        }
        for name in self.input.image_keys.keys() {
            parse_key(name)?;
        }

        Ok(())
    }

    /// Build router bindings from the input section.
    ///
    /// Fails on unparseable key names; [`AppConfig::validate`] reports the
    /// same problems up front.
    pub fn bindings(&self) -> Result<InputBindings, ConfigError> {
        let mut image_keys = HashMap::new();
        for (name, image) in &self.input.image_keys {
            image_keys.insert(parse_key(name)?, image.clone());
        }

        Ok(InputBindings {
            cancel_key: parse_key(&self.input.cancel_key)?,
            toggle_key: parse_key(&self.input.toggle_key)?,
            toggle_hit_rect: self
                .input
                .toggle_hit_rect
                .map(|[x, y, w, h]| Rect::new(x, y, w.unsigned_abs(), h.unsigned_abs())),
            image_keys,
            fallback_image: self.input.fallback_image.clone(),
        })
    }

    /// Asset manifest with paths as `PathBuf`
    pub fn asset_paths(&self) -> HashMap<String, PathBuf> {
        self.assets
            .iter()
            .map(|(key, path)| (key.clone(), PathBuf::from(path)))
            .collect()
    }

    /// Background color packed for the canvas
    pub fn background_pixel(&self) -> u32 {
        let [r, g, b, a] = self.background;
        crate::assets::image_loader::pack_rgba(r, g, b, a)
    }
}

fn parse_key(name: &str) -> Result<Key, ConfigError> {
    name.parse().map_err(ConfigError::Invalid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        AppConfig::default().validate().unwrap();
    }

    #[test]
    fn parses_a_full_toml_document() {
        let text = r#"
            background = [255, 255, 255, 255]

            [window]
            title = "Bounce"
            width = 800
            height = 600

            [timing]
            target_frame_interval_ms = 16
            auto_quit_ms = 3000

            [input]
            cancel_key = "escape"
            toggle_key = "space"
            toggle_hit_rect = [20, 540, 160, 40]
            fallback_image = "press"

            [input.image_keys]
            up = "up"
            down = "down"

            [assets]
            press = "assets/press.png"
            up = "assets/up.png"
        "#;

        let config: AppConfig = toml::from_str(text).unwrap();
        config.validate().unwrap();

        assert_eq!(config.window.title, "Bounce");
        assert_eq!(config.timing.auto_quit_ms, Some(3000));
        assert_eq!(config.assets.len(), 2);

        let bindings = config.bindings().unwrap();
        assert_eq!(bindings.cancel_key, Key::Escape);
        assert_eq!(bindings.toggle_hit_rect, Some(Rect::new(20, 540, 160, 40)));
        assert_eq!(bindings.image_keys.get(&Key::Up).map(String::as_str), Some("up"));
    }

    #[test]
    fn rejects_zero_sized_window() {
        let config = AppConfig {
            window: WindowConfig {
                width: 0,
                ..WindowConfig::default()
            },
            ..AppConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn rejects_conflicting_keys_and_bad_key_names() {
        let mut config = AppConfig::default();
        config.input.toggle_key = "escape".to_string();
        assert!(config.validate().is_err());

        config.input.toggle_key = "hyperspace".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn background_packs_to_canvas_format() {
        let config = AppConfig {
            background: [0xE6, 0x2A, 0x2A, 0xFF],
            ..AppConfig::default()
        };
        assert_eq!(config.background_pixel(), 0xFF_E6_2A_2A);
    }
}
