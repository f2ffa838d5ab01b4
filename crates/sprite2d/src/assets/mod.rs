//! Media loading and ownership
//!
//! [`MediaCache`] loads every entry of a name→path manifest at startup and
//! owns the decoded images for the program's lifetime. A failed load for one
//! entry never prevents attempting the others; the cache records which keys
//! failed so the caller can decide between aborting and running degraded.

pub mod image_loader;

pub use image_loader::ImageData;

use crate::foundation::handle::ResourceHandle;
use std::collections::HashMap;
use std::path::PathBuf;
use thiserror::Error;

/// Asset loading errors
#[derive(Error, Debug)]
pub enum AssetError {
    /// Lookup of a key that is absent or failed to load
    #[error("asset not found: {0}")]
    NotFound(String),

    /// One asset failed to open or decode
    #[error("failed to load asset '{source_id}': {reason}")]
    LoadFailed {
        /// Identifier of the source that failed (typically the file path)
        source_id: String,
        /// Diagnostic string from the decoder
        reason: String,
    },

    /// IO error during asset loading
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Cache of named images, created once at startup and released once at
/// shutdown.
pub struct MediaCache {
    entries: HashMap<String, ResourceHandle<ImageData>>,
    failed: Vec<String>,
    released: bool,
}

impl MediaCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            failed: Vec::new(),
            released: false,
        }
    }

    /// Load every entry of the manifest, continuing past failures.
    ///
    /// Returns the cache together with the list of keys whose sources failed
    /// to load (order unspecified). The same list stays queryable through
    /// [`MediaCache::failed_keys`].
    pub fn load_all(manifest: &HashMap<String, PathBuf>) -> (Self, Vec<String>) {
        let mut cache = Self::new();

        for (key, path) in manifest {
            match ImageData::from_file(path) {
                Ok(image) => {
                    cache
                        .entries
                        .insert(key.clone(), ResourceHandle::new(image, key.clone()));
                }
                Err(e) => {
                    log::warn!("skipping asset '{}': {}", key, e);
                    cache.failed.push(key.clone());
                }
            }
        }

        log::info!(
            "media cache loaded {} image(s), {} failure(s)",
            cache.entries.len(),
            cache.failed.len()
        );

        let failed = cache.failed.clone();
        (cache, failed)
    }

    /// Register an already-decoded image under a logical name.
    ///
    /// Useful for synthesized placeholder art and for tests.
    pub fn insert_image(&mut self, key: impl Into<String>, image: ImageData) {
        let key = key.into();
        self.entries
            .insert(key.clone(), ResourceHandle::new(image, key));
    }

    /// Look up an image by logical name.
    ///
    /// Returns [`AssetError::NotFound`] when the key is absent, failed to
    /// load, or was already released.
    pub fn get(&self, key: &str) -> Result<&ImageData, AssetError> {
        self.entries
            .get(key)
            .and_then(ResourceHandle::get)
            .ok_or_else(|| AssetError::NotFound(key.to_string()))
    }

    /// Keys whose sources failed to load
    pub fn failed_keys(&self) -> &[String] {
        &self.failed
    }

    /// Number of successfully loaded entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache holds no loaded entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether [`MediaCache::release_all`] has run
    pub fn is_released(&self) -> bool {
        self.released
    }

    /// Release every held image exactly once.
    ///
    /// Safe to call when some entries never loaded, and safe to call more
    /// than once.
    pub fn release_all(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        for handle in self.entries.values_mut() {
            handle.release();
        }
        log::debug!("media cache released {} image(s)", self.entries.len());
    }
}

impl Default for MediaCache {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for MediaCache {
    fn drop(&mut self) {
        self.release_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::fs;
    use std::path::Path;

    fn scratch_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("sprite2d-media-{}-{}", tag, std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn write_png(path: &Path) {
        image::RgbaImage::from_pixel(2, 2, image::Rgba([10, 20, 30, 255]))
            .save(path)
            .unwrap();
    }

    #[test]
    fn load_all_records_failures_and_keeps_siblings() {
        let dir = scratch_dir("loadall");
        let mut manifest = HashMap::new();
        for key in ["press", "up", "down"] {
            let path = dir.join(format!("{key}.png"));
            write_png(&path);
            manifest.insert(key.to_string(), path);
        }
        manifest.insert("left".to_string(), dir.join("missing-left.png"));
        manifest.insert("right".to_string(), dir.join("missing-right.png"));

        let (cache, failed) = MediaCache::load_all(&manifest);

        assert_eq!(cache.len(), 3);
        let failed: HashSet<_> = failed.into_iter().collect();
        let expected: HashSet<_> = ["left".to_string(), "right".to_string()].into();
        assert_eq!(failed, expected);

        assert!(cache.get("press").is_ok());
        assert!(matches!(cache.get("left"), Err(AssetError::NotFound(_))));

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn get_after_release_is_not_found() {
        let mut cache = MediaCache::new();
        cache.insert_image("press", ImageData::solid_color(2, 2, [0, 0, 0, 255]));
        assert!(cache.get("press").is_ok());

        cache.release_all();
        assert!(matches!(cache.get("press"), Err(AssetError::NotFound(_))));
    }

    #[test]
    fn release_all_is_idempotent_and_safe_when_partially_loaded() {
        let manifest: HashMap<String, PathBuf> =
            [("ghost".to_string(), PathBuf::from("/nonexistent/ghost.png"))].into();
        let (mut cache, failed) = MediaCache::load_all(&manifest);
        assert_eq!(failed, vec!["ghost".to_string()]);

        cache.release_all();
        cache.release_all();
        assert!(cache.is_released());
    }

    #[test]
    fn unknown_key_is_not_found() {
        let cache = MediaCache::new();
        let err = cache.get("nope").unwrap_err();
        assert!(matches!(err, AssetError::NotFound(k) if k == "nope"));
    }
}
