// Asset loading functionality

use super::AssetError;
use image::RgbaImage;
use std::path::{Path, PathBuf};

/// Finds asset files under a base directory and decodes them
#[derive(Debug, Clone)]
pub struct AssetLoader {
    base_path: PathBuf,
}

impl AssetLoader {
    /// Create a new asset loader with the given base path
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// Get the full path for an asset
    pub fn resolve_path(&self, name: &str) -> PathBuf {
        self.base_path.join(name)
    }

    /// Load asset bytes from disk
    pub fn load_bytes(&self, name: &str) -> Result<Vec<u8>, AssetError> {
        let path = self.resolve_path(name);

        if !path.exists() {
            return Err(AssetError::NotFound(path.to_string_lossy().to_string()));
        }

        Ok(std::fs::read(&path)?)
    }

    /// Load and decode an image into RGBA8 pixels
    pub fn load_image(&self, name: &str) -> Result<RgbaImage, AssetError> {
        let bytes = self.load_bytes(name)?;
        let image = image::load_from_memory(&bytes).map_err(|source| AssetError::Decode {
            name: name.to_string(),
            source,
        })?;
        Ok(image.to_rgba8())
    }

    /// Get the base path
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "samurai-duel-loader-{}-{}",
            tag,
            std::process::id()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_loader_path_resolution() {
        let loader = AssetLoader::new("/game/assets");
        let path = loader.resolve_path("img/shop.png");
        assert_eq!(path, PathBuf::from("/game/assets/img/shop.png"));
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let loader = AssetLoader::new(scratch_dir("missing"));
        let err = loader.load_bytes("nope.png").unwrap_err();
        assert!(matches!(err, AssetError::NotFound(_)));
    }

    #[test]
    fn test_load_image_decodes_png() {
        let dir = scratch_dir("png");
        RgbaImage::new(12, 4).save(dir.join("strip.png")).unwrap();

        let loader = AssetLoader::new(&dir);
        let image = loader.load_image("strip.png").unwrap();
        assert_eq!(image.dimensions(), (12, 4));
    }

    #[test]
    fn test_garbage_bytes_fail_to_decode() {
        let dir = scratch_dir("garbage");
        std::fs::write(dir.join("broken.png"), b"definitely not a png").unwrap();

        let loader = AssetLoader::new(&dir);
        let err = loader.load_image("broken.png").unwrap_err();
        assert!(matches!(err, AssetError::Decode { .. }));
    }
}
