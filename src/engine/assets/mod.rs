// Asset management
//
// Images are requested by path and decoded on a background thread. A handle
// is returned immediately, so callers can hold on to it and draw with it
// long before the pixels arrive. Drawing with a handle whose image has not
// landed yet simply draws nothing.

mod handle;
mod loader;
mod manager;

pub use handle::{AssetHandle, AssetId, TextureAsset, TextureHandle};
pub use loader::AssetLoader;
pub use manager::{AssetManager, LoadedTexture};

/// Asset loading errors
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("Asset not found: {0}")]
    NotFound(String),

    #[error("Failed to decode {name}: {source}")]
    Decode {
        name: String,
        #[source]
        source: image::ImageError,
    },

    #[error("Asset loader is not running")]
    LoaderStopped,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
