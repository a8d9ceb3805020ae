// Central asset management with a background decoding thread

use super::{AssetError, AssetHandle, AssetId, AssetLoader, TextureHandle};
use crossbeam_channel::{unbounded, Receiver, Sender};
use image::RgbaImage;
use std::collections::HashMap;
use std::path::Path;
use std::thread::JoinHandle;

/// Loading state of a requested asset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoadState {
    Pending,
    Ready,
    Failed,
}

/// A decoded image handed back to the main thread for upload
#[derive(Debug)]
pub struct LoadedTexture {
    pub handle: TextureHandle,
    pub name: String,
    pub image: RgbaImage,
}

enum LoadRequest {
    Texture { id: AssetId, name: String },
    Shutdown,
}

enum LoadResult {
    Loaded(LoadedTexture),
    Failed {
        id: AssetId,
        name: String,
        error: AssetError,
    },
}

/// Central asset manager for the game
///
/// Requests are queued to a loader thread; finished images are collected with
/// [`AssetManager::poll_loaded`] once per frame.
pub struct AssetManager {
    tx_request: Sender<LoadRequest>,
    rx_result: Receiver<LoadResult>,
    worker: Option<JoinHandle<()>>,

    /// Path to handle mapping, so repeated requests share one load
    requested: HashMap<String, TextureHandle>,

    states: HashMap<AssetId, LoadState>,
}

impl AssetManager {
    /// Create a new asset manager rooted at `asset_path` and start its loader thread
    pub fn new<P: AsRef<Path>>(asset_path: P) -> Self {
        let loader = AssetLoader::new(asset_path);
        let (tx_request, rx_request) = unbounded::<LoadRequest>();
        let (tx_result, rx_result) = unbounded::<LoadResult>();

        log::info!("Asset loader rooted at {}", loader.base_path().display());
        let worker = std::thread::Builder::new()
            .name("asset-loader".to_string())
            .spawn(move || loader_thread(loader, rx_request, tx_result))
            .map_err(|e| log::error!("Failed to start asset loader thread: {}", e))
            .ok();

        Self {
            tx_request,
            rx_result,
            worker,
            requested: HashMap::new(),
            states: HashMap::new(),
        }
    }

    /// Request a texture, returning its handle immediately
    pub fn request_texture(&mut self, name: &str) -> TextureHandle {
        if let Some(&handle) = self.requested.get(name) {
            return handle;
        }

        let handle: TextureHandle = AssetHandle::from_path(name);
        self.requested.insert(name.to_string(), handle);

        let request = LoadRequest::Texture {
            id: handle.id(),
            name: name.to_string(),
        };
        if self.worker.is_some() && self.tx_request.send(request).is_ok() {
            self.states.insert(handle.id(), LoadState::Pending);
        } else {
            log::warn!("{}: {}", name, AssetError::LoaderStopped);
            self.states.insert(handle.id(), LoadState::Failed);
        }

        handle
    }

    /// Collect every image decoded since the last call, without blocking
    pub fn poll_loaded(&mut self) -> Vec<LoadedTexture> {
        let mut loaded = Vec::new();

        while let Ok(result) = self.rx_result.try_recv() {
            match result {
                LoadResult::Loaded(texture) => {
                    log::debug!(
                        "Loaded {} ({}x{})",
                        texture.name,
                        texture.image.width(),
                        texture.image.height()
                    );
                    self.states.insert(texture.handle.id(), LoadState::Ready);
                    loaded.push(texture);
                }
                LoadResult::Failed { id, name, error } => {
                    log::warn!("Could not load {}: {}", name, error);
                    self.states.insert(id, LoadState::Failed);
                }
            }
        }

        loaded
    }

    /// Number of requests still waiting on the loader thread
    pub fn pending_count(&self) -> usize {
        self.states
            .values()
            .filter(|state| **state == LoadState::Pending)
            .count()
    }
}

impl Drop for AssetManager {
    fn drop(&mut self) {
        if let Some(worker) = self.worker.take() {
            let _ = self.tx_request.send(LoadRequest::Shutdown);
            let _ = worker.join();
        }
    }
}

fn loader_thread(loader: AssetLoader, rx: Receiver<LoadRequest>, tx: Sender<LoadResult>) {
    for request in rx.iter() {
        let result = match request {
            LoadRequest::Shutdown => break,
            LoadRequest::Texture { id, name } => match loader.load_image(&name) {
                Ok(image) => LoadResult::Loaded(LoadedTexture {
                    handle: AssetHandle::new(id),
                    name,
                    image,
                }),
                Err(error) => LoadResult::Failed { id, name, error },
            },
        };

        // Receiver gone means the manager is shutting down
        if tx.send(result).is_err() {
            break;
        }
    }
}
