use hashbrown::HashMap;
use std::{
    mem,
    sync::mpsc::{channel, Receiver, Sender},
};

use anyhow::Result;
use glam::UVec2;
use io::get_default_reader;

pub use io::{AssetReader, BoxedFuture, ErasedAssetReader};

#[cfg(not(target_arch = "wasm32"))]
pub use io::FileAssetReader;
#[cfg(target_arch = "wasm32")]
pub use io::WebAssetReader;

use crate::{
    config::AnimationConfig,
    handle::{DropEvent, Handle, HandleId},
    resource::ResourceDescriptor,
};

mod io;

/// Issues sheet requests and answers whether a request is usable yet
pub trait ResourceLoader {
    /// Start loading sheet `index` and return a handle to it
    fn request(&mut self, index: usize) -> Handle;
    /// Non-blocking readiness check
    fn is_ready(&self, handle: &Handle) -> bool;
}

/// Decoded sprite sheet, RGBA8 pixels
#[derive(Clone)]
pub struct Texture {
    pub size: UVec2,
    pub data: Vec<u8>,
}

impl std::fmt::Debug for Texture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Texture").field("size", &self.size).finish()
    }
}

#[derive(Debug, Clone)]
pub enum AssetState {
    Loading,
    Ready(Texture),
    /// Read or decode failed, never becomes ready
    Failed,
}

pub(crate) struct PendingTask {
    pub id: HandleId,
    pub address: String,
}

/// Loads sheets through an [`ErasedAssetReader`].
///
/// Requests are queued and read when the host awaits [`AssetLoader::fetch`].
pub struct AssetLoader {
    reader: Box<dyn ErasedAssetReader>,
    descriptor: ResourceDescriptor,
    pending: Vec<PendingTask>,
    asset_id: u64,
    receiver: Receiver<DropEvent>,
    sender: Sender<DropEvent>,
    assets: HashMap<HandleId, AssetState>,
    cache: Option<HashMap<usize, Handle>>,
}

impl AssetLoader {
    pub fn new(config: &AnimationConfig) -> Self {
        Self::with_reader(get_default_reader(""), config)
    }

    pub fn with_reader(reader: Box<dyn ErasedAssetReader>, config: &AnimationConfig) -> Self {
        let (sender, receiver) = channel();
        Self {
            reader,
            descriptor: ResourceDescriptor::from_config(config),
            pending: Vec::default(),
            asset_id: 0,
            sender,
            receiver,
            assets: Default::default(),
            cache: config.cache_resources.then(HashMap::default),
        }
    }

    fn alloc_handle(&mut self, index: usize) -> Handle {
        let id = self.asset_id;
        self.asset_id += 1;
        let drop_sender = self.sender.clone();
        Handle::new(id, index, drop_sender)
    }

    pub fn state(&self, handle: &Handle) -> Option<&AssetState> {
        self.assets.get(&handle.id())
    }

    pub fn texture(&self, handle: &Handle) -> Option<&Texture> {
        match self.state(handle)? {
            AssetState::Ready(texture) => Some(texture),
            _ => None,
        }
    }

    /// Number of sheets held, loading or loaded
    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Release every cached sheet
    pub fn clear_cache(&mut self) {
        if let Some(cache) = self.cache.as_mut() {
            cache.clear();
        }
    }

    fn remove_dropped(&mut self) {
        while let Ok(event) = self.receiver.try_recv() {
            if self.assets.remove(&event.0).is_some() {
                log::debug!("Discard sheet {}", event.0);
            }
        }
    }

    async fn load_task(&self, task: &PendingTask) -> Result<Texture> {
        let bytes = self.reader.read(&task.address).await?;
        let im = image::load_from_memory(&bytes)?;
        let size = UVec2::new(im.width(), im.height());
        let data = im.into_rgba8().into_raw();
        Ok(Texture { size, data })
    }

    /// Read every queued request.
    ///
    /// Returns the number of sheets that became ready. Failed sheets are logged and
    /// stay unready.
    ///
    /// Nothing reads sheets in the background: the host awaits this once per
    /// round, before [`PlaybackController::update`]. `App::run_block` does so on
    /// native targets. On wasm the host owns the loop: keep the controller in an
    /// `Rc<RefCell<_>>` and, from each `requestAnimationFrame` callback, run the
    /// fetch and the update inside `wasm_bindgen_futures::spawn_local`.
    ///
    /// ```
    /// use frameplay::prelude::*;
    /// use glam::UVec2;
    ///
    /// struct Sink;
    ///
    /// impl Surface for Sink {
    ///     fn draw(&mut self, _: &Handle, _: SourceRect, _: UVec2) {}
    ///     fn set_progress_width(&mut self, _: f32) {}
    /// }
    ///
    /// # fn main() -> Result<()> {
    /// let config = AnimationConfig::default().base_address("sheets/");
    /// let loader = AssetLoader::new(&config);
    /// let mut player = PlaybackController::new(config, loader, Sink)?;
    /// player.start();
    /// assert_eq!(player.loader().pending(), 1);
    ///
    /// // one round of the host loop
    /// pollster::block_on(player.loader_mut().fetch());
    /// player.update(16);
    /// assert_eq!(player.loader().pending(), 0);
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// [`PlaybackController::update`]: crate::controller::PlaybackController::update
    pub async fn fetch(&mut self) -> usize {
        // remove dropped assets
        self.remove_dropped();
        let pending = mem::take(&mut self.pending);
        let mut ready = 0;
        for task in pending {
            if !self.assets.contains_key(&task.id) {
                // released before it was read
                continue;
            }
            let state = match self.load_task(&task).await {
                Ok(texture) => {
                    log::debug!("Loaded {} {:?}", task.address, texture.size);
                    ready += 1;
                    AssetState::Ready(texture)
                }
                Err(err) => {
                    log::error!("Failed to load {}: {err:#}", task.address);
                    AssetState::Failed
                }
            };
            self.assets.insert(task.id, state);
        }
        self.remove_dropped();
        ready
    }
}

impl ResourceLoader for AssetLoader {
    fn request(&mut self, index: usize) -> Handle {
        debug_assert!(
            index < self.descriptor.count(),
            "resource index {index} out of range"
        );
        if let Some(handle) = self.cache.as_ref().and_then(|c| c.get(&index)) {
            if !matches!(self.assets.get(&handle.id()), Some(AssetState::Failed)) {
                return handle.clone();
            }
        }
        let handle = self.alloc_handle(index);
        let address = self.descriptor.address_for(index);
        self.assets.insert(handle.id(), AssetState::Loading);
        self.pending.push(PendingTask {
            id: handle.id(),
            address,
        });
        if self.pending.len() > 4096 {
            log::warn!("Too many pending sheets");
        }
        if let Some(cache) = self.cache.as_mut() {
            cache.insert(index, handle.clone());
        }
        handle
    }

    fn is_ready(&self, handle: &Handle) -> bool {
        matches!(self.state(handle), Some(AssetState::Ready(_)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MemoryReader;

    fn loader(config: &AnimationConfig) -> AssetLoader {
        AssetLoader::with_reader(Box::new(MemoryReader), config)
    }

    #[test]
    fn test_ready_after_fetch() {
        let config = AnimationConfig::default().base_address("sheets/");
        let mut loader = loader(&config);
        let handle = loader.request(0);
        assert!(!loader.is_ready(&handle));
        assert_eq!(pollster::block_on(loader.fetch()), 1);
        assert!(loader.is_ready(&handle));
        assert_eq!(loader.texture(&handle).unwrap().size, UVec2::new(640, 360));
        assert_eq!(loader.texture(&handle).unwrap().data.len(), 640 * 360 * 4);
    }

    #[test]
    fn test_every_request_is_fresh_without_cache() {
        let config = AnimationConfig::default().base_address("sheets/");
        let mut loader = loader(&config);
        let first = loader.request(0);
        let second = loader.request(0);
        assert_ne!(first, second);
        assert_eq!(loader.pending(), 2);
    }

    #[test]
    fn test_failed_load_never_ready() {
        let config = AnimationConfig::default().base_address("missing/");
        let mut loader = loader(&config);
        let handle = loader.request(1);
        assert_eq!(pollster::block_on(loader.fetch()), 0);
        assert!(!loader.is_ready(&handle));
        assert!(matches!(loader.state(&handle), Some(AssetState::Failed)));
    }

    #[test]
    fn test_dropped_handle_is_discarded() {
        let config = AnimationConfig::default().base_address("sheets/");
        let mut loader = loader(&config);
        let kept = loader.request(0);
        let released = loader.request(1);
        drop(released);
        pollster::block_on(loader.fetch());
        assert_eq!(loader.len(), 1);
        assert!(loader.is_ready(&kept));
        drop(kept);
        pollster::block_on(loader.fetch());
        assert!(loader.is_empty());
    }

    #[test]
    fn test_cache_reuses_handle() {
        let config = AnimationConfig::default()
            .base_address("sheets/")
            .cache_resources(true);
        let mut loader = loader(&config);
        let first = loader.request(3);
        pollster::block_on(loader.fetch());
        let second = loader.request(3);
        assert_eq!(first, second);
        assert!(loader.is_ready(&second));
        assert_eq!(loader.pending(), 0);

        drop(first);
        drop(second);
        loader.clear_cache();
        pollster::block_on(loader.fetch());
        assert!(loader.is_empty());
    }
}
