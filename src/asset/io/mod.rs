use std::{future::Future, pin::Pin};

use anyhow::Result;

#[cfg(not(target_arch = "wasm32"))]
mod file;
#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileAssetReader;
#[cfg(target_arch = "wasm32")]
pub use web::WebAssetReader;

/// Transport that turns a sheet address into bytes
pub trait AssetReader: Send + Sync + 'static {
    fn get_full_address(&self, address: &str) -> String;
    async fn read<'a>(&'a self, address: &'a str) -> Result<Vec<u8>>;
}

pub type BoxedFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// From bevy https://github.com/bevyengine/bevy/blob/main/crates/bevy_asset/src/io/mod.rs#L186
/// Equivalent to AssetReader, but nessacery for trait object safe
pub trait ErasedAssetReader: Send + Sync + 'static {
    /// Returns a future to load the full data at the provided address.
    fn read<'a>(&'a self, address: &'a str) -> BoxedFuture<'a, Result<Vec<u8>>>;
}

impl<T: AssetReader> ErasedAssetReader for T {
    fn read<'a>(&'a self, address: &'a str) -> BoxedFuture<'a, Result<Vec<u8>>> {
        Box::pin(async {
            let buf = AssetReader::read(self, address).await?;
            Ok(buf)
        })
    }
}

pub(crate) fn get_default_reader(root: &str) -> Box<dyn ErasedAssetReader> {
    #[cfg(not(target_arch = "wasm32"))]
    return Box::new(file::FileAssetReader::new(root));
    #[cfg(target_arch = "wasm32")]
    return Box::new(web::WebAssetReader::new(root));
}
