use super::AssetReader;
use std::{env, fs, path::PathBuf};

use anyhow::{Context, Result};

/// Copy from bevy <https://github.com/bevyengine/bevy/blob/99ab0285e459753838d0e0716fda9be7b4976a4c/crates/bevy_asset/src/io/file/mod.rs#L18>
fn get_base_path() -> PathBuf {
    if let Ok(asset_root) = env::var("FRAMEPLAY_ASSET_ROOT") {
        PathBuf::from(asset_root)
    } else if let Ok(manifest_dir) = env::var("CARGO_MANIFEST_DIR") {
        PathBuf::from(manifest_dir)
    } else {
        env::current_exe()
            .ok()
            .and_then(|path| path.parent().map(ToOwned::to_owned))
            .unwrap_or_default()
    }
}

/// Reads sheets from the local filesystem, addresses are paths under the root
pub struct FileAssetReader {
    root_path: PathBuf,
}

impl FileAssetReader {
    pub fn new(root: &str) -> Self {
        let root_path = get_base_path().join(root);
        Self { root_path }
    }
}

impl AssetReader for FileAssetReader {
    fn get_full_address(&self, address: &str) -> String {
        self.root_path.join(address).to_string_lossy().into_owned()
    }

    async fn read<'a>(&'a self, address: &'a str) -> Result<Vec<u8>> {
        let path = self.get_full_address(address);
        fs::read(&path).with_context(|| format!("Failed to read {path}"))
    }
}
