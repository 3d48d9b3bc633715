use std::{
    io::Cursor,
    sync::mpsc::{channel, Receiver, Sender},
};

use anyhow::Result;
use glam::UVec2;
use hashbrown::HashSet;
use image::{ImageFormat, RgbaImage};

use crate::{
    asset::{AssetReader, ResourceLoader},
    errors::Error,
    handle::{DropEvent, Handle},
    surface::Surface,
    types::SourceRect,
};

/// Loader whose sheets become ready only when a test says so
pub(crate) struct ManualLoader {
    next_id: u64,
    sender: Sender<DropEvent>,
    _receiver: Receiver<DropEvent>,
    ready: HashSet<usize>,
    pub requests: Vec<usize>,
}

impl ManualLoader {
    pub fn new() -> Self {
        let (sender, receiver) = channel();
        Self {
            next_id: 0,
            sender,
            _receiver: receiver,
            ready: HashSet::default(),
            requests: Vec::new(),
        }
    }

    /// Every sheet is ready the moment it is requested
    pub fn all_ready(count: usize) -> Self {
        let mut loader = Self::new();
        for index in 0..count {
            loader.set_ready(index);
        }
        loader
    }

    pub fn set_ready(&mut self, index: usize) {
        self.ready.insert(index);
    }
}

impl ResourceLoader for ManualLoader {
    fn request(&mut self, index: usize) -> Handle {
        self.requests.push(index);
        let id = self.next_id;
        self.next_id += 1;
        Handle::new(id, index, self.sender.clone())
    }

    fn is_ready(&self, handle: &Handle) -> bool {
        self.ready.contains(&handle.resource_index())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Draw {
    pub resource_index: usize,
    pub src: SourceRect,
    pub dst_size: UVec2,
}

#[derive(Default)]
pub(crate) struct RecordingSurface {
    pub draws: Vec<Draw>,
    pub progress: Vec<f32>,
    pub failures: Vec<Error>,
}

impl Surface for RecordingSurface {
    fn draw(&mut self, texture: &Handle, src: SourceRect, dst_size: UVec2) {
        self.draws.push(Draw {
            resource_index: texture.resource_index(),
            src,
            dst_size,
        });
    }

    fn set_progress_width(&mut self, percent: f32) {
        self.progress.push(percent);
    }

    fn load_failed(&mut self, err: &Error) {
        self.failures.push(err.clone());
    }
}

/// Serves a blank 640x360 PNG for every address not under `missing/`
pub(crate) struct MemoryReader;

impl AssetReader for MemoryReader {
    fn get_full_address(&self, address: &str) -> String {
        address.to_string()
    }

    async fn read<'a>(&'a self, address: &'a str) -> Result<Vec<u8>> {
        if address.starts_with("missing/") {
            anyhow::bail!("Not Found {address}");
        }
        let im = RgbaImage::new(640, 360);
        let mut buf = Cursor::new(Vec::new());
        im.write_to(&mut buf, ImageFormat::Png)?;
        Ok(buf.into_inner())
    }
}
