use glam::UVec2;

use crate::{config::AnimationConfig, types::SourceRect};

/// Maps a frame number to its place in a sprite sheet grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameIndex {
    columns: u32,
    frame_size: UVec2,
}

impl FrameIndex {
    /// `columns` above `u32::MAX` is clamped, configs with such grids fail validation
    pub fn new(columns: usize, frame_size: UVec2) -> Self {
        Self {
            columns: u32::try_from(columns).unwrap_or(u32::MAX),
            frame_size,
        }
    }

    pub fn from_config(config: &AnimationConfig) -> Self {
        Self::new(config.grid_columns, config.frame_size)
    }

    /// Top-left corner of `frame` inside the sheet.
    ///
    /// Frames are laid out row by row. `frame` must be below the frames per sheet,
    /// larger values point past the last row.
    pub fn coordinates_for(&self, frame: usize) -> UVec2 {
        let frame = frame as u32;
        UVec2::new(
            (frame % self.columns) * self.frame_size.x,
            (frame / self.columns) * self.frame_size.y,
        )
    }

    pub fn source_rect(&self, frame: usize) -> SourceRect {
        SourceRect {
            offset: self.coordinates_for(frame),
            size: self.frame_size,
        }
    }
}
