//! Animation configuration.
//!
//! Every field has a default matching the stock 7 sheet, 5x5 grid animation, so a
//! JSON file only needs to name what it overrides.

use std::{fs, path::Path};

use anyhow::Result;
use glam::UVec2;
use serde::{Deserialize, Serialize};

use crate::errors::Error;

pub const DEFAULT_BASE_ADDRESS: &str = "http://storage.googleapis.com/alyo/assignments/images/";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Number of sprite sheets in the animation
    pub resource_count: usize,
    /// Frames inside one sheet, must equal `grid_columns * grid_rows`
    pub frames_per_resource: usize,
    pub grid_columns: usize,
    pub grid_rows: usize,
    /// Size of a single frame inside the sheet
    pub frame_size: UVec2,
    /// Size of the surface a frame is drawn onto
    pub output_size: UVec2,
    pub tick_interval_ms: u64,
    pub poll_interval_ms: u64,
    /// Sheets are addressed as `base_address + index + ".jpg"`
    pub base_address: String,
    /// Give up waiting for a sheet after this long, `None` waits forever
    pub load_timeout_ms: Option<u64>,
    /// Reuse a loaded sheet when playback returns to its index
    pub cache_resources: bool,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            resource_count: 7,
            frames_per_resource: 25,
            grid_columns: 5,
            grid_rows: 5,
            frame_size: UVec2::new(128, 72),
            output_size: UVec2::new(640, 360),
            tick_interval_ms: 100,
            poll_interval_ms: 3,
            base_address: DEFAULT_BASE_ADDRESS.to_string(),
            load_timeout_ms: None,
            cache_resources: false,
        }
    }
}

impl AnimationConfig {
    pub fn base_address(mut self, base_address: impl Into<String>) -> Self {
        self.base_address = base_address.into();
        self
    }

    pub fn load_timeout_ms(mut self, timeout: Option<u64>) -> Self {
        self.load_timeout_ms = timeout;
        self
    }

    pub fn cache_resources(mut self, cache: bool) -> Self {
        self.cache_resources = cache;
        self
    }

    pub fn grid(mut self, columns: usize, rows: usize) -> Self {
        self.grid_columns = columns;
        self.grid_rows = rows;
        self.frames_per_resource = columns.saturating_mul(rows);
        self
    }

    pub fn resource_count(mut self, count: usize) -> Self {
        self.resource_count = count;
        self
    }

    /// Total frames in one full cycle
    pub fn total_frames(&self) -> usize {
        self.resource_count.saturating_mul(self.frames_per_resource)
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.resource_count == 0 {
            return Err(Error::InvalidConfig("resource_count must be positive"));
        }
        let invalid_grid = Error::InvalidGrid {
            frames: self.frames_per_resource,
            columns: self.grid_columns,
            rows: self.grid_rows,
        };
        let cells = self.grid_columns.checked_mul(self.grid_rows);
        if self.frames_per_resource == 0 || cells != Some(self.frames_per_resource) {
            return Err(invalid_grid);
        }
        if self
            .resource_count
            .checked_mul(self.frames_per_resource)
            .is_none()
        {
            return Err(Error::InvalidConfig("too many frames in one cycle"));
        }
        if self.tick_interval_ms == 0 || self.poll_interval_ms == 0 {
            return Err(Error::InvalidConfig("timer intervals must be positive"));
        }
        if self.frame_size.x == 0 || self.frame_size.y == 0 {
            return Err(Error::InvalidConfig("frame size must be positive"));
        }
        // the whole sheet must be addressable in u32 pixels
        let sheet_width = u32::try_from(self.grid_columns)
            .ok()
            .and_then(|columns| columns.checked_mul(self.frame_size.x));
        let sheet_height = u32::try_from(self.grid_rows)
            .ok()
            .and_then(|rows| rows.checked_mul(self.frame_size.y));
        if sheet_width.is_none() || sheet_height.is_none() {
            return Err(Error::InvalidConfig("sheet size overflows u32 pixels"));
        }
        Ok(())
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }
}
