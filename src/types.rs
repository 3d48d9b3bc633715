use glam::UVec2;

/// Playback position: which resource and which frame inside it
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub resource_index: usize,
    pub frame_in_resource: usize,
}

impl Position {
    pub fn new(resource_index: usize, frame_in_resource: usize) -> Self {
        Self {
            resource_index,
            frame_in_resource,
        }
    }
}

/// Sub-rectangle of a sprite sheet
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SourceRect {
    pub offset: UVec2,
    pub size: UVec2,
}

impl SourceRect {
    pub fn contains(&self, pos: UVec2) -> bool {
        let max = self.offset + self.size;
        pos.x >= self.offset.x && pos.y >= self.offset.y && pos.x < max.x && pos.y < max.y
    }
}
