use glam::UVec2;

use crate::{errors::Error, handle::Handle, types::SourceRect};

/// Where playback output goes: frame pixels and the progress indicator
pub trait Surface {
    /// Draw the `src` part of `texture` stretched over `dst_size`
    fn draw(&mut self, texture: &Handle, src: SourceRect, dst_size: UVec2);

    /// Update the progress indicator, `percent` runs from 0 to 100
    fn set_progress_width(&mut self, percent: f32);

    /// A sheet gave up loading
    fn load_failed(&mut self, err: &Error) {
        log::error!("{err}");
    }
}
