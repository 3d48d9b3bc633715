pub use crate::app::*;
pub use crate::asset::{AssetLoader, AssetReader, AssetState, ResourceLoader, Texture};
pub use crate::clock::{PlaybackClock, TimerHandle, TimerKind};
pub use crate::config::AnimationConfig;
pub use crate::controller::{PlaybackController, PlaybackState};
pub use crate::controls::{ButtonLabel, ControlSurface, Trigger};
pub use crate::errors::Error as PlaybackError;
pub use crate::frame_index::FrameIndex;
pub use crate::handle::Handle;
pub use crate::progress::ProgressTracker;
pub use crate::resource::ResourceDescriptor;
pub use crate::surface::Surface;
pub use crate::types::{Position, SourceRect};
pub use anyhow::{self, Error, Result};
pub use glam;
