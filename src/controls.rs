use std::fmt;

use hashbrown::HashSet;

use crate::{asset::ResourceLoader, controller::PlaybackController, surface::Surface};

/// Place a play/pause request can come from
#[derive(Debug, Hash, PartialEq, Eq, Clone, Copy)]
pub enum Trigger {
    PlayButton,
    Canvas,
    ProgressBar,
    ProgressStatus,
}

impl Trigger {
    pub const ALL: [Trigger; 4] = [
        Trigger::PlayButton,
        Trigger::Canvas,
        Trigger::ProgressBar,
        Trigger::ProgressStatus,
    ];
}

/// Text of the play button
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ButtonLabel {
    Play,
    Stop,
}

impl ButtonLabel {
    pub fn for_playing(playing: bool) -> Self {
        if playing {
            Self::Stop
        } else {
            Self::Play
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Play => "Play",
            Self::Stop => "Stop",
        }
    }
}

impl fmt::Display for ButtonLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Routes external triggers to the controller's toggle
#[derive(Debug, Clone)]
pub struct ControlSurface {
    bindings: HashSet<Trigger>,
}

impl Default for ControlSurface {
    fn default() -> Self {
        Self {
            bindings: Trigger::ALL.into_iter().collect(),
        }
    }
}

impl ControlSurface {
    /// Surface with nothing bound
    pub fn empty() -> Self {
        Self {
            bindings: HashSet::default(),
        }
    }

    /// Bind a trigger to toggle
    pub fn bind(&mut self, trigger: Trigger) {
        self.bindings.insert(trigger);
    }

    pub fn unbind(&mut self, trigger: Trigger) {
        self.bindings.remove(&trigger);
    }

    pub fn unbind_all(&mut self) {
        self.bindings.clear();
    }

    pub fn is_bound(&self, trigger: Trigger) -> bool {
        self.bindings.contains(&trigger)
    }

    /// Toggle playback if `trigger` is bound, returning the new button label
    pub fn trigger<L: ResourceLoader, S: Surface>(
        &self,
        trigger: Trigger,
        controller: &mut PlaybackController<L, S>,
    ) -> Option<ButtonLabel> {
        if !self.is_bound(trigger) {
            log::debug!("Ignore unbound {trigger:?}");
            return None;
        }
        let playing = controller.toggle();
        Some(ButtonLabel::for_playing(playing))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::AnimationConfig,
        testing::{ManualLoader, RecordingSurface},
    };

    fn controller() -> PlaybackController<ManualLoader, RecordingSurface> {
        let mut c = PlaybackController::new(
            AnimationConfig::default(),
            ManualLoader::all_ready(7),
            RecordingSurface::default(),
        )
        .unwrap();
        c.start();
        c
    }

    #[test]
    fn test_every_default_trigger_toggles() {
        let controls = ControlSurface::default();
        let mut c = controller();
        for trigger in Trigger::ALL {
            let playing = c.is_playing();
            let label = controls.trigger(trigger, &mut c);
            assert_eq!(c.is_playing(), !playing);
            assert_eq!(label, Some(ButtonLabel::for_playing(!playing)));
        }
    }

    #[test]
    fn test_labels() {
        let controls = ControlSurface::default();
        let mut c = controller();
        assert_eq!(
            controls.trigger(Trigger::PlayButton, &mut c).map(|l| l.to_string()),
            Some("Play".to_string())
        );
        assert_eq!(
            controls.trigger(Trigger::Canvas, &mut c).map(|l| l.to_string()),
            Some("Stop".to_string())
        );
    }

    #[test]
    fn test_unbound_trigger_is_ignored() {
        let mut controls = ControlSurface::default();
        controls.unbind(Trigger::ProgressStatus);
        let mut c = controller();
        assert_eq!(controls.trigger(Trigger::ProgressStatus, &mut c), None);
        assert!(c.is_playing());

        controls.unbind_all();
        controls.bind(Trigger::Canvas);
        assert!(!controls.is_bound(Trigger::PlayButton));
        assert_eq!(
            controls.trigger(Trigger::Canvas, &mut c),
            Some(ButtonLabel::Play)
        );
        assert!(ControlSurface::empty().trigger(Trigger::Canvas, &mut c).is_none());
    }
}
