//! Playback state machine.
//!
//! The controller owns the position, the progress total and every timer. Time only
//! passes through [`PlaybackController::update`], which fires due timers one by one,
//! so each tick finishes drawing and counting before the next one starts.

use crate::{
    asset::ResourceLoader,
    clock::{Fired, PlaybackClock, TimerHandle, TimerKind},
    config::AnimationConfig,
    errors::Error,
    frame_index::FrameIndex,
    handle::Handle,
    progress::ProgressTracker,
    surface::Surface,
    types::Position,
};

#[derive(Debug)]
pub enum PlaybackState {
    /// Never started
    Stopped,
    /// Sheet requested, polling until the loader reports it ready
    AwaitingResource {
        handle: Handle,
        poll: TimerHandle,
        requested_at_ms: u64,
    },
    /// Tick timer running
    Playing { handle: Handle, tick: TimerHandle },
    Paused,
}

impl PlaybackState {
    pub fn is_playing(&self) -> bool {
        matches!(self, Self::AwaitingResource { .. } | Self::Playing { .. })
    }

    /// Handle of the sheet being waited on or shown
    pub fn handle(&self) -> Option<&Handle> {
        match self {
            Self::AwaitingResource { handle, .. } | Self::Playing { handle, .. } => Some(handle),
            Self::Stopped | Self::Paused => None,
        }
    }
}

pub struct PlaybackController<L, S> {
    config: AnimationConfig,
    frame_index: FrameIndex,
    tracker: ProgressTracker,
    clock: PlaybackClock,
    loader: L,
    surface: S,
    state: PlaybackState,
    position: Position,
    progress: f32,
}

impl<L: ResourceLoader, S: Surface> PlaybackController<L, S> {
    pub fn new(config: AnimationConfig, loader: L, surface: S) -> Result<Self, Error> {
        config.validate()?;
        Ok(Self {
            frame_index: FrameIndex::from_config(&config),
            tracker: ProgressTracker::from_config(&config),
            config,
            clock: PlaybackClock::default(),
            loader,
            surface,
            state: PlaybackState::Stopped,
            position: Position::default(),
            progress: 0.0,
        })
    }

    /// Begin at `position` instead of the first frame
    pub fn with_position(mut self, position: Position) -> Result<Self, Error> {
        if position.resource_index >= self.config.resource_count {
            return Err(Error::InvalidIndex {
                index: position.resource_index,
                count: self.config.resource_count,
            });
        }
        if position.frame_in_resource >= self.config.frames_per_resource {
            return Err(Error::InvalidIndex {
                index: position.frame_in_resource,
                count: self.config.frames_per_resource,
            });
        }
        self.position = position;
        Ok(self)
    }

    pub fn config(&self) -> &AnimationConfig {
        &self.config
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Percent of the full cycle shown so far
    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn is_playing(&self) -> bool {
        self.state.is_playing()
    }

    pub fn clock(&self) -> &PlaybackClock {
        &self.clock
    }

    pub fn loader(&self) -> &L {
        &self.loader
    }

    pub fn loader_mut(&mut self) -> &mut L {
        &mut self.loader
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Request the current sheet and play once it is ready.
    ///
    /// Anything already scheduled is cancelled first, so repeated calls never leave
    /// two timers running.
    pub fn start(&mut self) {
        if self.is_playing() {
            log::warn!("start while {:?}, restarting current sheet", self.state);
        }
        self.cancel_scheduled();
        self.load_current();
    }

    /// Stop ticking or polling, keeping position and progress
    pub fn pause(&mut self) {
        if !self.is_playing() {
            return;
        }
        self.cancel_scheduled();
        self.state = PlaybackState::Paused;
        log::debug!("Paused at {:?}", self.position);
    }

    /// Pause if playing, start otherwise. Returns whether playback is now on.
    pub fn toggle(&mut self) -> bool {
        if self.is_playing() {
            self.pause();
        } else {
            self.start();
        }
        self.is_playing()
    }

    /// Let `elapsed_ms` pass, firing every timer that comes due in order
    pub fn update(&mut self, elapsed_ms: u64) {
        let until = self.clock.now_ms() + elapsed_ms;
        while let Some(fired) = self.clock.pop_due(until) {
            self.on_timer(fired);
        }
    }

    fn cancel_scheduled(&mut self) {
        match &self.state {
            PlaybackState::AwaitingResource { poll, .. } => {
                self.clock.stop(*poll);
            }
            PlaybackState::Playing { tick, .. } => {
                self.clock.stop(*tick);
            }
            PlaybackState::Stopped | PlaybackState::Paused => {}
        }
    }

    fn load_current(&mut self) {
        let index = self.position.resource_index;
        debug_assert!(
            index < self.config.resource_count,
            "resource index {index} out of range"
        );
        let handle = self.loader.request(index);
        if self.loader.is_ready(&handle) {
            self.begin_playing(handle);
            return;
        }
        let poll = self
            .clock
            .start_ticking(self.config.poll_interval_ms, TimerKind::Poll);
        log::debug!("Waiting for sheet {index}");
        self.state = PlaybackState::AwaitingResource {
            handle,
            poll,
            requested_at_ms: self.clock.now_ms(),
        };
    }

    fn begin_playing(&mut self, handle: Handle) {
        let tick = self
            .clock
            .start_ticking(self.config.tick_interval_ms, TimerKind::Tick);
        log::debug!("Playing sheet {}", handle.resource_index());
        self.state = PlaybackState::Playing { handle, tick };
    }

    fn on_timer(&mut self, fired: Fired) {
        match (&self.state, fired.kind) {
            (PlaybackState::AwaitingResource { poll, .. }, TimerKind::Poll)
                if *poll == fired.handle =>
            {
                self.on_poll(fired.at_ms);
            }
            (PlaybackState::Playing { tick, .. }, TimerKind::Tick) if *tick == fired.handle => {
                self.on_tick();
            }
            _ => {
                log::warn!("Stale {:?} timer fired in {:?}", fired.kind, self.state);
                self.clock.stop(fired.handle);
            }
        }
    }

    fn on_poll(&mut self, at_ms: u64) {
        let PlaybackState::AwaitingResource {
            handle,
            poll,
            requested_at_ms,
        } = &self.state
        else {
            return;
        };
        let poll = *poll;
        if self.loader.is_ready(handle) {
            let handle = handle.clone();
            self.clock.stop(poll);
            self.begin_playing(handle);
            return;
        }
        let Some(timeout) = self.config.load_timeout_ms else {
            return;
        };
        let waited_ms = at_ms - requested_at_ms;
        if waited_ms < timeout {
            return;
        }
        let err = Error::ResourceUnavailable {
            index: handle.resource_index(),
            waited_ms,
        };
        self.clock.stop(poll);
        self.state = PlaybackState::Paused;
        self.surface.load_failed(&err);
    }

    fn on_tick(&mut self) {
        let PlaybackState::Playing { handle, tick } = &self.state else {
            return;
        };
        let tick = *tick;
        let src = self.frame_index.source_rect(self.position.frame_in_resource);
        self.surface.draw(handle, src, self.config.output_size);

        self.progress = self.tracker.advance(self.progress);
        self.surface.set_progress_width(self.progress);

        self.position.frame_in_resource += 1;
        if self.position.frame_in_resource > self.config.frames_per_resource - 1 {
            self.clock.stop(tick);
            self.position.frame_in_resource = 0;
            self.position.resource_index += 1;
            if self.position.resource_index > self.config.resource_count - 1 {
                self.position.resource_index = 0;
                self.progress = self.tracker.reset();
                log::info!("Animation cycle complete");
            }
            log::debug!("Roll over to sheet {}", self.position.resource_index);
            self.load_current();
        }
    }
}
