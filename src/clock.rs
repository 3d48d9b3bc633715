//! Cooperative timer scheduling.
//!
//! The clock never reads wall time. The host moves it forward with
//! [`PlaybackClock::pop_due`], which hands back due timers one at a time so a
//! handler can stop timers before they fire again.

/// What a timer is driving
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// Frame advance
    Tick,
    /// Resource readiness check
    Poll,
}

/// Handle of a started timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

#[derive(Debug)]
struct Timer {
    handle: TimerHandle,
    kind: TimerKind,
    interval_ms: u64,
    next_fire_ms: u64,
}

/// A timer that came due
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fired {
    pub handle: TimerHandle,
    pub kind: TimerKind,
    /// Clock time the timer fired at
    pub at_ms: u64,
}

#[derive(Debug, Default)]
pub struct PlaybackClock {
    now_ms: u64,
    next_id: u64,
    timers: Vec<Timer>,
}

impl PlaybackClock {
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Start a repeating timer, first firing `interval_ms` from now
    pub fn start_ticking(&mut self, interval_ms: u64, kind: TimerKind) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;
        let interval_ms = interval_ms.max(1);
        self.timers.push(Timer {
            handle,
            kind,
            interval_ms,
            next_fire_ms: self.now_ms + interval_ms,
        });
        handle
    }

    /// Stop a timer, it never fires again. Returns false if it was not running.
    pub fn stop(&mut self, handle: TimerHandle) -> bool {
        let len = self.timers.len();
        self.timers.retain(|t| t.handle != handle);
        self.timers.len() != len
    }

    pub fn is_active(&self, handle: TimerHandle) -> bool {
        self.timers.iter().any(|t| t.handle == handle)
    }

    /// Number of running timers of `kind`
    pub fn active(&self, kind: TimerKind) -> usize {
        self.timers.iter().filter(|t| t.kind == kind).count()
    }

    /// Pop the earliest timer due at or before `until_ms`.
    ///
    /// The clock moves to the firing time and the timer is rescheduled one interval
    /// later. Ties fire in start order. Returns `None` once nothing is due, after
    /// moving the clock to `until_ms`.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<Fired> {
        let timer = self
            .timers
            .iter_mut()
            .filter(|t| t.next_fire_ms <= until_ms)
            .min_by_key(|t| (t.next_fire_ms, t.handle.0));
        let Some(timer) = timer else {
            self.now_ms = self.now_ms.max(until_ms);
            return None;
        };
        let at_ms = timer.next_fire_ms;
        timer.next_fire_ms += timer.interval_ms;
        self.now_ms = at_ms;
        Some(Fired {
            handle: timer.handle,
            kind: timer.kind,
            at_ms,
        })
    }
}
