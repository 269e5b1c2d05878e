//! Session handles, state and counters

use core::fmt;
use core::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Identifies one dispatched vibration session.
///
/// Ids start at 1 and increase monotonically per scheduler. Id 0 is a
/// detached handle, returned when there is nothing to actuate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct SessionHandle {
    id: u64,
}

impl SessionHandle {
    pub(crate) fn new(id: u64) -> Self {
        Self { id }
    }

    /// Handle for a dispatch that never reached the actuator.
    pub fn detached() -> Self {
        Self { id: 0 }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn is_detached(&self) -> bool {
        self.id == 0
    }
}

impl fmt::Display for SessionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "session#{}", self.id)
    }
}

/// Kind of command a session is playing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandKind {
    OneShot,
    Primitive,
    Waveform,
    LoopingWaveform,
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CommandKind::OneShot => "one_shot",
            CommandKind::Primitive => "primitive",
            CommandKind::Waveform => "waveform",
            CommandKind::LoopingWaveform => "looping_waveform",
        };
        f.write_str(name)
    }
}

/// Scheduler state machine: `Idle -> Playing -> Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SessionState {
    Idle,
    Playing {
        session: SessionHandle,
        kind: CommandKind,
    },
}

impl SessionState {
    pub fn is_idle(&self) -> bool {
        matches!(self, SessionState::Idle)
    }

    pub fn session(&self) -> Option<SessionHandle> {
        match self {
            SessionState::Idle => None,
            SessionState::Playing { session, .. } => Some(*session),
        }
    }
}

/// Counter snapshot returned by [`SchedulerStats::snapshot`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct StatsSnapshot {
    /// Sessions started on the actuator
    pub dispatched: u64,
    /// Sessions replaced by a later dispatch
    pub superseded: u64,
    /// Sessions stopped by `cancel()`
    pub cancelled: u64,
    /// Sessions that ran to the end
    pub completed: u64,
    /// Driver calls that returned an error
    pub driver_errors: u64,
}

/// Lock-free scheduler counters.
#[derive(Debug, Default)]
pub struct SchedulerStats {
    dispatched: AtomicU64,
    superseded: AtomicU64,
    cancelled: AtomicU64,
    completed: AtomicU64,
    driver_errors: AtomicU64,
}

impl SchedulerStats {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            dispatched: AtomicU64::new(0),
            superseded: AtomicU64::new(0),
            cancelled: AtomicU64::new(0),
            completed: AtomicU64::new(0),
            driver_errors: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn inc_dispatched(&self) {
        self.dispatched.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn inc_superseded(&self) {
        self.superseded.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn inc_cancelled(&self) {
        self.cancelled.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn inc_completed(&self) {
        self.completed.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn inc_driver_error(&self) {
        self.driver_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            dispatched: self.dispatched.load(Ordering::Relaxed),
            superseded: self.superseded.load(Ordering::Relaxed),
            cancelled: self.cancelled.load(Ordering::Relaxed),
            completed: self.completed.load(Ordering::Relaxed),
            driver_errors: self.driver_errors.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detached_handle() {
        assert!(SessionHandle::detached().is_detached());
        assert!(!SessionHandle::new(1).is_detached());
        assert_eq!(SessionHandle::new(7).to_string(), "session#7");
    }

    #[test]
    fn test_state_session() {
        let playing = SessionState::Playing {
            session: SessionHandle::new(3),
            kind: CommandKind::Waveform,
        };
        assert_eq!(playing.session(), Some(SessionHandle::new(3)));
        assert!(SessionState::Idle.is_idle());
    }

    #[test]
    fn test_stats_snapshot() {
        let stats = SchedulerStats::new();
        stats.inc_dispatched();
        stats.inc_dispatched();
        stats.inc_superseded();
        stats.inc_driver_error();
        let snap = stats.snapshot();
        assert_eq!(snap.dispatched, 2);
        assert_eq!(snap.superseded, 1);
        assert_eq!(snap.cancelled, 0);
        assert_eq!(snap.driver_errors, 1);
    }
}
