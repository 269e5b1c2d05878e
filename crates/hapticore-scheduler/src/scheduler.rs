//! Single-channel vibration scheduler
//!
//! Owns the one active vibration session. Every dispatch takes the gate,
//! stops whatever is playing, performs the first actuation synchronously and
//! hands the rest of the command to a timer-driven tokio task. The task
//! re-takes the gate at each segment boundary and only touches the driver
//! while its session is still the current one, so a cancelled or superseded
//! session can never actuate again.

use core::time::Duration;
use std::sync::Arc;

use hapticore_effects::{
    Amplitude, OneShotCommand, PrimitiveCommand, PrimitiveId, Repeat, SegmentLevel,
    WaveformDescriptor,
};
use hapticore_errors::{DeviceError, HapticsError, HapticsResult};
use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::capability::Capability;
use crate::driver::VibratorDriver;
use crate::session::{CommandKind, SchedulerStats, SessionHandle, SessionState, StatsSnapshot};

/// Scheduler tuning.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SchedulerConfig {
    /// Session length for native primitives; `None` uses each primitive's
    /// nominal duration.
    pub primitive_duration: Option<Duration>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Actuate(Amplitude),
    Primitive(PrimitiveId),
    Off,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Step {
    action: Action,
    hold: Duration,
}

/// A command in the form the playback task walks through.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Playback {
    OneShot(OneShotCommand),
    Primitive {
        primitive: PrimitiveId,
        duration: Duration,
    },
    Waveform(WaveformDescriptor),
}

impl Playback {
    fn kind(&self) -> CommandKind {
        match self {
            Playback::OneShot(_) => CommandKind::OneShot,
            Playback::Primitive { .. } => CommandKind::Primitive,
            Playback::Waveform(wf) if wf.is_looping() => CommandKind::LoopingWaveform,
            Playback::Waveform(_) => CommandKind::Waveform,
        }
    }

    fn step(&self, index: usize) -> Option<Step> {
        match self {
            Playback::OneShot(cmd) => (index == 0).then_some(Step {
                action: Action::Actuate(cmd.amplitude()),
                hold: cmd.duration(),
            }),
            Playback::Primitive {
                primitive,
                duration,
            } => (index == 0).then_some(Step {
                action: Action::Primitive(*primitive),
                hold: *duration,
            }),
            Playback::Waveform(wf) => wf.segment(index).map(|segment| Step {
                action: match segment.level {
                    SegmentLevel::Off => Action::Off,
                    SegmentLevel::On(amplitude) => Action::Actuate(amplitude),
                },
                hold: segment.duration,
            }),
        }
    }

    /// Index of the step after `index`, re-entering the loop when the
    /// waveform repeats.
    fn next_index(&self, index: usize) -> Option<usize> {
        match self {
            Playback::OneShot(_) | Playback::Primitive { .. } => None,
            Playback::Waveform(wf) => {
                let next = index.saturating_add(1);
                if next < wf.len() {
                    return Some(next);
                }
                match wf.repeat() {
                    Repeat::Once => None,
                    Repeat::From(start) => Some(start),
                }
            }
        }
    }
}

struct ActiveSession {
    handle: SessionHandle,
    kind: CommandKind,
    task: Option<JoinHandle<()>>,
}

#[derive(Default)]
struct Gate {
    next_id: u64,
    active: Option<ActiveSession>,
    closed: bool,
}

impl Gate {
    fn is_current(&self, session: SessionHandle) -> bool {
        self.active.as_ref().is_some_and(|a| a.handle == session)
    }
}

struct Inner {
    driver: Arc<dyn VibratorDriver>,
    capability: Capability,
    config: SchedulerConfig,
    gate: Mutex<Gate>,
    stats: SchedulerStats,
}

impl Inner {
    /// Perform one step on the driver and return how long it lasts.
    fn apply(&self, step: &Step) -> Duration {
        let result = match step.action {
            Action::Actuate(_) if step.hold.is_zero() => Ok(()),
            Action::Actuate(amplitude) => self.driver.actuate(
                amplitude.clamp_for(self.capability.has_amplitude_control),
                step.hold,
            ),
            Action::Primitive(primitive) => self.driver.play_primitive(primitive),
            Action::Off => Ok(()),
        };
        self.record(result, "actuate");
        step.hold
    }

    /// Stop an ended session's task and the actuator.
    fn end_session(&self, session: ActiveSession) {
        if let Some(task) = session.task {
            task.abort();
        }
        self.record(self.driver.stop(), "stop");
    }

    fn record(&self, result: Result<(), DeviceError>, operation: &'static str) {
        if let Err(error) = result {
            self.stats.inc_driver_error();
            warn!(%error, operation, "vibrator driver call failed");
        }
    }
}

/// Owner of the single hardware vibration channel.
///
/// Dispatching requires a tokio runtime. Dropping the scheduler cancels the
/// active session.
pub struct VibrationScheduler {
    inner: Arc<Inner>,
}

impl VibrationScheduler {
    pub fn new(driver: Arc<dyn VibratorDriver>, capability: Capability) -> Self {
        Self::with_config(driver, capability, SchedulerConfig::default())
    }

    pub fn with_config(
        driver: Arc<dyn VibratorDriver>,
        capability: Capability,
        config: SchedulerConfig,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                driver,
                capability,
                config,
                gate: Mutex::new(Gate::default()),
                stats: SchedulerStats::new(),
            }),
        }
    }

    /// Play a single pulse. The amplitude falls back to the device default
    /// when the actuator cannot vary intensity.
    ///
    /// # Errors
    ///
    /// Returns [`HapticsError::Runtime`] outside a tokio runtime or after
    /// [`shutdown`](Self::shutdown).
    pub fn dispatch_one_shot(&self, command: OneShotCommand) -> HapticsResult<SessionHandle> {
        let command = command.clamp_for(self.inner.capability.has_amplitude_control);
        self.dispatch(Playback::OneShot(command))
    }

    /// Play a resolved catalog effect.
    ///
    /// # Errors
    ///
    /// See [`dispatch_one_shot`](Self::dispatch_one_shot).
    pub fn dispatch_effect(&self, command: PrimitiveCommand) -> HapticsResult<SessionHandle> {
        match command {
            PrimitiveCommand::Primitive { primitive, .. } => {
                let duration = self
                    .inner
                    .config
                    .primitive_duration
                    .unwrap_or_else(|| primitive.nominal_duration());
                self.dispatch(Playback::Primitive {
                    primitive,
                    duration,
                })
            }
            PrimitiveCommand::Waveform { waveform, .. } => self.dispatch_waveform(waveform),
        }
    }

    /// Play a validated waveform, looping from its repeat index until
    /// cancelled when it repeats.
    ///
    /// # Errors
    ///
    /// See [`dispatch_one_shot`](Self::dispatch_one_shot).
    pub fn dispatch_waveform(&self, waveform: WaveformDescriptor) -> HapticsResult<SessionHandle> {
        let waveform = waveform.normalized_for(self.inner.capability.has_amplitude_control);
        self.dispatch(Playback::Waveform(waveform))
    }

    /// Stop the active session, if any. Idempotent.
    pub fn cancel(&self) {
        let mut gate = self.inner.gate.lock();
        if let Some(active) = gate.active.take() {
            let handle = active.handle;
            self.inner.end_session(active);
            self.inner.stats.inc_cancelled();
            debug!(session = %handle, "session cancelled");
        }
    }

    /// Cancel the active session and refuse further dispatches.
    pub fn shutdown(&self) {
        self.inner.gate.lock().closed = true;
        self.cancel();
        debug!("vibration scheduler shut down");
    }

    pub fn state(&self) -> SessionState {
        let gate = self.inner.gate.lock();
        match &gate.active {
            None => SessionState::Idle,
            Some(active) => SessionState::Playing {
                session: active.handle,
                kind: active.kind,
            },
        }
    }

    pub fn is_playing(&self) -> bool {
        !self.state().is_idle()
    }

    pub fn current_session(&self) -> Option<SessionHandle> {
        self.state().session()
    }

    pub fn stats(&self) -> StatsSnapshot {
        self.inner.stats.snapshot()
    }

    pub fn capability(&self) -> Capability {
        self.inner.capability
    }

    fn dispatch(&self, playback: Playback) -> HapticsResult<SessionHandle> {
        let kind = playback.kind();
        if !self.inner.capability.has_vibrator {
            warn!(%kind, "no vibrator present, dispatch ignored");
            return Ok(SessionHandle::detached());
        }
        let runtime = Handle::try_current().map_err(|e| HapticsError::runtime(e.to_string()))?;

        let mut gate = self.inner.gate.lock();
        if gate.closed {
            return Err(HapticsError::runtime("vibration scheduler has been shut down"));
        }
        if let Some(previous) = gate.active.take() {
            let previous_handle = previous.handle;
            self.inner.end_session(previous);
            self.inner.stats.inc_superseded();
            debug!(session = %previous_handle, "session superseded");
        }

        gate.next_id = gate.next_id.saturating_add(1);
        let handle = SessionHandle::new(gate.next_id);
        let first_hold = playback
            .step(0)
            .map(|step| self.inner.apply(&step))
            .unwrap_or_default();
        self.inner.stats.inc_dispatched();

        let task = runtime.spawn(run_playback(
            Arc::clone(&self.inner),
            handle,
            playback,
            first_hold,
        ));
        gate.active = Some(ActiveSession {
            handle,
            kind,
            task: Some(task),
        });
        debug!(session = %handle, %kind, "session started");
        Ok(handle)
    }
}

impl Drop for VibrationScheduler {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl core::fmt::Debug for VibrationScheduler {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("VibrationScheduler")
            .field("capability", &self.inner.capability)
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

async fn run_playback(
    inner: Arc<Inner>,
    session: SessionHandle,
    playback: Playback,
    first_hold: Duration,
) {
    let mut index = 0;
    let mut hold = first_hold;
    loop {
        tokio::time::sleep(hold).await;
        let next_hold = {
            let mut gate = inner.gate.lock();
            if !gate.is_current(session) {
                return;
            }
            let next = playback
                .next_index(index)
                .and_then(|i| playback.step(i).map(|step| (i, step)));
            match next {
                Some((i, step)) => {
                    index = i;
                    inner.apply(&step)
                }
                None => {
                    gate.active = None;
                    inner.stats.inc_completed();
                    debug!(%session, "session completed");
                    return;
                }
            }
        };
        hold = next_hold;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn steps(playback: &Playback, limit: usize) -> Vec<(usize, Step)> {
        let mut out = Vec::new();
        let mut index = Some(0);
        while let Some(i) = index {
            if out.len() == limit {
                break;
            }
            if let Some(step) = playback.step(i) {
                out.push((i, step));
            }
            index = playback.next_index(i);
        }
        out
    }

    #[test]
    fn test_one_shot_is_single_step() -> Result<(), hapticore_errors::WaveformError> {
        let playback = Playback::OneShot(OneShotCommand::new(80, Amplitude::HEAVY)?);
        let walked = steps(&playback, 10);
        assert_eq!(walked.len(), 1);
        assert_eq!(playback.kind(), CommandKind::OneShot);
        Ok(())
    }

    #[test]
    fn test_looping_waveform_reenters_at_repeat_index()
    -> Result<(), hapticore_errors::WaveformError> {
        let wf = WaveformDescriptor::new(vec![0, 400, 200], Some(vec![0, 200, 0]), 1)?;
        let playback = Playback::Waveform(wf);
        let indices: Vec<usize> = steps(&playback, 7).into_iter().map(|(i, _)| i).collect();
        assert_eq!(indices, vec![0, 1, 2, 1, 2, 1, 2]);
        assert_eq!(playback.kind(), CommandKind::LoopingWaveform);
        Ok(())
    }

    #[test]
    fn test_agnostic_waveform_actions() -> Result<(), hapticore_errors::WaveformError> {
        let wf = WaveformDescriptor::new(vec![0, 100, 50, 100], None, -1)?;
        let actions: Vec<Action> = steps(&Playback::Waveform(wf), 10)
            .into_iter()
            .map(|(_, s)| s.action)
            .collect();
        assert_eq!(
            actions,
            vec![
                Action::Off,
                Action::Actuate(Amplitude::Default),
                Action::Off,
                Action::Actuate(Amplitude::Default),
            ]
        );
        Ok(())
    }

    #[test]
    fn test_primitive_step() {
        let playback = Playback::Primitive {
            primitive: PrimitiveId::Click,
            duration: Duration::from_millis(20),
        };
        assert_eq!(
            steps(&playback, 10),
            vec![(
                0,
                Step {
                    action: Action::Primitive(PrimitiveId::Click),
                    hold: Duration::from_millis(20),
                }
            )]
        );
    }
}
