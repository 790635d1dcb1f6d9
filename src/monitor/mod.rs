/*
Stall/Underrun Monitor
======================

Watches the delivery path, not the engine. Two failure modes:

  Underrun   The output pipeline reports it ran out of buffered samples.
             Relayed as a warning; monitoring continues.

  Stall      The engine was not pulled at all for a whole polling interval.
             Relayed as a critical fault; monitoring stops until restarted.

Timeline after `start`, with B = buffer duration:

    start        armed        check        check        check
      │────2B─────│─────4B─────│─────4B─────│─────4B─────│ ...
      (priming: faults ignored)

Every check reads and clears the engine's BlockMeter in one atomic step. A
zero reading means no pull landed since the previous check.

The monitor never looks at a clock itself. The application calls `poll(now)`
from its own timer or UI loop, which keeps it off the audio thread and makes
it deterministic under test.
*/

mod fault;
mod signal;

use std::time::{Duration, Instant};

pub use fault::{Fault, Severity};
pub use signal::UnderrunSignal;

use crate::synth::meter::BlockMeter;

/// Grace period after start, in buffer durations.
pub const GRACE_BUFFERS: u32 = 2;
/// Polling interval, in buffer durations.
pub const POLL_BUFFERS: u32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Stopped,
    Priming { arm_at: Instant },
    Armed { next_check: Instant },
    /// A stall fired; waiting for a restart.
    Disarmed,
}

pub struct Monitor {
    meter: BlockMeter,
    underruns: UnderrunSignal,
    grace: Duration,
    interval: Duration,
    phase: Phase,
}

impl Monitor {
    /// Monitor for a pipeline buffering `buffer` worth of audio.
    pub fn new(meter: BlockMeter, underruns: UnderrunSignal, buffer: Duration) -> Self {
        Self {
            meter,
            underruns,
            grace: buffer * GRACE_BUFFERS,
            interval: buffer * POLL_BUFFERS,
            phase: Phase::Stopped,
        }
    }

    /// (Re)start after the pipeline starts. Arms once the grace period has
    /// passed.
    pub fn start(&mut self, now: Instant) {
        self.underruns.clear();
        self.phase = Phase::Priming {
            arm_at: now + self.grace,
        };
    }

    pub fn stop(&mut self) {
        self.phase = Phase::Stopped;
    }

    /// True before the first `start` and after `stop`.
    pub fn is_stopped(&self) -> bool {
        matches!(self.phase, Phase::Stopped)
    }

    pub fn is_armed(&self) -> bool {
        matches!(self.phase, Phase::Armed { .. })
    }

    /// True once a stall has fired and no restart has happened since.
    pub fn is_disarmed(&self) -> bool {
        matches!(self.phase, Phase::Disarmed)
    }

    pub fn grace_period(&self) -> Duration {
        self.grace
    }

    pub fn poll_interval(&self) -> Duration {
        self.interval
    }

    /// Relay an underrun pushed directly by the pipeline. Ignored unless
    /// armed.
    pub fn notify_underrun(&mut self) -> Option<Fault> {
        if !self.is_armed() {
            return None;
        }

        log::warn!("audio output underrun");
        Some(Fault::Underrun)
    }

    /// Advance to `now`: arm after the grace period, run a stall check when
    /// one is due, and relay a pending underrun.
    ///
    /// A stall takes precedence over an underrun seen in the same poll.
    pub fn poll(&mut self, now: Instant) -> Option<Fault> {
        if let Phase::Priming { arm_at } = self.phase {
            if now >= arm_at {
                log::debug!(
                    "stall monitor armed, checking every {} ms",
                    self.interval.as_millis()
                );
                self.phase = Phase::Armed {
                    next_check: arm_at + self.interval,
                };
            }
        }

        let Phase::Armed { next_check } = self.phase else {
            // Underruns while priming or disarmed are expected noise
            self.underruns.clear();
            return None;
        };

        if now >= next_check {
            if self.meter.take() == 0 {
                log::error!(
                    "audio output stalled: nothing pulled for {} ms",
                    self.interval.as_millis()
                );
                self.phase = Phase::Disarmed;
                self.underruns.clear();
                return Some(Fault::Stall);
            }

            let mut next_check = next_check + self.interval;
            while next_check <= now {
                next_check += self.interval;
            }
            self.phase = Phase::Armed { next_check };
        }

        if self.underruns.take() {
            return self.notify_underrun();
        }

        None
    }
}
