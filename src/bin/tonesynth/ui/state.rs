//! Snapshot of control-side state handed to the widgets each frame.

use std::time::Duration;

use tonesynth::{Fault, Monitor, Note};

/// Where the stall monitor is in its lifecycle
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MonitorStatus {
    /// Not started, or stopped for a restart
    Stopped,
    /// Within the grace period after (re)start
    Priming,
    Armed,
    /// A stall fired; restart the stream to re-arm
    Stalled,
}

impl MonitorStatus {
    pub fn of(monitor: &Monitor) -> Self {
        if monitor.is_stopped() {
            MonitorStatus::Stopped
        } else if monitor.is_armed() {
            MonitorStatus::Armed
        } else if monitor.is_disarmed() {
            MonitorStatus::Stalled
        } else {
            MonitorStatus::Priming
        }
    }
}

/// Everything the status bar and keyboard need for one frame
pub struct StatusView<'a> {
    pub device: &'a str,
    pub sample_rate: u32,
    pub channels: u16,
    /// Buffer length the device accepted
    pub buffer: Duration,
    pub octave: i32,
    /// Volume on the logarithmic slider scale
    pub volume: f32,
    pub held: Option<Note>,
    /// Pitch the held note was started at
    pub held_hz: Option<f64>,
    pub monitor: MonitorStatus,
    /// Whether the terminal reports key releases
    pub release_events: bool,
}

/// A fault as shown in the fault log
#[derive(Clone, Copy, Debug)]
pub struct FaultEntry {
    pub fault: Fault,
    /// Time since the application started
    pub at: Duration,
}
