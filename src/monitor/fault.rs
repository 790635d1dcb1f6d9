use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Delivery-path failure raised by the [`Monitor`](super::Monitor).
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    /// The output pipeline ran out of buffered samples.
    Underrun,
    /// Nothing pulled from the engine for a whole monitoring interval.
    Stall,
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Playback continues.
    Warning,
    /// Playback is dead until the stream is restarted.
    Critical,
}

impl Fault {
    pub fn severity(self) -> Severity {
        match self {
            Fault::Underrun => Severity::Warning,
            Fault::Stall => Severity::Critical,
        }
    }

    /// Whether the current playback session should be treated as over.
    pub fn is_fatal(self) -> bool {
        self.severity() == Severity::Critical
    }

    pub fn title(self) -> &'static str {
        match self {
            Fault::Underrun => "Underrun Error",
            Fault::Stall => "Audio Output Stalled",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Fault::Underrun => {
                "Audio buffer underrun errors have been detected. \
                 Please increase the buffer time to avoid this problem."
            }
            Fault::Stall => {
                "Audio output is stalled right now. Sound cannot be produced. \
                 Please increase the buffer time to avoid this problem."
            }
        }
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}
