//! History and outcome types for [`CalibrationState`](crate::CalibrationState).

use lenticular_core::ConfigurationError;
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Which part of the calibration a [`LogEntry`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Init,
    Calibration,
    Projection,
}

/// What happened to a stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LogEvent {
    Ready,
    /// Input rejected, previous values kept.
    Rejected { reason: String },
    /// First valid input after a rejection.
    Recovered { after: String },
}

/// One state change of a [`CalibrationState`](crate::CalibrationState).
///
/// Repeated identical failures are recorded once, so the history stays
/// short even when a bad value is held for many frames.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Seconds since the Unix epoch.
    pub at: u64,
    pub stage: Stage,
    pub event: LogEvent,
}

impl LogEntry {
    fn now(stage: Stage, event: LogEvent) -> Self {
        Self {
            at: current_timestamp(),
            stage,
            event,
        }
    }

    pub fn ready(stage: Stage) -> Self {
        Self::now(stage, LogEvent::Ready)
    }

    pub fn rejected(stage: Stage, err: &ConfigurationError) -> Self {
        Self::now(
            stage,
            LogEvent::Rejected {
                reason: err.to_string(),
            },
        )
    }

    pub fn recovered(stage: Stage, previous: &ConfigurationError) -> Self {
        Self::now(
            stage,
            LogEvent::Recovered {
                after: previous.to_string(),
            },
        )
    }

    pub fn is_rejection(&self) -> bool {
        matches!(self.event, LogEvent::Rejected { .. })
    }
}

/// Outcome of a single recomputation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefreshOutcome {
    /// New values were computed and stored.
    Updated,
    /// The input was invalid; the previous values were kept.
    Retained,
    /// Recomputation was skipped by the lock flag.
    Locked,
    /// Nothing was requested (projection outside test-projection mode).
    Skipped,
}

/// What one [`CalibrationState::tick`](crate::CalibrationState::tick) did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickOutcome {
    pub calibration: RefreshOutcome,
    pub projection: RefreshOutcome,
}

/// Seconds since the Unix epoch, `0` if the clock is before it.
pub fn current_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_secs())
}
