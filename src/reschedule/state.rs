//! Per-request reschedule state machine.
//!
//! ```text
//! Confirmed ──submit──▶ RescheduleRequested ──accept──▶ Rescheduled
//!                                        └────reject──▶ RescheduleRejected
//! ```
//!
//! `Rescheduled` and `RescheduleRejected` are terminal for one request.
//! The next request on the same booking starts again from `Confirmed`.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::RescheduleRejection;
use crate::models::RescheduleRecord;

/// Reschedule lifecycle of a single request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RescheduleState {
    #[default]
    Confirmed,
    RescheduleRequested,
    Rescheduled,
    RescheduleRejected,
}

impl RescheduleState {
    /// Whether moving to `next` is a legal transition.
    pub fn can_transition_to(&self, next: RescheduleState) -> bool {
        use RescheduleState::*;
        matches!(
            (self, next),
            (Confirmed, RescheduleRequested)
                | (RescheduleRequested, Rescheduled)
                | (RescheduleRequested, RescheduleRejected)
        )
    }

    /// Whether no further transition is possible.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Rescheduled | Self::RescheduleRejected)
    }
}

impl fmt::Display for RescheduleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Confirmed => "Confirmed",
            Self::RescheduleRequested => "RescheduleRequested",
            Self::Rescheduled => "Rescheduled",
            Self::RescheduleRejected => "RescheduleRejected",
        };
        f.write_str(name)
    }
}

/// One pass of a request through the state machine.
#[derive(Debug, Clone, PartialEq)]
pub struct RescheduleAttempt {
    booking_id: String,
    state: RescheduleState,
    outcome: Option<Result<RescheduleRecord, RescheduleRejection>>,
}

impl RescheduleAttempt {
    /// Starts an attempt in `Confirmed`.
    pub fn new(booking_id: impl Into<String>) -> Self {
        Self {
            booking_id: booking_id.into(),
            state: RescheduleState::Confirmed,
            outcome: None,
        }
    }

    pub fn booking_id(&self) -> &str {
        &self.booking_id
    }

    pub fn state(&self) -> RescheduleState {
        self.state
    }

    /// `Confirmed -> RescheduleRequested`.
    pub fn submit(&mut self) -> Result<(), RescheduleRejection> {
        self.transition(RescheduleState::RescheduleRequested)
    }

    /// `RescheduleRequested -> Rescheduled`, storing the record.
    pub fn accept(&mut self, record: RescheduleRecord) -> Result<(), RescheduleRejection> {
        self.transition(RescheduleState::Rescheduled)?;
        self.outcome = Some(Ok(record));
        Ok(())
    }

    /// `RescheduleRequested -> RescheduleRejected`, storing the reason.
    pub fn reject(&mut self, reason: RescheduleRejection) -> Result<(), RescheduleRejection> {
        self.transition(RescheduleState::RescheduleRejected)?;
        self.outcome = Some(Err(reason));
        Ok(())
    }

    /// The record, if the attempt succeeded.
    pub fn record(&self) -> Option<&RescheduleRecord> {
        self.outcome.as_ref().and_then(|o| o.as_ref().ok())
    }

    /// The rejection, if the attempt failed.
    pub fn rejection(&self) -> Option<&RescheduleRejection> {
        self.outcome.as_ref().and_then(|o| o.as_ref().err())
    }

    /// Consumes the attempt into its outcome.
    ///
    /// An attempt that never reached a terminal state yields
    /// [`RescheduleRejection::InvalidTransition`].
    pub fn into_result(self) -> Result<RescheduleRecord, RescheduleRejection> {
        let state = self.state;
        self.outcome.unwrap_or_else(|| {
            Err(RescheduleRejection::InvalidTransition {
                from: state.to_string(),
                to: "terminal".to_string(),
            })
        })
    }

    fn transition(&mut self, next: RescheduleState) -> Result<(), RescheduleRejection> {
        if !self.state.can_transition_to(next) {
            return Err(RescheduleRejection::InvalidTransition {
                from: self.state.to_string(),
                to: next.to_string(),
            });
        }
        self.state = next;
        Ok(())
    }
}
