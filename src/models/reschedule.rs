//! Reschedule request and record models.
//!
//! Requests carry raw reason/initiator strings as handed over by a UI;
//! the closed [`ReasonCode`] and [`Initiator`] sets are parsed from them.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::Slot;
use crate::error::RescheduleRejection;

/// Why a booking is being moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReasonCode {
    Weather,
    Emergency,
    Availability,
    Requirements,
    Logistics,
    Permit,
    Budget,
    Other,
}

impl ReasonCode {
    /// All recognized codes.
    pub const ALL: [ReasonCode; 8] = [
        ReasonCode::Weather,
        ReasonCode::Emergency,
        ReasonCode::Availability,
        ReasonCode::Requirements,
        ReasonCode::Logistics,
        ReasonCode::Permit,
        ReasonCode::Budget,
        ReasonCode::Other,
    ];

    /// Wire code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Weather => "weather",
            Self::Emergency => "emergency",
            Self::Availability => "availability",
            Self::Requirements => "requirements",
            Self::Logistics => "logistics",
            Self::Permit => "permit",
            Self::Budget => "budget",
            Self::Other => "other",
        }
    }

    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Weather => "Weather conditions",
            Self::Emergency => "Emergency",
            Self::Availability => "Availability conflict",
            Self::Requirements => "Changed requirements",
            Self::Logistics => "Logistics issue",
            Self::Permit => "Permit delay",
            Self::Budget => "Budget constraints",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReasonCode {
    type Err = RescheduleRejection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(code))
            .ok_or_else(|| RescheduleRejection::UnknownReasonCode(s.to_string()))
    }
}

/// Who asked for the change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Initiator {
    Client,
    Engineer,
    Mutual,
    System,
}

impl Initiator {
    /// All recognized initiators.
    pub const ALL: [Initiator; 4] = [
        Initiator::Client,
        Initiator::Engineer,
        Initiator::Mutual,
        Initiator::System,
    ];

    /// Wire code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Client => "client",
            Self::Engineer => "engineer",
            Self::Mutual => "mutual",
            Self::System => "system",
        }
    }

    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Client => "Client request",
            Self::Engineer => "Engineer request",
            Self::Mutual => "Mutual agreement",
            Self::System => "System initiated",
        }
    }
}

impl fmt::Display for Initiator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Initiator {
    type Err = RescheduleRejection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        Self::ALL
            .into_iter()
            .find(|i| i.as_str().eq_ignore_ascii_case(code))
            .ok_or_else(|| RescheduleRejection::UnknownInitiator(s.to_string()))
    }
}

/// A request to move a booking. Transient; never persisted here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RescheduleRequest {
    pub booking_id: String,
    pub requested_date: NaiveDate,
    pub requested_time: String,
    /// Raw reason code. `None` or blank means no reason was given.
    pub reason_code: Option<String>,
    /// Raw initiator code.
    pub initiator: String,
}

impl RescheduleRequest {
    /// Creates a client-initiated request with no reason.
    pub fn new(
        booking_id: impl Into<String>,
        requested_date: NaiveDate,
        requested_time: impl Into<String>,
    ) -> Self {
        Self {
            booking_id: booking_id.into(),
            requested_date,
            requested_time: requested_time.into(),
            reason_code: None,
            initiator: Initiator::Client.as_str().to_string(),
        }
    }

    /// Sets the raw reason code.
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason_code = Some(reason.into());
        self
    }

    /// Sets the raw initiator.
    pub fn with_initiator(mut self, initiator: impl Into<String>) -> Self {
        self.initiator = initiator.into();
        self
    }

    /// The requested slot.
    pub fn slot(&self) -> Slot {
        Slot::new(self.requested_date, self.requested_time.clone())
    }
}

/// Outcome of a successful reschedule. Storage is the caller's concern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RescheduleRecord {
    pub booking_id: String,
    pub old_slot: Slot,
    pub new_slot: Slot,
    pub fee: f64,
    /// Currency label of `fee`.
    pub currency: String,
    pub reason: ReasonCode,
    pub initiator: Initiator,
    pub timestamp: DateTime<Utc>,
}
