//! Reschedule validation and execution.
//!
//! # Validation Order
//!
//! 1. Request targets this booking
//! 2. Booking allows rescheduling
//! 3. A reason code is present
//! 4. Reason code is recognized
//! 5. Initiator is recognized
//! 6. Requested date/time is one of the booking's slots
//! 7. The moved booking keeps its length within the calendar
//!
//! The first failing check decides the rejection.
//!
//! # Concurrency
//! The manager holds no per-booking state. Callers must serialize requests
//! against the same booking; two in-flight requests would both see the
//! booking as `Confirmed`.

use chrono::{DateTime, TimeDelta, Utc};

use super::RescheduleAttempt;
use crate::config::EngineConfig;
use crate::error::RescheduleRejection;
use crate::models::{Booking, Initiator, ReasonCode, RescheduleRecord, RescheduleRequest};

/// Default currency label attached to fees.
pub const DEFAULT_CURRENCY: &str = "SAR";

/// Validates and applies reschedule requests.
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use project_timeline::models::{Booking, RescheduleRequest};
/// use project_timeline::reschedule::RescheduleManager;
///
/// let d = |day| NaiveDate::from_ymd_opt(2024, 2, day).unwrap();
/// let mut booking = Booking::new("JOB-1", d(1), "10:00")
///     .with_fee(300.0)
///     .with_slot(d(2), "09:00");
/// let request = RescheduleRequest::new("JOB-1", d(2), "09:00").with_reason("weather");
///
/// let record = RescheduleManager::new().submit_request(&mut booking, &request).unwrap();
/// assert_eq!(record.fee, 300.0);
/// assert_eq!(booking.current_start, d(2));
/// ```
#[derive(Debug, Clone)]
pub struct RescheduleManager {
    currency: String,
}

impl Default for RescheduleManager {
    fn default() -> Self {
        Self::new()
    }
}

impl RescheduleManager {
    /// Creates a manager charging in [`DEFAULT_CURRENCY`].
    pub fn new() -> Self {
        Self {
            currency: DEFAULT_CURRENCY.to_string(),
        }
    }

    /// Creates a manager from engine configuration.
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new().with_currency(config.currency.clone())
    }

    /// Sets the currency label.
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    /// Fee for moving `booking`: the booking's flat base fee.
    #[inline]
    pub fn fee_for(&self, booking: &Booking) -> f64 {
        booking.reschedule_fee_base
    }

    /// Submits a request stamped with the current time.
    pub fn submit_request(
        &self,
        booking: &mut Booking,
        request: &RescheduleRequest,
    ) -> Result<RescheduleRecord, RescheduleRejection> {
        self.submit_request_at(booking, request, Utc::now())
    }

    /// Submits a request stamped with `now`.
    ///
    /// On success the booking is moved to the requested slot and the slot is
    /// removed from its catalog. On rejection the booking is untouched.
    pub fn submit_request_at(
        &self,
        booking: &mut Booking,
        request: &RescheduleRequest,
        now: DateTime<Utc>,
    ) -> Result<RescheduleRecord, RescheduleRejection> {
        self.attempt_at(booking, request, now)?.into_result()
    }

    /// Runs one request through the state machine and returns the settled attempt.
    ///
    /// Validation failures settle the attempt as `RescheduleRejected`; only an
    /// out-of-order state transition is returned as `Err`.
    pub fn attempt_at(
        &self,
        booking: &mut Booking,
        request: &RescheduleRequest,
        now: DateTime<Utc>,
    ) -> Result<RescheduleAttempt, RescheduleRejection> {
        let mut attempt = RescheduleAttempt::new(booking.id.clone());
        attempt.submit()?;

        match self.execute(booking, request, now) {
            Ok(record) => attempt.accept(record)?,
            Err(reason) => {
                tracing::debug!(booking_id = %booking.id, %reason, "reschedule rejected");
                attempt.reject(reason)?;
            }
        }
        Ok(attempt)
    }

    fn execute(
        &self,
        booking: &mut Booking,
        request: &RescheduleRequest,
        now: DateTime<Utc>,
    ) -> Result<RescheduleRecord, RescheduleRejection> {
        let (slot_index, reason, initiator) = self.validate(booking, request)?;
        let new_end = request
            .requested_date
            .checked_add_signed(TimeDelta::days(booking.duration_days()))
            .ok_or_else(|| RescheduleRejection::DateOutOfRange {
                booking: booking.id.clone(),
                date: request.requested_date,
            })?;

        let old_slot = booking.current_slot();
        let new_slot = booking.available_slots.remove(slot_index);

        booking.current_start = new_slot.date;
        booking.current_end = new_end;
        booking.current_time = new_slot.time.clone();

        let fee = self.fee_for(booking);
        tracing::info!(
            booking_id = %booking.id,
            from = %old_slot.date,
            to = %new_slot.date,
            %reason,
            %initiator,
            fee,
            "booking rescheduled"
        );

        Ok(RescheduleRecord {
            booking_id: booking.id.clone(),
            old_slot,
            new_slot,
            fee,
            currency: self.currency.clone(),
            reason,
            initiator,
            timestamp: now,
        })
    }

    fn validate(
        &self,
        booking: &Booking,
        request: &RescheduleRequest,
    ) -> Result<(usize, ReasonCode, Initiator), RescheduleRejection> {
        if request.booking_id != booking.id {
            return Err(RescheduleRejection::BookingMismatch {
                booking: booking.id.clone(),
                requested: request.booking_id.clone(),
            });
        }
        if !booking.can_reschedule {
            return Err(RescheduleRejection::NotReschedulable(booking.id.clone()));
        }

        let reason: ReasonCode = match request.reason_code.as_deref().map(str::trim) {
            None | Some("") => return Err(RescheduleRejection::MissingReason),
            Some(code) => code.parse()?,
        };
        let initiator: Initiator = request.initiator.parse()?;

        let slot_index = booking
            .find_slot(request.requested_date, &request.requested_time)
            .ok_or_else(|| RescheduleRejection::SlotUnavailable {
                date: request.requested_date,
                time: request.requested_time.clone(),
            })?;

        Ok((slot_index, reason, initiator))
    }
}
