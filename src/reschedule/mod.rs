//! Booking reschedule rules.
//!
//! [`RescheduleManager`] checks a [`RescheduleRequest`](crate::models::RescheduleRequest)
//! against a booking's constraints and, on success, moves the booking and
//! returns a [`RescheduleRecord`](crate::models::RescheduleRecord) for the
//! caller to store. Each request runs through its own [`RescheduleAttempt`].
//!
//! # Fee
//! Flat: the booking's `reschedule_fee_base`, with no proration.

mod manager;
mod state;

pub use manager::{RescheduleManager, DEFAULT_CURRENCY};
pub use state::{RescheduleAttempt, RescheduleState};
