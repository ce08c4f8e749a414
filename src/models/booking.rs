//! Booking (confirmed job) model.
//!
//! A booking is a confirmed engineering job with a current date range,
//! a time-of-day label, and the catalog of slots it may move to.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A candidate date/time for a booking.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Slot {
    pub date: NaiveDate,
    /// Time-of-day label, e.g. `"09:00"`.
    pub time: String,
}

impl Slot {
    /// Creates a slot.
    pub fn new(date: NaiveDate, time: impl Into<String>) -> Self {
        Self {
            date,
            time: time.into(),
        }
    }

    /// Whether this slot is exactly `date` at `time`.
    #[inline]
    pub fn matches(&self, date: NaiveDate, time: &str) -> bool {
        self.date == date && self.time == time
    }
}

/// A confirmed job.
///
/// When `can_reschedule` is false, `available_slots` must be empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    /// Unique booking identifier.
    pub id: String,
    /// First day of the job.
    pub current_start: NaiveDate,
    /// Last day of the job.
    pub current_end: NaiveDate,
    /// Time-of-day label of the current slot.
    pub current_time: String,
    /// Whether the job may be moved.
    pub can_reschedule: bool,
    /// Flat fee charged per reschedule.
    pub reschedule_fee_base: f64,
    /// Slots the job may move to.
    pub available_slots: Vec<Slot>,
}

impl Booking {
    /// Creates a reschedulable single-day booking with no slots and no fee.
    pub fn new(id: impl Into<String>, start: NaiveDate, time: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            current_start: start,
            current_end: start,
            current_time: time.into(),
            can_reschedule: true,
            reschedule_fee_base: 0.0,
            available_slots: Vec::new(),
        }
    }

    /// Sets the last day of the job.
    pub fn with_end(mut self, end: NaiveDate) -> Self {
        self.current_end = end;
        self
    }

    /// Sets the flat reschedule fee.
    pub fn with_fee(mut self, fee: f64) -> Self {
        self.reschedule_fee_base = fee;
        self
    }

    /// Adds a candidate slot.
    pub fn with_slot(mut self, date: NaiveDate, time: impl Into<String>) -> Self {
        self.available_slots.push(Slot::new(date, time));
        self
    }

    /// Forbids rescheduling and clears the slot catalog.
    pub fn locked(mut self) -> Self {
        self.can_reschedule = false;
        self.available_slots.clear();
        self
    }

    /// Job length in days (`current_end - current_start`).
    #[inline]
    pub fn duration_days(&self) -> i64 {
        (self.current_end - self.current_start).num_days()
    }

    /// The slot currently occupied.
    pub fn current_slot(&self) -> Slot {
        Slot::new(self.current_start, self.current_time.clone())
    }

    /// Position of the slot matching `date`/`time`, if offered.
    pub fn find_slot(&self, date: NaiveDate, time: &str) -> Option<usize> {
        self.available_slots.iter().position(|s| s.matches(date, time))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_booking_builder() {
        let booking = Booking::new("JOB-1", date(2024, 2, 1), "10:00")
            .with_end(date(2024, 2, 3))
            .with_fee(300.0)
            .with_slot(date(2024, 2, 2), "09:00");

        assert!(booking.can_reschedule);
        assert_eq!(booking.duration_days(), 2);
        assert_eq!(booking.reschedule_fee_base, 300.0);
        assert_eq!(booking.find_slot(date(2024, 2, 2), "09:00"), Some(0));
        assert_eq!(booking.find_slot(date(2024, 2, 2), "11:00"), None);
        assert_eq!(booking.current_slot(), Slot::new(date(2024, 2, 1), "10:00"));
    }

    #[test]
    fn test_locked_clears_slots() {
        let booking = Booking::new("JOB-2", date(2024, 2, 1), "10:00")
            .with_slot(date(2024, 2, 2), "09:00")
            .locked();
        assert!(!booking.can_reschedule);
        assert!(booking.available_slots.is_empty());
    }
}
