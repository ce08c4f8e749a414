//! Timeline and booking domain models.
//!
//! Plain value types handed to the engine by a data-loading layer. The
//! engine never persists them.
//!
//! # Domain Mappings
//!
//! | project-timeline | Marketplace screen |
//! |------------------|--------------------|
//! | Project | Gantt timeline header window |
//! | Task | Gantt bar row |
//! | Booking | Confirmed job card |
//! | Slot | Selectable date/time chip |
//! | RescheduleRecord | Reschedule history entry |

mod booking;
mod project;
mod reschedule;
mod task;

pub use booking::{Booking, Slot};
pub use project::Project;
pub use reschedule::{Initiator, ReasonCode, RescheduleRecord, RescheduleRequest};
pub use task::{Task, TaskStatus};
