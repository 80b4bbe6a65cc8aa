//! Recurring event definitions and their expansion into dated occurrences.

mod expand;
mod types;

pub use expand::expand_recurring;
pub use types::{Frequency, RepeatRule};
