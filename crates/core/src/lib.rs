//! Scheduling engine for the zarvan calendar widget.
//!
//! Everything in this crate is pure: no I/O, no async, no shared state. A host
//! (the browser widget, the `zarvan` CLI, a test) hands in its base event list
//! and highlight rules, and gets back day buckets, layout records and highlight
//! decisions for one render pass.
//!
//! User-facing dates live in the Jalali calendar ([`calendar::CivilDate`]).
//! Day stepping is done on Gregorian [`chrono::NaiveDate`]s, and the
//! [`calendar`] module is the only place the two meet.
//!
//! # Example
//!
//! ```
//! use zarvan_core::calendar::{to_gregorian, CivilDate};
//! use zarvan_core::event::{EventFilter, Event};
//! use zarvan_core::pipeline::build_day_bucket;
//! use zarvan_core::view::{compute_visible_range, ViewKind};
//! use zarvan_core::EngineConfig;
//!
//! let config = EngineConfig::default();
//! let anchor = to_gregorian(CivilDate::new(1403, 1, 10));
//! let range = compute_visible_range(ViewKind::Month, anchor, &config);
//!
//! let events = vec![Event::all_day("Nowruz", CivilDate::new(1403, 1, 1))];
//! let bucket = build_day_bucket(&events, range, &EventFilter::default(), &config);
//!
//! assert_eq!(bucket.day(CivilDate::new(1403, 1, 1)).count(), 1);
//! ```

pub mod bucket;
pub mod calendar;
pub mod config;
pub mod error;
pub mod event;
pub mod highlight;
pub mod layout;
pub mod pipeline;
pub mod recurrence;
pub mod serde;
pub mod view;

pub use config::EngineConfig;
pub use error::{ConfigError, EngineError, Result};
pub use layout::LayoutPolicy;
