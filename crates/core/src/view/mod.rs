//! Calendar views: which days each view shows and how it pages.

mod kind;
mod range;

pub use kind::ViewKind;
pub use range::{active_date, compute_visible_range, navigate, week_start_of, Step};
