mod derived;
mod filter;
mod ordering;
mod types;

pub use derived::{
    autocomplete_titles, available_types, suggest_titles, type_palette, type_style, TypeStyle,
    TypeStyleOverride,
};
pub use filter::{filter_events, normalize_text, EventFilter, EventPredicate, ALL_TYPES};
pub use ordering::{partition_day, sort_for_list, summarize_overflow, DayPartition, Overflow};
pub use types::{normalize_events, Event};
