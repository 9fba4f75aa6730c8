//! Scalar wrappers for columns that need a custom encoding.

mod json_list;
pub use json_list::{Int64s, Strings};

mod time;
pub use time::Time;

/// Layout of a date: `2006-01-02`.
pub const DATE_LAYOUT: &str = "%Y-%m-%d";

/// Layout of a time of day: `15:04:05`.
pub const TIME_LAYOUT: &str = "%H:%M:%S";

/// Layout of a date and time: `2006-01-02 15:04:05`.
pub const DATETIME_LAYOUT: &str = "%Y-%m-%d %H:%M:%S";

/// Marker type for a nullable timestamp that is never mapped to a column.
pub type NullTime = Option<chrono::NaiveDateTime>;
