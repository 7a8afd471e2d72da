pub mod logging;
pub mod path;
pub mod table;
pub mod time;

pub use time::{format_duration, format_timestamp};
