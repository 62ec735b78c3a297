pub mod json;
pub mod timezone;

pub use json::{flatten_deep, is_truthy};
pub use timezone::format_in_timezone;
