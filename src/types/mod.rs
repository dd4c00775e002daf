//! Shared vocabulary types: session codes, entry statuses and time display.

mod session_type;
mod status;
pub mod time;

pub use session_type::SessionType;
pub use status::SessionStatus;
pub use time::{format_duration, format_optional, parse_duration};
