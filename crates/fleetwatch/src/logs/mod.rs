//! Logs module — entry value type, payload parsing, and rendering.

pub mod entry;
pub mod format;
pub mod payload;

pub use entry::{LogEntry, StreamChannel};
pub use format::format_entry;
