//! 人类可读的字节数与时长格式化。

pub mod bytes;
pub mod duration;

pub use bytes::{BYTE_MAGNITUDES, bytes_to_string};
pub use duration::{format_duration, timespan_to_string};
