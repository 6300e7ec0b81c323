//! 进度事件：已读取字节数与总字节数的快照。

pub mod progress_event;
pub mod progress_factor;

pub use progress_event::ProgressEvent;
pub use progress_factor::ProgressFactor;
