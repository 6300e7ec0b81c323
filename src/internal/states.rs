//! 跨任务共享的响应式状态。

pub mod reactive_core;
