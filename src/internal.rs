//! 内部实现：按领域划分子模块，对外导出以 `lib.rs` 为准。

pub mod diagnostics;
pub mod dispatcher;
pub mod downloader;
pub mod entrance;
pub mod format;
pub mod metadata;
pub mod progress;
pub mod states;
