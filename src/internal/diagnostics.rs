//! 诊断输出：下载器把人类可读的状态行写到注入的 [`DiagnosticsSink`]，不依赖具体实现。

pub mod line_logger;
pub mod sink;

pub use line_logger::LineLogger;
pub use sink::{DiagnosticsSink, TracingDiagnostics};
