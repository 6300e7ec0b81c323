/// 诊断输出接口。
///
/// 实现需要可跨线程共享：下载器在工作任务中写入，调用方可能同时在别处写入。
pub trait DiagnosticsSink: Send + Sync {
    /// 普通状态行
    fn write_line(&self, message: &str);

    /// 警告行；默认按普通状态行输出。
    fn warn(&self, message: &str) {
        self.write_line(message);
    }

    /// 错误行
    fn error(&self, message: &str);
}

/// 默认诊断输出：转发到 `tracing`，由调用方决定订阅与格式。
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDiagnostics;

impl DiagnosticsSink for TracingDiagnostics {
    fn write_line(&self, message: &str) {
        tracing::info!(target: "fetch_dl::downloader", "{message}");
    }

    fn warn(&self, message: &str) {
        tracing::warn!(target: "fetch_dl::downloader", "{message}");
    }

    fn error(&self, message: &str) {
        tracing::error!(target: "fetch_dl::downloader", "{message}");
    }
}
