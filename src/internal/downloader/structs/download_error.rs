//! 下载相关错误类型。

use std::time::Duration;

use reqwest::StatusCode;
use thiserror::Error;

/// 可识别的下载错误：经 `on_error` 交给调用方，下载以 `Failed` 结束。
///
/// 不在此列的异常（例如进度回调 panic）不会被吞掉，而是在调用方重新抛出。
#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("下载器状态无效: {0}")]
    InvalidState(&'static str),

    #[error("URL 格式错误: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("不支持的协议: {0}")]
    UnsupportedScheme(String),

    #[error("HTTP 请求失败: {0}")]
    Request(#[from] reqwest::Error),

    #[error("服务器返回错误状态: {0}")]
    Status(StatusCode),

    #[error("响应缺少 Content-Length，无法下载")]
    MissingContentLength,

    #[error("响应体提前结束：应为 {expected} 字节，实际 {received} 字节")]
    IncompleteBody { expected: u64, received: u64 },

    #[error("等待服务器超时（{0:?}）")]
    Timeout(Duration),

    #[error("创建目录失败: {0}")]
    CreateDir(std::io::Error),

    #[error("创建文件失败: {0}")]
    CreateFile(std::io::Error),

    #[error("写入失败: {0}")]
    WriteFile(std::io::Error),

    #[error("关闭输出失败: {0}")]
    CloseSink(std::io::Error),

    #[error("下载被取消")]
    Cancelled,

    #[error("下载任务被运行时中止")]
    WorkerAborted,
}

/// 错误分类标签，便于调用方按类别处理。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DownloadErrorKind {
    InvalidState,
    InvalidUrl,
    /// 传输层错误、错误状态码、缺少长度、响应体不完整
    Protocol,
    Timeout,
    Cancelled,
    /// 非 HTTP(S) 协议
    Unsupported,
    /// 本地目录、文件或输出流的读写错误
    Io,
}

impl DownloadError {
    pub fn kind(&self) -> DownloadErrorKind {
        match self {
            Self::InvalidState(_) => DownloadErrorKind::InvalidState,
            Self::InvalidUrl(_) => DownloadErrorKind::InvalidUrl,
            Self::UnsupportedScheme(_) => DownloadErrorKind::Unsupported,
            Self::Request(err) if err.is_timeout() => DownloadErrorKind::Timeout,
            Self::Request(_)
            | Self::Status(_)
            | Self::MissingContentLength
            | Self::IncompleteBody { .. } => DownloadErrorKind::Protocol,
            Self::Timeout(_) => DownloadErrorKind::Timeout,
            Self::CreateDir(_) | Self::CreateFile(_) | Self::WriteFile(_) | Self::CloseSink(_) => {
                DownloadErrorKind::Io
            }
            Self::Cancelled | Self::WorkerAborted => DownloadErrorKind::Cancelled,
        }
    }
}
