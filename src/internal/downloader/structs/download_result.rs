use std::fmt;
use std::path::{Path, PathBuf};

use super::download_error::DownloadError;
use super::download_status::DownloadStatus;
use super::download_target::BoxedWriter;

/// 下载成功后的输出。
pub enum DownloadOutput {
    /// 已保存到本地文件
    Saved(PathBuf),
    /// 输出到内存的完整字节
    Bytes(Vec<u8>),
    /// 写入了调用方的输出流；未要求关闭时交还该输出流
    Writer(Option<BoxedWriter>),
}

impl DownloadOutput {
    pub fn into_bytes(self) -> Option<Vec<u8>> {
        match self {
            Self::Bytes(bytes) => Some(bytes),
            _ => None,
        }
    }

    pub fn saved_path(&self) -> Option<&Path> {
        match self {
            Self::Saved(path) => Some(path),
            _ => None,
        }
    }
}

impl fmt::Debug for DownloadOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Saved(path) => f.debug_tuple("Saved").field(path).finish(),
            Self::Bytes(bytes) => write!(f, "Bytes({} bytes)", bytes.len()),
            Self::Writer(writer) => write!(
                f,
                "Writer({})",
                if writer.is_some() { "returned" } else { "closed" }
            ),
        }
    }
}

/// 单次下载的结果：完成、取消或失败，三者互斥。
///
/// 调用方的输出流未要求关闭时，无论结果如何都会交还：
/// 完成时在 [`DownloadOutput::Writer`] 中，取消或失败时在 `writer` 字段中。
pub enum DownloadOutcome {
    Completed(DownloadOutput),
    Cancelled {
        writer: Option<BoxedWriter>,
    },
    Failed {
        error: DownloadError,
        writer: Option<BoxedWriter>,
    },
}

impl DownloadOutcome {
    /// 下载是否完整结束且没有错误
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Completed(_))
    }

    /// 对应的终止状态
    pub fn status(&self) -> DownloadStatus {
        match self {
            Self::Completed(_) => DownloadStatus::Completed,
            Self::Cancelled { .. } => DownloadStatus::Cancelled,
            Self::Failed { .. } => DownloadStatus::Failed,
        }
    }

    pub fn error(&self) -> Option<&DownloadError> {
        match self {
            Self::Failed { error, .. } => Some(error),
            _ => None,
        }
    }

    /// 取回交还的输出流
    pub fn into_writer(self) -> Option<BoxedWriter> {
        match self {
            Self::Completed(DownloadOutput::Writer(writer)) => writer,
            Self::Completed(_) => None,
            Self::Cancelled { writer } | Self::Failed { writer, .. } => writer,
        }
    }

    /// 转成 `Result`；取消视为 [`DownloadError::Cancelled`]。
    pub fn into_result(self) -> Result<DownloadOutput, DownloadError> {
        match self {
            Self::Completed(output) => Ok(output),
            Self::Cancelled { .. } => Err(DownloadError::Cancelled),
            Self::Failed { error, .. } => Err(error),
        }
    }
}

impl fmt::Debug for DownloadOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Completed(output) => f.debug_tuple("Completed").field(output).finish(),
            Self::Cancelled { writer } => f
                .debug_struct("Cancelled")
                .field("writer_returned", &writer.is_some())
                .finish(),
            Self::Failed { error, writer } => f
                .debug_struct("Failed")
                .field("error", error)
                .field("writer_returned", &writer.is_some())
                .finish(),
        }
    }
}
