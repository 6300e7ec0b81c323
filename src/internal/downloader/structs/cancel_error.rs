use thiserror::Error;

use super::download_status::DownloadStatus;

/// 调用 [`DownloadController::cancel`](super::DownloadController::cancel) 的用法错误。
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CancelError {
    #[error("下载已被取消")]
    AlreadyCancelled,

    /// 下载已完成或已失败，状态保持不变
    #[error("下载已结束（{0}），无法取消")]
    AlreadyFinished(DownloadStatus),
}
