//! 下载相关 trait：终止钩子接口，供下载器在收尾时调用。

use async_trait::async_trait;

use crate::internal::downloader::structs::DownloadError;

/// 下载终止钩子：每次下载只会调用其中一个，且在资源清理之后调用。
///
/// 使用方式二选一（可混用）：
/// - **单阶段**：用 `with_on_finished_hook` / `with_on_cancelled_hook` / `with_on_error_hook` 传入闭包；
/// - **完整钩子**：实现本 trait，通过下载器的 `with_hook` 注册。
#[async_trait]
pub trait DownloadHook: Send + Sync {
    /// 下载完整结束后调用。
    async fn on_finished(&mut self) {}

    /// 下载被取消后调用；此时未完成的本地文件已被删除。
    async fn on_cancelled(&mut self) {}

    /// 下载因可识别的错误失败后调用。
    async fn on_error(&mut self, _error: &DownloadError) {}
}
