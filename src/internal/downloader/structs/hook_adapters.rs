//! 单阶段钩子适配器：将闭包包装成 [`DownloadHook`]，供 `with_xx_hook` 使用。

use std::future::Future;

use async_trait::async_trait;

use crate::internal::downloader::traits::download::DownloadHook;

use super::download_error::DownloadError;

/// 仅实现「完成后」的钩子适配器。
pub(crate) struct OnFinishedHookAdapter<F>(pub(crate) F);

#[async_trait]
impl<F, Fut> DownloadHook for OnFinishedHookAdapter<F>
where
    F: FnMut() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    async fn on_finished(&mut self) {
        (self.0)().await
    }
}

/// 仅实现「取消后」的钩子适配器。
pub(crate) struct OnCancelledHookAdapter<F>(pub(crate) F);

#[async_trait]
impl<F, Fut> DownloadHook for OnCancelledHookAdapter<F>
where
    F: FnMut() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    async fn on_cancelled(&mut self) {
        (self.0)().await
    }
}

/// 仅实现「出错后」的钩子适配器；错误以引用传入，闭包为同步调用。
pub(crate) struct OnErrorHookAdapter<F>(pub(crate) F);

#[async_trait]
impl<F> DownloadHook for OnErrorHookAdapter<F>
where
    F: FnMut(&DownloadError) + Send + Sync + 'static,
{
    async fn on_error(&mut self, error: &DownloadError) {
        (self.0)(error);
    }
}
