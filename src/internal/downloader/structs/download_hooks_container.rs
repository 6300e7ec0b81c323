use crate::internal::downloader::traits::download::DownloadHook;

use super::download_error::DownloadError;

/// 钩子容器：按注册顺序依次执行终止钩子。
#[derive(Default)]
pub struct DownloadHooksContainer {
    hooks: Vec<Box<dyn DownloadHook>>,
}

impl DownloadHooksContainer {
    /// 添加一个下载钩子；支持多次调用以注册多个钩子，按添加顺序依次执行。
    pub fn add(&mut self, hook: impl DownloadHook + 'static) {
        self.hooks.push(Box::new(hook));
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    pub async fn run_on_finished(&mut self) {
        for h in self.hooks.iter_mut() {
            h.on_finished().await;
        }
    }

    pub async fn run_on_cancelled(&mut self) {
        for h in self.hooks.iter_mut() {
            h.on_cancelled().await;
        }
    }

    pub async fn run_on_error(&mut self, error: &DownloadError) {
        for h in self.hooks.iter_mut() {
            h.on_error(error).await;
        }
    }
}

impl std::fmt::Debug for DownloadHooksContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DownloadHooksContainer")
            .field("hooks", &self.hooks.len())
            .finish()
    }
}
