use std::future::Future;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::internal::diagnostics::{DiagnosticsSink, TracingDiagnostics};
use crate::internal::dispatcher::DownloadDispatcher;
use crate::internal::downloader::attempt::Attempt;
use crate::internal::downloader::traits::download::DownloadHook;
use crate::internal::progress::ProgressEvent;
use crate::internal::states::reactive_core::ReactiveProperty;

use super::download_config::DownloadConfig;
use super::download_controller::DownloadController;
use super::download_error::DownloadError;
use super::download_hooks_container::DownloadHooksContainer;
use super::download_result::DownloadOutcome;
use super::download_target::{BoxedWriter, DownloadTarget};
use super::hook_adapters::{OnCancelledHookAdapter, OnErrorHookAdapter, OnFinishedHookAdapter};

/// 单次下载器。不实现 Clone，`send` 消费自身，一个下载器只能执行一次下载。
///
/// ```rust,no_run
/// # async fn demo() -> Result<(), fetch_dl::downloader::DownloadError> {
/// use fetch_dl::downloader::Downloader;
///
/// let downloader = Downloader::new("https://example.com/file.bin").save_to("downloads/file.bin");
/// let controller = downloader.controller();
/// let outcome = downloader.send().await;
/// assert!(controller.is_done() == outcome.is_success());
/// # Ok(())
/// # }
/// ```
pub struct Downloader {
    config: DownloadConfig,
    target: DownloadTarget,
    dispatcher: Option<DownloadDispatcher>,
    diagnostics: Arc<dyn DiagnosticsSink>,
    hooks: DownloadHooksContainer,
    controller: Arc<DownloadController>,
}

impl Downloader {
    /// 默认输出到内存，诊断输出走 `tracing`。
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            config: DownloadConfig::new(url),
            target: DownloadTarget::Memory,
            dispatcher: None,
            diagnostics: Arc::new(TracingDiagnostics),
            hooks: DownloadHooksContainer::default(),
            controller: Arc::new(DownloadController::new()),
        }
    }

    /// 设置保存路径。传空路径表示不保存到文件，改为输出到内存。
    pub fn save_to(mut self, path: impl AsRef<Path>) -> Self {
        let p = path.as_ref();
        self.target = if p.as_os_str().is_empty() {
            DownloadTarget::Memory
        } else {
            DownloadTarget::File(p.to_path_buf())
        };
        self
    }

    /// 设置为输出字节数组（默认）。
    pub fn output_bytes(mut self) -> Self {
        self.target = DownloadTarget::Memory;
        self
    }

    /// 写入调用方的输出流；`close_when_done` 为 true 时下载器在完成后 shutdown 它，
    /// 否则 flush 后通过 [`DownloadOutput::Writer`](super::DownloadOutput::Writer) 交还。
    pub fn write_into<W>(mut self, writer: W, close_when_done: bool) -> Self
    where
        W: tokio::io::AsyncWrite + Send + Sync + Unpin + 'static,
    {
        let writer: BoxedWriter = Box::new(writer);
        self.target = DownloadTarget::Writer {
            writer,
            close_when_done,
        };
        self
    }

    pub fn target(mut self, target: DownloadTarget) -> Self {
        self.target = target;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// 设置分块大小（字节）
    pub fn buffer_size(mut self, buffer_size: usize) -> Self {
        self.config.buffer_size = buffer_size;
        self
    }

    /// 设置空闲回调周期
    pub fn idle_interval(mut self, interval: Duration) -> Self {
        self.config.idle_interval = interval;
        self
    }

    pub fn with_dispatcher(mut self, dispatcher: DownloadDispatcher) -> Self {
        self.dispatcher = Some(dispatcher);
        self
    }

    /// 替换诊断输出
    pub fn with_diagnostics(mut self, diagnostics: Arc<dyn DiagnosticsSink>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    /// 注册「完成后」钩子
    pub fn with_on_finished_hook<F, Fut>(mut self, f: F) -> Self
    where
        F: FnMut() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.hooks.add(OnFinishedHookAdapter(f));
        self
    }

    /// 注册「取消后」钩子
    pub fn with_on_cancelled_hook<F, Fut>(mut self, f: F) -> Self
    where
        F: FnMut() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.hooks.add(OnCancelledHookAdapter(f));
        self
    }

    /// 注册「出错后」钩子
    pub fn with_on_error_hook<F>(mut self, f: F) -> Self
    where
        F: FnMut(&DownloadError) + Send + Sync + 'static,
    {
        self.hooks.add(OnErrorHookAdapter(f));
        self
    }

    /// 添加完整钩子。
    pub fn with_hook(mut self, hook: impl DownloadHook + 'static) -> Self {
        self.hooks.add(hook);
        self
    }

    pub fn url(&self) -> &str {
        &self.config.url
    }

    pub fn config(&self) -> &DownloadConfig {
        &self.config
    }

    /// 控制器句柄：可在另一个任务中取消下载或读取状态。
    pub fn controller(&self) -> Arc<DownloadController> {
        Arc::clone(&self.controller)
    }

    /// 内置的下载进度状态；返回可共享句柄，`.watch()` 后 `changed().await` 监听进度。
    pub fn progress(&self) -> ReactiveProperty<ProgressEvent> {
        self.controller.progress_state()
    }

    /// 执行下载。
    ///
    /// 请求与读取在单独的 tokio 任务中进行；当前任务等待其结束，期间按
    /// `idle_interval` 周期调用分发器的空闲回调。工作任务中的 panic
    /// （例如进度回调 panic）会在这里重新抛出。
    pub async fn send(self) -> DownloadOutcome {
        let Self {
            config,
            target,
            dispatcher,
            diagnostics,
            hooks,
            controller,
        } = self;

        let mut dispatcher = dispatcher.unwrap_or_default();
        let mut idle_hook = dispatcher.take_idle_hook();
        let idle_interval = config.idle_interval.max(Duration::from_millis(1));

        let attempt = Attempt {
            config,
            target,
            dispatcher,
            diagnostics,
            hooks,
            controller: Arc::clone(&controller),
            returned_writer: None,
        };
        let mut worker = AbortOnDrop(tokio::spawn(attempt.run()));

        let mut ticker = tokio::time::interval(idle_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                joined = &mut worker.0 => {
                    return match joined {
                        Ok(outcome) => outcome,
                        Err(err) if err.is_panic() => std::panic::resume_unwind(err.into_panic()),
                        Err(_) => {
                            controller.fail();
                            DownloadOutcome::Failed {
                                error: DownloadError::WorkerAborted,
                                writer: None,
                            }
                        }
                    };
                }
                _ = ticker.tick() => idle_hook.idle(),
            }
        }
    }
}

impl std::fmt::Debug for Downloader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Downloader")
            .field("config", &self.config)
            .field("target", &self.target)
            .field("dispatcher", &self.dispatcher)
            .field("hooks", &self.hooks)
            .field("status", &self.controller.status())
            .finish_non_exhaustive()
    }
}

/// `send` 的 future 被丢弃时一并中止工作任务，未完成的文件随之删除。
struct AbortOnDrop<T>(JoinHandle<T>);

impl<T> Drop for AbortOnDrop<T> {
    fn drop(&mut self) {
        self.0.abort();
    }
}
