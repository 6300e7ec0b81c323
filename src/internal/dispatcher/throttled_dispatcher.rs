use std::error::Error;
use std::fmt;
use std::time::Duration;

use crate::internal::downloader::structs::DownloadStatus;
use crate::internal::progress::{ProgressEvent, ProgressFactor};

use super::cadence_policy::CadencePolicy;
use super::idle_hook::{IdleHandler, IdleHook};
use super::stopwatch::Stopwatch;

type ProgressHandler<T> = Box<dyn FnMut(&T) + Send>;
type ErrorHandler = Box<dyn FnMut(&(dyn Error + 'static)) + Send>;
type StatusHandler = Box<dyn FnMut(DownloadStatus) + Send>;

/// 下载器使用的分发器类型
pub type DownloadDispatcher = ThrottledDispatcher<ProgressEvent>;

/// 节流分发器：按 [`CadencePolicy`] 过滤进度事件，再交给进度回调。
///
/// 一个分发器只服务一次下载，下载器在任何结束路径上调用 [`stop`](Self::stop)。
/// 计时器由 `Cooldown` 策略在转发时重启，运行期间空闲回调不触发；
/// 其余策略下空闲回调贯穿整个下载。分发器本身不做 I/O，回调里的 panic 原样向上传播。
///
/// ```rust,no_run
/// use std::time::Duration;
/// use fetch_dl::dispatcher::DownloadDispatcher;
///
/// let dispatcher = DownloadDispatcher::with_cooldown(Duration::from_millis(200))
///     .with_on_progress(|event| println!("{event}"));
/// ```
pub struct ThrottledDispatcher<T> {
    policy: CadencePolicy,
    force_first_update: bool,
    force_single_completion: bool,

    stopwatch: Stopwatch,
    last_forwarded: f64,
    seen_first_update: bool,
    seen_first_completion: bool,

    on_progress: Option<ProgressHandler<T>>,
    on_idle: Option<IdleHandler>,
    on_error: Option<ErrorHandler>,
    on_status_change: Option<StatusHandler>,
}

impl<T: ProgressFactor> ThrottledDispatcher<T> {
    pub fn new(policy: CadencePolicy) -> Self {
        Self {
            policy,
            force_first_update: false,
            force_single_completion: true,
            stopwatch: Stopwatch::new(),
            last_forwarded: 0.0,
            seen_first_update: false,
            seen_first_completion: false,
            on_progress: None,
            on_idle: None,
            on_error: None,
            on_status_change: None,
        }
    }

    /// 不节流，每个事件都转发
    pub fn unthrottled() -> Self {
        Self::new(CadencePolicy::None)
    }

    /// 两次转发之间至少间隔 `cooldown`
    pub fn with_cooldown(cooldown: Duration) -> Self {
        Self::new(CadencePolicy::Cooldown(cooldown))
    }

    /// 整个过程大约转发 `count` 次；`count` 为 0 时按 1 处理。
    pub fn with_fixed_count(count: u32) -> Self {
        Self::new(CadencePolicy::FixedCount(count.max(1)))
    }

    pub fn with_on_progress<F>(mut self, handler: F) -> Self
    where
        F: FnMut(&T) + Send + 'static,
    {
        self.on_progress = Some(Box::new(handler));
        self
    }

    /// 空闲回调，见 [`IdleHook`]。
    pub fn with_on_idle<F>(mut self, handler: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        self.on_idle = Some(Box::new(handler));
        self
    }

    pub fn with_on_error<F>(mut self, handler: F) -> Self
    where
        F: FnMut(&(dyn Error + 'static)) + Send + 'static,
    {
        self.on_error = Some(Box::new(handler));
        self
    }

    /// 下载阶段每次变化都会调用
    pub fn with_on_status_change<F>(mut self, handler: F) -> Self
    where
        F: FnMut(DownloadStatus) + Send + 'static,
    {
        self.on_status_change = Some(Box::new(handler));
        self
    }

    /// `FixedCount` 策略下，无论增量多少都转发第一个事件。默认关闭。
    pub fn force_first_update(mut self, enabled: bool) -> Self {
        self.force_first_update = enabled;
        self
    }

    /// 完成事件（factor == 1）最多转发一次。默认开启。
    pub fn force_single_completion(mut self, enabled: bool) -> Self {
        self.force_single_completion = enabled;
        self
    }

    pub fn policy(&self) -> CadencePolicy {
        self.policy
    }

    /// 计时器是否在运行，即处于 `start()` 与 `stop()` 之间。
    pub fn is_running(&self) -> bool {
        self.stopwatch.is_running()
    }

    /// 决定是否把 `event` 转发给进度回调。
    pub fn update(&mut self, event: &T) {
        let factor = event.factor();

        if factor == 1.0 && self.force_single_completion {
            if !self.seen_first_completion {
                self.seen_first_completion = true;
                self.forward(event);
            }
            return;
        }

        match self.policy {
            CadencePolicy::None => self.forward(event),
            CadencePolicy::Cooldown(cooldown) => {
                if !self.stopwatch.is_running() || self.stopwatch.elapsed() >= cooldown {
                    self.stopwatch.restart();
                    self.forward(event);
                }
            }
            CadencePolicy::FixedCount(count) => {
                let forced = self.force_first_update && !self.seen_first_update;
                if forced || factor - self.last_forwarded > CadencePolicy::fixed_step(count) {
                    self.last_forwarded = factor;
                    self.forward(event);
                }
            }
        }

        self.seen_first_update = true;
    }

    /// 计时器未运行时调用空闲回调。
    pub fn idle(&mut self) {
        if self.stopwatch.is_running() {
            return;
        }
        if let Some(handler) = self.on_idle.as_mut() {
            handler();
        }
    }

    /// 清零并启动计时器。
    pub fn start(&mut self) {
        self.stopwatch.restart();
    }

    /// 停止计时器。
    pub fn stop(&mut self) {
        self.stopwatch.stop();
    }

    /// 把错误交给错误回调；未注册时忽略。
    pub fn error(&mut self, error: &(dyn Error + 'static)) {
        if let Some(handler) = self.on_error.as_mut() {
            handler(error);
        }
    }

    pub fn status_changed(&mut self, status: DownloadStatus) {
        if let Some(handler) = self.on_status_change.as_mut() {
            handler(status);
        }
    }

    /// 分离空闲回调，交给等待下载结束的任务调用。
    ///
    /// 分离后分发器自身的 [`idle`](Self::idle) 不再触发回调。
    pub fn take_idle_hook(&mut self) -> IdleHook {
        IdleHook::new(self.on_idle.take(), self.stopwatch.running_flag())
    }

    fn forward(&mut self, event: &T) {
        if let Some(handler) = self.on_progress.as_mut() {
            handler(event);
        }
    }
}

impl<T: ProgressFactor> Default for ThrottledDispatcher<T> {
    fn default() -> Self {
        Self::unthrottled()
    }
}

impl<T> fmt::Debug for ThrottledDispatcher<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThrottledDispatcher")
            .field("policy", &self.policy)
            .field("force_first_update", &self.force_first_update)
            .field("force_single_completion", &self.force_single_completion)
            .field("running", &self.stopwatch.is_running())
            .field("last_forwarded", &self.last_forwarded)
            .field("seen_first_update", &self.seen_first_update)
            .field("seen_first_completion", &self.seen_first_completion)
            .finish_non_exhaustive()
    }
}
