use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

pub(crate) type IdleHandler = Box<dyn FnMut() + Send>;

/// 空闲回调：仅在分发器的计时器未运行时触发。
///
/// 下载期间分发器归工作任务所有，下载器会先用
/// [`ThrottledDispatcher::take_idle_hook`](super::ThrottledDispatcher::take_idle_hook)
/// 把空闲回调分离出来，交给等待中的调用方按周期触发；两边通过同一个原子标志判断计时状态。
pub struct IdleHook {
    handler: Option<IdleHandler>,
    timer_running: Arc<AtomicBool>,
}

impl IdleHook {
    pub(crate) fn new(handler: Option<IdleHandler>, timer_running: Arc<AtomicBool>) -> Self {
        Self {
            handler,
            timer_running,
        }
    }

    /// 计时器未运行时调用空闲回调。
    pub fn idle(&mut self) {
        if self.timer_running.load(Ordering::Acquire) {
            return;
        }
        if let Some(handler) = self.handler.as_mut() {
            handler();
        }
    }

    /// 是否注册了空闲回调
    pub fn is_wired(&self) -> bool {
        self.handler.is_some()
    }
}

impl fmt::Debug for IdleHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdleHook")
            .field("wired", &self.handler.is_some())
            .field("timer_running", &self.timer_running.load(Ordering::Relaxed))
            .finish()
    }
}
