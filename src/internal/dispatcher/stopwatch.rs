use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// 计时器：停止后保留已累计的时长。
///
/// 「是否在计时」存放在共享的原子标志里，分离出去的 [`IdleHook`](super::IdleHook)
/// 可以在另一个任务里读取它。
#[derive(Debug, Default)]
pub struct Stopwatch {
    running: Arc<AtomicBool>,
    started_at: Option<Instant>,
    accumulated: Duration,
}

impl Stopwatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// 累计时长，包括正在进行的这一段。
    pub fn elapsed(&self) -> Duration {
        self.accumulated
            + self
                .started_at
                .map(|started_at| started_at.elapsed())
                .unwrap_or_default()
    }

    /// 开始计时；已在计时则不变。
    pub fn start(&mut self) {
        if self.started_at.is_none() {
            self.started_at = Some(Instant::now());
            self.running.store(true, Ordering::Release);
        }
    }

    /// 停止计时，保留累计时长。
    pub fn stop(&mut self) {
        if let Some(started_at) = self.started_at.take() {
            self.accumulated += started_at.elapsed();
        }
        self.running.store(false, Ordering::Release);
    }

    /// 停止并清零。
    pub fn reset(&mut self) {
        self.started_at = None;
        self.accumulated = Duration::ZERO;
        self.running.store(false, Ordering::Release);
    }

    /// 清零后重新开始计时。
    pub fn restart(&mut self) {
        self.reset();
        self.start();
    }

    pub(crate) fn running_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.running)
    }
}
