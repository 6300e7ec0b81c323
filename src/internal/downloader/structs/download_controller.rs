use std::sync::atomic::{AtomicU8, Ordering};

use crate::internal::progress::ProgressEvent;
use crate::internal::states::reactive_core::ReactiveProperty;

use super::cancel_error::CancelError;
use super::download_status::DownloadStatus;

/// 下载控制器：调用方与工作任务共享（`Arc`），取消与状态读取都不需要加锁。
///
/// 阶段存放在单个原子变量里，完成、取消、失败只能有一个成立。
/// 最近一次进度和阶段同时发布到 [`ReactiveProperty`]，可以异步监听。
#[derive(Debug)]
pub struct DownloadController {
    phase: AtomicU8,
    status: ReactiveProperty<DownloadStatus>,
    progress: ReactiveProperty<ProgressEvent>,
}

/// 内部实现：由工作任务推进状态
impl DownloadController {
    pub(crate) fn new() -> Self {
        Self {
            phase: AtomicU8::new(DownloadStatus::Idle as u8),
            status: ReactiveProperty::new(DownloadStatus::Idle),
            progress: ReactiveProperty::new(ProgressEvent::default()),
        }
    }

    /// `from → to`；阶段已被其他一方改变（通常是取消）时返回 false。
    pub(crate) fn advance(&self, from: DownloadStatus, to: DownloadStatus) -> bool {
        let advanced = self
            .phase
            .compare_exchange(from as u8, to as u8, Ordering::AcqRel, Ordering::Acquire)
            .is_ok();
        if advanced {
            self.publish_status();
        }
        advanced
    }

    /// 从任一非终态进入 `Failed`。已取消时返回 false：取消优先于同时发生的错误。
    pub(crate) fn fail(&self) -> bool {
        self.settle(DownloadStatus::Failed).is_ok()
    }

    pub(crate) fn publish_progress(&self, event: ProgressEvent) {
        self.progress.update(event);
    }

    /// 从任一非终态进入终态 `to`；已处于终态时返回当时的终态。
    fn settle(&self, to: DownloadStatus) -> Result<(), DownloadStatus> {
        let mut current = self.phase.load(Ordering::Acquire);
        loop {
            let status = DownloadStatus::from_u8(current);
            if status.is_terminal() {
                return Err(status);
            }
            match self.phase.compare_exchange_weak(
                current,
                to as u8,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => {
                    self.publish_status();
                    return Ok(());
                }
                Err(actual) => current = actual,
            }
        }
    }

    /// 在 watch 的写锁内读取阶段，保证最后发布的总是最新阶段。
    fn publish_status(&self) {
        self.status.update_field(|status| {
            *status = DownloadStatus::from_u8(self.phase.load(Ordering::Acquire));
        });
    }
}

/// 外部接口
impl DownloadController {
    /// 请求取消。工作任务会在下一个检查点停下，删除未完成的文件并调用 `on_cancelled`。
    ///
    /// 可以在 `send()` 之前调用，此时下载不会写入任何内容。
    pub fn cancel(&self) -> Result<(), CancelError> {
        match self.settle(DownloadStatus::Cancelled) {
            Ok(()) => Ok(()),
            Err(DownloadStatus::Cancelled) => Err(CancelError::AlreadyCancelled),
            Err(finished) => Err(CancelError::AlreadyFinished(finished)),
        }
    }

    /// 当前阶段
    pub fn status(&self) -> DownloadStatus {
        DownloadStatus::from_u8(self.phase.load(Ordering::Acquire))
    }

    pub fn is_cancelled(&self) -> bool {
        self.status() == DownloadStatus::Cancelled
    }

    /// 是否已完整结束
    pub fn is_done(&self) -> bool {
        self.status() == DownloadStatus::Completed
    }

    pub fn had_error(&self) -> bool {
        self.status() == DownloadStatus::Failed
    }

    /// 最近一次进度
    pub fn progress(&self) -> ProgressEvent {
        self.progress.get_current()
    }

    /// 进度属性的共享句柄；`.watch()` 后 `changed().await` 监听进度。
    pub fn progress_state(&self) -> ReactiveProperty<ProgressEvent> {
        self.progress.clone()
    }

    pub fn status_state(&self) -> ReactiveProperty<DownloadStatus> {
        self.status.clone()
    }
}

/// 响应式属性订阅：外部监听状态变化
impl DownloadController {
    /// 订阅进度变化
    pub fn subscribe_progress<F>(&self, return_current_value: bool, callback: F)
    where
        F: Fn(&ProgressEvent) + Send + 'static,
    {
        let mut watcher = self.progress.watch();

        tokio::spawn(async move {
            if return_current_value {
                callback(&watcher.borrow());
            }

            while let Ok(event) = watcher.changed().await {
                callback(&event);
            }
        });
    }

    /// 订阅阶段变化
    pub fn subscribe_status<F>(&self, return_current_value: bool, callback: F)
    where
        F: Fn(DownloadStatus) + Send + 'static,
    {
        let mut watcher = self.status.watch();

        tokio::spawn(async move {
            if return_current_value {
                callback(watcher.borrow());
            }

            while let Ok(status) = watcher.changed().await {
                callback(status);
            }
        });
    }
}
