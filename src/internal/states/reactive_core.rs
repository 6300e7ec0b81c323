//! # ReactiveProperty — 响应式属性
//!
//! 基于 [`tokio::sync::watch`] 的「最新值」容器：写端覆盖写入，读端随时读取快照，
//! 或通过 [`PropertyWatcher`] 异步等待下一次变化。
//!
//! 下载器用它发布最近一次进度事件与下载阶段：工作任务写、调用方读，
//! 读写都不阻塞，也不需要额外加锁。
//!
//! ## 使用示例
//! ```rust,no_run
//! use fetch_dl::states::ReactiveProperty;
//!
//! let prop = ReactiveProperty::new(0u64);
//! prop.update(1);
//! assert_eq!(prop.get_current(), 1);
//! ```

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::watch;

/// 响应式属性错误类型
#[derive(Debug, Error)]
pub enum ReactivePropertyError {
    /// 所有写端句柄都已销毁，不会再有新值
    #[error("属性已被销毁")]
    Destroyed,
}

/// 响应式属性：可 Clone 的共享句柄，所有句柄指向同一个值。
#[derive(Clone, Debug)]
pub struct ReactiveProperty<T> {
    sender: Arc<watch::Sender<T>>,
}

impl<T> ReactiveProperty<T>
where
    T: Clone + Send + Sync,
{
    /// 创建一个新的响应式属性。
    pub fn new(value: T) -> Self {
        let (sender, _) = watch::channel(value);
        Self {
            sender: Arc::new(sender),
        }
    }

    /// 覆盖写入新值，所有监听者都会收到通知；没有监听者时同样生效。
    pub fn update(&self, value: T) {
        self.sender.send_replace(value);
    }

    /// 使用闭包原地修改当前值。
    pub fn update_field<F>(&self, updater: F)
    where
        F: FnOnce(&mut T),
    {
        self.sender.send_modify(updater);
    }

    /// 获取当前值的快照（会 clone）。
    pub fn get_current(&self) -> T {
        self.sender.borrow().clone()
    }

    /// 对当前值应用转换函数，不 clone 整个值。
    pub fn map<R, F>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        f(&self.sender.borrow())
    }

    /// 创建一个监听器，用于异步监听属性值的变化。
    pub fn watch(&self) -> PropertyWatcher<T> {
        PropertyWatcher {
            receiver: self.sender.subscribe(),
        }
    }
}

/// 属性监听器，用于异步接收属性值的变化。
#[derive(Debug)]
pub struct PropertyWatcher<T> {
    receiver: watch::Receiver<T>,
}

impl<T> PropertyWatcher<T>
where
    T: Clone,
{
    /// 异步等待属性值的变化，返回新值。
    ///
    /// 写端全部销毁后返回 [`ReactivePropertyError::Destroyed`]。
    pub async fn changed(&mut self) -> Result<T, ReactivePropertyError> {
        self.receiver
            .changed()
            .await
            .map_err(|_| ReactivePropertyError::Destroyed)?;
        Ok(self.receiver.borrow_and_update().clone())
    }

    /// 同步获取当前值的克隆。
    pub fn borrow(&self) -> T {
        self.receiver.borrow().clone()
    }
}
