use std::fmt;

use crate::internal::format::bytes_to_string;

use super::progress_factor::ProgressFactor;

/// 下载进度快照：不可变，每读完一块数据由下载器生成一次。
///
/// 同一次下载内 `bytes_read` 单调不减，且不超过 `total_bytes`。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProgressEvent {
    /// 已读取的字节数
    pub bytes_read: u64,
    /// 响应声明的总字节数（Content-Length）
    pub total_bytes: u64,
}

impl ProgressEvent {
    pub fn new(bytes_read: u64, total_bytes: u64) -> Self {
        Self {
            bytes_read,
            total_bytes,
        }
    }

    /// 完成事件 `{total, total}`，下载器在收尾时补发。
    pub fn completed(total_bytes: u64) -> Self {
        Self::new(total_bytes, total_bytes)
    }

    /// 剩余字节数
    pub fn bytes_left(&self) -> u64 {
        self.total_bytes.saturating_sub(self.bytes_read)
    }

    /// 进度百分比（0～100）
    pub fn percentage(&self) -> f64 {
        self.factor() * 100.0
    }

    pub fn is_complete(&self) -> bool {
        self.bytes_read >= self.total_bytes
    }

    pub fn read_bytes_to_string(&self) -> String {
        bytes_to_string(self.bytes_read)
    }

    pub fn total_bytes_to_string(&self) -> String {
        bytes_to_string(self.total_bytes)
    }
}

impl ProgressFactor for ProgressEvent {
    /// 总大小为 0 时视为已完成（空响应体读完即结束）。
    fn factor(&self) -> f64 {
        if self.total_bytes == 0 {
            return 1.0;
        }
        self.bytes_read as f64 / self.total_bytes as f64
    }
}

impl fmt::Display for ProgressEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let percentage = (self.percentage() * 10.0).round() / 10.0;
        write!(
            f,
            "{}% ({} / {})",
            percentage,
            self.read_bytes_to_string(),
            self.total_bytes_to_string()
        )
    }
}
