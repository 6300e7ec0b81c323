use std::fmt;

/// 下载阶段（由下载器内部维护，外部只读监听）
///
/// `Idle → Requesting → Streaming → {Completed | Cancelled | Failed}`，
/// 后三者为终态，彼此互斥。
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DownloadStatus {
    #[default]
    Idle = 0,
    /// 已发出请求，等待响应头
    Requesting = 1,
    /// 正在读取响应体
    Streaming = 2,
    Completed = 3,
    Cancelled = 4,
    Failed = 5,
}

impl DownloadStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled | Self::Failed)
    }

    pub(crate) fn from_u8(value: u8) -> Self {
        match value {
            0 => Self::Idle,
            1 => Self::Requesting,
            2 => Self::Streaming,
            3 => Self::Completed,
            4 => Self::Cancelled,
            _ => Self::Failed,
        }
    }
}

impl fmt::Display for DownloadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Idle => "未开始",
            Self::Requesting => "请求中",
            Self::Streaming => "下载中",
            Self::Completed => "已完成",
            Self::Cancelled => "已取消",
            Self::Failed => "已失败",
        };
        f.write_str(text)
    }
}
