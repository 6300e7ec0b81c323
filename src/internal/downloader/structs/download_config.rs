use std::time::Duration;

/// 默认超时：连接超时，以及等待响应头、每次读取响应体的超时
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
/// 默认分块大小（字节），每块生成一次进度事件
pub const DEFAULT_BUFFER_SIZE: usize = 8192;
/// 等待下载结束时调用空闲回调的周期
pub const DEFAULT_IDLE_INTERVAL: Duration = Duration::from_millis(10);

/// 下载配置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadConfig {
    pub url: String,
    pub timeout: Duration,
    /// 分块大小；为 0 时下载以 `InvalidState` 失败
    pub buffer_size: usize,
    /// 空闲回调周期；小于 1ms 时按 1ms 处理
    pub idle_interval: Duration,
}

impl DownloadConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout: DEFAULT_TIMEOUT,
            buffer_size: DEFAULT_BUFFER_SIZE,
            idle_interval: DEFAULT_IDLE_INTERVAL,
        }
    }
}
