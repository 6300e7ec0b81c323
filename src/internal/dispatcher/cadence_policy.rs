use std::time::Duration;

/// 进度转发的节奏策略。
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum CadencePolicy {
    /// 每个事件都转发
    #[default]
    None,
    /// 两次转发之间至少间隔指定时长
    Cooldown(Duration),
    /// 整个下载过程大约转发 n 次：完成比例比上次转发时增长超过 `1/n` 才转发
    FixedCount(u32),
}

impl CadencePolicy {
    /// `FixedCount` 的步长；n 为 0 时按 1 处理。
    pub(crate) fn fixed_step(count: u32) -> f64 {
        1.0 / f64::from(count.max(1))
    }
}
