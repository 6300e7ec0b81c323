/// 能给出完成比例的进度值；节流分发器只依赖这一项。
pub trait ProgressFactor {
    /// 完成比例，`1.0` 表示已完成。
    fn factor(&self) -> f64;
}

impl ProgressFactor for f64 {
    fn factor(&self) -> f64 {
        *self
    }
}
