//! 节流分发器：按节奏策略决定哪些进度事件转发给调用方的进度回调。

pub mod cadence_policy;
pub mod idle_hook;
pub mod stopwatch;
pub mod throttled_dispatcher;

pub use cadence_policy::CadencePolicy;
pub use idle_hook::IdleHook;
pub use stopwatch::Stopwatch;
pub use throttled_dispatcher::{DownloadDispatcher, ThrottledDispatcher};
