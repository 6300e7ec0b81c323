//! 下载引擎：一次 HTTP GET，流式写入目标，发布进度，支持协作式取消。
//!
//! 对外使用入口为 [`crate::downloader`]。

mod attempt;
mod sink;
pub mod structs;
pub mod traits;
