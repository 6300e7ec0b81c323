//! 入口函数：基于下载器的一次性便捷调用。

pub mod remote;
pub mod text_encoding;
