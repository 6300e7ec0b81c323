/// 内部导出的模块
mod internal;

#[cfg(test)]
mod tests;

/// 导出核心入口函数
pub use internal::entrance::remote::*;
pub use internal::entrance::text_encoding::TextEncoding;

/// 进度事件
pub mod progress {
    use crate::internal;
    pub use internal::progress::*;
}

/// 节流分发器：决定哪些进度事件交给调用方
pub mod dispatcher {
    use crate::internal;
    pub use internal::dispatcher::*;
}

pub mod downloader {
    use crate::internal;
    // 下载器：类型与入口（以 lib 为中心，此处统一导出）
    pub use internal::downloader::structs::*;
    pub use internal::downloader::traits::*;
}

/// 诊断输出，不能限制死在下载器中，以防有人自己要用
pub mod diagnostics {
    use crate::internal;
    pub use internal::diagnostics::*;
}

pub mod format {
    use crate::internal;
    pub use internal::format::*;
}

pub mod metadata {
    use crate::internal;
    pub use internal::metadata::*;
}

pub mod states {
    use crate::internal;
    pub use internal::states::reactive_core::*;
}
