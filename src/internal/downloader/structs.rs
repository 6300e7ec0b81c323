pub mod cancel_error;
pub mod download_config;
pub mod download_controller;
pub mod download_error;
pub mod download_hooks_container;
pub mod download_result;
pub mod download_status;
pub mod download_target;
pub mod downloader;
pub(crate) mod hook_adapters;

// 重导出公共类型
pub use cancel_error::CancelError;
pub use download_config::{
    DEFAULT_BUFFER_SIZE, DEFAULT_IDLE_INTERVAL, DEFAULT_TIMEOUT, DownloadConfig,
};
pub use download_controller::DownloadController;
pub use download_error::{DownloadError, DownloadErrorKind};
pub use download_hooks_container::DownloadHooksContainer;
pub use download_result::{DownloadOutcome, DownloadOutput};
pub use download_status::DownloadStatus;
pub use download_target::{BoxedWriter, DownloadTarget};
pub use downloader::Downloader;
