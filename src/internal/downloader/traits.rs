pub mod download;

pub use download::DownloadHook;
