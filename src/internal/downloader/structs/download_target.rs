use std::fmt;
use std::path::{Path, PathBuf};

use tokio::io::AsyncWrite;

/// 调用方提供的输出流
pub type BoxedWriter = Box<dyn AsyncWrite + Send + Sync + Unpin>;

/// 下载目标
#[derive(Default)]
pub enum DownloadTarget {
    /// 保存到本地文件：自动创建父目录，文件会被创建或截断；
    /// 未完成的下载结束时删除已写入的文件。
    File(PathBuf),
    /// 输出到内存
    #[default]
    Memory,
    /// 写入调用方的输出流；完成时总会 flush，
    /// 只有 `close_when_done` 为 true 时才 shutdown。
    Writer {
        writer: BoxedWriter,
        close_when_done: bool,
    },
}

impl DownloadTarget {
    pub fn file_path(&self) -> Option<&Path> {
        match self {
            Self::File(path) => Some(path),
            _ => None,
        }
    }

    /// 取出不归下载器关闭的输出流
    pub(crate) fn into_unowned_writer(self) -> Option<BoxedWriter> {
        match self {
            Self::Writer {
                writer,
                close_when_done: false,
            } => Some(writer),
            _ => None,
        }
    }
}

impl fmt::Debug for DownloadTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => f.debug_tuple("File").field(path).finish(),
            Self::Memory => f.write_str("Memory"),
            Self::Writer {
                close_when_done, ..
            } => f
                .debug_struct("Writer")
                .field("close_when_done", close_when_done)
                .finish_non_exhaustive(),
        }
    }
}
