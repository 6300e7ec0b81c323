//! 下载目标的写入端，以及未完成文件的清理。

use std::path::{Path, PathBuf};

use tokio::fs::{self, File};
use tokio::io::AsyncWriteExt;

use super::structs::{BoxedWriter, DownloadError, DownloadOutput, DownloadTarget};

/// 未完成文件守卫：析构时若仍处于武装状态且文件已创建，则删除文件。
///
/// 删除在 `Drop` 中同步完成，所以回调 panic 导致的栈展开也会清理文件。
/// 必须先于写入端声明，保证文件句柄先关闭再删除。
pub(super) struct PartialFileGuard {
    path: Option<PathBuf>,
    armed: bool,
    created: bool,
}

impl PartialFileGuard {
    pub(super) fn new(target: &DownloadTarget) -> Self {
        Self {
            path: target.file_path().map(PathBuf::from),
            armed: true,
            created: false,
        }
    }

    fn track_created(&mut self) {
        self.created = true;
    }

    /// 下载已完成，保留文件
    pub(super) fn disarm(&mut self) {
        self.armed = false;
    }
}

impl Drop for PartialFileGuard {
    fn drop(&mut self) {
        if !self.armed || !self.created {
            return;
        }
        if let Some(path) = self.path.as_ref()
            && path.exists()
        {
            let _ = std::fs::remove_file(path);
        }
    }
}

/// 打开后的写入端。文件在第一次写入时才创建。
pub(super) enum OpenSink {
    File { path: PathBuf, file: Option<File> },
    Memory(Vec<u8>),
    Writer {
        writer: BoxedWriter,
        close_when_done: bool,
    },
}

impl OpenSink {
    /// 准备写入端；文件目标会先创建缺失的父目录。
    pub(super) async fn prepare(target: DownloadTarget) -> Result<Self, DownloadError> {
        match target {
            DownloadTarget::File(path) => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    fs::create_dir_all(parent)
                        .await
                        .map_err(DownloadError::CreateDir)?;
                }
                Ok(Self::File { path, file: None })
            }
            DownloadTarget::Memory => Ok(Self::Memory(Vec::new())),
            DownloadTarget::Writer {
                writer,
                close_when_done,
            } => Ok(Self::Writer {
                writer,
                close_when_done,
            }),
        }
    }

    pub(super) async fn write(
        &mut self,
        chunk: &[u8],
        guard: &mut PartialFileGuard,
    ) -> Result<(), DownloadError> {
        match self {
            Self::File { path, file } => {
                if file.is_none() {
                    *file = Some(create_file(path, guard).await?);
                }
                if let Some(f) = file.as_mut() {
                    f.write_all(chunk).await.map_err(DownloadError::WriteFile)?;
                }
            }
            Self::Memory(buffer) => buffer.extend_from_slice(chunk),
            Self::Writer { writer, .. } => {
                writer
                    .write_all(chunk)
                    .await
                    .map_err(DownloadError::WriteFile)?;
            }
        }
        Ok(())
    }

    /// 收尾：flush 自己打开的文件，调用方的输出流只在要求时 shutdown。
    ///
    /// 只借用写入端，失败时调用方的输出流仍可交还。
    pub(super) async fn close(
        &mut self,
        guard: &mut PartialFileGuard,
    ) -> Result<(), DownloadError> {
        match self {
            Self::File { path, file } => {
                if let Some(f) = file.as_mut() {
                    f.flush().await.map_err(DownloadError::CloseSink)?;
                } else {
                    // 空响应体：此时才创建空文件
                    *file = Some(create_file(path, guard).await?);
                }
            }
            Self::Memory(_) => {}
            Self::Writer {
                writer,
                close_when_done,
            } => {
                writer.flush().await.map_err(DownloadError::CloseSink)?;
                if *close_when_done {
                    writer.shutdown().await.map_err(DownloadError::CloseSink)?;
                }
            }
        }
        Ok(())
    }

    /// 已 [`close`](Self::close) 的写入端转成下载输出；文件句柄随之关闭。
    pub(super) fn into_output(self) -> DownloadOutput {
        match self {
            Self::File { path, .. } => DownloadOutput::Saved(path),
            Self::Memory(buffer) => DownloadOutput::Bytes(buffer),
            Self::Writer {
                writer,
                close_when_done,
            } => DownloadOutput::Writer((!close_when_done).then_some(writer)),
        }
    }

    /// 下载未完成时取回调用方的输出流；下载器拥有的写入端直接丢弃。
    pub(super) fn into_unowned_writer(self) -> Option<BoxedWriter> {
        match self {
            Self::Writer {
                writer,
                close_when_done: false,
            } => Some(writer),
            _ => None,
        }
    }
}

async fn create_file(path: &Path, guard: &mut PartialFileGuard) -> Result<File, DownloadError> {
    let file = File::create(path).await.map_err(DownloadError::CreateFile)?;
    guard.track_created();
    Ok(file)
}
