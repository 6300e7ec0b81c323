use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::internal::dispatcher::DownloadDispatcher;
use crate::internal::downloader::structs::{DownloadError, DownloadOutput, Downloader};

use super::text_encoding::TextEncoding;

fn build_downloader(
    url: &str,
    timeout: Duration,
    dispatcher: Option<DownloadDispatcher>,
) -> Downloader {
    let downloader = Downloader::new(url).timeout(timeout);
    match dispatcher {
        Some(dispatcher) => downloader.with_dispatcher(dispatcher),
        None => downloader,
    }
}

fn expect_bytes(output: DownloadOutput) -> Result<Vec<u8>, DownloadError> {
    output
        .into_bytes()
        .ok_or(DownloadError::InvalidState("下载结果不是内存数据"))
}

/// 下载到内存，返回完整字节。取消视为 [`DownloadError::Cancelled`]。
pub async fn download_bytes(
    url: &str,
    timeout: Duration,
    dispatcher: Option<DownloadDispatcher>,
) -> Result<Vec<u8>, DownloadError> {
    let output = build_downloader(url, timeout, dispatcher)
        .output_bytes()
        .send()
        .await
        .into_result()?;
    expect_bytes(output)
}

/// 下载并按 `encoding` 解码为字符串。
///
/// example:
/// ```rust,no_run
/// # async fn demo() -> Result<(), fetch_dl::downloader::DownloadError> {
/// use std::time::Duration;
/// use fetch_dl::{download_string, TextEncoding};
///
/// let text = download_string(
///     "https://example.com/notes.txt",
///     Duration::from_secs(10),
///     None,
///     TextEncoding::Utf8,
/// )
/// .await?;
/// # Ok(())
/// # }
/// ```
pub async fn download_string(
    url: &str,
    timeout: Duration,
    dispatcher: Option<DownloadDispatcher>,
    encoding: TextEncoding,
) -> Result<String, DownloadError> {
    let bytes = download_bytes(url, timeout, dispatcher).await?;
    Ok(encoding.decode(&bytes))
}

/// 下载到本地文件，返回保存路径。父目录不存在时会自动创建。
pub async fn download_file(
    url: &str,
    path: impl AsRef<Path>,
    timeout: Duration,
    dispatcher: Option<DownloadDispatcher>,
) -> Result<PathBuf, DownloadError> {
    let path = path.as_ref();
    if path.as_os_str().is_empty() {
        return Err(DownloadError::InvalidState("保存路径不能为空"));
    }
    match build_downloader(url, timeout, dispatcher)
        .save_to(path)
        .send()
        .await
        .into_result()?
    {
        DownloadOutput::Saved(saved) => Ok(saved),
        _ => Err(DownloadError::InvalidState("下载结果不是本地文件")),
    }
}

/// 下载到内存，返回读取位置在开头的 `Cursor`。
pub async fn download_stream(
    url: &str,
    timeout: Duration,
    dispatcher: Option<DownloadDispatcher>,
) -> Result<Cursor<Vec<u8>>, DownloadError> {
    let bytes = download_bytes(url, timeout, dispatcher).await?;
    Ok(Cursor::new(bytes))
}
