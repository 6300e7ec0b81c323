//! 入口函数测试：字符串、文件与内存流。

use std::io::Read;
use std::time::Duration;

use crate::downloader::DownloadErrorKind;
use crate::tests::{TestRoute, TestServer, random_payload, temp_dir};
use crate::{TextEncoding, download_bytes, download_file, download_stream, download_string};

const TIMEOUT: Duration = Duration::from_secs(5);

#[tokio::test]
async fn download_string_decodes_utf8_by_default() {
    let body = "你好, world".as_bytes().to_vec();
    let server = TestServer::start([("/text", TestRoute::Fixed(body))]).await;
    let text = download_string(&server.url("/text"), TIMEOUT, None, TextEncoding::default())
        .await
        .unwrap();
    assert_eq!(text, "你好, world");
}

#[tokio::test]
async fn download_string_with_other_encodings() {
    let utf16: Vec<u8> = "héllo".encode_utf16().flat_map(u16::to_le_bytes).collect();
    let server = TestServer::start([
        ("/latin1", TestRoute::Fixed(vec![b'h', 0xE9, b'l', b'l', b'o'])),
        ("/utf16", TestRoute::Fixed(utf16)),
    ])
    .await;

    let latin1 = download_string(&server.url("/latin1"), TIMEOUT, None, TextEncoding::Latin1)
        .await
        .unwrap();
    assert_eq!(latin1, "héllo");

    let utf16 = download_string(&server.url("/utf16"), TIMEOUT, None, TextEncoding::Utf16Le)
        .await
        .unwrap();
    assert_eq!(utf16, "héllo");
}

#[test]
fn utf16_odd_trailing_byte_is_replaced() {
    let text = TextEncoding::Utf16Be.decode(&[0x00, b'a', 0x00]);
    assert_eq!(text, "a\u{FFFD}");
}

#[tokio::test]
async fn download_file_creates_parents() {
    let payload = random_payload(10_000);
    let server = TestServer::start([("/f", TestRoute::Fixed(payload.clone()))]).await;
    let dir = temp_dir();
    let path = dir.path().join("x").join("y.bin");

    let saved = download_file(&server.url("/f"), &path, TIMEOUT, None).await.unwrap();

    assert_eq!(saved, path);
    assert_eq!(std::fs::read(&path).unwrap(), payload);
}

#[tokio::test]
async fn download_file_rejects_empty_path() {
    let error = download_file("http://127.0.0.1:9/f", "", TIMEOUT, None)
        .await
        .unwrap_err();
    assert_eq!(error.kind(), DownloadErrorKind::InvalidState);
}

#[tokio::test]
async fn download_stream_starts_at_beginning() {
    let payload = random_payload(2048);
    let server = TestServer::start([("/s", TestRoute::Fixed(payload.clone()))]).await;

    let mut cursor = download_stream(&server.url("/s"), TIMEOUT, None).await.unwrap();
    assert_eq!(cursor.position(), 0);

    let mut read_back = Vec::new();
    cursor.read_to_end(&mut read_back).unwrap();
    assert_eq!(read_back, payload);
}

#[tokio::test]
async fn helpers_surface_download_errors() {
    let server = TestServer::start([("/gone", TestRoute::Status(404))]).await;
    let error = download_bytes(&server.url("/gone"), TIMEOUT, None)
        .await
        .unwrap_err();
    assert_eq!(error.kind(), DownloadErrorKind::Protocol);
}
