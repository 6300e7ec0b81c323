//! 版本元数据测试：版本号规整与比较、按顺序尝试来源。

use std::cmp::Ordering;

use crate::metadata::{MetadataError, MetadataLoader, SourceError, compare_versions, trim_version};
use crate::tests::{TestRoute, TestServer};

const METADATA_JSON: &str = r#"{
    "program": {
        "display_name": "Demo",
        "version": " 1.2.0 \n",
        "author": "someone",
        "download": { "linux": "https://example.com/demo.tar.gz" },
        "launch_file": { "linux": "demo" },
        "install_path": "demo",
        "file_associations": [".demo"],
        "eula": ["line one", "line two"]
    },
    "core": {
        "install_path": "core",
        "download": { "linux": "https://example.com/core.tar.gz" },
        "required_files": { "linux": ["libcore.so"] }
    },
    "installer": {
        "install_path": "installer",
        "install_filename": { "linux": "install.sh" },
        "version": "3.0.0",
        "download": {}
    }
}"#;

#[test]
fn trim_version_drops_trailing_zero_components() {
    assert_eq!(trim_version("1.2.0"), "1.2");
    assert_eq!(trim_version("1.0.0"), "1");
    assert_eq!(trim_version("0.0"), "0");
    assert_eq!(trim_version("  2.10\r\n"), "2.10");
    assert_eq!(trim_version("1.0.3"), "1.0.3");
}

#[test]
fn compare_versions_treats_missing_components_as_zero() {
    assert_eq!(compare_versions("1.0", "1"), Ordering::Equal);
    assert_eq!(compare_versions("1", "1.0.0"), Ordering::Equal);
    assert_eq!(compare_versions("1.0.1", "1"), Ordering::Greater);
    assert_eq!(compare_versions("1", "1.5"), Ordering::Less);
}

#[test]
fn compare_versions_numeric_and_textual_components() {
    assert_eq!(compare_versions("1.10", "1.9"), Ordering::Greater);
    assert_eq!(compare_versions("2.0", "10.0"), Ordering::Less);
    assert_eq!(compare_versions("1.beta", "1.alpha"), Ordering::Greater);
}

#[tokio::test]
async fn loader_without_sources() {
    let loader = MetadataLoader::new(Vec::<String>::new());
    assert!(matches!(loader.load().await, Err(MetadataError::NoSources)));
}

#[tokio::test]
async fn loader_falls_back_to_next_source() {
    let server = TestServer::start([
        ("/broken.json", TestRoute::Fixed(b"{ not json".to_vec())),
        ("/metadata.json", TestRoute::Fixed(METADATA_JSON.as_bytes().to_vec())),
    ])
    .await;

    let loader = MetadataLoader::new([
        server.url("/missing.json"),
        server.url("/broken.json"),
        server.url("/metadata.json"),
    ]);
    let metadata = loader.load().await.unwrap();

    assert_eq!(metadata.program.display_name, "Demo");
    assert_eq!(metadata.program.version, "1.2");
    assert_eq!(metadata.installer.version, "3");
    assert_eq!(metadata.program.eula(), "line one\nline two");
    assert_eq!(metadata.core.required_files["linux"], vec!["libcore.so".to_string()]);
    assert!(metadata.installer.download.is_empty());
}

#[tokio::test]
async fn loader_reports_every_failed_source() {
    let server = TestServer::start([("/broken.json", TestRoute::Fixed(b"[]".to_vec()))]).await;

    let loader = MetadataLoader::new([server.url("/missing.json"), server.url("/broken.json")]);
    let failures = match loader.load().await {
        Err(MetadataError::AllSourcesFailed(failures)) => failures,
        other => panic!("预期全部失败，得到 {other:?}"),
    };

    assert_eq!(failures.len(), 2);
    assert!(matches!(failures[0].error, SourceError::Download(_)));
    assert!(matches!(failures[1].error, SourceError::Parse(_)));
    assert_eq!(failures[1].source, server.url("/broken.json"));
}
