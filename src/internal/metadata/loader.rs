use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

use crate::internal::diagnostics::{DiagnosticsSink, TracingDiagnostics};
use crate::internal::dispatcher::DownloadDispatcher;
use crate::internal::downloader::structs::{DEFAULT_TIMEOUT, DownloadError};
use crate::internal::entrance::remote::download_bytes;

use super::version::trim_version;
use super::version_metadata::VersionMetadata;

/// 单个来源失败的原因
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("下载失败: {0}")]
    Download(#[from] DownloadError),

    #[error("JSON 解析失败: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug)]
pub struct SourceFailure {
    pub source: String,
    pub error: SourceError,
}

#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("没有配置任何元数据来源")]
    NoSources,

    #[error("全部 {} 个元数据来源均失败", .0.len())]
    AllSourcesFailed(Vec<SourceFailure>),
}

/// 元数据加载器：按顺序尝试每个来源，返回第一个成功解析的结果。
#[derive(Clone)]
pub struct MetadataLoader {
    sources: Vec<String>,
    timeout: Duration,
    diagnostics: Arc<dyn DiagnosticsSink>,
}

impl MetadataLoader {
    pub fn new<I, S>(sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            sources: sources.into_iter().map(Into::into).collect(),
            timeout: DEFAULT_TIMEOUT,
            diagnostics: Arc::new(TracingDiagnostics),
        }
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_diagnostics(mut self, diagnostics: Arc<dyn DiagnosticsSink>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    pub async fn load(&self) -> Result<VersionMetadata, MetadataError> {
        self.load_with(|| None).await
    }

    /// 每个来源的下载使用 `make_dispatcher` 新建的分发器。
    pub async fn load_with<F>(
        &self,
        mut make_dispatcher: F,
    ) -> Result<VersionMetadata, MetadataError>
    where
        F: FnMut() -> Option<DownloadDispatcher>,
    {
        if self.sources.is_empty() {
            self.diagnostics.write_line("没有可用的元数据来源");
            return Err(MetadataError::NoSources);
        }

        let mut failures = Vec::new();
        for source in &self.sources {
            self.diagnostics.write_line(&format!("尝试元数据来源 '{source}'"));
            match self.load_source(source, make_dispatcher()).await {
                Ok(metadata) => {
                    self.diagnostics.write_line("元数据有效");
                    return Ok(metadata);
                }
                Err(error) => {
                    self.diagnostics.error(&format!("来源失败: {error}"));
                    failures.push(SourceFailure {
                        source: source.clone(),
                        error,
                    });
                }
            }
        }
        Err(MetadataError::AllSourcesFailed(failures))
    }

    async fn load_source(
        &self,
        source: &str,
        dispatcher: Option<DownloadDispatcher>,
    ) -> Result<VersionMetadata, SourceError> {
        let bytes = download_bytes(source, self.timeout, dispatcher).await?;
        let mut metadata: VersionMetadata = serde_json::from_slice(&bytes)?;
        metadata.program.version = trim_version(&metadata.program.version);
        metadata.installer.version = trim_version(&metadata.installer.version);
        Ok(metadata)
    }
}

impl std::fmt::Debug for MetadataLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetadataLoader")
            .field("sources", &self.sources)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}
