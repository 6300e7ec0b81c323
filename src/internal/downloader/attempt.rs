//! 工作任务：一次下载尝试的请求与读取循环。

use std::sync::Arc;
use std::time::Instant;

use futures_util::{Stream, StreamExt};
use url::Url;

use crate::internal::diagnostics::DiagnosticsSink;
use crate::internal::dispatcher::DownloadDispatcher;
use crate::internal::format::{bytes_to_string, format_duration};
use crate::internal::progress::{ProgressEvent, ProgressFactor};

use super::sink::{OpenSink, PartialFileGuard};
use super::structs::{
    BoxedWriter, DownloadConfig, DownloadController, DownloadError, DownloadHooksContainer,
    DownloadOutcome, DownloadOutput, DownloadStatus, DownloadTarget,
};

/// 进度每增长这么多才写一行诊断
const LOG_PROGRESS_STEP: f64 = 0.05;

enum Transfer {
    Completed(DownloadOutput),
    Cancelled,
}

pub(super) struct Attempt {
    pub(super) config: DownloadConfig,
    pub(super) target: DownloadTarget,
    pub(super) dispatcher: DownloadDispatcher,
    pub(super) diagnostics: Arc<dyn DiagnosticsSink>,
    pub(super) hooks: DownloadHooksContainer,
    pub(super) controller: Arc<DownloadController>,
    /// 未完成时交还给调用方的输出流
    pub(super) returned_writer: Option<BoxedWriter>,
}

impl Attempt {
    /// 执行下载并调用唯一的终止钩子。
    ///
    /// 写入端（调用方的输出流除外）、响应与客户端在 `transfer` 返回时已释放，未完成的文件也已删除，
    /// 之后才调用钩子。
    pub(super) async fn run(mut self) -> DownloadOutcome {
        let started_at = Instant::now();
        // 计时器只由 Cooldown 节流驱动，这里不调用 start()
        let result = self.transfer().await;
        self.dispatcher.stop();

        match result {
            Ok(Transfer::Completed(output)) => {
                self.diagnostics.write_line(&format!(
                    "下载完成，用时 {}",
                    format_duration(started_at.elapsed())
                ));
                self.hooks.run_on_finished().await;
                DownloadOutcome::Completed(output)
            }
            Ok(Transfer::Cancelled) => self.cancelled().await,
            Err(error) => {
                if !self.controller.fail() {
                    return self.cancelled().await;
                }
                self.dispatcher.status_changed(DownloadStatus::Failed);
                self.diagnostics.error(&format!("下载失败: {error}"));
                self.dispatcher.error(&error);
                self.hooks.run_on_error(&error).await;
                DownloadOutcome::Failed {
                    error,
                    writer: self.take_unowned_writer(),
                }
            }
        }
    }

    async fn cancelled(mut self) -> DownloadOutcome {
        self.dispatcher.status_changed(DownloadStatus::Cancelled);
        self.diagnostics.write_line("下载已取消");
        self.hooks.run_on_cancelled().await;
        DownloadOutcome::Cancelled {
            writer: self.take_unowned_writer(),
        }
    }

    /// 调用方的输出流可能还在目标里（尚未打开写入端），也可能已从写入端取回。
    fn take_unowned_writer(&mut self) -> Option<BoxedWriter> {
        self.returned_writer
            .take()
            .or_else(|| std::mem::take(&mut self.target).into_unowned_writer())
    }

    /// 下载未完成：取回调用方的输出流后再释放写入端。
    fn abandon(&mut self, sink: OpenSink) {
        self.returned_writer = sink.into_unowned_writer();
    }

    /// 推进阶段并通知分发器；阶段已被取消时返回 false。
    fn enter(&mut self, from: DownloadStatus, to: DownloadStatus) -> bool {
        if !self.controller.advance(from, to) {
            return false;
        }
        self.dispatcher.status_changed(to);
        true
    }

    async fn transfer(&mut self) -> Result<Transfer, DownloadError> {
        if !self.enter(DownloadStatus::Idle, DownloadStatus::Requesting) {
            return Ok(Transfer::Cancelled);
        }

        let buffer_size = self.config.buffer_size;
        if buffer_size == 0 {
            return Err(DownloadError::InvalidState("分块大小必须大于 0"));
        }
        let url = Url::parse(&self.config.url)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(DownloadError::UnsupportedScheme(url.scheme().to_string()));
        }

        let timeout = self.config.timeout;
        self.diagnostics.write_line(&format!("请求 {url}"));
        let client = reqwest::Client::builder().connect_timeout(timeout).build()?;
        let response = tokio::time::timeout(timeout, client.get(url).send())
            .await
            .map_err(|_| DownloadError::Timeout(timeout))??;
        if self.controller.is_cancelled() {
            return Ok(Transfer::Cancelled);
        }

        let status = response.status();
        if !status.is_success() {
            return Err(DownloadError::Status(status));
        }
        let Some(total) = response.content_length() else {
            self.diagnostics.error("响应没有 Content-Length，无法确定下载大小");
            return Err(DownloadError::MissingContentLength);
        };

        if !self.enter(DownloadStatus::Requesting, DownloadStatus::Streaming) {
            return Ok(Transfer::Cancelled);
        }
        self.controller.publish_progress(ProgressEvent::new(0, total));

        let mut stream = response.bytes_stream();
        if self.controller.is_cancelled() {
            return Ok(Transfer::Cancelled);
        }

        let target = std::mem::take(&mut self.target);
        // 先于写入端声明：写入端先析构，文件句柄关闭后再删除
        let mut guard = PartialFileGuard::new(&target);
        let mut sink = OpenSink::prepare(target).await?;
        self.diagnostics.write_line(&format!(
            "读取 {}，分块大小 {buffer_size}",
            bytes_to_string(total)
        ));

        let read = self.read_body(&mut stream, &mut sink, &mut guard, total).await;
        match read {
            Ok(Some(reported_completion)) => {
                if let Err(error) = sink.close(&mut guard).await {
                    self.abandon(sink);
                    return Err(error);
                }
                if !self.enter(DownloadStatus::Streaming, DownloadStatus::Completed) {
                    self.abandon(sink);
                    return Ok(Transfer::Cancelled);
                }
                let output = sink.into_output();
                guard.disarm();

                if !reported_completion {
                    let event = ProgressEvent::completed(total);
                    self.controller.publish_progress(event);
                    self.dispatcher.update(&event);
                }
                Ok(Transfer::Completed(output))
            }
            Ok(None) => {
                self.abandon(sink);
                Ok(Transfer::Cancelled)
            }
            Err(error) => {
                self.abandon(sink);
                Err(error)
            }
        }
    }

    /// 按分块读取整个响应体。被取消时返回 `None`，
    /// 否则返回是否已有分块单独报告了完成。
    async fn read_body<S, B>(
        &mut self,
        stream: &mut S,
        sink: &mut OpenSink,
        guard: &mut PartialFileGuard,
        total: u64,
    ) -> Result<Option<bool>, DownloadError>
    where
        S: Stream<Item = reqwest::Result<B>> + Unpin,
        B: AsRef<[u8]>,
    {
        let buffer_size = self.config.buffer_size;
        let timeout = self.config.timeout;
        let mut bytes_read: u64 = 0;
        let mut reported_completion = false;
        let mut last_logged = 0.0;

        while bytes_read < total {
            let next = tokio::time::timeout(timeout, stream.next())
                .await
                .map_err(|_| DownloadError::Timeout(timeout))?;
            let Some(frame) = next else {
                return Err(DownloadError::IncompleteBody {
                    expected: total,
                    received: bytes_read,
                });
            };
            let frame = frame?;

            for chunk in frame.as_ref().chunks(buffer_size) {
                if self.controller.is_cancelled() {
                    return Ok(None);
                }
                sink.write(chunk, guard).await?;
                bytes_read += chunk.len() as u64;

                let event = ProgressEvent::new(bytes_read, total);
                self.controller.publish_progress(event);
                if event.factor() - last_logged >= LOG_PROGRESS_STEP {
                    last_logged = event.factor();
                    self.diagnostics.write_line(&format!("进度: {event}"));
                }
                self.dispatcher.update(&event);
                if chunk.len() as u64 == total {
                    reported_completion = true;
                }

                if self.controller.is_cancelled() {
                    return Ok(None);
                }
            }
        }
        Ok(Some(reported_completion))
    }
}
