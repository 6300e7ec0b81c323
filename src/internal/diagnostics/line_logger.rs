//! 带时间戳的行日志：每行以 `[HH:MM:SS.mmm] ` 开头，错误与警告额外带 `ERROR` / `WARNING` 前缀。
//!
//! 生命周期由调用方持有：[`LineLogger::start`] 写入开场行后返回日志器，
//! [`LineLogger::stop`] 写入结束行并交还底层 writer。不存在「未启动却被写入」的状态。

use std::io::{self, Write};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::{DateTime, Local};

use super::sink::DiagnosticsSink;

const STARTED_BANNER: &str = "--- Log initialized ---";
const STOPPED_BANNER: &str = "--- Log stopped ---";

struct LoggerState<W> {
    writer: W,
    last_write: Option<DateTime<Local>>,
}

/// 行日志器，内部加锁，可在多个任务间共享（如包在 `Arc` 中注入下载器）。
pub struct LineLogger<W: Write + Send> {
    state: Mutex<LoggerState<W>>,
}

impl<W: Write + Send> LineLogger<W> {
    /// 启动日志：写入开场行。每次写入后都会 flush。
    pub fn start(writer: W) -> io::Result<Self> {
        let logger = Self {
            state: Mutex::new(LoggerState {
                writer,
                last_write: None,
            }),
        };
        logger.write_prefixed(None, STARTED_BANNER)?;
        Ok(logger)
    }

    /// 停止日志：写入结束行，交还底层 writer。
    pub fn stop(self) -> io::Result<W> {
        self.write_prefixed(None, STOPPED_BANNER)?;
        let mut state = self
            .state
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner);
        state.writer.flush()?;
        Ok(state.writer)
    }

    pub fn line(&self, message: &str) -> io::Result<()> {
        self.write_prefixed(None, message)
    }

    pub fn warning(&self, message: &str) -> io::Result<()> {
        self.write_prefixed(Some("WARNING"), message)
    }

    pub fn failure(&self, message: &str) -> io::Result<()> {
        self.write_prefixed(Some("ERROR"), message)
    }

    /// 距上一次写入经过的时间；尚未写入时返回 `None`。
    pub fn time_since_last_write(&self) -> Option<Duration> {
        let last_write = self.lock().last_write?;
        Some((Local::now() - last_write).to_std().unwrap_or_default())
    }

    fn lock(&self) -> MutexGuard<'_, LoggerState<W>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// 多行消息的后续行按前缀宽度缩进，对齐到第一行正文。
    fn write_prefixed(&self, label: Option<&str>, message: &str) -> io::Result<()> {
        let mut guard = self.lock();
        let state = &mut *guard;

        let now = Local::now();
        state.last_write = Some(now);
        let stamp = now.format("%H:%M:%S%.3f");
        let prefix = match label {
            Some(label) => format!("{label} [{stamp}] "),
            None => format!("[{stamp}] "),
        };

        let message = message.replace('\r', "");
        let message = message.strip_suffix('\n').unwrap_or(&message);
        let indent = " ".repeat(prefix.chars().count());

        let mut lines = message.split('\n');
        write!(state.writer, "{prefix}{}", lines.next().unwrap_or_default())?;
        for line in lines {
            write!(state.writer, "\n{indent}{line}")?;
        }
        writeln!(state.writer)?;
        state.writer.flush()
    }
}

impl<W: Write + Send> DiagnosticsSink for LineLogger<W> {
    fn write_line(&self, message: &str) {
        let _ = self.line(message);
    }

    fn warn(&self, message: &str) {
        let _ = self.warning(message);
    }

    fn error(&self, message: &str) {
        let _ = self.failure(message);
    }
}
