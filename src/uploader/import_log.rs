//! Per-line import messages, mirrored to tracing as they are recorded

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Warn,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    pub line: usize,
    pub level: LogLevel,
    pub message: String,
}

#[derive(Debug, Default)]
pub struct ImportLog {
    entries: Vec<LogEntry>,
}

impl ImportLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn info(&mut self, line: usize, message: impl Into<String>) {
        let message = message.into();
        tracing::info!(line, "{}", message);
        self.push(line, LogLevel::Info, message);
    }

    pub fn warn(&mut self, line: usize, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!(line, "{}", message);
        self.push(line, LogLevel::Warn, message);
    }

    pub fn error(&mut self, line: usize, message: impl Into<String>) {
        let message = message.into();
        tracing::error!(line, "{}", message);
        self.push(line, LogLevel::Error, message);
    }

    fn push(&mut self, line: usize, level: LogLevel, message: String) {
        self.entries.push(LogEntry {
            line,
            level,
            message,
        });
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn errors_on(&self, line: usize) -> impl Iterator<Item = &LogEntry> {
        self.entries
            .iter()
            .filter(move |e| e.line == line && e.level == LogLevel::Error)
    }

    pub fn into_entries(self) -> Vec<LogEntry> {
        self.entries
    }
}
