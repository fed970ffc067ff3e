use serde::Serialize;
use std::collections::VecDeque;
use std::fmt;
use thiserror::Error;

/// Severity levels honored by the session logger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Returns the canonical uppercase representation.
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "TRACE",
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rotation policy for the in-memory log (default 256 KiB across 4 chunks,
/// sized for a single dashboard session).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogRotationPolicy {
    pub max_chunk_bytes: usize,
    pub chunks_kept: usize,
}

impl Default for LogRotationPolicy {
    fn default() -> Self {
        Self {
            max_chunk_bytes: 64 << 10,
            chunks_kept: 4,
        }
    }
}

/// Lines accumulated before a rotation boundary.
#[derive(Debug, Default, Clone)]
pub struct LogChunk {
    lines: Vec<String>,
    bytes_written: usize,
}

impl LogChunk {
    /// Lines contained in this chunk, oldest first.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Total bytes recorded before rotation.
    pub fn bytes_written(&self) -> usize {
        self.bytes_written
    }
}

/// JSON-line logger with deterministic rotation semantics.
#[derive(Debug, Clone)]
pub struct JsonLineLogger {
    policy: LogRotationPolicy,
    current_level: LogLevel,
    rotated: VecDeque<LogChunk>,
    active: LogChunk,
}

impl Default for JsonLineLogger {
    fn default() -> Self {
        Self::new(LogRotationPolicy::default())
    }
}

impl JsonLineLogger {
    /// Creates a logger with the provided rotation policy.
    pub fn new(policy: LogRotationPolicy) -> Self {
        Self {
            policy,
            current_level: LogLevel::Info,
            rotated: VecDeque::new(),
            active: LogChunk::default(),
        }
    }

    /// Returns the current log level.
    pub fn level(&self) -> LogLevel {
        self.current_level
    }

    /// Applies a dynamic log-level override.
    pub fn set_level(&mut self, level: LogLevel) {
        self.current_level = level;
    }

    /// Emits a JSON-line log entry tagged with the pipeline run it belongs to.
    pub fn log(
        &mut self,
        ts_ms: u64,
        level: LogLevel,
        module: &str,
        run: u64,
        message: &str,
    ) -> Result<(), LoggingError> {
        if level < self.current_level {
            return Ok(());
        }
        let record = LogRecord {
            ts: ts_ms,
            level: level.as_str(),
            module,
            run,
            message,
        };
        let line = serde_json::to_string(&record).map_err(LoggingError::Serialize)?;
        self.rotate_if_needed(line.len());
        self.active.bytes_written = self.active.bytes_written.saturating_add(line.len());
        self.active.lines.push(line);
        Ok(())
    }

    /// Returns rotated chunks followed by the active one.
    pub fn chunks(&self) -> impl Iterator<Item = &LogChunk> {
        self.rotated.iter().chain(std::iter::once(&self.active))
    }

    /// All retained lines in emission order.
    pub fn lines(&self) -> Vec<String> {
        self.chunks()
            .flat_map(|chunk| chunk.lines().iter().cloned())
            .collect()
    }

    fn rotate_if_needed(&mut self, next_line_len: usize) {
        if self.active.bytes_written + next_line_len <= self.policy.max_chunk_bytes {
            return;
        }
        if !self.active.lines.is_empty() {
            self.rotated.push_back(std::mem::take(&mut self.active));
            while self.rotated.len() > self.policy.chunks_kept {
                self.rotated.pop_front();
            }
        }
        self.active = LogChunk::default();
    }
}

/// Errors surfaced while serializing JSON-line logs.
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("failed to serialize log record: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Debug, Serialize)]
struct LogRecord<'a> {
    ts: u64,
    level: &'a str,
    module: &'a str,
    run: u64,
    message: &'a str,
}
