//! Global log stream instances.

use crate::logging::LogStream;

/// Console log stream.
///
/// Written by the console poll loop, drained by the log sink.
pub static CONSOLE_LOG_STREAM: LogStream = LogStream::new();

/// Background log stream for everything outside the console
/// (storage backend, boot sequence).
pub static BG_LOG_STREAM: LogStream = LogStream::new();
