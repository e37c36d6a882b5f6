//! # LiBCM console
//!
//! Line-oriented command interpreter for the LiBCM battery controller,
//! reached over a character-at-a-time serial link.
//!
//! ## Architecture
//!
//! ```text
//! SerialPort ──bytes──▶ LineAccumulator ──line──▶ dispatch ──▶ DebugStore
//!                        (normalize)              (COMMANDS)    System::restart
//! ```
//!
//! - [`console::LineAccumulator`] folds case, drops spaces and `( )`
//!   comments, and detects end of line
//! - [`console::dispatch`] matches `$KEYWORD` literals from a static table
//! - Storage, transport and restart are traits the board provides
//!
//! No heap, no global mutable state in the core.

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod console;
pub mod hal;
pub mod log_drain;
pub mod log_globals;
pub mod logging;

pub use config::{DebugStore, MemoryStore};
pub use console::{Console, ConsoleError};
pub use hal::{SerialPort, System};
pub use log_globals::{BG_LOG_STREAM, CONSOLE_LOG_STREAM};
pub use logging::LogStream;
