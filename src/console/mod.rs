//! USB serial console for diagnostics and settings
//!
//! Polled from the main loop - no dedicated task.
//! Zero heap allocation - all static buffers.

pub mod accumulator;
pub mod commands;
#[allow(clippy::module_inception)]
pub mod console;
pub mod error;
pub mod line_buffer;
pub mod parser;

pub use accumulator::{Feed, InputFlags, LineAccumulator};
pub use commands::{dispatch, find_command, CommandDescriptor, Context, COMMANDS, TESTS};
pub use console::{Console, VERSION};
pub use error::ConsoleError;
pub use line_buffer::{LineBuffer, STRING_TERMINATION_CHARACTER};
pub use parser::{parse_u8_field, CommandLine};
