//! Diagnostic logging
//!
//! Everything logged here goes to a side channel (stderr by default), never
//! to the JSON-RPC output stream.

mod traits;
mod console;
mod memory;

pub use traits::{Logger, LogLevel, SharedLogger};
pub use console::{ConsoleLogger, LOG_LEVEL_ENV};
pub use memory::MemoryLogger;
