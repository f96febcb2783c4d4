//! Generic utility primitives with zero domain knowledge.
//!
//! - `io` - File I/O with consistent error handling
//! - `parser` - Line splitting and path display
//! - `validation` - Input validation helpers

pub mod io;
pub mod parser;
pub mod validation;
