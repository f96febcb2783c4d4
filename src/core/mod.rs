// Public modules
pub mod defaults;
pub mod error;
pub mod files;
pub mod migrate;

// Re-export common types for convenience
pub use error::{Error, ErrorCode, Result};
pub use files::{run_update, UpdateOptions, UpdateReport};
