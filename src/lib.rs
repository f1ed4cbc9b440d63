pub mod cli;
pub mod config;
pub mod error;

// Feed pipeline
pub mod feed;

// Test harness and doubles
pub mod testing;

// Utilities
pub mod utils;

// Re-exports
pub use config::Settings;
pub use error::{Error, Result};
pub use feed::{FeedItem, FeedManager};
