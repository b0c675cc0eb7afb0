// cssguard - Bidirectional CSS/HTML class validator
//
// This is the library crate containing the pattern-learning engine, the file
// extractors and the command implementations.
// The binary crate (main.rs) provides the CLI entry point.

pub mod cli;
pub mod commands;
pub mod config;
pub mod extract;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod services;

// Re-export commonly used types for convenience
pub use config::ConfigManager;
pub use extract::{ClassSource, CssExtractor, HtmlExtractor, SourceScanner};
pub use models::{ClassSet, ClassificationResult, Configuration, Pattern, ToolSettings};
pub use services::{Classifier, PatternCatalogue, Trainer, compare_directly};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
