//! Data models shared by the engine, the extractors and the CLI.
//!
//! - [`ClassSet`]: a deduplicated set of class-name tokens, the common currency of every component
//! - [`Configuration`]: the trained artifact (`cssguard.json`) holding [`Pattern`]s, literal and ignored classes
//! - [`ClassificationResult`]: the outcome of classifying one target set, in trained or direct mode
//! - [`ToolSettings`]: optional user settings loaded from `cssguard.yaml`
//!
//! # Ordering
//!
//! [`ClassSet`] is an ordered set. Nothing in the engine depends on insertion order, and
//! iterating in lexicographic order keeps every derived list (examples, orphans, literals)
//! deterministic without extra sorting passes.

pub mod config;
pub mod report;
pub mod settings;

use std::collections::BTreeSet;

pub use config::{CONFIG_VERSION, Configuration, Pattern};
pub use report::{ClassificationResult, coverage_percent};
pub use settings::ToolSettings;

/// A deduplicated set of class-name tokens.
pub type ClassSet = BTreeSet<String>;

/// Build a [`ClassSet`] from anything yielding string-like items.
pub fn class_set<I, S>(classes: I) -> ClassSet
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    classes.into_iter().map(Into::into).collect()
}
