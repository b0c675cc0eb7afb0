//! Extraction of class names from project files.
//!
//! These are thin, regex-based readers that turn files into [`ClassSet`]s for the
//! engine in [`crate::services`]:
//!
//! - [`HtmlExtractor`]: `class` attributes of HTML elements (the target universe)
//! - [`CssExtractor`]: class selectors defined by stylesheets (the reference universe)
//! - [`SourceScanner`]: class strings harvested from JS/TS/Vue/Svelte/Markdown sources
//!   (merged into the target universe)
//!
//! Dynamically composed classes (template interpolation, string concatenation) are
//! not resolved; the scanners skip values that contain them.

pub mod css;
pub mod html;
pub mod source;

use crate::models::ClassSet;
use anyhow::{Context, Result};
use camino::Utf8Path;
use std::fs;

pub use css::{CssExtractor, CssParser};
pub use html::HtmlExtractor;
pub use source::{SourceScanner, normalize_excludes, normalize_extensions};

/// Anything that yields a set of class names.
#[cfg_attr(test, mockall::automock)]
pub trait ClassSource {
    /// Short human-readable description used in logs
    fn describe(&self) -> String;

    fn collect(&self) -> Result<ClassSet>;
}

/// Read a text file, replacing invalid UTF-8 rather than failing on it.
pub(crate) fn read_lossy(path: &Utf8Path) -> Result<String> {
    let bytes = fs::read(path).with_context(|| format!("Failed to read {}", path))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Case-insensitive extension check; `extensions` entries include the leading dot.
pub(crate) fn has_extension(path: &Utf8Path, extensions: &[String]) -> bool {
    path.extension().is_some_and(|ext| {
        let dotted = format!(".{}", ext.to_lowercase());
        extensions.iter().any(|e| e.eq_ignore_ascii_case(&dotted))
    })
}
