use serde::{Deserialize, Serialize};

/// Default source file extensions harvested for class tokens.
pub const DEFAULT_SRC_EXTENSIONS: &[&str] = &[
    ".js", ".ts", ".jsx", ".tsx", ".astro", ".vue", ".svelte", ".md", ".mdx",
];

/// Default directory names skipped while walking source trees.
pub const DEFAULT_SRC_EXCLUDES: &[&str] = &[
    "node_modules",
    "dist",
    ".next",
    "build",
    ".git",
    ".svelte-kit",
    ".nuxt",
];

/// Tool settings from `cssguard.yaml`
///
/// Every field is optional in the file; missing keys fall back to the defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolSettings {
    /// Classes that always count as matched (e.g. JS hooks like `js-toggle`)
    pub ignore: Vec<String>,

    pub src_extensions: Vec<String>,

    pub src_excludes: Vec<String>,

    /// Coverage percentage above which a stylesheet is reported as removable
    pub redundancy_threshold: f64,

    /// Maximum number of unused classes listed in human output
    pub unused_display_limit: usize,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            ignore: Vec::new(),
            src_extensions: DEFAULT_SRC_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            src_excludes: DEFAULT_SRC_EXCLUDES.iter().map(|s| s.to_string()).collect(),
            redundancy_threshold: 80.0,
            unused_display_limit: 20,
        }
    }
}
