use super::{ClassSource, has_extension, read_lossy};
use crate::models::ClassSet;
use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use regex::Regex;
use walkdir::WalkDir;

/// Negative utility prefixes that are legitimate class names (`-translate-x-1/2`, `-mt-4`).
/// Any other class starting with `-` is treated as noise.
const NEGATIVE_PREFIXES: &[&str] = &[
    "-translate", "-rotate", "-skew", "-scale", "-m-", "-mx-", "-my-", "-mt-", "-mr-", "-mb-",
    "-ml-", "-p-", "-px-", "-py-", "-pt-", "-pr-", "-pb-", "-pl-", "-inset", "-top-", "-right-",
    "-bottom-", "-left-", "-z-", "-order-", "-tracking-", "-indent-",
];

/// Pulls class selectors out of stylesheet text.
///
/// Only selector preludes (the text before each `{`) are scanned, so values such as
/// `url(bg.png)` or `0.5rem` inside declarations never turn into classes. Escaped
/// characters (`.md\:flex`, `.w-1\/2`) are unescaped into the class name as it is
/// written in markup.
pub struct CssParser {
    comment_pattern: Regex,
    class_pattern: Regex,
}

impl CssParser {
    pub fn new() -> Self {
        Self {
            comment_pattern: Regex::new(r"(?s)/\*.*?\*/").expect("Invalid comment regex"),
            class_pattern: Regex::new(
                r"\.(-?[_a-zA-Z][_a-zA-Z0-9-]*(?:\\[^\s0-9a-fA-F][_a-zA-Z0-9-]*)*)",
            )
            .expect("Invalid class selector regex"),
        }
    }

    pub fn parse_str(&self, css: &str) -> ClassSet {
        let css = self.comment_pattern.replace_all(css, "");

        let mut classes = ClassSet::new();
        for prelude in selector_preludes(&css) {
            for caps in self.class_pattern.captures_iter(prelude) {
                let class = unescape(&caps[1]);
                if is_valid_class(&class) {
                    classes.insert(class);
                }
            }
        }

        classes
    }

    pub fn parse_file(&self, path: &Utf8Path) -> Result<ClassSet> {
        let css = read_lossy(path)?;
        Ok(self.parse_str(&css))
    }

    /// Parse every `.css` file below `dir`.
    pub fn parse_dir(&self, dir: &Utf8Path) -> Result<ClassSet> {
        let extensions = [".css".to_string()];
        let mut classes = ClassSet::new();

        for entry in WalkDir::new(dir) {
            let entry = entry.with_context(|| format!("Failed to walk {}", dir))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let Some(path) = Utf8Path::from_path(entry.path()) else {
                tracing::warn!("Skipping non UTF-8 path: {}", entry.path().display());
                continue;
            };
            if has_extension(path, &extensions) {
                classes.extend(self.parse_file(path)?);
            }
        }

        Ok(classes)
    }

    /// Parse a stylesheet or a directory of stylesheets.
    pub fn parse_path(&self, path: &Utf8Path) -> Result<ClassSet> {
        let metadata =
            std::fs::metadata(path).with_context(|| format!("Cannot access {}", path))?;

        if metadata.is_dir() {
            self.parse_dir(path)
        } else {
            self.parse_file(path)
        }
    }
}

impl Default for CssParser {
    fn default() -> Self {
        Self::new()
    }
}

/// The reference universe: classes defined across one or more stylesheet paths.
///
/// A path that cannot be read is reported as a warning and skipped; the remaining
/// paths still contribute.
pub struct CssExtractor {
    paths: Vec<Utf8PathBuf>,
    parser: CssParser,
}

impl CssExtractor {
    pub fn new<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Utf8PathBuf>,
    {
        Self {
            paths: paths.into_iter().map(Into::into).collect(),
            parser: CssParser::new(),
        }
    }

    /// Union of all readable paths plus one message per path that failed.
    fn collect_with_warnings(&self) -> (ClassSet, Vec<String>) {
        let mut classes = ClassSet::new();
        let mut warnings = Vec::new();

        for path in &self.paths {
            match self.parser.parse_path(path) {
                Ok(found) => {
                    tracing::debug!("{}: {} classes", path, found.len());
                    classes.extend(found);
                }
                Err(e) => warnings.push(format!("{}: {:#}", path, e)),
            }
        }

        (classes, warnings)
    }
}

impl ClassSource for CssExtractor {
    fn describe(&self) -> String {
        let paths: Vec<&str> = self.paths.iter().map(|p| p.as_str()).collect();
        format!("CSS {}", paths.join(","))
    }

    fn collect(&self) -> Result<ClassSet> {
        let (classes, warnings) = self.collect_with_warnings();
        for warning in &warnings {
            tracing::warn!("Skipping stylesheet {}", warning);
        }

        if classes.is_empty() && !warnings.is_empty() && warnings.len() == self.paths.len() {
            anyhow::bail!("No stylesheet could be read: {}", warnings.join("; "));
        }

        Ok(classes)
    }
}

/// Text before each `{` back to the previous `{`, `}` or `;`.
fn selector_preludes(css: &str) -> Vec<&str> {
    let mut preludes = Vec::new();
    let mut start = 0;
    let mut escaped = false;

    for (i, ch) in css.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' => escaped = true,
            '{' => {
                preludes.push(&css[start..i]);
                start = i + 1;
            }
            '}' | ';' => start = i + 1,
            _ => {}
        }
    }

    preludes
}

fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(ch) = chars.next() {
        if ch == '\\' {
            if let Some(next) = chars.next() {
                out.push(next);
            }
        } else {
            out.push(ch);
        }
    }
    out
}

fn is_valid_class(class: &str) -> bool {
    if class.is_empty() {
        return false;
    }
    if class.starts_with('-') {
        return NEGATIVE_PREFIXES.iter().any(|p| class.starts_with(p));
    }
    true
}
