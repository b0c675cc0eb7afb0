use super::{ClassSource, has_extension, read_lossy};
use crate::models::ClassSet;
use crate::models::settings::{DEFAULT_SRC_EXCLUDES, DEFAULT_SRC_EXTENSIONS};
use anyhow::Result;
use camino::{Utf8Path, Utf8PathBuf};
use regex::Regex;
use std::collections::HashSet;
use walkdir::WalkDir;

/// Tokens longer than this are never class names (inline data, minified blobs).
const MAX_TOKEN_LEN: usize = 128;

/// Harvests statically written class names from component and content sources.
///
/// Two shapes are recognised on each line:
///
/// - `class="..."` / `className='...'` attributes (JSX, Vue, Svelte, Astro, MDX)
/// - the first string argument of `clsx`, `classnames`, `twMerge`, `cva` and `cn`
///
/// Values built with template interpolation (`${...}`) or string concatenation
/// are skipped entirely rather than guessed at.
pub struct SourceScanner {
    paths: Vec<Utf8PathBuf>,
    extensions: Vec<String>,
    excludes: HashSet<String>,
    class_attr_pattern: Regex,
    helper_call_pattern: Regex,
    token_pattern: Regex,
}

impl SourceScanner {
    /// Scanner over `paths` using the default extensions and excluded directories.
    pub fn new<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Utf8PathBuf>,
    {
        Self {
            paths: paths.into_iter().map(Into::into).collect(),
            extensions: normalize_extensions(DEFAULT_SRC_EXTENSIONS),
            excludes: normalize_excludes(DEFAULT_SRC_EXCLUDES).into_iter().collect(),
            class_attr_pattern: Regex::new(r#"(?:class|className)\s*=\s*["']([^"']+)["']"#)
                .expect("Invalid class attribute regex"),
            helper_call_pattern: Regex::new(
                r#"(?:clsx|classnames|twMerge|cva|cn)\s*\(\s*["']([^"']+)["']"#,
            )
            .expect("Invalid helper call regex"),
            token_pattern: Regex::new(r"^[A-Za-z0-9:_\-\[\]/#%.]+$")
                .expect("Invalid class token regex"),
        }
    }

    /// Replace the scanned extensions. An empty list keeps the defaults.
    pub fn with_extensions<S: AsRef<str>>(mut self, extensions: &[S]) -> Self {
        let normalized = normalize_extensions(extensions);
        if !normalized.is_empty() {
            self.extensions = normalized;
        }
        self
    }

    /// Replace the excluded directory names. An empty list keeps the defaults.
    pub fn with_excludes<S: AsRef<str>>(mut self, excludes: &[S]) -> Self {
        let normalized = normalize_excludes(excludes);
        if !normalized.is_empty() {
            self.excludes = normalized.into_iter().collect();
        }
        self
    }

    /// Class tokens found in one chunk of source text.
    pub fn extract_tokens(&self, content: &str) -> ClassSet {
        let mut classes = ClassSet::new();

        for line in content.lines() {
            let captures = self
                .class_attr_pattern
                .captures_iter(line)
                .chain(self.helper_call_pattern.captures_iter(line));

            for caps in captures {
                let value = &caps[1];
                if value.contains("${") || value.contains("` +") {
                    continue;
                }

                classes.extend(
                    value
                        .split_whitespace()
                        .filter(|token| self.is_class_token(token))
                        .map(str::to_string),
                );
            }
        }

        classes
    }

    pub fn scan_file(&self, path: &Utf8Path) -> Result<ClassSet> {
        let content = read_lossy(path)?;
        Ok(self.extract_tokens(&content))
    }

    /// Walk `dir`, skipping excluded directories and files that cannot be read.
    pub fn scan_dir(&self, dir: &Utf8Path) -> ClassSet {
        let mut classes = ClassSet::new();

        let walker = WalkDir::new(dir).into_iter().filter_entry(|entry| {
            entry.depth() == 0
                || !entry.file_type().is_dir()
                || !self
                    .excludes
                    .contains(entry.file_name().to_string_lossy().as_ref())
        });

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::debug!("Skipping unreadable entry under {}: {}", dir, e);
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            let Some(path) = Utf8Path::from_path(entry.path()) else {
                continue;
            };
            if !has_extension(path, &self.extensions) {
                continue;
            }

            match self.scan_file(path) {
                Ok(found) => classes.extend(found),
                Err(e) => tracing::debug!("Skipping {}: {:#}", path, e),
            }
        }

        classes
    }

    /// Scan every configured path. Missing paths are skipped with a warning.
    pub fn scan_paths(&self) -> ClassSet {
        let mut classes = ClassSet::new();

        for path in &self.paths {
            if path.is_dir() {
                classes.extend(self.scan_dir(path));
            } else if path.is_file() {
                match self.scan_file(path) {
                    Ok(found) => classes.extend(found),
                    Err(e) => tracing::warn!("Skipping source {}: {:#}", path, e),
                }
            } else {
                tracing::warn!("Source path does not exist: {}", path);
            }
        }

        tracing::debug!(
            "Source scan found {} classes in {} paths",
            classes.len(),
            self.paths.len()
        );

        classes
    }

    fn is_class_token(&self, token: &str) -> bool {
        !token.is_empty() && token.len() <= MAX_TOKEN_LEN && self.token_pattern.is_match(token)
    }
}

impl ClassSource for SourceScanner {
    fn describe(&self) -> String {
        let paths: Vec<&str> = self.paths.iter().map(|p| p.as_str()).collect();
        format!("sources {}", paths.join(","))
    }

    fn collect(&self) -> Result<ClassSet> {
        Ok(self.scan_paths())
    }
}

/// Lower-case, trim and give each extension a leading dot; blanks are dropped.
pub fn normalize_extensions<S: AsRef<str>>(extensions: &[S]) -> Vec<String> {
    extensions
        .iter()
        .map(|ext| ext.as_ref().trim().to_lowercase())
        .filter(|ext| !ext.is_empty() && ext != ".")
        .map(|ext| {
            if ext.starts_with('.') {
                ext
            } else {
                format!(".{}", ext)
            }
        })
        .collect()
}

/// Trim directory names and drop blanks.
pub fn normalize_excludes<S: AsRef<str>>(excludes: &[S]) -> Vec<String> {
    excludes
        .iter()
        .map(|name| name.as_ref().trim().trim_matches('/').to_string())
        .filter(|name| !name.is_empty())
        .collect()
}
