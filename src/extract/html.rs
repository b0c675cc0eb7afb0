use super::{ClassSource, has_extension, read_lossy};
use crate::models::ClassSet;
use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use regex::Regex;
use walkdir::WalkDir;

/// Collects the classes referenced by `class` attributes in HTML files.
///
/// `root` may be a directory (walked recursively for `.html` files) or a single file.
/// Comments and the bodies of `<script>` and `<style>` elements are ignored, so
/// markup inside scripts or CSS text does not count as a reference.
pub struct HtmlExtractor {
    root: Utf8PathBuf,
    extensions: Vec<String>,
    /// `<!-- ... -->`
    comment_pattern: Regex,
    /// `<script>` / `<style>` elements with their raw-text bodies
    raw_text_pattern: Regex,
    /// An element start tag, tolerating `>` inside quoted attribute values
    tag_pattern: Regex,
    /// One attribute (name plus optional double-, single- or un-quoted value),
    /// matched in sequence so quoted values are consumed whole
    attribute_pattern: Regex,
}

impl HtmlExtractor {
    pub fn new<P: AsRef<Utf8Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            extensions: vec![".html".to_string()],
            comment_pattern: Regex::new(r"(?s)<!--.*?-->").expect("Invalid comment regex"),
            raw_text_pattern: Regex::new(
                r"(?is)<script\b[^>]*>.*?</script\s*>|<style\b[^>]*>.*?</style\s*>",
            )
            .expect("Invalid raw text regex"),
            tag_pattern: Regex::new(r#"<[a-zA-Z][^\s/>]*(?:[^>"']|"[^"]*"|'[^']*')*>"#)
                .expect("Invalid tag regex"),
            attribute_pattern: Regex::new(
                r#"([^\s"'<>/=]+)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+)))?"#,
            )
            .expect("Invalid attribute regex"),
        }
    }

    /// Extract classes from HTML text.
    pub fn extract_from_str(&self, html: &str) -> ClassSet {
        let without_comments = self.comment_pattern.replace_all(html, "");
        let markup = self.raw_text_pattern.replace_all(&without_comments, "");

        let mut classes = ClassSet::new();
        for tag in self.tag_pattern.find_iter(&markup) {
            // The first match is the element name itself
            for caps in self.attribute_pattern.captures_iter(tag.as_str()).skip(1) {
                if !caps[1].eq_ignore_ascii_case("class") {
                    continue;
                }
                let value = caps
                    .get(2)
                    .or_else(|| caps.get(3))
                    .or_else(|| caps.get(4))
                    .map_or("", |m| m.as_str());

                classes.extend(value.split_whitespace().map(str::to_string));
            }
        }

        classes
    }

    pub fn extract_from_file(&self, path: &Utf8Path) -> Result<ClassSet> {
        let html = read_lossy(path)?;
        Ok(self.extract_from_str(&html))
    }

    /// Walk `dir` recursively and extract classes from every HTML file.
    pub fn extract_from_dir(&self, dir: &Utf8Path) -> Result<ClassSet> {
        let mut classes = ClassSet::new();
        let mut files = 0usize;

        for entry in WalkDir::new(dir) {
            let entry = entry.with_context(|| format!("Failed to walk {}", dir))?;
            if !entry.file_type().is_file() {
                continue;
            }

            let Some(path) = Utf8Path::from_path(entry.path()) else {
                tracing::warn!("Skipping non UTF-8 path: {}", entry.path().display());
                continue;
            };
            if !has_extension(path, &self.extensions) {
                continue;
            }

            classes.extend(self.extract_from_file(path)?);
            files += 1;
        }

        tracing::debug!(
            "Extracted {} classes from {} HTML files under {}",
            classes.len(),
            files,
            dir
        );

        Ok(classes)
    }
}

impl ClassSource for HtmlExtractor {
    fn describe(&self) -> String {
        format!("HTML under {}", self.root)
    }

    fn collect(&self) -> Result<ClassSet> {
        self.extract_from_dir(&self.root)
    }
}
