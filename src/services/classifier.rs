use crate::models::{ClassSet, ClassificationResult, Configuration};
use regex::Regex;
use std::collections::HashSet;
use thiserror::Error;

/// Errors that can occur while building a [`Classifier`]
#[derive(Error, Debug)]
pub enum ClassifierError {
    #[error("invalid pattern {name:?}: {source}")]
    InvalidPattern {
        name: String,
        #[source]
        source: regex::Error,
    },
}

/// Which rule accepted (or rejected) a class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict<'a> {
    Ignored,
    Literal,
    /// Matched the named pattern, the first match in stored order
    Pattern(&'a str),
    Orphan,
}

impl Verdict<'_> {
    pub fn is_match(&self) -> bool {
        !matches!(self, Verdict::Orphan)
    }
}

/// Classifies class names against a trained [`Configuration`].
///
/// Construction compiles every pattern once, so a broken expression fails the
/// whole run up front instead of silently disabling a class family. After that
/// the classifier is immutable and can be shared across threads.
///
/// Each class is resolved in a fixed order and counted once:
///
/// 1. ignored classes
/// 2. literal classes
/// 3. patterns, in stored (name-sorted) order, first match wins
/// 4. anything left is an orphan
#[derive(Debug)]
pub struct Classifier {
    config: Configuration,
    /// Compiled whole-token matchers, index-aligned with `config.patterns`
    compiled: Vec<Regex>,
    literals: HashSet<String>,
    ignored: HashSet<String>,
}

impl Classifier {
    pub fn new(config: Configuration) -> Result<Self, ClassifierError> {
        let compiled = config
            .patterns
            .iter()
            .map(|pattern| {
                let anchored = format!("^(?:{})$", ascii_digits(&pattern.regex));
                Regex::new(&anchored).map_err(|source| {
                    ClassifierError::InvalidPattern {
                        name: pattern.name.clone(),
                        source,
                    }
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let literals = config.literal_classes.iter().cloned().collect();
        let ignored = config.ignored.iter().cloned().collect();

        tracing::debug!(
            "Classifier ready: {} patterns, {} literals, {} ignored",
            compiled.len(),
            config.literal_classes.len(),
            config.ignored.len()
        );

        Ok(Self {
            config,
            compiled,
            literals,
            ignored,
        })
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    /// Resolve a single class.
    pub fn verdict(&self, class: &str) -> Verdict<'_> {
        if self.ignored.contains(class) {
            return Verdict::Ignored;
        }
        if self.literals.contains(class) {
            return Verdict::Literal;
        }

        self.compiled
            .iter()
            .zip(&self.config.patterns)
            .find(|(regex, _)| regex.is_match(class))
            .map_or(Verdict::Orphan, |(_, pattern)| {
                Verdict::Pattern(pattern.name.as_str())
            })
    }

    /// Classify every class in `target`.
    ///
    /// `total_reference` is 0 and `unused` is empty: a trained configuration
    /// cannot say which definitions went unused.
    pub fn classify(&self, target: &ClassSet) -> ClassificationResult {
        let mut matched = 0;
        let mut orphans = Vec::new();

        for class in target {
            if self.verdict(class).is_match() {
                matched += 1;
            } else {
                orphans.push(class.clone());
            }
        }

        let result = ClassificationResult::new(target.len(), 0, matched, orphans, Vec::new());

        tracing::debug!(
            "Classified {} classes: {} matched, {} orphans ({:.1}% coverage)",
            result.total_target,
            result.matched,
            result.orphan_count,
            result.coverage_percent
        );

        result
    }
}

/// Rewrite `\d` and `\D` to their ASCII forms.
///
/// Stored patterns use `\d` for "a digit 0-9"; the `regex` crate would otherwise
/// also accept other Unicode decimal digits (`p-٣`, `p-３`).
fn ascii_digits(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len());
    let mut class_depth = 0usize;
    let mut chars = pattern.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '\\' => match chars.next() {
                Some('d') if class_depth > 0 => out.push_str("0-9"),
                Some('d') => out.push_str("[0-9]"),
                Some('D') if class_depth == 0 => out.push_str("[^0-9]"),
                Some(next) => {
                    out.push('\\');
                    out.push(next);
                }
                None => out.push('\\'),
            },
            '[' => {
                out.push('[');
                if class_depth == 0 {
                    // A `]` right after the opening bracket (or `[^`) is a literal
                    if chars.peek() == Some(&'^') {
                        out.push('^');
                        chars.next();
                    }
                    if chars.peek() == Some(&']') {
                        out.push(']');
                        chars.next();
                    }
                }
                class_depth += 1;
            }
            ']' if class_depth > 0 => {
                out.push(']');
                class_depth -= 1;
            }
            _ => out.push(ch),
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Pattern, class_set};

    fn config_with(patterns: Vec<Pattern>, literals: &[&str], ignored: &[&str]) -> Configuration {
        Configuration {
            patterns,
            literal_classes: literals.iter().map(|s| s.to_string()).collect(),
            ignored: ignored.iter().map(|s| s.to_string()).collect(),
            ..Configuration::default()
        }
    }

    #[test]
    fn test_invalid_pattern_rejected() {
        let config = config_with(vec![Pattern::curated("broken", r"^(unclosed$", "")], &[], &[]);

        let err = Classifier::new(config).unwrap_err();
        let ClassifierError::InvalidPattern { name, .. } = &err;
        assert_eq!(name, "broken");
        assert!(err.to_string().contains("broken"));
    }

    #[test]
    fn test_precedence_order() {
        let config = config_with(
            vec![Pattern::curated("btn", r"^btn-\w+$", "")],
            &["btn-primary"],
            &["btn-ghost"],
        );
        let classifier = Classifier::new(config).unwrap();

        assert_eq!(classifier.verdict("btn-ghost"), Verdict::Ignored);
        assert_eq!(classifier.verdict("btn-primary"), Verdict::Literal);
        assert_eq!(classifier.verdict("btn-danger"), Verdict::Pattern("btn"));
        assert_eq!(classifier.verdict("card"), Verdict::Orphan);
    }

    #[test]
    fn test_first_pattern_in_stored_order_wins() {
        let config = config_with(
            vec![
                Pattern::curated("a-wide", r"^p-.*$", ""),
                Pattern::curated("b-narrow", r"^p-\d+$", ""),
            ],
            &[],
            &[],
        );
        let classifier = Classifier::new(config).unwrap();

        assert_eq!(classifier.verdict("p-4"), Verdict::Pattern("a-wide"));
    }

    #[test]
    fn test_unanchored_pattern_matches_whole_class_only() {
        let config = config_with(vec![Pattern::curated("flex", "flex", "")], &[], &[]);
        let classifier = Classifier::new(config).unwrap();

        assert!(classifier.verdict("flex").is_match());
        assert!(!classifier.verdict("flexbox").is_match());
        assert!(!classifier.verdict("inline-flex").is_match());
    }

    #[test]
    fn test_classify_counts_and_sorts() {
        let config = config_with(
            vec![Pattern::curated("p", r"^p-\d+$", "")],
            &["container"],
            &[],
        );
        let classifier = Classifier::new(config).unwrap();

        let result = classifier.classify(&class_set(["p-4", "container", "zeta", "alpha"]));

        assert_eq!(result.total_target, 4);
        assert_eq!(result.total_reference, 0);
        assert_eq!(result.matched, 2);
        assert_eq!(result.orphans, vec!["alpha", "zeta"]);
        assert_eq!(result.coverage_percent, 50.0);
        assert!(result.unused.is_empty());
    }

    #[test]
    fn test_empty_target_fully_covered() {
        let classifier = Classifier::new(Configuration::default()).unwrap();
        let result = classifier.classify(&ClassSet::new());

        assert_eq!(result.matched, 0);
        assert_eq!(result.coverage_percent, 100.0);
    }

    #[test]
    fn test_classify_does_not_mutate_config() {
        let config = config_with(vec![], &["a"], &[]);
        let classifier = Classifier::new(config.clone()).unwrap();

        classifier.classify(&class_set(["a", "b"]));
        classifier.classify(&class_set(["c"]));

        assert_eq!(classifier.config(), &config);
    }

    #[test]
    fn test_digit_class_is_ascii_only() {
        let config = config_with(
            vec![Pattern::curated("p", r"^p-?\d+$", "")],
            &[],
            &[],
        );
        let classifier = Classifier::new(config).unwrap();

        assert_eq!(classifier.verdict("p-3"), Verdict::Pattern("p"));
        assert_eq!(classifier.verdict("p-٣"), Verdict::Orphan);
        assert_eq!(classifier.verdict("p-３"), Verdict::Orphan);
    }

    #[test]
    fn test_ascii_digits_rewrite() {
        assert_eq!(ascii_digits(r"^p-?\d+$"), r"^p-?[0-9]+$");
        assert_eq!(ascii_digits(r"^w-(\d+|[\d/]+)$"), r"^w-([0-9]+|[0-9/]+)$");
        assert_eq!(ascii_digits(r"^x\D$"), r"^x[^0-9]$");
        // Escaped backslash followed by a plain `d`
        assert_eq!(ascii_digits(r"^a\\d$"), r"^a\\d$");
        assert_eq!(ascii_digits(r"^[]\d]$"), r"^[]0-9]$");
        assert_eq!(ascii_digits(r"^text\-gray$"), r"^text\-gray$");
    }

    #[test]
    fn test_classifier_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Classifier>();
    }
}
