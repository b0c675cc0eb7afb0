use serde::{Deserialize, Deserializer, Serialize};

/// Version string written into every freshly trained configuration.
pub const CONFIG_VERSION: &str = "1.0.0";

/// A generalizing matcher learned from (or curated for) a family of classes.
///
/// `regex` is always matched against the whole class token. The classifier
/// wraps it in `^(?:...)$` when compiling, so a stored expression without
/// anchors still cannot produce a substring match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pattern {
    pub name: String,
    pub regex: String,

    #[serde(default)]
    pub description: String,

    /// Up to [`MAX_EXAMPLES`](crate::services::synthesis::MAX_EXAMPLES) training classes.
    #[serde(default, deserialize_with = "null_as_default")]
    pub examples: Vec<String>,

    /// Number of training classes the pattern covered. Informational only.
    #[serde(default)]
    pub count: usize,
}

impl Pattern {
    /// Build a pattern with no examples and a zero count, as used by curated entries.
    pub fn curated(name: &str, regex: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            regex: regex.to_string(),
            description: description.to_string(),
            examples: Vec::new(),
            count: 0,
        }
    }
}

/// Trained configuration persisted as `cssguard.json`.
///
/// Produced by [`Trainer`](crate::services::Trainer), consumed read-only by
/// [`Classifier`](crate::services::Classifier). `patterns` is sorted by name and
/// `literal_classes` lexicographically so that two trainings on the same input
/// serialize byte-for-byte identically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    pub version: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub patterns: Vec<Pattern>,

    /// Classes too infrequent to generalize; matched by exact equality.
    #[serde(default, deserialize_with = "null_as_default")]
    pub literal_classes: Vec<String>,

    /// Classes that always count as matched.
    #[serde(default, deserialize_with = "null_as_default")]
    pub ignored: Vec<String>,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION.to_string(),
            patterns: Vec::new(),
            literal_classes: Vec::new(),
            ignored: Vec::new(),
        }
    }
}

impl Configuration {
    /// Look up a pattern by name.
    pub fn pattern(&self, name: &str) -> Option<&Pattern> {
        self.patterns.iter().find(|p| p.name == name)
    }

    /// Add classes to the ignore list, keeping it sorted and free of duplicates.
    pub fn extend_ignored<I, S>(&mut self, classes: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignored.extend(classes.into_iter().map(Into::into));
        self.ignored.sort();
        self.ignored.dedup();
    }
}

/// Treat an explicit JSON `null` the same as a missing field.
///
/// Configurations written by other tools serialize empty lists as `null`.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
