use super::catalogue::PatternCatalogue;
use super::grouping::PrefixGrouper;
use super::synthesis::{self, MIN_GROUP_SIZE};
use crate::models::{ClassSet, Configuration};
use thiserror::Error;

/// Errors reported by [`Trainer::train_checked`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TrainingError {
    #[error("no CSS classes to train on")]
    EmptyInput,
}

/// Learns a [`Configuration`] from the classes defined by a project's stylesheets.
///
/// Training is a pure function of the reference set, the injected catalogue and
/// the ignore list:
///
/// 1. classes are grouped by structural prefix ([`PrefixGrouper`])
/// 2. families of [`MIN_GROUP_SIZE`] or more become one pattern each
///    ([`synthesis::synthesize`]); smaller or degenerate families are kept as literals
/// 3. curated catalogue entries are appended where no learned pattern has the same name
/// 4. patterns are sorted by name and literals lexicographically
///
/// The sort in step 4 makes repeated trainings on the same input serialize
/// identically, so the generated `cssguard.json` diffs cleanly in version control.
pub struct Trainer {
    grouper: PrefixGrouper,
    catalogue: PatternCatalogue,
    ignored: Vec<String>,
}

impl Trainer {
    pub fn new(catalogue: PatternCatalogue) -> Self {
        Self {
            grouper: PrefixGrouper::new(),
            catalogue,
            ignored: Vec::new(),
        }
    }

    /// Classes copied into [`Configuration::ignored`] on every training run.
    pub fn with_ignored<I, S>(mut self, ignored: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignored.extend(ignored.into_iter().map(Into::into));
        self
    }

    pub fn catalogue(&self) -> &PatternCatalogue {
        &self.catalogue
    }

    /// Train on `reference`.
    ///
    /// An empty reference set is not an error here; the result then only holds the
    /// curated catalogue. Use [`train_checked`](Self::train_checked) to reject it.
    pub fn train(&self, reference: &ClassSet) -> Configuration {
        let mut config = Configuration::default();

        for (prefix, members) in self.grouper.group(reference) {
            if members.len() < MIN_GROUP_SIZE {
                config.literal_classes.extend(members);
                continue;
            }

            match synthesis::synthesize(&prefix, &members) {
                Some(pattern) => {
                    // A member equal to its prefix has no suffix for the pattern to match
                    config
                        .literal_classes
                        .extend(members.iter().filter(|class| **class == prefix).cloned());
                    config.patterns.push(pattern);
                }
                None => config.literal_classes.extend(members),
            }
        }

        let learned = config.patterns.len();
        let curated = self.catalogue.merge_into(&mut config.patterns);

        config.patterns.sort_by(|a, b| a.name.cmp(&b.name));
        config.literal_classes.sort();
        config.literal_classes.dedup();
        config.extend_ignored(self.ignored.iter().cloned());

        tracing::info!(
            "Trained on {} classes: {} learned patterns, {} curated patterns (catalogue {}), {} literals",
            reference.len(),
            learned,
            curated,
            self.catalogue.version(),
            config.literal_classes.len()
        );

        config
    }

    /// Train on `reference`, rejecting an empty set.
    pub fn train_checked(&self, reference: &ClassSet) -> Result<Configuration, TrainingError> {
        if reference.is_empty() {
            return Err(TrainingError::EmptyInput);
        }
        Ok(self.train(reference))
    }
}

impl Default for Trainer {
    fn default() -> Self {
        Self::new(PatternCatalogue::tailwind())
    }
}
