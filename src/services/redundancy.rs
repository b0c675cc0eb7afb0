use crate::models::{ClassSet, coverage_percent};
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::BTreeMap;

/// Overlap between two stylesheets
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilePair {
    pub file1: String,
    pub file2: String,
    pub overlap: usize,
    pub file1_only: usize,
    pub file2_only: usize,
    /// Share of the smaller file's classes also defined in the larger one
    pub coverage_percent: f64,
}

/// Result of comparing the class definitions of several stylesheets
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RedundancyReport {
    pub total_files: usize,
    pub total_classes: usize,
    pub redundant_count: usize,
    pub pairs: Vec<FilePair>,

    /// Class → files defining it, for classes defined more than once
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redundant: Option<BTreeMap<String, Vec<String>>>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub removable: Vec<String>,
}

/// Compare the classes defined by each stylesheet in `files`.
///
/// `files` keeps the order the stylesheets were given in, which is also the
/// order pairs are reported in. `threshold` is the coverage percentage at or
/// above which a stylesheet is flagged as removable. The per-class `redundant`
/// map is only included when `include_redundant` is set.
pub fn analyze_redundancy(
    files: &IndexMap<String, ClassSet>,
    threshold: f64,
    include_redundant: bool,
) -> RedundancyReport {
    let mut definitions: BTreeMap<&str, Vec<String>> = BTreeMap::new();
    for (file, classes) in files {
        for class in classes {
            definitions.entry(class).or_default().push(file.clone());
        }
    }

    let total_classes = definitions.len();
    let redundant: BTreeMap<String, Vec<String>> = definitions
        .into_iter()
        .filter(|(_, defined_in)| defined_in.len() > 1)
        .map(|(class, defined_in)| (class.to_string(), defined_in))
        .collect();

    let mut pairs = Vec::new();
    for (i, (file1, classes1)) in files.iter().enumerate() {
        for (file2, classes2) in files.iter().skip(i + 1) {
            let overlap = classes1.intersection(classes2).count();
            let smaller = classes1.len().min(classes2.len());
            let coverage = if smaller == 0 {
                0.0
            } else {
                coverage_percent(overlap, smaller)
            };

            pairs.push(FilePair {
                file1: file1.clone(),
                file2: file2.clone(),
                overlap,
                file1_only: classes1.len() - overlap,
                file2_only: classes2.len() - overlap,
                coverage_percent: coverage,
            });
        }
    }

    let removable = find_removable(files, threshold);

    tracing::info!(
        "Compared {} stylesheets: {} unique classes, {} defined more than once, {} removable",
        files.len(),
        total_classes,
        redundant.len(),
        removable.len()
    );

    RedundancyReport {
        total_files: files.len(),
        total_classes,
        redundant_count: redundant.len(),
        pairs,
        redundant: include_redundant.then_some(redundant),
        removable,
    }
}

/// Stylesheets whose classes are at least `threshold` percent covered by another one.
///
/// Each pair is checked in both directions, so two identical files both appear.
pub fn find_removable(files: &IndexMap<String, ClassSet>, threshold: f64) -> Vec<String> {
    let mut removable = Vec::new();

    for (i, (file1, classes1)) in files.iter().enumerate() {
        for (file2, classes2) in files.iter().skip(i + 1) {
            for (candidate, candidate_classes, other, other_classes) in [
                (file1, classes1, file2, classes2),
                (file2, classes2, file1, classes1),
            ] {
                if candidate_classes.is_empty() {
                    continue;
                }
                let covered = candidate_classes.intersection(other_classes).count();
                let coverage = coverage_percent(covered, candidate_classes.len());
                if coverage >= threshold {
                    removable.push(format!(
                        "{} ({:.1}% covered by {})",
                        candidate, coverage, other
                    ));
                }
            }
        }
    }

    removable
}
