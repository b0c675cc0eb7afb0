//! Direct comparison of referenced and defined classes, without training.
//!
//! Exact set semantics: always correct for the sets given, but unlike a trained
//! [`Classifier`](super::Classifier) it cannot accept a class that is not literally
//! present in the reference set.

use crate::models::{ClassSet, ClassificationResult};

/// Compare `target` (classes used by markup/source) with `reference` (classes defined in CSS).
///
/// - `orphans = target − reference`
/// - `unused = reference − target`
/// - `matched = |target ∩ reference|`
pub fn compare_directly(target: &ClassSet, reference: &ClassSet) -> ClassificationResult {
    let orphans: Vec<String> = target.difference(reference).cloned().collect();
    let unused: Vec<String> = reference.difference(target).cloned().collect();
    let matched = target.intersection(reference).count();

    tracing::debug!(
        "Direct comparison: {} target, {} reference, {} matched",
        target.len(),
        reference.len(),
        matched
    );

    ClassificationResult::new(target.len(), reference.len(), matched, orphans, unused)
}
