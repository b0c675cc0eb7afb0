use serde::{Deserialize, Serialize};

/// Outcome of classifying a target class set.
///
/// Serialized field names follow the report format consumed by CI tooling:
/// the target universe is the HTML side and the reference universe the CSS side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    #[serde(rename = "html_classes")]
    pub total_target: usize,

    /// Size of the reference set, or 0 when classifying against a trained config.
    #[serde(rename = "css_classes")]
    pub total_reference: usize,

    /// Target classes with no definition, sorted.
    pub orphans: Vec<String>,

    /// Reference classes never referenced, sorted. Only populated in direct mode.
    pub unused: Vec<String>,

    pub matched: usize,
    pub orphan_count: usize,
    pub unused_count: usize,
    pub coverage_percent: f64,
}

impl ClassificationResult {
    /// Assemble a result, sorting both class lists and deriving the counts.
    pub fn new(
        total_target: usize,
        total_reference: usize,
        matched: usize,
        mut orphans: Vec<String>,
        mut unused: Vec<String>,
    ) -> Self {
        orphans.sort();
        unused.sort();

        Self {
            total_target,
            total_reference,
            orphan_count: orphans.len(),
            unused_count: unused.len(),
            orphans,
            unused,
            matched,
            coverage_percent: coverage_percent(matched, total_target),
        }
    }

    pub fn has_orphans(&self) -> bool {
        self.orphan_count > 0
    }

    pub fn has_unused(&self) -> bool {
        self.unused_count > 0
    }

    /// Human-readable summary block
    pub fn summary(&self) -> String {
        let mut lines = vec![format!("HTML Classes: {}", self.total_target)];

        if self.total_reference > 0 {
            lines.push(format!("CSS Classes:  {}", self.total_reference));
        }
        lines.push(format!(
            "Matched:      {} ({:.1}%)",
            self.matched, self.coverage_percent
        ));
        lines.push(format!(
            "Orphans:      {} (HTML classes with no CSS)",
            self.orphan_count
        ));
        if self.unused_count > 0 {
            lines.push(format!(
                "Unused:       {} (CSS classes not in HTML)",
                self.unused_count
            ));
        }

        let mut summary = lines.join("\n");
        summary.push('\n');
        summary
    }
}

/// Share of `total` that `matched` represents, as a percentage.
///
/// An empty target is vacuously fully covered.
pub fn coverage_percent(matched: usize, total: usize) -> f64 {
    if total == 0 {
        100.0
    } else {
        matched as f64 / total as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coverage_percent() {
        assert_eq!(coverage_percent(75, 100), 75.0);
        assert_eq!(coverage_percent(0, 4), 0.0);
        assert_eq!(coverage_percent(0, 0), 100.0);
    }

    #[test]
    fn test_new_sorts_and_counts() {
        let result = ClassificationResult::new(
            4,
            3,
            2,
            vec!["zeta".to_string(), "alpha".to_string()],
            vec!["m-2".to_string()],
        );

        assert_eq!(result.orphans, vec!["alpha", "zeta"]);
        assert_eq!(result.orphan_count, 2);
        assert_eq!(result.unused_count, 1);
        assert_eq!(result.coverage_percent, 50.0);
        assert!(result.has_orphans());
        assert!(result.has_unused());
    }

    #[test]
    fn test_has_orphans_empty() {
        let result = ClassificationResult::new(0, 0, 0, Vec::new(), Vec::new());
        assert!(!result.has_orphans());
        assert!(!result.has_unused());
        assert_eq!(result.coverage_percent, 100.0);
    }

    #[test]
    fn test_summary_contains_counts() {
        let result = ClassificationResult::new(
            10,
            20,
            8,
            vec!["a".to_string(), "b".to_string()],
            vec!["x".to_string(), "y".to_string(), "z".to_string()],
        );

        let summary = result.summary();
        assert!(summary.contains("HTML Classes: 10"));
        assert!(summary.contains("CSS Classes:  20"));
        assert!(summary.contains("Matched:      8 (80.0%)"));
        assert!(summary.contains("Orphans:      2"));
        assert!(summary.contains("Unused:       3"));
    }

    #[test]
    fn test_summary_omits_reference_when_zero() {
        let result = ClassificationResult::new(1, 0, 1, Vec::new(), Vec::new());
        let summary = result.summary();
        assert!(!summary.contains("CSS Classes"));
        assert!(!summary.contains("Unused"));
    }

    #[test]
    fn test_serialized_field_names() {
        let result = ClassificationResult::new(
            2,
            1,
            1,
            vec!["custom-class".to_string()],
            Vec::new(),
        );
        let value = serde_json::to_value(&result).unwrap();

        assert_eq!(value["html_classes"], 2);
        assert_eq!(value["css_classes"], 1);
        assert_eq!(value["orphan_count"], 1);
        assert_eq!(value["unused_count"], 0);
        assert_eq!(value["coverage_percent"], 50.0);
        assert_eq!(value["orphans"][0], "custom-class");
    }
}
