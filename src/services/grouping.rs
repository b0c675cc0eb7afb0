use crate::models::ClassSet;
use regex::Regex;
use std::collections::BTreeMap;

/// Partitions class names into families sharing a structural prefix.
///
/// The prefix is the shortest leading run of ASCII letters and hyphens that is
/// followed by an optional hyphen and an ASCII digit, or by the end of the class:
///
/// | class            | prefix           |
/// |------------------|------------------|
/// | `text-gray-100`  | `text-gray`      |
/// | `p-4`            | `p`              |
/// | `h1`             | `h`              |
/// | `text-lg`        | `text-lg`        |
/// | `hover:bg-red-5` | `hover:bg-red-5` |
///
/// Classes that do not have this shape (variant prefixes, leading digits,
/// underscores before the first digit) are their own prefix.
pub struct PrefixGrouper {
    prefix_pattern: Regex,
}

impl PrefixGrouper {
    pub fn new() -> Self {
        Self {
            prefix_pattern: Regex::new(r"^([a-zA-Z-]+?)(?:-?[0-9]|$)").expect("Invalid prefix regex"),
        }
    }

    /// Structural prefix of a single class
    pub fn prefix_of<'a>(&self, class: &'a str) -> &'a str {
        self.prefix_pattern
            .captures(class)
            .and_then(|caps| caps.get(1))
            .map_or(class, |m| m.as_str())
    }

    /// Group every class in `classes` under its prefix. Members stay in
    /// lexicographic order.
    pub fn group(&self, classes: &ClassSet) -> BTreeMap<String, Vec<String>> {
        let mut groups: BTreeMap<String, Vec<String>> = BTreeMap::new();

        for class in classes {
            groups
                .entry(self.prefix_of(class).to_string())
                .or_default()
                .push(class.clone());
        }

        tracing::debug!(
            "Grouped {} classes into {} prefix families",
            classes.len(),
            groups.len()
        );

        groups
    }
}

impl Default for PrefixGrouper {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::class_set;

    #[test]
    fn test_prefix_before_numeric_suffix() {
        let grouper = PrefixGrouper::new();
        assert_eq!(grouper.prefix_of("text-gray-100"), "text-gray");
        assert_eq!(grouper.prefix_of("p-4"), "p");
        assert_eq!(grouper.prefix_of("mt-2.5"), "mt");
        assert_eq!(grouper.prefix_of("w-1/2"), "w");
    }

    #[test]
    fn test_prefix_without_hyphen() {
        let grouper = PrefixGrouper::new();
        assert_eq!(grouper.prefix_of("h1"), "h");
        assert_eq!(grouper.prefix_of("col12"), "col");
    }

    #[test]
    fn test_prefix_without_digit_is_full_class() {
        let grouper = PrefixGrouper::new();
        assert_eq!(grouper.prefix_of("flex"), "flex");
        assert_eq!(grouper.prefix_of("text-lg"), "text-lg");
        assert_eq!(grouper.prefix_of("items-center"), "items-center");
    }

    #[test]
    fn test_prefix_of_irregular_classes() {
        let grouper = PrefixGrouper::new();
        assert_eq!(grouper.prefix_of("hover:bg-red-500"), "hover:bg-red-500");
        assert_eq!(grouper.prefix_of("p-٣"), "p-٣");
        assert_eq!(grouper.prefix_of("2xl"), "2xl");
        assert_eq!(grouper.prefix_of("btn_primary2"), "btn_primary2");
        assert_eq!(grouper.prefix_of(""), "");
    }

    #[test]
    fn test_negative_class_keeps_leading_hyphen() {
        let grouper = PrefixGrouper::new();
        assert_eq!(grouper.prefix_of("-mt-4"), "-mt");
    }

    #[test]
    fn test_group_collects_families() {
        let grouper = PrefixGrouper::new();
        let classes = class_set([
            "text-gray-300",
            "text-gray-100",
            "text-gray-200",
            "p-4",
            "p-2",
            "flex",
        ]);

        let groups = grouper.group(&classes);

        assert_eq!(groups.len(), 3);
        assert_eq!(
            groups["text-gray"],
            vec!["text-gray-100", "text-gray-200", "text-gray-300"]
        );
        assert_eq!(groups["p"], vec!["p-2", "p-4"]);
        assert_eq!(groups["flex"], vec!["flex"]);
    }

    #[test]
    fn test_group_empty_set() {
        let grouper = PrefixGrouper::new();
        assert!(grouper.group(&ClassSet::new()).is_empty());
    }
}
