use crate::models::Pattern;
use std::collections::HashSet;

/// Version of the built-in utility catalogue.
pub const TAILWIND_CATALOGUE_VERSION: &str = "2025.1";

/// Hand-written patterns for well-known utility-class families.
///
/// Merged into every trained configuration as a supplement: an entry is only
/// added when no learned pattern already uses its name. The catalogue is a
/// plain value handed to the [`Trainer`](super::Trainer), so tests and callers
/// can substitute a reduced or empty one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternCatalogue {
    version: String,
    patterns: Vec<Pattern>,
}

impl PatternCatalogue {
    pub fn new(version: impl Into<String>, patterns: Vec<Pattern>) -> Self {
        Self {
            version: version.into(),
            patterns,
        }
    }

    /// A catalogue with no entries.
    pub fn empty() -> Self {
        Self::new("empty", Vec::new())
    }

    /// Tailwind-style utility families
    pub fn tailwind() -> Self {
        let entries: [(&str, &str, &str); 26] = [
            ("spacing", r"^(m|p)(t|r|b|l|x|y)?-(\d+|auto|px)$", "Margin and padding utilities"),
            ("sizing", r"^(w|h|min-w|min-h|max-w|max-h)-(\d+|auto|full|screen|min|max|fit)$", "Width and height utilities"),
            ("flex", r"^(flex|grow|shrink|basis)-?(.*)$", "Flexbox utilities"),
            ("grid", r"^(grid|col|row|gap)-?(.*)$", "Grid utilities"),
            ("text", r"^text-(xs|sm|base|lg|xl|\d*xl|left|center|right|justify|[a-z]+-\d+)$", "Text utilities"),
            ("font", r"^font-(sans|serif|mono|thin|light|normal|medium|semibold|bold|extrabold|black)$", "Font utilities"),
            ("bg", r"^bg-(transparent|current|black|white|[a-z]+-\d+|gradient-.+)$", "Background utilities"),
            ("border", r"^border(-[trbl])?(-\d+)?(-[a-z]+-\d+)?$", "Border utilities"),
            ("rounded", r"^rounded(-[tlrb]{1,2})?(-none|-sm|-md|-lg|-xl|-2xl|-3xl|-full)?$", "Border radius utilities"),
            ("shadow", r"^shadow(-none|-sm|-md|-lg|-xl|-2xl|-inner)?$", "Shadow utilities"),
            ("opacity", r"^opacity-\d+$", "Opacity utilities"),
            ("z-index", r"^z-(\d+|auto)$", "Z-index utilities"),
            ("transition", r"^transition(-all|-colors|-opacity|-shadow|-transform|-none)?$", "Transition utilities"),
            ("duration", r"^duration-\d+$", "Duration utilities"),
            ("ease", r"^ease-(linear|in|out|in-out)$", "Easing utilities"),
            ("translate", r"^-?translate-[xy]-(\d+|full|px)$", "Transform translate utilities"),
            ("rotate", r"^-?rotate-\d+$", "Transform rotate utilities"),
            ("scale", r"^scale-[xy]?-?\d+$", "Transform scale utilities"),
            ("animate", r"^animate-(none|spin|ping|pulse|bounce)$", "Animation utilities"),
            ("cursor", r"^cursor-(auto|default|pointer|wait|text|move|not-allowed)$", "Cursor utilities"),
            ("select", r"^select-(none|text|all|auto)$", "User select utilities"),
            ("overflow", r"^overflow(-[xy])?-(auto|hidden|visible|scroll)$", "Overflow utilities"),
            ("position", r"^(static|fixed|absolute|relative|sticky)$", "Position utilities"),
            ("inset", r"^(inset|top|right|bottom|left)-(\d+|auto|px|full)$", "Position inset utilities"),
            ("display", r"^(block|inline-block|inline|flex|inline-flex|grid|inline-grid|hidden)$", "Display utilities"),
            ("visibility", r"^(visible|invisible)$", "Visibility utilities"),
        ];

        let patterns = entries
            .into_iter()
            .map(|(name, regex, description)| Pattern::curated(name, regex, description))
            .collect();

        Self::new(TAILWIND_CATALOGUE_VERSION, patterns)
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Append every entry whose name is not already taken in `patterns`.
    ///
    /// Learned patterns win silently over curated ones of the same name.
    /// Returns the number of entries appended.
    pub fn merge_into(&self, patterns: &mut Vec<Pattern>) -> usize {
        let mut taken: HashSet<String> = patterns.iter().map(|p| p.name.clone()).collect();
        let mut added = 0;

        for curated in &self.patterns {
            if taken.insert(curated.name.clone()) {
                patterns.push(curated.clone());
                added += 1;
            } else {
                tracing::debug!("Curated pattern {:?} shadowed by learned pattern", curated.name);
            }
        }

        added
    }
}

impl Default for PatternCatalogue {
    fn default() -> Self {
        Self::tailwind()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    #[test]
    fn test_tailwind_catalogue_compiles() {
        let catalogue = PatternCatalogue::tailwind();
        assert_eq!(catalogue.len(), 26);

        for pattern in catalogue.patterns() {
            assert!(
                Regex::new(&pattern.regex).is_ok(),
                "curated pattern {} does not compile",
                pattern.name
            );
        }
    }

    #[test]
    fn test_tailwind_catalogue_names_unique() {
        let catalogue = PatternCatalogue::tailwind();
        let names: HashSet<&str> = catalogue.patterns().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names.len(), catalogue.len());
    }

    #[test]
    fn test_tailwind_spot_checks() {
        let catalogue = PatternCatalogue::tailwind();
        let find = |name: &str| {
            let p = catalogue.patterns().iter().find(|p| p.name == name).unwrap();
            Regex::new(&p.regex).unwrap()
        };

        assert!(find("spacing").is_match("mx-auto"));
        assert!(find("spacing").is_match("pt-4"));
        assert!(!find("spacing").is_match("mx-wide"));
        assert!(find("translate").is_match("-translate-x-full"));
        assert!(find("cursor").is_match("cursor-not-allowed"));
        assert!(find("display").is_match("inline-flex"));
    }

    #[test]
    fn test_merge_learned_wins() {
        let catalogue = PatternCatalogue::tailwind();
        let learned = Pattern {
            name: "opacity".to_string(),
            regex: r"^opacity-?(50|75)$".to_string(),
            description: "learned".to_string(),
            examples: vec!["opacity-50".to_string()],
            count: 3,
        };
        let mut patterns = vec![learned.clone()];

        let added = catalogue.merge_into(&mut patterns);

        assert_eq!(added, 25);
        assert_eq!(patterns.len(), 26);
        let opacity: Vec<&Pattern> = patterns.iter().filter(|p| p.name == "opacity").collect();
        assert_eq!(opacity, vec![&learned]);
    }

    #[test]
    fn test_merge_empty_catalogue() {
        let mut patterns = Vec::new();
        assert_eq!(PatternCatalogue::empty().merge_into(&mut patterns), 0);
        assert!(patterns.is_empty());
    }
}
