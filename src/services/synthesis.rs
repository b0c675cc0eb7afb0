use crate::models::Pattern;
use std::collections::BTreeSet;

/// Smallest family that is generalized into a pattern.
pub const MIN_GROUP_SIZE: usize = 3;

/// Number of training classes kept on a learned pattern.
pub const MAX_EXAMPLES: usize = 5;

/// Generalize one prefix family into a single anchored pattern.
///
/// Each member is reduced to its suffix by stripping `prefix` and at most one
/// following `-`. Distinct suffixes fall into three buckets:
///
/// - numeric (`100`, `4`): collapsed into `\d+`, so unseen numbers match
/// - alphabetic (`lg`, `auto`): kept as literal alternatives
/// - anything else (`2.5`, `1/2`): kept as escaped literal alternatives
///
/// The resulting expression is one of
///
/// ```text
/// ^<prefix>-?\d+$
/// ^<prefix>-?(<alternatives>)$
/// ^<prefix>-?(\d+|<alternatives>)$
/// ```
///
/// with alternatives sorted lexicographically.
///
/// Returns `None` when the family is smaller than [`MIN_GROUP_SIZE`] or when no
/// member has a suffix (every member equals the prefix). Callers keep those
/// members as literal classes.
pub fn synthesize(prefix: &str, members: &[String]) -> Option<Pattern> {
    if members.len() < MIN_GROUP_SIZE {
        return None;
    }

    let mut has_numbers = false;
    let mut alternatives = BTreeSet::new();

    for class in members {
        let suffix = suffix_of(prefix, class);
        if suffix.is_empty() {
            continue;
        }

        if suffix.bytes().all(|b| b.is_ascii_digit()) {
            has_numbers = true;
        } else if suffix.bytes().all(|b| b.is_ascii_alphabetic()) {
            alternatives.insert(suffix.to_string());
        } else {
            alternatives.insert(regex::escape(suffix));
        }
    }

    let escaped_prefix = regex::escape(prefix);
    let alternation = alternatives.into_iter().collect::<Vec<_>>().join("|");

    let regex = match (has_numbers, alternation.is_empty()) {
        (true, true) => format!(r"^{}-?\d+$", escaped_prefix),
        (true, false) => format!(r"^{}-?(\d+|{})$", escaped_prefix, alternation),
        (false, false) => format!(r"^{}-?({})$", escaped_prefix, alternation),
        (false, true) => {
            tracing::debug!(
                "Prefix family {:?} has no suffixes, keeping {} classes as literals",
                prefix,
                members.len()
            );
            return None;
        }
    };

    Some(Pattern {
        name: prefix.to_string(),
        regex,
        description: format!("Matches {}-* utility classes", prefix),
        examples: members.iter().take(MAX_EXAMPLES).cloned().collect(),
        count: members.len(),
    })
}

fn suffix_of<'a>(prefix: &str, class: &'a str) -> &'a str {
    let rest = class.strip_prefix(prefix).unwrap_or(class);
    rest.strip_prefix('-').unwrap_or(rest)
}
