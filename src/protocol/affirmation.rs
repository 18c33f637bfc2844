//! Affirmation classifier
//!
//! Decides whether a user utterance counts as a "yes" to the commitment
//! question. Matching is anchored to the full trimmed string: ambiguous or
//! multi-word replies outside the fixed list are not affirmations, so a
//! session never locks on a hedged answer.

use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

static YES_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"^\s*yes\s*$",
        r"^\s*yep\s*$",
        r"^\s*yeah\s*$",
        r"^\s*yeh\s*$",
        r"^\s*absolutely\s*$",
        r"^\s*i\s+am\s*$",
        r"^\s*we\s+are\s*$",
        r"^\s*ok\s*$",
        r"^\s*okay\s*$",
        r"^\s*sure\s*$",
        r"^\s*let'?s\s+do\s+it\s*$",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("affirmation pattern must compile"))
    .collect()
});

/// Check whether a user utterance is an affirmation
pub fn is_affirmation(text: &str) -> bool {
    let t = text.trim().to_lowercase();
    if t.is_empty() {
        return false;
    }
    let result = YES_PATTERNS.iter().any(|p| p.is_match(&t));
    debug!(%result, "is_affirmation: classified");
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_affirmations() {
        assert!(is_affirmation("yes"));
        assert!(is_affirmation("yep"));
        assert!(is_affirmation("yeah"));
        assert!(is_affirmation("yeh"));
        assert!(is_affirmation("absolutely"));
        assert!(is_affirmation("ok"));
        assert!(is_affirmation("okay"));
        assert!(is_affirmation("sure"));
    }

    #[test]
    fn test_case_and_whitespace_insensitive() {
        assert!(is_affirmation("Yep"));
        assert!(is_affirmation("  OK "));
        assert!(is_affirmation("\tYES\n"));
    }

    #[test]
    fn test_multi_word_forms() {
        assert!(is_affirmation("i am"));
        assert!(is_affirmation("we are"));
        assert!(is_affirmation("let's do it"));
        assert!(is_affirmation("lets do it"));
        assert!(is_affirmation("I  am"));
    }

    #[test]
    fn test_non_affirmations() {
        assert!(!is_affirmation(""));
        assert!(!is_affirmation("   "));
        assert!(!is_affirmation("yes please"));
        assert!(!is_affirmation("not sure"));
        assert!(!is_affirmation("maybe"));
        assert!(!is_affirmation("no"));
        assert!(!is_affirmation("I am ready to commit"));
    }

    #[test]
    fn test_substring_does_not_match() {
        // Anchored matching - "yes" inside a sentence is not an affirmation
        assert!(!is_affirmation("yes, but only if the budget allows"));
        assert!(!is_affirmation("okey"));
    }
}
