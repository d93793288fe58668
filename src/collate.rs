//! Dictionary-order string comparison.
//!
//! Backed by the Unicode Collation Algorithm with the CLDR root tailoring,
//! so letters without a decomposition (`ø`, `ł`, `æ`) sort next to their
//! base letter instead of after `z`. Ordering is decided by base letter,
//! then accents, then case (lowercase first), with a code point tie break.

use std::cmp::Ordering;

use feruca::Collator;

/// Reusable collator; one instance serves a whole sort.
pub struct DictionaryOrder {
    collator: Collator,
}

impl Default for DictionaryOrder {
    fn default() -> Self {
        Self::new()
    }
}

impl DictionaryOrder {
    /// Collator using the root locale.
    pub fn new() -> Self {
        Self {
            collator: Collator::default(),
        }
    }

    /// Compares two strings in dictionary order.
    pub fn compare(&mut self, a: &str, b: &str) -> Ordering {
        self.collator.collate(a, b)
    }

    /// Case-insensitive variant: both sides are lowercased first.
    pub fn compare_ignore_case(&mut self, a: &str, b: &str) -> Ordering {
        self.compare(&a.to_lowercase(), &b.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(words: &[&str]) -> Vec<String> {
        let mut order = DictionaryOrder::new();
        let mut words: Vec<String> = words.iter().map(|w| w.to_string()).collect();
        words.sort_by(|a, b| order.compare(a, b));
        words
    }

    #[test]
    fn case_is_ignored_before_letters_differ() {
        let mut order = DictionaryOrder::new();
        assert_eq!(order.compare("apple", "Banana"), Ordering::Less);
        assert_eq!(order.compare("Zed", "alpha"), Ordering::Greater);
    }

    #[test]
    fn accents_sort_next_to_base_letter() {
        let mut order = DictionaryOrder::new();
        assert_eq!(order.compare("résumé", "resumes"), Ordering::Less);
        assert_eq!(order.compare("resume", "résumé"), Ordering::Less);
        assert_eq!(order.compare("Ézra", "Fay"), Ordering::Less);
    }

    #[test]
    fn undecomposable_letters_sort_with_their_base() {
        assert_eq!(sorted(&["p", "z", "ø", "o"]), vec!["o", "ø", "p", "z"]);
        assert_eq!(sorted(&["m", "ł", "z", "l"]), vec!["l", "ł", "m", "z"]);
        assert_eq!(sorted(&["Zoe", "Łukasz", "Mia"]), vec!["Łukasz", "Mia", "Zoe"]);
    }

    #[test]
    fn lowercase_precedes_uppercase_on_tie() {
        let mut order = DictionaryOrder::new();
        assert_eq!(order.compare("a", "A"), Ordering::Less);
        assert_eq!(order.compare("Austin", "austin"), Ordering::Greater);
        assert_eq!(order.compare_ignore_case("Austin", "austin"), Ordering::Equal);
    }

    #[test]
    fn prefix_sorts_first() {
        let mut order = DictionaryOrder::new();
        assert_eq!(order.compare("Ann", "Anna"), Ordering::Less);
        assert_eq!(order.compare("", "a"), Ordering::Less);
    }
}
