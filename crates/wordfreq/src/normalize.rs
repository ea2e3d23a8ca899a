//! Canonical forms and word equivalence.
//!
//! The same policy runs when a word is recorded and when its occurrences are
//! counted, so it must stay fixed for the lifetime of a [`WordIndex`].
//!
//! [`WordIndex`]: crate::index::WordIndex

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use crate::token::{TaggedToken, is_proper_noun};

/// Coarse grouping that selects which reduction rules apply to a word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NormClass {
    Noun,
    Verb,
    Adjective,
    Adverb,
    Generic,
}

impl NormClass {
    pub fn for_tag(tag: &str) -> Self {
        if tag.starts_with('J') {
            NormClass::Adjective
        } else if tag.starts_with('V') {
            NormClass::Verb
        } else if tag.starts_with('N') {
            NormClass::Noun
        } else if matches!(tag, "RB" | "RBR" | "RBS") {
            NormClass::Adverb
        } else {
            NormClass::Generic
        }
    }
}

/// Reduces a surface form to its dictionary base form.
pub trait Normalizer: Send + Sync {
    fn normalize(&self, surface: &str, class: NormClass) -> String;
}

/// Lowercases a word whose first character is uppercase, unless it is tagged
/// as a proper noun.
pub fn fold_case<'a>(surface: &'a str, tag: &str) -> Cow<'a, str> {
    let starts_upper = surface.chars().next().is_some_and(char::is_uppercase);
    if starts_upper && !is_proper_noun(tag) {
        Cow::Owned(surface.to_lowercase())
    } else {
        Cow::Borrowed(surface)
    }
}

/// Case folding plus optional morphological normalization.
#[derive(Clone, Default)]
pub struct NormalizationPolicy {
    normalizer: Option<Arc<dyn Normalizer>>,
}

impl NormalizationPolicy {
    /// Case folding only.
    pub fn case_folding() -> Self {
        Self::default()
    }

    pub fn with_normalizer(normalizer: Arc<dyn Normalizer>) -> Self {
        Self {
            normalizer: Some(normalizer),
        }
    }

    pub fn normalizes(&self) -> bool {
        self.normalizer.is_some()
    }

    /// Canonical surface form of `token`; the tag never changes. Proper nouns
    /// are kept as written, with or without a normalizer.
    pub fn canonical_surface<'a>(&self, token: &'a TaggedToken) -> Cow<'a, str> {
        let folded = fold_case(&token.surface, &token.tag);
        match &self.normalizer {
            Some(normalizer) if !is_proper_noun(&token.tag) => {
                Cow::Owned(normalizer.normalize(&folded, NormClass::for_tag(&token.tag)))
            }
            _ => folded,
        }
    }

    pub fn canonical(&self, token: &TaggedToken) -> TaggedToken {
        TaggedToken::new(self.canonical_surface(token), token.tag.as_str())
    }

    /// Whether `token`, as found in a sentence, is an occurrence of `key`.
    pub fn is_equivalent(&self, key: &TaggedToken, token: &TaggedToken) -> bool {
        key.tag == token.tag && key.surface == self.canonical_surface(token)
    }
}

impl fmt::Debug for NormalizationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NormalizationPolicy")
            .field("normalizes", &self.normalizes())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct FixedNormalizer(HashMap<(&'static str, NormClass), &'static str>);

    impl Normalizer for FixedNormalizer {
        fn normalize(&self, surface: &str, class: NormClass) -> String {
            self.0
                .iter()
                .find(|((s, c), _)| *s == surface && *c == class)
                .map(|(_, base)| base.to_string())
                .unwrap_or_else(|| surface.to_string())
        }
    }

    #[test]
    fn maps_tags_to_classes() {
        assert_eq!(NormClass::for_tag("JJR"), NormClass::Adjective);
        assert_eq!(NormClass::for_tag("VBD"), NormClass::Verb);
        assert_eq!(NormClass::for_tag("NNPS"), NormClass::Noun);
        assert_eq!(NormClass::for_tag("RBS"), NormClass::Adverb);
        assert_eq!(NormClass::for_tag("RP"), NormClass::Generic);
        assert_eq!(NormClass::for_tag("CD"), NormClass::Generic);
        assert_eq!(NormClass::for_tag("not-a-tag"), NormClass::Generic);
    }

    #[test]
    fn folds_common_words_but_not_proper_nouns() {
        let policy = NormalizationPolicy::case_folding();
        assert_eq!(
            policy.canonical(&TaggedToken::new("Apple", "NN")),
            TaggedToken::new("apple", "NN")
        );
        assert_eq!(
            policy.canonical(&TaggedToken::new("Apple", "NNP")),
            TaggedToken::new("Apple", "NNP")
        );
        assert_eq!(
            policy.canonical(&TaggedToken::new("NASA", "NNPS")),
            TaggedToken::new("NASA", "NNPS")
        );
    }

    #[test]
    fn only_first_character_triggers_folding() {
        assert_eq!(fold_case("iPhone", "NN"), "iPhone");
        assert_eq!(fold_case("Ébauche", "FW"), "ébauche");
        assert_eq!(fold_case("", "NN"), "");
    }

    #[test]
    fn equivalence_requires_matching_tag() {
        let policy = NormalizationPolicy::case_folding();
        let key = TaggedToken::new("dogs", "NNS");
        assert!(policy.is_equivalent(&key, &TaggedToken::new("Dogs", "NNS")));
        assert!(!policy.is_equivalent(&key, &TaggedToken::new("dogs", "VBZ")));
        assert!(!policy.is_equivalent(&key, &TaggedToken::new("Dogs", "NNPS")));
    }

    #[test]
    fn normalizer_sees_folded_surface_and_class() {
        let normalizer = FixedNormalizer(HashMap::from([
            (("children", NormClass::Noun), "child"),
            (("ran", NormClass::Verb), "run"),
        ]));
        let policy = NormalizationPolicy::with_normalizer(Arc::new(normalizer));
        assert!(policy.normalizes());
        assert_eq!(
            policy.canonical(&TaggedToken::new("Children", "NNS")),
            TaggedToken::new("child", "NNS")
        );
        assert!(policy.is_equivalent(
            &TaggedToken::new("run", "VBD"),
            &TaggedToken::new("ran", "VBD")
        ));
        assert!(!policy.is_equivalent(
            &TaggedToken::new("run", "NN"),
            &TaggedToken::new("ran", "NN")
        ));
    }

    #[test]
    fn normalizer_leaves_proper_nouns_alone() {
        let normalizer = FixedNormalizer(HashMap::from([
            (("Americans", NormClass::Noun), "american"),
            (("americans", NormClass::Noun), "american"),
        ]));
        let policy = NormalizationPolicy::with_normalizer(Arc::new(normalizer));
        assert_eq!(
            policy.canonical(&TaggedToken::new("Americans", "NNPS")),
            TaggedToken::new("Americans", "NNPS")
        );
        assert_eq!(
            policy.canonical(&TaggedToken::new("Americans", "NNS")),
            TaggedToken::new("american", "NNS")
        );
    }
}
