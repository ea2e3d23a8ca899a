use std::path::Path;

use anyhow::Result;
use wordnet_db::{LoadMode, Pos};
use wordnet_morphy::Lemmatizer;

use crate::normalize::{NormClass, Normalizer};

/// [`Normalizer`] backed by WordNet's morphology. Words of no particular
/// class are treated as nouns.
#[derive(Debug, Clone)]
pub struct WordNetNormalizer {
    lemmatizer: Lemmatizer,
}

impl WordNetNormalizer {
    pub fn new(lemmatizer: Lemmatizer) -> Self {
        Self { lemmatizer }
    }

    pub fn load(dict_dir: impl AsRef<Path>, mode: LoadMode) -> Result<Self> {
        Ok(Self::new(Lemmatizer::load_with_mode(dict_dir, mode)?))
    }

    pub fn lemmatizer(&self) -> &Lemmatizer {
        &self.lemmatizer
    }
}

fn wordnet_pos(class: NormClass) -> Pos {
    match class {
        NormClass::Noun | NormClass::Generic => Pos::Noun,
        NormClass::Verb => Pos::Verb,
        NormClass::Adjective => Pos::Adj,
        NormClass::Adverb => Pos::Adv,
    }
}

impl Normalizer for WordNetNormalizer {
    fn normalize(&self, surface: &str, class: NormClass) -> String {
        self.lemmatizer.lemmatize(wordnet_pos(class), surface)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use wordnet_db::Lexicon;
    use wordnet_morphy::Morphy;

    use crate::index::WordIndex;
    use crate::normalize::NormalizationPolicy;
    use crate::token::{TaggedToken, sentence};

    fn normalizer() -> WordNetNormalizer {
        let lexicon = Lexicon::from_lemmas([
            (Pos::Noun, "dog"),
            (Pos::Noun, "child"),
            (Pos::Verb, "run"),
            (Pos::Adj, "good"),
        ]);
        let mut morphy = Morphy::new();
        morphy.insert_exception(Pos::Noun, "children", "child");
        morphy.insert_exception(Pos::Verb, "ran", "run");
        morphy.insert_exception(Pos::Adj, "better", "good");
        WordNetNormalizer::new(Lemmatizer::new(morphy, lexicon))
    }

    #[test]
    fn maps_classes_to_wordnet_parts_of_speech() {
        let n = normalizer();
        assert_eq!(n.normalize("dogs", NormClass::Noun), "dog");
        assert_eq!(n.normalize("children", NormClass::Generic), "child");
        assert_eq!(n.normalize("ran", NormClass::Verb), "run");
        assert_eq!(n.normalize("better", NormClass::Adjective), "good");
        assert_eq!(n.normalize("ran", NormClass::Noun), "ran");
    }

    #[test]
    fn lemmatized_index_merges_inflections() {
        let policy = NormalizationPolicy::with_normalizer(Arc::new(normalizer()));
        let mut index = WordIndex::with_policy(policy);
        let s = sentence([("Dogs", "NNS"), ("chase", "VBP"), ("dogs", "NNS")]);
        index.add(&TaggedToken::new("Dogs", "NNS"), "a.txt", s);

        let key = TaggedToken::new("dog", "NNS");
        assert_eq!(index.len(), 1);
        assert_eq!(index.count(&key, None), 2);
    }

    #[test]
    fn lemmatized_index_keeps_proper_nouns_as_written() {
        let lexicon = Lexicon::from_lemmas([(Pos::Noun, "american")]);
        let normalizer = WordNetNormalizer::new(Lemmatizer::new(Morphy::new(), lexicon));
        let mut index = WordIndex::with_policy(NormalizationPolicy::with_normalizer(Arc::new(
            normalizer,
        )));
        let s = sentence([("Americans", "NNPS"), ("vote", "VBP")]);
        index.add(&TaggedToken::new("Americans", "NNPS"), "a.txt", s);

        let keys: Vec<String> = index.keys().map(ToString::to_string).collect();
        assert_eq!(keys, vec!["Americans/NNPS"]);
        assert_eq!(index.count(&TaggedToken::new("Americans", "NNPS"), None), 1);
    }
}
