use std::fmt;
use std::sync::Arc;

/// A surface form paired with its Penn Treebank part-of-speech tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaggedToken {
    pub surface: String,
    pub tag: String,
}

/// One tagged sentence, shared between every word recorded from it.
pub type Sentence = Arc<[TaggedToken]>;

impl TaggedToken {
    pub fn new(surface: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            surface: surface.into(),
            tag: tag.into(),
        }
    }
}

impl From<(&str, &str)> for TaggedToken {
    fn from((surface, tag): (&str, &str)) -> Self {
        Self::new(surface, tag)
    }
}

impl fmt::Display for TaggedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.surface, self.tag)
    }
}

/// Build a [`Sentence`] from `(surface, tag)` pairs.
pub fn sentence<'a, I>(pairs: I) -> Sentence
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    pairs.into_iter().map(TaggedToken::from).collect()
}

pub fn is_proper_noun(tag: &str) -> bool {
    matches!(tag, "NNP" | "NNPS")
}

pub fn is_verb(tag: &str) -> bool {
    tag.starts_with('V')
}
