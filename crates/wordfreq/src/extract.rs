//! Extraction of interesting words from text into a [`WordIndex`].

use std::collections::{BTreeSet, HashSet};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Instant;

use rayon::prelude::*;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::analyzer::TextAnalyzer;
use crate::corpus::{CorpusError, read_text};
use crate::index::WordIndex;
use crate::normalize::fold_case;
use crate::stopwords::is_stopword;
use crate::token::{Sentence, TaggedToken, is_verb};

/// Tags reported when no word class is requested: nouns, adjectives,
/// numerals and foreign words.
pub const DEFAULT_TAGS: &[&str] = &["NN", "NNS", "NNP", "NNPS", "JJ", "JJR", "JJS", "CD", "FW"];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterError {
    #[error("valid options are \"nouns\", \"verbs\" or \"adjectives\", got \"{0}\"")]
    UnknownClass(String),
}

/// Word class selectable with `--interested-in`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WordClass {
    Nouns,
    Verbs,
    Adjectives,
}

impl WordClass {
    pub fn tags(self) -> &'static [&'static str] {
        match self {
            WordClass::Nouns => &["NN", "NNS", "NNP", "NNPS"],
            WordClass::Verbs => &["VB", "VBD", "VBG", "VBN", "VBP", "VBZ"],
            WordClass::Adjectives => &["JJ", "JJR", "JJS"],
        }
    }
}

impl FromStr for WordClass {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "nouns" => Ok(WordClass::Nouns),
            "verbs" => Ok(WordClass::Verbs),
            "adjectives" => Ok(WordClass::Adjectives),
            other => Err(FilterError::UnknownClass(other.to_string())),
        }
    }
}

/// Set of part-of-speech tags worth recording.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryFilter {
    tags: BTreeSet<&'static str>,
}

impl Default for CategoryFilter {
    fn default() -> Self {
        Self {
            tags: DEFAULT_TAGS.iter().copied().collect(),
        }
    }
}

impl CategoryFilter {
    /// Union of the tags of `classes`.
    pub fn from_classes<I>(classes: I) -> Self
    where
        I: IntoIterator<Item = WordClass>,
    {
        Self {
            tags: classes
                .into_iter()
                .flat_map(|class| class.tags().iter().copied())
                .collect(),
        }
    }

    /// Parse class names such as `["nouns", "verbs"]`. No names selects the
    /// default filter.
    pub fn from_names<I, S>(names: I) -> Result<Self, FilterError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let classes = names
            .into_iter()
            .map(|name| name.as_ref().parse())
            .collect::<Result<Vec<WordClass>, _>>()?;
        if classes.is_empty() {
            return Ok(Self::default());
        }
        Ok(Self::from_classes(classes))
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    pub fn tags(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.tags.iter().copied()
    }
}

/// Interesting tokens found in one file, each with the sentence it came from.
#[derive(Debug, Clone)]
pub struct FileWords {
    pub file: String,
    pub hits: Vec<(TaggedToken, Sentence)>,
}

impl FileWords {
    /// Add every hit to `index`. Tokens of one sentence that share a
    /// canonical key are recorded once.
    pub fn record_into(self, index: &mut WordIndex) {
        let mut current: Option<Sentence> = None;
        let mut seen: HashSet<TaggedToken> = HashSet::new();
        for (token, sentence) in self.hits {
            if !current.as_ref().is_some_and(|s| Arc::ptr_eq(s, &sentence)) {
                seen.clear();
                current = Some(Arc::clone(&sentence));
            }
            if seen.insert(index.policy().canonical(&token)) {
                index.add(&token, &self.file, sentence);
            }
        }
    }
}

/// Runs a [`TextAnalyzer`] over text and keeps the tokens that pass the
/// stopword list and the [`CategoryFilter`].
#[derive(Debug, Clone)]
pub struct Extractor<A> {
    analyzer: A,
    filter: CategoryFilter,
}

impl<A: TextAnalyzer> Extractor<A> {
    pub fn new(analyzer: A, filter: CategoryFilter) -> Self {
        Self { analyzer, filter }
    }

    /// Stopwords are checked after case folding. Verb forms containing an
    /// apostrophe (`'s`, `'re`, ...) are never interesting.
    pub fn is_interesting(&self, token: &TaggedToken) -> bool {
        let folded = fold_case(&token.surface, &token.tag);
        if is_stopword(&folded) || !self.filter.contains(&token.tag) {
            return false;
        }
        !(is_verb(&token.tag) && token.surface.contains('\''))
    }

    /// Analyze `text` line by line. Each sentence contributes its distinct
    /// interesting tokens in order of first appearance.
    pub fn analyze_text(&self, file: &str, text: &str) -> FileWords {
        let mut hits = Vec::new();
        for line in text.lines() {
            for raw in self.analyzer.segment_sentences(line) {
                let sentence: Sentence = self.analyzer.analyze_sentence(&raw).into();
                let mut seen = HashSet::new();
                for token in sentence.iter() {
                    if seen.insert(token) && self.is_interesting(token) {
                        hits.push((token.clone(), Arc::clone(&sentence)));
                    }
                }
            }
        }
        FileWords {
            file: file.to_string(),
            hits,
        }
    }

    pub fn analyze_file(&self, path: &Path) -> Result<FileWords, CorpusError> {
        let text = read_text(path)?;
        if text.trim().is_empty() {
            warn!("{} is empty", path.display());
        }
        let words = self.analyze_text(&path.to_string_lossy(), &text);
        debug!("{}: {} interesting tokens", path.display(), words.hits.len());
        Ok(words)
    }

    /// Analyze `files` in parallel on the current rayon pool and record the
    /// results into `index` in the order of `files`. Returns the number of
    /// tokens analyzed as interesting.
    ///
    /// A file that cannot be read stops the remaining analysis, and nothing
    /// is recorded into `index`.
    pub fn extract_corpus(
        &self,
        files: &[PathBuf],
        index: &mut WordIndex,
    ) -> Result<usize, CorpusError> {
        let analyzed: Vec<FileWords> = files
            .par_iter()
            .map(|path| {
                let start = Instant::now();
                let words = self.analyze_file(path)?;
                info!(
                    "analyzed {} in {} ms",
                    path.display(),
                    start.elapsed().as_millis()
                );
                Ok(words)
            })
            .collect::<Result<_, CorpusError>>()?;

        let mut hits = 0;
        for words in analyzed {
            hits += words.hits.len();
            words.record_into(index);
        }
        Ok(hits)
    }
}
