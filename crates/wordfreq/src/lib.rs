//! Word-frequency extraction over a directory of text files.
//!
//! Text is split into sentences, tokenized and tagged by a [`TextAnalyzer`];
//! interesting words are folded into a [`WordIndex`] under a
//! [`NormalizationPolicy`], ranked by frequency and rendered as a report
//! listing every file and sentence each word occurred in.

pub mod analyzer;
pub mod corpus;
pub mod detokenize;
pub mod extract;
pub mod index;
pub mod lemma;
pub mod normalize;
pub mod rank;
pub mod report;
pub mod stopwords;
pub mod tagger;
pub mod token;
pub mod tokenizer;

pub use analyzer::{RuleBasedAnalyzer, TextAnalyzer};
pub use corpus::{CorpusError, list_files};
pub use extract::{CategoryFilter, Extractor, FilterError, WordClass};
pub use index::{Entry, Occurrences, WordIndex};
pub use lemma::WordNetNormalizer;
pub use normalize::{NormClass, NormalizationPolicy, Normalizer};
pub use rank::top_words;
pub use report::{Destination, ReportError, write_report};
pub use token::{Sentence, TaggedToken};
