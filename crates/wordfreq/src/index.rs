use std::collections::{BTreeMap, HashMap};

use crate::normalize::NormalizationPolicy;
use crate::token::{Sentence, TaggedToken};

/// Sentences a word was recorded from, grouped by source file.
#[derive(Debug, Clone, Default)]
pub struct Occurrences {
    files: BTreeMap<String, Vec<Sentence>>,
}

impl Occurrences {
    /// Files in path order, each with its sentences in insertion order.
    pub fn files(&self) -> impl Iterator<Item = (&str, &[Sentence])> {
        self.files
            .iter()
            .map(|(file, sentences)| (file.as_str(), sentences.as_slice()))
    }

    pub fn sentences(&self, file: &str) -> &[Sentence] {
        self.files.get(file).map(Vec::as_slice).unwrap_or(&[])
    }

    fn push(&mut self, file: &str, sentence: Sentence) {
        match self.files.get_mut(file) {
            Some(sentences) => sentences.push(sentence),
            None => {
                self.files.insert(file.to_string(), vec![sentence]);
            }
        }
    }
}

/// A ranked or filtered view of one indexed word.
#[derive(Debug, Clone, Copy)]
pub struct Entry<'a> {
    pub key: &'a TaggedToken,
    pub occurrences: &'a Occurrences,
}

/// Word-centric aggregation store: canonical key -> file -> sentences.
///
/// Append-only. Counts are derived by rescanning the recorded sentences with
/// the index's [`NormalizationPolicy`], never stored.
#[derive(Debug, Default)]
pub struct WordIndex {
    policy: NormalizationPolicy,
    slots: HashMap<TaggedToken, usize>,
    words: Vec<(TaggedToken, Occurrences)>,
}

impl WordIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: NormalizationPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn policy(&self) -> &NormalizationPolicy {
        &self.policy
    }

    /// Record that `token` occurred in `sentence` of `file`.
    pub fn add(&mut self, token: &TaggedToken, file: &str, sentence: Sentence) {
        let key = self.policy.canonical(token);
        let slot = match self.slots.get(&key) {
            Some(slot) => *slot,
            None => {
                let slot = self.words.len();
                self.slots.insert(key.clone(), slot);
                self.words.push((key, Occurrences::default()));
                slot
            }
        };
        self.words[slot].1.push(file, sentence);
    }

    /// Occurrences of `key` in `file`, or across all files when `file` is `None`.
    ///
    /// Every token of every recorded sentence equivalent to `key` counts once.
    pub fn count(&self, key: &TaggedToken, file: Option<&str>) -> usize {
        let Some(occurrences) = self.occurrences(key) else {
            return 0;
        };
        match file {
            Some(file) => self.count_in(key, occurrences.sentences(file)),
            None => occurrences
                .files
                .values()
                .map(|sentences| self.count_in(key, sentences))
                .sum(),
        }
    }

    fn count_in(&self, key: &TaggedToken, sentences: &[Sentence]) -> usize {
        sentences
            .iter()
            .flat_map(|sentence| sentence.iter())
            .filter(|token| self.policy.is_equivalent(key, token))
            .count()
    }

    pub fn occurrences(&self, key: &TaggedToken) -> Option<&Occurrences> {
        self.slots.get(key).map(|slot| &self.words[*slot].1)
    }

    pub fn keys(&self) -> impl Iterator<Item = &TaggedToken> {
        self.words.iter().map(|(key, _)| key)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Entries in first-seen order, optionally limited to words occurring at
    /// least `min_count` times.
    pub fn entries(&self, min_count: Option<usize>) -> Entries<'_> {
        Entries::new(self, (0..self.words.len()).collect(), min_count)
    }

    /// Entries ordered by `order_by`. Equal keys keep first-seen order.
    pub fn entries_by<K, F>(&self, min_count: Option<usize>, mut order_by: F) -> Entries<'_>
    where
        K: Ord,
        F: FnMut(&TaggedToken) -> K,
    {
        let mut order: Vec<usize> = (0..self.words.len()).collect();
        order.sort_by_cached_key(|slot| order_by(&self.words[*slot].0));
        Entries::new(self, order, min_count)
    }

    /// At most `limit` entries; `None` or `Some(0)` means no limit.
    pub fn results(&self, limit: Option<usize>, min_count: Option<usize>) -> Results<'_> {
        self.entries(min_count).take(effective_limit(limit))
    }

    pub fn results_by<K, F>(
        &self,
        limit: Option<usize>,
        min_count: Option<usize>,
        order_by: F,
    ) -> Results<'_>
    where
        K: Ord,
        F: FnMut(&TaggedToken) -> K,
    {
        self.entries_by(min_count, order_by)
            .take(effective_limit(limit))
    }
}

pub type Results<'a> = std::iter::Take<Entries<'a>>;

fn effective_limit(limit: Option<usize>) -> usize {
    match limit {
        Some(n) if n > 0 => n,
        _ => usize::MAX,
    }
}

/// Lazy iterator over index entries. The order is fixed when it is created;
/// the threshold is checked as entries are pulled.
#[derive(Debug)]
pub struct Entries<'a> {
    index: &'a WordIndex,
    order: std::vec::IntoIter<usize>,
    min_count: Option<usize>,
}

impl<'a> Entries<'a> {
    fn new(index: &'a WordIndex, order: Vec<usize>, min_count: Option<usize>) -> Self {
        Self {
            index,
            order: order.into_iter(),
            min_count,
        }
    }
}

impl<'a> Iterator for Entries<'a> {
    type Item = Entry<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.index;
        let min_count = self.min_count;
        self.order.by_ref().find_map(|slot| {
            let (key, occurrences) = &index.words[slot];
            let keep = min_count.is_none_or(|min| index.count(key, None) >= min);
            keep.then_some(Entry { key, occurrences })
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.order.len();
        match self.min_count {
            Some(_) => (0, Some(remaining)),
            None => (remaining, Some(remaining)),
        }
    }
}
