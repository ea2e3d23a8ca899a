//! WordNet-style morphological processing (morphy) and a lemmatizer on top.
//!
//! Candidate base forms come from three places, in order:
//! 1. the surface form itself, if it is a known lemma;
//! 2. the exception lists (`noun.exc`, `verb.exc`, ...);
//! 3. POS-specific suffix substitutions.
//!
//! Every candidate is verified against a caller-provided existence predicate,
//! so [`Morphy`] stays independent of any particular dictionary loader.
//! [`Lemmatizer`] binds it to a [`wordnet_db::Lexicon`] and picks the shortest
//! verified candidate, falling back to the surface form.
//!
//! # Example
//! ```no_run
//! use wordnet_db::{LoadMode, Pos};
//! use wordnet_morphy::Lemmatizer;
//!
//! # fn main() -> anyhow::Result<()> {
//! let lemmatizer = Lemmatizer::load_with_mode("/path/to/wordnet", LoadMode::Mmap)?;
//! assert_eq!(lemmatizer.lemmatize(Pos::Noun, "children"), "child");
//! assert_eq!(lemmatizer.lemmatize(Pos::Verb, "running"), "run");
//! # Ok(()) }
//! ```

use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result};
use wordnet_db::{LoadMode, Lexicon, Pos, normalize_lemma};

/// Exception lists keyed by POS, then by inflected form.
#[derive(Debug, Default, Clone)]
pub struct Morphy {
    exceptions: HashMap<Pos, HashMap<String, Vec<String>>>,
}

impl Morphy {
    /// Morphy with no exception lists; only suffix rules apply.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load morphy exception lists (`*.exc`) from a WordNet dict directory.
    ///
    /// Files are optional; missing ones are treated as empty.
    pub fn load(dict_dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dict_dir.as_ref();
        let mut exceptions = HashMap::new();
        for pos in Pos::ALL {
            let path = dir.join(format!("{}.exc", pos.file_suffix()));
            exceptions.insert(pos, load_exc(&path)?);
        }
        Ok(Self { exceptions })
    }

    /// Register an irregular form, e.g. `mice -> mouse`.
    pub fn insert_exception(&mut self, pos: Pos, surface: &str, lemma: &str) {
        self.exceptions
            .entry(pos)
            .or_default()
            .entry(normalize_lemma(surface))
            .or_default()
            .push(normalize_lemma(lemma));
    }

    /// Verified base-form candidates for `surface`, deduplicated, in
    /// surface / exception / rule order.
    pub fn lemmas_for<F>(&self, pos: Pos, surface: &str, lemma_exists: F) -> Vec<String>
    where
        F: Fn(Pos, &str) -> bool,
    {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        let mut push = |candidate: String| {
            if lemma_exists(pos, &candidate) && seen.insert(candidate.clone()) {
                out.push(candidate);
            }
        };

        let surface = normalize_lemma(surface);
        push(surface.clone());

        if let Some(entries) = self
            .exceptions
            .get(&pos)
            .and_then(|by_surface| by_surface.get(&surface))
        {
            for lemma in entries {
                push(lemma.clone());
            }
        }

        for (suffix, replacement) in rules_for(pos) {
            for candidate in apply_rule(&surface, suffix, replacement) {
                push(candidate);
            }
        }

        out
    }
}

/// Reduces inflected forms to dictionary base forms.
#[derive(Debug, Clone)]
pub struct Lemmatizer {
    morphy: Morphy,
    lexicon: Lexicon,
}

impl Lemmatizer {
    pub fn new(morphy: Morphy, lexicon: Lexicon) -> Self {
        Self { morphy, lexicon }
    }

    /// Load both the lexicon and the exception lists from one dict directory.
    pub fn load_with_mode(dict_dir: impl AsRef<Path>, mode: LoadMode) -> Result<Self> {
        let dir = dict_dir.as_ref();
        let lexicon = Lexicon::load_with_mode(dir, mode)
            .with_context(|| format!("loading lexicon from {}", dir.display()))?;
        let morphy = Morphy::load(dir)
            .with_context(|| format!("loading exceptions from {}", dir.display()))?;
        Ok(Self::new(morphy, lexicon))
    }

    /// Shortest verified base form of `surface`, or `surface` unchanged.
    ///
    /// A surface that is already a base form keeps its original casing; a
    /// reduced form takes over a capitalized or all-caps surface's casing.
    pub fn lemmatize(&self, pos: Pos, surface: &str) -> String {
        let exists = |pos, lemma: &str| self.lexicon.lemma_exists(pos, lemma);
        let best = self
            .morphy
            .lemmas_for(pos, surface, exists)
            .into_iter()
            .min_by_key(|lemma| lemma.chars().count());
        match best {
            Some(lemma) if lemma != normalize_lemma(surface) => match_case(lemma, surface),
            _ => surface.to_string(),
        }
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }
}

/// Apply the casing pattern of `surface` to a lowercase `lemma`.
fn match_case(lemma: String, surface: &str) -> String {
    let mut letters = surface.chars().filter(|c| c.is_alphabetic()).peekable();
    if letters.peek().is_none_or(|c| !c.is_uppercase()) {
        return lemma;
    }
    let all_caps = surface.chars().filter(|c| c.is_alphabetic()).count() > 1
        && letters.all(char::is_uppercase);
    if all_caps {
        return lemma.to_uppercase();
    }
    let mut chars = lemma.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => lemma,
    }
}

fn load_exc(path: &Path) -> Result<HashMap<String, Vec<String>>> {
    if !path.exists() {
        return Ok(HashMap::new());
    }
    let file =
        File::open(path).with_context(|| format!("open exception file {}", path.display()))?;
    let reader = BufReader::new(file);
    let mut map = HashMap::new();
    for (lineno, line) in reader.lines().enumerate() {
        let line =
            line.with_context(|| format!("read line {} in {}", lineno + 1, path.display()))?;
        let mut parts = line.split_whitespace();
        let Some(surface) = parts.next() else {
            continue;
        };
        let lemmas: Vec<String> = parts.map(normalize_lemma).collect();
        if !lemmas.is_empty() {
            map.insert(normalize_lemma(surface), lemmas);
        }
    }
    Ok(map)
}

/// Candidates for one substitution. A stripped stem ending in a doubled
/// consonant also yields the undoubled stem ("running" -> "runn", "run").
fn apply_rule(surface: &str, suffix: &str, replacement: &str) -> Vec<String> {
    let Some(stem) = surface.strip_suffix(suffix) else {
        return Vec::new();
    };
    if stem.is_empty() {
        return Vec::new();
    }
    let mut candidates = vec![format!("{stem}{replacement}")];
    if replacement.is_empty() {
        let mut chars = stem.chars();
        if let (Some(last), Some(prev)) = (chars.next_back(), chars.next_back())
            && last == prev
            && !matches!(last, 'a' | 'e' | 'i' | 'o' | 'u')
        {
            candidates.push(stem[..stem.len() - last.len_utf8()].to_string());
        }
    }
    candidates
}

fn rules_for(pos: Pos) -> &'static [(&'static str, &'static str)] {
    match pos {
        Pos::Noun => &[
            ("s", ""),
            ("ses", "s"),
            ("ves", "f"),
            ("xes", "x"),
            ("zes", "z"),
            ("ches", "ch"),
            ("shes", "sh"),
            ("men", "man"),
            ("ies", "y"),
        ],
        Pos::Verb => &[
            ("s", ""),
            ("ies", "y"),
            ("es", "e"),
            ("es", ""),
            ("ed", "e"),
            ("ed", ""),
            ("ing", "e"),
            ("ing", ""),
        ],
        Pos::Adj => &[("er", ""), ("est", ""), ("er", "e"), ("est", "e")],
        Pos::Adv => &[],
    }
}
