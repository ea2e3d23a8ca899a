//! Lemma lexicon built from WordNet `index.*` files.
//!
//! Only the lemma column of each index line is kept: the lexicon answers "is
//! this a known base form for this part of speech?", which is all morphy
//! needs to verify its candidates. Callers choose between memory-mapped files
//! or owned buffers at runtime via [`LoadMode`].
//!
//! # Example
//! ```no_run
//! use wordnet_db::{LoadMode, Lexicon, Pos};
//!
//! # fn main() -> anyhow::Result<()> {
//! let lexicon = Lexicon::load_with_mode("/path/to/wordnet", LoadMode::Mmap)?;
//! assert!(lexicon.lemma_exists(Pos::Noun, "dog"));
//! # Ok(()) }
//! ```

use std::collections::HashSet;
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use memmap2::Mmap;

/// Part-of-speech marker as used by WordNet files (`n`, `v`, `a`/`s`, `r`).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Pos {
    Noun,
    Verb,
    Adj,
    Adv,
}

impl Pos {
    pub const ALL: [Pos; 4] = [Pos::Noun, Pos::Verb, Pos::Adj, Pos::Adv];

    /// Parse a WordNet POS character into an enum.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'n' => Some(Pos::Noun),
            'v' => Some(Pos::Verb),
            'a' | 's' => Some(Pos::Adj),
            'r' => Some(Pos::Adv),
            _ => None,
        }
    }

    /// Suffix shared by the `index.*` and `*.exc` files for this POS.
    pub fn file_suffix(self) -> &'static str {
        match self {
            Pos::Noun => "noun",
            Pos::Verb => "verb",
            Pos::Adj => "adj",
            Pos::Adv => "adv",
        }
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_suffix())
    }
}

/// Strategy for loading dictionary files.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LoadMode {
    /// Memory-map each index file.
    Mmap,
    /// Read each file into an owned buffer (portable fallback).
    Owned,
}

enum Buffer {
    Mmap(Mmap),
    Owned(Vec<u8>),
}

impl Buffer {
    fn as_slice(&self) -> &[u8] {
        match self {
            Buffer::Mmap(m) => m.as_ref(),
            Buffer::Owned(v) => v.as_slice(),
        }
    }
}

/// Set of `(pos, lemma)` pairs known to a WordNet dictionary.
#[derive(Debug, Default, Clone)]
pub struct Lexicon {
    lemmas: HashSet<(Pos, String)>,
}

impl Lexicon {
    /// Load the lexicon from a directory containing `index.*` files,
    /// memory-mapping them.
    pub fn load(dict_dir: impl AsRef<Path>) -> Result<Self> {
        Self::load_with_mode(dict_dir, LoadMode::Mmap)
    }

    pub fn load_with_mode(dict_dir: impl AsRef<Path>, mode: LoadMode) -> Result<Self> {
        let dir = dict_dir.as_ref();
        let mut lemmas = HashSet::new();
        for pos in Pos::ALL {
            let path = dir.join(format!("index.{}", pos.file_suffix()));
            if !path.exists() {
                anyhow::bail!("missing required WordNet file: {}", path.display());
            }
            let buffer = load_file(&path, mode)?;
            parse_index(buffer.as_slice(), pos, &mut lemmas)
                .with_context(|| format!("parse {}", path.display()))?;
        }
        Ok(Self { lemmas })
    }

    /// Build a lexicon from in-memory lemmas.
    pub fn from_lemmas<'a, I>(lemmas: I) -> Self
    where
        I: IntoIterator<Item = (Pos, &'a str)>,
    {
        Self {
            lemmas: lemmas
                .into_iter()
                .map(|(pos, lemma)| (pos, normalize_lemma(lemma)))
                .collect(),
        }
    }

    /// Check whether a lemma exists for the given POS.
    pub fn lemma_exists(&self, pos: Pos, lemma: &str) -> bool {
        self.lemmas.contains(&(pos, normalize_lemma(lemma)))
    }

    pub fn len(&self) -> usize {
        self.lemmas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lemmas.is_empty()
    }
}

fn load_file(path: &Path, mode: LoadMode) -> Result<Buffer> {
    match mode {
        LoadMode::Mmap => {
            let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
            // The index files are treated as read-only for the lifetime of the map.
            unsafe { Mmap::map(&file) }
                .map(Buffer::Mmap)
                .with_context(|| format!("mmap {}", path.display()))
        }
        LoadMode::Owned => {
            let mut file = File::open(path).with_context(|| format!("open {}", path.display()))?;
            let mut buf = Vec::new();
            file.read_to_end(&mut buf)
                .with_context(|| format!("read {}", path.display()))?;
            Ok(Buffer::Owned(buf))
        }
    }
}

/// Collect the lemma column of an `index.*` file.
///
/// Lines starting with whitespace are the license preamble and are skipped.
/// A data line carries at least lemma, pos, synset_cnt, p_cnt, sense_cnt and
/// tagsense_cnt.
fn parse_index(bytes: &[u8], pos: Pos, out: &mut HashSet<(Pos, String)>) -> Result<usize> {
    let mut added = 0usize;
    for (lineno, raw_line) in bytes.split(|b| *b == b'\n').enumerate() {
        let line = strip_cr(raw_line);
        if line.is_empty() || matches!(line.first(), Some(b' ' | b'\t')) {
            continue;
        }
        let line_str = std::str::from_utf8(line)
            .with_context(|| format!("line {} is not valid utf8", lineno + 1))?;
        let mut tokens = line_str.split_ascii_whitespace();
        let (Some(lemma), Some(pos_char)) = (tokens.next(), tokens.next()) else {
            anyhow::bail!("line {}: malformed index line (too few tokens)", lineno + 1);
        };
        if tokens.count() < 4 {
            anyhow::bail!("line {}: malformed index line (too few tokens)", lineno + 1);
        }
        let line_pos = pos_char.chars().next().and_then(Pos::from_char);
        if line_pos != Some(pos) {
            anyhow::bail!(
                "line {}: expected pos '{}' but found '{}'",
                lineno + 1,
                pos,
                pos_char
            );
        }
        if out.insert((pos, normalize_lemma(lemma))) {
            added += 1;
        }
    }
    Ok(added)
}

fn strip_cr(line: &[u8]) -> &[u8] {
    line.strip_suffix(b"\r").unwrap_or(line)
}

/// WordNet stores lemmas lowercase with `_` for spaces.
pub fn normalize_lemma(text: &str) -> String {
    text.trim().to_lowercase().replace(' ', "_")
}
