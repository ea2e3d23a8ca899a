//! Sentence splitting and Treebank-style word tokenization.

use once_cell::sync::Lazy;
use regex::Regex;

/// Lowercase abbreviations (without the final period) that do not end a
/// sentence.
const ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "vs", "etc", "e.g", "i.e", "inc", "ltd",
    "co", "corp", "mt", "jan", "feb", "mar", "apr", "jun", "jul", "aug", "sep", "sept", "oct",
    "nov", "dec", "fig", "gen", "col", "capt", "lt", "sgt", "rev", "u.s", "u.k",
];

static BOUNDARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[.!?]+["'”’)\]]*\s+"#).expect("valid boundary pattern"));

static TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?x)
          (?:\p{L}\.){2,}                                 # initialisms: U.S.
        | \d+(?:[.,:/]\d+)*\p{L}*                         # numbers: 3.14 1,000 10:30 3rd
        | [\p{L}\p{N}]+(?:['’\-][\p{L}\p{N}]+)*           # words, hyphenated, with apostrophes
        | \.\.\.|--|``|''                                 # multi-char punctuation
        | \S                                              # anything else, one char
        "#,
    )
    .expect("valid token pattern")
});

/// Split a line of text into sentences.
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut start = 0usize;
    for boundary in BOUNDARY.find_iter(text) {
        if !starts_sentence(&text[boundary.end()..]) {
            continue;
        }
        let candidate = text[start..boundary.end()].trim();
        if ends_with_abbreviation(candidate) {
            continue;
        }
        if !candidate.is_empty() {
            sentences.push(candidate.to_string());
        }
        start = boundary.end();
    }
    let rest = text[start..].trim();
    if !rest.is_empty() {
        sentences.push(rest.to_string());
    }
    sentences
}

fn starts_sentence(rest: &str) -> bool {
    rest.chars().next().is_some_and(|c| {
        c.is_uppercase() || c.is_ascii_digit() || matches!(c, '"' | '\'' | '(' | '[' | '“' | '‘')
    })
}

fn ends_with_abbreviation(candidate: &str) -> bool {
    let Some(last_word) = candidate.split_whitespace().next_back() else {
        return false;
    };
    let Some(word) = last_word.strip_suffix('.') else {
        return false;
    };
    let word = word.trim_start_matches(|c: char| !c.is_alphanumeric());
    let lower = word.to_lowercase();
    let single_initial = word.chars().count() == 1 && word.chars().all(char::is_uppercase);
    single_initial || ABBREVIATIONS.contains(&lower.as_str())
}

/// Split a sentence into tokens. Punctuation is separated, `n't` and clitics
/// such as `'s` become tokens of their own, and double quotes become the
/// Treebank opening and closing quote tokens.
pub fn tokenize(sentence: &str) -> Vec<String> {
    let mut tokens: Vec<String> = Vec::new();
    for m in TOKEN.find_iter(sentence) {
        let token = m.as_str();
        match token {
            "\"" | "“" | "”" => {
                let opens = match token {
                    "“" => true,
                    "”" => false,
                    _ => sentence[..m.start()]
                        .chars()
                        .next_back()
                        .is_none_or(|c| c.is_whitespace() || matches!(c, '(' | '[' | '{')),
                };
                tokens.push(if opens { "``" } else { "''" }.to_string());
            }
            "." if attaches_abbreviation(&tokens, sentence, m.start()) => {
                if let Some(last) = tokens.last_mut() {
                    last.push('.');
                }
            }
            _ => split_clitics(&token.replace('’', "'"), &mut tokens),
        }
    }
    tokens
}

/// A period directly after a known abbreviation belongs to it, unless it ends
/// the sentence.
fn attaches_abbreviation(tokens: &[String], sentence: &str, at: usize) -> bool {
    let Some(prev) = tokens.last() else {
        return false;
    };
    let adjacent = sentence[..at].ends_with(prev.as_str());
    let is_last = sentence[at + 1..].trim().is_empty();
    adjacent && !is_last && ABBREVIATIONS.contains(&prev.to_lowercase().as_str())
}

fn split_clitics(word: &str, out: &mut Vec<String>) {
    let cut = word.len().saturating_sub(3);
    if cut > 0 && word.is_char_boundary(cut) && word[cut..].eq_ignore_ascii_case("n't") {
        out.push(word[..cut].to_string());
        out.push(word[cut..].to_string());
        return;
    }
    if let Some(pos) = word.rfind('\'')
        && pos > 0
        && matches!(
            word[pos + 1..].to_ascii_lowercase().as_str(),
            "s" | "re" | "ve" | "ll" | "d" | "m"
        )
    {
        out.push(word[..pos].to_string());
        out.push(word[pos..].to_string());
        return;
    }
    out.push(word.to_string());
}
