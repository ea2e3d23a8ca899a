//! Part-of-speech tagging with a closed-class lexicon, suffix heuristics and
//! a little left context. Produces Penn Treebank tags.
//!
//! A capitalized word at the start of a sentence is tagged by its lowercase
//! form, so it is never NNP or NNPS: "Paris is lovely." tags `Paris` as NN.
//! Only later occurrences in the same text can be indexed as proper nouns.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::token::TaggedToken;

const LEXICON_ENTRIES: &[(&str, &[&str])] = &[
    (
        "DT",
        &[
            "the", "a", "an", "this", "that", "these", "those", "every", "each", "some", "any",
            "no", "all", "both", "another", "either", "neither",
        ],
    ),
    (
        "IN",
        &[
            "of", "in", "on", "at", "by", "for", "with", "from", "into", "onto", "over", "under",
            "about", "after", "before", "between", "through", "during", "without", "within",
            "against", "among", "upon", "since", "until", "while", "although", "because", "if",
            "than", "though", "whether", "unless", "toward", "towards", "across", "behind",
            "beyond", "near", "per", "via", "like",
        ],
    ),
    ("CC", &["and", "or", "but", "nor", "yet", "plus"]),
    (
        "PRP",
        &[
            "i", "you", "he", "she", "it", "we", "they", "me", "him", "her", "us", "them",
            "myself", "yourself", "himself", "herself", "itself", "ourselves", "themselves",
        ],
    ),
    ("PRP$", &["my", "your", "his", "its", "our", "their"]),
    ("WDT", &["which", "whatever", "whichever"]),
    ("WP", &["who", "whom", "what", "whoever"]),
    ("WP$", &["whose"]),
    ("WRB", &["when", "where", "why", "how", "whenever", "wherever"]),
    (
        "MD",
        &[
            "can", "could", "may", "might", "must", "shall", "should", "will", "would", "'ll",
            "'d", "ca", "wo",
        ],
    ),
    ("TO", &["to"]),
    ("EX", &["there"]),
    (
        "RB",
        &[
            "not", "n't", "very", "also", "just", "only", "too", "quite", "rather", "never",
            "always", "often", "sometimes", "here", "now", "then", "still", "even", "already",
            "again", "ever", "soon", "perhaps", "almost", "so", "once", "yesterday", "today",
            "tomorrow", "away", "together",
        ],
    ),
    ("VBZ", &["is", "has", "does"]),
    ("VBP", &["are", "am", "have", "do", "'re", "'ve", "'m"]),
    (
        "VBD",
        &[
            "was", "were", "had", "did", "said", "made", "went", "came", "took", "saw", "got",
            "ran", "gave", "knew", "thought", "told", "found", "felt", "left", "began", "became",
            "kept", "brought", "wrote", "stood", "sat", "heard", "met", "ate", "slept",
        ],
    ),
    (
        "VBN",
        &[
            "been", "done", "gone", "seen", "taken", "given", "known", "written", "eaten",
            "begun",
        ],
    ),
    ("VBG", &["being", "having", "doing"]),
    (
        "VB",
        &[
            "be", "say", "make", "go", "take", "see", "come", "know", "get", "give", "think",
            "tell", "find", "want", "look", "use", "run", "eat",
        ],
    ),
    ("POS", &["'s"]),
    (
        "JJ",
        &[
            "good", "new", "old", "great", "big", "small", "little", "large", "long", "high",
            "young", "bad", "early", "late", "happy", "quick", "slow", "brown", "lazy", "red",
            "blue", "green", "black", "white", "dark", "bright", "hot", "cold", "warm", "short",
            "tall", "full", "empty", "strong", "weak", "rich", "poor", "true", "false", "easy",
            "hard", "simple", "whole", "free", "real", "sure", "own", "other", "same",
            "different", "important", "open", "clear",
        ],
    ),
    (
        "JJR",
        &[
            "better", "worse", "more", "less", "larger", "smaller", "bigger", "greater",
            "higher", "lower", "older", "younger", "faster", "slower", "longer", "shorter",
        ],
    ),
    ("JJS", &["best", "worst", "most", "least"]),
    (
        "NNS",
        &[
            "children", "people", "men", "women", "mice", "feet", "teeth", "geese", "data",
        ],
    ),
    (
        "CD",
        &[
            "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine",
            "ten", "eleven", "twelve", "twenty", "thirty", "forty", "fifty", "hundred",
            "thousand", "million", "billion",
        ],
    ),
    ("UH", &["oh", "yes", "hello", "wow", "ah", "hey"]),
];

const ADJECTIVE_SUFFIXES: &[&str] = &["ous", "ful", "ive", "able", "ible", "less", "ical", "ish"];

/// Auxiliaries after which a `-ed` form is a past participle.
const PERFECT_OR_PASSIVE: &[&str] = &[
    "has", "have", "had", "'ve", "is", "are", "was", "were", "be", "been", "being", "am", "'re",
];

static LEXICON: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    LEXICON_ENTRIES
        .iter()
        .flat_map(|(tag, words)| words.iter().map(move |word| (*word, *tag)))
        .collect()
});

static NUMBER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?\d[\d.,:/]*(?:st|nd|rd|th|s)?$").expect("valid number pattern")
});

/// Tag every token of one sentence.
pub fn tag(tokens: &[String]) -> Vec<TaggedToken> {
    let mut tagged = Vec::with_capacity(tokens.len());
    let mut initial = true;
    let mut prev: Option<(String, &'static str)> = None;

    for token in tokens {
        let context = prev.as_ref().map(|(word, tag)| (word.as_str(), *tag));
        let tag = tag_token(token, initial, context);
        tagged.push(TaggedToken::new(token.as_str(), tag));
        // Opening quotes and brackets do not end the sentence-initial position.
        initial = initial && matches!(tag, "``" | "(");
        prev = Some((token.to_lowercase(), tag));
    }
    tagged
}

fn tag_token(token: &str, initial: bool, prev: Option<(&str, &'static str)>) -> &'static str {
    if let Some(tag) = punctuation_tag(token) {
        return tag;
    }
    if NUMBER.is_match(token) {
        return "CD";
    }

    let lower = token.to_lowercase();
    let prev_tag = prev.map(|(_, tag)| tag);
    let capitalized = token.chars().next().is_some_and(char::is_uppercase);

    if let Some(tag) = LEXICON.get(lower.as_str()) {
        // "I" and mid-sentence "The" are still closed-class words.
        return match (*tag, prev_tag) {
            ("VB", Some("PRP" | "NNS" | "NNPS")) => "VBP",
            (tag, _) => tag,
        };
    }
    if capitalized && !initial {
        return proper_noun_tag(token);
    }
    if lower.chars().any(|c| c.is_alphabetic() && !c.is_ascii()) {
        return "FW";
    }
    if matches!(prev_tag, Some("MD" | "TO")) && !lower.ends_with("ly") {
        return "VB";
    }

    let len = lower.chars().count();
    if len > 4 && lower.ends_with("ing") {
        return "VBG";
    }
    if len > 3 && lower.ends_with("ed") {
        let after_auxiliary = prev.is_some_and(|(word, _)| PERFECT_OR_PASSIVE.contains(&word));
        return if after_auxiliary { "VBN" } else { "VBD" };
    }
    if len > 3 && lower.ends_with("ly") {
        return "RB";
    }
    if len > 5 && lower.ends_with("iest") {
        return "JJS";
    }
    if ADJECTIVE_SUFFIXES
        .iter()
        .any(|suffix| len > suffix.len() + 2 && lower.ends_with(suffix))
    {
        return "JJ";
    }
    if len > 3 && is_plural_form(&lower) {
        return match prev_tag {
            Some("PRP" | "WDT" | "WP") => "VBZ",
            _ => "NNS",
        };
    }
    if prev_tag == Some("PRP") {
        return "VBP";
    }
    "NN"
}

fn punctuation_tag(token: &str) -> Option<&'static str> {
    let tag = match token {
        "." | "!" | "?" => ".",
        "," => ",",
        ":" | ";" | "..." | "--" | "-" => ":",
        "``" => "``",
        "''" => "''",
        "(" | "[" | "{" => "(",
        ")" | "]" | "}" => ")",
        "$" => "$",
        "#" => "#",
        _ if token.chars().all(|c| !c.is_alphanumeric()) => "SYM",
        _ => return None,
    };
    Some(tag)
}

fn is_plural_form(lower: &str) -> bool {
    lower.ends_with('s') && !["ss", "us", "is"].iter().any(|end| lower.ends_with(end))
}

fn proper_noun_tag(token: &str) -> &'static str {
    let all_caps = token.chars().all(|c| !c.is_alphabetic() || c.is_uppercase());
    if !all_caps && is_plural_form(&token.to_lowercase()) {
        "NNPS"
    } else {
        "NNP"
    }
}
