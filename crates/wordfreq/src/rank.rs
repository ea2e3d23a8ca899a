use std::cmp::Reverse;

use crate::index::{Results, WordIndex};
use crate::token::TaggedToken;

/// Sort key of the default report: most frequent first, then alphabetical
/// ignoring case, then exact surface and tag so that the order is total.
pub type FrequencyKey = (Reverse<usize>, String, String, String);

pub fn by_frequency(index: &WordIndex) -> impl FnMut(&TaggedToken) -> FrequencyKey + '_ {
    move |key: &TaggedToken| {
        (
            Reverse(index.count(key, None)),
            key.surface.to_lowercase(),
            key.surface.clone(),
            key.tag.clone(),
        )
    }
}

/// The most frequent words of `index`, as shown in the report.
pub fn top_words(index: &WordIndex, limit: Option<usize>, min_count: Option<usize>) -> Results<'_> {
    index.results_by(limit, min_count, by_frequency(index))
}
