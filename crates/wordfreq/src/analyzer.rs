use crate::tagger;
use crate::token::TaggedToken;
use crate::tokenizer;

/// Sentence segmentation, tokenization and part-of-speech tagging.
///
/// Implementations are shared across worker threads while a corpus is
/// analyzed.
pub trait TextAnalyzer: Send + Sync {
    fn segment_sentences(&self, text: &str) -> Vec<String>;

    fn tokenize(&self, sentence: &str) -> Vec<String>;

    fn tag(&self, tokens: &[String]) -> Vec<TaggedToken>;

    /// Tokenize and tag one sentence.
    fn analyze_sentence(&self, sentence: &str) -> Vec<TaggedToken> {
        self.tag(&self.tokenize(sentence))
    }
}

/// Built-in English analyzer: punctuation-driven sentence splitting, a
/// Treebank-style tokenizer and a lexicon/suffix tagger.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleBasedAnalyzer;

impl RuleBasedAnalyzer {
    pub fn new() -> Self {
        Self
    }
}

impl TextAnalyzer for RuleBasedAnalyzer {
    fn segment_sentences(&self, text: &str) -> Vec<String> {
        tokenizer::split_sentences(text)
    }

    fn tokenize(&self, sentence: &str) -> Vec<String> {
        tokenizer::tokenize(sentence)
    }

    fn tag(&self, tokens: &[String]) -> Vec<TaggedToken> {
        tagger::tag(tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analyzes_a_sentence_end_to_end() {
        let analyzer = RuleBasedAnalyzer::new();
        let sentences = analyzer.segment_sentences("The dog barked. Dogs bark.");
        assert_eq!(sentences.len(), 2);

        let tagged: Vec<String> = analyzer
            .analyze_sentence(&sentences[0])
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(tagged, vec!["The/DT", "dog/NN", "barked/VBD", "./."]);
    }
}
