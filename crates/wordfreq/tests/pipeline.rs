use std::fs;
use std::path::Path;
use std::sync::Arc;

use wordfreq::{
    CategoryFilter, Destination, Extractor, NormalizationPolicy, RuleBasedAnalyzer, TaggedToken,
    WordClass, WordIndex, WordNetNormalizer, list_files, top_words, write_report,
};
use wordnet_db::LoadMode;

fn write_corpus(dir: &Path) {
    fs::write(
        dir.join("a.txt"),
        "The quick fox met a lazy dog. The dog slept.\n",
    )
    .unwrap();
    fs::write(
        dir.join("b.txt"),
        "Dogs bark at the fox. We saw 3 dogs in Paris.\n",
    )
    .unwrap();
}

fn build_index(dir: &Path, policy: NormalizationPolicy, filter: CategoryFilter) -> WordIndex {
    let files = list_files(dir).unwrap();
    let mut index = WordIndex::with_policy(policy);
    Extractor::new(RuleBasedAnalyzer::new(), filter)
        .extract_corpus(&files, &mut index)
        .unwrap();
    index
}

fn ranked(index: &WordIndex, limit: Option<usize>, min_count: Option<usize>) -> Vec<String> {
    top_words(index, limit, min_count)
        .map(|entry| entry.key.to_string())
        .collect()
}

#[test]
fn ranks_words_across_files() {
    let corpus = tempfile::tempdir().unwrap();
    write_corpus(corpus.path());
    let index = build_index(
        corpus.path(),
        NormalizationPolicy::case_folding(),
        CategoryFilter::default(),
    );

    assert_eq!(
        ranked(&index, None, None),
        vec![
            "dog/NN", "dogs/NNS", "fox/NN", "3/CD", "bark/NN", "lazy/JJ", "Paris/NNP", "quick/JJ",
        ]
    );
    assert_eq!(ranked(&index, Some(3), None), vec!["dog/NN", "dogs/NNS", "fox/NN"]);
    assert_eq!(ranked(&index, None, Some(2)), vec!["dog/NN", "dogs/NNS", "fox/NN"]);

    let dogs = TaggedToken::new("dogs", "NNS");
    let b = corpus.path().join("b.txt");
    assert_eq!(index.count(&dogs, Some(&b.to_string_lossy())), 2);
    assert_eq!(index.count(&dogs, None), 2);
}

#[test]
fn verbs_only_report() {
    let corpus = tempfile::tempdir().unwrap();
    write_corpus(corpus.path());
    let index = build_index(
        corpus.path(),
        NormalizationPolicy::case_folding(),
        CategoryFilter::from_classes([WordClass::Verbs]),
    );
    assert_eq!(ranked(&index, None, None), vec!["met/VBD", "saw/VBD", "slept/VBD"]);
}

#[test]
fn writes_report_file() {
    let corpus = tempfile::tempdir().unwrap();
    write_corpus(corpus.path());
    let index = build_index(
        corpus.path(),
        NormalizationPolicy::case_folding(),
        CategoryFilter::default(),
    );

    let out = tempfile::tempdir().unwrap();
    let path = out.path().join("results.txt");
    write_report(
        &index,
        top_words(&index, Some(2), None),
        true,
        &Destination::File(path.clone()),
    )
    .unwrap();

    let expected = "Results:\n\n\
        1 - dog (2) {\n\
        \ta.txt (2) [\n\
        \t\t\"The quick fox met a lazy dog.\",\n\
        \t\t\"The dog slept.\",\n\
        \t]\n\
        }\n\
        2 - dogs (2) {\n\
        \tb.txt (2) [\n\
        \t\t\"Dogs bark at the fox.\",\n\
        \t\t\"We saw 3 dogs in Paris.\",\n\
        \t]\n\
        }\n";
    assert_eq!(fs::read_to_string(&path).unwrap(), expected);
}

#[test]
fn report_without_sentences_lists_file_counts() {
    let corpus = tempfile::tempdir().unwrap();
    write_corpus(corpus.path());
    let index = build_index(
        corpus.path(),
        NormalizationPolicy::case_folding(),
        CategoryFilter::default(),
    );

    let out = tempfile::tempdir().unwrap();
    let path = out.path().join("results.txt");
    let fox = top_words(&index, None, None).filter(|entry| entry.key.surface == "fox");
    write_report(&index, fox, false, &Destination::File(path.clone())).unwrap();

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "Results:\n\n1 - fox (2) {\n\ta.txt (1),\n\tb.txt (1),\n}\n"
    );
}

#[test]
fn lemmatized_corpus_uses_base_forms() {
    let corpus = tempfile::tempdir().unwrap();
    write_corpus(corpus.path());
    let wordnet = Path::new(env!("CARGO_MANIFEST_DIR")).join("../wordnet-db/tests/fixtures/wn");
    let normalizer = WordNetNormalizer::load(&wordnet, LoadMode::Owned).unwrap();
    let index = build_index(
        corpus.path(),
        NormalizationPolicy::with_normalizer(Arc::new(normalizer)),
        CategoryFilter::default(),
    );

    assert_eq!(
        ranked(&index, Some(3), None),
        vec!["dog/NN", "dog/NNS", "fox/NN"]
    );
    let plural = TaggedToken::new("dog", "NNS");
    assert_eq!(index.count(&plural, None), 2);
    assert!(index.occurrences(&TaggedToken::new("dogs", "NNS")).is_none());
}
