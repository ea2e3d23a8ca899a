use std::env;
use std::fmt::Display;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use clap::{CommandFactory, Parser};
use thiserror::Error;
use tracing::info;
use tracing_subscriber::EnvFilter;
use wordnet_db::LoadMode;

use wordfreq::{
    CategoryFilter, CorpusError, Destination, Extractor, FilterError, NormalizationPolicy,
    RuleBasedAnalyzer, WordIndex, WordNetNormalizer, list_files, top_words, write_report,
};

const DEFAULT_NUM: usize = 15;

/// Report the most frequent interesting words (nouns, adjectives, numerals
/// and foreign words by default) across the text files of a directory,
/// with the files and sentences they occur in.
#[derive(Debug, Parser)]
#[command(
    name = "wordfreq",
    version,
    about,
    arg_required_else_help = true,
    after_help = "Example: wordfreq ./docs -f results.txt -n 100 -i verbs -i nouns"
)]
struct Args {
    /// Directory containing the input text files
    #[arg(value_name = "DIR")]
    dir: PathBuf,

    /// Record results in FILE instead of printing them
    #[arg(short, long, value_name = "FILE")]
    file: Option<PathBuf>,

    /// Number of words to include in the results
    #[arg(short, long, value_name = "N", default_value_t = DEFAULT_NUM)]
    num: usize,

    /// Omit the sentences each word occurred in
    #[arg(short, long, alias = "omit_sentences")]
    omit_sentences: bool,

    /// Include all results (overrides --num)
    #[arg(short, long)]
    all: bool,

    /// Minimum number of occurrences for a word to be reported
    #[arg(short, long, value_name = "MIN", alias = "min_count")]
    min_count: Option<usize>,

    /// Word types to report: "nouns", "verbs" or "adjectives" (repeatable)
    #[arg(short, long, value_name = "TYPE", alias = "interested_in")]
    interested_in: Vec<String>,

    /// Reduce words to their dictionary form ("children" -> "child")
    #[arg(short, long)]
    lemmatize: bool,

    /// WordNet dict directory used by --lemmatize [env: WORDNET_DIR]
    #[arg(long, value_name = "DIR")]
    wordnet_dir: Option<PathBuf>,

    /// How WordNet files are loaded: mmap or owned [env: WORDNET_LOAD_MODE]
    #[arg(long, value_name = "MODE")]
    wordnet_mode: Option<String>,

    /// Threads used to analyze files, 0 for one per core [env: WORDFREQ_JOBS]
    #[arg(short, long, value_name = "N")]
    jobs: Option<usize>,

    /// Only log warnings and errors
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Debug, Error)]
enum ConfigError {
    #[error("invalid value for --interested-in: {0}")]
    Filter(#[from] FilterError),
    #[error("--lemmatize needs a WordNet directory (--wordnet-dir or WORDNET_DIR)")]
    MissingWordNet,
    #[error("invalid WordNet load mode \"{0}\": expected mmap or owned")]
    LoadMode(String),
    #[error("invalid WORDFREQ_JOBS value \"{0}\"")]
    Jobs(String),
}

#[derive(Debug, Clone)]
struct WordNetSource {
    dir: PathBuf,
    mode: LoadMode,
}

#[derive(Debug, Clone)]
struct Config {
    dir: PathBuf,
    destination: Destination,
    limit: Option<usize>,
    min_count: Option<usize>,
    include_sentences: bool,
    filter: CategoryFilter,
    wordnet: Option<WordNetSource>,
    jobs: usize,
}

impl Config {
    /// Merge parsed arguments with environment fallbacks looked up through
    /// `lookup`.
    fn from_args<F>(args: Args, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let filter = CategoryFilter::from_names(&args.interested_in)?;

        let wordnet = if args.lemmatize {
            let dir = args
                .wordnet_dir
                .or_else(|| lookup("WORDNET_DIR").map(PathBuf::from))
                .ok_or(ConfigError::MissingWordNet)?;
            let mode = match args.wordnet_mode.or_else(|| lookup("WORDNET_LOAD_MODE")) {
                Some(raw) => parse_load_mode(&raw).ok_or(ConfigError::LoadMode(raw))?,
                None => LoadMode::Mmap,
            };
            Some(WordNetSource { dir, mode })
        } else {
            None
        };

        let jobs = match args.jobs {
            Some(jobs) => jobs,
            None => match lookup("WORDFREQ_JOBS") {
                Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Jobs(raw))?,
                None => 0,
            },
        };

        Ok(Config {
            dir: args.dir,
            destination: args.file.map_or(Destination::Console, Destination::File),
            limit: (!args.all).then_some(args.num),
            min_count: args.min_count,
            include_sentences: !args.omit_sentences,
            filter,
            wordnet,
            jobs,
        })
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.quiet);

    let config = match Config::from_args(args, |key| env::var(key).ok()) {
        Ok(config) => config,
        Err(err) => return usage_error(&err),
    };

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => match classify(&err) {
            Failure::Usage => usage_error(&err),
            Failure::Internal => {
                eprintln!("error: {err:?}");
                ExitCode::FAILURE
            }
        },
    }
}

/// How a failed run is reported: with the usage text, or with the full
/// error chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Failure {
    Usage,
    Internal,
}

fn classify(err: &anyhow::Error) -> Failure {
    match err.downcast_ref::<CorpusError>() {
        Some(CorpusError::NotADirectory(_)) => Failure::Usage,
        _ => Failure::Internal,
    }
}

fn run(config: &Config) -> anyhow::Result<()> {
    let files = list_files(&config.dir)?;
    info!("found {} files in {}", files.len(), config.dir.display());

    let policy = match &config.wordnet {
        Some(wordnet) => {
            let start = Instant::now();
            let normalizer = WordNetNormalizer::load(&wordnet.dir, wordnet.mode)?;
            info!(
                "wordnet loaded from {} in {} ms (mode: {:?}, {} lemmas)",
                wordnet.dir.display(),
                start.elapsed().as_millis(),
                wordnet.mode,
                normalizer.lemmatizer().lexicon().len()
            );
            NormalizationPolicy::with_normalizer(Arc::new(normalizer))
        }
        None => NormalizationPolicy::case_folding(),
    };

    let extractor = Extractor::new(RuleBasedAnalyzer::new(), config.filter.clone());
    let mut index = WordIndex::with_policy(policy);
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.jobs)
        .build()
        .context("failed to start analysis threads")?;

    let start = Instant::now();
    let hits = pool.install(|| extractor.extract_corpus(&files, &mut index))?;
    info!(
        "indexed {} words from {} occurrences in {} ms using {} threads",
        index.len(),
        hits,
        start.elapsed().as_millis(),
        pool.current_num_threads()
    );

    let results = top_words(&index, config.limit, config.min_count);
    write_report(&index, results, config.include_sentences, &config.destination)?;
    Ok(())
}

fn usage_error(err: &dyn Display) -> ExitCode {
    eprintln!("error: {err}\n");
    eprintln!("{}", Args::command().render_help());
    ExitCode::FAILURE
}

fn parse_load_mode(raw: &str) -> Option<LoadMode> {
    match raw.to_ascii_lowercase().as_str() {
        "mmap" => Some(LoadMode::Mmap),
        "owned" => Some(LoadMode::Owned),
        _ => None,
    }
}

fn init_tracing(quiet: bool) {
    let default_level = if quiet { "warn" } else { "info" };
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_level(true)
        .with_writer(std::io::stderr)
        .init();
}
