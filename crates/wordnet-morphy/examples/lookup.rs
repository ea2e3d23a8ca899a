use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use wordnet_db::{LoadMode, Pos};
use wordnet_morphy::Lemmatizer;

const USAGE: &str =
    "usage: cargo run -p wordnet-morphy --example lookup -- <dict-dir> [--demo | <word>]";

fn main() -> Result<()> {
    let mut args = env::args().skip(1);
    let dict_dir = args.next().map(PathBuf::from).context(USAGE)?;
    let words: Vec<String> = match args.next().as_deref() {
        Some("--demo") => ["running", "better", "children", "dogs", "wolves"]
            .into_iter()
            .map(String::from)
            .collect(),
        Some(word) => vec![word.to_string()],
        None => bail!(USAGE),
    };
    if args.next().is_some() {
        bail!("too many arguments");
    }

    let lemmatizer = Lemmatizer::load_with_mode(&dict_dir, LoadMode::Mmap)?;
    println!("Dictionary: {}", dict_dir.display());

    for word in words {
        println!("\nSurface: {word}");
        for pos in Pos::ALL {
            println!("  {:<5} {}", pos, lemmatizer.lemmatize(pos, &word));
        }
    }

    Ok(())
}
