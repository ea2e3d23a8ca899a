use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use colored::Colorize;
use thiserror::Error;
use tracing::info;

use crate::detokenize::detokenize_with;
use crate::index::{Entry, WordIndex};

/// Where the report is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    Console,
    File(PathBuf),
}

/// Console output underlines headings and target words; file output is plain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Console,
    Plain,
}

#[derive(Debug, Clone, Copy)]
pub struct ReportOptions {
    pub include_sentences: bool,
    pub style: Style,
}

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to write report to {path}")]
    File {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write report")]
    Io(#[from] io::Error),
}

/// Render ranked entries as:
///
/// ```text
/// 1 - word (total) {
///     file (count) [
///         "sentence",
///     ]
/// }
/// ```
pub fn render<'a, W, I>(
    out: &mut W,
    index: &WordIndex,
    entries: I,
    options: ReportOptions,
) -> io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = Entry<'a>>,
{
    let console = options.style == Style::Console;
    if console {
        writeln!(out)?;
        writeln!(out, "{}:", emphasize("Results"))?;
    } else {
        writeln!(out, "Results:")?;
    }
    writeln!(out)?;

    for (rank, entry) in entries.into_iter().enumerate() {
        let heading = format!(
            "{} - {} ({})",
            rank + 1,
            entry.key.surface,
            index.count(entry.key, None)
        );
        if console {
            writeln!(out, "{} {{", emphasize(&heading))?;
        } else {
            writeln!(out, "{heading} {{")?;
        }

        for (file, sentences) in entry.occurrences.files() {
            let count = index.count(entry.key, Some(file));
            let opener = if options.include_sentences { " [" } else { "," };
            writeln!(out, "\t{} ({count}){opener}", short_name(file))?;
            if !options.include_sentences {
                continue;
            }
            for sentence in sentences {
                let text = detokenize_with(
                    sentence.iter().map(|token| token.surface.as_str()),
                    |position, display| {
                        let target = &sentence[position];
                        if console && index.policy().is_equivalent(entry.key, target) {
                            emphasize(display)
                        } else {
                            display.to_string()
                        }
                    },
                );
                writeln!(out, "\t\t\"{text}\",")?;
            }
            writeln!(out, "\t]")?;
        }
        writeln!(out, "}}")?;
    }
    Ok(())
}

/// Write the report to `destination`. A file report is confirmed on stdout.
pub fn write_report<'a, I>(
    index: &WordIndex,
    entries: I,
    include_sentences: bool,
    destination: &Destination,
) -> Result<(), ReportError>
where
    I: IntoIterator<Item = Entry<'a>>,
{
    match destination {
        Destination::Console => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            let options = ReportOptions {
                include_sentences,
                style: Style::Console,
            };
            render(&mut out, index, entries, options)?;
            out.flush()?;
        }
        Destination::File(path) => {
            let file_err = |source| ReportError::File {
                path: path.clone(),
                source,
            };
            let file = File::create(path).map_err(file_err)?;
            let mut out = BufWriter::new(file);
            let options = ReportOptions {
                include_sentences,
                style: Style::Plain,
            };
            render(&mut out, index, entries, options).map_err(file_err)?;
            out.flush().map_err(file_err)?;
            info!("report written to {}", path.display());
            println!("\nResults recorded to {}", path.display());
        }
    }
    Ok(())
}

/// File name without its directory.
pub fn short_name(file: &str) -> &str {
    Path::new(file)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(file)
}

fn emphasize(text: &str) -> String {
    text.bold().underline().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::{TaggedToken, sentence};

    fn dog_index() -> WordIndex {
        let mut index = WordIndex::new();
        let s = sentence([("The", "DT"), ("dog", "NN"), ("barked", "VBD"), (".", ".")]);
        index.add(&TaggedToken::new("dog", "NN"), "corpus/x.txt", s);
        index
    }

    fn render_to_string(index: &WordIndex, options: ReportOptions) -> String {
        let mut buf = Vec::new();
        render(&mut buf, index, index.entries(None), options).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn plain_report_layout() {
        let index = dog_index();
        let out = render_to_string(
            &index,
            ReportOptions {
                include_sentences: true,
                style: Style::Plain,
            },
        );
        assert_eq!(
            out,
            "Results:\n\n1 - dog (1) {\n\tx.txt (1) [\n\t\t\"The dog barked.\",\n\t]\n}\n"
        );
    }

    #[test]
    fn omitting_sentences_lists_files_only() {
        let index = dog_index();
        let out = render_to_string(
            &index,
            ReportOptions {
                include_sentences: false,
                style: Style::Plain,
            },
        );
        assert_eq!(out, "Results:\n\n1 - dog (1) {\n\tx.txt (1),\n}\n");
    }

    #[test]
    fn console_report_highlights_target_word() {
        colored::control::set_override(true);
        let index = dog_index();
        let out = render_to_string(
            &index,
            ReportOptions {
                include_sentences: true,
                style: Style::Console,
            },
        );
        let highlighted = emphasize("dog");
        assert_ne!(highlighted, "dog");
        assert!(out.contains("1 - dog (1)"));
        assert!(out.contains(&format!("\"The {highlighted} barked.\"")));
    }

    #[test]
    fn short_name_strips_directories() {
        assert_eq!(short_name("corpus/texts/a.txt"), "a.txt");
        assert_eq!(short_name("a.txt"), "a.txt");
    }

    #[test]
    fn writes_plain_report_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.txt");
        let index = dog_index();
        write_report(&index, index.entries(None), true, &Destination::File(path.clone()))
            .unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("Results:\n\n1 - dog (1) {"));
        assert!(!written.contains('\u{1b}'));
    }

    #[test]
    fn unwritable_destination_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("results.txt");
        let index = dog_index();
        let err = write_report(&index, index.entries(None), true, &Destination::File(path))
            .unwrap_err();
        assert!(matches!(err, ReportError::File { .. }));
    }
}
