use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
#[macro_use]
extern crate text_io;

use crate::anagram::{AnagramIndex, SearchOptions, Solution};

mod anagram;

/// Multi-word anagram finder over a word-list dictionary.
#[derive(Parser)]
struct Args {
    /// Word list, one word per line
    dictionary: PathBuf,
    /// Letters to anagram; reads queries interactively when omitted
    letters: Option<String>,
    /// Shortest word usable in a decomposition
    #[arg(long, default_value_t = 1)]
    min_word_len: usize,
    /// Most words allowed per solution
    #[arg(long)]
    max_words: Option<usize>,
    /// Print at most this many solutions per query
    #[arg(long)]
    limit: Option<usize>,
}

fn read_dictionary<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<String>> {
    let file = File::open(&path)
        .with_context(|| format!("opening dictionary {}", path.as_ref().display()))?;
    let reader = BufReader::new(file);
    let mut words = Vec::new();
    for line in reader.lines() {
        let word = line.context("reading dictionary")?.trim().to_lowercase();
        if word.is_empty() {
            continue;
        }
        words.push(word);
    }
    Ok(words)
}

/// Words sharing a signature print as one alternation, e.g. `(eat|tea|ate)`.
fn render(solution: &Solution<'_>) -> String {
    solution
        .iter()
        .map(|group| {
            if group.words.len() == 1 {
                group.words[0].clone()
            } else {
                format!("({})", group.words.join("|"))
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn run_query(index: &AnagramIndex, letters: &str, options: &SearchOptions, limit: Option<usize>) {
    let letters = letters.to_lowercase();
    let query = letters.chars().filter(|c| !c.is_whitespace());

    let mut count = 0usize;
    for solution in index.solve(query, options) {
        println!("{}", render(&solution));
        count += 1;
        if limit.is_some_and(|cap| count >= cap) {
            break;
        }
    }
    println!("{} solution(s)", count);
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let words = read_dictionary(&args.dictionary)?;
    info!(words = words.len(), "dictionary loaded");

    let index = AnagramIndex::from_words(&words).context("building signature index")?;

    let options = SearchOptions {
        min_word_len: args.min_word_len,
        max_words: args.max_words,
    };

    if let Some(letters) = args.letters {
        run_query(&index, &letters, &options, args.limit);
        return Ok(());
    }

    loop {
        println!("Enter letters (blank line quits):");
        let line: String = read!("{}\n");
        if line.trim().is_empty() {
            break;
        }
        run_query(&index, line.trim(), &options, args.limit);
    }
    Ok(())
}
