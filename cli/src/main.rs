use anyhow::Result;
use boolir_core::corpus::{MSG_EMPTY_CORPUS, MSG_EMPTY_QUERY, MSG_NO_MATCH, PREVIEW_CHARS};
use boolir_core::{evaluate, preview, Corpus, InvertedIndex};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use std::io::{self, BufRead, Write};

#[derive(Parser)]
#[command(name = "boolir")]
#[command(about = "Boolean keyword search over a directory of text files", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate one query and print the matching documents
    Search {
        /// Directory of .txt documents
        #[arg(long)]
        docs: String,
        /// Characters of each document shown in results
        #[arg(long, default_value_t = PREVIEW_CHARS)]
        preview_chars: usize,
        /// Query: `a and b`, `a or b`, `a not b`, or bare words
        query: String,
    },
    /// Build the index once and evaluate one query per input line
    Repl {
        #[arg(long)]
        docs: String,
        #[arg(long, default_value_t = PREVIEW_CHARS)]
        preview_chars: usize,
    },
    /// Print every indexed token with the documents containing it
    Terms {
        #[arg(long)]
        docs: String,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(io::stderr).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Search { docs, preview_chars, query } => {
            let (corpus, index) = load(&docs)?;
            let mut out = io::stdout().lock();
            print_results(&mut out, &corpus, &index, &query, preview_chars)
        }
        Commands::Repl { docs, preview_chars } => {
            let (corpus, index) = load(&docs)?;
            let mut out = io::stdout().lock();
            for line in io::stdin().lock().lines() {
                let line = line?;
                print_results(&mut out, &corpus, &index, &line, preview_chars)?;
                out.flush()?;
            }
            Ok(())
        }
        Commands::Terms { docs } => {
            let (_, index) = load(&docs)?;
            let mut terms: Vec<_> = index.terms().collect();
            terms.sort_by_key(|(t, _)| *t);
            let mut out = io::stdout().lock();
            for (term, ids) in terms {
                let mut ids: Vec<&str> = ids.iter().map(String::as_str).collect();
                ids.sort();
                writeln!(out, "{term}\t{}", ids.join(", "))?;
            }
            Ok(())
        }
    }
}

fn load(dir: &str) -> Result<(Corpus, InvertedIndex)> {
    let corpus = Corpus::from_dir(dir)?;
    let index = corpus.build_index();
    tracing::info!(num_docs = corpus.len(), num_terms = index.num_terms(), "index ready");
    Ok((corpus, index))
}

fn print_results<W: Write>(out: &mut W, corpus: &Corpus, index: &InvertedIndex, query: &str, preview_chars: usize) -> Result<()> {
    if corpus.is_empty() {
        writeln!(out, "{MSG_EMPTY_CORPUS}")?;
        return Ok(());
    }
    if query.trim().is_empty() {
        writeln!(out, "{MSG_EMPTY_QUERY}")?;
        return Ok(());
    }
    let results = evaluate(index, query);
    if results.is_empty() {
        writeln!(out, "{MSG_NO_MATCH}")?;
        return Ok(());
    }
    for doc in corpus.ordered(&results) {
        writeln!(out, "**{}:** ({})", doc.id, doc.name)?;
        writeln!(out, "{}", preview(&doc.text, preview_chars))?;
        writeln!(out, "---")?;
    }
    Ok(())
}
