use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{fmt, EnvFilter};
use wikidex_core::corpus::parse_corpus;
use wikidex_core::index::IndexBuilder;
use wikidex_core::persist::write_index;

#[derive(Parser)]
#[command(name = "wikidex-index")]
#[command(about = "Build the inverted index and PageRank authority from a corpus", long_about = None)]
struct Cli {
    /// XML corpus file to index
    corpus: PathBuf,
    /// Output path for the title index
    title_out: PathBuf,
    /// Output path for the per-document stats index
    doc_stats_out: PathBuf,
    /// Output path for the per-term posting lists
    word_out: PathBuf,
}

fn main() -> ExitCode {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let docs = parse_corpus(&cli.corpus)?;
    tracing::info!(num_docs = docs.len(), "parsed corpus");

    let mut builder = IndexBuilder::new();
    for doc in &docs {
        builder.add_document(doc.id, &doc.title, &doc.text)?;
    }
    let linked = builder.resolve_links();
    let index = linked.rank();
    tracing::info!(num_terms = index.terms.len(), "index built");

    write_index(&index, &cli.title_out, &cli.doc_stats_out, &cli.word_out)?;
    tracing::info!("index written");
    Ok(())
}
