use anyhow::Result;
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{fmt, EnvFilter};
use wikidex_core::persist::read_index;
use wikidex_core::search::Searcher;

#[derive(Parser)]
#[command(name = "wikidex-query")]
#[command(about = "Interactive search over a built index", long_about = None)]
struct Cli {
    /// Weight scores by PageRank authority. Conventionally passed before
    /// the index paths, though it is accepted in any position.
    #[arg(long)]
    pagerank: bool,
    /// Path to the title index
    title_index: PathBuf,
    /// Path to the per-document stats index
    doc_stats_index: PathBuf,
    /// Path to the per-term posting lists
    word_index: PathBuf,
}

const QUIT_SENTINEL: &str = ":quit";

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
    let index = read_index(&cli.title_index, &cli.doc_stats_index, &cli.word_index)?;
    tracing::info!(
        num_docs = index.num_docs(),
        num_terms = index.terms.len(),
        pagerank = cli.pagerank,
        "index loaded"
    );
    let searcher = Searcher::new(index, cli.pagerank);

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut line = String::new();
    loop {
        write!(stdout, "search> ")?;
        stdout.flush()?;
        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            // EOF
            writeln!(stdout)?;
            break;
        }
        let query = line.trim();
        if query == QUIT_SENTINEL {
            break;
        }
        match searcher.search(query) {
            Some(hits) => {
                for (pos, hit) in hits.iter().enumerate() {
                    writeln!(stdout, "{}. {}", pos + 1, hit.title)?;
                }
            }
            None => writeln!(stdout, "no results found")?,
        }
    }
    Ok(())
}
