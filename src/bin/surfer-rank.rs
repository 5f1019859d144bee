//! Ranks the pages of a directory of HTML files, once by sampling and once
//! by iteration.

use anyhow::{bail, Context, Result};
use clap::Parser;
use rand::{rngs::SmallRng, SeedableRng};
use std::path::PathBuf;
use surfer_rank::{
    page_rank::{iterated, sampled, IteratedPageRank, PageRank, PageRankResult, SampledPageRank},
    uniform, Distribution, LinkGraph, DEFAULT_DAMPING, DEFAULT_SAMPLES, DEFAULT_TOLERANCE,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "surfer-rank")]
#[command(author, version, about = "PageRank of a directory of HTML pages")]
struct Cli {
    /// Directory holding the *.html pages
    corpus: PathBuf,

    /// Probability of following a link rather than jumping to a random page
    #[arg(long, default_value_t = DEFAULT_DAMPING)]
    damping: f64,

    /// Number of pages the random surfer visits
    #[arg(long, default_value_t = DEFAULT_SAMPLES)]
    samples: usize,

    /// Iteration stops once no rank moves by this much
    #[arg(long, default_value_t = DEFAULT_TOLERANCE)]
    tolerance: f64,

    /// Seed for the random surfer
    #[arg(long)]
    seed: Option<u64>,

    /// Give up iterating after this many steps
    #[arg(long)]
    max_iterations: Option<usize>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let graph = surfer_rank::crawl(&cli.corpus)
        .with_context(|| format!("failed to crawl {}", cli.corpus.display()))?;
    if graph.is_empty() {
        bail!("no *.html pages in {}", cli.corpus.display());
    }

    let rng = match cli.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_os_rng(),
    };
    let sampled_config = sampled::Config {
        damping: cli.damping,
        samples: cli.samples,
    };
    let sampled = SampledPageRank::new(&graph, &sampled_config, rng)?.calc(&uniform(&graph))?;
    tracing::trace!("sampled:\n{:?}", sampled.debug(&graph));
    println!("PageRank Results from Sampling (n = {})", cli.samples);
    print_ranks(&graph, sampled.page_rank());

    let iterated_config = iterated::Config {
        damping: cli.damping,
        tolerance: cli.tolerance,
        max_iterations: cli.max_iterations,
    };
    let iterated = IteratedPageRank::new(&graph, &iterated_config)?.calc(&uniform(&graph))?;
    tracing::trace!("iterated:\n{:?}", iterated.debug(&graph));
    if !iterated.converged {
        tracing::warn!(
            iterations = iterated.iterations,
            "iteration stopped before converging"
        );
    }
    println!("PageRank Results from Iteration");
    print_ranks(&graph, iterated.page_rank());

    Ok(())
}

fn print_ranks(graph: &LinkGraph<String>, ranks: &Distribution) {
    for (page, rank) in graph.ranked(ranks) {
        println!("  {page}: {rank:.4}");
    }
}
