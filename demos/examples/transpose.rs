use std::num::NonZeroUsize;

use clap::Parser;
use tpose_demos::parsers::{FillOptions, StrategyOptions};
use tpose_demos::runs::{DemoError, RunConfig, report_result, run};
use tpose_transpose::DEFAULT_BLOCK_SIZE;
use tracing::error;
use tracing_forest::ForestLayer;
use tracing_forest::util::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Which transpose to run.
    #[arg(
        short,
        long,
        ignore_case = true,
        value_enum,
        default_value_t = StrategyOptions::BlockedParallel
    )]
    strategy: StrategyOptions,

    /// Rows of the input matrix.
    #[arg(short, long, default_value_t = 512)]
    rows: usize,

    /// Columns of the input matrix.
    #[arg(short, long, default_value_t = 512)]
    cols: usize,

    /// Tile side for the blocked strategy.
    #[arg(short, long, default_value_t = DEFAULT_BLOCK_SIZE)]
    block_size: usize,

    /// Worker threads for the parallel strategies. Defaults to rayon's thread count.
    #[arg(short, long)]
    threads: Option<NonZeroUsize>,

    /// How to fill the input matrix.
    #[arg(short, long, ignore_case = true, value_enum, default_value_t = FillOptions::Ones)]
    fill: FillOptions,

    /// How many times to repeat the transpose.
    #[arg(long, default_value_t = NonZeroUsize::MIN)]
    repetitions: NonZeroUsize,

    /// Check the result against the sequential transpose.
    #[arg(long)]
    verify: bool,
}

fn main() -> Result<(), DemoError> {
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    Registry::default()
        .with(env_filter)
        .with(ForestLayer::default())
        .init();

    let args = Args::parse();
    let config = RunConfig {
        strategy: args.strategy,
        rows: args.rows,
        cols: args.cols,
        block_size: args.block_size,
        threads: args.threads,
        fill: args.fill,
        repetitions: args.repetitions,
        verify: args.verify,
    };

    let report = run(&config).inspect_err(|e| error!("{e}"))?;
    report_result(&report);
    Ok(())
}
