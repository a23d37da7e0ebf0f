//! Build an input, run one strategy over it, and report what happened.

use std::num::NonZeroUsize;
use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand::rngs::SmallRng;
use thiserror::Error;
use tpose_matrix::dense::RowMajorMatrix;
use tpose_transpose::{
    BlockedParallel, DEFAULT_BLOCK_SIZE, FlatParallel, Sequential, Strategy, TransposeError,
    TransposeStrategy,
};
use tracing::{info, instrument};

use crate::parsers::{FillOptions, StrategyOptions};

/// Seed for `FillOptions::Random`, fixed so runs are comparable.
const FILL_SEED: u64 = 1;

#[derive(Debug, Error)]
pub enum DemoError {
    #[error(transparent)]
    Transpose(#[from] TransposeError),

    #[error("{strategy} output differs from the sequential transpose")]
    VerificationFailed { strategy: &'static str },
}

/// Everything one harness run needs to know.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunConfig {
    pub strategy: StrategyOptions,
    pub rows: usize,
    pub cols: usize,
    pub block_size: usize,
    pub threads: Option<NonZeroUsize>,
    pub fill: FillOptions,
    pub repetitions: NonZeroUsize,
    pub verify: bool,
}

impl Default for RunConfig {
    /// A 512x512 matrix of ones, blocked with 32x32 tiles.
    fn default() -> Self {
        Self {
            strategy: StrategyOptions::BlockedParallel,
            rows: 512,
            cols: 512,
            block_size: DEFAULT_BLOCK_SIZE,
            threads: None,
            fill: FillOptions::Ones,
            repetitions: NonZeroUsize::MIN,
            verify: false,
        }
    }
}

#[derive(Debug)]
pub struct RunReport {
    pub strategy: &'static str,
    pub output: RowMajorMatrix,
    /// Wall time of each repetition, in order.
    pub timings: Vec<Duration>,
    /// Whether the output was checked against the sequential transpose.
    pub verified: bool,
}

impl RunReport {
    /// `output[0][0]`, or `None` for an empty output.
    #[must_use]
    pub fn first_element(&self) -> Option<i32> {
        self.output.get(0, 0)
    }

    #[must_use]
    pub fn mean_time(&self) -> Duration {
        let runs = u32::try_from(self.timings.len()).unwrap_or(u32::MAX).max(1);
        self.timings.iter().sum::<Duration>() / runs
    }
}

/// Map the command line choice onto a configured strategy.
pub fn build_strategy(
    choice: StrategyOptions,
    block_size: usize,
    threads: Option<NonZeroUsize>,
) -> Result<Strategy, TransposeError> {
    Ok(match choice {
        StrategyOptions::Sequential => Sequential.into(),
        StrategyOptions::FlatParallel => {
            let flat = FlatParallel::new();
            match threads {
                Some(n) => flat.with_threads(n),
                None => flat,
            }
            .into()
        }
        StrategyOptions::BlockedParallel => {
            let blocked = BlockedParallel::new(block_size)?;
            match threads {
                Some(n) => blocked.with_threads(n),
                None => blocked,
            }
            .into()
        }
    })
}

/// A `rows x cols` input filled according to `fill`.
#[must_use]
pub fn build_input(fill: FillOptions, rows: usize, cols: usize) -> RowMajorMatrix {
    match fill {
        FillOptions::Ones => RowMajorMatrix::filled(1, cols, rows),
        FillOptions::Random => {
            RowMajorMatrix::rand(&mut SmallRng::seed_from_u64(FILL_SEED), cols, rows)
        }
        FillOptions::Index => {
            let mut matrix = RowMajorMatrix::zeroed(cols, rows);
            for (k, value) in matrix.values_mut().iter_mut().enumerate() {
                *value = index_value(k);
            }
            matrix
        }
    }
}

/// Value stored at row-major position `k` by `FillOptions::Index`.
///
/// Positions past `i32::MAX` wrap modulo 2^32.
#[must_use]
pub fn index_value(k: usize) -> i32 {
    i32::try_from(k).unwrap_or_else(|_| k as u32 as i32)
}

/// Transpose a freshly built input `config.repetitions` times, timing each call.
#[instrument(skip_all, fields(strategy = ?config.strategy, rows = config.rows, cols = config.cols))]
pub fn run(config: &RunConfig) -> Result<RunReport, DemoError> {
    let strategy = build_strategy(config.strategy, config.block_size, config.threads)?;
    let input = build_input(config.fill, config.rows, config.cols);
    let mut output = RowMajorMatrix::zeroed(config.rows, config.cols);

    let mut timings = Vec::with_capacity(config.repetitions.get());
    for _ in 0..config.repetitions.get() {
        let start = Instant::now();
        strategy.transpose(&input, &mut output)?;
        timings.push(start.elapsed());
    }
    info!(
        strategy = strategy.name(),
        dims = %input.dimensions(),
        repetitions = config.repetitions.get(),
        "transpose finished"
    );

    if config.verify {
        let expected = Sequential.transpose_to_new(&input)?;
        if expected != output {
            return Err(DemoError::VerificationFailed {
                strategy: strategy.name(),
            });
        }
    }

    Ok(RunReport {
        strategy: strategy.name(),
        output,
        timings,
        verified: config.verify,
    })
}

/// Print the one-line summary plus timing.
pub fn report_result(report: &RunReport) {
    match report.first_element() {
        Some(first) => println!(
            "Transposed Matrix ({}) - First element: {first}",
            report.strategy
        ),
        None => println!("Transposed Matrix ({}) - no elements", report.strategy),
    }
    println!(
        "{} output, mean {:?} over {} run(s)",
        report.output.dimensions(),
        report.mean_time(),
        report.timings.len()
    );
    if report.verified {
        println!("Output matches the sequential transpose");
    }
}
