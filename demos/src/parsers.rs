//! Small enums backing the command line interface.
//!
//! Each variant may be given by its full name or by any prefix that
//! determines it uniquely, plus a few extra aliases where a natural one exists.

use clap::ValueEnum;
use clap::builder::PossibleValue;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum StrategyOptions {
    Sequential,
    FlatParallel,
    BlockedParallel,
}

/// How the input matrix is filled.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum FillOptions {
    /// Every element is `1`.
    #[default]
    Ones,
    /// Uniformly random elements from a fixed seed.
    Random,
    /// Element `(i, j)` holds its row-major index `i * cols + j`.
    Index,
}

/// Produce a `PossibleValue` accepting `base` and its unique prefixes.
///
/// Every prefix of `base` at least `min_unique_base_prefix` long is accepted.
/// Each `(alias, min_unique)` pair adds `alias` and its prefixes at least
/// `min_unique` long. For example `get_aliases("flat-parallel", 1,
/// Some(vec![("parallel", 1)]))` accepts:
///
/// ```text
/// f, fl, fla, flat, flat-, ..., flat-parallel, p, pa, ..., parallel
/// ```
fn get_aliases(
    base: &'static str,
    min_unique_base_prefix: usize,
    alias: Option<Vec<(&'static str, usize)>>,
) -> PossibleValue {
    let base_prefixes = (min_unique_base_prefix..base.len()).map(|i| &base[..i]);
    match alias {
        None => PossibleValue::new(base).aliases(base_prefixes),
        Some(vec) => PossibleValue::new(base).aliases(base_prefixes.chain(
            vec.into_iter().flat_map(|(alias, min_unique)| {
                (min_unique..alias.len() + 1).map(|i| &alias[..i])
            }),
        )),
    }
}

impl ValueEnum for StrategyOptions {
    fn value_variants<'a>() -> &'a [Self] {
        &[
            StrategyOptions::Sequential,
            StrategyOptions::FlatParallel,
            StrategyOptions::BlockedParallel,
        ]
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        Some(match self {
            StrategyOptions::Sequential => get_aliases("sequential", 1, None),
            StrategyOptions::FlatParallel => {
                get_aliases("flat-parallel", 1, Some(vec![("parallel", 1)]))
            }
            StrategyOptions::BlockedParallel => {
                get_aliases("blocked-parallel", 1, Some(vec![("block-based", 6)]))
            }
        })
    }
}

impl ValueEnum for FillOptions {
    fn value_variants<'a>() -> &'a [Self] {
        &[FillOptions::Ones, FillOptions::Random, FillOptions::Index]
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        Some(match self {
            FillOptions::Ones => get_aliases("ones", 1, None),
            FillOptions::Random => get_aliases("random", 1, None),
            FillOptions::Index => get_aliases("index", 1, None),
        })
    }
}
