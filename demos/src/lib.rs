//! Harness code shared by the demo binaries: argument parsing, building the
//! input matrix, running a strategy and reporting the result.

pub mod parsers;
pub mod runs;
