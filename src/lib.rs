//! Negative set generation for ncRNA-gene interaction datasets.
//!
//! For every ncRNA family block of a family-sorted positive table, draws one
//! negative gene per positive such that negatives share no gene cluster with the
//! block's positives, nor with each other. Sampling is seeded from the block's
//! first ncRNA name, so reruns reproduce the same output byte for byte.
//!
//! The CLI (`negsets --ifile <TSV> --ofile <TSV>`) is the stable interface.

pub mod error;
pub mod pipeline;
pub mod pool;
pub mod sampler;
pub mod seed;
pub mod segment;
pub mod sink;
pub mod table;

pub use error::NegSetError;
pub use pipeline::{execute_make_neg_sets, generate_negatives, MakeNegArgs, RunSummary};
