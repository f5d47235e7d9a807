use std::io;

use thiserror::Error;

/// Error type for table loading, block segmentation and negative sampling.
#[derive(Debug, Error)]
pub enum NegSetError {
    #[error(
        "not enough negative examples for current block: ncRNA family '{family}', \
         first ncRNA sequence '{rna}' (need {required}, pool has {available})"
    )]
    InsufficientCandidatePool {
        family: String,
        rna: String,
        required: usize,
        available: usize,
    },
    #[error("input is not sorted by noncodingRNA_fam: family '{family}' reappears at line {line}")]
    UnsortedInput { family: String, line: usize },
    #[error("header is missing required column '{0}'")]
    MissingColumn(String),
    #[error("line {line} has {found} fields, header declares {expected}")]
    MalformedRow {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("input has no header line")]
    EmptyInput,
    #[error(transparent)]
    Io(#[from] io::Error),
}
