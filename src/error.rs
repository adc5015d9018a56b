//! Error types for huffpack

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Which end of a file operation failed to open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileSide {
    Source,
    Destination,
}

impl fmt::Display for FileSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileSide::Source => f.write_str("input"),
            FileSide::Destination => f.write_str("output"),
        }
    }
}

#[derive(Error, Debug)]
pub enum HuffError {
    #[error("{side} file {path:?} could not be opened: {source}")]
    UserInput {
        side: FileSide,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("file will not compress: {estimated_bits} encoded bits vs {original_bits} original bits")]
    Incompressible { original_bits: u64, estimated_bits: u64 },

    #[error("input was not produced by huffpack: {0}")]
    Format(#[from] FormatError),

    #[error("end of bit stream")]
    EndOfStream,

    /// `partial` holds the decoded prefix when decoding into memory. It is empty
    /// when the prefix was already streamed to a caller-supplied writer.
    #[error("truncated stream: input ended after {decoded} decoded bytes, before the end marker")]
    TruncatedStream { decoded: u64, partial: Vec<u8> },

    #[error("input of {size} bytes exceeds the limit of {limit} bytes")]
    InputTooLarge { size: u64, limit: u64 },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Container framing problems found while reading a header or walking the payload.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("magic mismatch (found {found:#010x})")]
    MagicMismatch { found: i32 },

    #[error("header ends before the frequency table is complete")]
    TruncatedHeader,

    #[error("frequency table is empty")]
    EmptyTable,

    #[error("frequency table declares {0} symbols")]
    TooManySymbols(i32),

    #[error("frequency table is not in ascending symbol order ({previous:#04x} then {next:#04x})")]
    NonCanonicalOrder { previous: u8, next: u8 },

    #[error("entry {index} has invalid count {count}")]
    InvalidCount { index: usize, count: i32 },

    #[error("final table entry carries tag {tag:#04x} instead of the end marker")]
    MissingSentinel { tag: u8 },

    #[error("entry {index} follows the end marker")]
    TrailingEntry { index: usize },

    #[error("payload follows a branch that does not exist in the tree")]
    InvalidCodePath,
}
