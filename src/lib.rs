//! huffpack: lossless byte-stream compression with a self-describing Huffman container.
//!
//! A container holds a magic number, the symbol frequency table in ascending
//! symbol order, and the MSB-first packed payload terminated by an end-marker
//! code. The decoder rebuilds the exact encode-time tree from the stored
//! frequencies alone.
//!
//! - `frequency` counts symbols in one pass
//! - `tree` merges the lightest nodes into a prefix tree
//! - `codes` turns tree paths into a code table
//! - `bits` packs and unpacks individual bits
//! - `container` reads and writes the header
//! - `encoder` / `decoder` drive the whole operation

pub mod bits;
pub mod codes;
pub mod config;
pub mod container;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod frequency;
pub mod tree;

use std::fs::File;
use std::io::Cursor;
use std::path::Path;

use tracing::info;

use crate::config::CodecConfig;
use crate::decoder::{DecodeSummary, Decoder};
use crate::encoder::{EncodeSummary, Encoder};
use crate::error::{FileSide, HuffError};

pub use crate::error::FormatError;

/// Compressed container held in memory.
#[derive(Debug, Clone)]
pub struct EncodedContainer {
    pub data: Vec<u8>,
    pub summary: EncodeSummary,
}

/// The main codec entry point.
pub struct HuffmanCodec {
    config: CodecConfig,
}

impl Default for HuffmanCodec {
    fn default() -> Self {
        Self::new(CodecConfig::default())
    }
}

impl HuffmanCodec {
    pub fn new(config: CodecConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Compress an in-memory buffer.
    pub fn compress(&self, data: &[u8]) -> Result<EncodedContainer, HuffError> {
        let mut out = Vec::new();
        let summary = Encoder::new(&self.config).encode(Cursor::new(data), &mut out)?;
        Ok(EncodedContainer { data: out, summary })
    }

    /// Decompress an in-memory container.
    ///
    /// On truncation the bytes decoded before the cut come back in
    /// `HuffError::TruncatedStream::partial`.
    pub fn decompress(&self, container: &[u8]) -> Result<Vec<u8>, HuffError> {
        let mut out = Vec::new();
        match Decoder::new(&self.config).decode(container, &mut out) {
            Ok(_) => Ok(out),
            Err(HuffError::TruncatedStream { decoded, .. }) => Err(HuffError::TruncatedStream {
                decoded,
                partial: out,
            }),
            Err(e) => Err(e),
        }
    }

    /// Compress `source` into `destination`.
    ///
    /// The destination is created (and left empty) even when the input is rejected.
    pub fn compress_file(
        &self,
        source: impl AsRef<Path>,
        destination: impl AsRef<Path>,
    ) -> Result<EncodeSummary, HuffError> {
        let (input, output) = open_pair(source.as_ref(), destination.as_ref())?;
        let summary = Encoder::new(&self.config).encode(input, output)?;
        info!(
            source = %source.as_ref().display(),
            destination = %destination.as_ref().display(),
            ratio = summary.ratio,
            "file compressed"
        );
        Ok(summary)
    }

    /// Decompress `source` into `destination`.
    ///
    /// On truncation the destination keeps every byte decoded before the error.
    pub fn decompress_file(
        &self,
        source: impl AsRef<Path>,
        destination: impl AsRef<Path>,
    ) -> Result<DecodeSummary, HuffError> {
        let (input, output) = open_pair(source.as_ref(), destination.as_ref())?;
        let summary = Decoder::new(&self.config).decode(input, output)?;
        info!(
            source = %source.as_ref().display(),
            destination = %destination.as_ref().display(),
            decoded = summary.decoded_size,
            "file decompressed"
        );
        Ok(summary)
    }
}

fn open_pair(source: &Path, destination: &Path) -> Result<(File, File), HuffError> {
    let input = File::open(source).map_err(|e| HuffError::UserInput {
        side: FileSide::Source,
        path: source.to_path_buf(),
        source: e,
    })?;
    let output = File::create(destination).map_err(|e| HuffError::UserInput {
        side: FileSide::Destination,
        path: destination.to_path_buf(),
        source: e,
    })?;
    Ok((input, output))
}

/// Compress with the default configuration.
pub fn encode(data: &[u8]) -> Result<Vec<u8>, HuffError> {
    HuffmanCodec::default().compress(data).map(|c| c.data)
}

/// Decompress with the default configuration.
pub fn decode(container: &[u8]) -> Result<Vec<u8>, HuffError> {
    HuffmanCodec::default().decompress(container)
}
