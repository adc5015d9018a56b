//! Decode side: read the header, rebuild the tree, walk the payload.

use std::io::{BufReader, BufWriter, Read, Write};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::bits::BitUnpacker;
use crate::config::CodecConfig;
use crate::container;
use crate::error::{FormatError, HuffError};
use crate::frequency::Symbol;
use crate::tree::{HuffmanTree, Node};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecodeSummary {
    pub symbol_count: usize,
    pub decoded_size: u64,
}

pub struct Decoder<'a> {
    config: &'a CodecConfig,
}

impl<'a> Decoder<'a> {
    pub fn new(config: &'a CodecConfig) -> Self {
        Self { config }
    }

    /// Decode a container from `input` into `output`.
    ///
    /// A bad magic fails before anything is written. If the payload runs out
    /// before the end marker, the bytes decoded so far are flushed to `output`
    /// and `TruncatedStream` is returned with an empty `partial`.
    pub fn decode<R, W>(&self, input: R, output: W) -> Result<DecodeSummary, HuffError>
    where
        R: Read,
        W: Write,
    {
        let mut input = BufReader::with_capacity(self.config.buffer_capacity, input);
        let table = container::read_header(&mut input)?;
        let tree = HuffmanTree::build(&table).ok_or(FormatError::EmptyTable)?;
        debug!(symbols = table.len(), nodes = tree.len(), "tree rebuilt from header");

        let mut output = BufWriter::with_capacity(self.config.buffer_capacity, output);
        let mut bits = BitUnpacker::new(input);
        let mut decoded = 0u64;
        let mut cursor = tree.root();

        loop {
            let bit = match bits.next_bit() {
                Ok(bit) => bit,
                Err(HuffError::EndOfStream) => {
                    output.flush()?;
                    warn!(decoded, "payload ended before the end marker");
                    return Err(HuffError::TruncatedStream {
                        decoded,
                        partial: Vec::new(),
                    });
                }
                Err(e) => return Err(e),
            };
            cursor = tree
                .child(cursor, bit)
                .ok_or(FormatError::InvalidCodePath)?;

            if let Node::Leaf { symbol, .. } = *tree.node(cursor) {
                match symbol {
                    Symbol::Sentinel => break,
                    Symbol::Byte(b) => {
                        output.write_all(&[b])?;
                        decoded += 1;
                        cursor = tree.root();
                    }
                }
            }
        }

        output.flush()?;
        info!(decoded, "decode complete");
        Ok(DecodeSummary {
            symbol_count: table.len(),
            decoded_size: decoded,
        })
    }
}
