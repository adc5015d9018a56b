//! Encode side: scan, plan, decide, then stream the payload.

use std::io::{BufReader, BufWriter, Read, Seek, Write};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::bits::BitPacker;
use crate::codes::CodeTable;
use crate::config::CodecConfig;
use crate::container;
use crate::error::{FormatError, HuffError};
use crate::frequency::{FrequencyTable, Symbol};
use crate::tree::HuffmanTree;

/// Size estimate used to decide whether compression is worthwhile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feasibility {
    pub original_bits: u64,
    pub header_bits: u64,
    pub payload_bits: u64,
}

impl Feasibility {
    pub fn encoded_bits(&self) -> u64 {
        self.header_bits + self.payload_bits
    }

    pub fn is_compressible(&self) -> bool {
        self.encoded_bits() < self.original_bits
    }
}

/// Everything the encoder knows once the input has been scanned.
#[derive(Debug, Clone)]
pub struct EncodePlan {
    pub table: FrequencyTable,
    pub codes: CodeTable,
    pub feasibility: Feasibility,
    pub original_size: u64,
}

impl EncodePlan {
    pub fn from_table(table: FrequencyTable, original_size: u64) -> Result<Self, HuffError> {
        let tree = HuffmanTree::build(&table).ok_or(FormatError::EmptyTable)?;
        let codes = CodeTable::assign(&tree);
        let payload_bits = table
            .iter()
            .map(|(symbol, count)| count * codes.len_of(symbol).unwrap_or(0) as u64)
            .sum();
        let feasibility = Feasibility {
            original_bits: original_size * 8,
            header_bits: container::header_bits(table.len()),
            payload_bits,
        };
        Ok(Self {
            table,
            codes,
            feasibility,
            original_size,
        })
    }

    /// Bytes the container occupies: header plus zero-padded payload.
    pub fn compressed_size(&self) -> u64 {
        (self.feasibility.header_bits + self.feasibility.payload_bits).div_ceil(8)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncodeSummary {
    pub original_size: u64,
    pub compressed_size: u64,
    pub symbol_count: usize,
    pub ratio: f64,
}

pub struct Encoder<'a> {
    config: &'a CodecConfig,
}

impl<'a> Encoder<'a> {
    pub fn new(config: &'a CodecConfig) -> Self {
        Self { config }
    }

    /// Scan the input once and work out codes and sizes without writing anything.
    pub fn plan<R: Read>(&self, input: R) -> Result<EncodePlan, HuffError> {
        let reader = BufReader::with_capacity(self.config.buffer_capacity, input);
        let (table, original_size) = FrequencyTable::scan(reader)?;
        debug!(original_size, symbols = table.len(), "input scanned");

        if original_size > self.config.max_input_size {
            return Err(HuffError::InputTooLarge {
                size: original_size,
                limit: self.config.max_input_size,
            });
        }
        EncodePlan::from_table(table, original_size)
    }

    /// Compress `input` into `output`. The input is rewound and read twice.
    ///
    /// Nothing is written when the feasibility check rejects the input.
    pub fn encode<R, W>(&self, mut input: R, output: W) -> Result<EncodeSummary, HuffError>
    where
        R: Read + Seek,
        W: Write,
    {
        input.rewind()?;
        let plan = self.plan(&mut input)?;
        let feasibility = plan.feasibility;

        if !feasibility.is_compressible() {
            if self.config.enforce_feasibility {
                warn!(
                    original_bits = feasibility.original_bits,
                    encoded_bits = feasibility.encoded_bits(),
                    "file will not compress"
                );
                return Err(HuffError::Incompressible {
                    original_bits: feasibility.original_bits,
                    estimated_bits: feasibility.encoded_bits(),
                });
            }
            debug!("feasibility check disabled, encoding anyway");
        }

        let mut output = BufWriter::with_capacity(self.config.buffer_capacity, output);
        container::write_header(&mut output, &plan.table)?;

        input.rewind()?;
        let reader = BufReader::with_capacity(self.config.buffer_capacity, &mut input);
        let mut packer = BitPacker::new(&mut output);
        for byte in reader.bytes() {
            let symbol = Symbol::Byte(byte?);
            let code = plan.codes.get(symbol).ok_or_else(|| {
                // the input changed between the two passes
                HuffError::Io(std::io::Error::new(
                    std::io::ErrorKind::InvalidData,
                    format!("symbol {symbol} was not seen during the scan"),
                ))
            })?;
            packer.append_code(code)?;
        }
        if let Some(code) = plan.codes.get(Symbol::Sentinel) {
            packer.append_code(code)?;
        }
        let payload_bits = packer.bits_written();
        packer.flush()?;
        output.flush()?;

        if payload_bits != feasibility.payload_bits {
            warn!(
                expected = feasibility.payload_bits,
                actual = payload_bits,
                "input changed between scan and encode"
            );
        }

        let summary = EncodeSummary {
            original_size: plan.original_size,
            compressed_size: plan.compressed_size(),
            symbol_count: plan.table.len(),
            ratio: if plan.original_size == 0 {
                1.0
            } else {
                plan.compressed_size() as f64 / plan.original_size as f64
            },
        };
        info!(
            original_size = summary.original_size,
            compressed_size = summary.compressed_size,
            "encode complete"
        );
        Ok(summary)
    }
}
