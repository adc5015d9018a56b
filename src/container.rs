//! Container framing.
//!
//! ```text
//! [i32 magic][i32 symbol_count]
//!   symbol_count x [u8 symbol][i32 count]
//! [bit-packed payload, MSB first, last byte zero-padded]
//! ```
//!
//! Integers are little-endian. Entries are written in canonical order and the
//! end marker is always the final entry, tagged with `SENTINEL_TAG`.

use std::io;

use bitstream_io::{ByteRead, ByteReader, ByteWrite, ByteWriter, LittleEndian};
use tracing::debug;

use crate::error::{FormatError, HuffError};
use crate::frequency::{FrequencyTable, Symbol, ALPHABET_SIZE};

pub const MAGIC: i32 = -5643;

/// Symbol byte written for the end-marker entry.
pub const SENTINEL_TAG: u8 = 0xFF;

/// Bits taken by the magic and symbol-count fields.
const FIXED_HEADER_BITS: u64 = 32 + 32;

/// Bits taken by one (symbol, count) entry.
const ENTRY_BITS: u64 = 8 + 32;

/// Header size in bits for a table with `symbol_count` entries.
pub fn header_bits(symbol_count: usize) -> u64 {
    symbol_count as u64 * ENTRY_BITS + FIXED_HEADER_BITS
}

pub fn write_header<W: io::Write>(writer: W, table: &FrequencyTable) -> Result<(), HuffError> {
    let mut out = ByteWriter::endian(writer, LittleEndian);
    out.write::<i32>(MAGIC)?;
    out.write::<i32>(to_i32(table.len() as u64)?)?;
    for (symbol, count) in table.iter() {
        let tag = match symbol {
            Symbol::Byte(b) => b,
            Symbol::Sentinel => SENTINEL_TAG,
        };
        out.write::<u8>(tag)?;
        out.write::<i32>(to_i32(count)?)?;
    }
    debug!(symbols = table.len(), "header written");
    Ok(())
}

/// Read and validate a header, leaving `reader` positioned at the payload.
///
/// The magic is checked before anything else is read.
pub fn read_header<R: io::Read>(reader: R) -> Result<FrequencyTable, HuffError> {
    let mut input = ByteReader::endian(reader, LittleEndian);

    let magic = input.read::<i32>().map_err(header_error)?;
    if magic != MAGIC {
        return Err(FormatError::MagicMismatch { found: magic }.into());
    }

    let symbol_count = input.read::<i32>().map_err(header_error)?;
    if symbol_count <= 0 {
        return Err(FormatError::EmptyTable.into());
    }
    if symbol_count as usize > ALPHABET_SIZE {
        return Err(FormatError::TooManySymbols(symbol_count).into());
    }

    let symbol_count = symbol_count as usize;
    let mut entries = Vec::with_capacity(symbol_count);
    for index in 0..symbol_count {
        let tag = input.read::<u8>().map_err(header_error)?;
        let count = input.read::<i32>().map_err(header_error)?;
        if count <= 0 {
            return Err(FormatError::InvalidCount { index, count }.into());
        }
        let symbol = if index + 1 == symbol_count {
            if tag != SENTINEL_TAG {
                return Err(FormatError::MissingSentinel { tag }.into());
            }
            Symbol::Sentinel
        } else {
            Symbol::Byte(tag)
        };
        entries.push((symbol, count as u64));
    }

    let table = FrequencyTable::from_entries(entries)?;
    debug!(symbols = symbol_count, "header read");
    Ok(table)
}

fn header_error(e: io::Error) -> HuffError {
    match e.kind() {
        io::ErrorKind::UnexpectedEof => FormatError::TruncatedHeader.into(),
        _ => HuffError::Io(e),
    }
}

fn to_i32(value: u64) -> Result<i32, HuffError> {
    i32::try_from(value).map_err(|_| HuffError::InputTooLarge {
        size: value,
        limit: i32::MAX as u64,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_layout() {
        let table = FrequencyTable::from_bytes(b"aab");
        let mut buf = Vec::new();
        write_header(&mut buf, &table).unwrap();
        assert_eq!(
            buf,
            vec![
                0xF5, 0xE9, 0xFF, 0xFF, // magic
                3, 0, 0, 0, // symbol count
                b'a', 2, 0, 0, 0, //
                b'b', 1, 0, 0, 0, //
                SENTINEL_TAG, 1, 0, 0, 0,
            ]
        );
        assert_eq!(header_bits(3) as usize, buf.len() * 8);
    }

    #[test]
    fn test_header_roundtrip() {
        let data: Vec<u8> = (0..=255).chain(0..10).collect();
        let table = FrequencyTable::from_bytes(&data);
        let mut buf = Vec::new();
        write_header(&mut buf, &table).unwrap();
        buf.extend_from_slice(&[0xAB, 0xCD]);

        let mut cursor = std::io::Cursor::new(buf);
        let decoded = read_header(&mut cursor).unwrap();
        assert_eq!(decoded, table);
        // reader is left at the payload
        assert_eq!(cursor.position() as usize, 8 + 257 * 5);
    }

    #[test]
    fn test_bad_magic_stops_early() {
        let mut buf = Vec::new();
        write_header(&mut buf, &FrequencyTable::from_bytes(b"xyz")).unwrap();
        buf[0] ^= 0xFF;
        let mut cursor = std::io::Cursor::new(buf);
        let err = read_header(&mut cursor).unwrap_err();
        assert!(matches!(
            err,
            HuffError::Format(FormatError::MagicMismatch { .. })
        ));
        assert_eq!(cursor.position(), 4);
    }

    #[test]
    fn test_truncated_header() {
        let mut buf = Vec::new();
        write_header(&mut buf, &FrequencyTable::from_bytes(b"xyz")).unwrap();
        buf.truncate(buf.len() - 2);
        assert!(matches!(
            read_header(&buf[..]),
            Err(HuffError::Format(FormatError::TruncatedHeader))
        ));
        assert!(matches!(
            read_header(&[0xF5u8, 0xE9][..]),
            Err(HuffError::Format(FormatError::TruncatedHeader))
        ));
    }

    #[test]
    fn test_rejects_bad_counts() {
        let mut buf = Vec::new();
        buf.extend_from_slice(&MAGIC.to_le_bytes());
        buf.extend_from_slice(&300i32.to_le_bytes());
        assert!(matches!(
            read_header(&buf[..]),
            Err(HuffError::Format(FormatError::TooManySymbols(300)))
        ));

        let mut buf = Vec::new();
        buf.extend_from_slice(&MAGIC.to_le_bytes());
        buf.extend_from_slice(&1i32.to_le_bytes());
        buf.push(SENTINEL_TAG);
        buf.extend_from_slice(&(-4i32).to_le_bytes());
        assert!(matches!(
            read_header(&buf[..]),
            Err(HuffError::Format(FormatError::InvalidCount { index: 0, count: -4 }))
        ));
    }

    #[test]
    fn test_rejects_non_canonical_table() {
        let mut buf = Vec::new();
        buf.extend_from_slice(&MAGIC.to_le_bytes());
        buf.extend_from_slice(&3i32.to_le_bytes());
        for (tag, count) in [(b'z', 4i32), (b'a', 2), (SENTINEL_TAG, 1)] {
            buf.push(tag);
            buf.extend_from_slice(&count.to_le_bytes());
        }
        assert!(matches!(
            read_header(&buf[..]),
            Err(HuffError::Format(FormatError::NonCanonicalOrder { previous: b'z', next: b'a' }))
        ));
    }
}
