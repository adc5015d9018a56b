//! MSB-first bit packing on top of `bitstream-io`.

use std::io::{self, Read, Write};

use bitstream_io::{BigEndian, BitRead, BitReader, BitWrite, BitWriter};

use crate::error::HuffError;

pub struct BitPacker<W: Write> {
    writer: BitWriter<W, BigEndian>,
    bits_written: u64,
}

impl<W: Write> BitPacker<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: BitWriter::endian(writer, BigEndian),
            bits_written: 0,
        }
    }

    pub fn append_bit(&mut self, bit: bool) -> io::Result<()> {
        self.writer.write_bit(bit)?;
        self.bits_written += 1;
        Ok(())
    }

    pub fn append_code(&mut self, code: &[bool]) -> io::Result<()> {
        for &bit in code {
            self.append_bit(bit)?;
        }
        Ok(())
    }

    pub fn bits_written(&self) -> u64 {
        self.bits_written
    }

    /// Zero-pad any pending bits into a final byte and flush the underlying writer.
    pub fn flush(mut self) -> io::Result<W> {
        self.writer.byte_align()?;
        let mut inner = self.writer.into_writer();
        inner.flush()?;
        Ok(inner)
    }
}

pub struct BitUnpacker<R: Read> {
    reader: BitReader<R, BigEndian>,
}

impl<R: Read> BitUnpacker<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader: BitReader::endian(reader, BigEndian),
        }
    }

    /// Next bit, most significant first. `EndOfStream` once the input is exhausted.
    pub fn next_bit(&mut self) -> Result<bool, HuffError> {
        self.reader.read_bit().map_err(|e| match e.kind() {
            io::ErrorKind::UnexpectedEof => HuffError::EndOfStream,
            _ => HuffError::Io(e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_msb_first() {
        let mut packer = BitPacker::new(Vec::new());
        packer.append_code(&[true, false, true, true, false, false, false, true]).unwrap();
        packer.append_code(&[true, true]).unwrap();
        assert_eq!(packer.bits_written(), 10);
        let out = packer.flush().unwrap();
        assert_eq!(out, vec![0b1011_0001, 0b1100_0000]);
    }

    #[test]
    fn test_flush_without_pending_bits() {
        let mut packer = BitPacker::new(Vec::new());
        packer.append_code(&[false; 8]).unwrap();
        assert_eq!(packer.flush().unwrap(), vec![0]);
        assert!(BitPacker::new(Vec::new()).flush().unwrap().is_empty());
    }

    #[test]
    fn test_unpack_then_end_of_stream() {
        let data = [0b1000_0001u8];
        let mut unpacker = BitUnpacker::new(&data[..]);
        let bits: Vec<bool> = (0..8).map(|_| unpacker.next_bit().unwrap()).collect();
        assert_eq!(bits, vec![true, false, false, false, false, false, false, true]);
        assert!(matches!(unpacker.next_bit(), Err(HuffError::EndOfStream)));
    }
}
