//! Symbol statistics gathered in one pass over the input.
//!
//! The table is indexed by symbol value, so iteration is always in canonical
//! order (bytes ascending, end marker last) on both the encode and decode side.

use std::fmt;
use std::io::{self, Read};

use crate::error::FormatError;

/// Alphabet size: every byte value plus the end marker.
pub const ALPHABET_SIZE: usize = 257;

/// One alphabet entry. Derived ordering puts bytes first, ascending, then the end marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Symbol {
    Byte(u8),
    Sentinel,
}

impl Symbol {
    pub fn index(self) -> usize {
        match self {
            Symbol::Byte(b) => b as usize,
            Symbol::Sentinel => 256,
        }
    }

    pub(crate) fn from_index(index: usize) -> Self {
        match u8::try_from(index) {
            Ok(b) => Symbol::Byte(b),
            Err(_) => Symbol::Sentinel,
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Byte(b) => write!(f, "{b:#04x}"),
            Symbol::Sentinel => f.write_str("EOD"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u64; ALPHABET_SIZE],
}

impl FrequencyTable {
    /// Count every byte of `reader`. The end marker is added with count 1.
    ///
    /// Returns the table and the number of bytes consumed.
    pub fn scan<R: Read>(mut reader: R) -> io::Result<(Self, u64)> {
        let mut counts = [0u64; ALPHABET_SIZE];
        let mut buf = [0u8; 8192];
        let mut total = 0u64;
        loop {
            let n = match reader.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            tally(&mut counts, &buf[..n]);
            total += n as u64;
        }
        counts[Symbol::Sentinel.index()] = 1;
        Ok((Self { counts }, total))
    }

    pub fn from_bytes(data: &[u8]) -> Self {
        let mut counts = [0u64; ALPHABET_SIZE];
        tally(&mut counts, data);
        counts[Symbol::Sentinel.index()] = 1;
        Self { counts }
    }

    /// Rebuild a table from stored entries, which must already be in canonical order
    /// and end with the end marker.
    pub fn from_entries<I>(entries: I) -> Result<Self, FormatError>
    where
        I: IntoIterator<Item = (Symbol, u64)>,
    {
        let mut counts = [0u64; ALPHABET_SIZE];
        let mut previous: Option<Symbol> = None;
        let mut seen_sentinel = false;
        for (index, (symbol, count)) in entries.into_iter().enumerate() {
            if seen_sentinel {
                return Err(FormatError::TrailingEntry { index });
            }
            if count == 0 {
                return Err(FormatError::InvalidCount { index, count: 0 });
            }
            if let (Some(Symbol::Byte(prev)), Symbol::Byte(next)) = (previous, symbol) {
                if next <= prev {
                    return Err(FormatError::NonCanonicalOrder {
                        previous: prev,
                        next,
                    });
                }
            }
            seen_sentinel = symbol == Symbol::Sentinel;
            counts[symbol.index()] = count;
            previous = Some(symbol);
        }
        match previous {
            None => Err(FormatError::EmptyTable),
            Some(Symbol::Byte(tag)) => Err(FormatError::MissingSentinel { tag }),
            Some(Symbol::Sentinel) => Ok(Self { counts }),
        }
    }

    pub fn count(&self, symbol: Symbol) -> u64 {
        self.counts[symbol.index()]
    }

    /// Entries with a non-zero count, in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Symbol, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|(_, c)| **c > 0)
            .map(|(i, &c)| (Symbol::from_index(i), c))
    }

    /// Number of distinct symbols, end marker included.
    pub fn len(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bytes of payload this table describes (end marker excluded).
    pub fn payload_len(&self) -> u64 {
        self.counts[..256].iter().sum()
    }
}

fn tally(counts: &mut [u64; ALPHABET_SIZE], bytes: &[u8]) {
    for &b in bytes {
        counts[b as usize] += 1;
    }
}
