//! Packed index wire format
//!
//! ```text
//! zstd( m:u64le | k:u64le | n:u64le | word[0]:u64le | ... | word[ceil(m/64)-1]:u64le )
//! ```
//!
//! Bit `i` lives in word `i / 64` at bit position `i % 64`.

use bitvec::prelude::*;
use tracing::debug;

use super::bloom_index::BloomIndex;
use crate::error::IndexError;

/// Zstd level used for packing; indexes are written once and read often
pub const PACK_LEVEL: i32 = 19;

const HEADER_BYTES: usize = 24;

impl BloomIndex {
    /// Serialize the index into its compressed form
    pub fn pack(&self) -> Result<Vec<u8>, IndexError> {
        let words = self.bits.as_raw_slice();
        let mut raw = Vec::with_capacity(HEADER_BYTES + words.len() * 8);
        raw.extend_from_slice(&(self.m as u64).to_le_bytes());
        raw.extend_from_slice(&(self.k as u64).to_le_bytes());
        raw.extend_from_slice(&self.n.to_le_bytes());
        for word in words {
            raw.extend_from_slice(&word.to_le_bytes());
        }
        zstd::encode_all(raw.as_slice(), PACK_LEVEL).map_err(IndexError::CompressFailed)
    }

    /// Deserialize an index produced by [`pack`](Self::pack)
    pub fn unpack(packed: &[u8]) -> Result<Self, IndexError> {
        let raw = zstd::decode_all(packed).map_err(IndexError::DecompressFailed)?;
        if raw.len() < HEADER_BYTES {
            return Err(IndexError::Truncated {
                expected: HEADER_BYTES,
                actual: raw.len(),
            });
        }

        let m = read_u64(&raw, 0);
        let k = read_u64(&raw, 8);
        let n = read_u64(&raw, 16);

        let m = usize::try_from(m)
            .map_err(|_| IndexError::InvalidHeader(format!("size {} does not fit in memory", m)))?;
        let k = usize::try_from(k)
            .map_err(|_| IndexError::InvalidHeader(format!("probe count {} is too large", k)))?;
        if m > 0 && k == 0 {
            return Err(IndexError::InvalidHeader(
                "sized index with zero probes".to_string(),
            ));
        }

        let word_count = m.div_ceil(64);
        let expected = word_count
            .checked_mul(8)
            .and_then(|b| b.checked_add(HEADER_BYTES))
            .ok_or_else(|| IndexError::InvalidHeader(format!("size {} overflows", m)))?;
        if raw.len() < expected {
            return Err(IndexError::Truncated {
                expected,
                actual: raw.len(),
            });
        }
        if raw.len() > expected {
            return Err(IndexError::TrailingBytes {
                extra: raw.len() - expected,
            });
        }

        let words: Vec<u64> = raw[HEADER_BYTES..]
            .chunks_exact(8)
            .map(|chunk| {
                let mut buf = [0u8; 8];
                buf.copy_from_slice(chunk);
                u64::from_le_bytes(buf)
            })
            .collect();
        let mut bits = BitVec::<u64, Lsb0>::from_vec(words);
        bits.truncate(m);

        debug!(m, k, n, packed_bytes = packed.len(), "Unpacked bloom index");
        Ok(BloomIndex::from_parts(bits, m, k, n))
    }
}

fn read_u64(raw: &[u8], offset: usize) -> u64 {
    let mut buf = [0u8; 8];
    buf.copy_from_slice(&raw[offset..offset + 8]);
    u64::from_le_bytes(buf)
}
