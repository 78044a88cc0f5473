//! Hash functions for the bloom index
//!
//! Two SipHash-1-3 instances keyed from the index geometry. The keys only
//! need to be reproducible across processes, not secret.

use siphasher::sip::SipHasher13;
use std::hash::Hasher;

/// Hash a value with SipHash-1-3 under the given key pair
pub fn keyed_hash(value: &[u8], key0: u64, key1: u64) -> u64 {
    let mut hasher = SipHasher13::new_with_keys(key0, key1);
    hasher.write(value);
    hasher.finish()
}

/// Compute the independent hash pair `(h0, h1)` for an index of geometry `(m, k)`
pub fn hash_pair(value: &[u8], m: usize, k: usize) -> (u64, u64) {
    let h0 = keyed_hash(value, m as u64, 0);
    let h1 = keyed_hash(value, 0, k as u64);
    (h0, h1)
}

/// Iterate the `k` probe positions `(h0 + i*h1) mod m`
///
/// The running position is reduced modulo `m` at every step so the sum never
/// overflows.
pub fn probe_positions(value: &[u8], m: usize, k: usize) -> impl Iterator<Item = usize> {
    let (h0, h1) = hash_pair(value, m, k);
    let m = m as u64;
    let step = h1 % m;
    let mut pos = h0 % m;
    (0..k).map(move |_| {
        let current = pos;
        pos = (pos + step) % m;
        current as usize
    })
}
