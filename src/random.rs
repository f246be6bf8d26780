//! Randomness capability consumed by key generation and encryption

use num_bigint::RandBigInt;
use rand::{CryptoRng, RngCore};

use crate::error::Result;
use crate::types::check_slot_count;
use crate::zq_group::{ZqElement, ZqGroup};

/// Source of cryptographically secure randomness
///
/// Implemented for every [`RngCore`] + [`CryptoRng`], so `thread_rng()` and
/// `OsRng` can be passed directly. Each caller owns its source; nothing is
/// shared between threads.
pub trait RandomSource {
    /// `n` uniformly random bytes
    fn random_bytes(&mut self, n: usize) -> Vec<u8>;

    /// A uniformly random exponent in [0, q)
    fn random_exponent(&mut self, group: &ZqGroup) -> ZqElement;

    /// `n` independent uniformly random exponents
    fn random_exponents(&mut self, group: &ZqGroup, n: usize) -> Result<Vec<ZqElement>> {
        check_slot_count(n)?;
        Ok((0..n).map(|_| self.random_exponent(group)).collect())
    }
}

impl<R: RngCore + CryptoRng + ?Sized> RandomSource for R {
    fn random_bytes(&mut self, n: usize) -> Vec<u8> {
        let mut bytes = vec![0u8; n];
        self.fill_bytes(&mut bytes);
        bytes
    }

    fn random_exponent(&mut self, group: &ZqGroup) -> ZqElement {
        let value = self.gen_biguint_below(group.q());
        ZqElement::reduce(&value, group)
    }
}
