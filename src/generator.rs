//! Verifiable derivation of a safe-prime group from a public seed
//!
//! The derivation only depends on the seed bytes and on the two numbers
//! fixed by the [`SecurityLevel`]: the bit length of p and the primality
//! certainty. Anyone holding the seed can re-run it and must obtain the same
//! (p, q, g), which is what [`GqGroupGenerator::verify_domain`] checks.

use num_bigint::BigUint;
use num_integer::Integer;
use sha3::digest::{ExtendableOutput, Update, XofReader};
use sha3::Shake128;
use tracing::{debug, instrument, trace, warn};

use crate::error::{CryptoError, Result};
use crate::gq_group::GqGroup;
use crate::types::SecurityLevel;
use crate::utils::{
    integer_to_bytes, is_group_member, is_odd_modulus, is_probable_prime, rounds_for_certainty,
};
use crate::verification::{check, verify, VerificationResult};

/// Generator candidates, tried in order
const GENERATOR_CANDIDATES: [u32; 3] = [2, 3, 4];

/// Derives [`GqGroup`]s from seeds at a fixed security level
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GqGroupGenerator {
    security_level: SecurityLevel,
    max_iterations: Option<u64>,
}

impl GqGroupGenerator {
    /// Create a generator with an unbounded candidate search
    pub fn new(security_level: SecurityLevel) -> Self {
        GqGroupGenerator {
            security_level,
            max_iterations: None,
        }
    }

    /// Give up after `limit` rejected candidates instead of searching forever
    pub fn with_iteration_limit(mut self, limit: u64) -> Self {
        self.max_iterations = Some(limit);
        self
    }

    pub fn security_level(&self) -> SecurityLevel {
        self.security_level
    }

    /// Derive (p, q, g) from `seed`
    ///
    /// # Example
    ///
    /// ```rust
    /// use gq_elgamal::{GqGroupGenerator, SecurityLevel};
    /// use num_bigint::BigUint;
    ///
    /// let group = GqGroupGenerator::new(SecurityLevel::TestingOnly)
    ///     .derive_domain("Election_name")
    ///     .unwrap();
    ///
    /// assert_eq!(group.p(), &BigUint::from(150_741_944_098_619u64));
    /// assert_eq!(group.generator().value(), &BigUint::from(3u32));
    /// ```
    #[instrument(skip(self), fields(level = %self.security_level))]
    pub fn derive_domain(&self, seed: &str) -> Result<GqGroup> {
        if seed.is_empty() {
            return Err(CryptoError::InvalidParameter(
                "Seed must not be empty".to_string(),
            ));
        }

        let (p, q, attempts) = self.find_safe_prime(seed.as_bytes())?;
        let g = find_smallest_generator(&p)?;

        debug!(attempts, bits = p.bits(), %g, "derived domain");

        Ok(GqGroup::from_trusted(p, q, g))
    }

    /// Re-derive the domain for `seed` and check `group` against it
    pub fn verify_domain(&self, seed: &str, group: &GqGroup) -> VerificationResult {
        let rounds = rounds_for_certainty(self.security_level.certainty());
        let p = group.p();
        let q = group.q();
        let g = group.generator();

        let result = verify(*p == q * 2u32 + 1u32, "p must equal 2q + 1")
            .and_then(|| check(|| is_probable_prime(q, rounds), "q is not prime"))
            .and_then(|| check(|| is_probable_prime(p, rounds), "p is not prime"))
            .and_then(|| {
                verify(
                    p.bits() == self.security_level.p_bit_length(),
                    format!(
                        "p has {} bits, expected {}",
                        p.bits(),
                        self.security_level.p_bit_length()
                    ),
                )
            })
            .and_then(|| verify(is_group_member(g.value(), p), "g is not a group member"))
            .and_then(|| match find_smallest_generator(p) {
                Ok(smallest) => verify(
                    &smallest == g.value(),
                    format!("g = {} but the smallest generator is {smallest}", g.value()),
                ),
                Err(e) => VerificationResult::failure(e.to_string()),
            })
            .and_then(|| match self.derive_domain(seed) {
                Ok(derived) => verify(
                    derived == *group,
                    "group does not match the domain derived from the seed",
                ),
                Err(e) => VerificationResult::failure(e.to_string()),
            })
            .with_context(format!(
                "domain for seed {seed:?} at level {}",
                self.security_level
            ));

        if !result.is_verified() {
            warn!(%result, "domain verification failed");
        }
        result
    }

    /// Search counters 0, 1, 2, ... until q and 2q + 1 are both prime
    fn find_safe_prime(&self, seed: &[u8]) -> Result<(BigUint, BigUint, u64)> {
        let byte_length = self.security_level.p_bit_length().div_ceil(8) as usize;
        let rounds = rounds_for_certainty(self.security_level.certainty());
        let mut counter: u64 = 0;

        loop {
            if let Some(limit) = self.max_iterations {
                if counter >= limit {
                    return Err(CryptoError::IterationLimitExceeded(limit));
                }
            }

            let q = candidate_q(seed, counter, byte_length);
            let p = &q * 2u32 + 1u32;

            if is_probable_prime(&q, rounds) && is_probable_prime(&p, rounds) {
                return Ok((p, q, counter + 1));
            }

            trace!(counter, "rejected candidate");
            counter += 1;
        }
    }
}

/// q candidate for one counter value: (0x01 || SHAKE128(seed || counter)) >> 2, forced odd
fn candidate_q(seed: &[u8], counter: u64, byte_length: usize) -> BigUint {
    let mut hasher = Shake128::default();
    hasher.update(seed);
    hasher.update(&integer_to_bytes(&BigUint::from(counter)));

    let mut bytes = vec![0u8; byte_length + 1];
    bytes[0] = 0x01;
    hasher.finalize_xof().read(&mut bytes[1..]);

    let mut q: BigUint = BigUint::from_bytes_be(&bytes) >> 2u32;
    if q.is_even() {
        q += 1u32;
    }
    q
}

/// Smallest of 2, 3, 4 that lies in the order-q subgroup mod p
pub fn find_smallest_generator(p: &BigUint) -> Result<BigUint> {
    if !is_odd_modulus(p) {
        return Err(CryptoError::InvalidParameter(format!(
            "modulus {p} must be odd and at least 3"
        )));
    }

    GENERATOR_CANDIDATES
        .iter()
        .map(|&candidate| BigUint::from(candidate))
        .find(|candidate| is_group_member(candidate, p))
        .ok_or_else(|| CryptoError::NoGeneratorFound { p: p.clone() })
}
