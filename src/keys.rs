//! Multi-recipient key generation, recovery and combination

use std::fmt;

use crate::error::{CryptoError, Result};
use crate::gq_group::{GqElement, GqGroup};
use crate::group_vector::GroupVector;
use crate::random::RandomSource;
use crate::types::check_slot_count;
use crate::verification::{verify, VerificationResult};
use crate::zq_group::{ZqElement, ZqGroup};

/// Multi-recipient public key: one group element per slot
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicKey {
    pub(crate) elements: GroupVector<GqElement>,
}

impl PublicKey {
    /// Create a public key from existing elements
    pub fn new(elements: Vec<GqElement>) -> Result<Self> {
        Ok(PublicKey {
            elements: GroupVector::new(elements)?,
        })
    }

    /// Combine independently generated key shares into a joint public key
    ///
    /// Slot `i` of the result is the product of slot `i` across all shares.
    /// Every share must have the same length and group.
    pub fn combine(shares: &[PublicKey]) -> Result<PublicKey> {
        let first = shares.first().ok_or(CryptoError::EmptyBatch)?;

        for (index, share) in shares.iter().enumerate().skip(1) {
            if share.group() != first.group() {
                return Err(CryptoError::GroupMismatch(format!(
                    "public key share {index} belongs to a different group"
                )));
            }
            first
                .elements
                .check_same_length(&share.elements, &format!("public key share {index}"))?;
        }

        let group = first.group();
        let combined = (0..first.len())
            .map(|slot| {
                shares.iter().try_fold(group.identity(), |product, share| {
                    product.multiply(&share.elements[slot])
                })
            })
            .collect::<Result<Vec<_>>>()?;

        PublicKey::new(combined)
    }

    /// Number of slots
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn group(&self) -> &GqGroup {
        self.elements.group()
    }

    pub fn elements(&self) -> &GroupVector<GqElement> {
        &self.elements
    }

    pub fn get(&self, index: usize) -> Option<&GqElement> {
        self.elements.get(index)
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PublicKey({} slots, {} bits)",
            self.len(),
            self.group().bit_size()
        )
    }
}

/// Multi-recipient private key: one exponent per slot
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrivateKey {
    pub(crate) exponents: GroupVector<ZqElement>,
}

impl PrivateKey {
    /// Create a private key from existing exponents
    pub fn new(exponents: Vec<ZqElement>) -> Result<Self> {
        Ok(PrivateKey {
            exponents: GroupVector::new(exponents)?,
        })
    }

    pub fn len(&self) -> usize {
        self.exponents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exponents.is_empty()
    }

    pub fn group(&self) -> &ZqGroup {
        self.exponents.group()
    }

    /// Get the secret exponents
    pub fn exponents(&self) -> &GroupVector<ZqElement> {
        &self.exponents
    }
}

impl fmt::Display for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PrivateKey({} slots, ***)", self.len())
    }
}

/// Multi-recipient ElGamal key pair
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyPair {
    pub public_key: PublicKey,
    pub private_key: PrivateKey,
}

impl KeyPair {
    /// Generate a key pair with `slots` independent exponents
    ///
    /// # Example
    ///
    /// ```rust
    /// use gq_elgamal::{GqGroupGenerator, KeyPair, SecurityLevel};
    ///
    /// let group = GqGroupGenerator::new(SecurityLevel::TestingOnly)
    ///     .derive_domain("Election_name")
    ///     .unwrap();
    /// let keypair = KeyPair::generate(&group, 3, &mut rand::thread_rng()).unwrap();
    ///
    /// assert_eq!(keypair.public_key.len(), 3);
    /// assert!(keypair.verify().is_verified());
    /// ```
    pub fn generate<R: RandomSource + ?Sized>(
        group: &GqGroup,
        slots: usize,
        random: &mut R,
    ) -> Result<Self> {
        check_slot_count(slots)?;

        let exponents = random.random_exponents(&ZqGroup::same_order_as(group), slots)?;
        let private_key = PrivateKey::new(exponents)?;

        Self::from_private_key(&private_key, &group.generator())
    }

    /// Rebuild the key pair belonging to an existing private key
    pub fn from_private_key(private_key: &PrivateKey, generator: &GqElement) -> Result<Self> {
        if !generator.group().has_same_order_as(private_key.group()) {
            return Err(CryptoError::GroupMismatch(
                "generator order does not match the private key order".to_string(),
            ));
        }

        let elements = private_key
            .exponents
            .iter()
            .map(|exponent| generator.exponentiate(exponent))
            .collect::<Result<Vec<_>>>()?;

        Ok(KeyPair {
            public_key: PublicKey::new(elements)?,
            private_key: private_key.clone(),
        })
    }

    /// Check that every public slot equals g raised to the matching private slot
    pub fn verify(&self) -> VerificationResult {
        let public = &self.public_key.elements;
        let private = &self.private_key.exponents;
        let generator = self.public_key.group().generator();

        verify(
            public.len() == private.len(),
            format!(
                "public key has {} slots but private key has {}",
                public.len(),
                private.len()
            ),
        )
        .and_then(|| {
            verify(
                self.public_key.group().has_same_order_as(private.group()),
                "private key order does not match the group order",
            )
        })
        .and_then(|| {
            public
                .iter()
                .zip(private.iter())
                .enumerate()
                .find(|(_, (pk, sk))| match generator.exponentiate(sk) {
                    Ok(expected) => expected != **pk,
                    Err(_) => true,
                })
                .map_or_else(VerificationResult::success, |(slot, _)| {
                    VerificationResult::failure(format!("slot {slot} does not match g^sk"))
                })
        })
        .with_context("key pair")
    }

    /// Number of slots
    pub fn len(&self) -> usize {
        self.public_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.public_key.is_empty()
    }

    pub fn group(&self) -> &GqGroup {
        self.public_key.group()
    }
}

impl fmt::Display for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KeyPair({} slots)", self.len())
    }
}
