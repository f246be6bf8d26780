//! Homomorphic operations on multi-recipient ciphertexts

use crate::error::{CryptoError, Result};
use crate::gq_group::GqElement;
use crate::types::Ciphertext;
use crate::zq_group::ZqElement;

/// Trait for homomorphic operations
pub trait HomomorphicOperations: Sized {
    /// Slot-wise product; decrypts to the slot-wise product of the plaintexts
    fn homomorphic_operation(&self, other: &Self) -> Result<Self>;

    /// Raise every component to `exponent`; decrypts to every plaintext slot raised to it
    fn homomorphic_scalar_operation(&self, exponent: &ZqElement) -> Result<Self>;

    /// Product of a non-empty batch, folded from the neutral element
    fn homomorphic_batch_operation(items: &[Self]) -> Result<Self>;
}

impl HomomorphicOperations for Ciphertext {
    fn homomorphic_operation(&self, other: &Ciphertext) -> Result<Ciphertext> {
        if self.group() != other.group() {
            return Err(CryptoError::GroupMismatch(
                "ciphertexts belong to different groups".to_string(),
            ));
        }
        self.phis.check_same_length(&other.phis, "ciphertext slots")?;

        let gamma = self.gamma.multiply(&other.gamma)?;
        let phis = self
            .phis
            .iter()
            .zip(other.phis.iter())
            .map(|(a, b)| a.multiply(b))
            .collect::<Result<Vec<_>>>()?;

        Ciphertext::new(gamma, phis)
    }

    fn homomorphic_scalar_operation(&self, exponent: &ZqElement) -> Result<Ciphertext> {
        let gamma = self.gamma.exponentiate(exponent)?;
        let phis = self
            .phis
            .iter()
            .map(|phi| phi.exponentiate(exponent))
            .collect::<Result<Vec<GqElement>>>()?;

        Ciphertext::new(gamma, phis)
    }

    fn homomorphic_batch_operation(ciphertexts: &[Ciphertext]) -> Result<Ciphertext> {
        let first = ciphertexts.first().ok_or(CryptoError::EmptyBatch)?;
        let neutral = Ciphertext::neutral_element(first.len(), first.group())?;

        ciphertexts
            .iter()
            .try_fold(neutral, |product, ct| product.homomorphic_operation(ct))
    }
}
