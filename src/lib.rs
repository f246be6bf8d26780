//! # Verifiable Group Generation and Multi-Recipient ElGamal
//!
//! This library provides the cryptographic core of a verifiable-voting
//! protocol:
//! - Deterministic derivation of a safe-prime group (p, q, g) from a public seed
//! - Re-derivation checks so auditors can confirm the published parameters
//! - Multi-recipient ElGamal keys, one exponent per slot
//! - Joint public keys combined from independently generated shares
//! - Encryption, decryption and homomorphic combination of ciphertexts
//!
//! ## Example
//!
//! ```rust
//! use gq_elgamal::{
//!     Ciphertext, GqGroupGenerator, KeyPair, Message, PublicKey, RandomSource, SecurityLevel,
//!     ZqGroup,
//! };
//!
//! let mut rng = rand::thread_rng();
//!
//! // Derive the election domain
//! let group = GqGroupGenerator::new(SecurityLevel::TestingOnly)
//!     .derive_domain("Election_name")
//!     .unwrap();
//!
//! // Two trustees generate shares and publish their public keys
//! let alice = KeyPair::generate(&group, 2, &mut rng).unwrap();
//! let bob = KeyPair::generate(&group, 2, &mut rng).unwrap();
//! let joint = PublicKey::combine(&[alice.public_key.clone(), bob.public_key.clone()]).unwrap();
//!
//! // Encrypt under the joint key
//! let message = Message::new(vec![group.generator(), group.identity()]).unwrap();
//! let r = rng.random_exponent(&ZqGroup::same_order_as(&group));
//! let ciphertext = Ciphertext::encrypt(&message, &r, &joint).unwrap();
//!
//! // Each trustee strips its share; the remainder is the plaintext
//! let partial = ciphertext.decrypt(&alice.private_key).unwrap();
//! let remaining = partial.elements().as_slice().to_vec();
//! let ciphertext = Ciphertext::new(ciphertext.gamma().clone(), remaining).unwrap();
//! assert_eq!(ciphertext.decrypt(&bob.private_key).unwrap(), message);
//! ```

pub mod encryption;
pub mod error;
pub mod generator;
pub mod gq_group;
pub mod group_vector;
pub mod homomorphic;
pub mod keys;
pub mod random;
pub mod types;
pub mod utils;
pub mod verification;
pub mod zq_group;

// Re-export main types for convenience
pub use encryption::ElGamal;
pub use error::{CryptoError, Result};
pub use generator::GqGroupGenerator;
pub use gq_group::{GqElement, GqGroup, GqGroupParameters};
pub use group_vector::{GroupVector, GroupVectorElement};
pub use homomorphic::HomomorphicOperations;
pub use keys::{KeyPair, PrivateKey, PublicKey};
pub use random::RandomSource;
pub use types::{Ciphertext, Message, SecurityLevel};
pub use verification::VerificationResult;
pub use zq_group::{ZqElement, ZqGroup};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;
    use rand::thread_rng;

    #[test]
    fn test_library_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_basic_workflow() {
        let group = GqGroupGenerator::new(SecurityLevel::TestingOnly)
            .derive_domain("Election_name")
            .unwrap();
        let keypair = KeyPair::generate(&group, 2, &mut thread_rng()).unwrap();
        let elgamal = ElGamal::new(keypair.public_key.clone());

        let m = Message::new(vec![group.generator(), group.generator()]).unwrap();
        let ct = elgamal.encrypt(&m, &mut thread_rng()).unwrap();
        let decrypted = elgamal.decrypt(&ct, &keypair.private_key).unwrap();

        assert_eq!(m, decrypted);
    }
}
