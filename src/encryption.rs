//! Multi-recipient ElGamal encryption and decryption

use crate::error::{CryptoError, Result};
use crate::homomorphic::HomomorphicOperations;
use crate::keys::{PrivateKey, PublicKey};
use crate::random::RandomSource;
use crate::types::{Ciphertext, Message};
use crate::zq_group::{ZqElement, ZqGroup};

impl Ciphertext {
    /// Encrypt `message` under `public_key` with the exponent `r`
    ///
    /// Computes γ = g^r and φ_i = m_i · pk_i^r. The caller must supply a fresh
    /// uniformly random exponent for every call; reusing one across messages
    /// leaks their quotient and is not detected here.
    pub fn encrypt(message: &Message, exponent: &ZqElement, public_key: &PublicKey) -> Result<Self> {
        message
            .elements()
            .check_same_length(public_key.elements(), "message and public key")?;

        if message.group() != public_key.group() {
            return Err(CryptoError::GroupMismatch(
                "message and public key belong to different groups".to_string(),
            ));
        }

        let group = public_key.group();
        if !group.has_same_order_as(exponent.group()) {
            return Err(CryptoError::GroupMismatch(
                "exponent order does not match the group order".to_string(),
            ));
        }

        let gamma = group.generator().exponentiate(exponent)?;
        let phis = message
            .elements()
            .iter()
            .zip(public_key.elements().iter())
            .map(|(m, pk)| m.multiply(&pk.exponentiate(exponent)?))
            .collect::<Result<Vec<_>>>()?;

        Ciphertext::new(gamma, phis)
    }

    /// Decrypt with a private key of the same length: m_i = φ_i · γ^(-sk_i)
    ///
    /// There is no integrity check at this layer; a wrong key yields a wrong
    /// message rather than an error.
    pub fn decrypt(&self, private_key: &PrivateKey) -> Result<Message> {
        self.phis
            .check_same_length(private_key.exponents(), "ciphertext and private key")?;

        if !self.group().has_same_order_as(private_key.group()) {
            return Err(CryptoError::GroupMismatch(
                "private key order does not match the ciphertext group".to_string(),
            ));
        }

        let elements = self
            .phis
            .iter()
            .zip(private_key.exponents().iter())
            .map(|(phi, sk)| phi.multiply(&self.gamma.exponentiate(&sk.negate())?))
            .collect::<Result<Vec<_>>>()?;

        Message::new(elements)
    }
}

/// Encryption service bound to one (usually joint) public key
#[derive(Clone, Debug)]
pub struct ElGamal {
    pub public_key: PublicKey,
    exponent_group: ZqGroup,
}

impl ElGamal {
    pub fn new(public_key: PublicKey) -> Self {
        let exponent_group = ZqGroup::same_order_as(public_key.group());
        ElGamal {
            public_key,
            exponent_group,
        }
    }

    /// Encrypt with a freshly drawn exponent
    pub fn encrypt<R: RandomSource + ?Sized>(
        &self,
        message: &Message,
        random: &mut R,
    ) -> Result<Ciphertext> {
        let exponent = random.random_exponent(&self.exponent_group);
        self.encrypt_with_exponent(message, &exponent)
    }

    /// Encrypt with a caller-chosen exponent; the same exponent always yields the same ciphertext
    pub fn encrypt_with_exponent(&self, message: &Message, exponent: &ZqElement) -> Result<Ciphertext> {
        Ciphertext::encrypt(message, exponent, &self.public_key)
    }

    /// Decrypt a ciphertext using the private key
    pub fn decrypt(&self, ciphertext: &Ciphertext, private_key: &PrivateKey) -> Result<Message> {
        ciphertext.decrypt(private_key)
    }

    /// Re-randomize a ciphertext (produces a different encryption of the same plaintext)
    pub fn rerandomize<R: RandomSource + ?Sized>(
        &self,
        ciphertext: &Ciphertext,
        random: &mut R,
    ) -> Result<Ciphertext> {
        let ones = Message::ones(self.public_key.group(), ciphertext.len())?;
        let mask = self.encrypt(&ones, random)?;
        ciphertext.homomorphic_operation(&mask)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gq_group::test_groups::{election_group, other_small_group, small_group};
    use crate::gq_group::{GqElement, GqGroup};
    use crate::keys::KeyPair;
    use num_bigint::BigUint;
    use rand::thread_rng;
    use rstest::rstest;

    fn random_message(group: &GqGroup, slots: usize) -> Message {
        let mut rng = thread_rng();
        let zq = ZqGroup::same_order_as(group);
        let elements = (0..slots)
            .map(|_| {
                group
                    .generator()
                    .exponentiate(&rng.random_exponent(&zq))
                    .unwrap()
            })
            .collect();
        Message::new(elements).unwrap()
    }

    #[rstest]
    #[case(1)]
    #[case(3)]
    #[case(8)]
    fn test_encryption_decryption(#[case] slots: usize) {
        let group = election_group();
        let mut rng = thread_rng();
        let keypair = KeyPair::generate(&group, slots, &mut rng).unwrap();
        let message = random_message(&group, slots);
        let exponent = rng.random_exponent(&ZqGroup::same_order_as(&group));

        let ciphertext = Ciphertext::encrypt(&message, &exponent, &keypair.public_key).unwrap();
        assert_eq!(ciphertext.len(), slots);
        assert_eq!(
            ciphertext.gamma(),
            &group.generator().exponentiate(&exponent).unwrap()
        );

        let decrypted = ciphertext.decrypt(&keypair.private_key).unwrap();
        assert_eq!(decrypted, message);
    }

    #[test]
    fn test_known_small_ciphertext() {
        // p = 23, g = 2, sk = 3 -> pk = 8; m = 4, r = 5
        let group = small_group();
        let zq = ZqGroup::same_order_as(&group);
        let sk = ZqElement::new(BigUint::from(3u32), &zq).unwrap();
        let keypair =
            KeyPair::from_private_key(&PrivateKey::new(vec![sk]).unwrap(), &group.generator())
                .unwrap();
        let message = Message::new(vec![GqElement::new(4u32.into(), &group).unwrap()]).unwrap();
        let r = ZqElement::new(BigUint::from(5u32), &zq).unwrap();

        let ciphertext = Ciphertext::encrypt(&message, &r, &keypair.public_key).unwrap();

        // γ = 2^5 mod 23 = 9, φ = 4 · 8^5 mod 23 = 4 · 16 = 18
        assert_eq!(ciphertext.gamma().value(), &BigUint::from(9u32));
        assert_eq!(ciphertext.phi(0).unwrap().value(), &BigUint::from(18u32));
        assert_eq!(ciphertext.decrypt(&keypair.private_key).unwrap(), message);
    }

    #[test]
    fn test_ones_with_zero_exponent_is_neutral() {
        let group = election_group();
        let keypair = KeyPair::generate(&group, 4, &mut thread_rng()).unwrap();
        let ones = Message::ones(&group, 4).unwrap();
        let zero = ZqGroup::same_order_as(&group).zero();

        let ciphertext = Ciphertext::encrypt(&ones, &zero, &keypair.public_key).unwrap();
        assert_eq!(ciphertext, Ciphertext::neutral_element(4, &group).unwrap());
    }

    #[test]
    fn test_neutral_decrypts_to_ones() {
        let group = election_group();
        let keypair = KeyPair::generate(&group, 3, &mut thread_rng()).unwrap();

        let neutral = Ciphertext::neutral_element(3, &group).unwrap();
        assert_eq!(
            neutral.decrypt(&keypair.private_key).unwrap(),
            Message::ones(&group, 3).unwrap()
        );
    }

    #[test]
    fn test_encrypt_rejects_mismatches() {
        let group = small_group();
        let mut rng = thread_rng();
        let keypair = KeyPair::generate(&group, 2, &mut rng).unwrap();
        let exponent = rng.random_exponent(&ZqGroup::same_order_as(&group));

        let short = Message::ones(&group, 1).unwrap();
        assert!(matches!(
            Ciphertext::encrypt(&short, &exponent, &keypair.public_key),
            Err(CryptoError::LengthMismatch(_))
        ));

        let foreign = Message::ones(&other_small_group(), 2).unwrap();
        assert!(matches!(
            Ciphertext::encrypt(&foreign, &exponent, &keypair.public_key),
            Err(CryptoError::GroupMismatch(_))
        ));

        let foreign_exponent = rng.random_exponent(&ZqGroup::same_order_as(&other_small_group()));
        let ones = Message::ones(&group, 2).unwrap();
        assert!(matches!(
            Ciphertext::encrypt(&ones, &foreign_exponent, &keypair.public_key),
            Err(CryptoError::GroupMismatch(_))
        ));
    }

    #[test]
    fn test_decrypt_rejects_mismatches() {
        let group = small_group();
        let mut rng = thread_rng();
        let two_slots = KeyPair::generate(&group, 2, &mut rng).unwrap();
        let three_slots = KeyPair::generate(&group, 3, &mut rng).unwrap();
        let foreign = KeyPair::generate(&other_small_group(), 2, &mut rng).unwrap();

        let ciphertext = ElGamal::new(two_slots.public_key.clone())
            .encrypt(&Message::ones(&group, 2).unwrap(), &mut rng)
            .unwrap();

        assert!(matches!(
            ciphertext.decrypt(&three_slots.private_key),
            Err(CryptoError::LengthMismatch(_))
        ));
        assert!(matches!(
            ciphertext.decrypt(&foreign.private_key),
            Err(CryptoError::GroupMismatch(_))
        ));
    }

    #[test]
    fn test_rerandomization() {
        let group = election_group();
        let mut rng = thread_rng();
        let keypair = KeyPair::generate(&group, 2, &mut rng).unwrap();
        let elgamal = ElGamal::new(keypair.public_key.clone());
        let message = random_message(&group, 2);

        let ct1 = elgamal.encrypt(&message, &mut rng).unwrap();
        let ct2 = elgamal.rerandomize(&ct1, &mut rng).unwrap();

        // Ciphertexts should be different
        assert_ne!(ct1, ct2);

        // But decrypt to the same plaintext
        assert_eq!(elgamal.decrypt(&ct1, &keypair.private_key).unwrap(), message);
        assert_eq!(elgamal.decrypt(&ct2, &keypair.private_key).unwrap(), message);
    }
}
