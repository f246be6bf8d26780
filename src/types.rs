//! Core types and data structures

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{CryptoError, Result};
use crate::gq_group::{GqElement, GqGroup};
use crate::group_vector::GroupVector;

/// Security level for domain generation
///
/// Each level fixes the bit length of the safe prime p and the primality
/// certainty used while searching for it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "SCREAMING_SNAKE_CASE")
)]
pub enum SecurityLevel {
    /// 48-bit p. Only for tests and known-answer vectors
    TestingOnly,
    /// 2048-bit p, 112 bits of security
    Legacy,
    /// 3072-bit p, 128 bits of security
    #[default]
    Extended,
}

impl SecurityLevel {
    /// Environment variable read by [`SecurityLevel::from_env`]
    pub const ENV_VAR: &'static str = "SECURITY_LEVEL";

    /// Bit length of the safe prime p
    pub fn p_bit_length(&self) -> u64 {
        match self {
            SecurityLevel::TestingOnly => 48,
            SecurityLevel::Legacy => 2048,
            SecurityLevel::Extended => 3072,
        }
    }

    /// Primality certainty: a composite is accepted with probability at most 2^-certainty
    pub fn certainty(&self) -> u32 {
        match self {
            SecurityLevel::TestingOnly => 64,
            SecurityLevel::Legacy => 112,
            SecurityLevel::Extended => 128,
        }
    }

    /// Resolve the level from `SECURITY_LEVEL`, falling back to the default when unset.
    ///
    /// Call this once at start-up and pass the value on explicitly.
    pub fn from_env() -> Result<Self> {
        match std::env::var(Self::ENV_VAR) {
            Ok(value) => value.parse(),
            Err(std::env::VarError::NotPresent) => Ok(Self::default()),
            Err(e) => Err(CryptoError::InvalidSecurityLevel(e.to_string())),
        }
    }
}

impl FromStr for SecurityLevel {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().replace('-', "_").as_str() {
            "TESTING_ONLY" => Ok(SecurityLevel::TestingOnly),
            "LEGACY" => Ok(SecurityLevel::Legacy),
            "EXTENDED" => Ok(SecurityLevel::Extended),
            _ => Err(CryptoError::InvalidSecurityLevel(s.to_string())),
        }
    }
}

impl fmt::Display for SecurityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SecurityLevel::TestingOnly => write!(f, "TESTING_ONLY"),
            SecurityLevel::Legacy => write!(f, "LEGACY"),
            SecurityLevel::Extended => write!(f, "EXTENDED"),
        }
    }
}

/// A plaintext vector of group elements, one per recipient slot
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    elements: GroupVector<GqElement>,
}

impl Message {
    pub fn new(elements: Vec<GqElement>) -> Result<Self> {
        Ok(Message {
            elements: GroupVector::new(elements)?,
        })
    }

    /// The message with the identity in every slot
    pub fn ones(group: &GqGroup, slots: usize) -> Result<Self> {
        check_slot_count(slots)?;
        Message::new(vec![group.identity(); slots])
    }

    /// Slot-wise product of two messages
    pub fn multiply(&self, other: &Message) -> Result<Message> {
        self.elements
            .check_same_length(&other.elements, "message slots")?;

        let elements = self
            .elements
            .iter()
            .zip(other.elements.iter())
            .map(|(a, b)| a.multiply(b))
            .collect::<Result<Vec<_>>>()?;

        Message::new(elements)
    }

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

impl From<GroupVector<GqElement>> for Message {
    fn from(elements: GroupVector<GqElement>) -> Self {
        Message { elements }
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Message{}", self.elements)
    }
}

/// Multi-recipient ElGamal ciphertext (γ, φ_1..φ_N)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ciphertext {
    pub(crate) gamma: GqElement,
    pub(crate) phis: GroupVector<GqElement>,
}

impl Ciphertext {
    /// Create a ciphertext from its components, which must share one group
    pub fn new(gamma: GqElement, phis: Vec<GqElement>) -> Result<Self> {
        let phis = GroupVector::new(phis)?;
        if gamma.group() != phis.group() {
            return Err(CryptoError::GroupMismatch(
                "gamma and phis belong to different groups".to_string(),
            ));
        }
        Ok(Ciphertext { gamma, phis })
    }

    /// The ciphertext with the identity in γ and in every φ slot
    pub fn neutral_element(slots: usize, group: &GqGroup) -> Result<Self> {
        check_slot_count(slots)?;
        Ok(Ciphertext {
            gamma: group.identity(),
            phis: GroupVector::new(vec![group.identity(); slots])?,
        })
    }

    /// Get the shared randomization element γ = g^r
    pub fn gamma(&self) -> &GqElement {
        &self.gamma
    }

    /// Get the masked elements φ_i
    pub fn phis(&self) -> &GroupVector<GqElement> {
        &self.phis
    }

    pub fn phi(&self, index: usize) -> Option<&GqElement> {
        self.phis.get(index)
    }

    /// Number of recipient slots
    pub fn len(&self) -> usize {
        self.phis.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phis.is_empty()
    }

    pub fn group(&self) -> &GqGroup {
        self.gamma.group()
    }
}

impl fmt::Display for Ciphertext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Ciphertext({} slots, {} bits)",
            self.len(),
            self.group().bit_size()
        )
    }
}

pub(crate) fn check_slot_count(slots: usize) -> Result<()> {
    if slots == 0 {
        return Err(CryptoError::InvalidSlotCount(slots));
    }
    Ok(())
}
