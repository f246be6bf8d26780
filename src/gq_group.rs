//! The prime-order subgroup Gq of the integers modulo a safe prime p = 2q + 1
//!
//! Elements of Gq are the quadratic residues modulo p. Every [`GqElement`]
//! carries its group, and every binary operation checks that both operands
//! come from the same group before computing anything.

use num_bigint::BigUint;
use num_traits::{One, Zero};
use std::fmt;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{CryptoError, Result};
use crate::group_vector::GroupVectorElement;
use crate::utils::{is_group_member, is_probable_prime, mod_exp};
use crate::zq_group::{ZqElement, ZqGroup};

/// Miller-Rabin rounds used when validating externally supplied parameters
const VALIDATION_ROUNDS: usize = 64;

/// Plain (p, q, g) triple, the serialized form of a [`GqGroup`]
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GqGroupParameters {
    pub p: BigUint,
    pub q: BigUint,
    pub g: BigUint,
}

/// A group of quadratic residues modulo a safe prime
///
/// Cloning is cheap: the parameters are shared behind an [`Arc`].
#[derive(Clone)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "GqGroupParameters", into = "GqGroupParameters")
)]
pub struct GqGroup {
    params: Arc<GqGroupParameters>,
}

impl GqGroup {
    /// Create a group from (p, q, g), validating that p = 2q + 1 is a safe
    /// prime and that g is a non-trivial member.
    pub fn new(p: BigUint, q: BigUint, g: BigUint) -> Result<Self> {
        if p != &q * 2u32 + 1u32 {
            return Err(CryptoError::InvalidParameter(
                "p must equal 2q + 1".to_string(),
            ));
        }

        if !is_probable_prime(&q, VALIDATION_ROUNDS) || !is_probable_prime(&p, VALIDATION_ROUNDS) {
            return Err(CryptoError::InvalidParameter(
                "p and q must both be prime".to_string(),
            ));
        }

        if g.is_one() || !is_group_member(&g, &p) {
            return Err(CryptoError::InvalidParameter(
                "Generator g must be a non-identity member of the group".to_string(),
            ));
        }

        Ok(Self::from_trusted(p, q, g))
    }

    /// Build a group whose parameters were already checked by the caller
    pub(crate) fn from_trusted(p: BigUint, q: BigUint, g: BigUint) -> Self {
        GqGroup {
            params: Arc::new(GqGroupParameters { p, q, g }),
        }
    }

    /// Get the safe prime modulus
    pub fn p(&self) -> &BigUint {
        &self.params.p
    }

    /// Get the group order
    pub fn q(&self) -> &BigUint {
        &self.params.q
    }

    /// Get the generator
    pub fn generator(&self) -> GqElement {
        GqElement {
            value: self.params.g.clone(),
            group: self.clone(),
        }
    }

    pub fn identity(&self) -> GqElement {
        GqElement {
            value: BigUint::one(),
            group: self.clone(),
        }
    }

    /// Quadratic residue test modulo p
    pub fn is_member(&self, value: &BigUint) -> bool {
        is_group_member(value, self.p())
    }

    pub fn has_same_order_as(&self, other: &ZqGroup) -> bool {
        self.q() == other.q()
    }

    pub fn parameters(&self) -> &GqGroupParameters {
        &self.params
    }

    /// Get the bit size of the modulus
    pub fn bit_size(&self) -> u64 {
        self.p().bits()
    }
}

impl PartialEq for GqGroup {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.params, &other.params) || self.params == other.params
    }
}

impl Eq for GqGroup {}

impl fmt::Debug for GqGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GqGroup")
            .field("p", self.p())
            .field("q", self.q())
            .field("g", &self.params.g)
            .finish()
    }
}

impl fmt::Display for GqGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GqGroup({} bits)", self.bit_size())
    }
}

impl TryFrom<GqGroupParameters> for GqGroup {
    type Error = CryptoError;

    fn try_from(params: GqGroupParameters) -> Result<Self> {
        GqGroup::new(params.p, params.q, params.g)
    }
}

impl From<GqGroup> for GqGroupParameters {
    fn from(group: GqGroup) -> Self {
        group.params.as_ref().clone()
    }
}

/// A member of a [`GqGroup`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GqElement {
    value: BigUint,
    group: GqGroup,
}

impl GqElement {
    /// Create an element, rejecting values that are not quadratic residues modulo p
    pub fn new(value: BigUint, group: &GqGroup) -> Result<Self> {
        if !group.is_member(&value) {
            return Err(CryptoError::NotAGroupMember);
        }
        Ok(GqElement {
            value,
            group: group.clone(),
        })
    }

    /// Square an arbitrary integer in [1, p) into the group
    pub fn from_square_root(root: &BigUint, group: &GqGroup) -> Result<Self> {
        if root.is_zero() || root >= group.p() {
            return Err(CryptoError::InvalidParameter(
                "Square root must be in range [1, p)".to_string(),
            ));
        }
        Ok(GqElement {
            value: mod_exp(root, &BigUint::from(2u32), group.p()),
            group: group.clone(),
        })
    }

    pub fn value(&self) -> &BigUint {
        &self.value
    }

    pub fn group(&self) -> &GqGroup {
        &self.group
    }

    pub fn is_identity(&self) -> bool {
        self.value.is_one()
    }

    pub fn multiply(&self, other: &GqElement) -> Result<GqElement> {
        if self.group != other.group {
            return Err(CryptoError::GroupMismatch(
                "elements belong to different Gq groups".to_string(),
            ));
        }
        Ok(self.with_value((&self.value * &other.value) % self.group.p()))
    }

    /// Raise to an exponent from the Zq group of the same order
    pub fn exponentiate(&self, exponent: &ZqElement) -> Result<GqElement> {
        if !self.group.has_same_order_as(exponent.group()) {
            return Err(CryptoError::GroupMismatch(
                "exponent order does not match the group order".to_string(),
            ));
        }
        Ok(self.with_value(mod_exp(&self.value, exponent.value(), self.group.p())))
    }

    /// Multiplicative inverse, x^(q-1) since x^q = 1
    pub fn invert(&self) -> GqElement {
        let q_minus_1 = self.group.q() - BigUint::one();
        self.with_value(mod_exp(&self.value, &q_minus_1, self.group.p()))
    }

    pub fn divide(&self, other: &GqElement) -> Result<GqElement> {
        self.multiply(&other.invert())
    }

    fn with_value(&self, value: BigUint) -> GqElement {
        GqElement {
            value,
            group: self.group.clone(),
        }
    }
}

impl GroupVectorElement for GqElement {
    type Group = GqGroup;

    fn group(&self) -> &GqGroup {
        &self.group
    }
}

impl fmt::Display for GqElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}


#[cfg(test)]
mod tests {
    use super::test_groups::*;
    use super::*;

    fn exponent(value: u32, group: &GqGroup) -> ZqElement {
        ZqElement::new(value.into(), &ZqGroup::same_order_as(group)).unwrap()
    }

    #[test]
    fn test_group_validation() {
        assert!(GqGroup::new(23u32.into(), 11u32.into(), 2u32.into()).is_ok());
        // not 2q + 1
        assert!(GqGroup::new(23u32.into(), 7u32.into(), 2u32.into()).is_err());
        // 2q + 1 but q is composite
        assert!(GqGroup::new(31u32.into(), 15u32.into(), 2u32.into()).is_err());
        // generator is the identity
        assert!(GqGroup::new(23u32.into(), 11u32.into(), 1u32.into()).is_err());
        // 5 is a non-residue mod 23
        assert!(GqGroup::new(23u32.into(), 11u32.into(), 5u32.into()).is_err());
    }

    #[test]
    fn test_group_equality_is_by_value() {
        let a = small_group();
        let b = small_group();
        assert_eq!(a, b);
        assert_ne!(a, other_small_group());
        assert_ne!(a, GqGroup::new(23u32.into(), 11u32.into(), 3u32.into()).unwrap());
    }

    #[test]
    fn test_membership() {
        let group = small_group();
        assert!(GqElement::new(4u32.into(), &group).is_ok());
        assert_eq!(
            GqElement::new(5u32.into(), &group).unwrap_err(),
            CryptoError::NotAGroupMember
        );
        assert!(GqElement::new(23u32.into(), &group).is_err());
        assert!(GqElement::new(0u32.into(), &group).is_err());
    }

    #[test]
    fn test_identity_and_generator() {
        let group = election_group();
        let g = group.generator();
        let one = group.identity();

        assert!(one.is_identity());
        assert_eq!(g.multiply(&one).unwrap(), g);
        assert_eq!(g.value(), &BigUint::from(3u32));
        assert_eq!(
            g.exponentiate(&ZqElement::reduce(group.q(), &ZqGroup::same_order_as(&group)))
                .unwrap(),
            one
        );
    }

    #[test]
    fn test_exponentiation_is_closed() {
        let group = small_group();
        let g = group.generator();

        for e in 0u32..11 {
            let element = g.exponentiate(&exponent(e, &group)).unwrap();
            assert!(group.is_member(element.value()));
        }
        assert_eq!(
            g.exponentiate(&exponent(3, &group)).unwrap().value(),
            &BigUint::from(8u32)
        );
    }

    #[test]
    fn test_invert_and_divide() {
        let group = small_group();
        let x = GqElement::new(13u32.into(), &group).unwrap();

        assert!(x.multiply(&x.invert()).unwrap().is_identity());
        assert!(x.divide(&x).unwrap().is_identity());
    }

    #[test]
    fn test_from_square_root() {
        let group = small_group();
        let element = GqElement::from_square_root(&BigUint::from(5u32), &group).unwrap();
        assert_eq!(element.value(), &BigUint::from(2u32));
        assert!(GqElement::from_square_root(&BigUint::from(0u32), &group).is_err());
    }

    #[test]
    fn test_cross_group_operations_rejected() {
        let a = small_group().generator();
        let b = other_small_group().generator();

        assert!(matches!(a.multiply(&b), Err(CryptoError::GroupMismatch(_))));
        assert!(matches!(
            a.exponentiate(&exponent(2, &other_small_group())),
            Err(CryptoError::GroupMismatch(_))
        ));
    }
}
