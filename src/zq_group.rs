//! Additive group of integers modulo q, used for exponents and private keys

use num_bigint::BigUint;
use num_traits::{One, Zero};
use std::fmt;
use std::sync::Arc;

use crate::error::{CryptoError, Result};
use crate::gq_group::GqGroup;
use crate::group_vector::GroupVectorElement;

/// The group Zq of exponents
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ZqGroup {
    q: Arc<BigUint>,
}

impl ZqGroup {
    /// Create Zq for an arbitrary order q >= 2
    pub fn new(q: BigUint) -> Result<Self> {
        if q <= BigUint::one() {
            return Err(CryptoError::InvalidParameter(
                "Order q must be > 1".to_string(),
            ));
        }
        Ok(ZqGroup { q: Arc::new(q) })
    }

    /// The exponent group matching a Gq group (same order q)
    pub fn same_order_as(group: &GqGroup) -> Self {
        ZqGroup {
            q: Arc::new(group.q().clone()),
        }
    }

    pub fn q(&self) -> &BigUint {
        &self.q
    }

    pub fn is_member(&self, value: &BigUint) -> bool {
        value < self.q()
    }

    pub fn zero(&self) -> ZqElement {
        ZqElement {
            value: BigUint::zero(),
            group: self.clone(),
        }
    }

    pub fn one(&self) -> ZqElement {
        ZqElement {
            value: BigUint::one(),
            group: self.clone(),
        }
    }
}

/// An exponent in [0, q)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ZqElement {
    value: BigUint,
    group: ZqGroup,
}

impl ZqElement {
    /// Create an exponent, rejecting values outside [0, q)
    pub fn new(value: BigUint, group: &ZqGroup) -> Result<Self> {
        if !group.is_member(&value) {
            return Err(CryptoError::ExponentOutOfRange);
        }
        Ok(ZqElement {
            value,
            group: group.clone(),
        })
    }

    /// Reduce an arbitrary integer modulo q
    pub fn reduce(value: &BigUint, group: &ZqGroup) -> Self {
        ZqElement {
            value: value % group.q(),
            group: group.clone(),
        }
    }

    pub fn value(&self) -> &BigUint {
        &self.value
    }

    pub fn group(&self) -> &ZqGroup {
        &self.group
    }

    pub fn add(&self, other: &ZqElement) -> Result<ZqElement> {
        self.check_group(other)?;
        Ok(self.with_value((&self.value + &other.value) % self.group.q()))
    }

    pub fn subtract(&self, other: &ZqElement) -> Result<ZqElement> {
        self.add(&other.negate())
    }

    pub fn multiply(&self, other: &ZqElement) -> Result<ZqElement> {
        self.check_group(other)?;
        Ok(self.with_value((&self.value * &other.value) % self.group.q()))
    }

    /// Additive inverse: q - x, with -0 = 0
    pub fn negate(&self) -> ZqElement {
        if self.value.is_zero() {
            return self.clone();
        }
        self.with_value(self.group.q() - &self.value)
    }

    fn with_value(&self, value: BigUint) -> ZqElement {
        ZqElement {
            value,
            group: self.group.clone(),
        }
    }

    fn check_group(&self, other: &ZqElement) -> Result<()> {
        if self.group != other.group {
            return Err(CryptoError::GroupMismatch(
                "exponents belong to different Zq groups".to_string(),
            ));
        }
        Ok(())
    }
}

impl GroupVectorElement for ZqElement {
    type Group = ZqGroup;

    fn group(&self) -> &ZqGroup {
        &self.group
    }
}

impl fmt::Display for ZqElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}
