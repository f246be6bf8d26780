//! Non-empty vectors of elements bound to a single group

use std::fmt;
use std::ops::Index;

use crate::error::{CryptoError, Result};

/// An element that knows which group it lives in.
pub trait GroupVectorElement: Clone {
    type Group: Clone + PartialEq + fmt::Debug;

    fn group(&self) -> &Self::Group;
}

/// A vector of elements which all belong to the same group.
///
/// The vector is never empty, so [`GroupVector::group`] is always defined.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GroupVector<E: GroupVectorElement> {
    elements: Vec<E>,
}

impl<E: GroupVectorElement> GroupVector<E> {
    /// Create a group vector, rejecting empty input and mixed groups
    pub fn new(elements: Vec<E>) -> Result<Self> {
        let first = elements.first().ok_or(CryptoError::InvalidSlotCount(0))?;

        if let Some(position) = elements[1..]
            .iter()
            .position(|element| element.group() != first.group())
        {
            return Err(CryptoError::GroupMismatch(format!(
                "element {} does not belong to the group of element 0",
                position + 1
            )));
        }

        Ok(GroupVector { elements })
    }

    /// Number of slots
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Always false; kept for API symmetry with slices
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// The group shared by every element
    pub fn group(&self) -> &E::Group {
        self.elements[0].group()
    }

    pub fn get(&self, index: usize) -> Option<&E> {
        self.elements.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, E> {
        self.elements.iter()
    }

    pub fn as_slice(&self) -> &[E] {
        &self.elements
    }

    pub fn into_inner(self) -> Vec<E> {
        self.elements
    }

    /// Check that two vectors can be combined slot by slot
    pub(crate) fn check_same_length<F: GroupVectorElement>(
        &self,
        other: &GroupVector<F>,
        what: &str,
    ) -> Result<()> {
        if self.len() != other.len() {
            return Err(CryptoError::LengthMismatch(format!(
                "{what}: {} vs {}",
                self.len(),
                other.len()
            )));
        }
        Ok(())
    }
}

impl<E: GroupVectorElement> Index<usize> for GroupVector<E> {
    type Output = E;

    fn index(&self, index: usize) -> &E {
        &self.elements[index]
    }
}

impl<'a, E: GroupVectorElement> IntoIterator for &'a GroupVector<E> {
    type Item = &'a E;
    type IntoIter = std::slice::Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

impl<E: GroupVectorElement + fmt::Display> fmt::Display for GroupVector<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, element) in self.elements.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{element}")?;
        }
        write!(f, "]")
    }
}
