//! The sketch's two storage representations as a sum type, dispatched through
//! a common trait. Exactly one representation exists at a time; the sketch
//! starts sparse and is densified by [`crate::CardinalitySketch`] when the
//! list outgrows its cap, when a merge overflows it, or when a dense peer is
//! merged in.

use enum_dispatch::enum_dispatch;

use crate::dense::Registers;
use crate::sparse::SparseList;

/// Operations every representation provides.
#[enum_dispatch(Representation)]
pub(crate) trait RepresentationTrait {
    /// Record one mixed 64-bit hash.
    fn insert_hash(&mut self, hash: u64);
    /// Flajolet–Heule cardinality estimate, rounded.
    fn cardinality(&self) -> u64;
    /// Ertl cardinality estimate, rounded.
    fn ertl_cardinality(&self) -> u64;
    /// Heap bytes held by the representation.
    fn size_of(&self) -> usize;
}

/// Storage representations of a sketch.
#[enum_dispatch]
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "with_serde", derive(serde::Serialize, serde::Deserialize))]
pub(crate) enum Representation {
    Sparse(SparseList),
    Dense(Registers),
}

impl Representation {
    /// The precision the payload was built for.
    pub(crate) fn precision(&self) -> u8 {
        match self {
            Representation::Sparse(list) => list.precision(),
            Representation::Dense(registers) => registers.precision(),
        }
    }
}
