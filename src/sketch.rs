//! Top-level sketch type: construction and validation, inserts, the
//! sparse-to-dense switch, merging, and the two estimators.

use std::fmt::{self, Debug, Formatter};
use std::ops::AddAssign;

use crate::dense::Registers;
use crate::mixers::{ranhash, Mixer};
use crate::representation::{Representation, RepresentationTrait};
use crate::sparse::SparseList;

/// Lowest supported precision.
pub const MIN_PRECISION: u8 = 4;
/// Highest supported precision.
pub const MAX_PRECISION: u8 = 18;
/// Precision used by [`CardinalitySketch::default`].
const DEFAULT_PRECISION: u8 = 12;
/// Divisor applied to the register count to obtain the sparse-list cap.
/// The crossover sits where 4-byte sparse entries stop beating 1-byte
/// registers on memory; kept in one place so it can be tuned without touching
/// the API.
const SPARSE_CAP_DIVISOR: usize = 4;

/// Errors raised on construction or merge. Nothing is mutated when one of
/// these is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SketchError {
    /// Precision outside `[MIN_PRECISION, MAX_PRECISION]`.
    InvalidPrecision(u8),
    /// Merged sketches must agree on precision.
    PrecisionMismatch { lhs: u8, rhs: u8 },
}

impl fmt::Display for SketchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            SketchError::InvalidPrecision(p) => write!(
                f,
                "precision (register count = 2^precision) must be between \
                 {MIN_PRECISION} and {MAX_PRECISION}, got {p}"
            ),
            SketchError::PrecisionMismatch { lhs, rhs } => {
                write!(f, "merged sketches must have equal precisions, got {lhs} and {rhs}")
            }
        }
    }
}

impl std::error::Error for SketchError {}

/// Probabilistic cardinality sketch over 64-bit items.
///
/// Holds either a sorted list of encoded hashes (sparse, low cardinalities)
/// or `2^precision` one-byte registers (dense), and answers distinct-count
/// queries with relative error ~1.04/√(2^precision). Not safe for concurrent
/// mutation; wrap it in a lock if writers race.
#[derive(Clone)]
pub struct CardinalitySketch {
    pub(crate) precision: u8,
    pub(crate) sparse_cap: usize,
    pub(crate) mixer: Mixer,
    pub(crate) representation: Representation,
}

impl CardinalitySketch {
    /// Create a sparse sketch with the default mixer ([`ranhash`]).
    pub fn new(precision: u8) -> Result<Self, SketchError> {
        Self::with_mixer(precision, true, ranhash)
    }

    /// Create a sketch with full control over the initial representation and
    /// the mixer.
    ///
    /// The mixer must be pure and total; it is invoked synchronously on every
    /// insert. Passing `sparse = false` allocates all `2^precision` registers
    /// immediately.
    pub fn with_mixer(precision: u8, sparse: bool, mixer: Mixer) -> Result<Self, SketchError> {
        if !(MIN_PRECISION..=MAX_PRECISION).contains(&precision) {
            return Err(SketchError::InvalidPrecision(precision));
        }
        let sparse_cap = (1usize << precision) / SPARSE_CAP_DIVISOR;
        let representation = if sparse {
            Representation::Sparse(SparseList::new(precision, sparse_cap))
        } else {
            Representation::Dense(Registers::new(precision))
        };
        Ok(Self {
            precision,
            sparse_cap,
            mixer,
            representation,
        })
    }

    /// The sketch's precision.
    #[inline]
    pub fn precision(&self) -> u8 {
        self.precision
    }

    /// Whether the sketch currently uses the sparse representation.
    #[inline]
    pub fn is_sparse(&self) -> bool {
        matches!(self.representation, Representation::Sparse(_))
    }

    /// Insert one item.
    #[inline]
    pub fn add(&mut self, item: u64) {
        let hash = (self.mixer)(item);
        self.representation.insert_hash(hash);
        let over_cap = matches!(
            &self.representation,
            Representation::Sparse(list) if list.len() > self.sparse_cap
        );
        if over_cap {
            self.force_dense();
        }
    }

    /// Insert a batch of items.
    pub fn add_batch(&mut self, items: &[u64]) {
        for &item in items {
            self.add(item);
        }
    }

    /// Union `other` into this sketch. Both sketches must share a precision.
    ///
    /// Stays sparse only when both sides are sparse and their combined entry
    /// counts fit within the register count; every other combination lands in
    /// the dense representation.
    pub fn merge(&mut self, other: &Self) -> Result<(), SketchError> {
        if self.precision != other.precision {
            return Err(SketchError::PrecisionMismatch {
                lhs: self.precision,
                rhs: other.precision,
            });
        }
        debug_assert_eq!(self.representation.precision(), self.precision);
        debug_assert_eq!(other.representation.precision(), other.precision);
        let m = 1usize << self.precision;
        if let (Representation::Sparse(lhs), Representation::Sparse(rhs)) =
            (&mut self.representation, &other.representation)
        {
            if lhs.len() + rhs.len() <= m {
                for &entry in rhs.entries() {
                    lhs.insert(entry);
                }
                return Ok(());
            }
        }
        match &other.representation {
            Representation::Sparse(rhs) => self.force_dense().absorb(rhs.entries()),
            Representation::Dense(rhs) => self.force_dense().merge(rhs),
        }
        Ok(())
    }

    /// Flajolet–Heule cardinality estimate (the default estimator).
    pub fn cardinality(&self) -> u64 {
        self.representation.cardinality()
    }

    /// Ertl cardinality estimate.
    pub fn ertl_cardinality(&self) -> u64 {
        self.representation.ertl_cardinality()
    }

    /// Empty the sketch back to its initial sparse state.
    pub fn reset(&mut self) {
        self.representation =
            Representation::Sparse(SparseList::new(self.precision, self.sparse_cap));
    }

    /// Bytes used by the sketch: the fixed header plus the heap storage of the
    /// current representation.
    pub fn size_of(&self) -> usize {
        std::mem::size_of::<Self>() + self.representation.size_of()
    }

    /// Convert to the dense representation, draining any sparse entries, and
    /// hand back the registers.
    fn force_dense(&mut self) -> &mut Registers {
        if let Representation::Sparse(list) = &self.representation {
            let mut registers = Registers::new(self.precision);
            registers.absorb(list.entries());
            self.representation = Representation::Dense(registers);
        }
        match &mut self.representation {
            Representation::Dense(registers) => registers,
            Representation::Sparse(_) => unreachable!("representation was just densified"),
        }
    }
}

impl Default for CardinalitySketch {
    fn default() -> Self {
        Self::new(DEFAULT_PRECISION).expect("default precision is in range")
    }
}

impl PartialEq for CardinalitySketch {
    /// Sketches compare by precision and representation payload; the mixer is
    /// not part of the comparison.
    fn eq(&self, other: &Self) -> bool {
        self.precision == other.precision && self.representation == other.representation
    }
}

impl AddAssign<&CardinalitySketch> for CardinalitySketch {
    /// Merge sugar over [`CardinalitySketch::merge`].
    ///
    /// # Panics
    /// Panics on precision mismatch; use `merge` where fallibility matters.
    fn add_assign(&mut self, rhs: &CardinalitySketch) {
        if let Err(error) = self.merge(rhs) {
            panic!("{error}");
        }
    }
}

impl Debug for CardinalitySketch {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{ representation: {}, estimate: {}, size: {} }}",
            if self.is_sparse() { "Sparse" } else { "Dense" },
            self.cardinality(),
            self.size_of()
        )
    }
}
