//! `cardinality-sketch` estimates the number of distinct 64-bit items observed
//! in a stream while using memory many orders of magnitude smaller than the
//! distinct set itself.
//!
//! The sketch is a HyperLogLog++ variant built for embedding inside taxonomic
//! sequence classifiers, where billions of k-mer identifiers are counted per
//! taxon and memory per sketch plus per-insert cost dominate the design.
//!
//! # Data-structure design rationale
//!
//! ## Two representations
//! - **Sparse**: a sorted list of 32-bit encoded hashes kept at a higher
//!   precision (p' = 25), giving near-exact counts while the sketch is small.
//!   4 bytes per distinct item observed so far.
//! - **Dense**: 2^p one-byte registers holding the maximum observed rank per
//!   index. Fixed 2^p bytes regardless of cardinality.
//!
//! The sketch starts sparse and converts to dense once the list grows past a
//! quarter of the register count, the point where the 4-byte entries stop
//! paying for their extra accuracy.
//!
//! ## Two estimators
//! - [`CardinalitySketch::cardinality`]: the Flajolet–Heule estimator, using
//!   linear counting at low occupancy and the harmonic-mean raw estimate with
//!   empirical bias correction elsewhere.
//! - [`CardinalitySketch::ertl_cardinality`]: the Ertl estimator, which
//!   replaces the empirical corrections with the σ/τ series over the register
//!   histogram.
//!
//! ## Expected error
//! Relative error in dense mode is ~1.04/√m:
//! p = 10: 3.25%, p = 12: 1.62%, p = 14: 0.81%, p = 18: 0.20%.
//! Sparse mode counts are accurate to the collision chance at 25-bit indices.
//!
//! ## Bias correction data
//! The linear-counting thresholds and the p = 4 raw-estimate/bias table pair
//! are the reference values published with HyperLogLog++ (Heule et al. 2013).
//! The pairs for p = 5..18 were remeasured with the paper's procedure (mean
//! raw estimate over seeded trials at 80 reference cardinalities) and
//! validated on held-out streams across the corrected range, so they are
//! statistically equivalent to, but not bit-identical with, the published
//! appendix data.
//!
//! # Example
//! ```
//! use cardinality_sketch::CardinalitySketch;
//!
//! let mut sketch = CardinalitySketch::new(14)?;
//! sketch.add_batch(&(0..10_000).collect::<Vec<u64>>());
//! let estimate = sketch.cardinality();
//! assert!(estimate > 9_500 && estimate < 10_500);
//! # Ok::<(), cardinality_sketch::SketchError>(())
//! ```
//!
//! Items are already-64-bit values; a mixer function spreads their bits before
//! insertion and can be chosen at construction (see [`mixers`]).
mod bias_data;
mod bits;
mod dense;
mod encoding;
mod ertl;
mod heule;
pub mod mixers;
mod representation;
#[cfg(feature = "with_serde")]
mod serde;
mod sketch;
mod sparse;

pub use mixers::{murmur3_finalizer, ranhash, wang_mixer, Mixer};
pub use sketch::{CardinalitySketch, SketchError, MAX_PRECISION, MIN_PRECISION};
