//! Dense representation: 2^p one-byte registers, each holding the maximum
//! rank observed for its index. Fixed-size, insertion is a compare-and-store,
//! and merging is an element-wise maximum.

use crate::bits::{get_index, get_rank};
use crate::encoding::{decode_index, decode_rank};
use crate::ertl;
use crate::heule;
use crate::representation::RepresentationTrait;

/// Register array container.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "with_serde", derive(serde::Serialize, serde::Deserialize))]
pub(crate) struct Registers {
    p: u8,
    data: Vec<u8>,
}

impl Registers {
    pub(crate) fn new(p: u8) -> Self {
        Self {
            p,
            data: vec![0; 1 << p],
        }
    }

    #[inline]
    pub(crate) fn precision(&self) -> u8 {
        self.p
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.data.len()
    }

    /// Apply one (index, rank) observation, keeping the register maximum.
    #[inline]
    pub(crate) fn update_rank(&mut self, idx: u32, rank: u8) {
        debug_assert!(rank <= 64 - self.p + 1, "rank {rank} exceeds q + 1");
        let register = &mut self.data[idx as usize];
        if rank > *register {
            *register = rank;
        }
    }

    /// Fold the decoded entries of a sparse list into the registers.
    pub(crate) fn absorb(&mut self, entries: &[u32]) {
        for &entry in entries {
            self.update_rank(decode_index(entry, self.p), decode_rank(entry, self.p));
        }
    }

    /// Element-wise register maximum.
    pub(crate) fn merge(&mut self, rhs: &Registers) {
        for (register, &other) in self.data.iter_mut().zip(&rhs.data) {
            if other > *register {
                *register = other;
            }
        }
    }

    fn zeros(&self) -> usize {
        self.data.iter().filter(|&&register| register == 0).count()
    }

    /// Harmonic-mean raw estimate (Flajolet et al. 2007), before any
    /// correction.
    fn raw_estimate(&self) -> f64 {
        let m = self.data.len();
        let inverse_sum: f64 = self
            .data
            .iter()
            .map(|&register| 1.0 / (1u64 << register) as f64)
            .sum();
        heule::alpha(m) * (m * m) as f64 / inverse_sum
    }

    fn histogram(&self) -> Vec<u32> {
        let q = 64 - self.p;
        let mut counts = vec![0u32; q as usize + 2];
        for &register in &self.data {
            counts[register as usize] += 1;
        }
        counts
    }
}

impl RepresentationTrait for Registers {
    #[inline]
    fn insert_hash(&mut self, hash: u64) {
        self.update_rank(get_index(hash, self.p), get_rank(hash, self.p));
    }

    /// Flajolet–Heule estimate: linear counting while enough registers are
    /// zero and the count stays under the per-precision threshold, otherwise
    /// the raw estimate with empirical bias subtracted below five times the
    /// register count.
    fn cardinality(&self) -> u64 {
        let m = self.data.len();
        let zeros = self.zeros();
        if zeros > 0 {
            let linear_count = heule::linear_counting(m, zeros);
            if linear_count <= heule::threshold(self.p) {
                return linear_count.round() as u64;
            }
        }
        let mut estimate = self.raw_estimate();
        if estimate <= 5.0 * m as f64 {
            estimate -= heule::estimate_bias(estimate, self.p);
        }
        estimate.round() as u64
    }

    fn ertl_cardinality(&self) -> u64 {
        ertl::estimate(self.data.len(), 64 - self.p, &self.histogram())
    }

    fn size_of(&self) -> usize {
        self.len()
    }
}
