use std::cmp::Ordering;

use num::Float;
use serde::{Deserialize, Serialize};

/// Sparse vector keeping only non-zero entries
///
/// Indices are kept strictly ascending so two vectors can be walked
/// in a single merge pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SparseVec<N> {
    /// logical dimension
    len: usize,
    inds: Vec<u32>,
    vals: Vec<N>,
}

impl<N> SparseVec<N>
where
    N: Float,
{
    /// Create an all-zero vector of dimension `len`
    pub fn zeros(len: usize) -> Self {
        Self {
            len,
            inds: Vec::new(),
            vals: Vec::new(),
        }
    }

    /// Build from `(index, value)` pairs in any order
    ///
    /// Zero values are dropped. Pairs pointing past `len` are ignored.
    /// A repeated index keeps the sum of its values.
    pub fn from_pairs(len: usize, pairs: impl IntoIterator<Item = (usize, N)>) -> Self {
        let mut pairs: Vec<(u32, N)> = pairs
            .into_iter()
            .filter(|(idx, _)| *idx < len)
            .map(|(idx, val)| (idx as u32, val))
            .collect();
        pairs.sort_unstable_by_key(|(idx, _)| *idx);

        let mut inds: Vec<u32> = Vec::with_capacity(pairs.len());
        let mut vals: Vec<N> = Vec::with_capacity(pairs.len());
        for (idx, val) in pairs {
            match inds.last() {
                Some(&last) if last == idx => {
                    if let Some(v) = vals.last_mut() {
                        *v = *v + val;
                    }
                }
                _ => {
                    inds.push(idx);
                    vals.push(val);
                }
            }
        }
        let mut vec = Self { len, inds, vals };
        vec.drop_zeros();
        vec
    }

    fn drop_zeros(&mut self) {
        let mut write = 0;
        for read in 0..self.inds.len() {
            if !self.vals[read].is_zero() {
                self.inds[write] = self.inds[read];
                self.vals[write] = self.vals[read];
                write += 1;
            }
        }
        self.inds.truncate(write);
        self.vals.truncate(write);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// number of stored (non-zero) entries
    #[inline]
    pub fn nnz(&self) -> usize {
        self.inds.len()
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.inds.is_empty()
    }

    /// value at `index`, zero when not stored
    pub fn get(&self, index: usize) -> N {
        match self.inds.binary_search(&(index as u32)) {
            Ok(pos) => self.vals[pos],
            Err(_) => N::zero(),
        }
    }

    /// Iterate stored entries as `(index, value)` in ascending index order
    pub fn raw_iter(&self) -> impl Iterator<Item = (usize, N)> + '_ {
        self.inds
            .iter()
            .zip(self.vals.iter())
            .map(|(&idx, &val)| (idx as usize, val))
    }

    /// Euclidean length
    pub fn norm(&self) -> N {
        self.vals
            .iter()
            .fold(N::zero(), |acc, &v| acc + v * v)
            .sqrt()
    }

    /// Scale to unit length in place
    /// The zero vector stays zero.
    pub fn normalize(&mut self) {
        let norm = self.norm();
        if norm.is_zero() || !norm.is_finite() {
            return;
        }
        for v in self.vals.iter_mut() {
            *v = *v / norm;
        }
    }

    /// Dot product over the shared indices
    pub fn dot(&self, other: &Self) -> N {
        let (mut i, mut j) = (0, 0);
        let mut sum = N::zero();
        while i < self.inds.len() && j < other.inds.len() {
            match self.inds[i].cmp(&other.inds[j]) {
                Ordering::Equal => {
                    sum = sum + self.vals[i] * other.vals[j];
                    i += 1;
                    j += 1;
                }
                Ordering::Less => i += 1,
                Ordering::Greater => j += 1,
            }
        }
        sum
    }

    pub fn shrink_to_fit(&mut self) {
        self.inds.shrink_to_fit();
        self.vals.shrink_to_fit();
    }
}
