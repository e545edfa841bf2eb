//! Prefix-sum line index
//!
//! Holds one weight per line (line length plus end-of-line length) and answers
//! "how many characters precede line `i`" and "which line contains offset `o`" without
//! rescanning the document.
//!
//! Implemented as a Fenwick (binary indexed) tree: single-weight updates, prefix sums and
//! offset lookups are O(log N). Structural splices (lines inserted or removed) rebuild the
//! tree in O(N), which is acceptable because they are bounded by the size of the edit's
//! surrounding document rather than performed per keystroke on unchanged line counts.
//!
//! Every precondition violation panics. The index never clamps: a wrong index or offset here
//! means the caller's view of the document has already drifted.

use crate::error::InvariantViolation;

/// Cumulative-weight index over a sequence of line weights.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrefixSumIndex {
    /// Raw weights, 0-based.
    weights: Vec<usize>,
    /// Fenwick tree, 1-based (`tree[0]` is unused).
    tree: Vec<usize>,
    /// Total weight, maintained independently of `tree`.
    total: usize,
}

impl PrefixSumIndex {
    /// Build an index from a sequence of weights in O(N).
    pub fn build(weights: Vec<usize>) -> Self {
        let mut index = Self {
            weights,
            tree: Vec::new(),
            total: 0,
        };
        index.rebuild_tree();
        index
    }

    fn rebuild_tree(&mut self) {
        let n = self.weights.len();
        self.tree.clear();
        self.tree.resize(n + 1, 0);
        for i in 1..=n {
            self.tree[i] += self.weights[i - 1];
            let parent = i + lowbit(i);
            if parent <= n {
                self.tree[parent] += self.tree[i];
            }
        }
        self.total = self.weights.iter().sum();
    }

    /// Number of weights.
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Whether the index holds no weights.
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Sum of all weights.
    pub fn total_weight(&self) -> usize {
        self.total
    }

    /// Weight at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn value(&self, index: usize) -> usize {
        self.weights[index]
    }

    /// All weights in order.
    pub fn values(&self) -> &[usize] {
        &self.weights
    }

    /// Total weight of the first `count` entries.
    ///
    /// # Panics
    ///
    /// Panics if `count > len()`.
    pub fn sum_before(&self, count: usize) -> usize {
        assert!(
            count <= self.len(),
            "sum_before({count}) out of range for {} weights",
            self.len()
        );
        let mut i = count;
        let mut sum = 0;
        while i > 0 {
            sum += self.tree[i];
            i -= lowbit(i);
        }
        sum
    }

    /// Find the entry whose cumulative range `[sum_before(i), sum_before(i + 1))` contains
    /// `offset`, returning `(i, offset - sum_before(i))`.
    ///
    /// `offset == total_weight()` resolves to the last entry with a remainder equal to its
    /// weight (the document end). Zero-weight entries never contain an offset and are skipped.
    ///
    /// # Panics
    ///
    /// Panics if the index is empty or `offset > total_weight()`.
    pub fn locate(&self, offset: usize) -> (usize, usize) {
        let n = self.len();
        assert!(n > 0, "locate({offset}) on an empty index");
        assert!(
            offset <= self.total,
            "locate({offset}) out of range for total weight {}",
            self.total
        );

        // Largest `pos` with `sum_before(pos) <= offset`.
        let mut pos = 0;
        let mut remainder = offset;
        let mut step = highest_power_of_two(n);
        while step > 0 {
            let next = pos + step;
            if next <= n && self.tree[next] <= remainder {
                pos = next;
                remainder -= self.tree[next];
            }
            step >>= 1;
        }

        if pos >= n {
            let last = n - 1;
            return (last, offset - self.sum_before(last));
        }
        (pos, remainder)
    }

    /// Replace the weight at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn change_value(&mut self, index: usize, weight: usize) {
        let old = self.weights[index];
        if old == weight {
            return;
        }
        self.weights[index] = weight;

        let n = self.len();
        let mut i = index + 1;
        if weight > old {
            let delta = weight - old;
            self.total += delta;
            while i <= n {
                self.tree[i] += delta;
                i += lowbit(i);
            }
        } else {
            let delta = old - weight;
            self.total -= delta;
            while i <= n {
                self.tree[i] -= delta;
                i += lowbit(i);
            }
        }
    }

    /// Remove `count` consecutive weights starting at `start`.
    ///
    /// # Panics
    ///
    /// Panics if `start + count > len()`.
    pub fn remove_values(&mut self, start: usize, count: usize) {
        self.splice_values(start, count, Vec::new());
    }

    /// Insert weights before position `at` (`at == len()` appends).
    ///
    /// # Panics
    ///
    /// Panics if `at > len()`.
    pub fn insert_values(&mut self, at: usize, weights: Vec<usize>) {
        self.splice_values(at, 0, weights);
    }

    /// Replace `count` weights starting at `start` with `weights`, rebuilding once.
    ///
    /// # Panics
    ///
    /// Panics if `start + count > len()`.
    pub fn splice_values(&mut self, start: usize, count: usize, weights: Vec<usize>) {
        let end = start
            .checked_add(count)
            .filter(|&end| end <= self.len())
            .unwrap_or_else(|| {
                panic!(
                    "splice {start}..{start}+{count} out of range for {} weights",
                    self.len()
                )
            });
        if count == 0 && weights.is_empty() {
            return;
        }
        self.weights.splice(start..end, weights);
        self.rebuild_tree();
    }

    /// Check that the tree, the running total and the raw weights agree.
    pub fn verify(&self) -> Result<(), InvariantViolation> {
        let weights: usize = self.weights.iter().sum();
        let tree = self.sum_before(self.len());
        if tree != weights || self.total != weights {
            return Err(InvariantViolation::CorruptCumulative { tree, weights });
        }
        Ok(())
    }
}

impl FromIterator<usize> for PrefixSumIndex {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        Self::build(iter.into_iter().collect())
    }
}

fn lowbit(i: usize) -> usize {
    i & i.wrapping_neg()
}

fn highest_power_of_two(n: usize) -> usize {
    if n == 0 {
        0
    } else {
        1 << (usize::BITS - 1 - n.leading_zeros())
    }
}
