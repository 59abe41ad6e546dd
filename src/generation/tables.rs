//! # Depth Tables
//!
//! Step functions of dungeon depth and weighted random selection.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Ordered `(value, min_depth)` steps.
///
/// The value at a depth is the value of the last step whose minimum depth is
/// at or below it, or 0 when no step qualifies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepthTable(pub Vec<(u32, u32)>);

impl DepthTable {
    /// A table that yields the same value from depth 1 onwards.
    pub fn flat(value: u32) -> Self {
        Self(vec![(value, 1)])
    }

    /// Looks up the value at the given depth.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::DepthTable;
    ///
    /// let table = DepthTable(vec![(2, 1), (3, 4), (5, 6)]);
    /// assert_eq!(table.value_at(5), 3);
    /// assert_eq!(table.value_at(7), 5);
    /// assert_eq!(table.value_at(0), 0);
    /// ```
    pub fn value_at(&self, depth: u32) -> u32 {
        self.0
            .iter()
            .rev()
            .find(|(_, min_depth)| depth >= *min_depth)
            .map(|(value, _)| *value)
            .unwrap_or(0)
    }
}

impl From<&[(u32, u32)]> for DepthTable {
    fn from(steps: &[(u32, u32)]) -> Self {
        Self(steps.to_vec())
    }
}

/// Picks an index with probability proportional to its weight.
///
/// A single draw in `1..=sum` selects the first index whose running total
/// reaches it, so the result depends only on the declared order and the random
/// stream. Returns `None` when every weight is zero.
pub fn random_choice_index<R: Rng + ?Sized>(weights: &[u32], rng: &mut R) -> Option<usize> {
    let total: u32 = weights.iter().sum();
    if total == 0 {
        return None;
    }

    let dice = rng.gen_range(1..=total);
    let mut running_sum = 0;
    for (index, weight) in weights.iter().enumerate() {
        running_sum += weight;
        if dice <= running_sum {
            return Some(index);
        }
    }
    None
}

/// Picks one of `choices` using depth-scaled weights.
pub fn random_choice_at_depth<T: Copy, R: Rng + ?Sized>(
    choices: &[(T, DepthTable)],
    depth: u32,
    rng: &mut R,
) -> Option<T> {
    let weights: Vec<u32> = choices.iter().map(|(_, table)| table.value_at(depth)).collect();
    random_choice_index(&weights, rng).map(|index| choices[index].0)
}
