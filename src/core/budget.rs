//! Character-budget selection.
//!
//! [`Budgeter`] picks a subset of items whose combined cost fits a limit.
//! Candidates are visited in a shuffled order so the result is not biased
//! toward the earliest conversations. An item that does not fit is skipped
//! and the pass continues with the next one, so a later, smaller item can
//! still get in. The accepted items are returned in their original order.
//!
//! This is a single greedy pass, not an optimal packing.
//!
//! # Example
//!
//! ```
//! use chatseed::core::budget::Budgeter;
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let lengths = vec![40, 10, 30, 25];
//! let mut rng = StdRng::seed_from_u64(7);
//!
//! let picked = Budgeter::new(60).select(lengths, |len| *len, &mut rng);
//! assert!(picked.iter().sum::<usize>() <= 60);
//! ```

use rand::Rng;
use rand::seq::SliceRandom;

/// Greedy, randomized selection under a character limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Budgeter {
    limit: usize,
    overhead: usize,
}

impl Budgeter {
    /// Creates a budgeter for `limit` characters.
    pub fn new(limit: usize) -> Self {
        Self { limit, overhead: 0 }
    }

    /// Reserves `overhead` characters of the limit for fixed framing.
    #[must_use]
    pub fn with_overhead(mut self, overhead: usize) -> Self {
        self.overhead = overhead;
        self
    }

    /// Returns the configured limit.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Returns the characters left for items.
    pub fn capacity(&self) -> usize {
        self.limit.saturating_sub(self.overhead)
    }

    /// Selects items whose summed `cost` stays within the capacity.
    ///
    /// Costs are computed once per item before selection starts.
    pub fn select<T, F, R>(&self, items: Vec<T>, cost: F, rng: &mut R) -> Vec<T>
    where
        F: Fn(&T) -> usize,
        R: Rng + ?Sized,
    {
        let costs: Vec<usize> = items.iter().map(&cost).collect();
        let capacity = self.capacity();

        let mut order: Vec<usize> = (0..items.len()).collect();
        order.shuffle(rng);

        let mut used = 0usize;
        let mut accepted: Vec<usize> = Vec::new();
        for idx in order {
            match used.checked_add(costs[idx]) {
                Some(total) if total <= capacity => {
                    used = total;
                    accepted.push(idx);
                }
                _ => {
                    tracing::trace!(index = idx, cost = costs[idx], used, capacity, "skipped, over budget");
                }
            }
        }
        accepted.sort_unstable();

        let mut slots: Vec<Option<T>> = items.into_iter().map(Some).collect();
        accepted
            .into_iter()
            .filter_map(|idx| slots[idx].take())
            .collect()
    }
}
