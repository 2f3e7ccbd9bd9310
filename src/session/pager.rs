//! Incremental result reveal
//!
//! Exposes a growing prefix of the result list. Each reveal adds one batch;
//! a new result set starts over at one batch.

/// Default number of results revealed per batch
pub const BATCH_SIZE: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    batch_size: usize,
    revealed: usize,
    total: usize,
}

impl Default for Pager {
    fn default() -> Self {
        Self::new(BATCH_SIZE)
    }
}

impl Pager {
    /// Pager over an empty result set; a zero batch size is treated as one
    #[must_use]
    pub fn new(batch_size: usize) -> Self {
        Self {
            batch_size: batch_size.max(1),
            revealed: 0,
            total: 0,
        }
    }

    /// Start over for a new result set of `total` items
    pub fn reset(&mut self, total: usize) {
        self.total = total;
        self.revealed = self.batch_size.min(total);
    }

    /// Reveal one more batch, capped at the total
    ///
    /// Returns whether anything new was revealed.
    pub fn reveal_more(&mut self) -> bool {
        let next = self.revealed.saturating_add(self.batch_size).min(self.total);
        let grew = next > self.revealed;
        self.revealed = next;
        grew
    }

    #[must_use]
    pub const fn revealed(&self) -> usize {
        self.revealed
    }

    #[must_use]
    pub const fn total(&self) -> usize {
        self.total
    }

    #[must_use]
    pub const fn batch_size(&self) -> usize {
        self.batch_size
    }

    #[must_use]
    pub const fn has_more(&self) -> bool {
        self.revealed < self.total
    }

    /// The revealed prefix of `items`
    #[must_use]
    pub fn window<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        &items[..self.revealed.min(items.len())]
    }
}
