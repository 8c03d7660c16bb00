//! Circular history of block averages with a latched baseline.
//!
//! The first average ever recorded becomes the baseline and is kept in its
//! own field.  When the ring wraps, slot 0 is overwritten like any other
//! slot but the baseline does not move.

pub const HISTORY_CAPACITY: usize = 100;

#[derive(Debug, Clone)]
pub struct AverageHistory<const M: usize = HISTORY_CAPACITY> {
    slots: [i32; M],
    /// Next slot to write, always in `0..M`.
    index: usize,
    len: usize,
    baseline: Option<i32>,
}

impl<const M: usize> AverageHistory<M> {
    pub fn new() -> Self {
        const { assert!(M > 0, "history needs at least one slot") };
        Self {
            slots: [0; M],
            index: 0,
            len: 0,
            baseline: None,
        }
    }

    /// Record a block average and advance the write index modulo `M`.
    pub fn push(&mut self, average: i32) {
        if self.baseline.is_none() {
            self.baseline = Some(average);
        }
        self.slots[self.index] = average;
        self.index = (self.index + 1) % M;
        self.len = (self.len + 1).min(M);
    }

    /// First average ever recorded, if any.
    pub fn baseline(&self) -> Option<i32> {
        self.baseline
    }

    /// `current / baseline`, or `None` while there is no baseline or it is
    /// zero.
    pub fn normalized(&self, current: i32) -> Option<f32> {
        match self.baseline {
            Some(b) if b != 0 => Some(current as f32 / b as f32),
            _ => None,
        }
    }

    pub fn write_index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Raw ring slot (slot 0 is overwritten after a wrap).
    pub fn slot(&self, i: usize) -> Option<i32> {
        (i < self.len).then(|| self.slots[i])
    }

    pub fn latest(&self) -> Option<i32> {
        if self.len == 0 {
            return None;
        }
        Some(self.slots[(self.index + M - 1) % M])
    }
}

impl<const M: usize> Default for AverageHistory<M> {
    fn default() -> Self {
        Self::new()
    }
}
