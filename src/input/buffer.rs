//! Fixed-capacity, newest-first ring of classified input frames.
//!
//! Until `capacity` frames have elapsed, unfilled slots read as the
//! zero-valued snapshot. That is accepted stale data, not an error; an
//! offset past the capacity is a programming error and panics.

use super::snapshot::Snapshot;

pub struct Buffer {
    queue: Box<[Snapshot]>,
    head: usize,
}

impl Buffer {
    pub fn new(capacity: usize) -> Buffer {
        assert!(capacity > 0, "input buffer needs at least one slot");
        Buffer {
            queue: vec![Snapshot::default(); capacity].into_boxed_slice(),
            head: capacity - 1,
        }
    }

    /// Push a new snapshot, evicting the oldest one.
    pub fn add(&mut self, snapshot: Snapshot) {
        self.head = (self.head + 1) % self.queue.len();
        self.queue[self.head] = snapshot;
    }

    /// Read the nth-newest snapshot; offset 0 is the most recent.
    ///
    /// # Panics
    /// Panics if `offset >= capacity`.
    pub fn get(&self, offset: usize) -> Snapshot {
        let len = self.queue.len();
        assert!(offset < len, "input buffer offset out of range: {offset} >= {len}");
        self.queue[(self.head + len - offset) % len]
    }
}
