//! Undock queue: docks awaiting their auth-string search before they can
//! leave the berth (spec §4.2 "awaiting-undock", §4.5).

use crate::ids::DockId;

/// One dock waiting for its password to be cracked. `password_length` is
/// `finish_to_undock`'s result: the number of full timesteps the ship sat
/// docked before the search may begin.
#[derive(Copy, Clone, Debug)]
pub struct UndockEntry {
    pub dock: DockId,
    pub password_length: i64,
}

/// Plain FIFO: docks are enqueued in the order they finish cargo handling
/// and searched in that same order (spec §4.5, §4.7 step 5).
#[derive(Default)]
pub struct UndockQueue {
    entries: std::collections::VecDeque<UndockEntry>,
}

impl UndockQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: UndockEntry) {
        self.entries.push_back(entry);
    }

    pub fn pop(&mut self) -> Option<UndockEntry> {
        self.entries.pop_front()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &UndockEntry> {
        self.entries.iter()
    }

    /// Remove and return every entry, oldest first, for a timestep's worth
    /// of parallel searches (spec §4.7 step 5 drains the whole queue).
    pub fn drain_all(&mut self) -> Vec<UndockEntry> {
        self.entries.drain(..).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fifo_order_preserved() {
        let mut q = UndockQueue::new();
        q.push(UndockEntry { dock: DockId(0), password_length: 3 });
        q.push(UndockEntry { dock: DockId(1), password_length: 5 });

        assert_eq!(q.pop().unwrap().dock, DockId(0));
        assert_eq!(q.pop().unwrap().dock, DockId(1));
        assert!(q.pop().is_none());
    }

    #[test]
    fn drain_all_empties_queue_in_order() {
        let mut q = UndockQueue::new();
        for i in 0..4 {
            q.push(UndockEntry { dock: DockId(i), password_length: 1 });
        }
        let drained = q.drain_all();
        assert_eq!(drained.len(), 4);
        assert!(q.is_empty());
        assert_eq!(drained[0].dock, DockId(0));
        assert_eq!(drained[3].dock, DockId(3));
    }
}
