//! Shared-memory segment layout (spec §6). The real segment is attached via
//! `shmget`/`shmat` against `sharedMemoryKey`; this models its layout only,
//! as an in-process value the scheduler owns.

use crate::ids::{Category, ShipId, Timestep};
use crate::ship::{Direction, ShipRequest, MAX_CARGO};

pub const MAX_DOCKS: usize = 30;
pub const AUTH_STRING_LEN: usize = 100;
pub const MAX_NEW_REQUESTS: usize = 100;

/// A fixed-width arrival record as it lands in `newShipRequests` before
/// being copied into the queue store.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct ShipRequestRecord {
    pub ship_id: ShipId,
    pub timestep: Timestep,
    pub category: Category,
    pub direction: Direction,
    pub emergency: bool,
    pub waiting_time: i64,
    pub cargo: Vec<i32>,
}

impl From<ShipRequestRecord> for ShipRequest {
    fn from(record: ShipRequestRecord) -> Self {
        ShipRequest {
            id: record.ship_id,
            arrival_timestep: record.timestep,
            category: record.category,
            direction: record.direction,
            emergency: record.emergency,
            waiting_time: record.waiting_time,
            cargo: record.cargo,
        }
    }
}

pub struct SharedMemory {
    auth_strings: [[u8; AUTH_STRING_LEN]; MAX_DOCKS],
    new_ship_requests: Vec<ShipRequestRecord>,
}

impl SharedMemory {
    pub fn new() -> Self {
        Self {
            auth_strings: [[0u8; AUTH_STRING_LEN]; MAX_DOCKS],
            new_ship_requests: Vec::with_capacity(MAX_NEW_REQUESTS),
        }
    }

    /// Zero-fill the slot, then write `candidate`, matching the "slot first
    /// zero-filled, publish a memory fence" sequence of spec §4.6. The
    /// fence itself is the caller's `Ordering::Release` store to `found`
    /// (see `search::run_solver`); this call only prepares the bytes.
    pub fn write_auth_string(&mut self, dock_index: usize, candidate: &str) {
        assert!(candidate.len() <= MAX_CARGO.min(AUTH_STRING_LEN));
        let slot = &mut self.auth_strings[dock_index];
        slot.fill(0);
        let bytes = candidate.as_bytes();
        slot[..bytes.len()].copy_from_slice(bytes);
    }

    pub fn read_auth_string(&self, dock_index: usize) -> String {
        let slot = &self.auth_strings[dock_index];
        let end = slot.iter().position(|&b| b == 0).unwrap_or(slot.len());
        String::from_utf8_lossy(&slot[..end]).into_owned()
    }

    pub fn stage_arrivals(&mut self, requests: Vec<ShipRequestRecord>) {
        assert!(requests.len() <= MAX_NEW_REQUESTS);
        self.new_ship_requests = requests;
    }

    pub fn drain_arrivals(&mut self) -> Vec<ShipRequestRecord> {
        std::mem::take(&mut self.new_ship_requests)
    }
}

impl Default for SharedMemory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_then_read_round_trips() {
        let mut mem = SharedMemory::new();
        mem.write_auth_string(3, "5.7");
        assert_eq!(mem.read_auth_string(3), "5.7");
    }

    #[test]
    fn rewriting_a_shorter_string_clears_the_old_tail() {
        let mut mem = SharedMemory::new();
        mem.write_auth_string(0, "99999");
        mem.write_auth_string(0, "5");
        assert_eq!(mem.read_auth_string(0), "5");
    }

    #[test]
    fn drain_arrivals_empties_the_staged_batch() {
        let mut mem = SharedMemory::new();
        mem.stage_arrivals(vec![ShipRequestRecord {
            ship_id: ShipId(1),
            timestep: Timestep(0),
            category: Category(0),
            direction: Direction::Incoming,
            emergency: false,
            waiting_time: 0,
            cargo: vec![],
        }]);
        assert_eq!(mem.drain_arrivals().len(), 1);
        assert_eq!(mem.drain_arrivals().len(), 0);
    }
}
