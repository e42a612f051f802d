//! Ship requests: the immutable-once-admitted records the validator hands
//! the scheduler (spec §3 "Ship request").

use crate::ids::{Category, ShipId, Timestep};

/// Sentinel written over a cargo entry once it has been moved by a crane.
/// Compares less than any legal weight, so it can never satisfy a crane's
/// "largest weight `<=` capacity" predicate again.
pub const MOVED_SENTINEL: i32 = -2;

#[derive(Copy, Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Direction {
    Incoming,
    Outgoing,
}

impl Direction {
    /// The wire encoding used by the validator protocol (spec §6): +1/-1.
    pub const fn wire(self) -> i32 {
        match self {
            Direction::Incoming => 1,
            Direction::Outgoing => -1,
        }
    }

    pub const fn from_wire(value: i32) -> Option<Self> {
        match value {
            1 => Some(Direction::Incoming),
            -1 => Some(Direction::Outgoing),
            _ => None,
        }
    }
}

/// Maximum cargo entries carried on the wire per ship (spec §3: "≤ 200").
pub const MAX_CARGO: usize = 200;

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct ShipRequest {
    pub id: ShipId,
    pub arrival_timestep: Timestep,
    pub category: Category,
    pub direction: Direction,
    pub emergency: bool,
    pub waiting_time: i64,
    pub cargo: Vec<i32>,
}

impl ShipRequest {
    pub fn num_cargo(&self) -> usize {
        self.cargo.len()
    }

    /// Whether this ship is still eligible to be admitted at `now`, per the
    /// waiting-time budget (spec §3 invariant). Emergency ships and outgoing
    /// ships are never subject to this expiry; this helper only applies to
    /// non-emergency incoming ships, matching `ageExpired`'s caller.
    pub fn incoming_expired(&self, now: Timestep) -> bool {
        debug_assert!(matches!(self.direction, Direction::Incoming) && !self.emergency);
        self.arrival_timestep.get() + self.waiting_time < now.get()
    }

    /// Find the cargo entry with the largest weight `<= capacity` that has
    /// not yet been moved, breaking ties by smallest index. Used by crane
    /// assignment (spec §4.4).
    pub fn best_cargo_for_capacity(&self, capacity: i32) -> Option<usize> {
        let mut best: Option<(usize, i32)> = None;
        for (index, &weight) in self.cargo.iter().enumerate() {
            if weight <= capacity && weight != MOVED_SENTINEL {
                match best {
                    Some((_, best_weight)) if weight <= best_weight => {}
                    _ => best = Some((index, weight)),
                }
            }
        }
        best.map(|(index, _)| index)
    }

    pub fn mark_moved(&mut self, cargo_index: usize) {
        self.cargo[cargo_index] = MOVED_SENTINEL;
    }

    pub fn all_cargo_moved(&self) -> bool {
        self.cargo.iter().all(|&w| w == MOVED_SENTINEL)
    }
}
