//! Dock table and dock state machine (spec §4.2, §4.3, §4.4).

use tracing::{debug, trace};

use crate::ids::{Category, CraneId, DockId, Timestep};
use crate::queue::{CategoryQueue, QueueStore};
use crate::ship::ShipRequest;

/// The dock's phase within a berth (spec §4.2).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DockAction {
    Idle,
    Moving,
    Finished,
}

/// A single cargo move emitted by `handle_cargo`, destined for the IPC
/// façade as a cargo message (spec §6 mtype=4).
#[derive(Copy, Clone, Debug)]
pub struct CargoMove {
    pub dock: DockId,
    pub cargo_index: usize,
    pub crane: CraneId,
}

pub struct Dock {
    pub id: DockId,
    pub category: Category,
    pub cranes: Vec<i32>,
    pub docked_ship: Option<ShipRequest>,
    pub action: DockAction,
    pub docked_at: Timestep,
    pub moved_cargo: usize,
}

impl Dock {
    pub fn new(id: DockId, category: Category, cranes: Vec<i32>) -> Self {
        assert!(cranes.len() <= 25, "at most 25 cranes per dock (spec §3)");
        Self {
            id,
            category,
            cranes,
            docked_ship: None,
            action: DockAction::Idle,
            docked_at: Timestep(0),
            moved_cargo: 0,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.action, DockAction::Idle) && self.docked_ship.is_none()
    }

    /// `dock_ships` (spec §4.3): scan emergency, then incoming, then
    /// outgoing, categories from `self.category` downward to 0, and admit
    /// the first eligible ship found. Only called when the dock is idle.
    pub fn try_dock(&mut self, queues: &mut QueueStore, now: Timestep) -> bool {
        debug_assert!(self.is_idle());

        if let Some(ship) = take_from_scan(&mut queues.emergency, self.category) {
            self.admit(ship, now);
            return true;
        }

        if let Some(ship) = take_from_incoming_scan(&mut queues.incoming, self.category, now) {
            self.admit(ship, now);
            return true;
        }

        if let Some(ship) = take_from_scan(&mut queues.outgoing, self.category) {
            self.admit(ship, now);
            return true;
        }

        false
    }

    fn admit(&mut self, ship: ShipRequest, now: Timestep) {
        trace!(dock = self.id.get(), ship = ship.id.get(), "dock: idle -> moving");
        self.docked_ship = Some(ship);
        self.docked_at = now;
        self.moved_cargo = 0;
        self.action = DockAction::Moving;
    }

    /// `handle_cargo` (spec §4.4): greedy heaviest-fit per crane. Returns the
    /// moves made this timestep, in crane order, for the caller to translate
    /// into cargo messages.
    pub fn handle_cargo(&mut self) -> Vec<CargoMove> {
        debug_assert!(matches!(self.action, DockAction::Moving));

        let mut moves = Vec::new();
        let num_cranes = self.category.get().min(self.cranes.len());

        let Some(ship) = self.docked_ship.as_mut() else {
            return moves;
        };

        if ship.num_cargo() == 0 {
            self.action = DockAction::Finished;
            self.moved_cargo = 0;
            return moves;
        }

        for i in 0..num_cranes {
            let capacity = self.cranes[i];

            if let Some(cargo_index) = ship.best_cargo_for_capacity(capacity) {
                ship.mark_moved(cargo_index);
                self.moved_cargo += 1;
                moves.push(CargoMove {
                    dock: self.id,
                    cargo_index,
                    crane: CraneId(i),
                });
            }

            if self.moved_cargo == ship.num_cargo() {
                debug!(dock = self.id.get(), "dock: moving -> finished");
                self.action = DockAction::Finished;
                self.moved_cargo = 0;
                break;
            }
        }

        moves
    }

    /// Transition finished -> awaiting-undock: compute the password length
    /// spec §4.2 requires (`currentTimestep - dockedTime - 1`) and hand back
    /// the docked ship so the caller can push an undock-queue entry.
    pub fn finish_to_undock(&mut self, now: Timestep) -> i64 {
        debug_assert!(matches!(self.action, DockAction::Finished));
        now.get() - self.docked_at.get() - 1
    }

    /// awaiting-undock -> idle: the parallel search succeeded.
    pub fn undock(&mut self) -> ShipRequest {
        let ship = self.docked_ship.take().expect("undock called without a docked ship");
        self.action = DockAction::Idle;
        ship
    }
}

/// Scan categories `dock_category..=0` downward for the first category with
/// an eligible head, pop it and return it. Used for emergency and outgoing
/// queues, neither of which ever age-expires.
fn take_from_scan(queue: &mut CategoryQueue, dock_category: Category) -> Option<ShipRequest> {
    for c in (0..=dock_category.get() as u8).rev() {
        let category = Category(c);
        if queue.has_eligible(category) {
            let ship = queue.peek(category).cloned();
            queue.pop(category);
            return ship;
        }
    }
    None
}

/// Same downward scan, for the incoming queue only: aging is re-applied as
/// each head is considered (spec §4.1 `peekEligible`, §4.3: "for the
/// incoming class only, aging is re-applied as the head is considered").
/// A sibling dock's pop earlier in this same timestep can expose a head that
/// was fresh when `age_expire_all_incoming` ran but has since become stale,
/// so this mirrors the original's `updatePopPointer` call right after
/// `poppointers[j]++` rather than trusting the once-per-timestep pass alone.
fn take_from_incoming_scan(
    queue: &mut CategoryQueue,
    dock_category: Category,
    now: Timestep,
) -> Option<ShipRequest> {
    for c in (0..=dock_category.get() as u8).rev() {
        let category = Category(c);
        queue.age_expired(category, now);
        if queue.has_eligible(category) {
            let ship = queue.peek(category).cloned();
            queue.pop(category);
            queue.age_expired(category, now);
            return ship;
        }
    }
    None
}

pub struct DockTable {
    pub docks: Vec<Dock>,
}

impl DockTable {
    pub fn new(docks: Vec<Dock>) -> Self {
        Self { docks }
    }
}
