//! The scheduler loop (spec §4.7): receive batch, enqueue, age-expire, dock,
//! move cargo, undock, advance. Owns every piece of mutable state; solver
//! workers borrow it only for the duration of one auth search.

use tracing::{debug, info};

use crate::dock::{Dock, DockAction, DockTable};
use crate::error::SchedulerError;
use crate::ids::{DockId, Timestep};
use crate::ipc::{SolverLink, SolverOracle, ValidatorEvent, ValidatorLink};
use crate::queue::QueueStore;
use crate::search::{self, PasswordOracle};
use crate::shared_memory::SharedMemory;
use crate::ship::Direction;
use crate::undock::{UndockEntry, UndockQueue};

/// Candidate tables are only materialized for lengths 1..10 (spec §3
/// "Lifecycles", §7). A length at or beyond this still gets searched, just
/// without a precomputed table backing it.
const MAX_TABLE_LENGTH: usize = 10;

pub struct Scheduler {
    queues: QueueStore,
    docks: DockTable,
    undock: UndockQueue,
    shared_memory: SharedMemory,
}

impl Scheduler {
    pub fn new(docks: Vec<Dock>) -> Self {
        Self {
            queues: QueueStore::new(),
            docks: DockTable::new(docks),
            undock: UndockQueue::new(),
            shared_memory: SharedMemory::new(),
        }
    }

    /// Run until the validator signals termination (spec §4.7, §7: clean
    /// exit, not an error) or an IPC call fails (fatal).
    pub fn run(
        &mut self,
        validator: &ValidatorLink,
        solvers: &[SolverLink],
    ) -> Result<(), SchedulerError> {
        loop {
            let batch = validator.recv_batch()?;

            if batch.is_finished {
                info!(timestep = batch.timestep.get(), "validator requested shutdown");
                return Ok(());
            }

            self.ingest_arrivals(batch.num_ship_requests);
            self.queues.age_expire_all_incoming(batch.timestep);

            for index in 0..self.docks.docks.len() {
                self.advance_dock(index, batch.timestep, validator)?;
            }

            self.drain_undock_queue(validator, solvers)?;

            validator.send(ValidatorEvent::Advance)?;
        }
    }

    /// Copy arrivals staged in shared memory into the per-category queues
    /// (spec §4.7 step 2).
    fn ingest_arrivals(&mut self, expected: usize) {
        let records = self.shared_memory.drain_arrivals();
        debug_assert_eq!(records.len(), expected, "validator promised a different batch size");

        for record in records {
            let emergency = record.emergency;
            let direction = record.direction;
            let ship = record.into();

            if emergency {
                self.queues.emergency.push(ship);
            } else {
                match direction {
                    Direction::Incoming => self.queues.incoming.push(ship),
                    Direction::Outgoing => self.queues.outgoing.push(ship),
                }
            }
        }
    }

    /// Advance one dock exactly one step (spec §4.2, §9 open question (b):
    /// one action per dock per timestep, chosen by its current state).
    fn advance_dock(
        &mut self,
        index: usize,
        now: Timestep,
        validator: &ValidatorLink,
    ) -> Result<(), SchedulerError> {
        let dock = &mut self.docks.docks[index];

        match dock.action {
            DockAction::Idle => {
                if dock.try_dock(&mut self.queues, now) {
                    let ship = dock.docked_ship.as_ref().expect("try_dock admitted a ship");
                    validator.send(ValidatorEvent::Dock {
                        dock: dock.id,
                        ship: ship.id,
                        direction: ship.direction,
                    })?;
                }
            }
            DockAction::Moving => {
                let moves = dock.handle_cargo();
                let ship = dock.docked_ship.as_ref().expect("moving dock has a docked ship");
                for mv in moves {
                    validator.send(ValidatorEvent::Cargo {
                        dock: mv.dock,
                        ship: ship.id,
                        direction: ship.direction,
                        cargo_id: mv.cargo_index,
                        crane: mv.crane,
                    })?;
                }
            }
            DockAction::Finished => {
                let password_length = dock.finish_to_undock(now);
                debug!(dock = dock.id.get(), password_length, "dock: finished -> awaiting-undock");
                self.undock.push(UndockEntry { dock: dock.id, password_length });
            }
        }

        Ok(())
    }

    /// Drain every entry queued this timestep, running one parallel auth
    /// search per entry in FIFO order (spec §4.7 step 5, §4.6).
    fn drain_undock_queue(
        &mut self,
        validator: &ValidatorLink,
        solvers: &[SolverLink],
    ) -> Result<(), SchedulerError> {
        for entry in self.undock.drain_all() {
            self.resolve_undock(entry, validator, solvers)?;
        }
        Ok(())
    }

    fn resolve_undock(
        &mut self,
        entry: UndockEntry,
        validator: &ValidatorLink,
        solvers: &[SolverLink],
    ) -> Result<(), SchedulerError> {
        for link in solvers {
            link.send_dock_info(entry.dock)?;
        }

        let oracles: Vec<SolverOracle<'_>> =
            solvers.iter().map(|link| SolverOracle { link }).collect();
        let oracle_refs: Vec<&dyn PasswordOracle> =
            oracles.iter().map(|o| o as &dyn PasswordOracle).collect();

        let length = usize::try_from(entry.password_length).unwrap_or(0);

        if length >= MAX_TABLE_LENGTH {
            tracing::warn!(
                dock = entry.dock.get(),
                length,
                "auth string length exceeds the 10-character candidate table; search proceeds bounded by the table size"
            );
        }

        let winner = search::search(entry.dock, length, &oracle_refs);

        let Some(candidate) = winner else {
            tracing::error!(dock = entry.dock.get(), length, "auth search exhausted without a match");
            return Ok(());
        };

        self.write_winning_string(entry.dock, &candidate);

        let ship = self.docks.docks[entry.dock.get()].undock();
        validator.send(ValidatorEvent::Undock {
            dock: entry.dock,
            ship: ship.id,
            direction: ship.direction,
        })?;

        Ok(())
    }

    /// Zero-fill, write, and fence before the undocking message is sent
    /// (spec §4.6, §5: "a full memory fence is issued after writing the
    /// auth string ... before sending the undocking message").
    fn write_winning_string(&mut self, dock: DockId, candidate: &str) {
        self.shared_memory.write_auth_string(dock.get(), candidate);
        std::sync::atomic::fence(std::sync::atomic::Ordering::Release);
    }

    pub fn shared_memory_mut(&mut self) -> &mut SharedMemory {
        &mut self.shared_memory
    }

    pub fn docks(&self) -> &[Dock] {
        &self.docks.docks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::{Category, ShipId};
    use crate::shared_memory::ShipRequestRecord;
    use crossbeam_channel::unbounded;

    fn single_dock_scheduler() -> Scheduler {
        let dock = Dock::new(DockId(0), Category(1), vec![10]);
        Scheduler::new(vec![dock])
    }

    fn solver_link_always_correct(target: &'static str) -> (SolverLink, std::thread::JoinHandle<()>) {
        let (cmd_tx, cmd_rx) = unbounded();
        let (verdict_tx, verdict_rx) = unbounded();
        let handle = std::thread::spawn(move || {
            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    crate::ipc::SolverCommand::DockInfo { .. } => {}
                    crate::ipc::SolverCommand::Guess { candidate, .. } => {
                        let _ = verdict_tx.send(crate::ipc::SolverVerdict {
                            correct: candidate == target,
                        });
                    }
                }
            }
        });
        (SolverLink { commands: cmd_tx, verdicts: verdict_rx }, handle)
    }

    #[test]
    fn full_single_dock_single_cargo_scenario() {
        let mut scheduler = single_dock_scheduler();
        let (batch_tx, batch_rx) = unbounded();
        let (event_tx, event_rx) = unbounded();
        let validator = ValidatorLink { batches: batch_rx, events: event_tx };

        let (solver_link, solver_handle) = solver_link_always_correct("5");
        let solvers = vec![solver_link];

        scheduler.shared_memory_mut().stage_arrivals(vec![ShipRequestRecord {
            ship_id: ShipId(1),
            timestep: Timestep(0),
            category: Category(0),
            direction: Direction::Incoming,
            emergency: false,
            waiting_time: 100,
            cargo: vec![7],
        }]);
        batch_tx
            .send(crate::ipc::NewBatch { timestep: Timestep(0), num_ship_requests: 1, is_finished: false })
            .unwrap();
        batch_tx
            .send(crate::ipc::NewBatch { timestep: Timestep(1), num_ship_requests: 0, is_finished: false })
            .unwrap();
        batch_tx
            .send(crate::ipc::NewBatch { timestep: Timestep(2), num_ship_requests: 0, is_finished: false })
            .unwrap();
        batch_tx
            .send(crate::ipc::NewBatch { timestep: Timestep(3), num_ship_requests: 0, is_finished: true })
            .unwrap();

        scheduler.run(&validator, &solvers).unwrap();
        drop(validator);
        drop(scheduler);
        drop(solvers);
        solver_handle.join().unwrap();

        let events: Vec<_> = event_rx.try_iter().collect();
        let dock_events = events
            .iter()
            .filter(|e| matches!(e, ValidatorEvent::Dock { .. }))
            .count();
        let cargo_events = events
            .iter()
            .filter(|e| matches!(e, ValidatorEvent::Cargo { .. }))
            .count();
        let undock_events = events
            .iter()
            .filter(|e| matches!(e, ValidatorEvent::Undock { .. }))
            .count();

        assert_eq!(dock_events, 1);
        assert_eq!(cargo_events, 1);
        assert_eq!(undock_events, 1);
    }
}
