//! Message schemas for the validator and solver channels (spec §6).
//!
//! The real transport, System V message queues keyed by the testcase file,
//! is explicitly out of scope (spec §1); only the schema and a blocking,
//! bounded-channel façade standing in for it live here.

use crossbeam_channel::{Receiver, Sender};

use crate::error::SchedulerError;
use crate::ids::{CraneId, DockId, ShipId, Timestep};
use crate::ship::Direction;

/// Incoming mtype=1 payload: a batch of arrivals has been copied into the
/// shared-memory buffer, or the validator is terminating the run.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct NewBatch {
    pub timestep: Timestep,
    pub num_ship_requests: usize,
    pub is_finished: bool,
}

/// Outgoing validator messages, mtypes 2 through 5.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub enum ValidatorEvent {
    Dock { dock: DockId, ship: ShipId, direction: Direction },
    Undock { dock: DockId, ship: ShipId, direction: Direction },
    Cargo { dock: DockId, ship: ShipId, direction: Direction, cargo_id: usize, crane: CraneId },
    Advance,
}

/// The scheduler's end of the validator channel pair.
pub struct ValidatorLink {
    pub batches: Receiver<NewBatch>,
    pub events: Sender<ValidatorEvent>,
}

impl ValidatorLink {
    pub fn recv_batch(&self) -> Result<NewBatch, SchedulerError> {
        self.batches
            .recv()
            .map_err(|err| SchedulerError::Ipc(format!("validator channel closed: {err}")))
    }

    pub fn send(&self, event: ValidatorEvent) -> Result<(), SchedulerError> {
        self.events
            .send(event)
            .map_err(|err| SchedulerError::Ipc(format!("validator channel closed: {err}")))
    }
}

/// Outgoing solver messages, mtypes 1 and 2.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub enum SolverCommand {
    DockInfo { dock: DockId },
    Guess { dock: DockId, candidate: String },
}

/// Incoming solver message, mtype=3.
#[derive(Copy, Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct SolverVerdict {
    pub correct: bool,
}

/// One solver's dedicated channel pair (spec §5: "workers do not contend
/// for the same channel").
pub struct SolverLink {
    pub commands: Sender<SolverCommand>,
    pub verdicts: Receiver<SolverVerdict>,
}

impl SolverLink {
    pub fn send_dock_info(&self, dock: DockId) -> Result<(), SchedulerError> {
        self.commands
            .send(SolverCommand::DockInfo { dock })
            .map_err(|err| SchedulerError::Ipc(format!("solver channel closed: {err}")))
    }

    /// Send a guess and block for the solver's verdict (spec §4.6: "block
    /// for the solver's verdict").
    pub fn guess(&self, dock: DockId, candidate: &str) -> Result<bool, SchedulerError> {
        self.commands
            .send(SolverCommand::Guess { dock, candidate: candidate.to_string() })
            .map_err(|err| SchedulerError::Ipc(format!("solver channel closed: {err}")))?;
        let verdict = self
            .verdicts
            .recv()
            .map_err(|err| SchedulerError::Ipc(format!("solver channel closed: {err}")))?;
        Ok(verdict.correct)
    }
}

/// A guess-and-verdict oracle backed by a live [`SolverLink`]. Bridges the
/// blocking channel protocol to [`crate::search::PasswordOracle`].
pub struct SolverOracle<'a> {
    pub link: &'a SolverLink,
}

impl crate::search::PasswordOracle for SolverOracle<'_> {
    fn check(&self, dock: DockId, candidate: &str) -> bool {
        match self.link.guess(dock, candidate) {
            Ok(correct) => correct,
            Err(err) => {
                tracing::error!(%err, dock = dock.get(), "solver channel failed mid-search");
                false
            }
        }
    }
}
