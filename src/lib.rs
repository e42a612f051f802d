//! Port-dock scheduler core: admits ships into docks, sequences cargo moves
//! through cranes, and recovers per-berth auth strings by parallel
//! brute-force search once a ship is ready to leave.

pub mod auth;
pub mod cache_padded;
pub mod cli;
pub mod dock;
pub mod error;
pub mod ids;
pub mod ipc;
pub mod queue;
pub mod scheduler;
pub mod search;
pub mod shared_memory;
pub mod ship;
pub mod testcase;
pub mod undock;
