//! Parallel brute-force auth-string search (spec §4.5, §4.6).
//!
//! One solver thread per partition of the candidate space, spawned fresh
//! for each dock waiting to undock. Every solver checks a single shared
//! `found` flag between guesses so that once any solver's guess is
//! confirmed, its siblings abandon their partition instead of exhausting it.
//! Each thread owns a dedicated oracle (backed by that solver's own channel
//! in production) so workers never contend for the same channel.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use tracing::{info, trace};

use crate::auth::{candidate_at, guessing_ranges};
use crate::cache_padded::CachePadded;
use crate::ids::{DockId, SolverId};

/// Anything that can judge a candidate auth-string correct. In production
/// this forwards the guess to the external validator over a solver's
/// dedicated IPC link (spec §6); tests and benchmarks can supply a plain
/// closure.
pub trait PasswordOracle: Sync {
    fn check(&self, dock: DockId, candidate: &str) -> bool;
}

impl<F: Fn(&str) -> bool + Sync> PasswordOracle for F {
    fn check(&self, _dock: DockId, candidate: &str) -> bool {
        self(candidate)
    }
}

/// Search for `dock`'s auth string of the given `length`, partitioning the
/// candidate space across `oracles.len()` threads, one per solver. Returns
/// the winning candidate, or `None` if the space was exhausted without a
/// match (the original never observes this path since the validator's
/// password is always a valid member of the space, but an empty range from
/// a misconfigured solver count must still terminate cleanly).
pub fn search(dock: DockId, length: usize, oracles: &[&dyn PasswordOracle]) -> Option<String> {
    let ranges = guessing_ranges(length, oracles.len());
    let found = CachePadded::from(AtomicBool::new(false));
    let winner: Mutex<Option<String>> = Mutex::new(None);

    std::thread::scope(|scope| {
        for (solver_id, (range, oracle)) in ranges.into_iter().zip(oracles.iter()).enumerate() {
            let found = &found;
            let winner = &winner;
            scope.spawn(move || {
                run_solver(SolverId(solver_id), dock, length, range, found, winner, *oracle);
            });
        }
    });

    winner.into_inner().expect("search mutex was poisoned")
}

fn run_solver(
    solver_id: SolverId,
    dock: DockId,
    length: usize,
    range: crate::auth::GuessRange,
    found: &CachePadded<AtomicBool>,
    winner: &Mutex<Option<String>>,
    oracle: &dyn PasswordOracle,
) {
    if range.is_empty() {
        return;
    }

    trace!(solver = solver_id.get(), dock = dock.get(), range = ?range, "solver: starting partition");

    for index in range.start..range.end {
        if found.load(Ordering::Acquire) {
            return;
        }

        let candidate = candidate_at(length, index);
        if oracle.check(dock, &candidate) {
            let mut guard = winner.lock().expect("search mutex was poisoned");
            if guard.is_none() {
                *guard = Some(candidate.clone());
                found.store(true, Ordering::Release);
                info!(solver = solver_id.get(), dock = dock.get(), "solver: found auth string");
            }
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform_oracles(n: usize, target: &'static str) -> Vec<impl PasswordOracle> {
        (0..n).map(move |_| move |candidate: &str| candidate == target).collect()
    }

    #[test]
    fn finds_the_planted_password() {
        let oracles = uniform_oracles(4, "5.7");
        let refs: Vec<&dyn PasswordOracle> = oracles.iter().map(|o| o as &dyn PasswordOracle).collect();
        let found = search(DockId(0), 3, &refs);
        assert_eq!(found.as_deref(), Some("5.7"));
    }

    #[test]
    fn returns_none_when_length_is_zero() {
        let oracles = uniform_oracles(4, "unreachable");
        let refs: Vec<&dyn PasswordOracle> = oracles.iter().map(|o| o as &dyn PasswordOracle).collect();
        let found = search(DockId(0), 0, &refs);
        assert_eq!(found, None);
    }

    #[test]
    fn single_solver_exhausts_whole_space() {
        let oracles = uniform_oracles(1, "99");
        let refs: Vec<&dyn PasswordOracle> = oracles.iter().map(|o| o as &dyn PasswordOracle).collect();
        let found = search(DockId(0), 2, &refs);
        assert_eq!(found.as_deref(), Some("99"));
    }

    #[test]
    fn more_solvers_than_candidates_still_finds_it() {
        let oracles = uniform_oracles(8, "5");
        let refs: Vec<&dyn PasswordOracle> = oracles.iter().map(|o| o as &dyn PasswordOracle).collect();
        let found = search(DockId(0), 1, &refs);
        assert_eq!(found.as_deref(), Some("5"));
    }
}
