//! Testcase input file parsing (spec §6).
//!
//! Layout, whitespace-separated integers in order: sharedMemoryKey,
//! messageQueueKey, solverCount S, S solver-queue keys, dockCount D, then for
//! each of D docks an integer category c followed by c crane capacities.

use crate::error::StartupError;
use crate::ids::Category;

#[derive(Debug, Clone)]
pub struct DockConfig {
    pub category: Category,
    pub cranes: Vec<i32>,
}

#[derive(Debug, Clone)]
pub struct Testcase {
    pub shared_memory_key: i32,
    pub message_queue_key: i32,
    pub solver_keys: Vec<i32>,
    pub docks: Vec<DockConfig>,
}

struct Tokens<'a> {
    path: &'a str,
    values: std::vec::IntoIter<i64>,
}

impl<'a> Tokens<'a> {
    fn next(&mut self, field: &str) -> Result<i64, StartupError> {
        self.values.next().ok_or_else(|| StartupError::Testcase {
            path: self.path.to_string(),
            reason: format!("ran out of input while reading {field}"),
        })
    }

    fn next_usize(&mut self, field: &str) -> Result<usize, StartupError> {
        let value = self.next(field)?;
        usize::try_from(value).map_err(|_| StartupError::Testcase {
            path: self.path.to_string(),
            reason: format!("{field} must be non-negative, got {value}"),
        })
    }
}

impl Testcase {
    pub fn parse(path: &str, contents: &str) -> Result<Self, StartupError> {
        let values = contents
            .split_ascii_whitespace()
            .map(|token| {
                token.parse::<i64>().map_err(|_| StartupError::Testcase {
                    path: path.to_string(),
                    reason: format!("not an integer: {token:?}"),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut tokens = Tokens { path, values: values.into_iter() };

        let shared_memory_key = tokens.next("sharedMemoryKey")? as i32;
        let message_queue_key = tokens.next("messageQueueKey")? as i32;

        let solver_count = tokens.next_usize("solverCount")?;
        let solver_keys = (0..solver_count)
            .map(|_| tokens.next("solverQueueKey").map(|v| v as i32))
            .collect::<Result<Vec<_>, _>>()?;

        let dock_count = tokens.next_usize("dockCount")?;
        let docks = (0..dock_count)
            .map(|_| {
                let category = tokens.next_usize("dock category")?;
                if category > Category::MAX as usize {
                    return Err(StartupError::Testcase {
                        path: path.to_string(),
                        reason: format!("dock category {category} exceeds max {}", Category::MAX),
                    });
                }
                let cranes = (0..category)
                    .map(|_| tokens.next("crane capacity").map(|v| v as i32))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(DockConfig { category: Category(category as u8), cranes })
            })
            .collect::<Result<Vec<_>, StartupError>>()?;

        Ok(Testcase { shared_memory_key, message_queue_key, solver_keys, docks })
    }

    pub fn read(path: &str) -> Result<Self, StartupError> {
        let contents = std::fs::read_to_string(path).map_err(|err| StartupError::Testcase {
            path: path.to_string(),
            reason: err.to_string(),
        })?;
        Self::parse(path, &contents)
    }
}
