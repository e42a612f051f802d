//! Newtype identifiers used throughout the scheduler.
//!
//! Small `Copy` wrappers around an integer so that ship, dock, crane and
//! solver indices can't be mixed up at a call site even though they're all
//! plain integers on the wire.

use std::fmt;

macro_rules! id_type {
    ($name:ident, $inner:ty) => {
        #[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
        pub struct $name(pub $inner);

        impl $name {
            pub const fn get(self) -> $inner {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<$inner> for $name {
            fn from(value: $inner) -> Self {
                Self(value)
            }
        }
    };
}

id_type!(ShipId, i64);
id_type!(DockId, usize);
id_type!(CraneId, usize);
id_type!(SolverId, usize);

/// A category in `[0, 25]`, shared between ships and docks.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
pub struct Category(pub u8);

impl Category {
    pub const MAX: u8 = 25;

    pub const fn get(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// The discrete global timestep the scheduler advances in lock-step with
/// the validator.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default, serde::Serialize, serde::Deserialize)]
pub struct Timestep(pub i64);

impl Timestep {
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for Timestep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}
