//! Typed ID wrappers for compile-time type safety.
//!
//! Leave requests are keyed by UUIDs minted when the request is submitted.
//! Employees, departments and positions carry the numeric keys issued by the
//! directory that owns those records.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Unique identifier for a leave request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LeaveRequestId(Uuid);

impl LeaveRequestId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for LeaveRequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for LeaveRequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for LeaveRequestId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Macro to generate numeric ID wrappers for directory-issued keys.
macro_rules! numeric_id {
    ($name:ident, $doc:literal) => {
        #[doc = $doc]
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            pub const fn value(&self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.trim().parse()?))
            }
        }
    };
}

numeric_id!(UserId, "Unique identifier for an employee account.");
numeric_id!(DepartmentId, "Unique identifier for a department.");
numeric_id!(PositionId, "Unique identifier for a job position.");
