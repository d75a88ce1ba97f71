//! Extruder position value object
//!
//! Positions are small non-negative integers that travel as strings in metadata
//! (`"0"`, `"1"`, ...). Ordering is numeric so aggregation over extruders is
//! deterministic.

use std::str::FromStr;

use crate::error::StackError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ExtruderPosition(u32);

impl ExtruderPosition {
    pub fn new(index: u32) -> Self {
        Self(index)
    }

    pub fn index(&self) -> u32 {
        self.0
    }
}

impl FromStr for ExtruderPosition {
    type Err = StackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u32>()
            .map(ExtruderPosition)
            .map_err(|_| StackError::InvalidPosition {
                value: s.to_string(),
            })
    }
}

impl std::fmt::Display for ExtruderPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
