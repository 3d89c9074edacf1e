//! Die types and hit-dice formulas.
//!
//! The resolution engine never rolls dice; it only needs to describe a
//! character's hit dice (`"5d10"`) for the sheet.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error type for hit-dice parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiceError {
    #[error("Invalid dice notation: {0}")]
    InvalidNotation(String),
    #[error("Invalid die size: {0}")]
    InvalidDieSize(u32),
    #[error("No dice specified")]
    NoDice,
}

/// Standard D&D die types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DieType {
    D4,
    D6,
    D8,
    D10,
    D12,
    D20,
    D100,
}

impl DieType {
    pub fn sides(&self) -> u32 {
        match self {
            DieType::D4 => 4,
            DieType::D6 => 6,
            DieType::D8 => 8,
            DieType::D10 => 10,
            DieType::D12 => 12,
            DieType::D20 => 20,
            DieType::D100 => 100,
        }
    }

    pub fn from_sides(sides: u32) -> Option<DieType> {
        match sides {
            4 => Some(DieType::D4),
            6 => Some(DieType::D6),
            8 => Some(DieType::D8),
            10 => Some(DieType::D10),
            12 => Some(DieType::D12),
            20 => Some(DieType::D20),
            100 => Some(DieType::D100),
            _ => None,
        }
    }
}

impl fmt::Display for DieType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "d{}", self.sides())
    }
}

/// A pool of identical hit dice, e.g. `5d10` for a level 5 fighter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HitDice {
    pub count: u8,
    pub die: DieType,
}

impl HitDice {
    pub fn new(count: u8, die: DieType) -> Self {
        Self { count, die }
    }
}

impl fmt::Display for HitDice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.count, self.die)
    }
}

impl FromStr for HitDice {
    type Err = DiceError;

    fn from_str(notation: &str) -> Result<Self, Self::Err> {
        let notation = notation.trim().to_lowercase();
        if notation.is_empty() {
            return Err(DiceError::NoDice);
        }

        let (count, sides) = notation
            .split_once('d')
            .ok_or_else(|| DiceError::InvalidNotation(notation.clone()))?;

        let count: u8 = if count.is_empty() {
            1
        } else {
            count
                .parse()
                .map_err(|_| DiceError::InvalidNotation(notation.clone()))?
        };
        let sides: u32 = sides
            .parse()
            .map_err(|_| DiceError::InvalidNotation(notation.clone()))?;
        let die = DieType::from_sides(sides).ok_or(DiceError::InvalidDieSize(sides))?;

        Ok(Self { count, die })
    }
}
