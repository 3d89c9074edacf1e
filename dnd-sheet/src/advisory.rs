//! Non-fatal validation messages.
//!
//! Nothing in a resolution pass is allowed to abort it. When input is
//! questionable (too many improvement points, an unknown fighting style, a
//! token name the class does not have) the offending adjustment is skipped
//! and an [`Advisory`] is recorded instead. The pass always completes.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A human-readable warning about survivable input.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum Advisory {
    #[error("Ability score improvements total {granted} points, but level {level} allows {allowed}")]
    ImprovementCapExceeded { level: u8, granted: u32, allowed: u32 },

    #[error("{class} has no resource named '{name}'")]
    UnknownToken { class: String, name: String },

    #[error("{pool} is not available yet")]
    PoolLocked { pool: String },

    #[error("{pool} has {available} remaining, cannot spend {requested}")]
    PoolExhausted {
        pool: String,
        available: u32,
        requested: u32,
    },

    #[error("No spell slots of level {0}")]
    InvalidSpellLevel(u8),

    #[error("'{0}' is not a recognized fighting style")]
    InvalidFightingStyle(String),

    #[error("Fighting style '{0}' chosen more than once")]
    DuplicateFightingStyle(String),

    #[error("Only {allowed} fighting style(s) allowed at this level; ignoring '{style}'")]
    ExtraFightingStyle { style: String, allowed: usize },

    #[error("'{0}' is not an equipment slot")]
    InvalidEquipmentSlot(String),

    #[error("'{0}' is not carried by this character")]
    UnknownItem(String),

    #[error("'{0}' is not a skill")]
    UnknownSkill(String),

    #[error("Expertise in {0} requested more than once")]
    DuplicateExpertise(String),
}

/// Collects advisories raised during a pass and forwards each one to the
/// `tracing` log as it arrives.
#[derive(Debug, Default)]
pub struct Advisories {
    entries: Vec<Advisory>,
    quiet: bool,
}

impl Advisories {
    pub fn new() -> Self {
        Self::default()
    }

    /// A collector that records advisories without logging them.
    pub fn quiet() -> Self {
        Self {
            entries: Vec::new(),
            quiet: true,
        }
    }

    pub fn report(&mut self, advisory: Advisory) {
        if !self.quiet {
            tracing::warn!(%advisory, "advisory");
        }
        self.entries.push(advisory);
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Advisory> {
        self.entries.iter()
    }

    pub fn into_vec(self) -> Vec<Advisory> {
        self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_collects_in_order() {
        let mut advisories = Advisories::quiet();
        advisories.report(Advisory::UnknownSkill("Juggling".to_string()));
        advisories.report(Advisory::InvalidEquipmentSlot("belt".to_string()));

        assert_eq!(advisories.len(), 2);
        let entries = advisories.into_vec();
        assert_eq!(entries[0], Advisory::UnknownSkill("Juggling".to_string()));
        assert_eq!(
            entries[1],
            Advisory::InvalidEquipmentSlot("belt".to_string())
        );
    }

    #[test]
    fn test_advisory_messages() {
        let advisory = Advisory::PoolExhausted {
            pool: "Rage".to_string(),
            available: 0,
            requested: 1,
        };
        assert_eq!(advisory.to_string(), "Rage has 0 remaining, cannot spend 1");

        let advisory = Advisory::ImprovementCapExceeded {
            level: 4,
            granted: 4,
            allowed: 2,
        };
        assert!(advisory.to_string().contains("level 4 allows 2"));
    }
}
