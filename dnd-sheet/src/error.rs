//! Structural errors raised at loading boundaries.
//!
//! The resolution pipeline never returns these. They come from the loader,
//! the builder, and the class registry, when input cannot be read as a
//! character at all.

use crate::character::{Ability, Skill};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SheetError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown class: {0}")]
    UnknownClass(String),

    #[error("Character name is required")]
    MissingName,

    #[error("Class selection is required")]
    MissingClass,

    #[error("Expected {expected} class skills, got {got}")]
    InvalidSkillCount { expected: usize, got: usize },

    #[error("Level {0} is outside 1-20")]
    InvalidLevel(u8),

    #[error("{ability} base score {score} is outside 1-20")]
    InvalidScore { ability: Ability, score: u8 },

    #[error("Ability slot {index} holds {found}, expected {expected}")]
    AbilityOrder {
        index: usize,
        expected: Ability,
        found: Ability,
    },

    #[error("Skill slot {index} holds {found}, expected {expected}")]
    SkillOrder {
        index: usize,
        expected: Skill,
        found: Skill,
    },

    #[error("Weapon '{weapon}' has a custom bonus of {bonus}, outside -{max}..={max}", max = crate::loader::MAX_CUSTOM_BONUS)]
    InvalidWeaponBonus { weapon: String, bonus: i8 },

    #[error("Armor '{armor}' has a base AC of {base_ac}, above {max}", max = crate::loader::MAX_ARMOR_BASE_AC)]
    InvalidArmorClass { armor: String, base_ac: u8 },

    #[error("Skill {0} is not available for this class")]
    SkillNotAvailable(Skill),

    #[error("Resource '{name}' has {available} available but a maximum of {maximum}")]
    InvalidPool {
        name: String,
        available: u32,
        maximum: u32,
    },
}
