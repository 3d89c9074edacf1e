//! The twelve PHB classes and their creation data.
//!
//! Saving throw proficiencies and skill options are used by the
//! [`CharacterBuilder`](crate::character_builder::CharacterBuilder).

use crate::character::{Ability, Skill};
use crate::error::SheetError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// D&D character classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CharacterClass {
    Barbarian,
    Bard,
    Cleric,
    Druid,
    Fighter,
    Monk,
    Paladin,
    Ranger,
    Rogue,
    Sorcerer,
    Warlock,
    Wizard,
}

/// Class-specific data for character creation.
pub struct ClassData {
    /// Saving throw proficiencies granted by the class.
    pub saving_throws: [Ability; 2],
    /// Number of skills to choose.
    pub skill_count: usize,
    /// Skills available to choose from.
    pub skill_options: &'static [Skill],
}

impl CharacterClass {
    pub fn name(&self) -> &'static str {
        match self {
            CharacterClass::Barbarian => "Barbarian",
            CharacterClass::Bard => "Bard",
            CharacterClass::Cleric => "Cleric",
            CharacterClass::Druid => "Druid",
            CharacterClass::Fighter => "Fighter",
            CharacterClass::Monk => "Monk",
            CharacterClass::Paladin => "Paladin",
            CharacterClass::Ranger => "Ranger",
            CharacterClass::Rogue => "Rogue",
            CharacterClass::Sorcerer => "Sorcerer",
            CharacterClass::Warlock => "Warlock",
            CharacterClass::Wizard => "Wizard",
        }
    }

    /// Get class data for character creation.
    pub fn data(&self) -> ClassData {
        match self {
            CharacterClass::Barbarian => ClassData {
                saving_throws: [Ability::Strength, Ability::Constitution],
                skill_count: 2,
                skill_options: &[
                    Skill::AnimalHandling,
                    Skill::Athletics,
                    Skill::Intimidation,
                    Skill::Nature,
                    Skill::Perception,
                    Skill::Survival,
                ],
            },
            CharacterClass::Bard => ClassData {
                saving_throws: [Ability::Dexterity, Ability::Charisma],
                skill_count: 3,
                skill_options: &Skill::ALL,
            },
            CharacterClass::Cleric => ClassData {
                saving_throws: [Ability::Wisdom, Ability::Charisma],
                skill_count: 2,
                skill_options: &[
                    Skill::History,
                    Skill::Insight,
                    Skill::Medicine,
                    Skill::Persuasion,
                    Skill::Religion,
                ],
            },
            CharacterClass::Druid => ClassData {
                saving_throws: [Ability::Intelligence, Ability::Wisdom],
                skill_count: 2,
                skill_options: &[
                    Skill::Arcana,
                    Skill::AnimalHandling,
                    Skill::Insight,
                    Skill::Medicine,
                    Skill::Nature,
                    Skill::Perception,
                    Skill::Religion,
                    Skill::Survival,
                ],
            },
            CharacterClass::Fighter => ClassData {
                saving_throws: [Ability::Strength, Ability::Constitution],
                skill_count: 2,
                skill_options: &[
                    Skill::Acrobatics,
                    Skill::AnimalHandling,
                    Skill::Athletics,
                    Skill::History,
                    Skill::Insight,
                    Skill::Intimidation,
                    Skill::Perception,
                    Skill::Survival,
                ],
            },
            CharacterClass::Monk => ClassData {
                saving_throws: [Ability::Strength, Ability::Dexterity],
                skill_count: 2,
                skill_options: &[
                    Skill::Acrobatics,
                    Skill::Athletics,
                    Skill::History,
                    Skill::Insight,
                    Skill::Religion,
                    Skill::Stealth,
                ],
            },
            CharacterClass::Paladin => ClassData {
                saving_throws: [Ability::Wisdom, Ability::Charisma],
                skill_count: 2,
                skill_options: &[
                    Skill::Athletics,
                    Skill::Insight,
                    Skill::Intimidation,
                    Skill::Medicine,
                    Skill::Persuasion,
                    Skill::Religion,
                ],
            },
            CharacterClass::Ranger => ClassData {
                saving_throws: [Ability::Strength, Ability::Dexterity],
                skill_count: 3,
                skill_options: &[
                    Skill::AnimalHandling,
                    Skill::Athletics,
                    Skill::Insight,
                    Skill::Investigation,
                    Skill::Nature,
                    Skill::Perception,
                    Skill::Stealth,
                    Skill::Survival,
                ],
            },
            CharacterClass::Rogue => ClassData {
                saving_throws: [Ability::Dexterity, Ability::Intelligence],
                skill_count: 4,
                skill_options: &[
                    Skill::Acrobatics,
                    Skill::Athletics,
                    Skill::Deception,
                    Skill::Insight,
                    Skill::Intimidation,
                    Skill::Investigation,
                    Skill::Perception,
                    Skill::Performance,
                    Skill::Persuasion,
                    Skill::SleightOfHand,
                    Skill::Stealth,
                ],
            },
            CharacterClass::Sorcerer => ClassData {
                saving_throws: [Ability::Constitution, Ability::Charisma],
                skill_count: 2,
                skill_options: &[
                    Skill::Arcana,
                    Skill::Deception,
                    Skill::Insight,
                    Skill::Intimidation,
                    Skill::Persuasion,
                    Skill::Religion,
                ],
            },
            CharacterClass::Warlock => ClassData {
                saving_throws: [Ability::Wisdom, Ability::Charisma],
                skill_count: 2,
                skill_options: &[
                    Skill::Arcana,
                    Skill::Deception,
                    Skill::History,
                    Skill::Intimidation,
                    Skill::Investigation,
                    Skill::Nature,
                    Skill::Religion,
                ],
            },
            CharacterClass::Wizard => ClassData {
                saving_throws: [Ability::Intelligence, Ability::Wisdom],
                skill_count: 2,
                skill_options: &[
                    Skill::Arcana,
                    Skill::History,
                    Skill::Insight,
                    Skill::Investigation,
                    Skill::Medicine,
                    Skill::Religion,
                ],
            },
        }
    }

    /// Get all character classes.
    pub fn all() -> &'static [CharacterClass] {
        &[
            CharacterClass::Barbarian,
            CharacterClass::Bard,
            CharacterClass::Cleric,
            CharacterClass::Druid,
            CharacterClass::Fighter,
            CharacterClass::Monk,
            CharacterClass::Paladin,
            CharacterClass::Ranger,
            CharacterClass::Rogue,
            CharacterClass::Sorcerer,
            CharacterClass::Warlock,
            CharacterClass::Wizard,
        ]
    }
}

impl fmt::Display for CharacterClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for CharacterClass {
    type Err = SheetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        CharacterClass::all()
            .iter()
            .copied()
            .find(|class| class.name().eq_ignore_ascii_case(key))
            .ok_or_else(|| SheetError::UnknownClass(s.to_string()))
    }
}
