//! Class name to rule module lookup.

use crate::class_data::CharacterClass;
use crate::classes::{
    Barbarian, Bard, ClassRules, Cleric, Druid, Fighter, Monk, Paladin, Ranger, Rogue, Sorcerer,
    Warlock, Wizard,
};
use crate::error::SheetError;

impl CharacterClass {
    /// The rule module for this class.
    pub fn rules(&self) -> Box<dyn ClassRules> {
        match self {
            CharacterClass::Barbarian => Box::new(Barbarian),
            CharacterClass::Bard => Box::new(Bard),
            CharacterClass::Cleric => Box::new(Cleric),
            CharacterClass::Druid => Box::new(Druid),
            CharacterClass::Fighter => Box::new(Fighter),
            CharacterClass::Monk => Box::new(Monk),
            CharacterClass::Paladin => Box::new(Paladin),
            CharacterClass::Ranger => Box::new(Ranger),
            CharacterClass::Rogue => Box::new(Rogue),
            CharacterClass::Sorcerer => Box::new(Sorcerer),
            CharacterClass::Warlock => Box::new(Warlock),
            CharacterClass::Wizard => Box::new(Wizard),
        }
    }
}

/// Look up the rule module for a class name, ignoring case.
pub fn rules_for(class_name: &str) -> Result<Box<dyn ClassRules>, SheetError> {
    let class: CharacterClass = class_name.parse()?;
    tracing::debug!(%class, "class rules resolved");
    Ok(class.rules())
}
