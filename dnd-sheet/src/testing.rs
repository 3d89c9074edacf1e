//! Testing utilities for the sheet engine.
//!
//! This module provides tools for integration testing:
//! - sample characters for every class
//! - `SheetHarness` for resolving a sheet with its own class rules
//! - an idempotence check

use crate::character::{Ability, Armor, ArmorType, Character, Skill, Weapon, WeaponProperty};
use crate::character_builder::{CharacterBuilder, STANDARD_ARRAY};
use crate::class_data::CharacterClass;
use crate::classes::ClassRules;
use crate::config::EngineConfig;
use crate::pipeline::{Resolution, StatPipeline};

/// A level 3 fighter in chain mail with a longsword and shield.
pub fn sample_fighter(name: &str) -> Character {
    let mut character = Character::new(name, "fighter");
    character.level = 3;
    for (score, base) in character.abilities.iter_mut().zip([16, 14, 14, 10, 12, 8]) {
        score.base = base;
    }
    character.ability_mut(Ability::Strength).saving_throw_proficient = true;
    character.ability_mut(Ability::Constitution).saving_throw_proficient = true;
    for skill in [Skill::Athletics, Skill::Perception, Skill::Intimidation] {
        character.skill_mut(skill).proficient = true;
    }

    character.weapons = vec![
        Weapon::new("Longsword")
            .with_properties(vec![WeaponProperty::Versatile("1d10".to_string())])
            .proficient(),
        Weapon::new("Light Crossbow")
            .with_properties(vec![WeaponProperty::Loading])
            .ranged()
            .proficient(),
    ];
    character.don_armor(Armor::new("Chain Mail", ArmorType::Heavy, 16));
    character.shield = Some("Shield".to_string());
    character.equipped_primary = Some("Longsword".to_string());
    character.equipped_secondary = Some("Shield".to_string());
    character.fighting_styles = vec!["Defense".to_string()];
    character
}

/// A character of any class and level, built from the standard array with
/// the class's primary ability highest and its first skill options.
pub fn sample_character(class: CharacterClass, level: u8) -> Character {
    let order = match class {
        CharacterClass::Paladin => [
            Ability::Strength,
            Ability::Charisma,
            Ability::Constitution,
            Ability::Dexterity,
            Ability::Wisdom,
            Ability::Intelligence,
        ],
        CharacterClass::Barbarian | CharacterClass::Fighter => [
            Ability::Strength,
            Ability::Constitution,
            Ability::Dexterity,
            Ability::Wisdom,
            Ability::Charisma,
            Ability::Intelligence,
        ],
        CharacterClass::Monk | CharacterClass::Ranger | CharacterClass::Rogue => [
            Ability::Dexterity,
            Ability::Wisdom,
            Ability::Constitution,
            Ability::Intelligence,
            Ability::Charisma,
            Ability::Strength,
        ],
        CharacterClass::Cleric | CharacterClass::Druid => [
            Ability::Wisdom,
            Ability::Constitution,
            Ability::Dexterity,
            Ability::Strength,
            Ability::Intelligence,
            Ability::Charisma,
        ],
        CharacterClass::Bard | CharacterClass::Sorcerer | CharacterClass::Warlock => [
            Ability::Charisma,
            Ability::Constitution,
            Ability::Dexterity,
            Ability::Wisdom,
            Ability::Intelligence,
            Ability::Strength,
        ],
        CharacterClass::Wizard => [
            Ability::Intelligence,
            Ability::Constitution,
            Ability::Dexterity,
            Ability::Wisdom,
            Ability::Charisma,
            Ability::Strength,
        ],
    };
    let assignment = std::array::from_fn(|i| (STANDARD_ARRAY[i], order[i]));

    let data = class.data();
    let skills = data.skill_options[..data.skill_count].to_vec();

    let built = CharacterBuilder::new()
        .name(format!("Sample {}", class.name()))
        .class(class)
        .level(level)
        .standard_array(assignment)
        .skills(skills)
        .build();
    match built {
        Ok(character) => character,
        Err(err) => panic!("sample {class} failed to build: {err}"),
    }
}

/// A character paired with its class rules and a pipeline.
pub struct SheetHarness {
    pub character: Character,
    pub rules: Box<dyn ClassRules>,
    pub pipeline: StatPipeline,
}

impl SheetHarness {
    /// Harness for a sample character. Advisories are collected but not
    /// logged.
    pub fn new(class: CharacterClass, level: u8) -> Self {
        Self::with_character(sample_character(class, level), class)
    }

    pub fn with_character(character: Character, class: CharacterClass) -> Self {
        Self {
            character,
            rules: class.rules(),
            pipeline: StatPipeline::new(EngineConfig::new().with_advisory_logging(false)),
        }
    }

    pub fn resolve(&mut self) -> Resolution {
        self.pipeline
            .resolve(&mut self.character, Some(self.rules.as_ref()))
    }

    /// Resolve twice and report whether the second pass changed anything.
    pub fn is_idempotent(&mut self) -> bool {
        let first = self.resolve();
        let snapshot = self.character.clone();
        let second = self.resolve();
        first == second && snapshot == self.character
    }
}
