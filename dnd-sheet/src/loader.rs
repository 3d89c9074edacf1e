//! Reading and writing character sheets as JSON.
//!
//! Loading checks the sheet's structure before anything else sees it. A
//! sheet that gets past [`load_character_json`] can always be resolved.

use crate::character::{Ability, Character, Skill};
use crate::classes::ClassRules;
use crate::error::SheetError;
use crate::pipeline::{Resolution, StatPipeline};
use crate::registry::rules_for;
use crate::resource::ResourcePool;

/// Largest magic bonus, either way, a weapon may carry.
pub const MAX_CUSTOM_BONUS: i8 = 10;

/// Highest base AC any worn armor may have.
pub const MAX_ARMOR_BASE_AC: u8 = 30;

/// A validated character together with its class rules.
#[derive(Debug)]
pub struct LoadedCharacter {
    pub character: Character,
    pub rules: Box<dyn ClassRules>,
}

impl LoadedCharacter {
    /// Run a resolution pass with this character's own class rules.
    pub fn resolve(&mut self, pipeline: &StatPipeline) -> Resolution {
        pipeline.resolve(&mut self.character, Some(self.rules.as_ref()))
    }
}

/// Parse, validate and attach class rules to a character sheet.
pub fn load_character_json(json: &str) -> Result<LoadedCharacter, SheetError> {
    let character: Character = serde_json::from_str(json)?;
    validate_structure(&character)?;
    let rules = rules_for(&character.class_name)?;
    tracing::debug!(character = %character.name, class = rules.name(), "character loaded");
    Ok(LoadedCharacter { character, rules })
}

/// Serialize a character sheet, derived values included.
pub fn to_json(character: &Character) -> Result<String, SheetError> {
    Ok(serde_json::to_string_pretty(character)?)
}

/// Check everything serde cannot: ranges, table order, gear bonuses and
/// pool bounds.
pub fn validate_structure(character: &Character) -> Result<(), SheetError> {
    if character.name.trim().is_empty() {
        return Err(SheetError::MissingName);
    }
    if !(1..=20).contains(&character.level) {
        return Err(SheetError::InvalidLevel(character.level));
    }

    for (index, (score, expected)) in character.abilities.iter().zip(Ability::all()).enumerate() {
        if score.ability != expected {
            return Err(SheetError::AbilityOrder {
                index,
                expected,
                found: score.ability,
            });
        }
        if !(1..=20).contains(&score.base) {
            return Err(SheetError::InvalidScore {
                ability: score.ability,
                score: score.base,
            });
        }
    }

    for (index, (entry, expected)) in character.skills.iter().zip(Skill::ALL).enumerate() {
        if entry.skill != expected {
            return Err(SheetError::SkillOrder {
                index,
                expected,
                found: entry.skill,
            });
        }
    }

    if let Some(weapon) = character
        .weapons
        .iter()
        .find(|w| !(-MAX_CUSTOM_BONUS..=MAX_CUSTOM_BONUS).contains(&w.custom_bonus))
    {
        return Err(SheetError::InvalidWeaponBonus {
            weapon: weapon.name.clone(),
            bonus: weapon.custom_bonus,
        });
    }
    if let Some(armor) = character
        .worn_armor
        .as_ref()
        .filter(|a| a.base_ac > MAX_ARMOR_BASE_AC)
    {
        return Err(SheetError::InvalidArmorClass {
            armor: armor.name.clone(),
            base_ac: armor.base_ac,
        });
    }

    character
        .spell_slots
        .iter()
        .chain(&character.class_resources)
        .try_for_each(check_pool)
}

fn check_pool(pool: &ResourcePool) -> Result<(), SheetError> {
    if pool.is_consistent() {
        Ok(())
    } else {
        Err(SheetError::InvalidPool {
            name: pool.name.clone(),
            available: pool.available(),
            maximum: pool.maximum(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn minimal() -> serde_json::Value {
        json!({
            "name": "Vax",
            "class_name": "rogue",
            "level": 3
        })
    }

    #[test]
    fn test_minimal_sheet_loads_with_defaults() {
        let loaded = load_character_json(&minimal().to_string()).unwrap();
        assert_eq!(loaded.rules.name(), "Rogue");
        assert_eq!(loaded.character.base_speed, 30);
        assert_eq!(loaded.character.ability(Ability::Wisdom).base, 10);
        assert_eq!(loaded.character.spell_slot(9).unwrap().name, "Level 9 spell slots");
    }

    #[test]
    fn test_unknown_class() {
        let mut sheet = minimal();
        sheet["class_name"] = json!("Gunslinger");
        assert!(matches!(
            load_character_json(&sheet.to_string()),
            Err(SheetError::UnknownClass(_))
        ));
    }

    #[test]
    fn test_level_out_of_range() {
        let mut sheet = minimal();
        sheet["level"] = json!(21);
        assert!(matches!(
            load_character_json(&sheet.to_string()),
            Err(SheetError::InvalidLevel(21))
        ));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            load_character_json("{ \"name\": "),
            Err(SheetError::Json(_))
        ));
    }

    #[test]
    fn test_out_of_order_abilities() {
        let mut character = Character::new("Vax", "rogue");
        character.abilities.swap(0, 1);
        assert!(matches!(
            validate_structure(&character),
            Err(SheetError::AbilityOrder {
                index: 0,
                expected: Ability::Strength,
                found: Ability::Dexterity,
            })
        ));
    }

    #[test]
    fn test_base_score_range() {
        let mut character = Character::new("Vax", "rogue");
        character.ability_mut(Ability::Charisma).base = 0;
        assert!(matches!(
            validate_structure(&character),
            Err(SheetError::InvalidScore {
                ability: Ability::Charisma,
                score: 0
            })
        ));
    }

    #[test]
    fn test_out_of_order_skills() {
        let mut character = Character::new("Vax", "rogue");
        character.skills.swap(2, 3);
        assert!(matches!(
            validate_structure(&character),
            Err(SheetError::SkillOrder { index: 2, .. })
        ));
    }

    #[test]
    fn test_overfull_pool() {
        let mut sheet = minimal();
        sheet["class_resources"] = json!([
            { "name": "Ki", "maximum": 2, "available": 5 }
        ]);
        assert!(matches!(
            load_character_json(&sheet.to_string()),
            Err(SheetError::InvalidPool { available: 5, maximum: 2, .. })
        ));
    }

    #[test]
    fn test_missing_name() {
        let mut sheet = minimal();
        sheet["name"] = json!("  ");
        assert!(matches!(
            load_character_json(&sheet.to_string()),
            Err(SheetError::MissingName)
        ));
    }

    #[test]
    fn test_save_and_reload_keeps_pool_state() {
        let mut loaded = load_character_json(&minimal().to_string()).unwrap();
        loaded.character.class_name = "wizard".to_string();
        loaded.rules = rules_for("wizard").unwrap();
        loaded.resolve(&StatPipeline::default());
        loaded.character.spend_spell_slot(1).unwrap();

        let json = to_json(&loaded.character).unwrap();
        let reloaded = load_character_json(&json).unwrap();
        assert_eq!(reloaded.character, loaded.character);
        assert_eq!(reloaded.character.spell_slot(1).unwrap().available(), 3);
    }
}
