//! Per-class rule modules.
//!
//! Every class implements [`ClassRules`]. On top of that a class may
//! implement any of three optional capabilities, which the pipeline probes
//! for at runtime through the `as_*` accessors:
//!
//! - [`Precalculator`] runs before the base sequence, while `adjusted`
//!   scores can still be changed before modifiers are derived from them.
//! - [`Postcalculator`] runs after the base sequence, once proficiency,
//!   modifiers and armor class exist.
//! - [`TokenClass`] exposes named class resources for spending and
//!   recovering.
//!
//! Adding a class means adding a module here and a registry entry; the
//! pipeline does not change.

mod barbarian;
mod bard;
mod cleric;
mod druid;
mod fighter;
mod monk;
mod paladin;
mod ranger;
mod rogue;
mod sorcerer;
pub mod spellcasting;
mod warlock;
mod wizard;

pub use barbarian::Barbarian;
pub use bard::Bard;
pub use cleric::Cleric;
pub use druid::Druid;
pub use fighter::Fighter;
pub use monk::Monk;
pub use paladin::Paladin;
pub use ranger::Ranger;
pub use rogue::Rogue;
pub use sorcerer::Sorcerer;
pub use warlock::Warlock;
pub use wizard::Wizard;

use crate::advisory::{Advisories, Advisory};
use crate::character::{Ability, Character, Feature, Skill};
use crate::dice::{DieType, HitDice};
use crate::resource::ResourcePool;
use crate::stats::{SHIELD_BONUS, STANDARD_IMPROVEMENT_LEVELS, UNARMORED_AC};
use spellcasting::Spellcasting;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// A class feature gained at a given level.
#[derive(Debug, Clone, Copy)]
pub struct ClassFeature {
    pub level: u8,
    pub name: &'static str,
    pub description: &'static str,
}

impl ClassFeature {
    pub const fn new(level: u8, name: &'static str, description: &'static str) -> Self {
        Self {
            level,
            name,
            description,
        }
    }
}

impl From<&ClassFeature> for Feature {
    fn from(feature: &ClassFeature) -> Self {
        Feature {
            level: feature.level,
            name: feature.name.to_string(),
            description: feature.description.to_string(),
        }
    }
}

/// The contract every class satisfies.
pub trait ClassRules: fmt::Debug {
    fn name(&self) -> &'static str;

    fn hit_die(&self) -> DieType;

    /// Class features in level order.
    fn feature_table(&self) -> &'static [ClassFeature];

    /// Hit dice at a given level, one die per level.
    fn hit_dice(&self, level: u8) -> HitDice {
        HitDice::new(level, self.hit_die())
    }

    /// Features available at `level`.
    fn features(&self, level: u8) -> Vec<Feature> {
        self.feature_table()
            .iter()
            .filter(|f| f.level <= level)
            .map(Feature::from)
            .collect()
    }

    /// Levels at which this class grants ability score improvements.
    fn improvement_levels(&self) -> &'static [u8] {
        STANDARD_IMPROVEMENT_LEVELS
    }

    /// The class's spell slot progression, if it casts spells at all.
    fn spellcasting(&self) -> Option<Spellcasting> {
        None
    }

    fn as_precalculator(&self) -> Option<&dyn Precalculator> {
        None
    }

    fn as_postcalculator(&self) -> Option<&dyn Postcalculator> {
        None
    }

    fn as_token_class(&self) -> Option<&dyn TokenClass> {
        None
    }
}

/// Adjustments that must happen before modifiers are derived.
pub trait Precalculator {
    fn precalculate(&self, character: &mut Character, advisories: &mut Advisories);
}

/// Adjustments that depend on derived values.
pub trait Postcalculator {
    fn postcalculate(&self, character: &mut Character, advisories: &mut Advisories);
}

/// Classes with spendable resources.
///
/// A class with a single resource ignores the name passed in. A class with
/// several rejects names it does not know.
pub trait TokenClass: ClassRules {
    fn token_names(&self) -> &'static [&'static str];

    /// Spend charges, returning how many remain.
    fn use_token(
        &self,
        character: &mut Character,
        name: &str,
        quantity: u32,
    ) -> Result<u32, Advisory> {
        let pool = token_pool(self.name(), self.token_names(), character, name)?;
        let remaining = pool.spend(quantity)?;
        tracing::debug!(token = %pool.name, quantity, remaining, "token used");
        Ok(remaining)
    }

    /// Recover charges (zero recovers fully), returning the new total.
    fn recover_token(
        &self,
        character: &mut Character,
        name: &str,
        quantity: u32,
    ) -> Result<u32, Advisory> {
        let pool = token_pool(self.name(), self.token_names(), character, name)?;
        let available = pool.recover(quantity);
        tracing::debug!(token = %pool.name, quantity, available, "token recovered");
        Ok(available)
    }
}

fn token_pool<'c>(
    class: &str,
    names: &[&'static str],
    character: &'c mut Character,
    requested: &str,
) -> Result<&'c mut ResourcePool, Advisory> {
    let key = match names {
        [only] => *only,
        _ => names
            .iter()
            .copied()
            .find(|name| name.eq_ignore_ascii_case(requested.trim()))
            .ok_or_else(|| Advisory::UnknownToken {
                class: class.to_string(),
                name: requested.to_string(),
            })?,
    };
    character.resource_mut(key).ok_or_else(|| Advisory::PoolLocked {
        pool: key.to_string(),
    })
}

// ============================================================================
// Expertise
// ============================================================================

/// Skill doubling shared by rogues and bards.
#[derive(Debug, Clone, Copy)]
pub struct Expertise {
    /// Level at which the first two skills are granted.
    pub unlock_level: u8,
    /// Level at which the limit rises to four.
    pub expanded_level: u8,
}

impl Expertise {
    pub fn allowed(&self, level: u8) -> usize {
        if level < self.unlock_level {
            0
        } else if level < self.expanded_level {
            2
        } else {
            4
        }
    }

    /// Add the proficiency bonus a second time to each requested skill.
    ///
    /// Requests beyond the level's limit are dropped without comment.
    /// Repeated or unknown skill names raise an advisory and are skipped.
    pub fn apply(&self, character: &mut Character, advisories: &mut Advisories) {
        let allowed = self.allowed(character.level);
        let proficiency = character.stats.proficiency_bonus;
        let requested: Vec<String> = character.expertise.iter().take(allowed).cloned().collect();

        let mut seen = HashSet::new();
        for name in requested {
            let skill = match name.parse::<Skill>() {
                Ok(skill) => skill,
                Err(advisory) => {
                    advisories.report(advisory);
                    continue;
                }
            };
            if !seen.insert(skill) {
                advisories.report(Advisory::DuplicateExpertise(skill.name().to_string()));
                continue;
            }
            let entry = character.skill_mut(skill);
            entry.modifier = entry.modifier.saturating_add(proficiency);
        }
    }
}

// ============================================================================
// Unarmored Defense
// ============================================================================

/// AC of 10 plus two ability modifiers while no armor is worn.
#[derive(Debug, Clone, Copy)]
pub struct UnarmoredDefense {
    pub first: Ability,
    pub second: Ability,
    /// Whether a held shield still adds its bonus. When false, holding a
    /// shield disables the feature.
    pub allows_shield: bool,
}

impl UnarmoredDefense {
    pub fn apply(&self, character: &mut Character) {
        if character.wears_armor() {
            return;
        }
        let shield = character.shield_equipped();
        if shield && !self.allows_shield {
            return;
        }
        character.stats.armor_class = UNARMORED_AC
            .saturating_add(character.modifier(self.first))
            .saturating_add(character.modifier(self.second))
            .saturating_add(if shield { SHIELD_BONUS } else { 0 });
    }
}

// ============================================================================
// Fighting Styles
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FightingStyle {
    Archery,
    Defense,
    Dueling,
    GreatWeaponFighting,
    Protection,
    TwoWeaponFighting,
}

impl FromStr for FightingStyle {
    type Err = Advisory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match key.as_str() {
            "archery" => Ok(FightingStyle::Archery),
            "defense" | "defence" => Ok(FightingStyle::Defense),
            "dueling" | "duelling" => Ok(FightingStyle::Dueling),
            "greatweaponfighting" => Ok(FightingStyle::GreatWeaponFighting),
            "protection" => Ok(FightingStyle::Protection),
            "twoweaponfighting" => Ok(FightingStyle::TwoWeaponFighting),
            _ => Err(Advisory::InvalidFightingStyle(s.to_string())),
        }
    }
}

/// Bonus to attack rolls with ranged weapons from the archery style.
pub const ARCHERY_BONUS: i8 = 2;

/// Bonus to AC while armored from the defense style.
pub const DEFENSE_BONUS: i8 = 1;

/// Apply the character's chosen fighting styles, up to `allowed` of them.
///
/// Only archery and defense change sheet values; the others affect damage
/// and reactions, which the sheet does not track.
pub fn apply_fighting_styles(character: &mut Character, allowed: usize, advisories: &mut Advisories) {
    let mut chosen: Vec<FightingStyle> = Vec::new();
    for name in character.fighting_styles.clone() {
        let style = match name.parse::<FightingStyle>() {
            Ok(style) => style,
            Err(advisory) => {
                advisories.report(advisory);
                continue;
            }
        };
        if chosen.contains(&style) {
            advisories.report(Advisory::DuplicateFightingStyle(name));
            continue;
        }
        if chosen.len() >= allowed {
            advisories.report(Advisory::ExtraFightingStyle {
                style: name,
                allowed,
            });
            continue;
        }
        chosen.push(style);
    }

    for style in chosen {
        match style {
            FightingStyle::Archery => {
                for weapon in character.weapons.iter_mut().filter(|w| w.ranged) {
                    weapon.computed_bonus = weapon.computed_bonus.saturating_add(ARCHERY_BONUS);
                }
            }
            FightingStyle::Defense => {
                if character.wears_armor() {
                    character.stats.armor_class =
                        character.stats.armor_class.saturating_add(DEFENSE_BONUS);
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::{Armor, ArmorType, Weapon};
    use crate::resource::Recharge;

    fn resolved_base(level: u8) -> Character {
        let mut character = Character::new("Test", "rogue");
        character.level = level;
        character.ability_mut(Ability::Dexterity).base = 14;
        character.ability_mut(Ability::Constitution).base = 18;
        character.ability_mut(Ability::Wisdom).base = 16;
        character.run_base_sequence(&mut Advisories::quiet());
        character
    }

    #[test]
    fn test_expertise_limits() {
        let rule = Expertise {
            unlock_level: 3,
            expanded_level: 10,
        };
        assert_eq!(rule.allowed(2), 0);
        assert_eq!(rule.allowed(3), 2);
        assert_eq!(rule.allowed(9), 2);
        assert_eq!(rule.allowed(10), 4);
    }

    #[test]
    fn test_expertise_truncates_silently() {
        let mut character = resolved_base(1);
        character.expertise = vec![
            "Stealth".to_string(),
            "Perception".to_string(),
            "Arcana".to_string(),
        ];
        let before = character.skill(Skill::Arcana).modifier;

        let rule = Expertise {
            unlock_level: 1,
            expanded_level: 6,
        };
        let mut advisories = Advisories::quiet();
        rule.apply(&mut character, &mut advisories);

        assert!(advisories.is_empty());
        assert_eq!(character.skill(Skill::Stealth).modifier, 2 + 2);
        assert_eq!(character.skill(Skill::Perception).modifier, 3 + 2);
        assert_eq!(character.skill(Skill::Arcana).modifier, before);
    }

    #[test]
    fn test_expertise_rejects_duplicates_and_unknown_names() {
        let mut character = resolved_base(6);
        character.expertise = vec![
            "Stealth".to_string(),
            "stealth".to_string(),
            "Juggling".to_string(),
            "Insight".to_string(),
        ];
        let rule = Expertise {
            unlock_level: 1,
            expanded_level: 6,
        };
        let mut advisories = Advisories::quiet();
        rule.apply(&mut character, &mut advisories);

        // Level 6 proficiency is +3, added once on top of the base modifier
        assert_eq!(character.skill(Skill::Stealth).modifier, 2 + 3);
        assert_eq!(character.skill(Skill::Insight).modifier, 3 + 3);
        assert_eq!(
            advisories.into_vec(),
            vec![
                Advisory::DuplicateExpertise("Stealth".to_string()),
                Advisory::UnknownSkill("Juggling".to_string()),
            ]
        );
    }

    #[test]
    fn test_unarmored_defense_overrides_base_ac() {
        let mut character = resolved_base(1);
        assert_eq!(character.stats.armor_class, 12);

        UnarmoredDefense {
            first: Ability::Dexterity,
            second: Ability::Constitution,
            allows_shield: true,
        }
        .apply(&mut character);
        assert_eq!(character.stats.armor_class, 16);
    }

    #[test]
    fn test_unarmored_defense_skips_armor() {
        let mut character = resolved_base(1);
        character.don_armor(Armor::new("Hide", ArmorType::Medium, 12));
        character.run_base_sequence(&mut Advisories::quiet());
        let armored = character.stats.armor_class;

        UnarmoredDefense {
            first: Ability::Dexterity,
            second: Ability::Constitution,
            allows_shield: true,
        }
        .apply(&mut character);
        assert_eq!(character.stats.armor_class, armored);
    }

    #[test]
    fn test_unarmored_defense_and_shields() {
        let mut character = resolved_base(1);
        character.shield = Some("Shield".to_string());
        character.equipped_secondary = Some("Shield".to_string());
        character.run_base_sequence(&mut Advisories::quiet());
        assert_eq!(character.stats.armor_class, 14);

        UnarmoredDefense {
            first: Ability::Dexterity,
            second: Ability::Wisdom,
            allows_shield: false,
        }
        .apply(&mut character);
        assert_eq!(character.stats.armor_class, 14);

        UnarmoredDefense {
            first: Ability::Dexterity,
            second: Ability::Constitution,
            allows_shield: true,
        }
        .apply(&mut character);
        assert_eq!(character.stats.armor_class, 18);
    }

    #[test]
    fn test_fighting_style_parsing() {
        assert_eq!("Archery".parse(), Ok(FightingStyle::Archery));
        assert_eq!("great weapon fighting".parse(), Ok(FightingStyle::GreatWeaponFighting));
        assert_eq!("Two-Weapon Fighting".parse(), Ok(FightingStyle::TwoWeaponFighting));
        assert_eq!(
            "Berserking".parse::<FightingStyle>(),
            Err(Advisory::InvalidFightingStyle("Berserking".to_string()))
        );
    }

    #[test]
    fn test_fighting_styles() {
        let mut character = resolved_base(1);
        character.weapons = vec![Weapon::new("Longbow").ranged().proficient()];
        character.don_armor(Armor::new("Chain Mail", ArmorType::Heavy, 16));
        character.fighting_styles = vec![
            "Archery".to_string(),
            "Defense".to_string(),
            "Dueling".to_string(),
        ];
        character.run_base_sequence(&mut Advisories::quiet());
        let bow = character.weapon("Longbow").unwrap().computed_bonus;

        let mut advisories = Advisories::quiet();
        apply_fighting_styles(&mut character, 2, &mut advisories);

        assert_eq!(character.weapon("Longbow").unwrap().computed_bonus, bow + 2);
        assert_eq!(character.stats.armor_class, 17);
        assert_eq!(
            advisories.into_vec(),
            vec![Advisory::ExtraFightingStyle {
                style: "Dueling".to_string(),
                allowed: 2,
            }]
        );
    }

    #[test]
    fn test_repeated_fighting_style() {
        let mut character = resolved_base(1);
        character.don_armor(Armor::new("Chain Mail", ArmorType::Heavy, 16));
        character.fighting_styles = vec!["Defense".to_string(), "defense".to_string()];
        character.run_base_sequence(&mut Advisories::quiet());

        let mut advisories = Advisories::quiet();
        apply_fighting_styles(&mut character, 2, &mut advisories);

        // Counted once, and the repeat does not use up the second style
        assert_eq!(character.stats.armor_class, 17);
        assert_eq!(
            advisories.into_vec(),
            vec![Advisory::DuplicateFightingStyle("defense".to_string())]
        );
    }

    #[derive(Debug)]
    struct Juggler;

    impl ClassRules for Juggler {
        fn name(&self) -> &'static str {
            "Juggler"
        }

        fn hit_die(&self) -> DieType {
            DieType::D4
        }

        fn feature_table(&self) -> &'static [ClassFeature] {
            const FEATURES: &[ClassFeature] = &[
                ClassFeature::new(1, "Catch", "Catch things."),
                ClassFeature::new(3, "Toss", "Toss things."),
            ];
            FEATURES
        }

        fn as_token_class(&self) -> Option<&dyn TokenClass> {
            Some(self)
        }
    }

    impl TokenClass for Juggler {
        fn token_names(&self) -> &'static [&'static str] {
            &["Balls", "Pins"]
        }
    }

    #[test]
    fn test_default_contract() {
        let juggler = Juggler;
        assert_eq!(juggler.hit_dice(3).to_string(), "3d4");
        assert_eq!(juggler.features(2).len(), 1);
        assert_eq!(juggler.features(3).len(), 2);
        assert!(juggler.as_precalculator().is_none());
        assert!(juggler.as_postcalculator().is_none());
        assert_eq!(juggler.improvement_levels(), STANDARD_IMPROVEMENT_LEVELS);
    }

    #[test]
    fn test_multi_token_names_are_validated() {
        let mut character = Character::new("Test", "juggler");
        character
            .ensure_resource("Balls", Recharge::LongRest)
            .set_maximum(3);
        let juggler = Juggler;
        let tokens = juggler.as_token_class().unwrap();

        assert_eq!(tokens.use_token(&mut character, "balls", 1), Ok(2));
        assert_eq!(
            tokens.use_token(&mut character, "Knives", 1),
            Err(Advisory::UnknownToken {
                class: "Juggler".to_string(),
                name: "Knives".to_string(),
            })
        );
        assert_eq!(
            tokens.use_token(&mut character, "Pins", 1),
            Err(Advisory::PoolLocked {
                pool: "Pins".to_string()
            })
        );
        assert_eq!(tokens.recover_token(&mut character, "Balls", 0), Ok(3));
    }
}
