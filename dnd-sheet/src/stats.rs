//! The fixed base calculation sequence.
//!
//! Every resolution pass runs these seven stages in order, on every
//! character, regardless of class. Each stage reads what the previous ones
//! wrote, so the order is part of the contract.

use crate::advisory::{Advisories, Advisory};
use crate::character::{ability_modifier, Ability, ArmorType, Character, Skill, DEFAULT_SCORE_CAP};
use std::fmt;

/// Levels at which every class gains an ability score improvement.
pub const STANDARD_IMPROVEMENT_LEVELS: &[u8] = &[4, 8, 12, 16, 19];

/// Points granted by each ability score improvement.
pub const POINTS_PER_IMPROVEMENT: u32 = 2;

/// Bonus AC from a shield held in either hand.
pub const SHIELD_BONUS: i8 = 2;

/// Armor class before dexterity when no armor is worn.
pub const UNARMORED_AC: i8 = 10;

/// Base of passive perception and insight.
pub const PASSIVE_BASE: i8 = 10;

/// Proficiency bonus by character level.
pub fn proficiency_bonus(level: u8) -> i8 {
    match level {
        0..=4 => 2,
        5..=8 => 3,
        9..=12 => 4,
        13..=16 => 5,
        _ => 6,
    }
}

/// Total improvement points a character may have been granted by `level`.
pub fn improvement_cap(level: u8, improvement_levels: &[u8]) -> u32 {
    let reached = improvement_levels.iter().filter(|&&l| l <= level).count() as u32;
    reached * POINTS_PER_IMPROVEMENT
}

/// One stage of the base sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseStage {
    ProficiencyBonus,
    AbilityImprovements,
    AbilityModifiers,
    SkillModifiers,
    ArmorClass,
    PassiveStats,
    WeaponBonuses,
}

impl BaseStage {
    pub const SEQUENCE: [BaseStage; 7] = [
        BaseStage::ProficiencyBonus,
        BaseStage::AbilityImprovements,
        BaseStage::AbilityModifiers,
        BaseStage::SkillModifiers,
        BaseStage::ArmorClass,
        BaseStage::PassiveStats,
        BaseStage::WeaponBonuses,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            BaseStage::ProficiencyBonus => "proficiency bonus",
            BaseStage::AbilityImprovements => "ability score improvements",
            BaseStage::AbilityModifiers => "ability modifiers",
            BaseStage::SkillModifiers => "skill modifiers",
            BaseStage::ArmorClass => "armor class",
            BaseStage::PassiveStats => "passive stats",
            BaseStage::WeaponBonuses => "weapon bonuses",
        }
    }
}

impl fmt::Display for BaseStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Inputs the base sequence takes from outside the character.
#[derive(Debug, Clone, Copy)]
pub struct BaseContext<'a> {
    pub improvement_levels: &'a [u8],
    pub validate_improvements: bool,
}

impl Default for BaseContext<'_> {
    fn default() -> Self {
        Self {
            improvement_levels: STANDARD_IMPROVEMENT_LEVELS,
            validate_improvements: true,
        }
    }
}

impl Character {
    /// Clear everything a pass computes so the next pass starts from the
    /// inputs alone. Pool availability is state, not a derived value, and
    /// is left alone.
    pub(crate) fn reset_derived(&mut self) {
        for score in &mut self.abilities {
            score.adjusted = score.base;
            score.score_cap = DEFAULT_SCORE_CAP;
            score.modifier = 0;
            score.saving_throw = 0;
        }
        for entry in &mut self.skills {
            entry.modifier = 0;
        }
        for weapon in &mut self.weapons {
            weapon.computed_bonus = 0;
        }
        self.stats = Default::default();
        self.stats.speed = self.base_speed;
    }

    pub(crate) fn run_stage(
        &mut self,
        stage: BaseStage,
        context: &BaseContext<'_>,
        advisories: &mut Advisories,
    ) {
        tracing::debug!(character = %self.name, %stage, "base stage");
        match stage {
            BaseStage::ProficiencyBonus => self.apply_proficiency_bonus(),
            BaseStage::AbilityImprovements => self.apply_ability_improvements(context, advisories),
            BaseStage::AbilityModifiers => self.apply_ability_modifiers(),
            BaseStage::SkillModifiers => self.apply_skill_modifiers(),
            BaseStage::ArmorClass => self.apply_armor_class(),
            BaseStage::PassiveStats => self.apply_passive_stats(),
            BaseStage::WeaponBonuses => self.apply_weapon_bonuses(),
        }
    }

    fn apply_proficiency_bonus(&mut self) {
        self.stats.proficiency_bonus = proficiency_bonus(self.level);
    }

    fn apply_ability_improvements(&mut self, context: &BaseContext<'_>, advisories: &mut Advisories) {
        let mut totals = [0u32; 6];
        for improvement in &self.ability_improvements {
            totals[improvement.ability.index()] += improvement.bonus as u32;
        }

        for (score, total) in self.abilities.iter_mut().zip(totals) {
            score.raise(total.min(u8::MAX as u32) as u8);
        }

        if context.validate_improvements {
            let granted: u32 = totals.iter().sum();
            let allowed = improvement_cap(self.level, context.improvement_levels);
            if granted > allowed {
                advisories.report(Advisory::ImprovementCapExceeded {
                    level: self.level,
                    granted,
                    allowed,
                });
            }
        }
    }

    fn apply_ability_modifiers(&mut self) {
        let proficiency = self.stats.proficiency_bonus;
        for score in &mut self.abilities {
            score.modifier = ability_modifier(score.adjusted);
            score.saving_throw = score.modifier.saturating_add(if score.saving_throw_proficient {
                proficiency
            } else {
                0
            });
        }
    }

    fn apply_skill_modifiers(&mut self) {
        let proficiency = self.stats.proficiency_bonus;
        let modifiers = self.abilities.each_ref().map(|score| score.modifier);
        for entry in &mut self.skills {
            entry.modifier = modifiers[entry.skill.ability().index()]
                .saturating_add(if entry.proficient { proficiency } else { 0 });
        }
    }

    fn apply_armor_class(&mut self) {
        let dex = self.modifier(Ability::Dexterity);
        let base = match &self.worn_armor {
            None => UNARMORED_AC.saturating_add(dex),
            Some(armor) => {
                let base_ac = i8::try_from(armor.base_ac).unwrap_or(i8::MAX);
                match armor.armor_type {
                    ArmorType::Light => base_ac.saturating_add(dex),
                    ArmorType::Medium => base_ac.saturating_add(dex.min(2)),
                    ArmorType::Heavy => base_ac,
                }
            }
        };
        let shield = if self.shield_equipped() { SHIELD_BONUS } else { 0 };
        self.stats.armor_class = base.saturating_add(shield);
    }

    fn apply_passive_stats(&mut self) {
        let wisdom = self.modifier(Ability::Wisdom);
        let proficiency = self.stats.proficiency_bonus;
        let passive = |skill: Skill| {
            PASSIVE_BASE
                .saturating_add(wisdom)
                .saturating_add(if self.skill(skill).proficient {
                    proficiency
                } else {
                    0
                })
        };
        let perception = passive(Skill::Perception);
        let insight = passive(Skill::Insight);
        self.stats.passive_perception = perception;
        self.stats.passive_insight = insight;
    }

    fn apply_weapon_bonuses(&mut self) {
        let strength = self.modifier(Ability::Strength);
        let dexterity = self.modifier(Ability::Dexterity);
        let proficiency = self.stats.proficiency_bonus;

        for weapon in &mut self.weapons {
            let ability = if weapon.is_finesse() || weapon.is_thrown() {
                dexterity.max(strength)
            } else if weapon.ranged {
                dexterity
            } else {
                strength
            };
            let proficient = if weapon.proficient { proficiency } else { 0 };
            weapon.computed_bonus = ability
                .saturating_add(proficient)
                .saturating_add(weapon.custom_bonus);
        }
    }

    /// Run the whole base sequence with default context. Exposed for callers
    /// that resolve characters without any class rules.
    pub fn run_base_sequence(&mut self, advisories: &mut Advisories) {
        self.reset_derived();
        let context = BaseContext::default();
        for stage in BaseStage::SEQUENCE {
            self.run_stage(stage, &context, advisories);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::{AbilityImprovement, Armor, Weapon, WeaponProperty};

    fn character(level: u8) -> Character {
        let mut character = Character::new("Test", "fighter");
        character.level = level;
        character
    }

    fn set_base(character: &mut Character, ability: Ability, base: u8) {
        character.ability_mut(ability).base = base;
    }

    #[test]
    fn test_proficiency_banding() {
        assert_eq!(proficiency_bonus(1), 2);
        assert_eq!(proficiency_bonus(4), 2);
        assert_eq!(proficiency_bonus(5), 3);
        assert_eq!(proficiency_bonus(8), 3);
        assert_eq!(proficiency_bonus(9), 4);
        assert_eq!(proficiency_bonus(12), 4);
        assert_eq!(proficiency_bonus(13), 5);
        assert_eq!(proficiency_bonus(16), 5);
        assert_eq!(proficiency_bonus(17), 6);
        assert_eq!(proficiency_bonus(20), 6);
    }

    #[test]
    fn test_improvement_cap() {
        assert_eq!(improvement_cap(3, STANDARD_IMPROVEMENT_LEVELS), 0);
        assert_eq!(improvement_cap(4, STANDARD_IMPROVEMENT_LEVELS), 2);
        assert_eq!(improvement_cap(8, STANDARD_IMPROVEMENT_LEVELS), 4);
        assert_eq!(improvement_cap(19, STANDARD_IMPROVEMENT_LEVELS), 10);
        assert_eq!(improvement_cap(6, &[4, 6, 8]), 4);
    }

    #[test]
    fn test_improvements_are_clamped_to_twenty() {
        let mut character = character(8);
        set_base(&mut character, Ability::Strength, 18);
        character.ability_improvements = vec![
            AbilityImprovement::new(Ability::Strength, 2),
            AbilityImprovement::new(Ability::Strength, 2),
        ];

        let mut advisories = Advisories::quiet();
        character.run_base_sequence(&mut advisories);

        assert_eq!(character.ability(Ability::Strength).adjusted, 20);
        assert_eq!(character.modifier(Ability::Strength), 5);
        assert!(advisories.is_empty());
    }

    #[test]
    fn test_improvement_cap_is_advisory_only() {
        let mut character = character(4);
        set_base(&mut character, Ability::Dexterity, 14);
        character.ability_improvements = vec![
            AbilityImprovement::new(Ability::Dexterity, 2),
            AbilityImprovement::new(Ability::Wisdom, 2),
        ];

        let mut advisories = Advisories::quiet();
        character.run_base_sequence(&mut advisories);

        // Mutation is kept even though the cap was exceeded
        assert_eq!(character.ability(Ability::Dexterity).adjusted, 16);
        assert_eq!(character.ability(Ability::Wisdom).adjusted, 12);
        assert_eq!(
            advisories.into_vec(),
            vec![Advisory::ImprovementCapExceeded {
                level: 4,
                granted: 4,
                allowed: 2,
            }]
        );
    }

    #[test]
    fn test_improvement_validation_can_be_disabled() {
        let mut character = character(1);
        character.ability_improvements = vec![AbilityImprovement::new(Ability::Charisma, 2)];
        character.reset_derived();

        let context = BaseContext {
            validate_improvements: false,
            ..Default::default()
        };
        let mut advisories = Advisories::quiet();
        for stage in BaseStage::SEQUENCE {
            character.run_stage(stage, &context, &mut advisories);
        }
        assert!(advisories.is_empty());
        assert_eq!(character.ability(Ability::Charisma).adjusted, 12);
    }

    #[test]
    fn test_saving_throws_and_skills() {
        let mut character = character(3);
        set_base(&mut character, Ability::Strength, 14);
        character.ability_mut(Ability::Strength).saving_throw_proficient = true;
        set_base(&mut character, Ability::Dexterity, 9);
        character.skill_mut(Skill::Athletics).proficient = true;

        character.run_base_sequence(&mut Advisories::quiet());

        assert_eq!(character.ability(Ability::Strength).saving_throw, 4);
        assert_eq!(character.ability(Ability::Dexterity).saving_throw, -1);
        assert_eq!(character.skill(Skill::Athletics).modifier, 4);
        assert_eq!(character.skill(Skill::Stealth).modifier, -1);
    }

    #[test]
    fn test_armor_class_by_armor_type() {
        let mut character = character(1);
        set_base(&mut character, Ability::Dexterity, 16);

        character.run_base_sequence(&mut Advisories::quiet());
        assert_eq!(character.stats.armor_class, 13);

        character.don_armor(Armor::new("Leather", ArmorType::Light, 11));
        character.run_base_sequence(&mut Advisories::quiet());
        assert_eq!(character.stats.armor_class, 14);

        character.don_armor(Armor::new("Half Plate", ArmorType::Medium, 15));
        character.run_base_sequence(&mut Advisories::quiet());
        assert_eq!(character.stats.armor_class, 17);

        character.don_armor(Armor::new("Plate", ArmorType::Heavy, 18));
        character.run_base_sequence(&mut Advisories::quiet());
        assert_eq!(character.stats.armor_class, 18);
    }

    #[test]
    fn test_shield_counts_only_when_held() {
        let mut character = character(1);
        character.don_armor(Armor::new("Chain Mail", ArmorType::Heavy, 16));
        character.shield = Some("Shield".to_string());

        character.run_base_sequence(&mut Advisories::quiet());
        assert_eq!(character.stats.armor_class, 16);

        character.equipped_secondary = Some("Shield".to_string());
        character.run_base_sequence(&mut Advisories::quiet());
        assert_eq!(character.stats.armor_class, 18);
    }

    #[test]
    fn test_passive_stats() {
        let mut character = character(5);
        set_base(&mut character, Ability::Wisdom, 14);
        character.skill_mut(Skill::Perception).proficient = true;

        character.run_base_sequence(&mut Advisories::quiet());
        assert_eq!(character.stats.passive_perception, 15);
        assert_eq!(character.stats.passive_insight, 12);
    }

    #[test]
    fn test_weapon_ability_selection() {
        let mut character = character(1);
        set_base(&mut character, Ability::Strength, 16);
        set_base(&mut character, Ability::Dexterity, 12);
        character.weapons = vec![
            Weapon::new("Longsword").proficient(),
            Weapon::new("Longbow").ranged().proficient(),
            Weapon::new("Dagger").with_properties(vec![
                WeaponProperty::Finesse,
                WeaponProperty::Light,
                WeaponProperty::Thrown,
            ]),
            Weapon::new("Club").with_custom_bonus(1),
        ];

        character.run_base_sequence(&mut Advisories::quiet());

        let bonus = |name: &str| character.weapon(name).unwrap().computed_bonus;
        assert_eq!(bonus("Longsword"), 5);
        assert_eq!(bonus("Longbow"), 3);
        assert_eq!(bonus("Dagger"), 3);
        assert_eq!(bonus("Club"), 4);
    }

    #[test]
    fn test_base_sequence_is_idempotent() {
        let mut character = character(9);
        set_base(&mut character, Ability::Constitution, 15);
        character.ability_improvements = vec![AbilityImprovement::new(Ability::Constitution, 2)];
        character.weapons = vec![Weapon::new("Spear").with_properties(vec![WeaponProperty::Thrown])];

        character.run_base_sequence(&mut Advisories::quiet());
        let first = character.clone();
        character.run_base_sequence(&mut Advisories::quiet());

        assert_eq!(character, first);
        assert_eq!(character.ability(Ability::Constitution).adjusted, 17);
    }
}
