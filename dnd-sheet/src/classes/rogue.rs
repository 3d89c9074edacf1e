use super::{ClassFeature, ClassRules, Expertise, Postcalculator};
use crate::advisory::Advisories;
use crate::character::Character;
use crate::dice::DieType;

const IMPROVEMENT_LEVELS: &[u8] = &[4, 8, 10, 12, 16, 19];

const EXPERTISE: Expertise = Expertise {
    unlock_level: 1,
    expanded_level: 6,
};

const FEATURES: &[ClassFeature] = &[
    ClassFeature::new(1, "Expertise", "Double your proficiency bonus for two chosen skills."),
    ClassFeature::new(1, "Sneak Attack", "Deal extra damage once per turn when you have advantage or an ally is adjacent to your target."),
    ClassFeature::new(1, "Thieves' Cant", "You know the secret mix of dialect, jargon and code of thieves."),
    ClassFeature::new(2, "Cunning Action", "Dash, Disengage or Hide as a bonus action."),
    ClassFeature::new(3, "Roguish Archetype", "Choose an archetype that you emulate."),
    ClassFeature::new(5, "Uncanny Dodge", "Use your reaction to halve the damage of an attack that hits you."),
    ClassFeature::new(6, "Expertise", "Double your proficiency bonus for two more chosen skills."),
    ClassFeature::new(7, "Evasion", "Take no damage on a successful Dexterity save against area effects."),
    ClassFeature::new(11, "Reliable Talent", "Treat a d20 roll of 9 or lower as a 10 on proficient ability checks."),
    ClassFeature::new(14, "Blindsense", "Know the location of hidden or invisible creatures within 10 feet."),
    ClassFeature::new(15, "Slippery Mind", "Gain proficiency in Wisdom saving throws."),
    ClassFeature::new(18, "Elusive", "No attack roll has advantage against you while you aren't incapacitated."),
    ClassFeature::new(20, "Stroke of Luck", "Turn a miss into a hit or a failed check into a 20."),
];

#[derive(Debug, Clone, Copy, Default)]
pub struct Rogue;

impl ClassRules for Rogue {
    fn name(&self) -> &'static str {
        "Rogue"
    }

    fn hit_die(&self) -> DieType {
        DieType::D8
    }

    fn feature_table(&self) -> &'static [ClassFeature] {
        FEATURES
    }

    fn improvement_levels(&self) -> &'static [u8] {
        IMPROVEMENT_LEVELS
    }

    fn as_postcalculator(&self) -> Option<&dyn Postcalculator> {
        Some(self)
    }
}

impl Postcalculator for Rogue {
    fn postcalculate(&self, character: &mut Character, advisories: &mut Advisories) {
        EXPERTISE.apply(character, advisories);
    }
}
