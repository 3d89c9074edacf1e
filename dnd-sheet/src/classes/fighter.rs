use super::{apply_fighting_styles, ClassFeature, ClassRules, Postcalculator, TokenClass};
use crate::advisory::Advisories;
use crate::character::Character;
use crate::dice::DieType;
use crate::resource::Recharge;

pub const SECOND_WIND: &str = "Second Wind";
pub const ACTION_SURGE: &str = "Action Surge";
pub const INDOMITABLE: &str = "Indomitable";

const IMPROVEMENT_LEVELS: &[u8] = &[4, 6, 8, 12, 14, 16, 19];

const FEATURES: &[ClassFeature] = &[
    ClassFeature::new(1, "Fighting Style", "Adopt a particular style of fighting as your specialty."),
    ClassFeature::new(1, "Second Wind", "As a bonus action, regain 1d10 + fighter level hit points."),
    ClassFeature::new(2, "Action Surge", "Take one additional action on your turn."),
    ClassFeature::new(3, "Martial Archetype", "Choose an archetype that reflects your combat techniques."),
    ClassFeature::new(5, "Extra Attack", "Attack twice when you take the Attack action."),
    ClassFeature::new(9, "Indomitable", "Reroll a saving throw that you fail."),
    ClassFeature::new(10, "Additional Fighting Style", "Choose a second fighting style."),
    ClassFeature::new(11, "Extra Attack (2)", "Attack three times when you take the Attack action."),
    ClassFeature::new(20, "Extra Attack (3)", "Attack four times when you take the Attack action."),
];

pub fn fighting_styles_allowed(level: u8) -> usize {
    if level >= 10 {
        2
    } else {
        1
    }
}

pub fn action_surges(level: u8) -> u32 {
    match level {
        0..=1 => 0,
        2..=16 => 1,
        _ => 2,
    }
}

pub fn indomitable_uses(level: u8) -> u32 {
    match level {
        0..=8 => 0,
        9..=12 => 1,
        13..=16 => 2,
        _ => 3,
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Fighter;

impl ClassRules for Fighter {
    fn name(&self) -> &'static str {
        "Fighter"
    }

    fn hit_die(&self) -> DieType {
        DieType::D10
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

    fn as_token_class(&self) -> Option<&dyn TokenClass> {
        Some(self)
    }
}

impl Postcalculator for Fighter {
    fn postcalculate(&self, character: &mut Character, advisories: &mut Advisories) {
        let level = character.level;
        apply_fighting_styles(character, fighting_styles_allowed(level), advisories);

        character
            .ensure_resource(SECOND_WIND, Recharge::ShortRest)
            .set_maximum(1);
        character
            .ensure_resource(ACTION_SURGE, Recharge::ShortRest)
            .set_maximum(action_surges(level));
        character
            .ensure_resource(INDOMITABLE, Recharge::LongRest)
            .set_maximum(indomitable_uses(level));
    }
}

impl TokenClass for Fighter {
    fn token_names(&self) -> &'static [&'static str] {
        &[SECOND_WIND, ACTION_SURGE, INDOMITABLE]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advisory::Advisory;
    use crate::character::{Ability, AbilityImprovement, Armor, ArmorType, Weapon};
    use crate::pipeline::StatPipeline;

    fn fighter(level: u8) -> Character {
        let mut character = Character::new("Roland", "fighter");
        character.level = level;
        character.ability_mut(Ability::Strength).base = 16;
        character.ability_mut(Ability::Dexterity).base = 14;
        character.weapons = vec![
            Weapon::new("Longsword").proficient(),
            Weapon::new("Longbow").ranged().proficient(),
        ];
        character.don_armor(Armor::new("Chain Mail", ArmorType::Heavy, 16));
        character
    }

    #[test]
    fn test_resource_progression() {
        assert_eq!(action_surges(1), 0);
        assert_eq!(action_surges(2), 1);
        assert_eq!(action_surges(17), 2);
        assert_eq!(indomitable_uses(8), 0);
        assert_eq!(indomitable_uses(9), 1);
        assert_eq!(indomitable_uses(13), 2);
        assert_eq!(indomitable_uses(17), 3);
    }

    #[test]
    fn test_extra_improvement_levels() {
        let mut character = fighter(6);
        character.ability_improvements = vec![
            AbilityImprovement::new(Ability::Strength, 2),
            AbilityImprovement::new(Ability::Constitution, 2),
        ];
        let resolution = StatPipeline::default().resolve(&mut character, Some(&Fighter));
        assert!(resolution.advisories.is_empty());
    }

    #[test]
    fn test_archery_and_defense() {
        let mut character = fighter(1);
        character.fighting_styles = vec!["Archery".to_string()];
        StatPipeline::default().resolve(&mut character, Some(&Fighter));
        assert_eq!(character.weapon("Longbow").unwrap().computed_bonus, 6);
        assert_eq!(character.weapon("Longsword").unwrap().computed_bonus, 5);
        assert_eq!(character.stats.armor_class, 16);

        character.fighting_styles = vec!["Defense".to_string()];
        StatPipeline::default().resolve(&mut character, Some(&Fighter));
        assert_eq!(character.weapon("Longbow").unwrap().computed_bonus, 4);
        assert_eq!(character.stats.armor_class, 17);
    }

    #[test]
    fn test_second_style_at_tenth_level() {
        let mut character = fighter(9);
        character.fighting_styles = vec!["Archery".to_string(), "Defense".to_string()];
        let resolution = StatPipeline::default().resolve(&mut character, Some(&Fighter));
        assert_eq!(resolution.advisories.len(), 1);
        assert_eq!(character.stats.armor_class, 16);

        character.level = 10;
        let resolution = StatPipeline::default().resolve(&mut character, Some(&Fighter));
        assert!(resolution.advisories.is_empty());
        assert_eq!(character.stats.armor_class, 17);
    }

    #[test]
    fn test_unknown_style_is_advisory() {
        let mut character = fighter(1);
        character.fighting_styles = vec!["Berserking".to_string()];
        let resolution = StatPipeline::default().resolve(&mut character, Some(&Fighter));
        assert_eq!(
            resolution.advisories,
            vec![Advisory::InvalidFightingStyle("Berserking".to_string())]
        );
    }

    #[test]
    fn test_named_tokens() {
        let mut character = fighter(2);
        StatPipeline::default().resolve(&mut character, Some(&Fighter));

        assert_eq!(Fighter.use_token(&mut character, "action surge", 1), Ok(0));
        assert_eq!(Fighter.use_token(&mut character, SECOND_WIND, 1), Ok(0));
        assert_eq!(
            Fighter.use_token(&mut character, INDOMITABLE, 1),
            Err(Advisory::PoolLocked {
                pool: INDOMITABLE.to_string()
            })
        );
        assert_eq!(
            Fighter.use_token(&mut character, "Rage", 1),
            Err(Advisory::UnknownToken {
                class: "Fighter".to_string(),
                name: "Rage".to_string(),
            })
        );

        character.short_rest();
        assert_eq!(character.resource(ACTION_SURGE).unwrap().available(), 1);
        assert_eq!(character.resource(SECOND_WIND).unwrap().available(), 1);
    }
}
