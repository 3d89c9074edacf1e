use super::{
    ClassFeature, ClassRules, Postcalculator, Precalculator, TokenClass, UnarmoredDefense,
};
use crate::advisory::Advisories;
use crate::character::{Ability, ArmorType, Character};
use crate::dice::DieType;
use crate::resource::Recharge;

pub const RAGE: &str = "Rage";

/// Bonus to STR and CON from Primal Champion.
const PRIMAL_CHAMPION_BONUS: u8 = 4;
const PRIMAL_CHAMPION_CAP: u8 = 24;
const FAST_MOVEMENT: u32 = 10;

const FEATURES: &[ClassFeature] = &[
    ClassFeature::new(1, "Rage", "Enter a rage as a bonus action for advantage on Strength checks, bonus damage and resistance to physical damage."),
    ClassFeature::new(1, "Unarmored Defense", "While not wearing armor, your AC equals 10 + DEX modifier + CON modifier."),
    ClassFeature::new(2, "Reckless Attack", "Gain advantage on melee Strength attacks this turn; attacks against you have advantage until your next turn."),
    ClassFeature::new(2, "Danger Sense", "Advantage on Dexterity saves against effects you can see."),
    ClassFeature::new(3, "Primal Path", "Choose a path that shapes the nature of your rage."),
    ClassFeature::new(5, "Extra Attack", "Attack twice when you take the Attack action."),
    ClassFeature::new(5, "Fast Movement", "Your speed increases by 10 feet while you aren't wearing heavy armor."),
    ClassFeature::new(7, "Feral Instinct", "Advantage on initiative rolls."),
    ClassFeature::new(9, "Brutal Critical", "Roll one additional weapon damage die on a critical hit."),
    ClassFeature::new(11, "Relentless Rage", "Drop to 1 hit point instead of 0 on a successful Constitution save while raging."),
    ClassFeature::new(15, "Persistent Rage", "Your rage ends early only if you fall unconscious or choose to end it."),
    ClassFeature::new(18, "Indomitable Might", "Use your Strength score in place of a lower Strength check total."),
    ClassFeature::new(20, "Primal Champion", "Your Strength and Constitution scores increase by 4, to a maximum of 24."),
];

pub fn rages(level: u8) -> u32 {
    match level {
        0 => 0,
        1..=2 => 2,
        3..=5 => 3,
        6..=11 => 4,
        12..=16 => 5,
        _ => 6,
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Barbarian;

impl ClassRules for Barbarian {
    fn name(&self) -> &'static str {
        "Barbarian"
    }

    fn hit_die(&self) -> DieType {
        DieType::D12
    }

    fn feature_table(&self) -> &'static [ClassFeature] {
        FEATURES
    }

    fn as_precalculator(&self) -> Option<&dyn Precalculator> {
        Some(self)
    }

    fn as_postcalculator(&self) -> Option<&dyn Postcalculator> {
        Some(self)
    }

    fn as_token_class(&self) -> Option<&dyn TokenClass> {
        Some(self)
    }
}

impl Precalculator for Barbarian {
    fn precalculate(&self, character: &mut Character, _advisories: &mut Advisories) {
        if character.level < 20 {
            return;
        }
        for ability in [Ability::Strength, Ability::Constitution] {
            let score = character.ability_mut(ability);
            score.score_cap = PRIMAL_CHAMPION_CAP;
            score.raise(PRIMAL_CHAMPION_BONUS);
        }
    }
}

impl Postcalculator for Barbarian {
    fn postcalculate(&self, character: &mut Character, _advisories: &mut Advisories) {
        UnarmoredDefense {
            first: Ability::Dexterity,
            second: Ability::Constitution,
            allows_shield: true,
        }
        .apply(character);

        let heavy = character
            .worn_armor
            .as_ref()
            .is_some_and(|armor| armor.armor_type == ArmorType::Heavy);
        if character.level >= 5 && !heavy {
            character.stats.speed = character.stats.speed.saturating_add(FAST_MOVEMENT);
        }

        let level = character.level;
        character
            .ensure_resource(RAGE, Recharge::LongRest)
            .set_maximum(rages(level));
    }
}

impl TokenClass for Barbarian {
    fn token_names(&self) -> &'static [&'static str] {
        &[RAGE]
    }
}
