use super::{ClassFeature, ClassRules, Postcalculator, TokenClass, UnarmoredDefense};
use crate::advisory::Advisories;
use crate::character::{Ability, Character};
use crate::dice::DieType;
use crate::resource::Recharge;

pub const KI: &str = "Ki";

const UNARMORED_DEFENSE: UnarmoredDefense = UnarmoredDefense {
    first: Ability::Dexterity,
    second: Ability::Wisdom,
    allows_shield: false,
};

const FEATURES: &[ClassFeature] = &[
    ClassFeature::new(1, "Unarmored Defense", "While wearing no armor and wielding no shield, your AC equals 10 + DEX modifier + WIS modifier."),
    ClassFeature::new(1, "Martial Arts", "Use Dexterity for unarmed strikes and monk weapons, and make an unarmed strike as a bonus action."),
    ClassFeature::new(2, "Ki", "Spend ki points to fuel Flurry of Blows, Patient Defense and Step of the Wind."),
    ClassFeature::new(2, "Unarmored Movement", "Your speed increases while you wear no armor and wield no shield."),
    ClassFeature::new(3, "Monastic Tradition", "Commit yourself to a monastic tradition."),
    ClassFeature::new(3, "Deflect Missiles", "Use your reaction to reduce damage from a ranged weapon attack."),
    ClassFeature::new(4, "Slow Fall", "Reduce falling damage by five times your monk level."),
    ClassFeature::new(5, "Extra Attack", "Attack twice when you take the Attack action."),
    ClassFeature::new(5, "Stunning Strike", "Spend 1 ki point to attempt to stun a creature you hit."),
    ClassFeature::new(6, "Ki-Empowered Strikes", "Your unarmed strikes count as magical."),
    ClassFeature::new(7, "Evasion", "Take no damage on a successful Dexterity save against area effects."),
    ClassFeature::new(7, "Stillness of Mind", "End one effect causing you to be charmed or frightened."),
    ClassFeature::new(10, "Purity of Body", "You are immune to disease and poison."),
    ClassFeature::new(13, "Tongue of the Sun and Moon", "You understand all spoken languages."),
    ClassFeature::new(14, "Diamond Soul", "Gain proficiency in all saving throws."),
    ClassFeature::new(15, "Timeless Body", "You no longer need food or water and suffer none of the frailty of old age."),
    ClassFeature::new(18, "Empty Body", "Spend ki to become invisible."),
    ClassFeature::new(20, "Perfect Self", "Regain 4 ki points when you roll initiative with none left."),
];

/// Speed bonus from Unarmored Movement.
pub fn unarmored_movement(level: u8) -> u32 {
    match level {
        0..=1 => 0,
        2..=5 => 10,
        6..=9 => 15,
        10..=13 => 20,
        14..=17 => 25,
        _ => 30,
    }
}

pub fn ki_points(level: u8) -> u32 {
    if level >= 2 {
        level as u32
    } else {
        0
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Monk;

impl ClassRules for Monk {
    fn name(&self) -> &'static str {
        "Monk"
    }

    fn hit_die(&self) -> DieType {
        DieType::D8
    }

    fn feature_table(&self) -> &'static [ClassFeature] {
        FEATURES
    }

    fn as_postcalculator(&self) -> Option<&dyn Postcalculator> {
        Some(self)
    }

    fn as_token_class(&self) -> Option<&dyn TokenClass> {
        Some(self)
    }
}

impl Postcalculator for Monk {
    fn postcalculate(&self, character: &mut Character, _advisories: &mut Advisories) {
        UNARMORED_DEFENSE.apply(character);

        if !character.wears_armor() && !character.shield_equipped() {
            character.stats.speed = character.stats.speed.saturating_add(unarmored_movement(character.level));
        }

        let points = ki_points(character.level);
        character
            .ensure_resource(KI, Recharge::ShortRest)
            .set_maximum(points);
    }
}

impl TokenClass for Monk {
    fn token_names(&self) -> &'static [&'static str] {
        &[KI]
    }
}
