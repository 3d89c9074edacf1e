use super::spellcasting::{SpellProgression, Spellcasting};
use super::{ClassFeature, ClassRules, Postcalculator, TokenClass};
use crate::advisory::Advisories;
use crate::character::{Ability, Character};
use crate::dice::DieType;
use crate::resource::Recharge;

pub const SORCERY_POINTS: &str = "Sorcery Points";

const SPELLCASTING: Spellcasting = Spellcasting::new(Ability::Charisma, SpellProgression::Full);

const FEATURES: &[ClassFeature] = &[
    ClassFeature::new(1, "Spellcasting", "You can cast sorcerer spells using Charisma as your spellcasting ability."),
    ClassFeature::new(1, "Sorcerous Origin", "Choose the source of your innate magical power."),
    ClassFeature::new(2, "Font of Magic", "Tap into a wellspring of sorcery points to create spell slots or fuel metamagic."),
    ClassFeature::new(3, "Metamagic", "Twist your spells to suit your needs."),
    ClassFeature::new(20, "Sorcerous Restoration", "Regain 4 expended sorcery points on a short rest."),
];

pub fn sorcery_points(level: u8) -> u32 {
    if level >= 2 {
        level as u32
    } else {
        0
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Sorcerer;

impl ClassRules for Sorcerer {
    fn name(&self) -> &'static str {
        "Sorcerer"
    }

    fn hit_die(&self) -> DieType {
        DieType::D6
    }

    fn spellcasting(&self) -> Option<Spellcasting> {
        Some(SPELLCASTING)
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

impl Postcalculator for Sorcerer {
    fn postcalculate(&self, character: &mut Character, _advisories: &mut Advisories) {
        SPELLCASTING.apply(character);
        let points = sorcery_points(character.level);
        character
            .ensure_resource(SORCERY_POINTS, Recharge::LongRest)
            .set_maximum(points);
    }
}

impl TokenClass for Sorcerer {
    fn token_names(&self) -> &'static [&'static str] {
        &[SORCERY_POINTS]
    }
}
