use super::spellcasting::{SpellProgression, Spellcasting};
use super::{ClassFeature, ClassRules, Postcalculator, TokenClass};
use crate::advisory::Advisories;
use crate::character::{Ability, Character};
use crate::dice::DieType;
use crate::resource::Recharge;

pub const ARCANE_RECOVERY: &str = "Arcane Recovery";

const SPELLCASTING: Spellcasting = Spellcasting::new(Ability::Intelligence, SpellProgression::Full);

const FEATURES: &[ClassFeature] = &[
    ClassFeature::new(1, "Spellcasting", "You can cast wizard spells using Intelligence as your spellcasting ability."),
    ClassFeature::new(1, "Arcane Recovery", "Once per day during a short rest, recover spell slots with a combined level equal to half your wizard level (rounded up)."),
    ClassFeature::new(2, "Arcane Tradition", "Choose an arcane tradition to shape your practice of magic."),
    ClassFeature::new(18, "Spell Mastery", "Cast a chosen 1st-level and 2nd-level spell at their lowest level without expending a slot."),
    ClassFeature::new(20, "Signature Spells", "Two 3rd-level spells are always prepared and can each be cast once per short rest without a slot."),
];

#[derive(Debug, Clone, Copy, Default)]
pub struct Wizard;

impl ClassRules for Wizard {
    fn name(&self) -> &'static str {
        "Wizard"
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

impl Postcalculator for Wizard {
    fn postcalculate(&self, character: &mut Character, _advisories: &mut Advisories) {
        SPELLCASTING.apply(character);
        character
            .ensure_resource(ARCANE_RECOVERY, Recharge::LongRest)
            .set_maximum(1);
    }
}

impl TokenClass for Wizard {
    fn token_names(&self) -> &'static [&'static str] {
        &[ARCANE_RECOVERY]
    }
}
