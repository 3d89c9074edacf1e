use super::spellcasting::{SpellProgression, Spellcasting};
use super::{ClassFeature, ClassRules, Postcalculator};
use crate::advisory::Advisories;
use crate::character::{Ability, Character};
use crate::dice::DieType;

const PACT_MAGIC: Spellcasting = Spellcasting::new(Ability::Charisma, SpellProgression::Pact);

const FEATURES: &[ClassFeature] = &[
    ClassFeature::new(1, "Otherworldly Patron", "You have struck a bargain with an otherworldly being."),
    ClassFeature::new(1, "Pact Magic", "You can cast warlock spells using Charisma. Your spell slots recover on a short rest."),
    ClassFeature::new(2, "Eldritch Invocations", "Learn fragments of forbidden knowledge that grant lasting magical abilities."),
    ClassFeature::new(3, "Pact Boon", "Your patron grants you a blade, chain or tome."),
    ClassFeature::new(11, "Mystic Arcanum", "Cast one 6th-level spell once per long rest without a slot."),
    ClassFeature::new(20, "Eldritch Master", "Regain all expended Pact Magic slots by entreating your patron for one minute."),
];

#[derive(Debug, Clone, Copy, Default)]
pub struct Warlock;

impl ClassRules for Warlock {
    fn name(&self) -> &'static str {
        "Warlock"
    }

    fn hit_die(&self) -> DieType {
        DieType::D8
    }

    fn spellcasting(&self) -> Option<Spellcasting> {
        Some(PACT_MAGIC)
    }

    fn feature_table(&self) -> &'static [ClassFeature] {
        FEATURES
    }

    fn as_postcalculator(&self) -> Option<&dyn Postcalculator> {
        Some(self)
    }
}

impl Postcalculator for Warlock {
    fn postcalculate(&self, character: &mut Character, _advisories: &mut Advisories) {
        PACT_MAGIC.apply(character);
    }
}
