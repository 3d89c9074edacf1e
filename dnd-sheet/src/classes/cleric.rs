use super::spellcasting::{SpellProgression, Spellcasting};
use super::{ClassFeature, ClassRules, Postcalculator, TokenClass};
use crate::advisory::Advisories;
use crate::character::{Ability, Character};
use crate::dice::DieType;
use crate::resource::Recharge;

pub const CHANNEL_DIVINITY: &str = "Channel Divinity";

const SPELLCASTING: Spellcasting = Spellcasting::new(Ability::Wisdom, SpellProgression::Full);

const FEATURES: &[ClassFeature] = &[
    ClassFeature::new(1, "Spellcasting", "You can cast cleric spells using Wisdom as your spellcasting ability."),
    ClassFeature::new(1, "Divine Domain", "Choose a divine domain that grants you additional spells and features."),
    ClassFeature::new(2, "Channel Divinity", "Channel divine energy to fuel magical effects such as Turn Undead."),
    ClassFeature::new(5, "Destroy Undead", "Undead that fail the save against your Turn Undead are destroyed outright."),
    ClassFeature::new(10, "Divine Intervention", "Call on your deity to intervene on your behalf."),
];

pub fn channel_divinity_uses(level: u8) -> u32 {
    match level {
        0..=1 => 0,
        2..=5 => 1,
        6..=17 => 2,
        _ => 3,
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Cleric;

impl ClassRules for Cleric {
    fn name(&self) -> &'static str {
        "Cleric"
    }

    fn hit_die(&self) -> DieType {
        DieType::D8
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

impl Postcalculator for Cleric {
    fn postcalculate(&self, character: &mut Character, _advisories: &mut Advisories) {
        SPELLCASTING.apply(character);
        let uses = channel_divinity_uses(character.level);
        character
            .ensure_resource(CHANNEL_DIVINITY, Recharge::ShortRest)
            .set_maximum(uses);
    }
}

impl TokenClass for Cleric {
    fn token_names(&self) -> &'static [&'static str] {
        &[CHANNEL_DIVINITY]
    }
}
