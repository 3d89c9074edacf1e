use super::spellcasting::{SpellProgression, Spellcasting};
use super::{apply_fighting_styles, ClassFeature, ClassRules, Postcalculator};
use crate::advisory::Advisories;
use crate::character::{Ability, Character};
use crate::dice::DieType;

const SPELLCASTING: Spellcasting = Spellcasting::new(Ability::Wisdom, SpellProgression::Half);

const FIGHTING_STYLE_LEVEL: u8 = 2;

const FEATURES: &[ClassFeature] = &[
    ClassFeature::new(1, "Favored Enemy", "Advantage on Survival checks to track, and Intelligence checks to recall information about, your favored enemies."),
    ClassFeature::new(1, "Natural Explorer", "You are particularly familiar with one type of natural environment."),
    ClassFeature::new(2, "Fighting Style", "Adopt a particular style of fighting as your specialty."),
    ClassFeature::new(2, "Spellcasting", "You can cast ranger spells using Wisdom as your spellcasting ability."),
    ClassFeature::new(3, "Ranger Archetype", "Choose an archetype to emulate."),
    ClassFeature::new(3, "Primeval Awareness", "Expend a spell slot to sense certain creature types nearby."),
    ClassFeature::new(5, "Extra Attack", "Attack twice when you take the Attack action."),
    ClassFeature::new(8, "Land's Stride", "Moving through nonmagical difficult terrain costs no extra movement."),
    ClassFeature::new(10, "Hide in Plain Sight", "Camouflage yourself for a +10 bonus to Stealth while motionless."),
    ClassFeature::new(14, "Vanish", "Hide as a bonus action and can't be tracked by nonmagical means."),
    ClassFeature::new(18, "Feral Senses", "Attack creatures you can't see without disadvantage."),
    ClassFeature::new(20, "Foe Slayer", "Add your Wisdom modifier to one attack or damage roll against a favored enemy each turn."),
];

#[derive(Debug, Clone, Copy, Default)]
pub struct Ranger;

impl ClassRules for Ranger {
    fn name(&self) -> &'static str {
        "Ranger"
    }

    fn hit_die(&self) -> DieType {
        DieType::D10
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
}

impl Postcalculator for Ranger {
    fn postcalculate(&self, character: &mut Character, advisories: &mut Advisories) {
        SPELLCASTING.apply(character);
        let styles = if character.level >= FIGHTING_STYLE_LEVEL { 1 } else { 0 };
        apply_fighting_styles(character, styles, advisories);
    }
}
