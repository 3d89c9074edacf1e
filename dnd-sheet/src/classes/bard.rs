use super::spellcasting::{SpellProgression, Spellcasting};
use super::{ClassFeature, ClassRules, Expertise, Postcalculator, TokenClass};
use crate::advisory::Advisories;
use crate::character::{Ability, Character};
use crate::dice::DieType;
use crate::resource::Recharge;

pub const BARDIC_INSPIRATION: &str = "Bardic Inspiration";

const SPELLCASTING: Spellcasting = Spellcasting::new(Ability::Charisma, SpellProgression::Full);

const EXPERTISE: Expertise = Expertise {
    unlock_level: 3,
    expanded_level: 10,
};

const JACK_OF_ALL_TRADES_LEVEL: u8 = 2;
const FONT_OF_INSPIRATION_LEVEL: u8 = 5;

const FEATURES: &[ClassFeature] = &[
    ClassFeature::new(1, "Spellcasting", "You can cast bard spells using Charisma as your spellcasting ability."),
    ClassFeature::new(1, "Bardic Inspiration", "As a bonus action, give one creature an inspiration die to add to one ability check, attack or save."),
    ClassFeature::new(2, "Jack of All Trades", "Add half your proficiency bonus, rounded down, to any ability check that doesn't already include it."),
    ClassFeature::new(2, "Song of Rest", "Allies who spend hit dice during your short rest regain extra hit points."),
    ClassFeature::new(3, "Bard College", "Choose a college that shapes your performance."),
    ClassFeature::new(3, "Expertise", "Double your proficiency bonus for two chosen skills."),
    ClassFeature::new(5, "Font of Inspiration", "You regain all expended Bardic Inspiration on a short or long rest."),
    ClassFeature::new(6, "Countercharm", "Use music to grant advantage on saves against being frightened or charmed."),
    ClassFeature::new(10, "Expertise", "Double your proficiency bonus for two more chosen skills."),
    ClassFeature::new(10, "Magical Secrets", "Learn two spells from any class."),
    ClassFeature::new(20, "Superior Inspiration", "Regain one use of Bardic Inspiration when you roll initiative with none left."),
];

#[derive(Debug, Clone, Copy, Default)]
pub struct Bard;

impl ClassRules for Bard {
    fn name(&self) -> &'static str {
        "Bard"
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

impl Postcalculator for Bard {
    fn postcalculate(&self, character: &mut Character, advisories: &mut Advisories) {
        SPELLCASTING.apply(character);

        if character.level >= JACK_OF_ALL_TRADES_LEVEL {
            let half = character.stats.proficiency_bonus / 2;
            for entry in character.skills.iter_mut().filter(|e| !e.proficient) {
                entry.modifier = entry.modifier.saturating_add(half);
            }
        }

        EXPERTISE.apply(character, advisories);

        let uses = character.modifier(Ability::Charisma).max(1) as u32;
        let recharge = if character.level >= FONT_OF_INSPIRATION_LEVEL {
            Recharge::ShortRest
        } else {
            Recharge::LongRest
        };
        character
            .ensure_resource(BARDIC_INSPIRATION, recharge)
            .set_maximum(uses);
    }
}

impl TokenClass for Bard {
    fn token_names(&self) -> &'static [&'static str] {
        &[BARDIC_INSPIRATION]
    }
}
