use super::spellcasting::{SpellProgression, Spellcasting};
use super::{apply_fighting_styles, ClassFeature, ClassRules, Postcalculator, TokenClass};
use crate::advisory::Advisories;
use crate::character::{Ability, Character};
use crate::dice::DieType;
use crate::resource::Recharge;

pub const DIVINE_SENSE: &str = "Divine Sense";
pub const LAY_ON_HANDS: &str = "Lay on Hands";

const SPELLCASTING: Spellcasting = Spellcasting::new(Ability::Charisma, SpellProgression::Half);

const FIGHTING_STYLE_LEVEL: u8 = 2;

const FEATURES: &[ClassFeature] = &[
    ClassFeature::new(1, "Divine Sense", "Sense the presence of celestials, fiends and undead nearby."),
    ClassFeature::new(1, "Lay on Hands", "Restore hit points from a pool equal to five times your paladin level."),
    ClassFeature::new(2, "Fighting Style", "Adopt a particular style of fighting as your specialty."),
    ClassFeature::new(2, "Spellcasting", "You can cast paladin spells using Charisma as your spellcasting ability."),
    ClassFeature::new(2, "Divine Smite", "Expend a spell slot to deal extra radiant damage on a melee hit."),
    ClassFeature::new(3, "Divine Health", "You are immune to disease."),
    ClassFeature::new(3, "Sacred Oath", "Swear the oath that binds you as a paladin forever."),
    ClassFeature::new(5, "Extra Attack", "Attack twice when you take the Attack action."),
    ClassFeature::new(6, "Aura of Protection", "You and nearby allies add your Charisma modifier to saving throws."),
    ClassFeature::new(10, "Aura of Courage", "You and nearby allies can't be frightened."),
    ClassFeature::new(11, "Improved Divine Smite", "Your melee weapon hits deal an extra 1d8 radiant damage."),
    ClassFeature::new(14, "Cleansing Touch", "End one spell on yourself or a willing creature you touch."),
];

#[derive(Debug, Clone, Copy, Default)]
pub struct Paladin;

impl ClassRules for Paladin {
    fn name(&self) -> &'static str {
        "Paladin"
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

    fn as_token_class(&self) -> Option<&dyn TokenClass> {
        Some(self)
    }
}

impl Postcalculator for Paladin {
    fn postcalculate(&self, character: &mut Character, advisories: &mut Advisories) {
        SPELLCASTING.apply(character);

        let level = character.level;
        let styles = if level >= FIGHTING_STYLE_LEVEL { 1 } else { 0 };
        apply_fighting_styles(character, styles, advisories);

        let senses = u32::try_from(character.modifier(Ability::Charisma).saturating_add(1))
            .unwrap_or(0)
            .max(1);
        character
            .ensure_resource(DIVINE_SENSE, Recharge::LongRest)
            .set_maximum(senses);
        character
            .ensure_resource(LAY_ON_HANDS, Recharge::LongRest)
            .set_maximum(5 * level as u32);
    }
}

impl TokenClass for Paladin {
    fn token_names(&self) -> &'static [&'static str] {
        &[DIVINE_SENSE, LAY_ON_HANDS]
    }
}
