use super::spellcasting::{SpellProgression, Spellcasting};
use super::{ClassFeature, ClassRules, Postcalculator, TokenClass};
use crate::advisory::Advisories;
use crate::character::{Ability, Character};
use crate::dice::DieType;
use crate::resource::Recharge;

pub const WILD_SHAPE: &str = "Wild Shape";

const SPELLCASTING: Spellcasting = Spellcasting::new(Ability::Wisdom, SpellProgression::Full);

const FEATURES: &[ClassFeature] = &[
    ClassFeature::new(1, "Druidic", "You know Druidic, the secret language of druids."),
    ClassFeature::new(1, "Spellcasting", "You can cast druid spells using Wisdom as your spellcasting ability."),
    ClassFeature::new(2, "Wild Shape", "Magically assume the shape of a beast you have seen before."),
    ClassFeature::new(2, "Druid Circle", "Choose a circle of druids to identify with."),
    ClassFeature::new(18, "Timeless Body", "You age more slowly, one year for every ten."),
    ClassFeature::new(18, "Beast Spells", "Cast many druid spells while in a beast shape."),
    ClassFeature::new(20, "Archdruid", "Use Wild Shape an unlimited number of times."),
];

pub fn wild_shape_uses(level: u8) -> u32 {
    if level >= 2 {
        2
    } else {
        0
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Druid;

impl ClassRules for Druid {
    fn name(&self) -> &'static str {
        "Druid"
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

impl Postcalculator for Druid {
    fn postcalculate(&self, character: &mut Character, _advisories: &mut Advisories) {
        SPELLCASTING.apply(character);
        let uses = wild_shape_uses(character.level);
        character
            .ensure_resource(WILD_SHAPE, Recharge::ShortRest)
            .set_maximum(uses);
    }
}

impl TokenClass for Druid {
    fn token_names(&self) -> &'static [&'static str] {
        &[WILD_SHAPE]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::StatPipeline;

    #[test]
    fn test_wild_shape() {
        let mut character = Character::new("Keyleth", "druid");
        character.level = 2;
        character.ability_mut(Ability::Wisdom).base = 16;
        StatPipeline::default().resolve(&mut character, Some(&Druid));

        assert_eq!(character.resource(WILD_SHAPE).unwrap().maximum(), 2);
        assert_eq!(Druid.use_token(&mut character, "wild shape", 2), Ok(0));
        assert_eq!(Druid.recover_token(&mut character, "", 1), Ok(1));
        character.short_rest();
        assert_eq!(character.resource(WILD_SHAPE).unwrap().available(), 2);
        assert_eq!(character.stats.spell_save_dc, 13);
    }

    #[test]
    fn test_no_wild_shape_at_first_level() {
        let mut character = Character::new("Keyleth", "druid");
        StatPipeline::default().resolve(&mut character, Some(&Druid));
        assert!(!character.resource(WILD_SHAPE).unwrap().is_unlocked());
    }
}
