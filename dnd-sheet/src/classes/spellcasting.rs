//! Spellcasting ability, save DC and spell slot maxima.

use crate::character::{Ability, Character};
use crate::resource::Recharge;

/// Spell save DC before proficiency and the casting modifier.
pub const SPELL_SAVE_BASE: i8 = 8;

/// Spell slots per spell level for a full caster, indexed by caster level.
const FULL_CASTER_SLOTS: [[u32; 9]; 20] = [
    [2, 0, 0, 0, 0, 0, 0, 0, 0],
    [3, 0, 0, 0, 0, 0, 0, 0, 0],
    [4, 2, 0, 0, 0, 0, 0, 0, 0],
    [4, 3, 0, 0, 0, 0, 0, 0, 0],
    [4, 3, 2, 0, 0, 0, 0, 0, 0],
    [4, 3, 3, 0, 0, 0, 0, 0, 0],
    [4, 3, 3, 1, 0, 0, 0, 0, 0],
    [4, 3, 3, 2, 0, 0, 0, 0, 0],
    [4, 3, 3, 3, 1, 0, 0, 0, 0],
    [4, 3, 3, 3, 2, 0, 0, 0, 0],
    [4, 3, 3, 3, 2, 1, 0, 0, 0],
    [4, 3, 3, 3, 2, 1, 0, 0, 0],
    [4, 3, 3, 3, 2, 1, 1, 0, 0],
    [4, 3, 3, 3, 2, 1, 1, 0, 0],
    [4, 3, 3, 3, 2, 1, 1, 1, 0],
    [4, 3, 3, 3, 2, 1, 1, 1, 0],
    [4, 3, 3, 3, 2, 1, 1, 1, 1],
    [4, 3, 3, 3, 3, 1, 1, 1, 1],
    [4, 3, 3, 3, 3, 2, 1, 1, 1],
    [4, 3, 3, 3, 3, 2, 2, 1, 1],
];

/// How a class gains spell slots as it levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpellProgression {
    /// Bard, cleric, druid, sorcerer, wizard.
    Full,
    /// Paladin and ranger: the full table at half level, from level 2.
    Half,
    /// Warlock: a few slots, all of one level, back on a short rest.
    Pact,
}

impl SpellProgression {
    /// Slot maxima for spell levels 1 through 9 at a class level.
    pub fn slots(&self, level: u8) -> [u32; 9] {
        match self {
            SpellProgression::Full => full_caster_slots(level),
            SpellProgression::Half => {
                if level < 2 {
                    [0; 9]
                } else {
                    full_caster_slots(level.div_ceil(2))
                }
            }
            SpellProgression::Pact => {
                let mut slots = [0; 9];
                if level > 0 {
                    slots[(pact_slot_level(level) - 1) as usize] = pact_slot_count(level);
                }
                slots
            }
        }
    }

    /// First class level with any spellcasting at all.
    pub fn first_level(&self) -> u8 {
        match self {
            SpellProgression::Half => 2,
            _ => 1,
        }
    }

    fn recharge(&self) -> Recharge {
        match self {
            SpellProgression::Pact => Recharge::ShortRest,
            _ => Recharge::LongRest,
        }
    }
}

fn full_caster_slots(level: u8) -> [u32; 9] {
    match level {
        0 => [0; 9],
        n => FULL_CASTER_SLOTS[(n.min(20) - 1) as usize],
    }
}

pub fn pact_slot_count(level: u8) -> u32 {
    match level {
        0 => 0,
        1 => 1,
        2..=10 => 2,
        11..=16 => 3,
        _ => 4,
    }
}

pub fn pact_slot_level(level: u8) -> u8 {
    level.div_ceil(2).clamp(1, 5)
}

/// A class's spellcasting feature.
#[derive(Debug, Clone, Copy)]
pub struct Spellcasting {
    pub ability: Ability,
    pub progression: SpellProgression,
}

impl Spellcasting {
    pub const fn new(ability: Ability, progression: SpellProgression) -> Self {
        Self {
            ability,
            progression,
        }
    }

    /// Record the casting ability, save DC and attack modifier, and bring
    /// every spell slot pool's maximum in line with the class level.
    pub fn apply(&self, character: &mut Character) {
        let slots = self.progression.slots(character.level);
        let recharge = self.progression.recharge();
        for (pool, maximum) in character.spell_slots.iter_mut().zip(slots) {
            pool.set_maximum(maximum);
            pool.recharge = recharge;
        }

        if character.level < self.progression.first_level() {
            return;
        }
        let modifier = character.modifier(self.ability);
        let proficiency = character.stats.proficiency_bonus;
        character.stats.spellcasting_ability = Some(self.ability);
        character.stats.spell_attack_mod = proficiency.saturating_add(modifier);
        character.stats.spell_save_dc = SPELL_SAVE_BASE.saturating_add(character.stats.spell_attack_mod);
    }
}
