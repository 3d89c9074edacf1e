//! End-to-end resolution tests through the public API.

use dnd_sheet::character::{AbilityImprovement, Armor, ArmorType, Weapon, WeaponProperty};
use dnd_sheet::testing::{sample_character, SheetHarness};
use dnd_sheet::{
    Ability, Advisory, Character, CharacterBuilder, CharacterClass, EngineConfig,
    ResolutionState, Skill, StatPipeline,
};

// =============================================================================
// BASE SEQUENCE
// =============================================================================

#[test]
fn test_rapier_attack_bonus() {
    let mut character = CharacterBuilder::new()
        .name("Vax")
        .class(CharacterClass::Rogue)
        .level(3)
        .ability_scores([13, 14, 10, 12, 10, 10])
        .skills(vec![
            Skill::Acrobatics,
            Skill::Stealth,
            Skill::Perception,
            Skill::Deception,
        ])
        .weapon(
            Weapon::new("Rapier")
                .with_properties(vec![WeaponProperty::Finesse])
                .proficient(),
        )
        .build()
        .unwrap();
    character.ability_mut(Ability::Strength).saving_throw_proficient = true;

    let resolution = StatPipeline::default().resolve(&mut character, None);

    assert_eq!(resolution.state, ResolutionState::Resolved);
    assert_eq!(character.modifier(Ability::Strength), 1);
    assert_eq!(character.modifier(Ability::Dexterity), 2);
    assert_eq!(character.ability(Ability::Strength).saving_throw, 3);
    // Finesse picks DEX +2, plus proficiency +2
    assert_eq!(character.weapon("Rapier").unwrap().computed_bonus, 4);
}

#[test]
fn test_modifier_table() {
    let mut character = Character::new("Table", "fighter");
    for score in 1..=20u8 {
        character.ability_mut(Ability::Wisdom).base = score;
        StatPipeline::default().resolve(&mut character, None);
        let expected = (score as i8 - 10).div_euclid(2);
        assert_eq!(character.modifier(Ability::Wisdom), expected, "score {score}");
    }
}

#[test]
fn test_proficiency_banding() {
    let mut character = Character::new("Bands", "fighter");
    for (level, bonus) in [(1, 2), (4, 2), (5, 3), (8, 3), (9, 4), (13, 5), (17, 6), (20, 6)] {
        character.level = level;
        StatPipeline::default().resolve(&mut character, None);
        assert_eq!(character.stats.proficiency_bonus, bonus, "level {level}");
    }
}

// =============================================================================
// IDEMPOTENCE
// =============================================================================

#[test]
fn test_every_class_is_idempotent() {
    for class in CharacterClass::all() {
        for level in [1, 2, 5, 10, 17, 20] {
            let mut harness = SheetHarness::new(*class, level);
            assert!(harness.is_idempotent(), "{class} level {level}");
        }
    }
}

#[test]
fn test_spent_pools_survive_repeated_passes() {
    let mut harness = SheetHarness::new(CharacterClass::Wizard, 5);
    harness.resolve();
    harness.character.spend_spell_slot(3).unwrap();

    harness.resolve();
    harness.resolve();
    assert_eq!(harness.character.spell_slot(3).unwrap().available(), 1);
}

// =============================================================================
// CLASS FEATURES
// =============================================================================

/// Number of skills whose modifier differs between two resolved sheets.
fn changed_skills(with: &Character, without: &Character) -> usize {
    Skill::ALL
        .iter()
        .filter(|s| with.skill(**s).modifier != without.skill(**s).modifier)
        .count()
}

#[test]
fn test_rogue_expertise_truncation() {
    let pipeline = StatPipeline::default();
    let rules = CharacterClass::Rogue.rules();
    let wishes = ["Stealth", "Acrobatics", "Perception", "Deception", "Athletics"];

    for (level, expected) in [(5, 2), (6, 4)] {
        let mut without = sample_character(CharacterClass::Rogue, level);
        let mut with = without.clone();
        with.expertise = wishes.map(String::from).to_vec();

        pipeline.resolve(&mut without, Some(rules.as_ref()));
        let resolution = pipeline.resolve(&mut with, Some(rules.as_ref()));

        assert!(resolution.is_clean());
        assert_eq!(changed_skills(&with, &without), expected, "level {level}");
    }
}

#[test]
fn test_barbarian_unarmored_defense() {
    let mut character = sample_character(CharacterClass::Barbarian, 1);
    character.ability_mut(Ability::Dexterity).base = 14;
    character.ability_mut(Ability::Constitution).base = 18;

    let rules = CharacterClass::Barbarian.rules();
    StatPipeline::default().resolve(&mut character, Some(rules.as_ref()));
    assert_eq!(character.stats.armor_class, 16);

    character.don_armor(Armor::new("Hide", ArmorType::Medium, 12));
    StatPipeline::default().resolve(&mut character, Some(rules.as_ref()));
    assert_eq!(character.stats.armor_class, 14);
}

#[test]
fn test_spellcasters_get_dc() {
    for class in CharacterClass::all() {
        let mut harness = SheetHarness::new(*class, 5);
        harness.resolve();
        let stats = &harness.character.stats;
        match class {
            CharacterClass::Barbarian
            | CharacterClass::Fighter
            | CharacterClass::Monk
            | CharacterClass::Rogue => {
                assert_eq!(stats.spellcasting_ability, None, "{class}");
                assert_eq!(stats.spell_save_dc, 0, "{class}");
            }
            _ => {
                // Every sample caster has at least +2 in its casting ability
                assert!(stats.spell_save_dc >= 8 + 3 + 2, "{class}");
            }
        }
    }
}

// =============================================================================
// ADVISORIES
// =============================================================================

#[test]
fn test_advisories_do_not_abort() {
    let mut character = sample_character(CharacterClass::Fighter, 4);
    character.fighting_styles = vec!["Kung Fu".to_string(), "Archery".to_string()];
    character.ability_improvements = vec![
        AbilityImprovement::new(Ability::Strength, 2),
        AbilityImprovement::new(Ability::Dexterity, 2),
    ];

    let pipeline = StatPipeline::new(EngineConfig::new().with_advisory_logging(false));
    let rules = CharacterClass::Fighter.rules();
    let resolution = pipeline.resolve(&mut character, Some(rules.as_ref()));

    assert!(resolution.is_resolved());
    assert_eq!(
        resolution.advisories,
        vec![
            Advisory::ImprovementCapExceeded {
                level: 4,
                granted: 4,
                allowed: 2,
            },
            Advisory::InvalidFightingStyle("Kung Fu".to_string()),
        ]
    );
    // The improvements were still applied
    assert_eq!(character.ability(Ability::Strength).adjusted, 17);
}
