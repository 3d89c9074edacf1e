//! D&D 5e character sheet types.
//!
//! A [`Character`] holds input fields (base scores, proficiency flags,
//! equipment, level) populated by a loader, and derived fields that stay
//! zeroed until a [`StatPipeline`](crate::pipeline::StatPipeline) pass
//! fills them in.

use crate::advisory::Advisory;
use crate::dice::HitDice;
use crate::resource::{recover_all, Recharge, ResourcePool};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

// ============================================================================
// ID Types
// ============================================================================

/// Unique identifier for characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CharacterId(pub Uuid);

impl CharacterId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CharacterId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Ability Scores
// ============================================================================

/// The six ability scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Ability {
    Strength,
    Dexterity,
    Constitution,
    Intelligence,
    Wisdom,
    Charisma,
}

impl Ability {
    pub fn abbreviation(&self) -> &'static str {
        match self {
            Ability::Strength => "STR",
            Ability::Dexterity => "DEX",
            Ability::Constitution => "CON",
            Ability::Intelligence => "INT",
            Ability::Wisdom => "WIS",
            Ability::Charisma => "CHA",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Ability::Strength => "Strength",
            Ability::Dexterity => "Dexterity",
            Ability::Constitution => "Constitution",
            Ability::Intelligence => "Intelligence",
            Ability::Wisdom => "Wisdom",
            Ability::Charisma => "Charisma",
        }
    }

    pub fn all() -> [Ability; 6] {
        [
            Ability::Strength,
            Ability::Dexterity,
            Ability::Constitution,
            Ability::Intelligence,
            Ability::Wisdom,
            Ability::Charisma,
        ]
    }

    /// Position of this ability in a character's ability table.
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for Ability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.abbreviation())
    }
}

/// Ceiling for an adjusted score unless a class feature raises it.
pub const DEFAULT_SCORE_CAP: u8 = 20;

fn default_score_cap() -> u8 {
    DEFAULT_SCORE_CAP
}

/// One ability score with its working and derived values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityScore {
    pub ability: Ability,
    /// Rolled or assigned score. Never changed by resolution.
    pub base: u8,
    #[serde(default)]
    pub saving_throw_proficient: bool,

    /// Working score: reset to `base` every pass, then raised by class
    /// features and improvements.
    #[serde(default)]
    pub adjusted: u8,
    #[serde(default = "default_score_cap")]
    pub score_cap: u8,
    #[serde(default)]
    pub modifier: i8,
    #[serde(default)]
    pub saving_throw: i8,
}

impl AbilityScore {
    pub fn new(ability: Ability, base: u8) -> Self {
        Self {
            ability,
            base,
            saving_throw_proficient: false,
            adjusted: 0,
            score_cap: DEFAULT_SCORE_CAP,
            modifier: 0,
            saving_throw: 0,
        }
    }

    /// Raise the working score, never past the current cap.
    pub fn raise(&mut self, amount: u8) {
        self.adjusted = self.adjusted.saturating_add(amount).min(self.score_cap);
    }
}

/// Ability modifier for a score: floor((score - 10) / 2).
pub fn ability_modifier(score: u8) -> i8 {
    // Floor division, so 9 maps to -1 rather than 0
    let modifier = (i16::from(score) - 10).div_euclid(2);
    i8::try_from(modifier).unwrap_or(i8::MAX)
}

/// A pending ability score improvement granted at some level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityImprovement {
    pub ability: Ability,
    pub bonus: u8,
}

impl AbilityImprovement {
    pub fn new(ability: Ability, bonus: u8) -> Self {
        Self { ability, bonus }
    }
}

// ============================================================================
// Skills
// ============================================================================

/// D&D 5e skills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Skill {
    Athletics,
    Acrobatics,
    SleightOfHand,
    Stealth,
    Arcana,
    History,
    Investigation,
    Nature,
    Religion,
    AnimalHandling,
    Insight,
    Medicine,
    Perception,
    Survival,
    Deception,
    Intimidation,
    Performance,
    Persuasion,
}

impl Skill {
    pub const ALL: [Skill; 18] = [
        Skill::Athletics,
        Skill::Acrobatics,
        Skill::SleightOfHand,
        Skill::Stealth,
        Skill::Arcana,
        Skill::History,
        Skill::Investigation,
        Skill::Nature,
        Skill::Religion,
        Skill::AnimalHandling,
        Skill::Insight,
        Skill::Medicine,
        Skill::Perception,
        Skill::Survival,
        Skill::Deception,
        Skill::Intimidation,
        Skill::Performance,
        Skill::Persuasion,
    ];

    pub fn ability(&self) -> Ability {
        match self {
            Skill::Athletics => Ability::Strength,
            Skill::Acrobatics | Skill::SleightOfHand | Skill::Stealth => Ability::Dexterity,
            Skill::Arcana
            | Skill::History
            | Skill::Investigation
            | Skill::Nature
            | Skill::Religion => Ability::Intelligence,
            Skill::AnimalHandling
            | Skill::Insight
            | Skill::Medicine
            | Skill::Perception
            | Skill::Survival => Ability::Wisdom,
            Skill::Deception | Skill::Intimidation | Skill::Performance | Skill::Persuasion => {
                Ability::Charisma
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Skill::Athletics => "Athletics",
            Skill::Acrobatics => "Acrobatics",
            Skill::SleightOfHand => "Sleight of Hand",
            Skill::Stealth => "Stealth",
            Skill::Arcana => "Arcana",
            Skill::History => "History",
            Skill::Investigation => "Investigation",
            Skill::Nature => "Nature",
            Skill::Religion => "Religion",
            Skill::AnimalHandling => "Animal Handling",
            Skill::Insight => "Insight",
            Skill::Medicine => "Medicine",
            Skill::Perception => "Perception",
            Skill::Survival => "Survival",
            Skill::Deception => "Deception",
            Skill::Intimidation => "Intimidation",
            Skill::Performance => "Performance",
            Skill::Persuasion => "Persuasion",
        }
    }

    /// Position of this skill in a character's skill table.
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for Skill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Lowercase and drop separators so "Sleight of Hand", "sleight_of_hand"
/// and "SleightOfHand" compare equal.
fn normalize_key(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

impl FromStr for Skill {
    type Err = Advisory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = normalize_key(s);
        Skill::ALL
            .into_iter()
            .find(|skill| normalize_key(skill.name()) == key)
            .ok_or_else(|| Advisory::UnknownSkill(s.to_string()))
    }
}

/// A skill row on the sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillEntry {
    pub skill: Skill,
    #[serde(default)]
    pub proficient: bool,
    #[serde(default)]
    pub modifier: i8,
}

impl SkillEntry {
    pub fn new(skill: Skill) -> Self {
        Self {
            skill,
            proficient: false,
            modifier: 0,
        }
    }
}

// ============================================================================
// Armor and Weapons
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArmorType {
    Light,
    Medium,
    Heavy,
}

/// Worn body armor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Armor {
    pub name: String,
    pub armor_type: ArmorType,
    pub base_ac: u8,
}

impl Armor {
    pub fn new(name: impl Into<String>, armor_type: ArmorType, base_ac: u8) -> Self {
        Self {
            name: name.into(),
            armor_type,
            base_ac,
        }
    }
}

/// Weapon properties per D&D 5e.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeaponProperty {
    Finesse,
    Light,
    Heavy,
    TwoHanded,
    Versatile(String),
    Thrown,
    Ammunition,
    Loading,
    Reach,
}

/// A weapon the character carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Weapon {
    pub name: String,
    #[serde(default)]
    pub properties: Vec<WeaponProperty>,
    #[serde(default)]
    pub ranged: bool,
    #[serde(default)]
    pub proficient: bool,
    /// User override, always added on top of the computed bonus.
    #[serde(default)]
    pub custom_bonus: i8,
    #[serde(default)]
    pub computed_bonus: i8,
}

impl Weapon {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            properties: Vec::new(),
            ranged: false,
            proficient: false,
            custom_bonus: 0,
            computed_bonus: 0,
        }
    }

    pub fn with_properties(mut self, properties: Vec<WeaponProperty>) -> Self {
        self.properties = properties;
        self
    }

    pub fn ranged(mut self) -> Self {
        self.ranged = true;
        self
    }

    pub fn proficient(mut self) -> Self {
        self.proficient = true;
        self
    }

    pub fn with_custom_bonus(mut self, bonus: i8) -> Self {
        self.custom_bonus = bonus;
        self
    }

    pub fn is_finesse(&self) -> bool {
        self.properties.contains(&WeaponProperty::Finesse)
    }

    pub fn is_thrown(&self) -> bool {
        self.properties.contains(&WeaponProperty::Thrown)
    }

    pub fn is_two_handed(&self) -> bool {
        self.properties.contains(&WeaponProperty::TwoHanded)
    }
}

/// A hand slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EquipSlot {
    Primary,
    Secondary,
}

impl FromStr for EquipSlot {
    type Err = Advisory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_key(s).as_str() {
            "primary" | "main" | "mainhand" => Ok(EquipSlot::Primary),
            "secondary" | "off" | "offhand" => Ok(EquipSlot::Secondary),
            _ => Err(Advisory::InvalidEquipmentSlot(s.to_string())),
        }
    }
}

// ============================================================================
// Derived Stats
// ============================================================================

/// A class feature the character has at their current level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feature {
    pub level: u8,
    pub name: String,
    pub description: String,
}

/// Values computed by a resolution pass. Zeroed until the first pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedStats {
    pub proficiency_bonus: i8,
    pub armor_class: i8,
    pub passive_perception: i8,
    pub passive_insight: i8,
    pub spellcasting_ability: Option<Ability>,
    pub spell_save_dc: i8,
    pub spell_attack_mod: i8,
    pub speed: u32,
    pub hit_dice: Option<HitDice>,
    pub features: Vec<Feature>,
}

// ============================================================================
// Character
// ============================================================================

fn default_abilities() -> [AbilityScore; 6] {
    Ability::all().map(|ability| AbilityScore::new(ability, 10))
}

fn default_skills() -> [SkillEntry; 18] {
    Skill::ALL.map(SkillEntry::new)
}

fn default_spell_slots() -> [ResourcePool; 9] {
    std::array::from_fn(|i| ResourcePool::spell_slot(i as u8 + 1))
}

fn default_speed() -> u32 {
    30
}

/// A D&D 5e character sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    #[serde(default)]
    pub id: CharacterId,
    pub name: String,
    #[serde(default)]
    pub player_name: Option<String>,
    pub class_name: String,
    pub level: u8,

    // Core stats
    #[serde(default = "default_abilities")]
    pub abilities: [AbilityScore; 6],
    #[serde(default = "default_skills")]
    pub skills: [SkillEntry; 18],
    #[serde(default)]
    pub ability_improvements: Vec<AbilityImprovement>,
    #[serde(default = "default_speed")]
    pub base_speed: u32,

    // Class choices
    #[serde(default)]
    pub expertise: Vec<String>,
    #[serde(default)]
    pub fighting_styles: Vec<String>,

    // Equipment
    #[serde(default)]
    pub weapons: Vec<Weapon>,
    #[serde(default)]
    pub worn_armor: Option<Armor>,
    #[serde(default)]
    pub shield: Option<String>,
    #[serde(default)]
    pub equipped_primary: Option<String>,
    #[serde(default)]
    pub equipped_secondary: Option<String>,

    // Resources
    #[serde(default = "default_spell_slots")]
    pub spell_slots: [ResourcePool; 9],
    #[serde(default)]
    pub class_resources: Vec<ResourcePool>,

    #[serde(default)]
    pub stats: DerivedStats,
}

impl Character {
    pub fn new(name: impl Into<String>, class_name: impl Into<String>) -> Self {
        Self {
            id: CharacterId::new(),
            name: name.into(),
            player_name: None,
            class_name: class_name.into(),
            level: 1,
            abilities: default_abilities(),
            skills: default_skills(),
            ability_improvements: Vec::new(),
            base_speed: default_speed(),
            expertise: Vec::new(),
            fighting_styles: Vec::new(),
            weapons: Vec::new(),
            worn_armor: None,
            shield: None,
            equipped_primary: None,
            equipped_secondary: None,
            spell_slots: default_spell_slots(),
            class_resources: Vec::new(),
            stats: DerivedStats::default(),
        }
    }

    pub fn ability(&self, ability: Ability) -> &AbilityScore {
        &self.abilities[ability.index()]
    }

    pub fn ability_mut(&mut self, ability: Ability) -> &mut AbilityScore {
        &mut self.abilities[ability.index()]
    }

    /// Current modifier for an ability. Zero before the first pass.
    pub fn modifier(&self, ability: Ability) -> i8 {
        self.ability(ability).modifier
    }

    pub fn skill(&self, skill: Skill) -> &SkillEntry {
        &self.skills[skill.index()]
    }

    pub fn skill_mut(&mut self, skill: Skill) -> &mut SkillEntry {
        &mut self.skills[skill.index()]
    }

    pub fn weapon(&self, name: &str) -> Option<&Weapon> {
        self.weapons
            .iter()
            .find(|w| w.name.eq_ignore_ascii_case(name))
    }

    pub fn wears_armor(&self) -> bool {
        self.worn_armor.is_some()
    }

    /// True when the character owns a shield and holds it in either hand.
    pub fn shield_equipped(&self) -> bool {
        let Some(shield) = &self.shield else {
            return false;
        };
        [&self.equipped_primary, &self.equipped_secondary]
            .into_iter()
            .flatten()
            .any(|held| held.eq_ignore_ascii_case(shield))
    }

    // ------------------------------------------------------------------------
    // Equipment
    // ------------------------------------------------------------------------

    /// Put a carried weapon or shield in a hand slot.
    ///
    /// Two-handed weapons occupy both hands.
    pub fn equip(&mut self, slot: &str, item: &str) -> Result<EquipSlot, Advisory> {
        let slot: EquipSlot = slot.parse()?;
        let name = self
            .carried_item_name(item)
            .ok_or_else(|| Advisory::UnknownItem(item.to_string()))?;
        let two_handed = self.weapon(&name).is_some_and(Weapon::is_two_handed);

        match slot {
            EquipSlot::Primary => {
                if two_handed {
                    self.equipped_secondary = None;
                }
                self.equipped_primary = Some(name);
            }
            EquipSlot::Secondary => {
                let primary_two_handed = self
                    .equipped_primary
                    .as_deref()
                    .and_then(|held| self.weapon(held))
                    .is_some_and(Weapon::is_two_handed);
                if primary_two_handed || two_handed {
                    self.equipped_primary = None;
                }
                self.equipped_secondary = Some(name);
            }
        }
        Ok(slot)
    }

    /// Empty a hand slot, returning what was held.
    pub fn unequip(&mut self, slot: &str) -> Result<Option<String>, Advisory> {
        Ok(match slot.parse()? {
            EquipSlot::Primary => self.equipped_primary.take(),
            EquipSlot::Secondary => self.equipped_secondary.take(),
        })
    }

    /// Put on armor, returning whatever was worn before.
    pub fn don_armor(&mut self, armor: Armor) -> Option<Armor> {
        self.worn_armor.replace(armor)
    }

    pub fn doff_armor(&mut self) -> Option<Armor> {
        self.worn_armor.take()
    }

    fn carried_item_name(&self, item: &str) -> Option<String> {
        if let Some(weapon) = self.weapon(item) {
            return Some(weapon.name.clone());
        }
        self.shield
            .as_ref()
            .filter(|shield| shield.eq_ignore_ascii_case(item))
            .cloned()
    }

    // ------------------------------------------------------------------------
    // Resources
    // ------------------------------------------------------------------------

    pub fn resource(&self, name: &str) -> Option<&ResourcePool> {
        self.class_resources
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }

    pub fn resource_mut(&mut self, name: &str) -> Option<&mut ResourcePool> {
        self.class_resources
            .iter_mut()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }

    /// Find a class resource, creating it locked if this is the first time
    /// the class has asked for it.
    pub fn ensure_resource(&mut self, name: &str, recharge: Recharge) -> &mut ResourcePool {
        let index = match self
            .class_resources
            .iter()
            .position(|p| p.name.eq_ignore_ascii_case(name))
        {
            Some(index) => index,
            None => {
                self.class_resources.push(ResourcePool::new(name));
                self.class_resources.len() - 1
            }
        };
        let pool = &mut self.class_resources[index];
        pool.recharge = recharge;
        pool
    }

    pub fn spell_slot(&self, level: u8) -> Option<&ResourcePool> {
        level
            .checked_sub(1)
            .and_then(|i| self.spell_slots.get(i as usize))
    }

    pub fn spell_slot_mut(&mut self, level: u8) -> Option<&mut ResourcePool> {
        level
            .checked_sub(1)
            .and_then(|i| self.spell_slots.get_mut(i as usize))
    }

    /// Expend one spell slot of the given level, returning how many remain.
    pub fn spend_spell_slot(&mut self, level: u8) -> Result<u32, Advisory> {
        self.spell_slot_mut(level)
            .ok_or(Advisory::InvalidSpellLevel(level))?
            .spend(1)
    }

    /// Refill every unlocked pool that recharges on a short rest.
    pub fn short_rest(&mut self) {
        tracing::debug!(character = %self.name, "short rest");
        recover_all(
            self.spell_slots
                .iter_mut()
                .chain(self.class_resources.iter_mut()),
            |pool| pool.recharge == Recharge::ShortRest,
        );
    }

    /// Refill every unlocked pool.
    pub fn long_rest(&mut self) {
        tracing::debug!(character = %self.name, "long rest");
        recover_all(
            self.spell_slots
                .iter_mut()
                .chain(self.class_resources.iter_mut()),
            |_| true,
        );
    }
}
