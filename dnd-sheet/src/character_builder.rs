//! Step-by-step construction of input-only character sheets.
//!
//! The builder applies class saving throws and checks class skill choices,
//! then hands back a sheet with no derived values. Run it through a
//! [`StatPipeline`](crate::pipeline::StatPipeline) to fill those in.

use crate::character::{Ability, AbilityImprovement, Armor, Character, Skill, Weapon};
use crate::class_data::CharacterClass;
use crate::error::SheetError;
use crate::loader::validate_structure;

/// Standard array values.
pub const STANDARD_ARRAY: [u8; 6] = [15, 14, 13, 12, 10, 8];

/// Point buy costs for each score value.
pub fn point_buy_cost(score: u8) -> Option<u8> {
    match score {
        8 => Some(0),
        9 => Some(1),
        10 => Some(2),
        11 => Some(3),
        12 => Some(4),
        13 => Some(5),
        14 => Some(7),
        15 => Some(9),
        _ => None,
    }
}

/// Total points available for point buy.
pub const POINT_BUY_TOTAL: u8 = 27;

/// Builder for character sheets.
#[derive(Debug, Clone, Default)]
pub struct CharacterBuilder {
    name: Option<String>,
    player_name: Option<String>,
    class: Option<CharacterClass>,
    level: Option<u8>,
    /// Base scores in canonical ability order.
    scores: Option<[u8; 6]>,
    class_skills: Vec<Skill>,
    extra_skills: Vec<Skill>,
    improvements: Vec<AbilityImprovement>,
    expertise: Vec<String>,
    fighting_styles: Vec<String>,
    weapons: Vec<Weapon>,
    armor: Option<Armor>,
    shield: Option<String>,
}

impl CharacterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn player_name(mut self, name: impl Into<String>) -> Self {
        self.player_name = Some(name.into());
        self
    }

    pub fn class(mut self, class: CharacterClass) -> Self {
        self.class = Some(class);
        self
    }

    /// Defaults to 1.
    pub fn level(mut self, level: u8) -> Self {
        self.level = Some(level);
        self
    }

    /// Base scores in STR, DEX, CON, INT, WIS, CHA order.
    pub fn ability_scores(mut self, scores: [u8; 6]) -> Self {
        self.scores = Some(scores);
        self
    }

    /// Assign standard array values to abilities.
    pub fn standard_array(mut self, assignment: [(u8, Ability); 6]) -> Self {
        let mut scores = [10; 6];
        for (score, ability) in assignment {
            scores[ability.index()] = score;
        }
        self.scores = Some(scores);
        self
    }

    /// Skills picked from the class list. Count and availability are
    /// checked on build.
    pub fn skills(mut self, skills: Vec<Skill>) -> Self {
        self.class_skills = skills;
        self
    }

    /// Proficiencies from outside the class, such as a background.
    pub fn extra_skills(mut self, skills: Vec<Skill>) -> Self {
        self.extra_skills = skills;
        self
    }

    pub fn improvement(mut self, ability: Ability, bonus: u8) -> Self {
        self.improvements.push(AbilityImprovement::new(ability, bonus));
        self
    }

    pub fn expertise(mut self, skill: impl Into<String>) -> Self {
        self.expertise.push(skill.into());
        self
    }

    pub fn fighting_style(mut self, style: impl Into<String>) -> Self {
        self.fighting_styles.push(style.into());
        self
    }

    /// Add a weapon to the inventory. The first melee weapon, or failing
    /// that the first weapon, starts in the main hand.
    pub fn weapon(mut self, weapon: Weapon) -> Self {
        self.weapons.push(weapon);
        self
    }

    pub fn armor(mut self, armor: Armor) -> Self {
        self.armor = Some(armor);
        self
    }

    /// Carry a shield, held in the off hand.
    pub fn shield(mut self, name: impl Into<String>) -> Self {
        self.shield = Some(name.into());
        self
    }

    pub fn build(self) -> Result<Character, SheetError> {
        let name = self.name.ok_or(SheetError::MissingName)?;
        let class = self.class.ok_or(SheetError::MissingClass)?;
        let class_data = class.data();

        if self.class_skills.len() != class_data.skill_count {
            return Err(SheetError::InvalidSkillCount {
                expected: class_data.skill_count,
                got: self.class_skills.len(),
            });
        }
        if let Some(skill) = self
            .class_skills
            .iter()
            .find(|skill| !class_data.skill_options.contains(skill))
        {
            return Err(SheetError::SkillNotAvailable(*skill));
        }

        let mut character = Character::new(name, class.name().to_lowercase());
        character.player_name = self.player_name;
        character.level = self.level.unwrap_or(1);

        if let Some(scores) = self.scores {
            for (score, base) in character.abilities.iter_mut().zip(scores) {
                score.base = base;
            }
        }
        for ability in class_data.saving_throws {
            character.ability_mut(ability).saving_throw_proficient = true;
        }
        for skill in self.class_skills.iter().chain(&self.extra_skills) {
            character.skill_mut(*skill).proficient = true;
        }

        character.ability_improvements = self.improvements;
        character.expertise = self.expertise;
        character.fighting_styles = self.fighting_styles;
        character.equipped_primary = self
            .weapons
            .iter()
            .find(|w| !w.ranged)
            .or(self.weapons.first())
            .map(|w| w.name.clone());
        character.weapons = self.weapons;
        character.worn_armor = self.armor;
        character.equipped_secondary = self.shield.clone();
        character.shield = self.shield;

        validate_structure(&character)?;
        tracing::debug!(character = %character.name, %class, level = character.level, "character built");
        Ok(character)
    }
}

/// Check a point buy against the 27 point budget and the 8-15 range.
pub fn validate_point_buy(scores: &[u8; 6]) -> Result<(), String> {
    let mut total = 0u8;
    for (score, ability) in scores.iter().zip(Ability::all()) {
        let cost = point_buy_cost(*score).ok_or_else(|| {
            format!("{ability} score {score} is outside the point buy range (8-15)")
        })?;
        total += cost;
    }
    if total > POINT_BUY_TOTAL {
        return Err(format!(
            "Point buy total {total} exceeds {POINT_BUY_TOTAL} points"
        ));
    }
    Ok(())
}
