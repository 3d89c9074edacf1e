//! D&D 5e character sheet stat resolution engine.
//!
//! This crate provides:
//! - A character sheet model with resource pools for spell slots and class
//!   charges
//! - A fixed seven-stage calculation of proficiency, modifiers, skills,
//!   armor class, passives and weapon bonuses
//! - Rule modules for the twelve PHB classes, hooked in before and after
//!   the base stages
//! - Non-fatal advisories for questionable input
//!
//! # Quick Start
//!
//! ```no_run
//! use dnd_sheet::{load_character_json, StatPipeline};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let json = std::fs::read_to_string("vax.json")?;
//!     let mut loaded = load_character_json(&json)?;
//!
//!     let resolution = loaded.resolve(&StatPipeline::default());
//!     for advisory in &resolution.advisories {
//!         eprintln!("warning: {advisory}");
//!     }
//!     println!("AC {}", loaded.character.stats.armor_class);
//!     Ok(())
//! }
//! ```

pub mod advisory;
pub mod character;
pub mod character_builder;
pub mod class_data;
pub mod classes;
pub mod config;
pub mod dice;
pub mod error;
pub mod loader;
pub mod pipeline;
pub mod registry;
pub mod resource;
pub mod stats;
pub mod testing;

// Primary public API
pub use advisory::{Advisories, Advisory};
pub use character::{Ability, Character, CharacterId, Skill};
pub use character_builder::CharacterBuilder;
pub use class_data::CharacterClass;
pub use classes::{ClassRules, Postcalculator, Precalculator, TokenClass};
pub use config::EngineConfig;
pub use error::SheetError;
pub use loader::{load_character_json, LoadedCharacter};
pub use pipeline::{Resolution, ResolutionState, StatPipeline};
pub use registry::rules_for;
pub use resource::{Recharge, ResourcePool};
