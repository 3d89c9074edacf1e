//! The stat resolution pipeline.
//!
//! A pass recomputes every derived value on a character from its inputs:
//!
//! 1. Derived values are cleared.
//! 2. The class precalculator, if any, adjusts working scores.
//! 3. The seven base stages run in order.
//! 4. The class postcalculator, if any, layers class features on top.
//! 5. Pools the class never sets are locked.
//!
//! Passes never fail. Questionable input produces advisories, which are
//! returned in the [`Resolution`] and logged as they are raised.

use crate::advisory::{Advisories, Advisory};
use crate::character::Character;
use crate::classes::ClassRules;
use crate::config::EngineConfig;
use crate::stats::{BaseContext, BaseStage, STANDARD_IMPROVEMENT_LEVELS};
use serde::{Deserialize, Serialize};

/// How far a pass got.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ResolutionState {
    #[default]
    NotStarted,
    PrecalculationDone,
    Resolved,
}

impl ResolutionState {
    /// The state after this one, if there is one.
    pub fn next(self) -> Option<ResolutionState> {
        match self {
            ResolutionState::NotStarted => Some(ResolutionState::PrecalculationDone),
            ResolutionState::PrecalculationDone => Some(ResolutionState::Resolved),
            ResolutionState::Resolved => None,
        }
    }

    fn advance(&mut self) {
        if let Some(next) = self.next() {
            *self = next;
        }
    }
}

/// Outcome of a pass. The character itself is updated in place.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Resolution {
    pub state: ResolutionState,
    pub advisories: Vec<Advisory>,
}

impl Resolution {
    pub fn is_resolved(&self) -> bool {
        self.state == ResolutionState::Resolved
    }

    /// True when the pass raised no advisories.
    pub fn is_clean(&self) -> bool {
        self.advisories.is_empty()
    }
}

/// Runs resolution passes.
#[derive(Debug, Clone, Default)]
pub struct StatPipeline {
    config: EngineConfig,
}

impl StatPipeline {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Recompute every derived value on `character`.
    ///
    /// With no class rules only the base stages run. Running a pass twice on
    /// unchanged inputs leaves the character exactly as the first pass did.
    pub fn resolve(&self, character: &mut Character, rules: Option<&dyn ClassRules>) -> Resolution {
        let span = tracing::debug_span!(
            "resolve",
            character = %character.name,
            class = rules.map(|r| r.name()).unwrap_or("none"),
            level = character.level,
        );
        let _enter = span.enter();

        let mut advisories = if self.config.log_advisories {
            Advisories::new()
        } else {
            Advisories::quiet()
        };
        let mut state = ResolutionState::NotStarted;

        character.reset_derived();
        if let Some(rules) = rules {
            character.stats.hit_dice = Some(rules.hit_dice(character.level));
            character.stats.features = rules.features(character.level);
        }

        if let Some(pre) = rules.and_then(|r| r.as_precalculator()) {
            pre.precalculate(character, &mut advisories);
        }
        state.advance();

        let context = BaseContext {
            improvement_levels: rules
                .map(|r| r.improvement_levels())
                .unwrap_or(STANDARD_IMPROVEMENT_LEVELS),
            validate_improvements: self.config.validate_improvements,
        };
        for stage in BaseStage::SEQUENCE {
            character.run_stage(stage, &context, &mut advisories);
        }

        if let Some(post) = rules.and_then(|r| r.as_postcalculator()) {
            post.postcalculate(character, &mut advisories);
        }
        if let Some(rules) = rules {
            lock_unclaimed_pools(character, rules);
        }
        state.advance();

        tracing::debug!(advisories = advisories.len(), "resolution complete");
        Resolution {
            state,
            advisories: advisories.into_vec(),
        }
    }
}

/// Lock pools the class never sets: every spell slot of a non-caster, and
/// charges left behind by another class. Locked pools stay on the sheet.
fn lock_unclaimed_pools(character: &mut Character, rules: &dyn ClassRules) {
    if rules.spellcasting().is_none() {
        for pool in &mut character.spell_slots {
            pool.set_maximum(0);
        }
    }

    let tokens = rules.as_token_class().map(|t| t.token_names()).unwrap_or(&[]);
    for pool in &mut character.class_resources {
        if !tokens.iter().any(|t| t.eq_ignore_ascii_case(&pool.name)) {
            tracing::debug!(pool = %pool.name, class = rules.name(), "pool locked");
            pool.set_maximum(0);
        }
    }
}
