//! Recoverable "N of M" counters: spell slots and class charges.

use crate::advisory::Advisory;
use serde::{Deserialize, Serialize};

/// When a pool refills on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Recharge {
    ShortRest,
    #[default]
    LongRest,
}

/// A named resource pool.
///
/// `available` never exceeds `maximum` after a recovery or a maximum change.
/// A pool whose maximum is 0 has not been unlocked yet (a feature gained at
/// a later level) and is skipped by rest sweeps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourcePool {
    pub name: String,
    /// Spell level for leveled pools such as spell slots.
    #[serde(default)]
    pub level: Option<u8>,
    #[serde(default)]
    maximum: u32,
    #[serde(default)]
    available: u32,
    #[serde(default)]
    pub recharge: Recharge,
}

impl ResourcePool {
    /// A locked pool with no capacity.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            level: None,
            maximum: 0,
            available: 0,
            recharge: Recharge::LongRest,
        }
    }

    /// A full pool.
    pub fn with_maximum(name: impl Into<String>, maximum: u32) -> Self {
        Self {
            maximum,
            available: maximum,
            ..Self::new(name)
        }
    }

    /// An empty spell slot pool for the given spell level.
    pub fn spell_slot(level: u8) -> Self {
        Self {
            level: Some(level),
            ..Self::new(format!("Level {level} spell slots"))
        }
    }

    pub fn with_recharge(mut self, recharge: Recharge) -> Self {
        self.recharge = recharge;
        self
    }

    pub fn maximum(&self) -> u32 {
        self.maximum
    }

    pub fn available(&self) -> u32 {
        self.available
    }

    pub fn is_unlocked(&self) -> bool {
        self.maximum > 0
    }

    /// Spend `quantity` charges, returning what is left.
    ///
    /// An empty pool, or a request larger than what is left, is rejected
    /// without touching the pool.
    pub fn spend(&mut self, quantity: u32) -> Result<u32, Advisory> {
        if self.available == 0 && quantity > 0 {
            return Err(if self.is_unlocked() {
                Advisory::PoolExhausted {
                    pool: self.name.clone(),
                    available: 0,
                    requested: quantity,
                }
            } else {
                Advisory::PoolLocked {
                    pool: self.name.clone(),
                }
            });
        }

        let Some(remaining) = self.available.checked_sub(quantity) else {
            return Err(Advisory::PoolExhausted {
                pool: self.name.clone(),
                available: self.available,
                requested: quantity,
            });
        };
        self.available = remaining;
        Ok(remaining)
    }

    /// Recover `quantity` charges, returning the new total. Zero means
    /// recover fully.
    pub fn recover(&mut self, quantity: u32) -> u32 {
        self.available = match quantity {
            0 => self.maximum,
            n => self.available.saturating_add(n).min(self.maximum),
        };
        self.available
    }

    /// Change the capacity, clamping what is left if it shrank. A pool that
    /// goes from locked to unlocked starts full.
    pub fn set_maximum(&mut self, maximum: u32) {
        let unlocking = self.maximum == 0 && maximum > 0;
        self.maximum = maximum;
        if unlocking {
            self.available = maximum;
        } else {
            self.available = self.available.min(maximum);
        }
    }

    pub(crate) fn is_consistent(&self) -> bool {
        self.available <= self.maximum
    }
}

/// Recover every unlocked pool that matches `filter`.
pub fn recover_all<'a>(
    pools: impl IntoIterator<Item = &'a mut ResourcePool>,
    filter: impl Fn(&ResourcePool) -> bool,
) {
    for pool in pools {
        if pool.is_unlocked() && filter(pool) {
            pool.recover(0);
        }
    }
}
