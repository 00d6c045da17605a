//! Typed per-region results.

use serde::{Deserialize, Serialize};

/// Vote counts summed over a set of voting units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteTotals {
    pub registered: i64,
    pub abstentions: i64,
    pub null: i64,
    pub choice_a: i64,
    pub choice_b: i64,
}

impl VoteTotals {
    /// Share of `Choice A` among expressed choices.
    ///
    /// Non-finite (NaN) when no choice was expressed.
    #[must_use]
    pub fn ratio(&self) -> f64 {
        self.choice_a as f64 / (self.choice_a + self.choice_b) as f64
    }

    /// Adds `other` into `self`.
    pub fn accumulate(&mut self, other: &VoteTotals) {
        self.registered += other.registered;
        self.abstentions += other.abstentions;
        self.null += other.null;
        self.choice_a += other.choice_a;
        self.choice_b += other.choice_b;
    }
}

/// One aggregated row per region name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionResult {
    pub name_reg: String,
    pub totals: VoteTotals,
}
