use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::errors::ConfigError;

/// Inclusive score range gating one availability flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRange {
    pub lower: i32,
    pub upper: i32,
}

impl ScoreRange {
    pub const fn new(lower: i32, upper: i32) -> Self {
        Self { lower, upper }
    }

    /// A range whose lower bound is not below its upper bound never matches.
    pub fn is_degenerate(&self) -> bool {
        self.lower >= self.upper
    }

    pub fn contains(&self, score: i32) -> bool {
        self.lower <= score && score <= self.upper
    }
}

/// Tier boundaries. Each is an inclusive lower bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierThresholds {
    pub excellent: i32,
    pub good: i32,
    pub partial: i32,
}

impl Default for TierThresholds {
    fn default() -> Self {
        Self {
            excellent: 90,
            good: 70,
            partial: 50,
        }
    }
}

/// Bounds for the four availability flags. Evaluated independently; nothing
/// here requires the ranges to partition the score space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityBounds {
    /// Suggestions are offered strictly below this score.
    pub suggestions_below: i32,
    pub improve: ScoreRange,
    pub upgrade: ScoreRange,
    /// Interview prep is offered strictly above this score.
    pub interview_prep_above: i32,
}

impl Default for AvailabilityBounds {
    fn default() -> Self {
        Self {
            suggestions_below: 40,
            improve: ScoreRange::new(40, 74),
            upgrade: ScoreRange::new(75, 85),
            interview_prep_above: 85,
        }
    }
}

/// Validated classifier configuration. Only constructible through `new`, so
/// tier ordering always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoreTierConfig {
    tiers: TierThresholds,
    availability: AvailabilityBounds,
}

impl ScoreTierConfig {
    /// Rejects tier thresholds that are not strictly descending. Degenerate
    /// availability ranges are accepted but reported, since their only effect
    /// is to switch one flag off.
    pub fn new(
        tiers: TierThresholds,
        availability: AvailabilityBounds,
    ) -> Result<Self, ConfigError> {
        if !(tiers.excellent > tiers.good && tiers.good > tiers.partial) {
            return Err(ConfigError::TierOrder {
                excellent: tiers.excellent,
                good: tiers.good,
                partial: tiers.partial,
            });
        }

        for (name, range) in [
            ("improve", availability.improve),
            ("upgrade", availability.upgrade),
        ] {
            if range.is_degenerate() {
                warn!(
                    range = name,
                    lower = range.lower,
                    upper = range.upper,
                    "Invalid score bounds configured; flag will be disabled"
                );
            }
        }

        Ok(Self {
            tiers,
            availability,
        })
    }

    pub fn tiers(&self) -> &TierThresholds {
        &self.tiers
    }

    pub fn availability(&self) -> &AvailabilityBounds {
        &self.availability
    }
}

impl Default for ScoreTierConfig {
    fn default() -> Self {
        Self {
            tiers: TierThresholds::default(),
            availability: AvailabilityBounds::default(),
        }
    }
}
