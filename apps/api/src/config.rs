use std::str::FromStr;

use anyhow::{Context, Result};
use chrono::FixedOffset;

use crate::classifier::{AvailabilityBounds, ScoreRange, ScoreTierConfig, TierThresholds};
use crate::errors::ConfigError;

const DEFAULT_MAX_DAILY_SCANS: i64 = 10;

/// Application configuration loaded from environment variables.
/// Every value has a default; invalid values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Raw daily ceiling. Sign is checked when the tracker is built.
    pub max_daily_scans: i64,
    /// Fixed zone for quota days. `None` means the process-local zone.
    pub quota_utc_offset: Option<FixedOffset>,
    pub score: ScoreTierConfig,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup. `from_env` passes the process
    /// environment; tests pass a map.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let tiers = TierThresholds {
            excellent: parse_or(&lookup, "JOBFIT_EXCELLENT_THRESHOLD", 90)?,
            good: parse_or(&lookup, "JOBFIT_GOOD_THRESHOLD", 70)?,
            partial: parse_or(&lookup, "JOBFIT_PARTIAL_THRESHOLD", 50)?,
        };
        let availability = AvailabilityBounds {
            suggestions_below: parse_or(&lookup, "JOBFIT_SUGGESTIONS_THRESHOLD", 40)?,
            improve: ScoreRange::new(
                parse_or(&lookup, "JOBFIT_IMPROVE_LOWER", 40)?,
                parse_or(&lookup, "JOBFIT_IMPROVE_UPPER", 74)?,
            ),
            upgrade: ScoreRange::new(
                parse_or(&lookup, "JOBFIT_CV_UPGRADE_LOWER", 75)?,
                parse_or(&lookup, "JOBFIT_CV_UPGRADE_UPPER", 85)?,
            ),
            interview_prep_above: parse_or(&lookup, "JOBFIT_INTERVIEW_PREP_THRESHOLD", 85)?,
        };
        let score = ScoreTierConfig::new(tiers, availability)
            .context("Invalid score threshold configuration")?;

        let max_daily_scans =
            parse_or(&lookup, "JOBFIT_MAX_DAILY_SCANS", DEFAULT_MAX_DAILY_SCANS)?;
        if max_daily_scans < 0 {
            return Err(ConfigError::NegativeCeiling(max_daily_scans).into());
        }

        let quota_utc_offset = match lookup("JOBFIT_QUOTA_UTC_OFFSET_MINUTES") {
            Some(raw) => Some(parse_offset("JOBFIT_QUOTA_UTC_OFFSET_MINUTES", &raw)?),
            None => None,
        };

        Ok(Config {
            port: parse_or(&lookup, "PORT", 8080)
                .context("PORT must be a valid port number")?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            max_daily_scans,
            quota_utc_offset,
            score,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
            var: key.to_string(),
            value: raw,
        }),
        None => Ok(default),
    }
}

fn parse_offset(key: &str, raw: &str) -> Result<FixedOffset, ConfigError> {
    let invalid = || ConfigError::InvalidValue {
        var: key.to_string(),
        value: raw.to_string(),
    };
    let minutes: i32 = raw.trim().parse().map_err(|_| invalid())?;
    minutes
        .checked_mul(60)
        .and_then(FixedOffset::east_opt)
        .ok_or_else(invalid)
}
