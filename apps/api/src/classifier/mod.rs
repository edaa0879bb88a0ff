//! Score classification — maps a 0–100 match score to tier labels,
//! presentation tokens, a storable recommendation, and feature availability.
//!
//! Every function here is pure over `(score, config)`. Scores outside 0–100
//! are not clamped; they fall through the same comparisons as any other value.

pub mod config;

use serde::Serialize;
use tracing::warn;

pub use config::{AvailabilityBounds, ScoreRange, ScoreTierConfig, TierThresholds};

// ────────────────────────────────────────────────────────────────────────────
// Output types
// ────────────────────────────────────────────────────────────────────────────

/// Ordered match tiers, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchTier {
    Weak,
    Partial,
    Good,
    Excellent,
}

impl MatchTier {
    pub fn label(self) -> &'static str {
        match self {
            MatchTier::Excellent => "EXCELLENT MATCH",
            MatchTier::Good => "GOOD MATCH",
            MatchTier::Partial => "PARTIAL MATCH",
            MatchTier::Weak => "WEAK MATCH",
        }
    }

    pub fn badge_class(self) -> &'static str {
        match self {
            MatchTier::Excellent => "match-badge-excellent",
            MatchTier::Good => "match-badge-good",
            MatchTier::Partial => "match-badge-partial",
            MatchTier::Weak => "match-badge-weak",
        }
    }

    pub fn theme(self) -> &'static str {
        match self {
            MatchTier::Excellent => "match-theme-excellent",
            MatchTier::Good => "match-theme-good",
            MatchTier::Partial => "match-theme-partial",
            MatchTier::Weak => "match-theme-weak",
        }
    }

    /// Stored alongside a saved result; unlike `label` it is meant to be read
    /// by the candidate later, not styled.
    pub fn recommendation(self) -> &'static str {
        match self {
            MatchTier::Excellent => "Apply Now",
            MatchTier::Good => "Consider Applying",
            MatchTier::Partial => "Not Ready Yet",
            MatchTier::Weak => "Not Recommended",
        }
    }
}

/// Which follow-up features to offer for a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct AvailabilityFlags {
    pub suggestions: bool,
    pub improve: bool,
    pub upgrade: bool,
    pub interview_prep: bool,
}

/// Everything the presentation layer needs for one score.
#[derive(Debug, Clone, Serialize)]
pub struct MatchAssessment {
    pub score: i32,
    pub tier: MatchTier,
    pub label: &'static str,
    pub badge_class: &'static str,
    pub theme: &'static str,
    pub recommendation: &'static str,
    pub availability: AvailabilityFlags,
}

// ────────────────────────────────────────────────────────────────────────────
// Classifier
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct ScoreClassifier {
    config: ScoreTierConfig,
}

impl ScoreClassifier {
    pub fn new(config: ScoreTierConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoreTierConfig {
        &self.config
    }

    /// Tiers are checked highest first, each threshold an inclusive lower bound.
    pub fn tier(&self, score: i32) -> MatchTier {
        let t = self.config.tiers();
        if score >= t.excellent {
            MatchTier::Excellent
        } else if score >= t.good {
            MatchTier::Good
        } else if score >= t.partial {
            MatchTier::Partial
        } else {
            MatchTier::Weak
        }
    }

    pub fn label(&self, score: i32) -> &'static str {
        self.tier(score).label()
    }

    pub fn presentation_class(&self, score: i32) -> &'static str {
        self.tier(score).badge_class()
    }

    pub fn presentation_theme(&self, score: i32) -> &'static str {
        self.tier(score).theme()
    }

    pub fn recommendation_text(&self, score: i32) -> &'static str {
        self.tier(score).recommendation()
    }

    pub fn availability_flags(&self, score: i32) -> AvailabilityFlags {
        let bounds = self.config.availability();
        AvailabilityFlags {
            suggestions: score < bounds.suggestions_below,
            improve: in_range("improve", bounds.improve, score),
            upgrade: in_range("upgrade", bounds.upgrade, score),
            interview_prep: score > bounds.interview_prep_above,
        }
    }

    pub fn classify(&self, score: i32) -> MatchAssessment {
        MatchAssessment {
            score,
            tier: self.tier(score),
            label: self.label(score),
            badge_class: self.presentation_class(score),
            theme: self.presentation_theme(score),
            recommendation: self.recommendation_text(score),
            availability: self.availability_flags(score),
        }
    }
}

fn in_range(name: &str, range: ScoreRange, score: i32) -> bool {
    if range.is_degenerate() {
        warn!(
            range = name,
            lower = range.lower,
            upper = range.upper,
            "Invalid score bounds configured"
        );
        return false;
    }
    range.contains(score)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, Write};
    use std::sync::{Arc, Mutex};

    fn classifier() -> ScoreClassifier {
        ScoreClassifier::new(ScoreTierConfig::default())
    }

    fn only(flags: AvailabilityFlags) -> Vec<&'static str> {
        let mut set = Vec::new();
        if flags.suggestions {
            set.push("suggestions");
        }
        if flags.improve {
            set.push("improve");
        }
        if flags.upgrade {
            set.push("upgrade");
        }
        if flags.interview_prep {
            set.push("interview_prep");
        }
        set
    }

    #[test]
    fn test_label_boundaries() {
        let c = classifier();
        assert_eq!(c.label(90), "EXCELLENT MATCH");
        assert_eq!(c.label(89), "GOOD MATCH");
        assert_eq!(c.label(70), "GOOD MATCH");
        assert_eq!(c.label(69), "PARTIAL MATCH");
        assert_eq!(c.label(50), "PARTIAL MATCH");
        assert_eq!(c.label(49), "WEAK MATCH");
    }

    #[test]
    fn test_presentation_tokens_share_tier_boundaries() {
        let c = classifier();
        assert_eq!(c.presentation_class(90), "match-badge-excellent");
        assert_eq!(c.presentation_class(70), "match-badge-good");
        assert_eq!(c.presentation_class(50), "match-badge-partial");
        assert_eq!(c.presentation_class(49), "match-badge-weak");

        assert_eq!(c.presentation_theme(100), "match-theme-excellent");
        assert_eq!(c.presentation_theme(89), "match-theme-good");
        assert_eq!(c.presentation_theme(69), "match-theme-partial");
        assert_eq!(c.presentation_theme(0), "match-theme-weak");
    }

    #[test]
    fn test_recommendation_text_by_tier() {
        let c = classifier();
        assert_eq!(c.recommendation_text(95), "Apply Now");
        assert_eq!(c.recommendation_text(75), "Consider Applying");
        assert_eq!(c.recommendation_text(55), "Not Ready Yet");
        assert_eq!(c.recommendation_text(10), "Not Recommended");
    }

    #[test]
    fn test_custom_thresholds_are_respected() {
        let tiers = TierThresholds {
            excellent: 80,
            good: 60,
            partial: 30,
        };
        let c = ScoreClassifier::new(
            ScoreTierConfig::new(tiers, AvailabilityBounds::default()).unwrap(),
        );
        assert_eq!(c.tier(80), MatchTier::Excellent);
        assert_eq!(c.tier(79), MatchTier::Good);
        assert_eq!(c.tier(30), MatchTier::Partial);
        assert_eq!(c.tier(29), MatchTier::Weak);
    }

    #[test]
    fn test_out_of_range_scores_are_not_clamped() {
        let c = classifier();
        assert_eq!(c.tier(-5), MatchTier::Weak);
        assert_eq!(c.tier(250), MatchTier::Excellent);
        assert!(c.availability_flags(-5).suggestions);
        assert!(c.availability_flags(250).interview_prep);
    }

    #[test]
    fn test_tiers_are_ordered() {
        assert!(MatchTier::Weak < MatchTier::Partial);
        assert!(MatchTier::Good < MatchTier::Excellent);
    }

    #[test]
    fn test_availability_partition_with_reference_bounds() {
        let c = classifier();
        assert_eq!(only(c.availability_flags(39)), vec!["suggestions"]);
        assert_eq!(only(c.availability_flags(40)), vec!["improve"]);
        assert_eq!(only(c.availability_flags(60)), vec!["improve"]);
        assert_eq!(only(c.availability_flags(74)), vec!["improve"]);
        assert_eq!(only(c.availability_flags(75)), vec!["upgrade"]);
        assert_eq!(only(c.availability_flags(85)), vec!["upgrade"]);
        assert_eq!(only(c.availability_flags(86)), vec!["interview_prep"]);
    }

    #[test]
    fn test_flags_are_evaluated_independently() {
        let availability = AvailabilityBounds {
            suggestions_below: 60,
            improve: ScoreRange::new(50, 90),
            upgrade: ScoreRange::new(55, 70),
            interview_prep_above: 50,
        };
        let c = ScoreClassifier::new(
            ScoreTierConfig::new(TierThresholds::default(), availability).unwrap(),
        );
        let flags = c.availability_flags(58);
        assert_eq!(
            flags,
            AvailabilityFlags {
                suggestions: true,
                improve: true,
                upgrade: true,
                interview_prep: true,
            }
        );
        // Gap between ranges: nothing offered.
        let sparse = AvailabilityBounds {
            suggestions_below: 10,
            improve: ScoreRange::new(20, 30),
            upgrade: ScoreRange::new(40, 50),
            interview_prep_above: 90,
        };
        let c = ScoreClassifier::new(
            ScoreTierConfig::new(TierThresholds::default(), sparse).unwrap(),
        );
        assert_eq!(c.availability_flags(15), AvailabilityFlags::default());
    }

    #[test]
    fn test_degenerate_upgrade_range_disables_only_upgrade() {
        let availability = AvailabilityBounds {
            upgrade: ScoreRange::new(90, 80),
            ..AvailabilityBounds::default()
        };
        let c = ScoreClassifier::new(
            ScoreTierConfig::new(TierThresholds::default(), availability).unwrap(),
        );
        for score in 0..=100 {
            assert!(!c.availability_flags(score).upgrade, "upgrade shown at {score}");
        }
        assert!(c.availability_flags(30).suggestions);
        assert!(c.availability_flags(60).improve);
        assert!(c.availability_flags(95).interview_prep);
    }

    /// Collects formatted log output so tests can assert on diagnostics.
    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl CapturedLogs {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    #[test]
    fn test_degenerate_improve_range_disables_flag_and_warns() {
        let availability = AvailabilityBounds {
            improve: ScoreRange::new(74, 40),
            ..AvailabilityBounds::default()
        };
        let c = ScoreClassifier::new(
            ScoreTierConfig::new(TierThresholds::default(), availability).unwrap(),
        );

        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::WARN)
            .finish();

        let flags = tracing::subscriber::with_default(subscriber, || c.availability_flags(60));

        assert!(!flags.improve);
        assert!(!flags.suggestions && !flags.upgrade && !flags.interview_prep);
        let output = logs.contents();
        assert!(output.contains("WARN"), "no warning logged: {output}");
        assert!(output.contains("Invalid score bounds configured"));
        assert!(output.contains("range=\"improve\""), "unexpected fields: {output}");
    }

    #[test]
    fn test_valid_ranges_log_nothing() {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();

        tracing::subscriber::with_default(subscriber, || classifier().availability_flags(60));

        assert!(logs.contents().is_empty());
    }

    #[test]
    fn test_classify_bundles_all_outputs() {
        let assessment = classifier().classify(80);
        assert_eq!(assessment.score, 80);
        assert_eq!(assessment.tier, MatchTier::Good);
        assert_eq!(assessment.label, "GOOD MATCH");
        assert_eq!(assessment.badge_class, "match-badge-good");
        assert_eq!(assessment.theme, "match-theme-good");
        assert_eq!(assessment.recommendation, "Consider Applying");
        assert!(assessment.availability.upgrade);
        assert!(!assessment.availability.interview_prep);
    }
}
