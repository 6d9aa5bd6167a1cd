//! Data-driven rule and physics constants
//!
//! Every gameplay constant lives here so board variants differ only in data.
//! Defaults reproduce the classic nine-disc board.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading or validating a tuning
#[derive(Error, Debug)]
pub enum TuningError {
    #[error("Invalid tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("{name} = {value} is out of range (expected {expected})")]
    OutOfRange {
        name: &'static str,
        value: f32,
        expected: &'static str,
    },

    #[error("Formation must contain at least one piece")]
    EmptyFormation,
}

/// What happens to the turn after the shooter pockets a piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CaptureRule {
    /// Turn passes to the other player after every shot
    #[default]
    AlwaysSwitch,
    /// Pocketing at least one piece (without a foul) earns another shot
    KeepTurnOnCapture,
}

impl CaptureRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            CaptureRule::AlwaysSwitch => "AlwaysSwitch",
            CaptureRule::KeepTurnOnCapture => "KeepTurnOnCapture",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "alwaysswitch" | "switch" => Some(CaptureRule::AlwaysSwitch),
            "keepturnoncapture" | "keep" => Some(CaptureRule::KeepTurnOnCapture),
            _ => None,
        }
    }
}

/// How the AI picks the piece it shoots at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AiTargeting {
    /// First active piece in rack order
    #[default]
    First,
    /// Piece closest to the striker
    Nearest,
}

/// One ring of pieces around the queen
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ring {
    /// Number of pieces, spaced evenly at `i / count * 2π`
    pub count: u32,
    /// Ring radius in multiples of the piece radius
    pub radius_factor: f32,
}

/// Tunable constants for one board variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Physics ===
    /// Per-tick velocity retention (< 1)
    pub friction: f32,
    /// Fraction of speed kept when bouncing off a wall
    pub wall_restitution: f32,
    /// Speed (units/tick) at or below which a disc is put at rest
    pub rest_epsilon: f32,

    // === Geometry (ratios of board side) ===
    pub pocket_radius_ratio: f32,
    pub striker_radius_ratio: f32,
    pub piece_radius_ratio: f32,
    /// Striker baseline for player one; player two is mirrored
    pub baseline_ratio: f32,
    /// Rings around the queen, innermost first
    pub formation: Vec<Ring>,

    // === Shot ===
    /// Minimum drag length (board units) that fires a shot
    pub min_pull: f32,
    /// Drag length cap
    pub max_shot_power: f32,
    /// Drag length to velocity (units/tick)
    pub power_scale: f32,
    /// Touching within `striker radius * slide_grab_factor` slides the striker
    pub slide_grab_factor: f32,

    // === AI ===
    pub ai_speed: f32,
    /// Max random rotation of the AI shot (radians)
    pub ai_jitter: f32,
    /// Seconds the AI "thinks" before shooting
    pub ai_think_delay: f32,
    pub ai_targeting: AiTargeting,

    // === Rules ===
    pub scoring_enabled: bool,
    /// Points deducted for pocketing the striker
    pub foul_penalty: i32,
    pub capture_rule: CaptureRule,
}

impl Default for Tuning {
    fn default() -> Self {
        Self::classic()
    }
}

impl Tuning {
    /// Queen plus a single ring of eight, no scoring
    pub fn classic() -> Self {
        Self {
            friction: 0.98,
            wall_restitution: 0.6,
            rest_epsilon: 0.05,

            pocket_radius_ratio: 0.06,
            striker_radius_ratio: 0.045,
            piece_radius_ratio: 0.035,
            baseline_ratio: 0.82,
            formation: vec![Ring {
                count: 8,
                radius_factor: 2.7,
            }],

            min_pull: 10.0,
            max_shot_power: 200.0,
            power_scale: 0.2,
            slide_grab_factor: 2.0,

            ai_speed: 20.0,
            ai_jitter: 0.0,
            ai_think_delay: 1.0,
            ai_targeting: AiTargeting::First,

            scoring_enabled: false,
            foul_penalty: 10,
            capture_rule: CaptureRule::AlwaysSwitch,
        }
    }

    /// Queen plus rings of eight and twelve, scored, smaller pieces
    pub fn full_board() -> Self {
        Self {
            friction: 0.985,
            wall_restitution: 0.7,
            pocket_radius_ratio: 0.07,
            striker_radius_ratio: 0.04,
            piece_radius_ratio: 0.028,
            formation: vec![
                Ring {
                    count: 8,
                    radius_factor: 2.7,
                },
                Ring {
                    count: 12,
                    radius_factor: 5.0,
                },
            ],
            ai_jitter: 0.03,
            ai_targeting: AiTargeting::Nearest,
            scoring_enabled: true,
            capture_rule: CaptureRule::KeepTurnOnCapture,
            ..Self::classic()
        }
    }

    /// Parse and validate a tuning from JSON (missing fields take classic defaults)
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Total pieces on the board at match start (queen included)
    pub fn piece_count(&self) -> usize {
        1 + self.formation.iter().map(|r| r.count as usize).sum::<usize>()
    }

    /// Reject values that would break the simulation invariants
    pub fn validate(&self) -> Result<(), TuningError> {
        fn check(
            name: &'static str,
            value: f32,
            ok: bool,
            expected: &'static str,
        ) -> Result<(), TuningError> {
            if ok && value.is_finite() {
                Ok(())
            } else {
                Err(TuningError::OutOfRange {
                    name,
                    value,
                    expected,
                })
            }
        }

        check("friction", self.friction, self.friction > 0.0 && self.friction < 1.0, "(0, 1)")?;
        check(
            "wall_restitution",
            self.wall_restitution,
            (0.0..=1.0).contains(&self.wall_restitution),
            "[0, 1]",
        )?;
        check("rest_epsilon", self.rest_epsilon, self.rest_epsilon > 0.0, "> 0")?;
        check(
            "pocket_radius_ratio",
            self.pocket_radius_ratio,
            self.pocket_radius_ratio > 0.0 && self.pocket_radius_ratio < 0.25,
            "(0, 0.25)",
        )?;
        check(
            "striker_radius_ratio",
            self.striker_radius_ratio,
            self.striker_radius_ratio > 0.0 && self.striker_radius_ratio < 0.25,
            "(0, 0.25)",
        )?;
        check(
            "piece_radius_ratio",
            self.piece_radius_ratio,
            self.piece_radius_ratio > 0.0 && self.piece_radius_ratio < 0.25,
            "(0, 0.25)",
        )?;
        check(
            "baseline_ratio",
            self.baseline_ratio,
            self.baseline_ratio > 0.5 && self.baseline_ratio < 1.0,
            "(0.5, 1)",
        )?;
        check("min_pull", self.min_pull, self.min_pull >= 0.0, ">= 0")?;
        check(
            "max_shot_power",
            self.max_shot_power,
            self.max_shot_power > self.min_pull,
            "> min_pull",
        )?;
        check("power_scale", self.power_scale, self.power_scale > 0.0, "> 0")?;
        check(
            "slide_grab_factor",
            self.slide_grab_factor,
            self.slide_grab_factor >= 1.0,
            ">= 1",
        )?;
        check("ai_speed", self.ai_speed, self.ai_speed > 0.0, "> 0")?;
        check("ai_jitter", self.ai_jitter, self.ai_jitter >= 0.0, ">= 0")?;
        check(
            "ai_think_delay",
            self.ai_think_delay,
            self.ai_think_delay >= 0.0,
            ">= 0",
        )?;
        for ring in &self.formation {
            check(
                "formation.radius_factor",
                ring.radius_factor,
                ring.radius_factor >= 2.0,
                ">= 2 (clear of the queen)",
            )?;
            // Neighbouring pieces on a ring must not start overlapping
            let half_step = std::f32::consts::PI / ring.count.max(2) as f32;
            check(
                "formation.radius_factor",
                ring.radius_factor,
                ring.count < 2 || ring.radius_factor * half_step.sin() >= 1.0,
                "wide enough that ring neighbours do not overlap",
            )?;
        }
        if self.piece_count() <= 1 {
            return Err(TuningError::EmptyFormation);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_validate() {
        assert!(Tuning::classic().validate().is_ok());
        assert!(Tuning::full_board().validate().is_ok());
        assert_eq!(Tuning::classic().piece_count(), 9);
        assert_eq!(Tuning::full_board().piece_count(), 21);
    }

    #[test]
    fn test_from_json_partial_uses_defaults() {
        let tuning = Tuning::from_json(r#"{ "friction": 0.975, "scoring_enabled": true }"#)
            .expect("valid tuning");
        assert!((tuning.friction - 0.975).abs() < f32::EPSILON);
        assert!(tuning.scoring_enabled);
        assert_eq!(tuning.formation, Tuning::classic().formation);
    }

    #[test]
    fn test_from_json_rejects_bad_friction() {
        let err = Tuning::from_json(r#"{ "friction": 1.2 }"#).unwrap_err();
        assert!(matches!(err, TuningError::OutOfRange { name: "friction", .. }));
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(matches!(
            Tuning::from_json("not json"),
            Err(TuningError::Parse(_))
        ));
    }

    #[test]
    fn test_empty_formation_rejected() {
        let tuning = Tuning {
            formation: Vec::new(),
            ..Tuning::classic()
        };
        assert!(matches!(tuning.validate(), Err(TuningError::EmptyFormation)));
    }

    #[test]
    fn test_crowded_ring_rejected() {
        let tuning = Tuning {
            formation: vec![Ring {
                count: 8,
                radius_factor: 2.1,
            }],
            ..Tuning::classic()
        };
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::OutOfRange { name: "formation.radius_factor", .. })
        ));
    }

    #[test]
    fn test_capture_rule_from_str() {
        assert_eq!(CaptureRule::from_str("keep"), Some(CaptureRule::KeepTurnOnCapture));
        assert_eq!(CaptureRule::from_str("AlwaysSwitch"), Some(CaptureRule::AlwaysSwitch));
        assert_eq!(CaptureRule::from_str("sometimes"), None);
        assert_eq!(CaptureRule::KeepTurnOnCapture.as_str(), "KeepTurnOnCapture");
    }
}
