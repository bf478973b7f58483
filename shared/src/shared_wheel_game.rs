use rand::Rng;
use serde::{Deserialize, Serialize};

/// What a visitor actually gets when the wheel stops on a segment.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeKind {
    Discount,
    Retry,
    Nothing,
    Gift,
}

/// One wedge of the wheel. `center_angle` is measured clockwise from the top pointer.
#[derive(Debug, Serialize, Clone, Copy, PartialEq)]
pub struct PrizeSegment {
    pub label: &'static str,
    pub center_angle: f64,
    pub kind: OutcomeKind,
}

impl PrizeSegment {
    const fn new(label: &'static str, center_angle: f64, kind: OutcomeKind) -> Self {
        Self { label, center_angle, kind }
    }
}

pub const SEGMENT_SWEEP: f64 = 60.0;

// Rendered wheel, in clockwise order starting at the pointer
pub const DISPLAY_SEGMENTS: [PrizeSegment; 6] = [
    PrizeSegment::new("5% OFF", 30.0, OutcomeKind::Discount),
    PrizeSegment::new("10% OFF", 90.0, OutcomeKind::Discount),
    PrizeSegment::new("Spin again", 150.0, OutcomeKind::Retry),
    PrizeSegment::new("Better luck next time", 210.0, OutcomeKind::Nothing),
    PrizeSegment::new("Free scrunchie", 270.0, OutcomeKind::Gift),
    PrizeSegment::new("20% OFF", 330.0, OutcomeKind::Discount),
];

// Everything except the 20% OFF decoy, which is drawn on the wheel but never won
pub const DRAWABLE_SEGMENTS: [PrizeSegment; 5] = [
    DISPLAY_SEGMENTS[0],
    DISPLAY_SEGMENTS[1],
    DISPLAY_SEGMENTS[2],
    DISPLAY_SEGMENTS[3],
    DISPLAY_SEGMENTS[4],
];

pub const DECOY_SEGMENT: PrizeSegment = DISPLAY_SEGMENTS[5];

// Constants for frontend animation
pub const SPIN_DURATION_MS: u32 = 4000;
pub const MIN_SPINS: u32 = 4;
pub const MAX_SPINS: u32 = 6;
pub const SPIN_JITTER_DEGREES: f64 = 10.0;
pub const SPIN_EASING: &str = "cubic-bezier(0.23, 1, 0.32, 1)";

/// How the wheel's visual angle carries over between spins.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum RotationPolicy {
    /// Continue from wherever the previous spin settled.
    #[default]
    Accumulate,
    /// Snap back to 0 degrees before every spin.
    ResetEachSpin,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct SpinConfig {
    pub duration_ms: u32,
    pub min_full_rotations: u32,
    pub max_full_rotations: u32,
    pub jitter_degrees: f64,
    pub policy: RotationPolicy,
}

impl Default for SpinConfig {
    fn default() -> Self {
        Self {
            duration_ms: SPIN_DURATION_MS,
            min_full_rotations: MIN_SPINS,
            max_full_rotations: MAX_SPINS,
            jitter_degrees: SPIN_JITTER_DEGREES,
            policy: RotationPolicy::default(),
        }
    }
}

/// Everything needed to animate one spin. The outcome is fixed before the animation starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinPlan {
    pub segment: PrizeSegment,
    pub full_rotations: u32,
    pub jitter: f64,
    pub start_rotation: f64,
    pub final_rotation: f64,
    pub settled_rotation: f64,
}

impl SpinPlan {
    pub fn outcome(&self) -> OutcomeKind {
        self.segment.kind
    }
}

pub fn normalize_angle(degrees: f64) -> f64 {
    degrees.rem_euclid(360.0)
}

pub fn plan_spin<R: Rng + ?Sized>(rng: &mut R, current_rotation: f64, config: &SpinConfig) -> SpinPlan {
    let segment = DRAWABLE_SEGMENTS[rng.gen_range(0..DRAWABLE_SEGMENTS.len())];

    let min = config.min_full_rotations;
    let max = config.max_full_rotations.max(min);
    let full_rotations = rng.gen_range(min..=max);

    let jitter = if config.jitter_degrees > 0.0 {
        rng.gen_range(-config.jitter_degrees..config.jitter_degrees)
    } else {
        0.0
    };

    let start_rotation = match config.policy {
        RotationPolicy::Accumulate => current_rotation,
        RotationPolicy::ResetEachSpin => 0.0,
    };

    // Land on a whole turn first so the pointer math below is absolute
    let whole_turns = start_rotation - normalize_angle(start_rotation);
    let final_rotation = whole_turns
        + f64::from(full_rotations) * 360.0
        + (360.0 - segment.center_angle)
        + jitter;

    SpinPlan {
        segment,
        full_rotations,
        jitter,
        start_rotation,
        final_rotation,
        settled_rotation: normalize_angle(final_rotation),
    }
}

/// The display segment sitting under the top pointer for a given wheel rotation.
pub fn segment_under_pointer(rotation: f64) -> PrizeSegment {
    let wheel_angle = normalize_angle(360.0 - normalize_angle(rotation));
    let index = (wheel_angle / SEGMENT_SWEEP) as usize;
    DISPLAY_SEGMENTS[index.min(DISPLAY_SEGMENTS.len() - 1)]
}

/// What the result view does when its button is pressed.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum FollowUp {
    Claim,
    SpinAgain,
    StartOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResultCopy {
    pub message: &'static str,
    pub action_label: &'static str,
    pub follow_up: FollowUp,
    pub shows_email: bool,
}

pub fn result_copy(kind: OutcomeKind) -> ResultCopy {
    match kind {
        OutcomeKind::Discount => ResultCopy {
            message: "Your exclusive discount has been applied!",
            action_label: "Claim discount",
            follow_up: FollowUp::Claim,
            shows_email: true,
        },
        OutcomeKind::Gift => ResultCopy {
            message: "Congratulations! You won a free gift!",
            action_label: "Claim gift",
            follow_up: FollowUp::Claim,
            shows_email: true,
        },
        OutcomeKind::Retry => ResultCopy {
            message: "Spin the wheel again for another chance!",
            action_label: "Spin again",
            follow_up: FollowUp::SpinAgain,
            shows_email: false,
        },
        OutcomeKind::Nothing => ResultCopy {
            message: "Better luck next time!",
            action_label: "Start over",
            follow_up: FollowUp::StartOver,
            shows_email: false,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashMap;

    fn pointer_error(plan: &SpinPlan) -> f64 {
        let off = normalize_angle(plan.final_rotation + plan.segment.center_angle);
        off.min(360.0 - off)
    }

    #[test]
    fn test_decoy_is_never_drawn() {
        let mut rng = StdRng::seed_from_u64(7);
        let config = SpinConfig::default();
        let mut counts: HashMap<&str, u32> = HashMap::new();

        for _ in 0..20_000 {
            let plan = plan_spin(&mut rng, 0.0, &config);
            assert!(DRAWABLE_SEGMENTS.contains(&plan.segment));
            *counts.entry(plan.segment.label).or_default() += 1;
        }

        assert_eq!(counts.get(DECOY_SEGMENT.label), None);
        assert_eq!(counts.len(), DRAWABLE_SEGMENTS.len());
        // Uniform draw: each of the five lands near 4000
        for count in counts.values() {
            assert!((3500..4500).contains(count), "skewed draw: {:?}", counts);
        }
    }

    #[test]
    fn test_winning_segment_lands_under_pointer() {
        let mut rng = StdRng::seed_from_u64(42);
        let config = SpinConfig::default();
        let mut rotation = 0.0;

        for _ in 0..500 {
            let plan = plan_spin(&mut rng, rotation, &config);
            assert!(pointer_error(&plan) <= config.jitter_degrees + 1e-9);
            assert_eq!(segment_under_pointer(plan.settled_rotation), plan.segment);
            rotation = plan.settled_rotation;
        }
    }

    #[test]
    fn test_rotation_bounds_and_normalization() {
        let mut rng = StdRng::seed_from_u64(3);
        let config = SpinConfig::default();

        for _ in 0..200 {
            let plan = plan_spin(&mut rng, 725.0, &config);
            assert!((MIN_SPINS..=MAX_SPINS).contains(&plan.full_rotations));
            assert!(plan.jitter >= -SPIN_JITTER_DEGREES && plan.jitter < SPIN_JITTER_DEGREES);
            assert!(plan.final_rotation > plan.start_rotation);
            assert!((0.0..360.0).contains(&plan.settled_rotation));
        }
    }

    #[test]
    fn test_reset_policy_starts_from_zero() {
        let mut rng = StdRng::seed_from_u64(11);
        let config = SpinConfig {
            policy: RotationPolicy::ResetEachSpin,
            ..SpinConfig::default()
        };

        let plan = plan_spin(&mut rng, 123.0, &config);
        assert_eq!(plan.start_rotation, 0.0);
        assert!(plan.final_rotation < 360.0 * f64::from(MAX_SPINS + 1) + SPIN_JITTER_DEGREES);
    }

    #[test]
    fn test_zero_jitter_is_exact() {
        let mut rng = StdRng::seed_from_u64(5);
        let config = SpinConfig {
            jitter_degrees: 0.0,
            ..SpinConfig::default()
        };

        let plan = plan_spin(&mut rng, 0.0, &config);
        assert_eq!(plan.jitter, 0.0);
        assert_eq!(plan.settled_rotation, normalize_angle(360.0 - plan.segment.center_angle));
    }

    #[test]
    fn test_result_copy_lookup() {
        let gift = result_copy(OutcomeKind::Gift);
        assert!(gift.message.contains("gift"));
        assert!(gift.action_label.starts_with("Claim"));
        assert_eq!(gift.follow_up, FollowUp::Claim);

        assert_eq!(result_copy(OutcomeKind::Retry).follow_up, FollowUp::SpinAgain);
        assert_eq!(result_copy(OutcomeKind::Nothing).follow_up, FollowUp::StartOver);
        assert!(result_copy(OutcomeKind::Discount).shows_email);
        assert!(!result_copy(OutcomeKind::Nothing).shows_email);
    }
}
