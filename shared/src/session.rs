//! Client-side session for the promo wheel.
//!
//! The widget keeps exactly one `WheelSession` per page load. Every UI
//! event is funnelled through it, so the spin guard, the double-submit
//! guard and the soft-fail policy all live in one place instead of being
//! spread over event handlers.
//!
//! Async work (the submission request, the spin timer) is tracked with
//! tickets stamped with the session generation. `reset` bumps the
//! generation, so results that arrive for an older session are dropped.

use rand::Rng;
use validator::ValidationError;

use crate::shared_wheel_game::{
    plan_spin, result_copy, FollowUp, OutcomeKind, PrizeSegment, SpinConfig, SpinPlan,
};
use crate::validation::{validate_and_normalize, NormalizedEmail};

#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    AwaitingEmail,
    Submitting,
    WheelReady,
    Spinning { plan: SpinPlan },
    ResultShown { segment: PrizeSegment },
    Claimed { segment: PrizeSegment },
}

#[derive(Debug)]
pub enum SessionError {
    Invalid(ValidationError),
    Busy,
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Invalid(e) => write!(f, "Invalid email: {}", e),
            Self::Busy => write!(f, "Email already submitted"),
        }
    }
}

impl std::error::Error for SessionError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionTicket {
    generation: u64,
    pub email: NormalizedEmail,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinTicket {
    generation: u64,
    pub plan: SpinPlan,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionAck {
    Saved,
    /// The backend failed but the visitor still gets to spin.
    ContinuedWithoutSaving,
    Stale,
}

#[derive(Debug, Clone)]
pub struct WheelSession {
    phase: Phase,
    email: Option<NormalizedEmail>,
    rotation: f64,
    generation: u64,
    config: SpinConfig,
}

impl WheelSession {
    pub fn new(config: SpinConfig) -> Self {
        Self {
            phase: Phase::AwaitingEmail,
            email: None,
            rotation: 0.0,
            generation: 0,
            config,
        }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn email(&self) -> Option<&NormalizedEmail> {
        self.email.as_ref()
    }

    /// Current resting angle of the wheel, always in `[0, 360)`.
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn config(&self) -> &SpinConfig {
        &self.config
    }

    pub fn is_spinning(&self) -> bool {
        matches!(self.phase, Phase::Spinning { .. })
    }

    /// Takes the raw input field value; it is trimmed before validation.
    pub fn begin_submission(&mut self, raw_email: &str) -> Result<SubmissionTicket, SessionError> {
        if self.phase != Phase::AwaitingEmail {
            return Err(SessionError::Busy);
        }

        let email = validate_and_normalize(raw_email.trim()).map_err(SessionError::Invalid)?;
        self.email = Some(email.clone());
        self.phase = Phase::Submitting;

        Ok(SubmissionTicket {
            generation: self.generation,
            email,
        })
    }

    pub fn complete_submission(&mut self, ticket: &SubmissionTicket, delivered: bool) -> SubmissionAck {
        if ticket.generation != self.generation || self.phase != Phase::Submitting {
            return SubmissionAck::Stale;
        }

        self.phase = Phase::WheelReady;
        if delivered {
            SubmissionAck::Saved
        } else {
            SubmissionAck::ContinuedWithoutSaving
        }
    }

    /// Draws the outcome and enters `Spinning`. Ignored unless the wheel is ready.
    pub fn start_spin<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<SpinTicket> {
        if self.phase != Phase::WheelReady {
            return None;
        }

        let plan = plan_spin(rng, self.rotation, &self.config);
        log::debug!(
            "spin planned: {} after {} turns, {:.1} -> {:.1}",
            plan.segment.label,
            plan.full_rotations,
            plan.start_rotation,
            plan.final_rotation
        );
        self.phase = Phase::Spinning { plan };

        Some(SpinTicket {
            generation: self.generation,
            plan,
        })
    }

    pub fn finish_spin(&mut self, ticket: &SpinTicket) -> Option<OutcomeKind> {
        if ticket.generation != self.generation {
            return None;
        }
        match self.phase {
            Phase::Spinning { plan } if plan == ticket.plan => {
                self.rotation = plan.settled_rotation;
                self.phase = Phase::ResultShown { segment: plan.segment };
                Some(plan.outcome())
            }
            _ => None,
        }
    }

    /// Runs the result view's action. Returns the action taken, or `None` outside `ResultShown`.
    pub fn follow_up(&mut self) -> Option<FollowUp> {
        let Phase::ResultShown { segment } = self.phase else {
            return None;
        };

        let action = result_copy(segment.kind).follow_up;
        match action {
            FollowUp::SpinAgain => self.phase = Phase::WheelReady,
            FollowUp::Claim => self.phase = Phase::Claimed { segment },
            FollowUp::StartOver => self.reset(),
        }
        Some(action)
    }

    pub fn reset(&mut self) {
        self.phase = Phase::AwaitingEmail;
        self.email = None;
        self.rotation = 0.0;
        self.generation = self.generation.wrapping_add(1);
    }
}

impl Default for WheelSession {
    fn default() -> Self {
        Self::new(SpinConfig::default())
    }
}
