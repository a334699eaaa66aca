//! Session state machine.
//!
//! Replaces scattered field setters and flags with one reducer: every user
//! action is an event, `Session::apply` is the single transition function.
//! The form and the result are mutually exclusive render states, and the
//! in-flight phase disables resubmission by construction.

use crate::client::RiskAssessment;
use crate::errors::{PredictError, Result};
use crate::profile::ProfileDraft;

/// Render phase of one assessment session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Editing the profile; no assessment is live
    Form,
    /// One prediction request pending; submission disabled
    InFlight,
    /// An assessment is live and shown instead of the form
    Review,
}

impl Phase {
    pub fn display_name(&self) -> &'static str {
        match self {
            Phase::Form => "Editing",
            Phase::InFlight => "Awaiting prediction",
            Phase::Review => "Reviewing result",
        }
    }
}

impl Default for Phase {
    fn default() -> Self {
        Phase::Form
    }
}

/// Events that drive the session.
///
/// Valid transitions:
///   Form     -> InFlight  (Submit)
///   InFlight -> Review    (PredictionReady)
///   InFlight -> Form      (PredictionFailed, draft retained)
///   Review   -> Form      (Reset, draft cleared)
///   Form     -> Form      (Reset, draft cleared)
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    Submit,
    PredictionReady(RiskAssessment),
    PredictionFailed,
    Reset,
}

impl SessionEvent {
    fn name(&self) -> &'static str {
        match self {
            SessionEvent::Submit => "Submit",
            SessionEvent::PredictionReady(_) => "PredictionReady",
            SessionEvent::PredictionFailed => "PredictionFailed",
            SessionEvent::Reset => "Reset",
        }
    }
}

/// One assessment session: the draft under edit, the live assessment if
/// any, and the current phase.
///
/// Invariant: `assessment.is_some()` exactly when `phase == Review`.
#[derive(Debug, Clone, Default)]
pub struct Session {
    draft: ProfileDraft,
    assessment: Option<RiskAssessment>,
    phase: Phase,
}

impl Session {
    pub fn new() -> Self {
        Session::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn draft(&self) -> &ProfileDraft {
        &self.draft
    }

    /// Mutable access to the draft, only while the form is editable
    pub fn draft_mut(&mut self) -> Option<&mut ProfileDraft> {
        match self.phase {
            Phase::Form => Some(&mut self.draft),
            _ => None,
        }
    }

    pub fn assessment(&self) -> Option<&RiskAssessment> {
        self.assessment.as_ref()
    }

    /// Apply one event, moving to the next phase or rejecting the event.
    pub fn apply(&mut self, event: SessionEvent) -> Result<Phase> {
        let next = match (self.phase, &event) {
            (Phase::Form, SessionEvent::Submit) => Phase::InFlight,

            (Phase::InFlight, SessionEvent::PredictionReady(_)) => Phase::Review,
            // Failure returns to the form with the entered values kept,
            // so the user can resubmit or fix a field
            (Phase::InFlight, SessionEvent::PredictionFailed) => Phase::Form,

            (Phase::Review, SessionEvent::Reset) => Phase::Form,
            (Phase::Form, SessionEvent::Reset) => Phase::Form,

            (from, event) => {
                return Err(PredictError::InvalidTransition {
                    from: format!("{:?}", from),
                    event: event.name().to_string(),
                });
            }
        };

        match event {
            SessionEvent::PredictionReady(assessment) => {
                self.assessment = Some(assessment);
            }
            SessionEvent::Reset => {
                self.assessment = None;
                self.draft = ProfileDraft::new();
            }
            SessionEvent::Submit | SessionEvent::PredictionFailed => {}
        }

        self.phase = next;
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::RiskCategory;
    use crate::profile::ModelVariant;

    fn assessment() -> RiskAssessment {
        RiskAssessment {
            risk: RiskCategory::Moderate,
            probability: 0.45,
            factors: vec!["Elevated cholesterol".to_string()],
            model_used: "Random Forest".to_string(),
        }
    }

    #[test]
    fn test_happy_path() {
        let mut session = Session::new();
        assert_eq!(session.phase(), Phase::Form);
        assert!(session.assessment().is_none());

        session.apply(SessionEvent::Submit).unwrap();
        assert_eq!(session.phase(), Phase::InFlight);
        // No edits while a request is pending
        assert!(session.draft_mut().is_none());

        session
            .apply(SessionEvent::PredictionReady(assessment()))
            .unwrap();
        assert_eq!(session.phase(), Phase::Review);
        assert!(session.assessment().is_some());
    }

    #[test]
    fn test_failure_returns_to_form_without_assessment() {
        let mut session = Session::new();
        session.draft_mut().unwrap().age = Some(50);

        session.apply(SessionEvent::Submit).unwrap();
        session.apply(SessionEvent::PredictionFailed).unwrap();

        assert_eq!(session.phase(), Phase::Form);
        assert!(session.assessment().is_none());
        // Entered values survive a failed request
        assert_eq!(session.draft().age, Some(50));
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut session = Session::new();
        session.draft_mut().unwrap().age = Some(50);
        session.draft_mut().unwrap().model = ModelVariant::DecisionTree;

        session.apply(SessionEvent::Submit).unwrap();
        session
            .apply(SessionEvent::PredictionReady(assessment()))
            .unwrap();
        session.apply(SessionEvent::Reset).unwrap();

        assert_eq!(session.phase(), Phase::Form);
        assert!(session.assessment().is_none());
        assert_eq!(session.draft().age, None);
        // Model variant reverts to its documented default
        assert_eq!(session.draft().model, ModelVariant::RandomForest);
    }

    #[test]
    fn test_invalid_transitions_rejected() {
        let mut session = Session::new();

        // Result cannot arrive while editing
        let err = session
            .apply(SessionEvent::PredictionReady(assessment()))
            .unwrap_err();
        assert!(matches!(err, PredictError::InvalidTransition { .. }));

        // Cannot resubmit while in flight
        session.apply(SessionEvent::Submit).unwrap();
        let err = session.apply(SessionEvent::Submit).unwrap_err();
        assert!(matches!(err, PredictError::InvalidTransition { .. }));

        // Cannot reset away a pending request
        let err = session.apply(SessionEvent::Reset).unwrap_err();
        assert!(matches!(err, PredictError::InvalidTransition { .. }));
        assert_eq!(session.phase(), Phase::InFlight);
    }

    #[test]
    fn test_assessment_present_iff_review() {
        let mut session = Session::new();
        assert_eq!(session.assessment().is_some(), session.phase() == Phase::Review);
        session.apply(SessionEvent::Submit).unwrap();
        assert_eq!(session.assessment().is_some(), session.phase() == Phase::Review);
        session
            .apply(SessionEvent::PredictionReady(assessment()))
            .unwrap();
        assert_eq!(session.assessment().is_some(), session.phase() == Phase::Review);
        session.apply(SessionEvent::Reset).unwrap();
        assert_eq!(session.assessment().is_some(), session.phase() == Phase::Review);
    }
}
