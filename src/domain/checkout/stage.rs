//! Checkout workflow stages.
//!
//! Each checkout attempt walks a linear pipeline and ends either `Activated`
//! or `Failed`. Both ends are terminal; a session is never re-entered.

use serde::Serialize;

use crate::domain::foundation::{SessionId, StateMachine, ValidationError};

use super::CheckoutError;

/// Stage of a single checkout attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutStage {
    Created,
    InstrumentCollected,
    Validated,
    Verifying,
    Verified,
    Activating,
    Activated,
    Failed,
}

impl StateMachine for CheckoutStage {
    fn can_transition_to(&self, target: &Self) -> bool {
        use CheckoutStage::*;
        matches!(
            (self, target),
            (Created, InstrumentCollected)
                | (InstrumentCollected, Validated)
                | (Validated, Verifying)
                | (Verifying, Verified)
                | (Verified, Activating)
                | (Activating, Activated)
                | (Created, Failed)
                | (InstrumentCollected, Failed)
                | (Validated, Failed)
                | (Verifying, Failed)
                | (Verified, Failed)
                | (Activating, Failed)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use CheckoutStage::*;
        match self {
            Created => vec![InstrumentCollected, Failed],
            InstrumentCollected => vec![Validated, Failed],
            Validated => vec![Verifying, Failed],
            Verifying => vec![Verified, Failed],
            Verified => vec![Activating, Failed],
            Activating => vec![Activated, Failed],
            Activated | Failed => vec![],
        }
    }
}

/// Tracks the progress of one checkout attempt.
///
/// Records the failure reason when the attempt halts.
#[derive(Debug, Clone)]
pub struct CheckoutWorkflow {
    session_id: SessionId,
    stage: CheckoutStage,
    failure: Option<CheckoutError>,
}

impl CheckoutWorkflow {
    pub fn start(session_id: SessionId) -> Self {
        Self {
            session_id,
            stage: CheckoutStage::Created,
            failure: None,
        }
    }

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    pub fn stage(&self) -> CheckoutStage {
        self.stage
    }

    pub fn failure(&self) -> Option<&CheckoutError> {
        self.failure.as_ref()
    }

    /// Moves to the next stage.
    pub fn advance(&mut self, target: CheckoutStage) -> Result<(), ValidationError> {
        self.stage = self.stage.transition_to(target)?;
        tracing::debug!(session_id = %self.session_id, stage = ?self.stage, "Checkout stage changed");
        Ok(())
    }

    /// Halts the attempt and hands back the reason for propagation.
    ///
    /// Failing an already terminal attempt keeps its stage and original reason.
    pub fn fail(&mut self, reason: CheckoutError) -> CheckoutError {
        if self.stage.transition_to(CheckoutStage::Failed).is_ok() {
            self.stage = CheckoutStage::Failed;
            self.failure = Some(reason.clone());
            tracing::debug!(session_id = %self.session_id, reason = %reason, "Checkout failed");
        }
        reason
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HAPPY_PATH: [CheckoutStage; 6] = [
        CheckoutStage::InstrumentCollected,
        CheckoutStage::Validated,
        CheckoutStage::Verifying,
        CheckoutStage::Verified,
        CheckoutStage::Activating,
        CheckoutStage::Activated,
    ];

    fn workflow() -> CheckoutWorkflow {
        CheckoutWorkflow::start(SessionId::new("sess_1").unwrap())
    }

    #[test]
    fn happy_path_reaches_activated() {
        let mut wf = workflow();
        for stage in HAPPY_PATH {
            wf.advance(stage).unwrap();
        }
        assert_eq!(wf.stage(), CheckoutStage::Activated);
        assert!(wf.failure().is_none());
    }

    #[test]
    fn stages_cannot_be_skipped() {
        let mut wf = workflow();
        assert!(wf.advance(CheckoutStage::Verified).is_err());
        assert_eq!(wf.stage(), CheckoutStage::Created);
    }

    #[test]
    fn every_non_terminal_stage_can_fail() {
        let mut stage = CheckoutStage::Created;
        for next in HAPPY_PATH {
            assert!(stage.can_transition_to(&CheckoutStage::Failed), "{:?}", stage);
            stage = next;
        }
    }

    #[test]
    fn activated_and_failed_are_terminal() {
        assert!(CheckoutStage::Activated.is_terminal());
        assert!(CheckoutStage::Failed.is_terminal());
        assert!(!CheckoutStage::Activated.can_transition_to(&CheckoutStage::Failed));
        assert!(!CheckoutStage::Failed.can_transition_to(&CheckoutStage::Created));
    }

    #[test]
    fn fail_records_reason() {
        let mut wf = workflow();
        wf.advance(CheckoutStage::InstrumentCollected).unwrap();
        let err = wf.fail(CheckoutError::InvalidCvc);

        assert_eq!(err, CheckoutError::InvalidCvc);
        assert_eq!(wf.stage(), CheckoutStage::Failed);
        assert_eq!(wf.failure(), Some(&CheckoutError::InvalidCvc));
    }

    #[test]
    fn fail_after_activation_keeps_activated() {
        let mut wf = workflow();
        for stage in HAPPY_PATH {
            wf.advance(stage).unwrap();
        }
        wf.fail(CheckoutError::internal("late"));
        assert_eq!(wf.stage(), CheckoutStage::Activated);
        assert!(wf.failure().is_none());
    }

    #[test]
    fn valid_transitions_are_consistent_with_can_transition_to() {
        for status in [CheckoutStage::Created]
            .into_iter()
            .chain(HAPPY_PATH)
            .chain([CheckoutStage::Failed])
        {
            for target in status.valid_transitions() {
                assert!(status.can_transition_to(&target));
            }
        }
    }
}
