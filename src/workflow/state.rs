use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A workflow's state set: one initial state, two terminal states and the
/// edges allowed between them.
pub trait WorkflowState: Copy + Eq + fmt::Debug + fmt::Display + Serialize {
    const INITIAL: Self;
    const SUCCEEDED: Self;
    const FAILED: Self;

    fn allows(self, next: Self) -> bool;

    fn is_terminal(self) -> bool {
        self == Self::SUCCEEDED || self == Self::FAILED
    }
}

/// CollectingInput → Validating → Synthesizing → Generating → Succeeded | Failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdviceState {
    CollectingInput,
    Validating,
    Synthesizing,
    Generating,
    Succeeded,
    Failed,
}

impl fmt::Display for AdviceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdviceState::CollectingInput => write!(f, "COLLECTING_INPUT"),
            AdviceState::Validating => write!(f, "VALIDATING"),
            AdviceState::Synthesizing => write!(f, "SYNTHESIZING"),
            AdviceState::Generating => write!(f, "GENERATING"),
            AdviceState::Succeeded => write!(f, "SUCCEEDED"),
            AdviceState::Failed => write!(f, "FAILED"),
        }
    }
}

impl WorkflowState for AdviceState {
    const INITIAL: Self = AdviceState::CollectingInput;
    const SUCCEEDED: Self = AdviceState::Succeeded;
    const FAILED: Self = AdviceState::Failed;

    fn allows(self, next: Self) -> bool {
        use AdviceState::*;
        matches!(
            (self, next),
            (CollectingInput, Validating)
                | (Validating, Synthesizing)
                | (Synthesizing, Generating)
                | (Generating, Succeeded)
                | (CollectingInput | Validating | Synthesizing | Generating, Failed)
        )
    }
}

/// CollectingInput → Extracting → Validating → Synthesizing → Generating → Succeeded | Failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResumeState {
    CollectingInput,
    Extracting,
    Validating,
    Synthesizing,
    Generating,
    Succeeded,
    Failed,
}

impl fmt::Display for ResumeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResumeState::CollectingInput => write!(f, "COLLECTING_INPUT"),
            ResumeState::Extracting => write!(f, "EXTRACTING"),
            ResumeState::Validating => write!(f, "VALIDATING"),
            ResumeState::Synthesizing => write!(f, "SYNTHESIZING"),
            ResumeState::Generating => write!(f, "GENERATING"),
            ResumeState::Succeeded => write!(f, "SUCCEEDED"),
            ResumeState::Failed => write!(f, "FAILED"),
        }
    }
}

impl WorkflowState for ResumeState {
    const INITIAL: Self = ResumeState::CollectingInput;
    const SUCCEEDED: Self = ResumeState::Succeeded;
    const FAILED: Self = ResumeState::Failed;

    fn allows(self, next: Self) -> bool {
        use ResumeState::*;
        matches!(
            (self, next),
            (CollectingInput, Extracting)
                | (Extracting, Validating)
                | (Validating, Synthesizing)
                | (Synthesizing, Generating)
                | (Generating, Succeeded)
                | (
                    CollectingInput | Extracting | Validating | Synthesizing | Generating,
                    Failed
                )
        )
    }
}

/// How a run ended, without its payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunOutcome {
    Succeeded,
    Failed { kind: String, message: String },
}

/// Tracks one workflow run from its initial state to a terminal one.
#[derive(Debug)]
pub struct RunTracker<S> {
    run_id: Uuid,
    workflow: &'static str,
    state: S,
    history: Vec<S>,
    started_at: DateTime<Utc>,
}

impl<S: WorkflowState> RunTracker<S> {
    pub fn start(workflow: &'static str) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            workflow,
            state: S::INITIAL,
            history: Vec::new(),
            started_at: Utc::now(),
        }
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    pub fn state(&self) -> S {
        self.state
    }

    /// Moves to `next`. Edges outside the state set are a programming error.
    pub fn advance(&mut self, next: S) {
        debug_assert!(
            self.state.allows(next),
            "illegal transition {} -> {}",
            self.state,
            next
        );
        tracing::debug!(from = %self.state, to = %next, "workflow transition");
        self.history.push(self.state);
        self.state = next;
    }

    /// Enters the matching terminal state and produces the audit record.
    pub fn finish(mut self, outcome: RunOutcome) -> RunRecord<S> {
        let terminal = match outcome {
            RunOutcome::Succeeded => S::SUCCEEDED,
            RunOutcome::Failed { .. } => S::FAILED,
        };
        self.advance(terminal);

        let completed_at = Utc::now();
        let mut transitions = self.history;
        transitions.push(self.state);

        RunRecord {
            run_id: self.run_id,
            workflow: self.workflow.to_string(),
            transitions,
            outcome,
            started_at: self.started_at,
            completed_at,
            duration_ms: (completed_at - self.started_at).num_milliseconds(),
        }
    }
}

/// Structured audit record produced when a run reaches a terminal state.
#[derive(Debug, Clone, Serialize)]
pub struct RunRecord<S> {
    pub run_id: Uuid,
    pub workflow: String,
    pub transitions: Vec<S>,
    pub outcome: RunOutcome,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
    pub duration_ms: i64,
}

impl<S: WorkflowState> RunRecord<S> {
    pub fn final_state(&self) -> S {
        self.transitions.last().copied().unwrap_or(S::INITIAL)
    }

    pub fn visited(&self, state: S) -> bool {
        self.transitions.contains(&state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn happy_path_records_every_state() {
        let mut run = RunTracker::<AdviceState>::start("advice");
        assert_eq!(run.state(), AdviceState::CollectingInput);
        run.advance(AdviceState::Validating);
        run.advance(AdviceState::Synthesizing);
        run.advance(AdviceState::Generating);
        let record = run.finish(RunOutcome::Succeeded);

        assert_eq!(
            record.transitions,
            vec![
                AdviceState::CollectingInput,
                AdviceState::Validating,
                AdviceState::Synthesizing,
                AdviceState::Generating,
                AdviceState::Succeeded,
            ]
        );
        assert_eq!(record.final_state(), AdviceState::Succeeded);
        assert!(record.duration_ms >= 0);
    }

    #[test]
    fn failure_from_initial_state_goes_straight_to_failed() {
        let run = RunTracker::<ResumeState>::start("resume");
        let record = run.finish(RunOutcome::Failed {
            kind: "MissingInput".into(),
            message: "no document".into(),
        });
        assert_eq!(
            record.transitions,
            vec![ResumeState::CollectingInput, ResumeState::Failed]
        );
        assert!(!record.visited(ResumeState::Extracting));
    }

    #[test]
    fn terminal_states_allow_nothing() {
        for next in [ResumeState::CollectingInput, ResumeState::Failed, ResumeState::Succeeded] {
            assert!(!ResumeState::Succeeded.allows(next));
            assert!(!ResumeState::Failed.allows(next));
        }
        assert!(AdviceState::Failed.is_terminal());
        assert!(!AdviceState::Generating.is_terminal());
    }

    #[test]
    fn no_stage_can_be_skipped() {
        assert!(!ResumeState::CollectingInput.allows(ResumeState::Validating));
        assert!(!ResumeState::Extracting.allows(ResumeState::Generating));
        assert!(!AdviceState::Validating.allows(AdviceState::Generating));
    }

    #[test]
    fn state_display() {
        assert_eq!(AdviceState::CollectingInput.to_string(), "COLLECTING_INPUT");
        assert_eq!(ResumeState::Extracting.to_string(), "EXTRACTING");
        assert_eq!(ResumeState::Succeeded.to_string(), "SUCCEEDED");
    }

    #[test]
    fn run_record_serializes() {
        let record = RunTracker::<AdviceState>::start("advice").finish(RunOutcome::Failed {
            kind: "Validation".into(),
            message: "missing".into(),
        });
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["workflow"], "advice");
        assert_eq!(json["transitions"][1], "Failed");
        assert_eq!(json["outcome"]["Failed"]["kind"], "Validation");
    }
}
