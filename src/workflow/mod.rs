mod advice;
mod failure;
mod resume;
mod state;

pub use advice::{AdviceRun, AdviceWorkflow};
pub use failure::{EmptyContent, MissingInput, WorkflowFailure};
pub use resume::{
    ARTIFACT_CONTENT_TYPE, ARTIFACT_FILE_NAME, DownloadArtifact, ResumeRequest, ResumeRun,
    ResumeWorkflow, TailoredResume,
};
pub use state::{AdviceState, ResumeState, RunOutcome, RunRecord, RunTracker, WorkflowState};
