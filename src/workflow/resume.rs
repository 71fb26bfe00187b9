use std::path::{Path, PathBuf};

use bytes::Bytes;
use tracing::{Instrument, info, info_span, warn};

use super::failure::{EmptyContent, MissingInput, WorkflowFailure};
use super::state::{ResumeState, RunOutcome, RunRecord, RunTracker};
use crate::access::AccessGrant;
use crate::document::{DocumentTextExtractor, PageTextSource, UploadedDocument};
use crate::generation::{GenerationBackend, GenerativeModelClient, SafetyPolicy};
use crate::prompt::build_resume_prompt;

pub const ARTIFACT_FILE_NAME: &str = "tailored_resume.txt";
pub const ARTIFACT_CONTENT_TYPE: &str = "text/markdown";

/// What the user submits: an uploaded resume and the target job description.
#[derive(Debug, Clone, Default)]
pub struct ResumeRequest {
    pub document: Option<UploadedDocument>,
    pub job_description: String,
}

/// A downloadable file offered alongside the rendered result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadArtifact {
    pub file_name: &'static str,
    pub content_type: &'static str,
    pub bytes: Bytes,
}

impl DownloadArtifact {
    /// Writes the artifact into `dir` under its file name, creating `dir` if needed.
    pub async fn write_to(&self, dir: &Path) -> std::io::Result<PathBuf> {
        tokio::fs::create_dir_all(dir).await?;
        let path = dir.join(self.file_name);
        tokio::fs::write(&path, &self.bytes).await?;
        Ok(path)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TailoredResume {
    pub text: String,
    pub artifact: DownloadArtifact,
}

impl TailoredResume {
    fn new(text: String) -> Self {
        let artifact = DownloadArtifact {
            file_name: ARTIFACT_FILE_NAME,
            content_type: ARTIFACT_CONTENT_TYPE,
            bytes: Bytes::from(text.clone().into_bytes()),
        };
        Self { text, artifact }
    }
}

#[derive(Debug)]
pub struct ResumeRun {
    pub record: RunRecord<ResumeState>,
    pub outcome: Result<TailoredResume, WorkflowFailure>,
}

impl ResumeRun {
    pub fn state(&self) -> ResumeState {
        self.record.final_state()
    }
}

/// Uploaded resume plus job description in, tailored resume out.
pub struct ResumeWorkflow<'a, B, S> {
    client: &'a GenerativeModelClient<B>,
    extractor: &'a DocumentTextExtractor<S>,
    policy: SafetyPolicy,
}

impl<'a, B: GenerationBackend, S: PageTextSource> ResumeWorkflow<'a, B, S> {
    pub fn new(client: &'a GenerativeModelClient<B>, extractor: &'a DocumentTextExtractor<S>) -> Self {
        Self {
            client,
            extractor,
            policy: SafetyPolicy::permissive(),
        }
    }

    pub async fn run(&self, grant: &AccessGrant, request: ResumeRequest) -> ResumeRun {
        let mut tracker = RunTracker::<ResumeState>::start("resume");
        let span = info_span!("resume", run_id = %tracker.run_id(), user = %grant.identifier());

        let outcome = self.execute(&mut tracker, request).instrument(span.clone()).await;

        let record = span.in_scope(|| match &outcome {
            Ok(resume) => {
                info!(bytes = resume.artifact.bytes.len(), "tailored resume generated");
                tracker.finish(RunOutcome::Succeeded)
            }
            Err(failure) => {
                warn!(kind = %failure.kind(), error = %failure, "resume run failed");
                tracker.finish(RunOutcome::Failed {
                    kind: failure.kind(),
                    message: failure.to_string(),
                })
            }
        });
        ResumeRun { record, outcome }
    }

    async fn execute(
        &self,
        tracker: &mut RunTracker<ResumeState>,
        request: ResumeRequest,
    ) -> Result<TailoredResume, WorkflowFailure> {
        let ResumeRequest {
            document,
            job_description,
        } = request;

        let document = match (document, job_description.is_empty()) {
            (Some(document), false) => document,
            (None, false) => return Err(WorkflowFailure::MissingInput(MissingInput::Document)),
            (Some(_), true) => {
                return Err(WorkflowFailure::MissingInput(MissingInput::JobDescription));
            }
            (None, true) => return Err(WorkflowFailure::MissingInput(MissingInput::Both)),
        };

        document.format()?;

        tracker.advance(ResumeState::Extracting);
        let resume_text = self.extractor.extract_text(&document).await?;

        tracker.advance(ResumeState::Validating);
        if resume_text.trim().is_empty() {
            return Err(WorkflowFailure::EmptyContent(EmptyContent::ResumeText));
        }
        if job_description.trim().is_empty() {
            return Err(WorkflowFailure::EmptyContent(EmptyContent::JobDescription));
        }

        tracker.advance(ResumeState::Synthesizing);
        let prompt = build_resume_prompt(&resume_text, &job_description);

        tracker.advance(ResumeState::Generating);
        let text = self.client.generate(&prompt, &self.policy).await?;
        Ok(TailoredResume::new(text))
    }
}
