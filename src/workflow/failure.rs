use std::fmt;

use thiserror::Error;

use crate::document::ExtractionError;
use crate::generation::GenerationError;
use crate::profile::ValidationError;

/// Which piece of the resume request was not supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingInput {
    Document,
    JobDescription,
    Both,
}

impl fmt::Display for MissingInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MissingInput::Document => write!(f, "resume document"),
            MissingInput::JobDescription => write!(f, "job description"),
            MissingInput::Both => write!(f, "resume document and job description"),
        }
    }
}

/// Input that was supplied but holds nothing once whitespace is trimmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyContent {
    ResumeText,
    JobDescription,
}

impl fmt::Display for EmptyContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmptyContent::ResumeText => write!(f, "resume text"),
            EmptyContent::JobDescription => write!(f, "job description"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkflowFailure {
    #[error("profile validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("missing input: {0}")]
    MissingInput(MissingInput),

    #[error("document extraction failed: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("empty {0}")]
    EmptyContent(EmptyContent),

    #[error("generation failed: {0}")]
    Generation(#[from] GenerationError),
}

impl WorkflowFailure {
    /// Short kind name for audit records.
    pub fn kind(&self) -> String {
        match self {
            WorkflowFailure::Validation(_) => "Validation".to_string(),
            WorkflowFailure::MissingInput(_) => "MissingInput".to_string(),
            WorkflowFailure::Extraction(_) => "Extraction".to_string(),
            WorkflowFailure::EmptyContent(_) => "EmptyContent".to_string(),
            WorkflowFailure::Generation(e) => e.kind().to_string(),
        }
    }

    pub fn generation(&self) -> Option<&GenerationError> {
        match self {
            WorkflowFailure::Generation(e) => Some(e),
            _ => None,
        }
    }

    /// Safe to retry by re-invoking the workflow unchanged.
    pub fn is_retryable(&self) -> bool {
        self.generation().is_some_and(GenerationError::is_retryable)
    }

    pub fn is_misconfiguration(&self) -> bool {
        self.generation().is_some_and(GenerationError::is_misconfiguration)
    }

    /// The message shown to the user; specific to the failure and never a stack trace.
    pub fn user_message(&self) -> String {
        match self {
            WorkflowFailure::Validation(ValidationError::Missing { field }) => {
                format!("Please make a selection for {field}.")
            }
            WorkflowFailure::Validation(ValidationError::Invalid { field, reason }) => {
                format!("The value given for {field} is not valid: {reason}.")
            }
            WorkflowFailure::MissingInput(_) => {
                "Please upload your resume and provide the job description.".to_string()
            }
            WorkflowFailure::Extraction(ExtractionError::UnsupportedFormat(_)) => {
                "Only PDF resumes are supported. Please upload a PDF file.".to_string()
            }
            WorkflowFailure::Extraction(e) => {
                format!("We could not read your resume. The PDF seems damaged or unreadable ({e}).")
            }
            WorkflowFailure::EmptyContent(EmptyContent::ResumeText) => {
                "No text could be found in your resume. Scanned documents without embedded \
                 text are not supported."
                    .to_string()
            }
            WorkflowFailure::EmptyContent(EmptyContent::JobDescription) => {
                "The job description is blank. Please paste the job description.".to_string()
            }
            WorkflowFailure::Generation(e) => e.user_message(),
        }
    }
}
