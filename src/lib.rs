//! Career guidance and resume tailoring on top of a generative text model.
//!
//! Two workflows drive everything: [`workflow::AdviceWorkflow`] turns a
//! validated [`profile::Profile`] into career advice, and
//! [`workflow::ResumeWorkflow`] rewrites an uploaded PDF resume against a job
//! description. Both require an [`access::AccessGrant`] and talk to the model
//! through [`generation::GenerativeModelClient`].

pub mod access;
pub mod catalog;
pub mod config;
pub mod document;
pub mod error;
pub mod generation;
pub mod profile;
pub mod prompt;
pub mod workflow;

pub use error::CareerError;
