use tracing::{Instrument, info, info_span, warn};

use super::failure::WorkflowFailure;
use super::state::{AdviceState, RunOutcome, RunRecord, RunTracker};
use crate::access::AccessGrant;
use crate::generation::{GenerationBackend, GenerativeModelClient, SafetyPolicy};
use crate::profile::{Profile, RawProfile};
use crate::prompt::build_advice_prompt;

/// Result of one advice run: the audit trail plus the generated text or failure.
#[derive(Debug)]
pub struct AdviceRun {
    pub record: RunRecord<AdviceState>,
    pub outcome: Result<String, WorkflowFailure>,
}

impl AdviceRun {
    pub fn state(&self) -> AdviceState {
        self.record.final_state()
    }
}

/// Profile in, career advice out. Holds no state between runs.
pub struct AdviceWorkflow<'a, B> {
    client: &'a GenerativeModelClient<B>,
    policy: SafetyPolicy,
}

impl<'a, B: GenerationBackend> AdviceWorkflow<'a, B> {
    pub fn new(client: &'a GenerativeModelClient<B>) -> Self {
        Self {
            client,
            policy: SafetyPolicy::permissive(),
        }
    }

    pub async fn run(&self, grant: &AccessGrant, raw: RawProfile) -> AdviceRun {
        let mut tracker = RunTracker::<AdviceState>::start("advice");
        let span = info_span!("advice", run_id = %tracker.run_id(), user = %grant.identifier());

        let outcome = self.execute(&mut tracker, raw).instrument(span.clone()).await;

        let record = span.in_scope(|| match &outcome {
            Ok(text) => {
                info!(chars = text.len(), "advice generated");
                tracker.finish(RunOutcome::Succeeded)
            }
            Err(failure) => {
                warn!(kind = %failure.kind(), error = %failure, "advice run failed");
                tracker.finish(RunOutcome::Failed {
                    kind: failure.kind(),
                    message: failure.to_string(),
                })
            }
        });
        AdviceRun { record, outcome }
    }

    async fn execute(
        &self,
        tracker: &mut RunTracker<AdviceState>,
        raw: RawProfile,
    ) -> Result<String, WorkflowFailure> {
        tracker.advance(AdviceState::Validating);
        let profile = Profile::validate(raw)?;

        tracker.advance(AdviceState::Synthesizing);
        let prompt = build_advice_prompt(&profile);

        tracker.advance(AdviceState::Generating);
        let text = self.client.generate(&prompt, &self.policy).await?;
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::tests::grant;
    use crate::generation::GenerationError;
    use crate::generation::client::tests::StubBackend;
    use crate::profile::ProfileField;
    use crate::profile::tests::sample_raw;

    #[tokio::test]
    async fn valid_profile_reaches_succeeded() {
        let client = GenerativeModelClient::new(StubBackend::text("ADVICE_OK"));
        let run = AdviceWorkflow::new(&client).run(&grant(), sample_raw()).await;

        assert_eq!(run.outcome.as_deref(), Ok("ADVICE_OK"));
        assert_eq!(run.state(), AdviceState::Succeeded);
        assert_eq!(
            run.record.transitions,
            vec![
                AdviceState::CollectingInput,
                AdviceState::Validating,
                AdviceState::Synthesizing,
                AdviceState::Generating,
                AdviceState::Succeeded,
            ]
        );
        assert_eq!(run.record.outcome, RunOutcome::Succeeded);
    }

    #[tokio::test]
    async fn model_receives_the_synthesized_prompt() {
        let client = GenerativeModelClient::new(StubBackend::text("ADVICE_OK"));
        AdviceWorkflow::new(&client).run(&grant(), sample_raw()).await;

        let expected = build_advice_prompt(&Profile::validate(sample_raw()).unwrap());
        assert_eq!(client.backend().last_prompt(), Some(expected));
    }

    #[tokio::test]
    async fn invalid_profile_fails_without_calling_the_model() {
        let client = GenerativeModelClient::new(StubBackend::text("unused"));
        let mut raw = sample_raw();
        raw.work_experience_years = Some(21);

        let run = AdviceWorkflow::new(&client).run(&grant(), raw).await;

        let failure = run.outcome.unwrap_err();
        assert!(
            matches!(&failure, WorkflowFailure::Validation(e) if e.field() == ProfileField::WorkExperienceYears)
        );
        assert_eq!(
            run.record.transitions,
            vec![AdviceState::CollectingInput, AdviceState::Validating, AdviceState::Failed]
        );
        assert_eq!(client.backend().call_count(), 0);
    }

    #[tokio::test]
    async fn generation_failure_kind_is_propagated() {
        let client = GenerativeModelClient::new(StubBackend::failing(
            GenerationError::AuthenticationFailure {
                status: 401,
                message: "bad key".into(),
            },
        ));
        let run = AdviceWorkflow::new(&client).run(&grant(), sample_raw()).await;

        assert_eq!(run.state(), AdviceState::Failed);
        assert!(run.record.visited(AdviceState::Generating));
        let failure = run.outcome.unwrap_err();
        assert!(failure.is_misconfiguration());
        assert_eq!(failure.kind(), "AuthenticationFailure");
        assert_eq!(client.backend().call_count(), 1);
    }

    #[tokio::test]
    async fn generated_text_is_returned_untouched() {
        let raw_text = "  ## Roles\n\n- Software Developer\n\n";
        let client = GenerativeModelClient::new(StubBackend::text(raw_text));
        let run = AdviceWorkflow::new(&client).run(&grant(), sample_raw()).await;
        assert_eq!(run.outcome.unwrap(), raw_text);
    }

    #[tokio::test]
    async fn concurrent_runs_do_not_interfere() {
        let client = GenerativeModelClient::new(StubBackend::text("ADVICE_OK"));
        let workflow = AdviceWorkflow::new(&client);
        let grant = grant();

        let mut broken = sample_raw();
        broken.education = None;

        let (good, bad) = tokio::join!(workflow.run(&grant, sample_raw()), workflow.run(&grant, broken));

        assert_eq!(good.state(), AdviceState::Succeeded);
        assert_eq!(bad.state(), AdviceState::Failed);
        assert_ne!(good.record.run_id, bad.record.run_id);
        assert_eq!(client.backend().call_count(), 1);
    }
}
