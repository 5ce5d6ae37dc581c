// /////////////////////////////////////////////////////////////////////////////
// Storyflow
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Deterministic placeholder [`Processor`] implementations.
//!
//! Processors are black-box external collaborators by contract (`spec.md`
//! §6: "Processors MUST NOT call repositories directly" and are never
//! interpreted by the core beyond the shape of their outcome). This
//! module is the seam where a real deployment would plug in an LLM
//! client, a human review queue, or a grammar-checking service; what is
//! registered here is a deterministic stand-in so `main.rs` has a
//! complete, runnable wiring without depending on an external service at
//! composition time.

use async_trait::async_trait;
use storyflow_domain::entities::ArtifactKind;
use storyflow_domain::error::EngineError;
use storyflow_domain::ports::{InputSpec, Processor, ProcessorInputs, ProcessorOutcome, ReviewTarget};
use storyflow_domain::value_objects::{Score, StageName};

/// Emits a fixed artifact body derived from the stage's upstream input,
/// for every `Generation`-role stage.
pub struct EchoGenerator {
    kind: ArtifactKind,
}

impl EchoGenerator {
    pub fn new(kind: ArtifactKind) -> Self {
        Self { kind }
    }
}

#[async_trait]
impl Processor for EchoGenerator {
    fn required_inputs(&self) -> InputSpec {
        // Falls back across idea text, then title, then content — ask the
        // Dispatcher to assemble whichever of those exist.
        InputSpec::new(false, true, true, true)
    }

    async fn process(&self, stage: &StageName, inputs: ProcessorInputs) -> Result<ProcessorOutcome, EngineError> {
        let source = inputs
            .idea_text
            .or_else(|| inputs.title.map(|t| t.text))
            .or_else(|| inputs.content.map(|c| c.text))
            .ok_or_else(|| EngineError::MissingInput { stage: stage.as_str().to_string(), reason: "no idea, title, or content to draft from".to_string() })?;

        let text = match self.kind {
            ArtifactKind::Title => format!("Title draft for: {source}"),
            ArtifactKind::Content => format!("Script draft for: {source}"),
        };

        Ok(ProcessorOutcome::ProducedArtifact { kind: self.kind, text })
    }
}

/// Scores every review deterministically at a fixed passing value, with
/// no critical findings. A real reviewer (human or model) replaces this.
pub struct FixedScoreReviewer {
    score: i64,
}

impl FixedScoreReviewer {
    pub fn new(score: i64) -> Self {
        Self { score }
    }
}

#[async_trait]
impl Processor for FixedScoreReviewer {
    fn required_inputs(&self) -> InputSpec {
        InputSpec::new(false, false, true, true)
    }

    async fn process(&self, stage: &StageName, inputs: ProcessorInputs) -> Result<ProcessorOutcome, EngineError> {
        let (kind, id) = match (&inputs.title, &inputs.content) {
            (Some(title), _) if stage.as_str().contains("Title") => (ArtifactKind::Title, title.id.value()),
            (_, Some(content)) => (ArtifactKind::Content, content.id.value()),
            (Some(title), None) => (ArtifactKind::Title, title.id.value()),
            (None, None) => {
                return Err(EngineError::MissingInput { stage: stage.as_str().to_string(), reason: "no artifact to review".to_string() })
            }
        };

        let score = Score::new(self.score)?;
        Ok(ProcessorOutcome::ProducedReview {
            score,
            text: "automated placeholder review".to_string(),
            target: ReviewTarget { kind, id },
            critical_finding: false,
        })
    }
}

/// A decision stage that always routes forward to `Publishing` via
/// `Story.Polish`'s sibling accept path — a stand-in for a human editor's
/// accept/revise call.
pub struct AlwaysAcceptDecision {
    next_stage: StageName,
}

impl AlwaysAcceptDecision {
    pub fn new(next_stage: impl Into<StageName>) -> Self {
        Self { next_stage: next_stage.into() }
    }
}

#[async_trait]
impl Processor for AlwaysAcceptDecision {
    fn required_inputs(&self) -> InputSpec {
        InputSpec::NONE
    }

    async fn process(&self, _stage: &StageName, _inputs: ProcessorInputs) -> Result<ProcessorOutcome, EngineError> {
        Ok(ProcessorOutcome::Decision { next_stage: self.next_stage.clone() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn echo_generator_requires_some_input() {
        let generator = EchoGenerator::new(ArtifactKind::Title);
        let stage = StageName::new("Title.From.Idea");
        let err = generator.process(&stage, ProcessorInputs::default()).await.unwrap_err();
        assert!(matches!(err, EngineError::MissingInput { .. }));
    }

    #[tokio::test]
    async fn echo_generator_drafts_from_idea_text() {
        let generator = EchoGenerator::new(ArtifactKind::Title);
        let stage = StageName::new("Title.From.Idea");
        let inputs = ProcessorInputs { idea_text: Some("a lighthouse keeper".to_string()), ..Default::default() };
        let outcome = generator.process(&stage, inputs).await.expect("should produce a draft");
        assert!(matches!(outcome, ProcessorOutcome::ProducedArtifact { kind: ArtifactKind::Title, .. }));
    }

    #[tokio::test]
    async fn fixed_score_reviewer_rejects_without_an_artifact() {
        let reviewer = FixedScoreReviewer::new(80);
        let stage = StageName::new("Review.Script.Grammar");
        let err = reviewer.process(&stage, ProcessorInputs::default()).await.unwrap_err();
        assert!(matches!(err, EngineError::MissingInput { .. }));
    }

    #[tokio::test]
    async fn always_accept_decision_names_its_configured_target() {
        let decision = AlwaysAcceptDecision::new("Story.Polish");
        let stage = StageName::new("Story.ExpertReview");
        let outcome = decision.process(&stage, ProcessorInputs::default()).await.expect("decision should succeed");
        match outcome {
            ProcessorOutcome::Decision { next_stage } => assert_eq!(next_stage.as_str(), "Story.Polish"),
            _ => panic!("expected a Decision outcome"),
        }
    }
}
