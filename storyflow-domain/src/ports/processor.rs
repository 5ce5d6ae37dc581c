//! The Processor contract: the external, black-box collaborator the Stage
//! Dispatcher (C5) invokes to actually do stage work.
//!
//! The engine never interprets generated text or review prose — it only
//! persists whatever a Processor hands back and uses the *shape* of the
//! outcome (artifact vs. review vs. decision vs. failure) to decide what
//! happens next. Processors are looked up by `StageName` in a registry
//! assembled at composition time; this module defines only the contract,
//! not the registry or any concrete processor.

use async_trait::async_trait;

use crate::entities::{ArtifactKind, Content, Title};
use crate::error::EngineError;
use crate::value_objects::{Score, StageName};

/// Which of {idea_ref, idea_body, latest_title, latest_content} a stage
/// declares as its inputs (spec.md §6 "Processor interface").
///
/// The Dispatcher assembles exactly the fields a Processor declares here
/// before calling `process`, and raises `MissingInput` if a declared
/// artifact does not exist — this is the capability that lets a Processor
/// be handed a read-only snapshot instead of reaching back into the
/// repositories itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputSpec {
    pub idea_ref: bool,
    pub idea_body: bool,
    pub latest_title: bool,
    pub latest_content: bool,
}

impl InputSpec {
    /// No declared inputs — used by Decision stages that only compute a
    /// state change from stage-external context.
    pub const NONE: InputSpec = InputSpec { idea_ref: false, idea_body: false, latest_title: false, latest_content: false };

    pub const fn new(idea_ref: bool, idea_body: bool, latest_title: bool, latest_content: bool) -> Self {
        Self { idea_ref, idea_body, latest_title, latest_content }
    }
}

/// Everything a Processor is handed for a single invocation: only the
/// fields its own [`InputSpec`] declared are ever populated — the rest
/// stay `None` even when the underlying row exists.
#[derive(Debug, Clone, Default)]
pub struct ProcessorInputs {
    pub idea_ref: Option<String>,
    pub idea_text: Option<String>,
    pub title: Option<Title>,
    pub content: Option<Content>,
}

/// Which artifact a produced Review attaches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReviewTarget {
    pub kind: ArtifactKind,
    pub id: i64,
}

/// Why a Processor invocation failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessorFailure {
    pub recoverable: bool,
    pub message: String,
}

/// What a Processor invocation produced.
///
/// Exactly one variant is returned per call — a Processor never produces
/// more than one artifact, review, or decision in a single invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessorOutcome {
    /// A new Title or Content version, ready to be persisted verbatim.
    ProducedArtifact { kind: ArtifactKind, text: String },
    /// A score + prose review of an existing artifact. `critical_finding`
    /// lets a grammar-like review stage veto an otherwise-passing score:
    /// a finding of severity CRITICAL blocks advancement regardless of
    /// the numeric score.
    ProducedReview {
        score: Score,
        text: String,
        target: ReviewTarget,
        critical_finding: bool,
    },
    /// The Processor itself names the next stage (Decision-role stages
    /// only).
    Decision { next_stage: StageName },
    /// The invocation failed; `recoverable` distinguishes a transient
    /// failure worth retrying from one that should surface as fatal.
    Failed(ProcessorFailure),
}

/// A black-box unit of stage work, invoked once per Dispatcher cycle.
///
/// Implementations may call out to an LLM, a human review queue, or a
/// deterministic test double — the Dispatcher only sees the outcome.
#[async_trait]
pub trait Processor: Send + Sync {
    /// Declares which inputs this stage needs assembled before `process`
    /// is called. The Dispatcher treats this as a contract: a declared
    /// input that cannot be resolved aborts the step with `MissingInput`
    /// rather than being silently handed to the Processor as `None`.
    fn required_inputs(&self) -> InputSpec;

    /// Runs this stage's work for one story, given the inputs the
    /// Dispatcher assembled for it.
    async fn process(&self, stage: &StageName, inputs: ProcessorInputs) -> Result<ProcessorOutcome, EngineError>;
}
