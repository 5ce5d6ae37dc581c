// /////////////////////////////////////////////////////////////////////////////
// Storyflow
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Stage Dispatcher (C5): the only component that mutates Story state.
//!
//! Runs the ten-step transactional cycle of `spec.md` §4.5 once per call:
//! pick a Story, assemble inputs, guard against re-running finished work,
//! invoke the stage's Processor, persist whatever it produced, compute
//! and validate the next stage, and commit.

use std::sync::Arc;

use chrono::Utc;
use storyflow_domain::entities::{ArtifactKind, Content, Review, Title};
use storyflow_domain::error::EngineError;
use storyflow_domain::ports::{IdeaSource, ProcessorFailure, ProcessorInputs, ProcessorOutcome};
use storyflow_domain::repositories::UnitOfWorkFactory;
use storyflow_domain::services::{StageKind, StageManifestRegistry, StageRole, StateCatalog, TransitionValidator};
use storyflow_domain::value_objects::{ContentId, Score, StoryId, TitleId};

use super::processors::ProcessorRegistry;
use super::selector::WorkSelector;

/// What a single `StageDispatcher::step` call produced.
#[derive(Debug, Clone, PartialEq)]
pub enum DispatchOutcome {
    /// The Story advanced from `from` to `to`. `artifact_or_review_id`
    /// carries the id of whatever row the step persisted — `None` for a
    /// `Decision` step, which mutates no artifact.
    Advanced {
        story_id: StoryId,
        from: String,
        to: String,
        artifact_or_review_id: Option<i64>,
    },
    /// No candidate Story was available in `stage`.
    NoWork,
    /// The stage's work for this Story was already done; a no-op,
    /// logged at most at verbose level per the error-handling design.
    AlreadyDone { story_id: StoryId },
}

pub struct StageDispatcher {
    uow_factory: Arc<dyn UnitOfWorkFactory>,
    selector: WorkSelector,
    catalog: Arc<StateCatalog>,
    manifests: Arc<StageManifestRegistry>,
    processors: Arc<ProcessorRegistry>,
    idea_source: Arc<dyn IdeaSource>,
    pass_threshold_default: i64,
}

impl StageDispatcher {
    pub fn new(
        uow_factory: Arc<dyn UnitOfWorkFactory>,
        selector: WorkSelector,
        catalog: Arc<StateCatalog>,
        manifests: Arc<StageManifestRegistry>,
        processors: Arc<ProcessorRegistry>,
        idea_source: Arc<dyn IdeaSource>,
        pass_threshold_default: i64,
    ) -> Self {
        Self {
            uow_factory,
            selector,
            catalog,
            manifests,
            processors,
            idea_source,
            pass_threshold_default,
        }
    }

    /// Run one Dispatcher cycle for `stage`. See module docs for the
    /// step-by-step breakdown.
    pub async fn step(&self, stage: &str) -> Result<DispatchOutcome, EngineError> {
        let manifest = self.manifests.get(stage).ok_or_else(|| EngineError::UnknownStage(stage.to_string()))?;
        if matches!(manifest.role, StageRole::Terminal) {
            return Ok(DispatchOutcome::NoWork);
        }
        let processor = self.processors.get(stage)?;

        // Steps 1-2: begin the unit of work and pick the next candidate.
        let Some(story_id) = self.selector.pick(stage).await? else {
            return Ok(DispatchOutcome::NoWork);
        };

        let mut uow = self.uow_factory.begin().await?;

        let Some(story) = uow.stories().find_by_id(story_id).await? else {
            return Ok(DispatchOutcome::NoWork);
        };
        if story.state.as_str() != stage {
            // Lost the race: another worker already advanced this Story
            // between the read-only selection query and our write-intent
            // transaction. Not an error — just nothing to do here.
            return Ok(DispatchOutcome::NoWork);
        }

        // Step 3: assemble inputs according to the Processor's declared
        // input needs (spec.md §6 `InputSpec`: idea_ref, idea_body,
        // latest_title, latest_content). `latest_title`/`latest_content`
        // are fetched unconditionally regardless of the declared needs —
        // the Dispatcher's own idempotency guard and version bookkeeping
        // below need them independent of what the Processor asked for —
        // but they are only ever handed to the Processor, and only ever
        // required to exist, when its `InputSpec` says so.
        let input_spec = processor.required_inputs();

        let latest_title = uow.titles().find_latest_version(story_id).await?;
        let latest_content = uow.contents().find_latest_version(story_id).await?;

        let idea_ref = if input_spec.idea_ref { Some(story.idea_ref.clone()) } else { None };

        let idea_text = if input_spec.idea_body {
            let idea = self.idea_source.get_idea(&story.idea_ref).await.map_err(|e| EngineError::MissingInput {
                stage: stage.to_string(),
                reason: format!("idea lookup failed: {e}"),
            })?;
            Some(idea.text)
        } else {
            None
        };

        if input_spec.latest_title && latest_title.is_none() {
            return Err(EngineError::MissingInput {
                stage: stage.to_string(),
                reason: "stage declares latest_title as required but the story has none".to_string(),
            });
        }
        if input_spec.latest_content && latest_content.is_none() {
            return Err(EngineError::MissingInput {
                stage: stage.to_string(),
                reason: "stage declares latest_content as required but the story has none".to_string(),
            });
        }

        // Step 4: idempotency guard. Only Review-role stages have a
        // target artifact whose `review_id` tells us the work already
        // landed; Generation/Decision re-entrancy is instead covered by
        // VersionConflict/IllegalTransition on a duplicate attempt.
        if let StageRole::Review { .. } = &manifest.role {
            let already_done = match manifest.kind {
                StageKind::Script => latest_content.as_ref().map(Content::has_review).unwrap_or(false),
                StageKind::Title => latest_title.as_ref().map(Title::has_review).unwrap_or(false),
                StageKind::Story => false,
            };
            if already_done {
                return Ok(DispatchOutcome::AlreadyDone { story_id });
            }
        }

        let inputs = ProcessorInputs {
            idea_ref,
            idea_text,
            title: if input_spec.latest_title { latest_title.clone() } else { None },
            content: if input_spec.latest_content { latest_content.clone() } else { None },
        };

        // Step 5: invoke the Processor.
        let outcome = processor.process(&story.state, inputs).await?;

        if let ProcessorOutcome::Failed(ProcessorFailure { recoverable, message }) = outcome {
            return Err(EngineError::ProcessorFailed { stage: stage.to_string(), recoverable, message });
        }

        // Step 6: persist the outcome by variant.
        let now = Utc::now();
        let mut artifact_or_review_id: Option<i64> = None;
        let mut review_score: Option<Score> = None;
        let mut review_critical: bool = false;
        let mut decision_next_stage: Option<String> = None;

        match outcome {
            ProcessorOutcome::ProducedArtifact { kind, text } => match kind {
                ArtifactKind::Title => {
                    let version = latest_title.as_ref().map(|t| t.version.next()).unwrap_or_default();
                    let inserted = uow.titles().insert(Title::new_unsaved(story_id, version, text, now)).await?;
                    artifact_or_review_id = Some(inserted.id.value());
                }
                ArtifactKind::Content => {
                    let version = latest_content.as_ref().map(|c| c.version.next()).unwrap_or_default();
                    let inserted = uow.contents().insert(Content::new_unsaved(story_id, version, text, now)).await?;
                    artifact_or_review_id = Some(inserted.id.value());
                }
            },
            ProcessorOutcome::ProducedReview { score, text, target, critical_finding } => {
                let review = uow.reviews().insert(Review::new_unsaved(text, score, now)).await?;
                match target.kind {
                    ArtifactKind::Title => uow.titles().set_review_id(TitleId::new(target.id), review.id).await?,
                    ArtifactKind::Content => uow.contents().set_review_id(ContentId::new(target.id), review.id).await?,
                }
                artifact_or_review_id = Some(review.id.value());
                review_score = Some(score);
                review_critical = critical_finding;
            }
            ProcessorOutcome::Decision { next_stage } => {
                decision_next_stage = Some(next_stage.as_str().to_string());
            }
            ProcessorOutcome::Failed(_) => unreachable!("handled above"),
        }

        // Step 7: compute the next stage from the manifest role.
        let next_stage = match &manifest.role {
            StageRole::Generation { next } => next.as_str().to_string(),
            StageRole::Review { pass, fail, pass_threshold, grammar_like } => {
                let score = review_score.ok_or_else(|| {
                    EngineError::Internal(format!("review stage '{stage}' processor did not return a review outcome"))
                })?;
                let threshold = pass_threshold.unwrap_or(self.pass_threshold_default);
                let passes = score.value() >= threshold && !(*grammar_like && review_critical);
                if passes { pass.as_str().to_string() } else { fail.as_str().to_string() }
            }
            StageRole::Decision => decision_next_stage
                .ok_or_else(|| EngineError::Internal(format!("decision stage '{stage}' processor did not return a decision outcome")))?,
            StageRole::Terminal => unreachable!("checked at top of step"),
        };

        // Step 8: validate the transition.
        let validator = TransitionValidator::new(&self.catalog);
        let validation = validator.validate(stage, &next_stage);
        if !validation.ok {
            return Err(EngineError::IllegalTransition {
                from: stage.to_string(),
                to: next_stage,
                reason: validation.reason.unwrap_or_default(),
            });
        }

        // Step 9: update Story.state.
        let mut updated_story = story.clone();
        updated_story.state = next_stage.clone().into();
        updated_story.updated_at = now;
        uow.stories().update(&updated_story).await?;

        // Step 10: commit.
        uow.commit().await?;

        Ok(DispatchOutcome::Advanced {
            story_id,
            from: stage.to_string(),
            to: next_stage,
            artifact_or_review_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use storyflow_domain::entities::Story;
    use storyflow_domain::ports::{IdeaBody, InputSpec, ReviewTarget};
    use storyflow_domain::repositories::StoryRepo;
    use storyflow_domain::value_objects::StageName;

    use crate::infrastructure::persistence::schema::initialize_database;
    use crate::infrastructure::persistence::{SqliteSelectionQueryRepo, SqliteUnitOfWorkFactory};

    struct StubIdeaSource;

    #[async_trait]
    impl IdeaSource for StubIdeaSource {
        async fn get_idea(&self, idea_ref: &str) -> Result<IdeaBody, EngineError> {
            Ok(IdeaBody { idea_ref: idea_ref.to_string(), text: "A lonely lighthouse keeper".to_string() })
        }
    }

    struct GeneratesTitleProcessor;

    #[async_trait]
    impl storyflow_domain::ports::Processor for GeneratesTitleProcessor {
        fn required_inputs(&self) -> InputSpec {
            InputSpec::NONE
        }

        async fn process(&self, _stage: &StageName, _inputs: ProcessorInputs) -> Result<ProcessorOutcome, EngineError> {
            Ok(ProcessorOutcome::ProducedArtifact { kind: ArtifactKind::Title, text: "The Keeper".to_string() })
        }
    }

    struct ReviewProcessor {
        score: i64,
        critical: bool,
    }

    #[async_trait]
    impl storyflow_domain::ports::Processor for ReviewProcessor {
        fn required_inputs(&self) -> InputSpec {
            InputSpec::new(false, false, false, true)
        }

        async fn process(&self, _stage: &StageName, inputs: ProcessorInputs) -> Result<ProcessorOutcome, EngineError> {
            let content = inputs.content.expect("grammar review needs latest content");
            Ok(ProcessorOutcome::ProducedReview {
                score: Score::new(self.score).unwrap(),
                text: "reviewed".to_string(),
                target: ReviewTarget { kind: ArtifactKind::Content, id: content.id.value() },
                critical_finding: self.critical,
            })
        }
    }

    async fn harness() -> (Arc<dyn UnitOfWorkFactory>, Arc<SqliteSelectionQueryRepo>, Arc<StateCatalog>, Arc<StageManifestRegistry>) {
        let pool = initialize_database("sqlite::memory:").await.unwrap();
        let catalog = Arc::new(StateCatalog::new());
        let uow_factory: Arc<dyn UnitOfWorkFactory> = Arc::new(SqliteUnitOfWorkFactory::new(pool.clone(), catalog.clone()));
        let selection_repo = Arc::new(SqliteSelectionQueryRepo::new(pool));
        (uow_factory, selection_repo, catalog, Arc::new(StageManifestRegistry::production()))
    }

    #[tokio::test]
    async fn fresh_story_advances_on_generation_outcome() {
        let (uow_factory, selection_repo, catalog, manifests) = harness().await;
        let mut uow = uow_factory.begin().await.unwrap();
        let story = uow.stories().insert(Story::new_unsaved("i1", "Title.From.Idea", Utc::now())).await.unwrap();
        uow.commit().await.unwrap();

        let processors = Arc::new(ProcessorRegistry::new().register("Title.From.Idea", Arc::new(GeneratesTitleProcessor)));
        let dispatcher = StageDispatcher::new(
            uow_factory.clone(),
            WorkSelector::new(selection_repo.clone()),
            catalog,
            manifests,
            processors,
            Arc::new(StubIdeaSource),
            75,
        );

        let outcome = dispatcher.step("Title.From.Idea").await.unwrap();
        match outcome {
            DispatchOutcome::Advanced { story_id, to, .. } => {
                assert_eq!(story_id, story.id);
                assert_eq!(to, "Script.From.Idea.Title");
            }
            other => panic!("expected Advanced, got {other:?}"),
        }

        let second = dispatcher.step("Title.From.Idea").await.unwrap();
        assert_eq!(second, DispatchOutcome::NoWork);
    }

    #[tokio::test]
    async fn review_below_threshold_routes_to_fail_target() {
        let (uow_factory, selection_repo, catalog, manifests) = harness().await;
        let mut uow = uow_factory.begin().await.unwrap();
        let story = uow.stories().insert(Story::new_unsaved("i1", "Review.Script.Grammar", Utc::now())).await.unwrap();
        uow.contents().insert(Content::new_unsaved(story.id, Default::default(), "draft body", Utc::now())).await.unwrap();
        uow.commit().await.unwrap();

        let processors = Arc::new(
            ProcessorRegistry::new().register("Review.Script.Grammar", Arc::new(ReviewProcessor { score: 40, critical: false })),
        );
        let dispatcher = StageDispatcher::new(
            uow_factory,
            WorkSelector::new(selection_repo),
            catalog,
            manifests,
            processors,
            Arc::new(StubIdeaSource),
            75,
        );

        let outcome = dispatcher.step("Review.Script.Grammar").await.unwrap();
        match outcome {
            DispatchOutcome::Advanced { to, .. } => assert_eq!(to, "Script.Refine.Grammar"),
            other => panic!("expected Advanced, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn critical_finding_forces_fail_despite_high_score() {
        let (uow_factory, selection_repo, catalog, manifests) = harness().await;
        let mut uow = uow_factory.begin().await.unwrap();
        let story = uow.stories().insert(Story::new_unsaved("i1", "Review.Script.Grammar", Utc::now())).await.unwrap();
        uow.contents().insert(Content::new_unsaved(story.id, Default::default(), "draft body", Utc::now())).await.unwrap();
        uow.commit().await.unwrap();

        let processors = Arc::new(
            ProcessorRegistry::new().register("Review.Script.Grammar", Arc::new(ReviewProcessor { score: 95, critical: true })),
        );
        let dispatcher = StageDispatcher::new(
            uow_factory,
            WorkSelector::new(selection_repo),
            catalog,
            manifests,
            processors,
            Arc::new(StubIdeaSource),
            75,
        );

        let outcome = dispatcher.step("Review.Script.Grammar").await.unwrap();
        match outcome {
            DispatchOutcome::Advanced { to, .. } => assert_eq!(to, "Script.Refine.Grammar"),
            other => panic!("expected Advanced, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn illegal_transition_from_processor_aborts_without_mutation() {
        let (uow_factory, selection_repo, catalog, manifests) = harness().await;
        let mut uow = uow_factory.begin().await.unwrap();
        let story = uow.stories().insert(Story::new_unsaved("i1", "Story.ExpertReview", Utc::now())).await.unwrap();
        uow.commit().await.unwrap();

        struct BadDecisionProcessor;
        #[async_trait]
        impl storyflow_domain::ports::Processor for BadDecisionProcessor {
            fn required_inputs(&self) -> InputSpec {
                InputSpec::NONE
            }

            async fn process(&self, _stage: &StageName, _inputs: ProcessorInputs) -> Result<ProcessorOutcome, EngineError> {
                Ok(ProcessorOutcome::Decision { next_stage: StageName::new("Title.From.Idea") })
            }
        }

        let processors = Arc::new(ProcessorRegistry::new().register("Story.ExpertReview", Arc::new(BadDecisionProcessor)));
        let dispatcher = StageDispatcher::new(
            uow_factory.clone(),
            WorkSelector::new(selection_repo),
            catalog,
            manifests,
            processors,
            Arc::new(StubIdeaSource),
            75,
        );

        let err = dispatcher.step("Story.ExpertReview").await.unwrap_err();
        assert!(matches!(err, EngineError::IllegalTransition { .. }));

        let mut uow = uow_factory.begin().await.unwrap();
        let reloaded = uow.stories().find_by_id(story.id).await.unwrap().unwrap();
        assert_eq!(reloaded.state.as_str(), "Story.ExpertReview");
    }

    #[tokio::test]
    async fn unknown_stage_is_a_configuration_error() {
        let (uow_factory, selection_repo, catalog, manifests) = harness().await;
        let dispatcher = StageDispatcher::new(
            uow_factory,
            WorkSelector::new(selection_repo),
            catalog,
            manifests,
            Arc::new(ProcessorRegistry::new()),
            Arc::new(StubIdeaSource),
            75,
        );
        let err = dispatcher.step("Not.A.Real.Stage").await.unwrap_err();
        assert!(matches!(err, EngineError::UnknownStage(_)));
    }
}
