// /////////////////////////////////////////////////////////////////////////////
// Storyflow
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Black-box `StageDispatcher` scenarios from `spec.md` §8 that need a
//! real `sqlx::SqlitePool` rather than a synthetic candidate list: a
//! review pass followed by a repeated dispatch (idempotency guard), and
//! two workers contending for the same Story in the same stage.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use storyflow::application::{DispatchOutcome, ProcessorRegistry, StageDispatcher, WorkSelector};
use storyflow::domain::entities::{ArtifactKind, Content, Story};
use storyflow::domain::error::EngineError;
use storyflow::domain::ports::{IdeaBody, IdeaSource, InputSpec, Processor, ProcessorInputs, ProcessorOutcome, ReviewTarget};
use storyflow::domain::repositories::{ContentRepo, StoryRepo, UnitOfWork, UnitOfWorkFactory};
use storyflow::domain::services::{StageManifestRegistry, StateCatalog};
use storyflow::domain::value_objects::{ArtifactVersion, Score, StageName};
use storyflow::infrastructure::persistence::{initialize_database, SqliteSelectionQueryRepo, SqliteUnitOfWorkFactory};

struct StubIdeaSource;

#[async_trait]
impl IdeaSource for StubIdeaSource {
    async fn get_idea(&self, idea_ref: &str) -> Result<IdeaBody, EngineError> {
        Ok(IdeaBody { idea_ref: idea_ref.to_string(), text: "A lonely lighthouse keeper".to_string() })
    }
}

struct FixedReview {
    score: i64,
}

#[async_trait]
impl Processor for FixedReview {
    fn required_inputs(&self) -> InputSpec {
        InputSpec::new(false, false, false, true)
    }

    async fn process(&self, _stage: &StageName, inputs: ProcessorInputs) -> Result<ProcessorOutcome, EngineError> {
        let content = inputs.content.expect("grammar review needs latest content");
        Ok(ProcessorOutcome::ProducedReview {
            score: Score::new(self.score).unwrap(),
            text: "clean".to_string(),
            target: ReviewTarget { kind: ArtifactKind::Content, id: content.id.value() },
            critical_finding: false,
        })
    }
}

async fn dispatcher_for(processors: ProcessorRegistry) -> (StageDispatcher, Arc<dyn UnitOfWorkFactory>) {
    let pool = initialize_database("sqlite::memory:").await.expect("schema should initialize");
    let catalog = Arc::new(StateCatalog::new());
    let uow_factory: Arc<dyn UnitOfWorkFactory> = Arc::new(SqliteUnitOfWorkFactory::new(pool.clone(), catalog.clone()));
    let selection_repo = Arc::new(SqliteSelectionQueryRepo::new(pool));
    let dispatcher = StageDispatcher::new(
        uow_factory.clone(),
        WorkSelector::new(selection_repo),
        catalog,
        Arc::new(StageManifestRegistry::production()),
        Arc::new(processors),
        Arc::new(StubIdeaSource),
        75,
    );
    (dispatcher, uow_factory)
}

/// Scenario 2: a review above threshold advances to the Catalog's pass
/// target and sets the reviewed Content's `review_id`; a second dispatch
/// against the same stage finds nothing left to do.
#[tokio::test]
async fn review_pass_above_threshold_then_second_dispatch_is_no_work() {
    let processors = ProcessorRegistry::new().register("Review.Script.Grammar", Arc::new(FixedReview { score: 90 }));
    let (dispatcher, uow_factory) = dispatcher_for(processors).await;

    let mut uow = uow_factory.begin().await.unwrap();
    let story = uow.stories().insert(Story::new_unsaved("i1", "Review.Script.Grammar", Utc::now())).await.unwrap();
    uow.contents().insert(Content::new_unsaved(story.id, ArtifactVersion::INITIAL, "draft body", Utc::now())).await.unwrap();
    uow.commit().await.unwrap();

    let outcome = dispatcher.step("Review.Script.Grammar").await.unwrap();
    match outcome {
        DispatchOutcome::Advanced { story_id, to, .. } => {
            assert_eq!(story_id, story.id);
            assert_eq!(to, "Review.Script.Tone");
        }
        other => panic!("expected Advanced, got {other:?}"),
    }

    let second = dispatcher.step("Review.Script.Grammar").await.unwrap();
    assert_eq!(second, DispatchOutcome::NoWork, "the Story already moved on to Review.Script.Tone");
}

/// Scenario 7: two workers race for the same Story in the same stage.
/// Exactly one wins; the other observes `NoWork` because the Story's
/// persisted state no longer matches the stage it was selected under
/// once the winner's transaction commits first.
#[tokio::test]
async fn concurrent_workers_single_advance() {
    let processors = ProcessorRegistry::new().register(
        "Title.From.Idea",
        Arc::new({
            struct GeneratesTitle;
            #[async_trait]
            impl Processor for GeneratesTitle {
                fn required_inputs(&self) -> InputSpec {
                    InputSpec::NONE
                }

                async fn process(&self, _stage: &StageName, _inputs: ProcessorInputs) -> Result<ProcessorOutcome, EngineError> {
                    Ok(ProcessorOutcome::ProducedArtifact { kind: ArtifactKind::Title, text: "The Keeper".to_string() })
                }
            }
            GeneratesTitle
        }),
    );
    let (dispatcher, uow_factory) = dispatcher_for(processors).await;

    let mut uow = uow_factory.begin().await.unwrap();
    let story = uow.stories().insert(Story::new_unsaved("i1", "Title.From.Idea", Utc::now())).await.unwrap();
    uow.commit().await.unwrap();

    let (first, second) = tokio::join!(dispatcher.step("Title.From.Idea"), dispatcher.step("Title.From.Idea"));

    let outcomes = [first.unwrap(), second.unwrap()];
    let advanced = outcomes.iter().filter(|o| matches!(o, DispatchOutcome::Advanced { .. })).count();
    let no_work = outcomes.iter().filter(|o| matches!(o, DispatchOutcome::NoWork)).count();

    assert_eq!(advanced, 1, "exactly one worker should advance the Story");
    assert_eq!(no_work, 1, "the other worker finds no candidate left in the stage");
    assert!(outcomes.iter().any(|o| matches!(o, DispatchOutcome::Advanced { story_id, .. } if *story_id == story.id)));
}
