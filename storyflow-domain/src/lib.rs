// /////////////////////////////////////////////////////////////////////////////
// Storyflow
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Storyflow Domain
//!
//! The domain layer of the storyflow workflow engine: entities, value
//! objects, domain services, and the repository/port *traits* the engine is
//! built against. Completely independent of persistence technology, the
//! async runtime, and logging — no `sqlx`, no `tokio`, no `tracing`.
//!
//! ## Module Structure
//!
//! ### Entities
//! Objects with identity that persists across state changes: `Story`,
//! `Title`, `Content`, `Review`. Plain data records rather than a class
//! hierarchy — the "Readable vs Writable model" distinctions a deep
//! hierarchy would encode become repository method boundaries instead.
//!
//! ### Value Objects
//! Immutable, self-validating types with no identity of their own:
//! `StoryId`/`TitleId`/`ContentId`/`ReviewId`, `Score`, `StageName`,
//! `ArtifactVersion`.
//!
//! ### Domain Services
//! Stateless logic that doesn't belong to a single entity: the
//! [`services::StateCatalog`] (C1), [`services::TransitionValidator`] (C2),
//! and the pure work-selection helpers (C4) in [`services::work_selection`].
//! [`services::StageManifestRegistry`] carries per-stage operational data
//! that is neither Catalog adjacency nor user-facing configuration.
//!
//! ### Repositories
//! Typed persistence ports (C3 contract surface) — `StoryRepo`,
//! `TitleRepo`, `ContentRepo`, `ReviewRepo`, `SelectionQueryRepo`, and the
//! `UnitOfWork`/`UnitOfWorkFactory` transactional scope. Concrete SQLite
//! implementations live one layer up, in `storyflow::infrastructure::persistence`.
//!
//! ### Ports
//! The external-collaborator contracts the core depends on but never
//! implements: `Processor` (stage generation/review logic) and
//! `IdeaSource` (read-only idea lookup).
//!
//! ## Error Handling
//!
//! A single [`error::EngineError`] enumerates every store, transition, and
//! dispatcher failure as a distinct, named variant rather than a
//! string-typed bag, matching the error taxonomy of the error-handling
//! design.

pub mod entities;
pub mod error;
pub mod ports;
pub mod repositories;
pub mod services;
pub mod value_objects;

pub use entities::{Artifact, ArtifactKind, Content, Review, Story, Title};
pub use error::EngineError;
pub use ports::{IdeaBody, IdeaSource, InputSpec, Processor, ProcessorFailure, ProcessorInputs, ProcessorOutcome, ReviewTarget};
pub use repositories::{ContentRepo, ReviewRepo, SelectionQueryRepo, StoryRepo, TitleRepo, UnitOfWork, UnitOfWorkFactory};
pub use services::{StageKind, StageManifest, StageManifestRegistry, StateCatalog, TransitionOutcome, TransitionValidator};
pub use value_objects::{ArtifactVersion, ContentId, ReviewId, Score, StageName, StoryId, TitleId};
