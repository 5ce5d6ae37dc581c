// /////////////////////////////////////////////////////////////////////////////
// Storyflow
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Review repository port.

use crate::entities::Review;
use crate::error::EngineError;
use crate::value_objects::ReviewId;
use async_trait::async_trait;

#[async_trait]
pub trait ReviewRepo: Send {
    /// Score is validated `0..=100` at insert; out of range fails with
    /// `EngineError::InvalidScore`. In practice the `Score` value object
    /// already rejects invalid values before this is called, but the
    /// store re-validates at the `CHECK` constraint as the last line of
    /// defense.
    async fn insert(&mut self, review: Review) -> Result<Review, EngineError>;

    async fn find_by_id(&mut self, id: ReviewId) -> Result<Option<Review>, EngineError>;
}
