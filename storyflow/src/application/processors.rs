// /////////////////////////////////////////////////////////////////////////////
// Storyflow
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Static `stage_name → Processor` registry.
//!
//! Replaces the source's dynamic dispatch on a `task_type` string
//! (`spec.md` §9 "Dynamic dispatch on task_type"): every Processor this
//! engine will ever invoke is registered once at composition time, and an
//! unregistered stage name is a configuration error surfaced before any
//! Story is touched, not a runtime lookup failure mid-step.

use std::collections::HashMap;
use std::sync::Arc;

use storyflow_domain::error::EngineError;
use storyflow_domain::ports::Processor;

#[derive(Clone, Default)]
pub struct ProcessorRegistry {
    processors: HashMap<String, Arc<dyn Processor>>,
}

impl ProcessorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(mut self, stage: impl Into<String>, processor: Arc<dyn Processor>) -> Self {
        self.processors.insert(stage.into(), processor);
        self
    }

    /// The Processor bound to `stage`, or `EngineError::UnknownStage` if
    /// none was registered.
    pub fn get(&self, stage: &str) -> Result<Arc<dyn Processor>, EngineError> {
        self.processors.get(stage).cloned().ok_or_else(|| EngineError::UnknownStage(stage.to_string()))
    }

    pub fn registered_stages(&self) -> impl Iterator<Item = &str> {
        self.processors.keys().map(String::as_str)
    }
}
