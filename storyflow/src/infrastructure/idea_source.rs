// /////////////////////////////////////////////////////////////////////////////
// Storyflow
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Filesystem-backed [`IdeaSource`].
//!
//! Ideas live outside the engine's own store (`spec.md` §6 "External
//! collaborator ports"): this implementation resolves an `idea_ref` to
//! the UTF-8 contents of `<ideas_dir>/<idea_ref>.txt`, treating the
//! directory as a read-only inventory the engine never writes to.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use storyflow_domain::error::EngineError;
use storyflow_domain::ports::{IdeaBody, IdeaSource};

pub struct FileIdeaSource {
    ideas_dir: PathBuf,
}

impl FileIdeaSource {
    pub fn new(ideas_dir: impl Into<PathBuf>) -> Self {
        Self { ideas_dir: ideas_dir.into() }
    }

    fn path_for(&self, idea_ref: &str) -> PathBuf {
        self.ideas_dir.join(format!("{idea_ref}.txt"))
    }
}

#[async_trait]
impl IdeaSource for FileIdeaSource {
    async fn get_idea(&self, idea_ref: &str) -> Result<IdeaBody, EngineError> {
        let path = self.path_for(idea_ref);
        let text = tokio::fs::read_to_string(&path)
            .await
            .map_err(|_| EngineError::NotFound(format!("idea '{idea_ref}' not found under {}", self.ideas_dir.display())))?;
        Ok(IdeaBody { idea_ref: idea_ref.to_string(), text: text.trim().to_string() })
    }
}

/// Resolve an idea directory path without requiring it to exist yet —
/// callers (e.g. `main.rs`) create it on first use if missing.
pub fn default_ideas_dir(base: &Path) -> PathBuf {
    base.join("ideas")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn resolves_an_existing_idea_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut file = std::fs::File::create(dir.path().join("idea-1.txt")).expect("create idea file");
        writeln!(file, "a lighthouse keeper who talks to gulls").expect("write idea file");

        let source = FileIdeaSource::new(dir.path());
        let idea = source.get_idea("idea-1").await.expect("idea should resolve");
        assert_eq!(idea.idea_ref, "idea-1");
        assert_eq!(idea.text, "a lighthouse keeper who talks to gulls");
    }

    #[tokio::test]
    async fn missing_idea_file_is_not_found() {
        let dir = tempfile::tempdir().expect("tempdir");
        let source = FileIdeaSource::new(dir.path());
        let err = source.get_idea("nonexistent").await.unwrap_err();
        assert!(matches!(err, EngineError::NotFound(_)));
    }
}
