//! Read-only access to the external idea inventory that seeds new stories.
//!
//! The engine never creates or mutates ideas — it only resolves an
//! `idea_ref` to the body text a Script-generation stage needs as input.
//! Story creation itself happens outside this crate's operation surface;
//! the port exists so generation processors can be handed idea content
//! without the domain knowing where ideas actually live.

use async_trait::async_trait;

use crate::error::EngineError;

/// The resolved body of an idea, handed to a processor as generation input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdeaBody {
    pub idea_ref: String,
    pub text: String,
}

/// A read-only key-value lookup over the idea inventory.
///
/// Implementations are free to back this with a file, a database, or a
/// remote service — the engine core only ever calls `get_idea`.
#[async_trait]
pub trait IdeaSource: Send + Sync {
    /// Resolves `idea_ref` to its body.
    ///
    /// Returns `Err(EngineError::NotFound)` if no idea exists under that
    /// reference.
    async fn get_idea(&self, idea_ref: &str) -> Result<IdeaBody, EngineError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idea_body_equality_is_by_value() {
        let a = IdeaBody { idea_ref: "idea-1".into(), text: "a lighthouse keeper".into() };
        let b = IdeaBody { idea_ref: "idea-1".into(), text: "a lighthouse keeper".into() };
        assert_eq!(a, b);
    }
}
