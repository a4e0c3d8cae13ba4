use thiserror::Error;

use crate::data::CharacterId;

/// Content referential-integrity defects, reported once at load time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContentError {
    #[error("character `{0}` has no scenarios")]
    EmptyScenarios(CharacterId),
    #[error("character `{0}` scenario {1} needs 2-3 choices, found {2}")]
    BadChoiceCount(CharacterId, usize, usize),
    #[error("character `{0}` is missing its entry node (id 0)")]
    MissingEntryNode(CharacterId),
    #[error("character `{0}` has duplicate node id {1}")]
    DuplicateNodeId(CharacterId, u32),
    #[error("character `{0}` node {1} links to unknown node {2}")]
    UnresolvableLink(CharacterId, u32, u32),
    #[error("character `{0}` node {1} cannot reach a terminal node")]
    NoTerminalPath(CharacterId, u32),
    #[error("character `{0}` node {1} quiz answer index {2} out of range for {3} options")]
    QuizIndexOutOfRange(CharacterId, u32, usize, usize),
}

/// An intent action arrived in a phase where it is not valid. The
/// session rejects it without touching any state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("`{action}` is not valid in the current phase")]
    InvalidAction { action: &'static str },
    #[error("no character content for id `{0}`")]
    UnknownCharacter(CharacterId),
    #[error("choice index {0} out of range for the current scenario")]
    ChoiceOutOfRange(usize),
    #[error("no node with id {0} in the selected character's path")]
    UnknownNode(u32),
    #[error("no quiz node is currently open")]
    NoOpenQuiz,
    #[error("quiz option {0} out of range")]
    QuizOptionOutOfRange(usize),
}

impl ActionError {
    pub(crate) const fn invalid(action: &'static str) -> Self {
        Self::InvalidAction { action }
    }
}
