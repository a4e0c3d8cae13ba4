//! Wildpath Game Engine
//!
//! Platform-agnostic core logic for the Wildpath ecology journey game.
//! This crate provides all game mechanics without UI or
//! platform-specific dependencies. Hosts drive a [`GameSession`]
//! through intent actions and pump its scheduler with their own clock.

pub mod constants;
pub mod content;
pub mod data;
pub mod error;
pub mod metrics;
pub mod path;
mod rewards;
pub mod schedule;
pub mod session;
pub mod state;

// Re-export commonly used types
pub use content::{BuiltinContent, ContentSource, JsonContent};
pub use data::{
    BIODIVERSITY_LEVELS, Character, CharacterId, Choice, ContentData, Impact, NodeKind, PathNode,
    POPULATION_LEVELS, QuizData, Scenario,
};
pub use error::{ActionError, ContentError};
pub use metrics::{LandingBonus, Metrics, choice_points, quiz_reward_bonus};
pub use path::{BranchOutcome, next_node_id};
pub use schedule::{Scheduler, SignalKind, TimedEffect};
pub use session::GameSession;
pub use state::{
    BadgeSignal, ConsequencePayload, DialogueSignal, GamePhase, MilestoneSignal, NpcMood,
    NpcReaction, RoundStage, ScoreDelta, SessionState,
};

/// Main entry point binding a content source to session construction.
pub struct GameEngine<C>
where
    C: ContentSource,
{
    content_source: C,
}

impl<C> GameEngine<C>
where
    C: ContentSource,
{
    /// Create a new engine over the provided content source.
    pub const fn new(content_source: C) -> Self {
        Self { content_source }
    }

    /// Load content and build a fresh session over it.
    ///
    /// # Errors
    ///
    /// Returns an error if the content cannot be loaded or fails
    /// validation.
    pub fn create_session(&self) -> Result<GameSession, anyhow::Error> {
        let content = self.content_source.load_content()?;
        Ok(GameSession::new(content)?)
    }
}
