//! Mutable per-playthrough state.
//!
//! Everything here is created on character selection and discarded on
//! restart. Static content never lives in this module; the session
//! borrows it from [`crate::data::ContentData`].

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::data::{Character, CharacterId, Choice};
use crate::metrics::Metrics;
use crate::schedule::{Scheduler, SignalKind};

/// Outer game phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    #[default]
    Lobby,
    CharacterSelect,
    Playing,
    Ending,
}

/// Round sub-cycle within [`GamePhase::Playing`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RoundStage {
    #[default]
    Narrating,
    AwaitingChoice,
    ResolvingConsequence,
}

/// Consequence display payload for the most recent choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsequencePayload {
    pub text: String,
    pub ripple: String,
    pub reflection: String,
    pub explanation: String,
    pub visual: Option<String>,
}

impl ConsequencePayload {
    #[must_use]
    pub fn from_choice(choice: &Choice) -> Self {
        Self {
            text: choice.consequence.clone(),
            ripple: choice.ripple_effect.clone(),
            reflection: choice.reflection_question.clone(),
            explanation: choice.explanation.clone(),
            visual: choice.visual.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreDelta {
    pub points: i32,
    pub token: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BadgeSignal {
    pub badge: String,
    pub token: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MilestoneSignal {
    pub node_id: u32,
    pub label: Option<String>,
    pub token: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NpcMood {
    Happy,
    Sad,
    Neutral,
}

impl NpcMood {
    #[must_use]
    pub const fn from_health_impact(health: i32) -> Self {
        if health > 0 {
            Self::Happy
        } else if health < 0 {
            Self::Sad
        } else {
            Self::Neutral
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NpcReaction {
    pub mood: NpcMood,
    pub token: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueSignal {
    pub node_id: u32,
    pub text: String,
    pub token: u64,
}

/// Earned badges, insertion-ordered. A session earns a handful at most.
pub type BadgeSet = SmallVec<[String; 4]>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SessionState {
    pub phase: GamePhase,
    pub stage: RoundStage,
    #[serde(default)]
    pub character_id: Option<CharacterId>,
    pub metrics: Metrics,
    #[serde(default)]
    pub round_index: usize,
    #[serde(default)]
    pub node_id: u32,
    /// True between choice resolution and the avatar landing.
    #[serde(default)]
    pub is_moving: bool,
    #[serde(default)]
    pub badges: BadgeSet,
    /// Quiz node ids whose reward was already granted.
    #[serde(default)]
    pub answered_quizzes: SmallVec<[u32; 4]>,
    #[serde(default)]
    pub consequence: Option<ConsequencePayload>,
    #[serde(default)]
    pub active_badge: Option<BadgeSignal>,
    #[serde(default)]
    pub score_delta: Option<ScoreDelta>,
    #[serde(default)]
    pub milestone: Option<MilestoneSignal>,
    /// Node whose quiz/fun-fact detail overlay is open.
    #[serde(default)]
    pub node_detail: Option<u32>,
    #[serde(default)]
    pub npc_reaction: Option<NpcReaction>,
    #[serde(default)]
    pub dialogue: Option<DialogueSignal>,
    /// UI-facing log keys in emission order.
    #[serde(default)]
    pub logs: Vec<String>,
    #[serde(default)]
    pub scheduler: Scheduler,
}

impl SessionState {
    /// Initialize playing state from a character's starting content.
    /// The scheduler survives (with a fresh generation) so stale tasks
    /// from a previous life stay dead.
    pub fn begin_journey(&mut self, character: &Character) {
        self.scheduler.bump_generation();
        self.phase = GamePhase::Playing;
        self.stage = RoundStage::Narrating;
        self.character_id = Some(character.id);
        self.metrics = Metrics::starting(
            character.initial_health,
            character.initial_pop,
            character.initial_bio,
        );
        self.round_index = 0;
        self.node_id = 0;
        self.is_moving = false;
        self.badges.clear();
        self.answered_quizzes.clear();
        self.clear_transients();
        self.logs.clear();
    }

    /// Discard the playthrough and return to the lobby.
    pub fn reset(&mut self) {
        self.scheduler.bump_generation();
        let scheduler = std::mem::take(&mut self.scheduler);
        *self = Self {
            scheduler,
            ..Self::default()
        };
    }

    /// Add a badge if not already earned. Returns whether it was new.
    pub fn grant_badge(&mut self, badge: &str) -> bool {
        if self.badges.iter().any(|earned| earned == badge) {
            return false;
        }
        self.badges.push(badge.to_string());
        true
    }

    #[must_use]
    pub fn has_badge(&self, badge: &str) -> bool {
        self.badges.iter().any(|earned| earned == badge)
    }

    #[must_use]
    pub fn quiz_answered(&self, node_id: u32) -> bool {
        self.answered_quizzes.contains(&node_id)
    }

    pub fn push_log(&mut self, key: &str) {
        self.logs.push(key.to_string());
    }

    /// Expire a signal instance. Clearing an already-cleared or
    /// already-replaced signal is a no-op.
    pub fn clear_signal(&mut self, kind: SignalKind, token: u64) {
        match kind {
            SignalKind::ScoreDelta => {
                if self.score_delta.is_some_and(|s| s.token == token) {
                    self.score_delta = None;
                }
            }
            SignalKind::Badge => {
                if self.active_badge.as_ref().is_some_and(|s| s.token == token) {
                    self.active_badge = None;
                }
            }
            SignalKind::Milestone => {
                if self.milestone.as_ref().is_some_and(|s| s.token == token) {
                    self.milestone = None;
                }
            }
            SignalKind::NpcReaction => {
                if self.npc_reaction.is_some_and(|s| s.token == token) {
                    self.npc_reaction = None;
                }
            }
            SignalKind::Dialogue => {
                if self.dialogue.as_ref().is_some_and(|s| s.token == token) {
                    self.dialogue = None;
                }
            }
        }
    }

    fn clear_transients(&mut self) {
        self.consequence = None;
        self.active_badge = None;
        self.score_delta = None;
        self.milestone = None;
        self.node_detail = None;
        self.npc_reaction = None;
        self.dialogue = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn badge_grants_are_idempotent() {
        let mut state = SessionState::default();
        assert!(state.grant_badge("Eco-Warrior"));
        assert!(!state.grant_badge("Eco-Warrior"));
        assert_eq!(state.badges.len(), 1);
        assert!(state.has_badge("Eco-Warrior"));
    }

    #[test]
    fn clear_signal_ignores_stale_tokens() {
        let mut state = SessionState::default();
        state.score_delta = Some(ScoreDelta {
            points: 100,
            token: 2,
        });
        state.clear_signal(SignalKind::ScoreDelta, 1);
        assert!(state.score_delta.is_some());
        state.clear_signal(SignalKind::ScoreDelta, 2);
        assert!(state.score_delta.is_none());
        // Clearing again is a no-op, never an error.
        state.clear_signal(SignalKind::ScoreDelta, 2);
        assert!(state.score_delta.is_none());
    }

    #[test]
    fn npc_mood_follows_health_sign() {
        assert_eq!(NpcMood::from_health_impact(5), NpcMood::Happy);
        assert_eq!(NpcMood::from_health_impact(-5), NpcMood::Sad);
        assert_eq!(NpcMood::from_health_impact(0), NpcMood::Neutral);
    }

    #[test]
    fn reset_returns_to_lobby_and_keeps_timer_generation() {
        let mut state = SessionState::default();
        let generation_before = state.scheduler.generation();
        state.phase = GamePhase::Playing;
        state.metrics.score = 500;
        state.grant_badge("Climate Hero");
        state.reset();
        assert_eq!(state.phase, GamePhase::Lobby);
        assert_eq!(state.metrics.score, 0);
        assert!(state.badges.is_empty());
        assert!(state.scheduler.generation() > generation_before);
    }
}
