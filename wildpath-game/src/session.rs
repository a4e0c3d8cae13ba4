//! The session: single owner of all mutable playthrough state.
//!
//! Hosts interact through a small set of intent actions plus a clock
//! pump. Every action is synchronous; anything delayed (narrative
//! reveal, avatar movement, signal expiry) goes through the scheduler
//! and lands when the host calls [`GameSession::fire_due`]. Actions
//! invoked in a phase where they are not valid are rejected without
//! touching state.

use crate::constants::{
    BADGE_CLIMATE_HERO, ENDING_BADGE_HEALTH, LOG_JOURNEY_ENDED, NPC_SIGNAL_TTL_MS,
    REVEAL_MS_PER_CHAR,
};
use crate::data::{Character, CharacterId, ContentData};
use crate::error::{ActionError, ContentError};
use crate::rewards;
use crate::schedule::{SignalKind, TimedEffect};
use crate::state::{DialogueSignal, GamePhase, RoundStage, SessionState};

#[derive(Debug, Clone)]
pub struct GameSession {
    content: ContentData,
    state: SessionState,
}

impl GameSession {
    /// Build a session over validated content.
    ///
    /// # Errors
    ///
    /// Returns the first referential-integrity defect found in the
    /// content.
    pub fn new(content: ContentData) -> Result<Self, ContentError> {
        content.validate()?;
        Ok(Self {
            content,
            state: SessionState::default(),
        })
    }

    /// Immutable snapshot of the session state. All observable effects
    /// of actions surface here, not in return values.
    #[must_use]
    pub const fn state(&self) -> &SessionState {
        &self.state
    }

    #[must_use]
    pub const fn content(&self) -> &ContentData {
        &self.content
    }

    /// The selected character's content, if one is selected.
    #[must_use]
    pub fn character(&self) -> Option<&Character> {
        self.state
            .character_id
            .and_then(|id| self.content.character(id))
    }

    /// Lobby -> character select.
    ///
    /// # Errors
    ///
    /// Rejected outside the lobby.
    pub fn start_game(&mut self) -> Result<(), ActionError> {
        if self.state.phase != GamePhase::Lobby {
            return Err(ActionError::invalid("start_game"));
        }
        self.state.phase = GamePhase::CharacterSelect;
        Ok(())
    }

    /// Pick a character and begin the first round.
    ///
    /// # Errors
    ///
    /// Rejected outside character select, or when no content exists
    /// for `id`.
    pub fn select_character(&mut self, id: CharacterId, now_ms: u64) -> Result<(), ActionError> {
        if self.state.phase != GamePhase::CharacterSelect {
            return Err(ActionError::invalid("select_character"));
        }
        let Some(character) = self.content.character(id) else {
            return Err(ActionError::UnknownCharacter(id));
        };
        self.state.begin_journey(character);
        self.schedule_reveal(now_ms);
        Ok(())
    }

    /// Submit the choice at `index` for the current scenario.
    ///
    /// # Errors
    ///
    /// Rejected unless a choice is awaited, or when `index` is out of
    /// range.
    pub fn submit_choice(&mut self, index: usize, now_ms: u64) -> Result<(), ActionError> {
        if self.state.phase != GamePhase::Playing || self.state.stage != RoundStage::AwaitingChoice
        {
            return Err(ActionError::invalid("submit_choice"));
        }
        let Some(character) = self
            .state
            .character_id
            .and_then(|id| self.content.character(id))
        else {
            return Err(ActionError::invalid("submit_choice"));
        };
        let Some(choice) = character
            .scenarios
            .get(self.state.round_index)
            .and_then(|scenario| scenario.choices.get(index))
        else {
            return Err(ActionError::ChoiceOutOfRange(index));
        };
        rewards::resolve_choice(&mut self.state, character, choice, now_ms);
        Ok(())
    }

    /// Continue past the consequence screen: next round, or the ending
    /// when no scenarios remain. Any pending avatar movement settles
    /// immediately so path progress is never lost.
    ///
    /// # Errors
    ///
    /// Rejected unless a consequence is being shown.
    pub fn advance_round(&mut self, now_ms: u64) -> Result<(), ActionError> {
        if self.state.phase != GamePhase::Playing
            || self.state.stage != RoundStage::ResolvingConsequence
        {
            return Err(ActionError::invalid("advance_round"));
        }
        self.settle_pending_moves(now_ms);
        self.state.consequence = None;

        let Some(character) = self
            .state
            .character_id
            .and_then(|id| self.content.character(id))
        else {
            return Err(ActionError::invalid("advance_round"));
        };
        if self.state.round_index + 1 < character.scenarios.len() {
            self.state.round_index += 1;
            self.state.stage = RoundStage::Narrating;
            self.state.node_detail = None;
            self.schedule_reveal(now_ms);
        } else {
            if self.state.metrics.health >= ENDING_BADGE_HEALTH {
                rewards::grant_badge(&mut self.state, BADGE_CLIMATE_HERO, now_ms);
            }
            self.state.phase = GamePhase::Ending;
            self.state.push_log(LOG_JOURNEY_ENDED);
        }
        Ok(())
    }

    /// Discard the playthrough and return to the lobby. Valid in any
    /// phase; pending timers from the discarded life are stranded.
    pub fn restart(&mut self) {
        self.state.reset();
    }

    /// Inspect a path node: opens quiz/fun-fact detail and pops NPC
    /// dialogue.
    ///
    /// # Errors
    ///
    /// Rejected outside play, or for an id not in the selected
    /// character's path.
    pub fn click_node(&mut self, node_id: u32, now_ms: u64) -> Result<(), ActionError> {
        if self.state.phase != GamePhase::Playing {
            return Err(ActionError::invalid("click_node"));
        }
        let Some(node) = self
            .state
            .character_id
            .and_then(|id| self.content.character(id))
            .and_then(|character| character.node(node_id))
        else {
            return Err(ActionError::UnknownNode(node_id));
        };
        if node.has_detail() {
            self.state.node_detail = Some(node_id);
        }
        if node.npc.is_some() {
            if let Some(dialogue) = &node.dialogue {
                let text = dialogue.clone();
                let token = self.state.scheduler.issue_token();
                self.state.dialogue = Some(DialogueSignal {
                    node_id,
                    text,
                    token,
                });
                self.state.scheduler.schedule(
                    now_ms,
                    NPC_SIGNAL_TTL_MS,
                    TimedEffect::ExpireSignal {
                        kind: SignalKind::Dialogue,
                        token,
                    },
                );
            }
        }
        Ok(())
    }

    /// Answer the quiz in the open node detail overlay.
    ///
    /// # Errors
    ///
    /// Rejected when no quiz overlay is open or the option index is
    /// out of range.
    pub fn answer_quiz(&mut self, option_index: usize, now_ms: u64) -> Result<(), ActionError> {
        if self.state.phase != GamePhase::Playing {
            return Err(ActionError::invalid("answer_quiz"));
        }
        let node = self
            .state
            .node_detail
            .and_then(|id| {
                self.state
                    .character_id
                    .and_then(|cid| self.content.character(cid))
                    .and_then(|character| character.node(id))
            })
            .ok_or(ActionError::NoOpenQuiz)?;
        let Some(quiz) = &node.quiz else {
            return Err(ActionError::NoOpenQuiz);
        };
        if option_index >= quiz.options.len() {
            return Err(ActionError::QuizOptionOutOfRange(option_index));
        }
        let correct = option_index == quiz.correct_index;
        rewards::resolve_quiz_answer(&mut self.state, node, correct, &quiz.reward, now_ms);
        Ok(())
    }

    /// Close the node detail overlay. Closing an already-closed
    /// overlay is a no-op.
    pub fn dismiss_node_detail(&mut self) {
        self.state.node_detail = None;
    }

    /// Fire every scheduled effect due at `now_ms`. Effects observe
    /// the session state as it exists now, not as it was when they
    /// were scheduled; stale effects drop themselves.
    pub fn fire_due(&mut self, now_ms: u64) {
        for effect in self.state.scheduler.fire_due(now_ms) {
            self.apply_effect(effect, now_ms);
        }
    }

    fn apply_effect(&mut self, effect: TimedEffect, now_ms: u64) {
        match effect {
            TimedEffect::NarrativeRevealed { round_index } => {
                if self.state.phase == GamePhase::Playing
                    && self.state.stage == RoundStage::Narrating
                    && self.state.round_index == round_index
                {
                    self.state.stage = RoundStage::AwaitingChoice;
                }
            }
            TimedEffect::ArriveAtNode { node_id } => {
                if self.state.phase == GamePhase::Playing {
                    if let Some(character) = self
                        .state
                        .character_id
                        .and_then(|id| self.content.character(id))
                    {
                        rewards::arrive_at_node(&mut self.state, character, node_id, now_ms);
                    }
                }
            }
            TimedEffect::ExpireSignal { kind, token } => {
                self.state.clear_signal(kind, token);
            }
        }
    }

    fn settle_pending_moves(&mut self, now_ms: u64) {
        for effect in self.state.scheduler.take_pending_moves() {
            if let TimedEffect::ArriveAtNode { node_id } = effect {
                if let Some(character) = self
                    .state
                    .character_id
                    .and_then(|id| self.content.character(id))
                {
                    rewards::arrive_at_node(&mut self.state, character, node_id, now_ms);
                }
            }
        }
    }

    fn schedule_reveal(&mut self, now_ms: u64) {
        let round_index = self.state.round_index;
        let delay = self
            .character()
            .and_then(|character| character.scenarios.get(round_index))
            .map_or(0, |scenario| {
                scenario.narrative.chars().count() as u64 * REVEAL_MS_PER_CHAR
            });
        self.state
            .scheduler
            .schedule(now_ms, delay, TimedEffect::NarrativeRevealed { round_index });
    }
}
