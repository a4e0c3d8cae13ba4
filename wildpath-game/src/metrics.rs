//! Ecosystem metrics: health, population index, biodiversity index,
//! and the cumulative score.
//!
//! All mutation clamps on write. Out-of-range impacts are silently
//! clamped rather than rejected; that policy comes from the content
//! being bounded and authored, not adversarial.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DISASTER_HEALTH_PENALTY, DISASTER_SCORE_PENALTY, HEALTH_MAX, INDEX_MAX, KNOWLEDGE_SCORE_BONUS,
    POINTS_BIO_UP, POINTS_HEALTH_DOWN, POINTS_HEALTH_FLAT, POINTS_HEALTH_UP, POINTS_POP_UP,
    QUIZ_SCORE_BONUS, RESTORATION_HEALTH_BONUS, RESTORATION_SCORE_BONUS,
};
use crate::data::{Impact, NodeKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metrics {
    pub health: i32,
    pub pop_index: i32,
    pub bio_index: i32,
    pub score: i32,
}

impl Default for Metrics {
    fn default() -> Self {
        Self {
            health: HEALTH_MAX,
            pop_index: INDEX_MAX,
            bio_index: INDEX_MAX,
            score: 0,
        }
    }
}

impl Metrics {
    /// Starting metrics for a freshly selected character.
    #[must_use]
    pub fn starting(health: i32, pop: i32, bio: i32) -> Self {
        let mut metrics = Self {
            health,
            pop_index: pop,
            bio_index: bio,
            score: 0,
        };
        metrics.clamp();
        metrics
    }

    pub fn clamp(&mut self) {
        self.health = self.health.clamp(0, HEALTH_MAX);
        self.pop_index = self.pop_index.clamp(0, INDEX_MAX);
        self.bio_index = self.bio_index.clamp(0, INDEX_MAX);
        self.score = self.score.max(0);
    }

    /// Apply a choice impact, clamping each metric on write.
    pub fn apply_impact(&mut self, impact: Impact) {
        self.health = (self.health + impact.health).clamp(0, HEALTH_MAX);
        self.pop_index = (self.pop_index + impact.pop).clamp(0, INDEX_MAX);
        self.bio_index = (self.bio_index + impact.bio).clamp(0, INDEX_MAX);
    }

    /// Add (possibly negative) points; score never drops below zero.
    pub fn add_points(&mut self, points: i32) {
        self.score = (self.score + points).max(0);
    }

    /// Apply a node-landing bonus with the usual clamp rules.
    pub fn apply_bonus(&mut self, bonus: LandingBonus) {
        self.health = (self.health + bonus.health).clamp(0, HEALTH_MAX);
        self.add_points(bonus.score);
    }
}

/// Points a choice is worth, independent of any session state.
#[must_use]
pub const fn choice_points(impact: Impact) -> i32 {
    let mut points = if impact.health > 0 {
        POINTS_HEALTH_UP
    } else if impact.health == 0 {
        POINTS_HEALTH_FLAT
    } else {
        POINTS_HEALTH_DOWN
    };
    if impact.pop > 0 {
        points += POINTS_POP_UP;
    }
    if impact.bio > 0 {
        points += POINTS_BIO_UP;
    }
    points
}

/// Health/score adjustment applied when the avatar lands on a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LandingBonus {
    pub health: i32,
    pub score: i32,
}

impl LandingBonus {
    /// Bonus for landing on a node of the given kind, if any. Quiz
    /// rewards are not landing bonuses; they are granted on a correct
    /// answer via [`quiz_reward_bonus`].
    #[must_use]
    pub const fn for_node_kind(kind: NodeKind) -> Option<Self> {
        match kind {
            NodeKind::Restoration => Some(Self {
                health: RESTORATION_HEALTH_BONUS,
                score: RESTORATION_SCORE_BONUS,
            }),
            NodeKind::Disaster => Some(Self {
                health: DISASTER_HEALTH_PENALTY,
                score: DISASTER_SCORE_PENALTY,
            }),
            NodeKind::Knowledge => Some(Self {
                health: 0,
                score: KNOWLEDGE_SCORE_BONUS,
            }),
            NodeKind::Normal | NodeKind::Funfact | NodeKind::Quiz => None,
        }
    }
}

/// Bonus granted when a quiz is answered correctly.
#[must_use]
pub const fn quiz_reward_bonus() -> LandingBonus {
    LandingBonus {
        health: 0,
        score: QUIZ_SCORE_BONUS,
    }
}
