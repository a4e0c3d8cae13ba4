//! Event/reward dispatch: the glue between a player intent and the
//! metric, badge, signal, and path mutations it causes.
//!
//! The immediate half of a choice (impact, points, consequence, badge
//! predicates) applies synchronously; the delayed half (avatar
//! movement and the landing effects) goes through the scheduler.

use crate::constants::{
    BADGE_ECO_WARRIOR, FIRST_ROUND_BADGE_HEALTH, LOG_BADGE_EARNED, LOG_BONUS_DISASTER,
    LOG_BONUS_KNOWLEDGE, LOG_BONUS_RESTORATION, LOG_CHOICE_APPLIED, LOG_MILESTONE,
    LOG_QUIZ_CORRECT, LOG_QUIZ_WRONG, MILESTONE_INTERVAL, MOVE_DELAY_MS, NPC_SIGNAL_TTL_MS,
    SIGNAL_TTL_MS, THIRD_ROUND_BADGE_HEALTH, THIRD_ROUND_BADGE_INDEX,
};
use crate::data::{Character, Choice, NodeKind, PathNode};
use crate::metrics::{LandingBonus, choice_points, quiz_reward_bonus};
use crate::path::{BranchOutcome, next_node_id};
use crate::schedule::{SignalKind, TimedEffect};
use crate::state::{
    BadgeSignal, ConsequencePayload, MilestoneSignal, NpcMood, NpcReaction, RoundStage, ScoreDelta,
    SessionState,
};

/// Apply one selected choice: metrics, points, consequence payload,
/// badge predicates, NPC reaction, and the scheduled move along the
/// path graph.
pub(crate) fn resolve_choice(
    state: &mut SessionState,
    character: &Character,
    choice: &Choice,
    now_ms: u64,
) {
    let impact = choice.impact;
    state.metrics.apply_impact(impact);

    let points = choice_points(impact);
    state.metrics.add_points(points);
    set_score_delta(state, points, now_ms);

    state.consequence = Some(ConsequencePayload::from_choice(choice));
    state.push_log(LOG_CHOICE_APPLIED);

    // Badge predicates see the new health and the round index before
    // any increment.
    let health = state.metrics.health;
    if state.round_index == 0 && health >= FIRST_ROUND_BADGE_HEALTH {
        grant_badge(state, character.id.guardian_badge(), now_ms);
    }
    if state.round_index == THIRD_ROUND_BADGE_INDEX && health >= THIRD_ROUND_BADGE_HEALTH {
        grant_badge(state, BADGE_ECO_WARRIOR, now_ms);
    }

    let token = state.scheduler.issue_token();
    state.npc_reaction = Some(NpcReaction {
        mood: NpcMood::from_health_impact(impact.health),
        token,
    });
    state.scheduler.schedule(
        now_ms,
        NPC_SIGNAL_TTL_MS,
        TimedEffect::ExpireSignal {
            kind: SignalKind::NpcReaction,
            token,
        },
    );

    let outcome = BranchOutcome::from_health_impact(impact.health);
    let next = next_node_id(&character.path, state.node_id, outcome);
    if next != state.node_id {
        state.is_moving = true;
        state.scheduler.schedule(
            now_ms,
            MOVE_DELAY_MS,
            TimedEffect::ArriveAtNode { node_id: next },
        );
    }

    state.stage = RoundStage::ResolvingConsequence;
}

/// Land the avatar on a node: milestone signal, landing bonus, and
/// auto-surfaced quiz/fun-fact detail.
pub(crate) fn arrive_at_node(
    state: &mut SessionState,
    character: &Character,
    node_id: u32,
    now_ms: u64,
) {
    state.node_id = node_id;
    state.is_moving = false;

    let Some(node) = character.node(node_id) else {
        return;
    };

    if node_id > 0 && node_id % MILESTONE_INTERVAL == 0 {
        let token = state.scheduler.issue_token();
        state.milestone = Some(MilestoneSignal {
            node_id,
            label: node.label.clone(),
            token,
        });
        state.push_log(LOG_MILESTONE);
        state.scheduler.schedule(
            now_ms,
            SIGNAL_TTL_MS,
            TimedEffect::ExpireSignal {
                kind: SignalKind::Milestone,
                token,
            },
        );
    }

    if let Some(bonus) = LandingBonus::for_node_kind(node.kind) {
        state.metrics.apply_bonus(bonus);
        set_score_delta(state, bonus.score, now_ms);
        let key = match node.kind {
            NodeKind::Restoration => LOG_BONUS_RESTORATION,
            NodeKind::Disaster => LOG_BONUS_DISASTER,
            _ => LOG_BONUS_KNOWLEDGE,
        };
        state.push_log(key);
    }

    if node.has_detail() {
        state.node_detail = Some(node_id);
    }
}

/// Resolve a quiz answer against the node's embedded quiz. Returns
/// whether the answer was correct. The reward (badge plus score bonus)
/// is granted at most once per quiz node.
pub(crate) fn resolve_quiz_answer(
    state: &mut SessionState,
    node: &PathNode,
    quiz_correct: bool,
    reward: &str,
    now_ms: u64,
) {
    if !quiz_correct {
        state.push_log(LOG_QUIZ_WRONG);
        return;
    }
    state.push_log(LOG_QUIZ_CORRECT);
    if state.quiz_answered(node.id) {
        return;
    }
    state.answered_quizzes.push(node.id);
    let bonus = quiz_reward_bonus();
    state.metrics.apply_bonus(bonus);
    set_score_delta(state, bonus.score, now_ms);
    grant_badge(state, reward, now_ms);
}

/// Grant a badge (idempotently) and raise its toast signal.
pub(crate) fn grant_badge(state: &mut SessionState, badge: &str, now_ms: u64) {
    if !state.grant_badge(badge) {
        return;
    }
    state.push_log(LOG_BADGE_EARNED);
    let token = state.scheduler.issue_token();
    state.active_badge = Some(BadgeSignal {
        badge: badge.to_string(),
        token,
    });
    state.scheduler.schedule(
        now_ms,
        SIGNAL_TTL_MS,
        TimedEffect::ExpireSignal {
            kind: SignalKind::Badge,
            token,
        },
    );
}

fn set_score_delta(state: &mut SessionState, points: i32, now_ms: u64) {
    let token = state.scheduler.issue_token();
    state.score_delta = Some(ScoreDelta { points, token });
    state.scheduler.schedule(
        now_ms,
        SIGNAL_TTL_MS,
        TimedEffect::ExpireSignal {
            kind: SignalKind::ScoreDelta,
            token,
        },
    );
}
