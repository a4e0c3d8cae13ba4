//! Timed follow-up effects for a single-threaded, host-driven session.
//!
//! The core never owns a real timer. Actions enqueue tasks with an
//! absolute fire time and the generation current at schedule time; the
//! host pumps [`crate::GameSession::fire_due`] with its clock. Bumping
//! the generation (restart, character select) strands every pending
//! task, so a stale timer can never mutate a session it no longer
//! belongs to. Effects that survive a generation still re-validate
//! against current state at fire time (round index for the narrative
//! reveal, instance tokens for signal expiries).

use serde::{Deserialize, Serialize};

/// Which transient signal an expiry task targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalKind {
    ScoreDelta,
    Badge,
    Milestone,
    NpcReaction,
    Dialogue,
}

/// Deferred mutation applied when its task comes due.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimedEffect {
    /// The narrative for the captured round finished revealing.
    NarrativeRevealed { round_index: usize },
    /// The avatar arrives at a node after the movement delay.
    ArriveAtNode { node_id: u32 },
    /// The signal instance holding this token expires.
    ExpireSignal { kind: SignalKind, token: u64 },
}

impl TimedEffect {
    const fn is_move(self) -> bool {
        matches!(self, Self::ArriveAtNode { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
struct Task {
    fire_at_ms: u64,
    generation: u64,
    effect: TimedEffect,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Scheduler {
    generation: u64,
    next_token: u64,
    tasks: Vec<Task>,
}

impl Scheduler {
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Invalidate every pending task. Called on restart and character
    /// select so in-flight reveals, movements, and expiries from the
    /// previous life cannot fire.
    pub fn bump_generation(&mut self) {
        self.generation += 1;
        self.tasks.clear();
    }

    /// Mint a token identifying one signal instance.
    pub fn issue_token(&mut self) -> u64 {
        self.next_token += 1;
        self.next_token
    }

    pub fn schedule(&mut self, now_ms: u64, delay_ms: u64, effect: TimedEffect) {
        self.tasks.push(Task {
            fire_at_ms: now_ms + delay_ms,
            generation: self.generation,
            effect,
        });
    }

    /// Drain every task due at `now_ms`, in fire-time order, dropping
    /// tasks stranded by a generation bump.
    pub fn fire_due(&mut self, now_ms: u64) -> Vec<TimedEffect> {
        let generation = self.generation;
        let mut due: Vec<Task> = Vec::new();
        self.tasks.retain(|task| {
            if task.generation != generation {
                return false;
            }
            if task.fire_at_ms <= now_ms {
                due.push(*task);
                return false;
            }
            true
        });
        due.sort_by_key(|task| task.fire_at_ms);
        due.into_iter().map(|task| task.effect).collect()
    }

    /// Drain pending avatar movements regardless of due time. Round
    /// advancement settles movement early rather than cancelling it,
    /// so graph progress is never lost.
    pub fn take_pending_moves(&mut self) -> Vec<TimedEffect> {
        let generation = self.generation;
        let mut moves: Vec<Task> = Vec::new();
        self.tasks.retain(|task| {
            if task.generation == generation && task.effect.is_move() {
                moves.push(*task);
                return false;
            }
            true
        });
        moves.sort_by_key(|task| task.fire_at_ms);
        moves.into_iter().map(|task| task.effect).collect()
    }

    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.tasks
            .iter()
            .any(|task| task.generation == self.generation)
    }
}
