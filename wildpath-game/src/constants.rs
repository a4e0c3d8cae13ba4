//! Tuning values shared across the session, dispatcher, and scheduler.

/// Points granted when a choice improves health.
pub const POINTS_HEALTH_UP: i32 = 100;
/// Points granted when a choice leaves health untouched.
pub const POINTS_HEALTH_FLAT: i32 = 50;
/// Points lost when a choice harms health.
pub const POINTS_HEALTH_DOWN: i32 = -50;
/// Extra points when the population index improves.
pub const POINTS_POP_UP: i32 = 50;
/// Extra points when the biodiversity index improves.
pub const POINTS_BIO_UP: i32 = 50;

pub const HEALTH_MAX: i32 = 100;
pub const INDEX_MAX: i32 = 5;

/// Landing bonuses by node kind.
pub const RESTORATION_HEALTH_BONUS: i32 = 10;
pub const RESTORATION_SCORE_BONUS: i32 = 200;
pub const DISASTER_HEALTH_PENALTY: i32 = -15;
pub const DISASTER_SCORE_PENALTY: i32 = -100;
pub const KNOWLEDGE_SCORE_BONUS: i32 = 300;
pub const QUIZ_SCORE_BONUS: i32 = 500;

/// Every positive node id divisible by this emits a milestone signal.
pub const MILESTONE_INTERVAL: u32 = 3;

/// Badge thresholds. Round indices are zero-based.
pub const FIRST_ROUND_BADGE_HEALTH: i32 = 90;
pub const THIRD_ROUND_BADGE_HEALTH: i32 = 95;
pub const THIRD_ROUND_BADGE_INDEX: usize = 2;
pub const ENDING_BADGE_HEALTH: i32 = 80;

pub const BADGE_ECO_WARRIOR: &str = "Eco-Warrior";
pub const BADGE_CLIMATE_HERO: &str = "Climate Hero";

/// Narrative reveal pacing: one character every 20ms, as rendered by
/// the host's typewriter effect.
pub const REVEAL_MS_PER_CHAR: u64 = 20;
/// Delay between resolving a choice and the avatar arriving at the
/// next node.
pub const MOVE_DELAY_MS: u64 = 1_500;
/// Auto-expiry for transient signals (score delta, badge toast,
/// milestone message).
pub const SIGNAL_TTL_MS: u64 = 4_000;
/// Auto-expiry for NPC reactions and dialogue bubbles.
pub const NPC_SIGNAL_TTL_MS: u64 = 4_000;

pub const LOG_CHOICE_APPLIED: &str = "log.choice.applied";
pub const LOG_BADGE_EARNED: &str = "log.badge.earned";
pub const LOG_MILESTONE: &str = "log.milestone";
pub const LOG_BONUS_RESTORATION: &str = "log.bonus.restoration";
pub const LOG_BONUS_DISASTER: &str = "log.bonus.disaster";
pub const LOG_BONUS_KNOWLEDGE: &str = "log.bonus.knowledge";
pub const LOG_QUIZ_CORRECT: &str = "log.quiz.correct";
pub const LOG_QUIZ_WRONG: &str = "log.quiz.wrong";
pub const LOG_JOURNEY_ENDED: &str = "log.journey.ended";
