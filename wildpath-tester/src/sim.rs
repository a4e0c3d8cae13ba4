//! Headless journey simulation with a synthetic clock.
//!
//! Each run drives a real [`GameSession`] the way a host UI would:
//! reveal, choose, let the avatar land, continue. Invariant checks run
//! after every step; violations are collected rather than panicking so
//! a sweep reports every broken run.

use anyhow::{Context, Result};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use wildpath_game::{
    CharacterId, ContentData, GamePhase, GameSession, RoundStage,
    constants::{HEALTH_MAX, INDEX_MAX, MOVE_DELAY_MS},
};

use crate::policy::ChoicePolicy;

/// A long-enough jump to settle any reveal or expiry timer.
const STEP_MS: u64 = 60_000;

#[derive(Debug, Clone, Serialize)]
pub struct RunRecord {
    pub character: String,
    pub policy: String,
    pub seed: u64,
    pub final_health: i32,
    pub final_pop: i32,
    pub final_bio: i32,
    pub score: i32,
    pub rounds_played: usize,
    pub nodes_visited: Vec<u32>,
    pub badges: Vec<String>,
    pub quizzes_answered: usize,
    pub violations: Vec<String>,
}

impl RunRecord {
    pub fn passed(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Play one full journey and return what happened.
pub fn run_one(
    content: &ContentData,
    character: CharacterId,
    policy: ChoicePolicy,
    seed: u64,
) -> Result<RunRecord> {
    let mut session = GameSession::new(content.clone()).context("content failed validation")?;
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut now: u64 = 0;
    let mut violations = Vec::new();
    let mut nodes_visited = vec![0];
    let mut quizzes_answered = 0;

    session.start_game().context("start_game rejected")?;
    session
        .select_character(character, now)
        .context("select_character rejected")?;

    let rounds = content
        .character(character)
        .map_or(0, |c| c.scenarios.len());

    for round in 0..rounds {
        now += STEP_MS;
        session.fire_due(now);
        if session.state().stage != RoundStage::AwaitingChoice {
            violations.push(format!("round {round}: narrative never revealed"));
            break;
        }

        let Some(scenario) = session
            .character()
            .and_then(|c| c.scenarios.get(round))
            .cloned()
        else {
            violations.push(format!("round {round}: scenario missing"));
            break;
        };
        let choice = policy.pick(&scenario, &mut rng);
        log::debug!("{character} round {round}: choice {choice} ({policy:?})");
        session
            .submit_choice(choice, now)
            .with_context(|| format!("round {round}: choice {choice} rejected"))?;
        check_metrics(&mut violations, &session, round);

        now += MOVE_DELAY_MS;
        session.fire_due(now);
        let node_id = session.state().node_id;
        if nodes_visited.last() != Some(&node_id) {
            nodes_visited.push(node_id);
        }
        if session.state().is_moving {
            violations.push(format!("round {round}: avatar still moving after delay"));
        }

        answer_open_quiz(&mut session, &mut quizzes_answered, now);
        check_metrics(&mut violations, &session, round);

        session
            .advance_round(now)
            .with_context(|| format!("round {round}: advance rejected"))?;
    }

    let ended_node = session.state().node_id;
    if nodes_visited.last() != Some(&ended_node) {
        nodes_visited.push(ended_node);
    }
    if session.state().phase != GamePhase::Ending && violations.is_empty() {
        violations.push("journey never reached the ending".to_string());
    }
    if let Some(c) = content.character(character) {
        for &id in &nodes_visited {
            if c.node(id).is_none() {
                violations.push(format!("visited node {id} not in path"));
            }
        }
    }

    let state = session.state();
    Ok(RunRecord {
        character: character.to_string(),
        policy: policy.as_str().to_string(),
        seed,
        final_health: state.metrics.health,
        final_pop: state.metrics.pop_index,
        final_bio: state.metrics.bio_index,
        score: state.metrics.score,
        rounds_played: rounds,
        nodes_visited,
        badges: state.badges.iter().cloned().collect(),
        quizzes_answered,
        violations,
    })
}

/// If landing opened a quiz overlay, answer it correctly once.
fn answer_open_quiz(session: &mut GameSession, quizzes_answered: &mut usize, now: u64) {
    let Some(quiz) = session
        .state()
        .node_detail
        .and_then(|id| session.character().and_then(|c| c.node(id)))
        .and_then(|node| node.quiz.clone())
    else {
        session.dismiss_node_detail();
        return;
    };
    if session.answer_quiz(quiz.correct_index, now).is_ok() {
        *quizzes_answered += 1;
    }
    session.dismiss_node_detail();
}

fn check_metrics(violations: &mut Vec<String>, session: &GameSession, round: usize) {
    let metrics = session.state().metrics;
    if !(0..=HEALTH_MAX).contains(&metrics.health) {
        violations.push(format!("round {round}: health {} out of range", metrics.health));
    }
    if !(0..=INDEX_MAX).contains(&metrics.pop_index) {
        violations.push(format!("round {round}: pop {} out of range", metrics.pop_index));
    }
    if !(0..=INDEX_MAX).contains(&metrics.bio_index) {
        violations.push(format!("round {round}: bio {} out of range", metrics.bio_index));
    }
    if metrics.score < 0 {
        violations.push(format!("round {round}: score {} negative", metrics.score));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wildpath_game::{BuiltinContent, ContentSource};

    #[test]
    fn best_policy_run_is_clean() {
        let content = BuiltinContent.load_content().unwrap();
        let record = run_one(&content, CharacterId::Deer, ChoicePolicy::Best, 1337).unwrap();
        assert!(record.passed(), "{:?}", record.violations);
        assert_eq!(record.rounds_played, 4);
        assert!(record.nodes_visited.len() > 1);
        assert_eq!(record.nodes_visited[0], 0);
    }

    #[test]
    fn worst_policy_still_completes() {
        let content = BuiltinContent.load_content().unwrap();
        for id in [
            CharacterId::Deer,
            CharacterId::Turtle,
            CharacterId::Bear,
            CharacterId::Bee,
        ] {
            let record = run_one(&content, id, ChoicePolicy::Worst, 7).unwrap();
            assert!(record.passed(), "{id}: {:?}", record.violations);
        }
    }

    #[test]
    fn same_seed_reproduces_random_runs() {
        let content = BuiltinContent.load_content().unwrap();
        let a = run_one(&content, CharacterId::Bee, ChoicePolicy::Random, 99).unwrap();
        let b = run_one(&content, CharacterId::Bee, ChoicePolicy::Random, 99).unwrap();
        assert_eq!(a.nodes_visited, b.nodes_visited);
        assert_eq!(a.score, b.score);
    }
}
