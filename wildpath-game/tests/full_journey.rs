use wildpath_game::{
    BuiltinContent, CharacterId, ContentSource, GamePhase, GameSession, RoundStage,
    constants::{HEALTH_MAX, INDEX_MAX, LOG_JOURNEY_ENDED, MOVE_DELAY_MS},
};

fn new_session() -> GameSession {
    let content = BuiltinContent.load_content().unwrap();
    GameSession::new(content).unwrap()
}

/// Drive the session into round `round_index` with the narrative
/// revealed, submitting nothing.
fn start_playing(session: &mut GameSession, id: CharacterId) -> u64 {
    session.start_game().unwrap();
    session.select_character(id, 0).unwrap();
    let now = 60_000;
    session.fire_due(now);
    assert_eq!(session.state().stage, RoundStage::AwaitingChoice);
    now
}

/// Submit one choice, let the avatar land, and continue. Returns the
/// advanced clock.
fn play_round(session: &mut GameSession, choice: usize, mut now: u64) -> u64 {
    session.submit_choice(choice, now).unwrap();
    now += MOVE_DELAY_MS;
    session.fire_due(now);
    session.advance_round(now).unwrap();
    now += 60_000;
    session.fire_due(now);
    now
}

#[test]
fn deer_first_choice_matches_reference_outcome() {
    let mut session = new_session();
    let now = start_playing(&mut session, CharacterId::Deer);

    session.submit_choice(0, now).unwrap();
    assert_eq!(session.state().metrics.health, 95);
    assert_eq!(session.state().metrics.score, 100);
    assert!(session.state().is_moving);

    session.fire_due(now + MOVE_DELAY_MS);
    // Node 0 has the single successor 1: no branch to take.
    assert_eq!(session.state().node_id, 1);
}

#[test]
fn deer_journey_full_trace() {
    let mut session = new_session();
    let mut now = start_playing(&mut session, CharacterId::Deer);

    // Round 1: explore (+5 health). Strong first round earns the
    // character badge, and the favorable branch heads for node 1.
    now = play_round(&mut session, 0, now);
    assert!(session.state().has_badge("Forest Guardian"));
    assert_eq!(session.state().node_id, 1);
    assert_eq!(session.state().metrics.health, 95);
    assert_eq!(session.state().metrics.score, 100);

    // Round 2: scavenge (-5 health, -2 bio). The unfavorable branch
    // lands on node 3, the logging camp: disaster penalty plus a
    // milestone (3 is the first positive multiple of three).
    now = play_round(&mut session, 2, now);
    assert_eq!(session.state().node_id, 3);
    assert_eq!(session.state().metrics.health, 75);
    // 100 - 50 choice penalty, then -100 disaster floors at zero.
    assert_eq!(session.state().metrics.score, 0);
    assert!(session.state().logs.iter().any(|l| l == "log.milestone"));
    assert!(
        session
            .state()
            .logs
            .iter()
            .any(|l| l == "log.bonus.disaster")
    );

    // Round 3: invasive plants (-10/-1/-2). Node 3 has a single
    // successor, the ranger-station quiz; its detail opens on landing.
    session.submit_choice(2, now).unwrap();
    now += MOVE_DELAY_MS;
    session.fire_due(now);
    assert_eq!(session.state().node_id, 4);
    assert_eq!(session.state().node_detail, Some(4));
    assert_eq!(session.state().metrics.health, 65);

    session.answer_quiz(1, now).unwrap();
    assert!(session.state().has_badge("Forest Scholar"));
    assert_eq!(session.state().metrics.score, 500);
    session.dismiss_node_detail();

    session.advance_round(now).unwrap();
    now += 60_000;
    session.fire_due(now);

    // Round 4: the wildlife bridge (+15/+1/+1). Favorable branch to
    // the knowledge node; continuing settles the move before the
    // ending, so its bonus still lands.
    session.submit_choice(0, now).unwrap();
    session.advance_round(now + 10).unwrap();

    let state = session.state();
    assert_eq!(state.phase, GamePhase::Ending);
    assert_eq!(state.node_id, 5);
    assert_eq!(state.metrics.health, 80);
    assert_eq!(state.metrics.pop_index, 5);
    assert_eq!(state.metrics.bio_index, 2);
    // 500 + 200 for the choice + 300 knowledge bonus.
    assert_eq!(state.metrics.score, 1000);
    assert!(state.has_badge("Climate Hero"));
    assert_eq!(state.badges.len(), 3);
    assert!(state.logs.iter().any(|l| l == "log.bonus.knowledge"));
    assert!(state.logs.iter().any(|l| l == LOG_JOURNEY_ENDED));
}

#[test]
fn every_character_survives_a_first_choice_playthrough() {
    for id in [
        CharacterId::Deer,
        CharacterId::Turtle,
        CharacterId::Bear,
        CharacterId::Bee,
    ] {
        let mut session = new_session();
        let mut now = start_playing(&mut session, id);
        for _ in 0..4 {
            now = play_round(&mut session, 0, now);
        }
        let state = session.state();
        assert_eq!(state.phase, GamePhase::Ending, "{id} did not finish");
        assert!((0..=HEALTH_MAX).contains(&state.metrics.health));
        assert!((0..=INDEX_MAX).contains(&state.metrics.pop_index));
        assert!((0..=INDEX_MAX).contains(&state.metrics.bio_index));
        assert!(state.metrics.score >= 0);
        let character = session.content().character(id).unwrap();
        assert!(character.node(session.state().node_id).is_some());
    }
}

#[test]
fn worst_choices_floor_metrics_without_stalling() {
    let mut session = new_session();
    let mut now = start_playing(&mut session, CharacterId::Bee);
    // Pesticides, collapse: the harshest bee choices.
    for choice in [2, 2, 1, 1] {
        now = play_round(&mut session, choice, now);
    }
    let state = session.state();
    assert_eq!(state.phase, GamePhase::Ending);
    assert_eq!(state.metrics.health, 0);
    assert!(!state.has_badge("Climate Hero"));
}

#[test]
fn restart_from_ending_allows_a_fresh_run() {
    let mut session = new_session();
    let mut now = start_playing(&mut session, CharacterId::Turtle);
    for _ in 0..4 {
        now = play_round(&mut session, 0, now);
    }
    assert_eq!(session.state().phase, GamePhase::Ending);

    session.restart();
    assert_eq!(session.state().phase, GamePhase::Lobby);
    session.start_game().unwrap();
    session.select_character(CharacterId::Bear, now).unwrap();
    assert_eq!(session.state().metrics.health, 90);
    assert_eq!(session.state().metrics.pop_index, 4);
    assert_eq!(session.state().node_id, 0);
    assert!(session.state().badges.is_empty());
}
