use wildpath_game::{CharacterId, NodeKind, content};

#[test]
fn builtin_content_passes_validation() {
    content::builtin().validate().unwrap();
}

#[test]
fn every_character_has_four_rounds_of_three_choices() {
    for character in &content::builtin().characters {
        assert_eq!(character.scenarios.len(), 4, "{}", character.id);
        for (idx, scenario) in character.scenarios.iter().enumerate() {
            assert_eq!(scenario.round as usize, idx + 1, "{}", character.id);
            assert_eq!(scenario.choices.len(), 3, "{}", character.id);
            for choice in &scenario.choices {
                assert!(!choice.text.is_empty());
                assert!(!choice.consequence.is_empty());
                assert!(!choice.ripple_effect.is_empty());
                assert!(!choice.reflection_question.is_empty());
                assert!(!choice.explanation.is_empty());
            }
        }
    }
}

#[test]
fn every_path_starts_at_a_single_successor_entry() {
    for character in &content::builtin().characters {
        let entry = character.node(0).unwrap();
        assert_eq!(entry.next.len(), 1, "{}", character.id);
    }
}

#[test]
fn every_path_branches_and_terminates() {
    for character in &content::builtin().characters {
        assert!(
            character.path.iter().any(|node| node.next.len() == 2),
            "{} never branches",
            character.id
        );
        assert!(
            character.path.iter().any(|node| node.next.is_empty()),
            "{} has no terminal",
            character.id
        );
    }
}

#[test]
fn node_positions_are_normalized() {
    for character in &content::builtin().characters {
        for node in &character.path {
            assert!((0.0..=100.0).contains(&node.x), "{}", character.id);
            assert!((0.0..=100.0).contains(&node.y), "{}", character.id);
        }
    }
}

#[test]
fn special_nodes_carry_their_payloads() {
    for character in &content::builtin().characters {
        for node in &character.path {
            match node.kind {
                NodeKind::Quiz => {
                    let quiz = node.quiz.as_ref().expect("quiz node without quiz");
                    assert!(quiz.options.len() >= 2);
                    assert!(!quiz.reward.is_empty());
                }
                NodeKind::Funfact => {
                    assert!(node.fun_fact.is_some(), "{}", character.id);
                }
                _ => {}
            }
            if node.dialogue.is_some() {
                assert!(node.npc.is_some(), "dialogue without a speaker");
            }
        }
    }
}

#[test]
fn milestone_ids_are_labeled() {
    for character in &content::builtin().characters {
        for node in &character.path {
            if node.id > 0 && node.id % 3 == 0 {
                assert!(
                    node.label.is_some(),
                    "{} milestone node {} unlabeled",
                    character.id,
                    node.id
                );
            }
        }
    }
}

#[test]
fn quiz_rewards_are_distinct_from_threshold_badges() {
    for character in &content::builtin().characters {
        for node in &character.path {
            if let Some(quiz) = &node.quiz {
                assert_ne!(quiz.reward, "Eco-Warrior");
                assert_ne!(quiz.reward, "Climate Hero");
                assert_ne!(quiz.reward, character.id.guardian_badge());
            }
        }
    }
}

#[test]
fn fox_and_camel_are_reserved_ids_without_content() {
    let content = content::builtin();
    assert!(content.character(CharacterId::Fox).is_none());
    assert!(content.character(CharacterId::Camel).is_none());
}
