//! Static content definitions: characters, scenarios, choices, and
//! the branching path graphs their journeys traverse.
//!
//! Content is immutable once loaded. Referential integrity (entry
//! node present, all `next` links resolvable, quiz answers in range,
//! every reachable node able to reach a terminal) is validated once at
//! load rather than defensively at every traversal.

use serde::{Deserialize, Serialize};
use std::collections::{HashSet, VecDeque};
use std::fmt;
use std::str::FromStr;

use crate::error::ContentError;

/// Display labels for the population index, worst to best.
pub const POPULATION_LEVELS: [&str; 6] = [
    "Extinct",
    "Critical",
    "Endangered",
    "Declining",
    "Stable",
    "Thriving",
];

/// Display labels for the biodiversity index, worst to best.
pub const BIODIVERSITY_LEVELS: [&str; 6] = [
    "Severely Depleted",
    "Critical",
    "Fragile",
    "Moderate",
    "High",
    "Optimal",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CharacterId {
    Deer,
    Turtle,
    Bear,
    Bee,
    Fox,
    Camel,
}

impl CharacterId {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Deer => "deer",
            Self::Turtle => "turtle",
            Self::Bear => "bear",
            Self::Bee => "bee",
            Self::Fox => "fox",
            Self::Camel => "camel",
        }
    }

    /// Badge granted for a strong first round, themed per character.
    #[must_use]
    pub const fn guardian_badge(self) -> &'static str {
        match self {
            Self::Deer => "Forest Guardian",
            Self::Turtle => "Ocean Protector",
            Self::Bear => "Arctic Defender",
            Self::Bee => "Pollinator Pal",
            Self::Fox => "Twilight Tracker",
            Self::Camel => "Desert Wanderer",
        }
    }
}

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CharacterId {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "deer" => Ok(Self::Deer),
            "turtle" => Ok(Self::Turtle),
            "bear" => Ok(Self::Bear),
            "bee" => Ok(Self::Bee),
            "fox" => Ok(Self::Fox),
            "camel" => Ok(Self::Camel),
            _ => Err(()),
        }
    }
}

/// Signed deltas a choice applies to the metric triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Impact {
    #[serde(default)]
    pub health: i32,
    #[serde(default)]
    pub pop: i32,
    #[serde(default)]
    pub bio: i32,
}

impl Impact {
    #[must_use]
    pub const fn new(health: i32, pop: i32, bio: i32) -> Self {
        Self { health, pop, bio }
    }
}

/// One selectable action within a scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub text: String,
    #[serde(default)]
    pub impact: Impact,
    pub consequence: String,
    pub ripple_effect: String,
    pub reflection_question: String,
    pub explanation: String,
    #[serde(default)]
    pub visual: Option<String>,
}

/// One narrative round with its fixed choice set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub round: u32,
    pub title: String,
    pub narrative: String,
    pub choices: Vec<Choice>,
}

/// A quiz embedded in a path node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizData {
    pub question: String,
    pub options: Vec<String>,
    pub correct_index: usize,
    pub reward: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    #[default]
    Normal,
    Restoration,
    Disaster,
    Knowledge,
    Funfact,
    Quiz,
}

/// A node in a character's journey graph. Positions are normalized to
/// 0-100 on each axis for the host's board rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathNode {
    pub id: u32,
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub kind: NodeKind,
    #[serde(default)]
    pub label: Option<String>,
    /// Successor ids. Empty or absent marks a terminal node.
    #[serde(default)]
    pub next: Vec<u32>,
    #[serde(default)]
    pub fun_fact: Option<String>,
    #[serde(default)]
    pub quiz: Option<QuizData>,
    #[serde(default)]
    pub npc: Option<String>,
    #[serde(default)]
    pub dialogue: Option<String>,
}

impl PathNode {
    /// Whether the journey graph ends here.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.next.is_empty()
    }

    /// Whether landing here should surface detail content unprompted.
    #[must_use]
    pub const fn has_detail(&self) -> bool {
        matches!(self.kind, NodeKind::Funfact | NodeKind::Quiz)
    }
}

/// A playable animal with its scenario sequence and journey graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub id: CharacterId,
    pub name: String,
    pub icon: String,
    pub ecosystem: String,
    pub description: String,
    pub initial_health: i32,
    pub initial_pop: i32,
    pub initial_bio: i32,
    pub scenarios: Vec<Scenario>,
    pub path: Vec<PathNode>,
}

impl Character {
    #[must_use]
    pub fn node(&self, id: u32) -> Option<&PathNode> {
        self.path.iter().find(|n| n.id == id)
    }
}

/// Container for all character content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ContentData {
    pub characters: Vec<Character>,
}

impl ContentData {
    /// Create empty content (useful for tests).
    #[must_use]
    pub fn empty() -> Self {
        Self {
            characters: Vec::new(),
        }
    }

    /// Parse content from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed into valid
    /// character content.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    #[must_use]
    pub fn character(&self, id: CharacterId) -> Option<&Character> {
        self.characters.iter().find(|c| c.id == id)
    }

    /// Validate referential integrity for every character.
    ///
    /// # Errors
    ///
    /// Returns the first defect found: empty scenario lists, scenarios
    /// with a choice count outside 2-3, a missing entry node, duplicate
    /// node ids, unresolvable `next` links, quiz answer indices out of
    /// range, or a reachable node with no route to a terminal.
    pub fn validate(&self) -> Result<(), ContentError> {
        for character in &self.characters {
            validate_character(character)?;
        }
        Ok(())
    }
}

fn validate_character(character: &Character) -> Result<(), ContentError> {
    let id = character.id;
    if character.scenarios.is_empty() {
        return Err(ContentError::EmptyScenarios(id));
    }
    for (idx, scenario) in character.scenarios.iter().enumerate() {
        let count = scenario.choices.len();
        if !(2..=3).contains(&count) {
            return Err(ContentError::BadChoiceCount(id, idx, count));
        }
    }

    let mut seen = HashSet::new();
    for node in &character.path {
        if !seen.insert(node.id) {
            return Err(ContentError::DuplicateNodeId(id, node.id));
        }
        if let Some(quiz) = &node.quiz {
            if quiz.correct_index >= quiz.options.len() {
                return Err(ContentError::QuizIndexOutOfRange(
                    id,
                    node.id,
                    quiz.correct_index,
                    quiz.options.len(),
                ));
            }
        }
    }
    if character.node(0).is_none() {
        return Err(ContentError::MissingEntryNode(id));
    }
    for node in &character.path {
        for next in &node.next {
            if character.node(*next).is_none() {
                return Err(ContentError::UnresolvableLink(id, node.id, *next));
            }
        }
    }

    // Every node reachable from the entry must have a route to some
    // terminal, otherwise the journey can stall mid-graph.
    for reachable in reachable_from_entry(character) {
        if !reaches_terminal(character, reachable) {
            return Err(ContentError::NoTerminalPath(id, reachable));
        }
    }
    Ok(())
}

fn reachable_from_entry(character: &Character) -> Vec<u32> {
    let mut visited = HashSet::new();
    let mut queue = VecDeque::from([0u32]);
    while let Some(id) = queue.pop_front() {
        if !visited.insert(id) {
            continue;
        }
        if let Some(node) = character.node(id) {
            queue.extend(node.next.iter().copied());
        }
    }
    visited.into_iter().collect()
}

fn reaches_terminal(character: &Character, start: u32) -> bool {
    let mut visited = HashSet::new();
    let mut queue = VecDeque::from([start]);
    while let Some(id) = queue.pop_front() {
        if !visited.insert(id) {
            continue;
        }
        match character.node(id) {
            Some(node) if node.is_terminal() => return true,
            Some(node) => queue.extend(node.next.iter().copied()),
            None => {}
        }
    }
    false
}
