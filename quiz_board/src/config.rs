// ********* Input data structures ***********

use std::error::Error;
use std::fmt::Display;

/// The content of one spreadsheet cell, as handed over by a data source.
///
/// Readers map their own cell types onto this small set; the library only
/// needs to distinguish text from numbers and empty cells.
#[derive(PartialEq, Debug, Clone)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            Cell::Number(_) => false,
        }
    }

    /// The trimmed textual form of the cell.
    pub fn as_text(&self) -> String {
        match self {
            Cell::Empty => "".to_string(),
            Cell::Text(s) => s.trim().to_string(),
            Cell::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => format!("{}", *n as i64),
            Cell::Number(n) => n.to_string(),
        }
    }

    /// The numeric value of the cell, if it holds a finite number.
    pub fn to_number(&self) -> Option<f64> {
        let x = match self {
            Cell::Empty => None,
            Cell::Number(n) => Some(*n),
            Cell::Text(s) => s.trim().replace(',', ".").parse::<f64>().ok(),
        };
        // "-0" is the same total as "0".
        x.filter(|n| n.is_finite()).map(|n| n + 0.0)
    }

    /// The numeric value of the cell. Anything that is not a finite number coerces to 0.
    pub fn as_number(&self) -> f64 {
        self.to_number().unwrap_or(0.0)
    }
}

/// One team of the leaderboard.
#[derive(PartialEq, Debug, Clone)]
pub struct TeamRecord {
    pub name: String,
    /// The points collected by the team.
    pub total: f64,
    /// The number of people in the team. Fewer people rank better on equal totals.
    pub count: u32,
}

impl TeamRecord {
    pub fn new(name: &str, total: f64, count: u32) -> TeamRecord {
        TeamRecord {
            name: name.to_string(),
            total,
            count,
        }
    }
}

/// One row of the quiz sheet: question text, answer and notes.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct QuizRow {
    pub text: String,
    pub answer: String,
    pub notes: String,
}

impl QuizRow {
    pub fn new(text: &str, answer: &str, notes: &str) -> QuizRow {
        QuizRow {
            text: text.trim().to_string(),
            answer: answer.trim().to_string(),
            notes: notes.trim().to_string(),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.text.is_empty()
    }
}

// ******** Output data structures *********

/// A maximal run of teams that share the same total and the same count.
#[derive(PartialEq, Debug, Clone)]
pub struct RankGroup {
    /// 1 + the number of teams ranked strictly above this group.
    pub rank: u32,
    pub teams: Vec<TeamRecord>,
}

impl RankGroup {
    pub fn size(&self) -> usize {
        self.teams.len()
    }

    pub fn is_tied(&self) -> bool {
        self.teams.len() > 1
    }
}

/// The groups of a leaderboard, best rank first.
#[derive(PartialEq, Debug, Clone, Default)]
pub struct Leaderboard {
    pub groups: Vec<RankGroup>,
}

impl Leaderboard {
    pub fn num_groups(&self) -> usize {
        self.groups.len()
    }

    pub fn num_teams(&self) -> usize {
        self.groups.iter().map(|g| g.size()).sum()
    }

    /// All the records, in ranked order.
    pub fn flatten(&self) -> Vec<TeamRecord> {
        self.groups
            .iter()
            .flat_map(|g| g.teams.iter().cloned())
            .collect()
    }
}

/// A parsed question of a topic.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Question {
    /// The leading label of the question ("3)", "T."), if the question has one.
    pub label: Option<String>,
    /// The question text, without its label.
    pub body: String,
    pub answer: String,
    pub notes: String,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Topic {
    pub title: String,
    pub questions: Vec<Question>,
}

/// One slide of an output deck.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Slide {
    pub title: String,
    pub body: String,
    /// Answer and notes, meant for the speaker.
    pub speaker_notes: String,
}

/// A presentation to create: a title and its slides, in order.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Deck {
    pub title: String,
    pub topics: Vec<String>,
    pub slides: Vec<Slide>,
}

/// Errors that prevent the library from producing a result.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum BoardErrors {
    EmptyLeaderboard,
    EmptyQuiz,
    InvalidLayout(String),
}

impl Error for BoardErrors {}

impl Display for BoardErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BoardErrors::EmptyLeaderboard => write!(f, "no team found in the leaderboard data"),
            BoardErrors::EmptyQuiz => write!(f, "no topic found in the quiz data"),
            BoardErrors::InvalidLayout(msg) => write!(f, "invalid quiz layout: {}", msg),
        }
    }
}

// ********* Configuration **********

/// How topics and questions are laid out in the quiz sheet and packed into decks.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct QuizLayout {
    pub questions_per_topic: usize,
    pub topics_per_deck: usize,
    /// Prepended to every deck title.
    pub deck_prefix: String,
}

impl QuizLayout {
    pub fn default_layout() -> QuizLayout {
        QuizLayout {
            questions_per_topic: 6,
            topics_per_deck: 2,
            deck_prefix: "Party Quiz".to_string(),
        }
    }
}

impl Default for QuizLayout {
    fn default() -> Self {
        QuizLayout::default_layout()
    }
}
