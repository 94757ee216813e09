use crate::quiz::*;

use quiz_board::reveal::ViewMode;
use serde::{Deserialize, Serialize};
use serde_json::Value as JSValue;

/// The medal colors, then the color of every other rank.
pub const DEFAULT_PALETTE: [&str; 4] = ["#f5c518", "#c0c7d0", "#cd8a4c", "#3b82f6"];

#[derive(PartialEq, Debug, Clone, Serialize, Deserialize, Default)]
pub struct LeaderboardConfig {
    pub title: Option<String>,
    #[serde(rename = "sheetName")]
    pub sheet_name: Option<String>,
    #[serde(rename = "firstRowIndex")]
    _first_row_index: Option<JSValue>,
    #[serde(rename = "nameColumn")]
    _name_column: Option<JSValue>,
    #[serde(rename = "totalColumn")]
    _total_column: Option<JSValue>,
    #[serde(rename = "countColumn")]
    _count_column: Option<JSValue>,
    pub palette: Option<Vec<String>>,
    #[serde(rename = "defaultMode")]
    pub default_mode: Option<String>,
}

#[derive(PartialEq, Debug, Clone, Serialize, Deserialize, Default)]
pub struct QuizConfig {
    #[serde(rename = "sheetName")]
    pub sheet_name: Option<String>,
    #[serde(rename = "firstRowIndex")]
    _first_row_index: Option<JSValue>,
    #[serde(rename = "questionColumn")]
    _question_column: Option<JSValue>,
    #[serde(rename = "answerColumn")]
    _answer_column: Option<JSValue>,
    #[serde(rename = "notesColumn")]
    _notes_column: Option<JSValue>,
    #[serde(rename = "deckPrefix")]
    pub deck_prefix: Option<String>,
    #[serde(rename = "topicsPerDeck")]
    pub topics_per_deck: Option<usize>,
    #[serde(rename = "questionsPerTopic")]
    pub questions_per_topic: Option<usize>,
    #[serde(rename = "outputDirectory")]
    pub output_directory: Option<String>,
}

#[derive(PartialEq, Debug, Clone, Serialize, Deserialize, Default)]
pub struct FileConfig {
    pub leaderboard: Option<LeaderboardConfig>,
    pub quiz: Option<QuizConfig>,
}

/// The resolved settings of the leaderboard. Column indexes start at 0, rows at 1.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct LeaderboardSettings {
    pub title: String,
    pub sheet_name: Option<String>,
    pub first_row: usize,
    pub name_column: usize,
    pub total_column: usize,
    pub count_column: usize,
    pub palette: Vec<String>,
    pub default_mode: ViewMode,
}

impl LeaderboardSettings {
    pub fn resolve(config: &Option<LeaderboardConfig>) -> QuizResult<LeaderboardSettings> {
        let c = config.clone().unwrap_or_default();
        let default_mode = match &c.default_mode {
            None => ViewMode::AllAtOnce,
            Some(m) => match ViewMode::from_name(m) {
                Some(vm) => vm,
                None => whatever!("Unknown defaultMode {:?}: expected 'all' or 'reveal'", m),
            },
        };
        let palette = match c.palette {
            Some(p) if !p.is_empty() => p,
            _ => DEFAULT_PALETTE.iter().map(|s| s.to_string()).collect(),
        };
        Ok(LeaderboardSettings {
            title: c.title.unwrap_or_else(|| "Leaderboard".to_string()),
            sheet_name: c.sheet_name,
            first_row: read_row_index(&c._first_row_index)?.unwrap_or(2),
            name_column: read_column(&c._name_column)?.unwrap_or(0),
            total_column: read_column(&c._total_column)?.unwrap_or(1),
            count_column: read_column(&c._count_column)?.unwrap_or(2),
            palette,
            default_mode,
        })
    }

    pub fn override_with(
        &mut self,
        sheet: Option<String>,
        first_row: Option<usize>,
        title: Option<String>,
    ) {
        if sheet.is_some() {
            self.sheet_name = sheet;
        }
        if let Some(r) = first_row {
            self.first_row = r.max(1);
        }
        if let Some(t) = title {
            self.title = t;
        }
    }
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct QuizSettings {
    pub sheet_name: Option<String>,
    pub first_row: usize,
    pub question_column: usize,
    pub answer_column: usize,
    pub notes_column: usize,
    pub layout: QuizLayout,
    pub output_directory: Option<String>,
}

impl QuizSettings {
    pub fn resolve(config: &Option<QuizConfig>) -> QuizResult<QuizSettings> {
        let c = config.clone().unwrap_or_default();
        let default_layout = QuizLayout::default_layout();
        let layout = QuizLayout {
            questions_per_topic: c
                .questions_per_topic
                .unwrap_or(default_layout.questions_per_topic),
            topics_per_deck: c.topics_per_deck.unwrap_or(default_layout.topics_per_deck),
            deck_prefix: c.deck_prefix.unwrap_or(default_layout.deck_prefix),
        };
        Ok(QuizSettings {
            sheet_name: c.sheet_name,
            first_row: read_row_index(&c._first_row_index)?.unwrap_or(2),
            question_column: read_column(&c._question_column)?.unwrap_or(0),
            answer_column: read_column(&c._answer_column)?.unwrap_or(1),
            notes_column: read_column(&c._notes_column)?.unwrap_or(2),
            layout,
            output_directory: c.output_directory,
        })
    }

    pub fn override_with(
        &mut self,
        sheet: Option<String>,
        first_row: Option<usize>,
        output_directory: Option<String>,
        deck_prefix: Option<String>,
    ) {
        if sheet.is_some() {
            self.sheet_name = sheet;
        }
        if let Some(r) = first_row {
            self.first_row = r.max(1);
        }
        if output_directory.is_some() {
            self.output_directory = output_directory;
        }
        if let Some(p) = deck_prefix {
            self.layout.deck_prefix = p;
        }
    }
}

pub fn read_config(path: &str) -> QuizResult<FileConfig> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let config: FileConfig = serde_json::from_str(&contents).context(ParsingJsonSnafu {})?;
    info!("read_config: {:?}", config);
    Ok(config)
}

// Columns are given either as Excel-style letters or as numbers starting at 1.
fn read_column(x: &Option<JSValue>) -> QuizResult<Option<usize>> {
    match x {
        None | Some(JSValue::Null) => Ok(None),
        Some(JSValue::Number(n)) => match n.as_u64() {
            Some(i) if i >= 1 => Ok(Some((i - 1) as usize)),
            _ => InvalidColumnSnafu {
                column: n.to_string(),
            }
            .fail(),
        },
        Some(JSValue::String(s)) => column_index(s).map(Some),
        Some(other) => InvalidColumnSnafu {
            column: other.to_string(),
        }
        .fail(),
    }
}

fn read_row_index(x: &Option<JSValue>) -> QuizResult<Option<usize>> {
    match x {
        None | Some(JSValue::Null) => Ok(None),
        Some(JSValue::Number(n)) => match n.as_u64() {
            Some(i) if i >= 1 => Ok(Some(i as usize)),
            _ => whatever!("firstRowIndex must be a number starting at 1, got {}", n),
        },
        Some(JSValue::String(s)) => match s.trim().parse::<usize>() {
            Ok(i) if i >= 1 => Ok(Some(i)),
            _ => whatever!("firstRowIndex must be a number starting at 1, got {:?}", s),
        },
        Some(other) => whatever!("firstRowIndex must be a number, got {}", other),
    }
}
