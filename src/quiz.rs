use log::{debug, info, warn};

use quiz_board::builder::Builder;
use quiz_board::reveal::ViewMode;
use quiz_board::topics::run_planning;
use quiz_board::*;
use snafu::{prelude::*, Snafu};

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::args::{Args, Command};
use crate::quiz::config_reader::*;
use crate::quiz::io_common::*;

pub mod config_reader;
pub mod html;
pub mod io_common;
pub mod io_csv;
pub mod io_excel;
pub mod present;
pub mod slides;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum QuizError {
    #[snafu(display("Error opening file {path}"))]
    OpeningSpreadsheet {
        source: calamine::Error,
        path: String,
    },
    #[snafu(display("Worksheet {sheet:?} not found in {path} (available: {available:?})"))]
    MissingSheet {
        path: String,
        sheet: String,
        available: Vec<String>,
    },
    #[snafu(display("The file {path} does not contain any worksheet"))]
    EmptyWorkbook { path: String },
    #[snafu(display("Error opening csv file {path}"))]
    CsvOpen { source: csv::Error, path: String },
    #[snafu(display("Error reading csv line {lineno}"))]
    CsvLineParse { source: csv::Error, lineno: usize },
    #[snafu(display("Unsupported input type for {path}"))]
    UnsupportedInput { path: String },
    #[snafu(display("No data found in {what}"))]
    EmptyData { what: String },
    #[snafu(display("Error opening file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing json"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Invalid column {column:?}: expected a letter (A, B, ..) or a number starting at 1"))]
    InvalidColumn { column: String },
    #[snafu(display("Error writing {path}"))]
    WritingOutput {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error reading the standard input"))]
    ReadingInput { source: std::io::Error },
    #[snafu(display("Error processing the data"))]
    Board { source: BoardErrors },
    #[snafu(display("Error rendering the leaderboard page"))]
    RenderingPage { source: askama::Error },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type QuizResult<T> = Result<T, QuizError>;

/// Reads the team records out of a source, following the column mapping of the settings.
pub fn read_teams(
    source: &mut dyn DataSource,
    settings: &LeaderboardSettings,
) -> QuizResult<Vec<TeamRecord>> {
    let rows = source.read_rows()?;
    let data = data_rows(&rows, settings.first_row);
    let mut builder = Builder::new();
    for row in data.iter() {
        let cells = [
            cell_at(row, settings.name_column),
            cell_at(row, settings.total_column),
            cell_at(row, settings.count_column),
        ];
        builder.add_row(&cells).context(BoardSnafu {})?;
    }
    info!(
        "read_teams: {} teams read from {}, {} empty rows skipped",
        builder.teams().len(),
        source.describe(),
        builder.skipped_rows()
    );
    if builder.teams().is_empty() {
        return EmptyDataSnafu {
            what: source.describe(),
        }
        .fail();
    }
    Ok(builder.teams().to_vec())
}

/// Reads the quiz rows (question, answer, notes) out of a source.
pub fn read_quiz_rows(
    source: &mut dyn DataSource,
    settings: &QuizSettings,
) -> QuizResult<Vec<QuizRow>> {
    let rows = source.read_rows()?;
    let data = data_rows(&rows, settings.first_row);
    let res: Vec<QuizRow> = data
        .iter()
        .map(|row| {
            QuizRow::new(
                &cell_at(row, settings.question_column).as_text(),
                &cell_at(row, settings.answer_column).as_text(),
                &cell_at(row, settings.notes_column).as_text(),
            )
        })
        .collect();
    debug!("read_quiz_rows: {} rows", res.len());
    if res.iter().all(|r| r.is_blank()) {
        return EmptyDataSnafu {
            what: source.describe(),
        }
        .fail();
    }
    Ok(res)
}

fn check_reference(board: &Leaderboard, reference_path: String) -> QuizResult<()> {
    let computed = serde_json::to_string_pretty(&html::leaderboard_to_json(board))
        .context(ParsingJsonSnafu {})?;
    let reference = read_reference(reference_path)?;
    let pretty_reference = serde_json::to_string_pretty(&reference).context(ParsingJsonSnafu {})?;
    if pretty_reference != computed {
        warn!("Found differences with the reference ranking");
        print_diff(pretty_reference.as_str(), computed.as_str(), "\n");
        whatever!("Difference detected between computed ranking and reference ranking")
    }
    info!("check_reference: ranking matches the reference");
    Ok(())
}

fn write_output(out: &str, contents: &str) -> QuizResult<()> {
    if out == "stdout" {
        let mut stdout = std::io::stdout();
        stdout
            .write_all(contents.as_bytes())
            .context(WritingOutputSnafu { path: out })?;
        return Ok(());
    }
    fs::write(out, contents).context(WritingOutputSnafu { path: out })?;
    info!("write_output: wrote {}", out);
    Ok(())
}

/// The location of the page: an empty value means the default location.
fn html_path(out: Option<String>, input: &str) -> String {
    match out {
        Some(o) if !o.trim().is_empty() => o,
        _ => default_html_path(input),
    }
}

fn default_html_path(input: &str) -> String {
    Path::new(input)
        .with_extension("html")
        .display()
        .to_string()
}

/// The directory of the input file, where the decks are created by default.
fn input_directory(input: &str) -> PathBuf {
    match Path::new(input).parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

fn parse_mode(mode: &Option<String>, default: ViewMode) -> QuizResult<ViewMode> {
    match mode {
        None => Ok(default),
        Some(m) => match ViewMode::from_name(m) {
            Some(vm) => Ok(vm),
            None => whatever!("Unknown mode {:?}: expected 'all' or 'reveal'", m),
        },
    }
}

pub fn run_leaderboard(
    settings: &LeaderboardSettings,
    input: &str,
    out: Option<String>,
    json_out: Option<String>,
    reference: Option<String>,
) -> QuizResult<()> {
    let mut source = io_common::open_source(input, settings.sheet_name.clone())?;
    let teams = read_teams(source.as_mut(), settings)?;
    let board = run_ranking(&teams).context(BoardSnafu {})?;
    for g in board.groups.iter() {
        let names: Vec<&str> = g.teams.iter().map(|t| t.name.as_str()).collect();
        info!("Rank {:>3}: {}", g.rank, names.join(", "));
    }

    if let Some(reference_path) = reference {
        check_reference(&board, reference_path)?;
    }

    if let Some(json_path) = json_out {
        let js = serde_json::to_string_pretty(&html::leaderboard_to_json(&board))
            .context(ParsingJsonSnafu {})?;
        write_output(&json_path, &js)?;
    }

    let page = html::render_leaderboard(&board, settings)?;
    let out_path = html_path(out, input);
    write_output(&out_path, &page)?;
    Ok(())
}

pub fn run_slides(
    settings: &QuizSettings,
    input: &str,
    dry_run: bool,
) -> QuizResult<Vec<String>> {
    let mut source = io_common::open_source(input, settings.sheet_name.clone())?;
    let rows = read_quiz_rows(source.as_mut(), settings)?;
    let decks = run_planning(&rows, &settings.layout).context(BoardSnafu {})?;
    for (idx, d) in decks.iter().enumerate() {
        info!(
            "Deck {}: {} ({} slides)",
            idx + 1,
            d.title,
            d.slides.len()
        );
    }
    if dry_run {
        for d in decks.iter() {
            println!("{}", d.title);
            for s in d.slides.iter() {
                println!("  {} | {}", s.title, s.body);
            }
        }
        return Ok(Vec::new());
    }

    let directory = match &settings.output_directory {
        Some(d) => PathBuf::from(d),
        None => input_directory(input),
    };
    let mut sink = slides::JsonDeckSink::new(directory);
    let created = slides::publish_decks(&decks, &mut sink)?;
    println!("Created {} presentation(s):", created.len());
    for c in created.iter() {
        println!("  {}", c);
    }
    Ok(created)
}

/// Entry point for all the commands.
pub fn run(args: &Args) -> QuizResult<()> {
    let file_config = match &args.config {
        Some(p) => read_config(p)?,
        None => FileConfig::default(),
    };
    debug!("run: file config: {:?}", file_config);
    let input = match &args.input {
        Some(i) => i.clone(),
        None => whatever!("No input file provided (use --input)"),
    };

    match &args.command {
        Command::Leaderboard {
            out,
            json,
            reference,
            title,
            mode,
        } => {
            let mut settings = LeaderboardSettings::resolve(&file_config.leaderboard)?;
            settings.override_with(args.sheet.clone(), args.first_row, title.clone());
            settings.default_mode = parse_mode(mode, settings.default_mode)?;
            run_leaderboard(&settings, &input, out.clone(), json.clone(), reference.clone())
        }
        Command::Slides {
            out,
            deck_prefix,
            dry_run,
        } => {
            let mut settings = QuizSettings::resolve(&file_config.quiz)?;
            settings.override_with(
                args.sheet.clone(),
                args.first_row,
                out.clone(),
                deck_prefix.clone(),
            );
            run_slides(&settings, &input, *dry_run).map(|_| ())
        }
        Command::Present { mode } => {
            let mut settings = LeaderboardSettings::resolve(&file_config.leaderboard)?;
            settings.override_with(args.sheet.clone(), args.first_row, None);
            let start_mode = parse_mode(mode, ViewMode::Reveal)?;
            let mut source = io_common::open_source(&input, settings.sheet_name.clone())?;
            let teams = read_teams(source.as_mut(), &settings)?;
            let board = run_ranking(&teams).context(BoardSnafu {})?;
            let stdin = std::io::stdin();
            let stdout = std::io::stdout();
            present::run_presenter(&board, start_mode, stdin.lock(), stdout.lock())?;
            Ok(())
        }
    }
}

/// Reads a reference ranking, as written by the --json option.
pub fn read_reference(path: String) -> QuizResult<JSValue> {
    let contents = fs::read_to_string(path.clone()).context(OpeningJsonSnafu { path })?;
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    Ok(js)
}
