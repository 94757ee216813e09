// Terminal presenter for the leaderboard.

use std::io::BufRead;

use quiz_board::reveal::{PresenterEvent, PresenterState, ViewMode};

use crate::quiz::html::format_total;
use crate::quiz::*;

/// Reads an event out of a line typed by the presenter. An empty line moves forward.
pub fn parse_event(line: &str) -> Option<PresenterEvent> {
    match line.trim() {
        "" | "next" => Some(PresenterEvent::Advance),
        "back" => Some(PresenterEvent::Retreat),
        "reset" => Some(PresenterEvent::Reset),
        "all" => Some(PresenterEvent::ShowAll),
        "reveal" => Some(PresenterEvent::StartReveal),
        key => PresenterEvent::from_key(key),
    }
}

fn team_line(group: &RankGroup, team: &TeamRecord) -> String {
    let rank = if group.is_tied() {
        format!("={}.", group.rank)
    } else {
        format!("{}.", group.rank)
    };
    format!(
        "{:>5} {:<24} {:>7} ({})",
        rank,
        team.name,
        format_total(team.total),
        team.count
    )
}

/// The leaderboard as text, for the given state.
///
/// All at once: two columns. Reveal: a single column where hidden teams are blank lines.
pub fn render_text(board: &Leaderboard, state: &PresenterState) -> String {
    let visible = state.visible_groups();
    let mut lines: Vec<String> = Vec::new();
    for (idx, g) in board.groups.iter().enumerate() {
        for t in g.teams.iter() {
            if visible.contains(&idx) {
                lines.push(team_line(g, t));
            } else {
                lines.push("".to_string());
            }
        }
    }
    match state.mode {
        ViewMode::Reveal => lines.join("\n"),
        ViewMode::AllAtOnce => {
            let per_column = (lines.len() + 1) / 2;
            let (left, right) = lines.split_at(per_column);
            left.iter()
                .enumerate()
                .map(|(i, l)| match right.get(i) {
                    Some(r) => format!("{:<44}  {}", l, r).trim_end().to_string(),
                    None => l.clone(),
                })
                .collect::<Vec<String>>()
                .join("\n")
        }
    }
}

/// Runs the presenter until the input is exhausted or a 'q' line is read.
pub fn run_presenter<R: BufRead, W: Write>(
    board: &Leaderboard,
    mode: ViewMode,
    input: R,
    mut output: W,
) -> QuizResult<PresenterState> {
    let mut state = PresenterState::new(board.num_groups(), mode);
    writeln!(output, "{}\n", render_text(board, &state))
        .context(WritingOutputSnafu { path: "stdout" })?;
    for line_r in input.lines() {
        let line = line_r.context(ReadingInputSnafu {})?;
        if matches!(line.trim(), "q" | "quit") {
            break;
        }
        match parse_event(&line) {
            Some(event) => {
                state = state.apply(event);
                writeln!(output, "{}\n", render_text(board, &state))
                    .context(WritingOutputSnafu { path: "stdout" })?;
            }
            None => {
                warn!("run_presenter: unknown key {:?}", line.trim());
            }
        }
    }
    Ok(state)
}
