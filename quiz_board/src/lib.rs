pub mod builder;
mod config;
pub mod manual;
pub mod reveal;
pub mod topics;

use log::{debug, info, warn};

use std::cmp::Ordering;

pub use crate::config::*;

// **** Ranking ****

/// The ordering of the leaderboard: higher totals first, then fewer people first.
///
/// This is a total order over the records (totals are compared with `f64::total_cmp`,
/// the readers never produce NaN values). A total of -0 is the same as 0.
pub fn compare_teams(a: &TeamRecord, b: &TeamRecord) -> Ordering {
    let (ta, tb) = (a.total + 0.0, b.total + 0.0);
    tb.total_cmp(&ta).then_with(|| a.count.cmp(&b.count))
}

// Two records are tied when they cannot be distinguished by the ordering.
fn is_tied(a: &TeamRecord, b: &TeamRecord) -> bool {
    compare_teams(a, b) == Ordering::Equal
}

/// Sorts the teams and groups the tied ones into rank groups.
///
/// Teams are tied only when both their total and their count are equal.
/// The rank of a group is one more than the number of teams above it, so that
/// ranks skip ahead after a tie (1, 1, 3, ...).
///
/// ```
/// use quiz_board::{rank_teams, TeamRecord};
///
/// let board = rank_teams(&[
///     TeamRecord::new("A", 92.0, 3),
///     TeamRecord::new("F", 92.0, 3),
///     TeamRecord::new("C", 78.0, 5),
/// ]);
/// assert_eq!(board.groups.len(), 2);
/// assert_eq!(board.groups[1].rank, 3);
/// ```
pub fn rank_teams(teams: &[TeamRecord]) -> Leaderboard {
    info!("rank_teams: processing {:?} teams", teams.len());
    let mut sorted: Vec<TeamRecord> = teams.to_vec();
    // The sort is stable: tied teams keep their input order.
    sorted.sort_by(compare_teams);

    let mut groups: Vec<RankGroup> = Vec::new();
    let mut num_above: u32 = 0;
    for team in sorted {
        match groups.last_mut() {
            Some(current) if is_tied(&current.teams[0], &team) => {
                debug!(
                    "rank_teams: {:?} tied with {:?} at rank {}",
                    team.name, current.teams[0].name, current.rank
                );
                current.teams.push(team);
            }
            _ => {
                let rank = num_above + 1;
                debug!("rank_teams: new group at rank {} for {:?}", rank, team.name);
                groups.push(RankGroup {
                    rank,
                    teams: vec![team],
                });
            }
        }
        num_above += 1;
    }

    info!(
        "rank_teams: {} teams in {} rank groups",
        num_above,
        groups.len()
    );
    Leaderboard { groups }
}

/// Same as `rank_teams`, but refuses an empty leaderboard.
pub fn run_ranking(teams: &[TeamRecord]) -> Result<Leaderboard, BoardErrors> {
    if teams.is_empty() {
        return Err(BoardErrors::EmptyLeaderboard);
    }
    Ok(rank_teams(teams))
}

impl TeamRecord {
    /// Builds a record out of the (name, total, count) cells of a row.
    ///
    /// Returns None when all three cells are empty. Totals and counts that are not numbers
    /// are read as 0.
    pub fn from_cells(name: &Cell, total: &Cell, count: &Cell) -> Option<TeamRecord> {
        if name.is_empty() && total.is_empty() && count.is_empty() {
            return None;
        }
        let team_name = name.as_text();
        if !total.is_empty() && total.to_number().is_none() {
            warn!(
                "from_cells: team {:?}: total {:?} is not a number, using 0",
                team_name, total
            );
        }
        let count_num = count.as_number();
        let people = if count_num > 0.0 {
            count_num.trunc().min(u32::MAX as f64) as u32
        } else {
            0
        };
        Some(TeamRecord {
            name: team_name,
            total: total.as_number(),
            count: people,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn names(board: &Leaderboard) -> Vec<Vec<String>> {
        board
            .groups
            .iter()
            .map(|g| g.teams.iter().map(|t| t.name.clone()).collect())
            .collect()
    }

    fn ranks(board: &Leaderboard) -> Vec<u32> {
        board.groups.iter().map(|g| g.rank).collect()
    }

    #[test]
    fn empty_input() {
        init();
        let board = rank_teams(&[]);
        assert!(board.groups.is_empty());
        assert_eq!(run_ranking(&[]), Err(BoardErrors::EmptyLeaderboard));
    }

    #[test]
    fn single_team() {
        init();
        let board = rank_teams(&[TeamRecord::new("A", 10.0, 2)]);
        assert_eq!(ranks(&board), vec![1]);
        assert_eq!(board.groups[0].size(), 1);
    }

    #[test]
    fn all_tied() {
        init();
        let board = rank_teams(&[
            TeamRecord::new("A", 10.0, 2),
            TeamRecord::new("B", 10.0, 2),
            TeamRecord::new("C", 10.0, 2),
        ]);
        assert_eq!(ranks(&board), vec![1]);
        assert_eq!(names(&board), vec![vec!["A", "B", "C"]]);
    }

    #[test]
    fn sort_by_total_then_count() {
        init();
        let board = rank_teams(&[
            TeamRecord::new("A", 85.0, 4),
            TeamRecord::new("B", 92.0, 3),
            TeamRecord::new("C", 78.0, 5),
            TeamRecord::new("D", 92.0, 4),
            TeamRecord::new("E", 65.0, 3),
        ]);
        assert_eq!(
            names(&board),
            vec![vec!["B"], vec!["D"], vec!["A"], vec!["C"], vec!["E"]]
        );
        assert_eq!(ranks(&board), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn equal_total_different_count_is_not_a_tie() {
        init();
        let board = rank_teams(&[TeamRecord::new("B", 85.0, 4), TeamRecord::new("A", 85.0, 2)]);
        assert_eq!(names(&board), vec![vec!["A"], vec!["B"]]);
        assert_eq!(ranks(&board), vec![1, 2]);
    }

    #[test]
    fn ranks_skip_after_tie() {
        init();
        let board = rank_teams(&[
            TeamRecord::new("C", 50.0, 3),
            TeamRecord::new("A", 92.0, 3),
            TeamRecord::new("F", 92.0, 3),
            TeamRecord::new("G", 40.0, 1),
            TeamRecord::new("H", 40.0, 1),
            TeamRecord::new("I", 10.0, 1),
        ]);
        assert_eq!(
            names(&board),
            vec![vec!["A", "F"], vec!["C"], vec!["G", "H"], vec!["I"]]
        );
        assert_eq!(ranks(&board), vec![1, 3, 4, 6]);
    }

    #[test]
    fn rank_is_one_plus_teams_above() {
        init();
        let teams: Vec<TeamRecord> = (0..20)
            .map(|i| TeamRecord::new(&format!("T{}", i), ((i * 7) % 5) as f64, (i % 3) as u32))
            .collect();
        let board = rank_teams(&teams);
        let mut above = 0;
        for g in board.groups.iter() {
            assert_eq!(g.rank as usize, above + 1);
            above += g.size();
        }
        assert_eq!(board.num_teams(), 20);
    }

    #[test]
    fn ordering_invariant_holds() {
        init();
        let teams: Vec<TeamRecord> = (0..30)
            .map(|i| TeamRecord::new(&format!("T{}", i), ((i * 13) % 7) as f64, ((i * 5) % 4) as u32))
            .collect();
        let flat = rank_teams(&teams).flatten();
        for w in flat.windows(2) {
            assert!(
                w[0].total > w[1].total || (w[0].total == w[1].total && w[0].count <= w[1].count),
                "{:?} before {:?}",
                w[0],
                w[1]
            );
        }
    }

    #[test]
    fn grouping_is_idempotent() {
        init();
        let teams = vec![
            TeamRecord::new("A", 3.0, 1),
            TeamRecord::new("B", 5.0, 2),
            TeamRecord::new("C", 3.0, 1),
            TeamRecord::new("D", 5.0, 1),
            TeamRecord::new("E", 0.0, 0),
        ];
        let board = rank_teams(&teams);
        let again = rank_teams(&board.flatten());
        assert_eq!(board, again);
    }

    #[test]
    fn from_cells_skips_empty_rows() {
        init();
        assert_eq!(
            TeamRecord::from_cells(&Cell::Empty, &Cell::Text(" ".to_string()), &Cell::Empty),
            None
        );
    }

    #[test]
    fn from_cells_coerces_numbers() {
        init();
        let t = TeamRecord::from_cells(
            &Cell::Text("Owls".to_string()),
            &Cell::Text("n/a".to_string()),
            &Cell::Number(4.7),
        );
        assert_eq!(t, Some(TeamRecord::new("Owls", 0.0, 4)));
        let t2 = TeamRecord::from_cells(
            &Cell::Text("Cats".to_string()),
            &Cell::Text("12,5".to_string()),
            &Cell::Text("-3".to_string()),
        );
        assert_eq!(t2, Some(TeamRecord::new("Cats", 12.5, 0)));
    }

    #[test]
    fn negative_zero_ties_with_zero() {
        init();
        let t = TeamRecord::from_cells(
            &Cell::Text("Owls".to_string()),
            &Cell::Text("-0".to_string()),
            &Cell::Number(3.0),
        )
        .unwrap();
        assert!(t.total.is_sign_positive());
        let board = rank_teams(&[
            TeamRecord::new("A", 0.0, 3),
            TeamRecord::new("B", -0.0, 3),
            t,
        ]);
        assert_eq!(board.groups.len(), 1);
        assert_eq!(board.groups[0].rank, 1);
        assert_eq!(names(&board), vec![vec!["A", "B", "Owls"]]);
    }
}
