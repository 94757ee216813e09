pub use crate::config::*;

/// A builder for collecting teams before ranking them.
///
/// ```
/// pub use quiz_board::builder::Builder;
/// # use quiz_board::BoardErrors;
///
/// let mut builder = Builder::new();
/// builder.add_team("Owls", 42.0, 4)?;
/// builder.add_team("Cats", 42.0, 3)?;
///
/// let board = builder.build()?;
/// assert_eq!(board.groups[0].teams[0].name, "Cats");
///
/// # Ok::<(), BoardErrors>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Builder {
    pub(crate) _teams: Vec<TeamRecord>,
    pub(crate) _skipped_rows: usize,
}

impl Builder {
    pub fn new() -> Builder {
        Builder {
            _teams: Vec::new(),
            _skipped_rows: 0,
        }
    }

    /// Adds a team with already known values.
    pub fn add_team(&mut self, name: &str, total: f64, count: u32) -> Result<(), BoardErrors> {
        self.add_record(&TeamRecord::new(name, total, count))
    }

    /// Adds a row of cells, read as (name, total, count).
    ///
    /// Missing cells are treated as empty. Rows where all three values are empty are skipped.
    pub fn add_row(&mut self, cells: &[Cell]) -> Result<(), BoardErrors> {
        let get = |idx: usize| cells.get(idx).cloned().unwrap_or(Cell::Empty);
        match TeamRecord::from_cells(&get(0), &get(1), &get(2)) {
            Some(record) => self.add_record(&record),
            None => {
                self._skipped_rows += 1;
                Ok(())
            }
        }
    }

    pub fn add_record(&mut self, record: &TeamRecord) -> Result<(), BoardErrors> {
        let total = if record.total.is_finite() {
            record.total
        } else {
            0.0
        };
        self._teams.push(TeamRecord {
            name: record.name.clone(),
            total,
            count: record.count,
        });
        Ok(())
    }

    pub fn teams(&self) -> &[TeamRecord] {
        &self._teams
    }

    pub fn skipped_rows(&self) -> usize {
        self._skipped_rows
    }

    /// Ranks the teams collected so far.
    pub fn build(&self) -> Result<Leaderboard, BoardErrors> {
        crate::run_ranking(&self._teams)
    }
}
