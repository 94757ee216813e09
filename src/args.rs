use clap::{Parser, Subcommand};

/// This program builds quiz slide decks and presentable leaderboards out of spreadsheets.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) A JSON configuration file. The other flags override its values.
    /// See the manual of the quiz_board crate for the format.
    #[clap(short, long, value_parser, global = true)]
    pub config: Option<String>,

    /// (file path) The spreadsheet to read. Excel (xlsx, xls), OpenDocument (ods) and csv files
    /// are supported.
    #[clap(short, long, value_parser, global = true)]
    pub input: Option<String>,

    /// (default: first sheet) The name of the worksheet to read. Ignored for csv files.
    #[clap(long, value_parser, global = true)]
    pub sheet: Option<String>,

    /// (default 2) The first row containing data, starting at 1. Rows before it are headers.
    #[clap(long, value_parser, global = true)]
    pub first_row: Option<usize>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false, global = true)]
    pub verbose: bool,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Ranks the teams and writes the leaderboard as a standalone HTML page.
    Leaderboard {
        /// (file path, 'stdout' or empty) Where to write the HTML page. By default, next to the
        /// input with the .html extension.
        #[clap(short, long, value_parser)]
        out: Option<String>,

        /// (file path, optional) Also writes the rank groups in JSON format to this location.
        #[clap(long, value_parser)]
        json: Option<String>,

        /// (file path) A reference file containing the expected rank groups in JSON format.
        /// If provided, the ranking will be checked against it.
        #[clap(short, long, value_parser)]
        reference: Option<String>,

        /// The title displayed above the leaderboard.
        #[clap(long, value_parser)]
        title: Option<String>,

        /// (all or reveal) The mode the page opens in.
        #[clap(long, value_parser)]
        mode: Option<String>,
    },
    /// Reads the quiz questions and writes one deck of slides per pair of topics.
    Slides {
        /// (directory) Where to create the decks. By default, the directory of the input.
        #[clap(short, long, value_parser)]
        out: Option<String>,

        /// The text in front of every deck title.
        #[clap(long, value_parser)]
        deck_prefix: Option<String>,

        /// Only prints the planned decks without writing them.
        #[clap(long, takes_value = false)]
        dry_run: bool,
    },
    /// Presents the leaderboard in the terminal. Reads one key per line from the standard input
    /// (n: next, b: back, r: reset, a: all, s: reveal, q: quit).
    Present {
        /// (all or reveal) The starting mode.
        #[clap(long, value_parser)]
        mode: Option<String>,
    },
}
