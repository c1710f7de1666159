//! CLI definition for the `backoffice` command.
//!
//! Only depends on `clap` and library types, so parsing can be tested
//! without touching the store.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Back-office tools: kanban boards and printable documents
#[derive(Parser, Debug)]
#[command(name = "backoffice")]
#[command(version)]
#[command(about = "Back-office tools: kanban boards and printable documents")]
pub struct Cli {
    /// Enable debug output to stderr
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Configuration file (defaults to ./backoffice.toml when present)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Override the data directory from configuration
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Override the document locale (pt-BR, en-US)
    #[arg(long, global = true)]
    pub locale: Option<String>,

    /// Name recorded in the activity log
    #[arg(long, global = true)]
    pub actor: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage boards
    Board {
        #[command(subcommand)]
        action: BoardAction,
    },
    /// Manage the columns of a board
    Column {
        #[command(subcommand)]
        action: ColumnAction,
    },
    /// Manage tasks
    Task {
        #[command(subcommand)]
        action: TaskAction,
    },
    /// Show the activity log, newest first
    Log {
        /// Maximum number of entries
        #[arg(short = 'n', long, default_value_t = 20)]
        limit: usize,
        /// Only entries for this board
        #[arg(long)]
        board: Option<String>,
    },
    /// Render a budget (quote) from a JSON file
    Budget {
        #[command(subcommand)]
        action: RenderAction,
    },
    /// Render an invoice from a JSON file
    Invoice {
        #[command(subcommand)]
        action: RenderAction,
    },
    /// Render a receipt from a JSON file
    Receipt {
        #[command(subcommand)]
        action: RenderAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum BoardAction {
    /// Create a board with the default To Do / Doing / Done columns
    Create {
        name: String,
        #[arg(long)]
        description: Option<String>,
        /// Column names to use instead of the defaults
        #[arg(long = "column", value_name = "NAME")]
        columns: Vec<String>,
    },
    /// List boards
    List,
    /// Delete a board and everything on it
    Delete { id: String },
}

#[derive(Subcommand, Debug)]
pub enum ColumnAction {
    /// Append a column to a board
    Add {
        board: String,
        name: String,
        #[arg(long)]
        color: Option<String>,
    },
    /// List the columns of a board in position order
    List { board: String },
}

#[derive(Subcommand, Debug)]
pub enum TaskAction {
    /// Add a task at the end of a column
    Add {
        board: String,
        column: String,
        title: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        assignee: Option<String>,
        /// low, medium or high
        #[arg(long)]
        priority: Option<String>,
        /// Due date as YYYY-MM-DD
        #[arg(long)]
        due: Option<String>,
    },
    /// List the tasks of a board grouped by column
    List {
        board: String,
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Move a task to another column
    Move {
        id: String,
        column: String,
        /// Explicit order in the target column; appends when omitted
        #[arg(long)]
        order: Option<u32>,
    },
    /// Delete a task
    Delete { id: String },
}

/// Task list filters; `all` disables a filter
#[derive(Args, Debug, Default)]
pub struct FilterArgs {
    /// Case-insensitive text in title or description
    #[arg(long, default_value = "")]
    pub search: String,
    #[arg(long, default_value = "all")]
    pub assignee: String,
    #[arg(long, default_value = "all")]
    pub priority: String,
}

#[derive(Subcommand, Debug)]
pub enum RenderAction {
    /// Validate the input and write a PDF
    Render {
        /// Document JSON
        input: PathBuf,
        /// Output path; defaults to the input path with a .pdf extension
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Print the fixed-width text transcript instead (receipts only)
        #[arg(long)]
        text: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_task_move() {
        let cli = Cli::try_parse_from(["backoffice", "task", "move", "t1", "c2", "--order", "3"]).unwrap();
        match cli.command {
            Commands::Task {
                action: TaskAction::Move { id, column, order },
            } => {
                assert_eq!(id, "t1");
                assert_eq!(column, "c2");
                assert_eq!(order, Some(3));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "backoffice",
            "budget",
            "render",
            "quote.json",
            "--locale",
            "en-US",
            "-d",
        ])
        .unwrap();
        assert!(cli.debug);
        assert_eq!(cli.locale.as_deref(), Some("en-US"));
    }

    #[test]
    fn test_filter_defaults() {
        let cli = Cli::try_parse_from(["backoffice", "task", "list", "b1"]).unwrap();
        let Commands::Task {
            action: TaskAction::List { filter, .. },
        } = cli.command
        else {
            panic!("expected task list");
        };
        assert_eq!(filter.search, "");
        assert_eq!(filter.assignee, "all");
        assert_eq!(filter.priority, "all");
    }
}
