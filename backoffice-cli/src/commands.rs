//! Command handlers.
//!
//! Board commands run through a [`BoardOperationProcessor`] over the file
//! store so every mutation lands in the activity log. Document commands read
//! a JSON input, fill the issuer from configuration when the input leaves it
//! empty, and write the rendered output.

use crate::cli::{BoardAction, Cli, ColumnAction, Commands, FilterArgs, RenderAction, TaskAction};
use crate::config::AppConfig;
use crate::output;
use anyhow::{anyhow, bail, Context};
use backoffice_board::board::{CreateBoard, DeleteBoard, ListBoards};
use backoffice_board::column::{AddColumn, ListColumns};
use backoffice_board::task::{AddTask, DeleteTask, ListTasks, MoveTask};
use backoffice_board::{
    BoardContext, BoardError, BoardId, BoardOperationProcessor, Execute, FileStore, Match, Operation,
    OperationProcessor, Priority, TaskFilter,
};
use backoffice_docs::{Budget, Company, Invoice, Locale, Printable, Receipt};
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// Actor recorded when neither the flag nor the configuration names one
pub const DEFAULT_ACTOR: &str = "cli";

/// Load configuration and apply the global flag overrides
pub fn resolve_config(cli: &Cli) -> anyhow::Result<AppConfig> {
    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(dir) = &cli.data_dir {
        config.data_dir = dir.clone();
    }
    if let Some(locale) = &cli.locale {
        config.locale = locale.parse::<Locale>().map_err(anyhow::Error::msg)?;
    }
    if let Some(actor) = &cli.actor {
        config.actor = Some(actor.clone());
    }
    Ok(config)
}

/// Run one command, writing human-readable output to `out`
pub async fn run(command: Commands, config: &AppConfig, out: &mut dyn Write) -> anyhow::Result<()> {
    match command {
        Commands::Board { action } => Boards::open(config).board(action, out).await,
        Commands::Column { action } => Boards::open(config).column(action, out).await,
        Commands::Task { action } => Boards::open(config).task(action, out).await,
        Commands::Log { limit, board } => Boards::open(config).log(limit, board, out).await,
        Commands::Budget { action } => render::<Budget>(action, config, out),
        Commands::Invoice { action } => render::<Invoice>(action, config, out),
        Commands::Receipt { action } => render::<Receipt>(action, config, out),
    }
}

// =========================================================================
// Boards
// =========================================================================

struct Boards {
    ctx: BoardContext,
    processor: BoardOperationProcessor,
}

impl Boards {
    fn open(config: &AppConfig) -> Self {
        let actor = config.actor.as_deref().unwrap_or(DEFAULT_ACTOR);
        Self {
            ctx: BoardContext::new(FileStore::new(config.data_dir.clone())),
            processor: BoardOperationProcessor::with_actor(actor),
        }
    }

    /// Run `operation`; store failures are logged in full and surfaced generically
    async fn process<T>(&self, operation: &T) -> anyhow::Result<Value>
    where
        T: Execute<BoardContext, BoardError> + Send + Sync,
    {
        self.processor
            .process(operation, &self.ctx)
            .await
            .map_err(|e| {
                error!(op = %operation.op_string(), error = %e, "command failed");
                anyhow!(e.user_message())
            })
    }

    async fn board(&self, action: BoardAction, out: &mut dyn Write) -> anyhow::Result<()> {
        match action {
            BoardAction::Create {
                name,
                description,
                columns,
            } => {
                let mut op = CreateBoard::new(name);
                if let Some(description) = description {
                    op = op.with_description(description);
                }
                if !columns.is_empty() {
                    op = op.with_columns(columns);
                }
                let board = self.process(&op).await?;
                writeln!(out, "Created board {}", board["id"].as_str().unwrap_or_default())?;
                writeln!(out, "{}", output::columns_table(&board)?)?;
            }
            BoardAction::List => {
                let boards = self.process(&ListBoards).await?;
                writeln!(out, "{}", output::boards_table(&boards)?)?;
            }
            BoardAction::Delete { id } => {
                let deleted = self.process(&DeleteBoard::new(id.as_str())).await?;
                writeln!(
                    out,
                    "Deleted board {} ({} columns, {} tasks)",
                    id, deleted["columns_deleted"], deleted["tasks_deleted"]
                )?;
            }
        }
        Ok(())
    }

    async fn column(&self, action: ColumnAction, out: &mut dyn Write) -> anyhow::Result<()> {
        match action {
            ColumnAction::Add { board, name, color } => {
                let mut op = AddColumn::new(board.as_str(), name);
                if let Some(color) = color {
                    op = op.with_color(color);
                }
                let column = self.process(&op).await?;
                writeln!(
                    out,
                    "Added column {} at position {}",
                    column["id"].as_str().unwrap_or_default(),
                    column["position"]
                )?;
            }
            ColumnAction::List { board } => {
                let columns = self.process(&ListColumns::new(board.as_str())).await?;
                writeln!(out, "{}", output::columns_table(&columns)?)?;
            }
        }
        Ok(())
    }

    async fn task(&self, action: TaskAction, out: &mut dyn Write) -> anyhow::Result<()> {
        match action {
            TaskAction::Add {
                board,
                column,
                title,
                description,
                assignee,
                priority,
                due,
            } => {
                let mut op = AddTask::new(board.as_str(), column.as_str(), title);
                if let Some(description) = description {
                    op = op.with_description(description);
                }
                if let Some(assignee) = assignee {
                    op = op.with_assignee(assignee);
                }
                if let Some(priority) = priority {
                    op = op.with_priority(parse_priority(&priority)?);
                }
                if let Some(due) = due {
                    op = op.with_due_date(parse_date(&due)?);
                }
                let task = self.process(&op).await?;
                writeln!(
                    out,
                    "Added task {} at order {}",
                    task["id"].as_str().unwrap_or_default(),
                    task["order"]
                )?;
            }
            TaskAction::List { board, filter } => {
                let op = ListTasks::new(board.as_str()).with_filter(parse_filter(&filter)?);
                let tasks = self.process(&op).await?;
                writeln!(out, "{}", output::tasks_table(&tasks)?)?;
            }
            TaskAction::Move { id, column, order } => {
                let mut op = MoveTask::to_column(id.as_str(), column.as_str());
                if let Some(order) = order {
                    op = op.with_order(order);
                }
                let task = self.process(&op).await?;
                writeln!(out, "Task {} is at order {}", id, task["order"])?;
            }
            TaskAction::Delete { id } => {
                self.process(&DeleteTask::new(id.as_str())).await?;
                writeln!(out, "Deleted task {}", id)?;
            }
        }
        Ok(())
    }

    async fn log(
        &self,
        limit: usize,
        board: Option<String>,
        out: &mut dyn Write,
    ) -> anyhow::Result<()> {
        let window = if board.is_some() { None } else { Some(limit) };
        let mut entries = self.ctx.read_activity(window).await.map_err(|e| {
            error!(error = %e, "failed to read activity log");
            anyhow!(e.user_message())
        })?;
        if let Some(board) = board {
            let board = BoardId::from_string(board);
            entries.retain(|e| e.concerns(&board));
            entries.truncate(limit);
        }
        writeln!(out, "{}", output::activity_table(&entries))?;
        Ok(())
    }
}

fn parse_priority(input: &str) -> anyhow::Result<Priority> {
    input.parse().map_err(anyhow::Error::msg)
}

fn parse_date(input: &str) -> anyhow::Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .with_context(|| format!("invalid date '{}', expected YYYY-MM-DD", input))
}

fn parse_filter(args: &FilterArgs) -> anyhow::Result<TaskFilter> {
    Ok(TaskFilter {
        search: args.search.clone(),
        assignee: Match::parse(&args.assignee).map_err(|e| anyhow!("{}", e))?,
        priority: Match::parse(&args.priority).map_err(anyhow::Error::msg)?,
    })
}

// =========================================================================
// Documents
// =========================================================================

/// Documents the CLI can render
trait CliDocument: Printable + DeserializeOwned {
    fn company_mut(&mut self) -> &mut Company;

    /// Fixed-width text form, when the document has one
    fn transcript(&self, _locale: Locale) -> Option<String> {
        None
    }
}

impl CliDocument for Budget {
    fn company_mut(&mut self) -> &mut Company {
        &mut self.company
    }
}

impl CliDocument for Invoice {
    fn company_mut(&mut self) -> &mut Company {
        &mut self.company
    }
}

impl CliDocument for Receipt {
    fn company_mut(&mut self) -> &mut Company {
        &mut self.company
    }

    fn transcript(&self, locale: Locale) -> Option<String> {
        Some(Receipt::transcript(self, locale))
    }
}

fn read_input<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("failed to parse {}", path.display()))
}

fn render<T: CliDocument>(action: RenderAction, config: &AppConfig, out: &mut dyn Write) -> anyhow::Result<()> {
    let RenderAction::Render {
        input,
        output,
        text,
    } = action;

    let mut document: T = read_input(&input)?;
    if document.company_mut().name.trim().is_empty() {
        *document.company_mut() = config.company.clone();
    }
    let locale = config.locale;

    if text {
        document.validate()?;
        let Some(transcript) = document.transcript(locale) else {
            bail!("--text is only available for receipts");
        };
        match output {
            Some(path) => std::fs::write(&path, transcript)
                .with_context(|| format!("failed to write {}", path.display()))?,
            None => write!(out, "{}", transcript)?,
        }
        return Ok(());
    }

    let bytes = document.render_pdf(&config.layout, locale)?;
    let path = output.unwrap_or_else(|| default_output(&input));
    std::fs::write(&path, &bytes).with_context(|| format!("failed to write {}", path.display()))?;
    info!(path = %path.display(), bytes = bytes.len(), "document written");
    writeln!(out, "Wrote {}", path.display())?;
    Ok(())
}

/// `quote.json` becomes `quote.pdf` next to it
fn default_output(input: &Path) -> PathBuf {
    input.with_extension("pdf")
}
