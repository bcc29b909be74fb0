//! Scoring session driven by text commands.
//!
//! The session owns the grid and is the only code that mutates it. User
//! loads run on a worker thread and come back through the main queue.

use std::fs;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::MutexGuard;
use std::time::Duration;

use anyhow::{Context, Result, anyhow, bail};
use tracing::{debug, warn};
use wonders_core::grid::PLAYER_SLOTS;
use wonders_core::grid::input::validate_score;
use wonders_core::{
    CellRole, Dispatcher, InputKind, LoadSequence, MainQueue, ScoreGrid, ScoreType,
    SharedUserStore, Standings, UserBackend, UserStore, format_grid_console,
    format_standings_console, load_then_assign,
};

use crate::cli::ExportFormat;

const HELP: &str = "\
Commands:
  show                              print the grid
  name <slot> <name>                set a player name (slots 1-7)
  score <category> <slot> <value>   enter a score
  select [name ...]                 load players and fill the name row
  inspect <category> [slot]         describe a cell (no slot: the icon cell)
  users                             list known players
  standings                         rank the players
  export <json|tsv> [file]          export the standings
  help                              show this text
  quit                              end the session

Categories: army, coins, wonders, blue, yellow, purple, green";

/// One parsed session line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Show,
    Name {
        player: usize,
        text: String,
    },
    Score {
        category: ScoreType,
        player: usize,
        value: String,
    },
    Select(Vec<String>),
    Inspect {
        category: ScoreType,
        player: Option<usize>,
    },
    Users,
    Standings,
    Export {
        format: ExportFormat,
        path: Option<PathBuf>,
    },
    Help,
    Quit,
}

impl SessionCommand {
    /// Parse a line. Blank lines and `#` comments yield `None`.
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };
        let mut words = rest.split_whitespace();

        let command = match verb.to_ascii_lowercase().as_str() {
            "show" => Self::Show,
            "name" => {
                let (slot, text) = rest
                    .split_once(char::is_whitespace)
                    .ok_or_else(|| anyhow!("usage: name <slot> <name>"))?;
                Self::Name {
                    player: parse_slot(slot)?,
                    text: text.trim().to_string(),
                }
            }
            "score" => {
                let (Some(category), Some(slot), Some(value), None) =
                    (words.next(), words.next(), words.next(), words.next())
                else {
                    bail!("usage: score <category> <slot> <value>");
                };
                let category = ScoreType::parse(category)?;
                if !category.is_scoring() {
                    bail!("{} does not take scores", category);
                }
                Self::Score {
                    category,
                    player: parse_slot(slot)?,
                    value: value.to_string(),
                }
            }
            "select" => Self::Select(words.map(str::to_string).collect()),
            "inspect" => {
                let (Some(category), slot, None) = (words.next(), words.next(), words.next())
                else {
                    bail!("usage: inspect <category> [slot]");
                };
                Self::Inspect {
                    category: ScoreType::parse(category)?,
                    player: slot.map(parse_slot).transpose()?,
                }
            }
            "users" => Self::Users,
            "standings" => Self::Standings,
            "export" => {
                let format = match words.next() {
                    Some(format) if format.eq_ignore_ascii_case("json") => ExportFormat::Json,
                    Some(format) if format.eq_ignore_ascii_case("tsv") => ExportFormat::Tsv,
                    _ => bail!("usage: export <json|tsv> [file]"),
                };
                Self::Export {
                    format,
                    path: words.next().map(PathBuf::from),
                }
            }
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            other => bail!("unknown command: {}", other),
        };

        Ok(Some(command))
    }
}

/// Parse a 1-based slot number into a 0-based player slot.
fn parse_slot(text: &str) -> Result<usize> {
    let slot: usize = text
        .parse()
        .with_context(|| format!("invalid slot: {}", text))?;
    if !(1..=PLAYER_SLOTS).contains(&slot) {
        bail!("slot must be between 1 and {}", PLAYER_SLOTS);
    }
    Ok(slot - 1)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Session<B> {
    grid: ScoreGrid,
    store: SharedUserStore<B>,
    queue: MainQueue,
    dispatcher: Dispatcher,
    loads: LoadSequence,
    color: bool,
    load_timeout: Duration,
}

impl<B: UserBackend + Send + 'static> Session<B> {
    pub fn new(store: UserStore<B>, color: bool, load_timeout: Duration) -> Self {
        let (queue, dispatcher) = MainQueue::new();
        Self {
            grid: ScoreGrid::new(),
            store: store.into_shared(),
            queue,
            dispatcher,
            loads: LoadSequence::new(),
            color,
            load_timeout,
        }
    }

    pub fn grid(&self) -> &ScoreGrid {
        &self.grid
    }

    /// Read commands until `quit` or end of input. Errors in a line are
    /// reported and the session continues.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut out: W, prompt: bool) -> Result<()> {
        if prompt {
            write!(out, "> ")?;
            out.flush()?;
        }

        for line in input.lines() {
            let line = line?;
            let flow = match SessionCommand::parse(&line) {
                Ok(Some(command)) => self.execute(command, &mut out),
                Ok(None) => Ok(Flow::Continue),
                Err(e) => Err(e),
            };

            match flow {
                Ok(Flow::Quit) => break,
                Ok(Flow::Continue) => {}
                Err(e) => writeln!(out, "error: {:#}", e)?,
            }

            if prompt {
                write!(out, "> ")?;
                out.flush()?;
            }
        }

        // Pick up a load that landed after the last command
        self.queue.run_pending(&mut self.grid);
        Ok(())
    }

    pub fn execute<W: Write>(&mut self, command: SessionCommand, out: &mut W) -> Result<Flow> {
        debug!("Executing {:?}", command);

        match command {
            SessionCommand::Show => {
                self.queue.run_pending(&mut self.grid);
                write!(out, "{}", format_grid_console(&self.grid, self.color))?;
            }
            SessionCommand::Name { player, text } => {
                let index = self.grid.index_of(ScoreType::People, player)?;
                let mut store = lock_store(&self.store)?;
                // Merge the stored list first so the write keeps existing players
                store.load_users();
                self.grid.set_name(index, &text, &mut *store)?;
            }
            SessionCommand::Score {
                category,
                player,
                value,
            } => {
                let score = match validate_score(&value) {
                    Ok(score) => score,
                    Err(_) => {
                        writeln!(out, "Please enter a valid score")?;
                        return Ok(Flow::Continue);
                    }
                };
                let index = self.grid.index_of(category, player)?;
                self.grid.apply_score(index, score)?;
                writeln!(
                    out,
                    "Player {} total: {}",
                    player + 1,
                    self.grid.total_text(player)?
                )?;
            }
            SessionCommand::Select(names) => {
                let id = load_then_assign(
                    self.store.clone(),
                    names,
                    self.dispatcher.clone(),
                    &self.loads,
                );
                let loads = self.loads.clone();
                let landed = self
                    .queue
                    .run_until(&mut self.grid, self.load_timeout, || loads.is_applied(id))?;
                if !landed {
                    warn!("User load did not finish within {:?}", self.load_timeout);
                    writeln!(out, "User list is still loading")?;
                    return Ok(Flow::Continue);
                }
                let assigned: Vec<&str> = self
                    .grid
                    .players()
                    .map(|(_, name)| name)
                    .filter(|name| !name.is_empty())
                    .collect();
                writeln!(out, "Players: {}", assigned.join(", "))?;
            }
            SessionCommand::Inspect { category, player } => {
                let index = match player {
                    Some(player) => self.grid.index_of(category, player)?,
                    None => category.offset(),
                };
                write_cell_details(&self.grid, index, out)?;
            }
            SessionCommand::Users => {
                let users = lock_store(&self.store)?.load_users();
                if users.is_empty() {
                    writeln!(out, "No users")?;
                }
                for user in users {
                    writeln!(out, "{}", user)?;
                }
            }
            SessionCommand::Standings => {
                let standings = Standings::from_grid(&self.grid);
                write!(out, "{}", format_standings_console(&standings, self.color))?;
            }
            SessionCommand::Export { format, path } => {
                let standings = Standings::from_grid(&self.grid);
                let content = match format {
                    ExportFormat::Json => standings.to_json()?,
                    ExportFormat::Tsv => standings.to_tsv(),
                };
                match path {
                    Some(path) => {
                        fs::write(&path, content)
                            .with_context(|| format!("Failed to write {}", path.display()))?;
                        writeln!(out, "Exported standings to {}", path.display())?;
                    }
                    None => writeln!(out, "{}", content.trim_end())?,
                }
            }
            SessionCommand::Help => writeln!(out, "{}", HELP)?,
            SessionCommand::Quit => return Ok(Flow::Quit),
        }

        Ok(Flow::Continue)
    }
}

fn write_cell_details<W: Write>(grid: &ScoreGrid, index: usize, out: &mut W) -> Result<()> {
    let cell = grid.cell(index)?;
    let role = cell.role();
    let category = cell.category();

    match role {
        CellRole::Image { category } => writeln!(out, "cell {}: {} icon", index, category)?,
        CellRole::Name { text } | CellRole::Score { text } | CellRole::Total { text } => {
            writeln!(out, "cell {}: {} {:?}", index, cell.kind(), text)?
        }
    }
    writeln!(
        out,
        "  category: {} ({}), color {}, icon {}",
        category,
        category.label(),
        category.color_code(),
        category.icon().unwrap_or("-")
    )?;

    if role.is_editable() {
        let input = match role.input_kind() {
            InputKind::Numeric => "numeric",
            InputKind::Name => "name",
            InputKind::None => "none",
        };
        writeln!(out, "  editable, {} input: {}", input, role.prompt())?;
    } else {
        writeln!(out, "  read-only")?;
    }
    Ok(())
}

fn lock_store<B>(store: &SharedUserStore<B>) -> Result<MutexGuard<'_, UserStore<B>>> {
    store
        .lock()
        .map_err(|_| anyhow!("user store lock poisoned"))
}
