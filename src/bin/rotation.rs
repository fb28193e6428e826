//! Command-line front end for the table rotation.
//!
//! Every invocation opens the session from the state file, runs one
//! command, saves (when the command succeeded) and prints the board.
//! Set `RUST_LOG=debug` to see each engine mutation.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use table_rotation::{
    Codec, FileStorage, IdGenerator, Person, PersonId, RotationConfig, RotationEngine, Session,
    Slot,
};

/// Fair rotation for a shared table
#[derive(Parser)]
#[command(name = "rotation")]
#[command(about = "Queue and winner-stays rotation for a shared table", long_about = None)]
#[command(version)]
struct Cli {
    /// Snapshot file (defaults to the platform data directory)
    #[arg(long, env = "ROTATION_STATE")]
    state: Option<PathBuf>,

    /// Snapshot encoding (defaults to the file extension)
    #[arg(long, value_enum)]
    format: Option<Format>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Bincode,
}

impl From<Format> for Codec {
    fn from(format: Format) -> Self {
        match format {
            Format::Json => Codec::Json,
            Format::Bincode => Codec::Bincode,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Print the table and the line
    Show,

    /// Add someone to the end of the line
    Join { name: String },

    /// Seat players from the front of the line
    Start,

    /// Record the winner of the current match (1 or 2)
    Win {
        #[arg(value_parser = clap::value_parser!(u8).range(1..=2))]
        slot: u8,
    },

    /// Send both players to the end of the line
    ClearTable,

    /// Remove everyone waiting in line
    ClearQueue,

    /// Empty the table and the line
    ClearAll,

    /// Send one player (1 or 2) to the end of the line
    RemoveSeat {
        #[arg(value_parser = clap::value_parser!(u8).range(1..=2))]
        slot: u8,
    },

    /// Remove a waiting person by id
    RemoveId { id: String },

    /// Remove every waiting person with this name (case-insensitive)
    RemoveName { name: String },

    /// Remove the waiting person at a zero-based position
    RemoveIndex {
        #[arg(allow_negative_numbers = true)]
        index: i64,
    },

    /// Remove a person by id, whether seated or waiting
    Remove { id: String },

    /// Set the consecutive-win cap
    Cap { cap: u32 },
}

fn default_state_path() -> PathBuf {
    directories::ProjectDirs::from("", "", "table-rotation")
        .map(|dirs| dirs.data_dir().join("rotation.json"))
        .unwrap_or_else(|| PathBuf::from("rotation.json"))
}

fn run(session: &mut Session<FileStorage>, command: Command) -> Result<()> {
    match command {
        Command::Show => {}
        Command::Join { name } => {
            let person = session.join(&name)?;
            println!("{} joined the line.", person);
        }
        Command::Start => session.start_match()?,
        Command::Win { slot } => {
            let outcome = session.record_result(Slot::try_from(slot)?)?;
            if outcome.capped_out {
                println!(
                    "{} reached {} wins in a row; both players go to the line.",
                    outcome.winner, outcome.winner_streak
                );
            }
        }
        Command::ClearTable => {
            let moved = session.clear_table()?;
            println!("Sent {} player(s) to the line.", moved);
        }
        Command::ClearQueue => {
            let removed = session.clear_queue()?;
            println!("Removed {} from the line.", removed);
        }
        Command::ClearAll => session.clear_all()?,
        Command::RemoveSeat { slot } => {
            if !session.remove_from_table(Slot::try_from(slot)?)? {
                println!("Seat {} is already empty.", slot);
            }
        }
        Command::RemoveId { id } => {
            let id = PersonId::new(id.trim());
            if session.remove_by_id(&id)? {
                println!("Removed.");
            } else {
                println!("Id {} not found in the line.", id);
            }
        }
        Command::RemoveName { name } => {
            let removed = session.remove_by_name(&name)?;
            if removed > 0 {
                println!("Removed: {}", removed);
            } else {
                println!("Nobody found.");
            }
        }
        Command::RemoveIndex { index } => {
            if !session.remove_by_index(index)? {
                println!("No one at position {}.", index);
            }
        }
        Command::Remove { id } => {
            let person = Person::new(id.trim(), String::new());
            if !session.remove_person(&person)? {
                println!("Id {} not found.", person.id);
            }
        }
        Command::Cap { cap } => session.set_cap(cap)?,
    }
    Ok(())
}

fn render(engine: &RotationEngine) {
    println!("Table");
    for slot in Slot::ALL {
        match engine.seat(slot) {
            Some(person) => println!(
                "  {}: {}  (consecutive wins: {})",
                slot,
                person.name,
                engine.streak(&person.id)
            ),
            None => println!("  {}: {}", slot, engine.config().placeholder_name),
        }
    }

    println!("Line ({})", engine.queue_len());
    for (index, person) in engine.queue().iter().enumerate() {
        println!("  {}. {}  [{}]", index, person.name, person.id);
    }

    println!("Cap: {}", engine.cap());
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let path = cli.state.unwrap_or_else(default_state_path);
    let mut storage = FileStorage::new(&path);
    if let Some(format) = cli.format {
        storage = storage.with_codec(format.into());
    }

    let mut session = Session::open_with(storage, RotationConfig::default(), IdGenerator::default())
        .with_context(|| format!("failed to open {}", path.display()))?;

    let result = run(&mut session, cli.command);
    render(session.engine());
    result
}
