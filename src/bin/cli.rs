//! linedb CLI
//!
//! Command-line interface for reading and editing a linedb file.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use linedb::{Config, LineDb, SyncStrategy};
use tracing_subscriber::{fmt, EnvFilter};

/// linedb CLI
#[derive(Parser, Debug)]
#[command(name = "linedb")]
#[command(about = "Line-oriented record store backed by a plain text file")]
#[command(version)]
struct Args {
    /// Backing file
    #[arg(short, long)]
    file: PathBuf,

    /// Skip fsync on writes
    #[arg(long)]
    no_sync: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the number of records
    Len,

    /// Print a record by number
    Get {
        /// Record number (1-indexed)
        #[arg(allow_negative_numbers = true)]
        number: i64,
    },

    /// Print every record as "number<TAB>text"
    All,

    /// Print records containing a substring
    Grep {
        /// Substring to look for
        pattern: String,
    },

    /// Insert a record (number 0 appends)
    Insert {
        /// Position of the new record
        #[arg(allow_negative_numbers = true)]
        number: i64,

        /// Record text
        text: String,
    },

    /// Replace a record, printing the previous text
    Update {
        /// Record number (1-indexed)
        #[arg(allow_negative_numbers = true)]
        number: i64,

        /// New record text
        text: String,
    },

    /// Delete a record, printing its text
    Delete {
        /// Record number (1-indexed)
        #[arg(allow_negative_numbers = true)]
        number: i64,
    },
}

fn main() -> ExitCode {
    // Initialize tracing/logging; stdout is reserved for records
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let sync_strategy = if args.no_sync {
        SyncStrategy::Never
    } else {
        SyncStrategy::Always
    };
    let config = Config::builder().sync_strategy(sync_strategy).build();

    let mut db = match LineDb::open_with(&args.file, config) {
        Ok(db) => db,
        Err(e) => {
            tracing::error!("Failed to open database: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match run(&mut db, args.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.is_addressing() => {
            tracing::error!("{}", e);
            ExitCode::from(2)
        }
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(db: &mut LineDb, command: Commands) -> linedb::Result<()> {
    match command {
        Commands::Len => println!("{}", db.len()),
        Commands::Get { number } => println!("{}", db.record(number)?),
        Commands::All => {
            for (number, text) in db.iter() {
                println!("{}\t{}", number, text);
            }
        }
        Commands::Grep { pattern } => {
            for rec in db.select(|rec| rec.text.contains(&pattern)) {
                println!("{}\t{}", rec.number, rec.text);
            }
        }
        Commands::Insert { number, text } => db.insert(number, text)?,
        Commands::Update { number, text } => println!("{}", db.update(number, text)?),
        Commands::Delete { number } => println!("{}", db.delete(number)?),
    }

    Ok(())
}
