//! Knot CLI - command-line interface for the Knot object store.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

/// Knot - minimal content-addressable version control
#[derive(Parser, Debug)]
#[command(name = "knot")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Initialize a new repository
    Init {
        /// Path to initialize (default: current directory)
        path: Option<String>,
    },

    /// Compute an object id, optionally storing the object
    HashObject {
        /// Store the object instead of only hashing it
        #[arg(short, long)]
        write: bool,
        /// Object type
        #[arg(short = 't', long = "type", default_value = "blob")]
        kind: String,
        /// File holding the object body
        file: PathBuf,
    },

    /// Print the body of a stored object
    CatFile {
        /// Expected object type
        kind: String,
        /// Object id (64 hex characters)
        id: String,
    },

    /// Show version information
    Version,
}

fn main() {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let result = match cli.command {
        Commands::Init { path } => commands::init(path.as_deref()),
        Commands::HashObject { write, kind, file } => commands::hash_object(&file, &kind, write),
        Commands::CatFile { kind, id } => commands::cat_file(&kind, &id),
        Commands::Version => {
            println!("knot {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
