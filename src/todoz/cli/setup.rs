use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format: "0.1.0" for releases, "0.1.0@abc1234 2024-01-15 14:30" for dev builds
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "todoz", bin_name = "todoz", version = get_version())]
#[command(about = "A small, ordered todo list for the command line", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory holding todos and config (defaults to $TODOZ_HOME, then the platform data dir)
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a todo at the end of the list
    #[command(alias = "a")]
    Add {
        /// Title words (joined with spaces)
        #[arg(required = true, num_args = 1..)]
        title: Vec<String>,

        /// Longer description
        #[arg(short, long, default_value = "")]
        description: String,
    },

    /// List todos
    #[command(alias = "ls")]
    List {
        /// all, active or completed (defaults to the configured filter)
        #[arg(short, long)]
        filter: Option<String>,
    },

    /// Change a todo's title (and optionally its description)
    #[command(alias = "e")]
    Edit {
        /// Position, id, or id prefix
        selector: String,

        /// New title words (joined with spaces)
        #[arg(required = true, num_args = 1..)]
        title: Vec<String>,

        /// New description (kept as is when omitted)
        #[arg(short, long)]
        description: Option<String>,
    },

    /// Toggle completion of one or more todos
    #[command(alias = "t")]
    Toggle {
        /// Positions, ids, or id prefixes
        #[arg(required = true, num_args = 1..)]
        selectors: Vec<String>,
    },

    /// Delete one or more todos
    #[command(alias = "rm")]
    Delete {
        /// Positions, ids, or id prefixes
        #[arg(required = true, num_args = 1..)]
        selectors: Vec<String>,
    },

    /// Move a todo into the slot of another one
    #[command(alias = "mv")]
    Move {
        /// The todo to move
        selector: String,

        /// The todo whose slot it takes
        #[arg(long, short)]
        before: String,
    },

    /// Remove all completed todos
    Clear,

    /// Mark every todo completed
    DoneAll,

    /// Get or set configuration
    Config {
        /// Configuration key (storage-key, default-filter)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}

/// Installs the stderr log subscriber. `TODOZ_LOG` overrides the level.
pub fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("TODOZ_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose { "todoz=debug,warn" } else { "warn" })
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .init();
}
