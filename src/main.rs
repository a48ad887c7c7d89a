use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use decalc::{Calculator, Settings, logging};

#[derive(Parser)]
#[command(name = "decalc")]
#[command(about = "Exact-decimal calculator with persistent, undoable history")]
struct Cli {
    /// Path to a TOML configuration file (default: decalc.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive calculator (the default)
    Repl,

    /// Evaluate a single command line and print the result
    Eval {
        /// The command, e.g. `add 5 3` (quoted or as separate words)
        line: Vec<String>,
    },

    /// Show the resolved configuration
    Config,
}

fn main() -> anyhow::Result<()> {
    // Pull a .env file into the environment before settings are resolved.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let settings = match &cli.config {
        Some(path) => Settings::load_from(path),
        None => Settings::load(),
    }
    .context("loading configuration")?;

    let mut log_config = settings.logging.clone();
    if settings.debug {
        log_config.default = "debug".to_string();
    }
    logging::init_with_config(&log_config);

    match cli.command.unwrap_or(Commands::Repl) {
        Commands::Repl => {
            let stdin = std::io::stdin();
            let stdout = std::io::stdout();
            Calculator::new(settings)
                .run(stdin.lock(), stdout.lock())
                .context("running repl")?;
        }
        Commands::Eval { line } => {
            let feedback = Calculator::new(settings).process_line(&line.join(" "));
            println!("{feedback}");
        }
        Commands::Config => {
            let rendered =
                toml::to_string_pretty(&settings).context("serializing configuration")?;
            print!("{rendered}");
        }
    }

    Ok(())
}
