//! Wordplay - Entry Point

use clap::Parser;
use std::path::PathBuf;
use tracing::{info, warn};
use wordplay::state::{Inspector, Orchestrator};
use wordplay::view::{CliArgs, Screen};

/// Wordplay - words that do what they say
#[derive(Parser, Debug)]
#[command(name = "wordplay")]
#[command(version)]
#[command(about = "TUI word game presenting stylized word effects in shuffled order")]
pub struct Args {
    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Fixed shuffle seed (same seed, same word order)
    #[arg(long)]
    pub seed: Option<u64>,

    /// View fade duration in milliseconds
    #[arg(long)]
    pub transition_ms: Option<u64>,

    /// Open the word inspector instead of the game
    #[arg(long)]
    pub inspect: bool,

    /// Word to load in the inspector on startup (implies --inspect)
    #[arg(long, value_name = "ID")]
    pub word: Option<String>,

    /// Do not hover words with the mouse pointer
    #[arg(long)]
    pub no_mouse: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Load configuration with full precedence chain:
    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = wordplay::config::load_config_with_precedence(args.config.clone())?;
        let merged = wordplay::config::merge_config(config_file);
        let with_env = wordplay::config::apply_env_overrides(merged);

        // Flags only override when passed
        let mouse_override = if args.no_mouse { Some(false) } else { None };
        wordplay::config::apply_cli_overrides(with_env, args.seed, args.transition_ms, mouse_override)
    };

    wordplay::logging::init(&config.log_file_path, &config.log_level)?;

    info!(
        config = ?config,
        "Configuration loaded and resolved"
    );

    let catalog = wordplay::words::catalog()?;

    let screen = if args.inspect || args.word.is_some() {
        let mut inspector = Inspector::new(catalog);
        if let Some(id) = &args.word {
            // An unknown id leaves the inspector empty; the error is logged.
            match inspector.select(id) {
                Ok(()) => inspector.load_selected()?,
                Err(err) => warn!(%err, "Ignoring --word"),
            }
        }
        Screen::Inspector(inspector)
    } else {
        Screen::Game(Orchestrator::new(catalog, config.timing(), config.seed))
    };

    wordplay::view::run(screen, CliArgs::new(config.mouse_hover))?;

    Ok(())
}
