use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use gottem_config::Config;
use gottem_core::PersistenceGateway;
use gottem_editor::{Editor, EditorOptions};
use gottem_logger::{LogLevel, Logger};
use gottem_provider::ProviderRegistry;
use gottem_session::{ScratchStore, TranscriptStore};
use gottem_surface::TerminalSurface;
use gottem_theme::Theme;

/// Modal terminal editor for chat transcripts
#[derive(Debug, Parser)]
#[command(name = "gottem", version, about)]
struct Args {
    /// Conversation to open
    #[arg(short, long, default_value_t = 1)]
    chat: u64,

    /// Shortcut of the provider to select at startup
    #[arg(short, long)]
    provider: Option<String>,

    /// Config file to use instead of the default location
    #[arg(long)]
    config: Option<PathBuf>,
}

fn load_config(args: &Args) -> Config {
    let loaded = match &args.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    loaded.unwrap_or_else(|e| {
        eprintln!("Failed to load config, using defaults: {:#}", e);
        Config::default()
    })
}

fn create_logger(config: &Config) -> Logger {
    let min_level = config.logging.min_level.parse().unwrap_or_else(|_| {
        eprintln!(
            "Unknown log level '{}', using info",
            config.logging.min_level
        );
        LogLevel::Info
    });

    match config.log_file_path() {
        Ok(path) => Logger::new(path, config.logging.max_entries, min_level),
        Err(e) => {
            eprintln!("No log file, logging in memory only: {:#}", e);
            let logger = Logger::memory(config.logging.max_entries);
            logger.set_min_level(min_level);
            logger
        }
    }
}

/// Transcript store under the data directory, or an in-memory one when
/// there is no data directory
fn create_store(config: &Config, logger: &Logger) -> Box<dyn PersistenceGateway> {
    match config.transcripts_dir() {
        Ok(dir) => {
            let store = TranscriptStore::new(dir);
            logger.info(format!("Transcripts in {}", store.dir().display()));
            Box::new(store)
        }
        Err(e) => {
            eprintln!("Transcripts will not be saved: {:#}", e);
            logger.warn(format!("No transcript directory, keeping transcripts in memory: {:#}", e));
            Box::new(ScratchStore::new())
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = load_config(&args);
    let logger = create_logger(&config);

    let themes_dir = Config::get_themes_dir().ok();
    let theme = Theme::get_by_name(&config.general.theme, themes_dir.as_deref());
    logger.info(format!("Using theme '{}'", theme.name));

    let store = create_store(&config, &logger);

    let options = EditorOptions {
        conversation_id: args.chat,
        settings: config.editor.clone(),
        theme,
        default_provider: args
            .provider
            .clone()
            .or_else(|| config.general.default_provider.clone()),
    };
    let mut editor = Editor::open(
        options,
        Box::new(ProviderRegistry::builtin()),
        store,
        logger.clone(),
    );

    // Initialize terminal
    let mut surface = TerminalSurface::enter()?;

    // Run editor
    let result = editor.run(&mut surface);

    // Restore terminal
    let restored = surface.restore();

    // Print error if there was one
    if let Err(err) = result {
        logger.error(format!("{:#}", err));
        eprintln!("Error: {:?}", err);
    }

    restored
}
