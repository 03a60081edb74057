use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;

use four_in_a_row::ai::HeuristicAgent;
use four_in_a_row::config::AppConfig;
use four_in_a_row::game::GameMode;
use four_in_a_row::score::{FileStore, Leaderboard};
use four_in_a_row::session::GameSession;
use four_in_a_row::ui::App;

/// Play Four in a Row in the terminal.
#[derive(Parser)]
#[command(name = "four-in-a-row", about = "Connect Four against a friend or the computer")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// Skip the menu and start a game in this mode
    #[arg(long, value_enum)]
    mode: Option<ModeArg>,

    /// Override the random seed (AI moves and thinking delay)
    #[arg(long)]
    seed: Option<u64>,

    /// Override the directory holding the leaderboard
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Print the default configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    VsAi,
    TwoPlayer,
}

impl From<ModeArg> for GameMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::VsAi => GameMode::SinglePlayerVsAi,
            ModeArg::TwoPlayer => GameMode::TwoPlayer,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.print_config {
        print!("{}", AppConfig::default_toml());
        return Ok(());
    }

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if let Some(seed) = cli.seed {
        config.game.seed = Some(seed);
    }
    if let Some(dir) = cli.data_dir {
        config.storage.data_dir = dir;
    }
    config.validate().context("validating config")?;

    four_in_a_row::logging::init(&config.logging).context("initializing logging")?;
    info!(data_dir = %config.storage.data_dir.display(), "starting");

    let leaderboard = Leaderboard::load(FileStore::new(&config.storage.data_dir));
    let opponent = Box::new(HeuristicAgent::from_seed(config.game.seed));
    let session = GameSession::new(leaderboard, opponent, &config.game);

    let mut app = App::new(session, config.animation.clone());
    if let Some(mode) = cli.mode {
        app.start_game(mode.into());
    }

    run(&mut app).context("terminal error")
}

fn run(app: &mut App<FileStore>) -> io::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = app.run(&mut terminal);

    // Restore terminal even when the app errored
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    res
}
