//! Neon Twilight in the terminal
//!
//! Main entry point: the sandbox town driven by the client controller.

use std::io;
use std::path::PathBuf;
use std::rc::Rc;

use clap::Parser;
use crossterm::{
    cursor,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::{error, info};

use nt_client::{ClientConfig, Controller, FrameDriver};
use nt_sandbox::Sandbox;
use nt_tui::logging;
use nt_tui::{
    CrosstermEvents, FileStorage, InputState, TerminalViewport, Theme, TuiConfig, TuiError,
    default_save_dir,
};

/// Neon Twilight
#[derive(Parser, Debug)]
#[command(name = "neon")]
#[command(author, version, about = "Neon Twilight - one night in the city", long_about = None)]
struct Args {
    /// Config file (default: <config dir>/neon-twilight/config.toml)
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Colors for a light terminal background
    #[arg(long = "light")]
    light: bool,

    /// Skip character creation
    #[arg(long = "no-chargen")]
    no_chargen: bool,

    /// Restore the saved game on start
    #[arg(short = 'r', long = "restore")]
    restore: bool,

    /// Storage key to save and restore under
    #[arg(short = 'k', long = "save-key")]
    save_key: Option<String>,

    /// Directory for save files
    #[arg(long = "save-dir")]
    save_dir: Option<PathBuf>,

    /// Milliseconds per frame
    #[arg(long = "frame-ms")]
    frame_ms: Option<u64>,

    /// Log filter, e.g. "debug" or "nt_client=trace"
    #[arg(long = "log")]
    log: Option<String>,
}

impl Args {
    /// Command-line flags win over the config file.
    fn apply(&self, config: &mut TuiConfig) {
        if self.light {
            config.light_theme = Some(true);
        }
        if self.no_chargen {
            config.client.skip_character_creation = true;
        }
        if self.restore {
            config.client.restore_on_start = true;
        }
        if let Some(ref key) = self.save_key {
            config.client.save_key = key.clone();
        }
        if let Some(ref dir) = self.save_dir {
            config.storage_dir = Some(dir.clone());
        }
        if let Some(ms) = self.frame_ms {
            config.client.frame_interval_ms = ms;
        }
    }
}

fn main() -> Result<(), TuiError> {
    // Parse command-line arguments before terminal setup
    let args = Args::parse();
    let config_path = args.config.clone().unwrap_or_else(TuiConfig::default_path);
    let mut config = TuiConfig::load(&config_path)?;
    args.apply(&mut config);

    let log_dir = config.log_dir.clone().unwrap_or_else(logging::default_log_dir);
    let log_file = logging::init(&log_dir, args.log.as_deref())?;
    info!(
        config = %config_path.display(),
        log = %log_file.display(),
        "starting neon"
    );

    let theme = config.light_theme.map_or_else(Theme::detect, Theme::from_flag);
    let storage = FileStorage::new(config.storage_dir.clone().unwrap_or_else(default_save_dir));
    let sim = Sandbox::new()?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let result = run(terminal, theme, config.client, sim, storage);

    // Restore terminal
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture, cursor::Show)?;

    if let Err(ref err) = result {
        error!(%err, "neon exited with an error");
    } else {
        info!("neon exited");
    }
    result
}

fn run(
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    theme: Theme,
    client: ClientConfig,
    sim: Sandbox,
    storage: FileStorage,
) -> Result<(), TuiError> {
    let input = InputState::shared();
    let viewport = TerminalViewport::new(terminal, theme, Rc::clone(&input), client.status_lines)?;
    let controller = Controller::new(client, sim, viewport, storage)?;
    let mut driver = FrameDriver::new(controller, CrosstermEvents::new(input));
    driver.run()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_config() {
        let args = Args::try_parse_from([
            "neon",
            "--light",
            "--no-chargen",
            "-r",
            "-k",
            "slot2",
            "--frame-ms",
            "20",
            "--save-dir",
            "/tmp/neon",
        ])
        .unwrap();
        let mut config = TuiConfig::default();
        args.apply(&mut config);

        assert_eq!(config.light_theme, Some(true));
        assert!(config.client.skip_character_creation);
        assert!(config.client.restore_on_start);
        assert_eq!(config.client.save_key, "slot2");
        assert_eq!(config.client.frame_interval_ms, 20);
        assert_eq!(config.storage_dir, Some(PathBuf::from("/tmp/neon")));
    }

    #[test]
    fn test_no_flags_keep_config() {
        let args = Args::try_parse_from(["neon"]).unwrap();
        let mut config = TuiConfig::from_toml_str("save_key = \"mine\"\nlight_theme = false").unwrap();
        args.apply(&mut config);
        assert_eq!(config.client.save_key, "mine");
        assert_eq!(config.light_theme, Some(false));
        assert!(!config.client.skip_character_creation);
    }
}
