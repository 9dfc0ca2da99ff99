mod app;
mod config;
mod debug;
mod game;
mod ui;

use anyhow::{bail, Context, Result};
use crossterm::{
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::{Path, PathBuf};

use app::App;
use game::KeyMap;

/// Command line options
#[derive(Debug, Default, PartialEq)]
struct CliOptions {
    debug: bool,
    config_path: Option<PathBuf>,
    help: bool,
}

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let options = parse_args(&args)?;
    if options.help {
        print_usage(args.first().map(String::as_str).unwrap_or("duopong"));
        return Ok(());
    }

    debug::init(options.debug, Path::new(debug::LOG_FILE_PATH))?;

    let config_path = options
        .config_path
        .clone()
        .unwrap_or_else(config::get_config_path);
    let config = config::load_config(&config_path)?;
    let keymap = KeyMap::from_bindings(&config.keybindings)
        .with_context(|| format!("check [keybindings] in {}", config_path.display()))?;
    tracing::info!(config = %config_path.display(), "configuration loaded");

    // Setup terminal
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    // Key releases are only reported with the enhancement protocol
    let releases_reported = supports_keyboard_enhancement().unwrap_or(false);
    if releases_reported {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        )?;
    }
    tracing::info!(releases_reported, "terminal ready");

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.hide_cursor()?;

    // Run game
    let mut app = App::new(&config, keymap, releases_reported);
    let result = app::run(&mut terminal, &mut app);

    // Restore terminal
    if releases_reported {
        execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags)?;
    }
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        tracing::error!(error = %e, "game loop failed");
    }
    result
}

/// Parse command line arguments
fn parse_args(args: &[String]) -> Result<CliOptions> {
    let mut options = CliOptions::default();
    let mut rest = args.iter().skip(1);

    while let Some(arg) = rest.next() {
        match arg.as_str() {
            "--debug" | "-d" => options.debug = true,
            "--config" | "-c" => match rest.next() {
                Some(path) => options.config_path = Some(PathBuf::from(path)),
                None => bail!("--config requires a file path"),
            },
            "--help" | "-h" => options.help = true,
            other => bail!("unknown argument: {} (try --help)", other),
        }
    }

    Ok(options)
}

fn print_usage(program: &str) {
    println!("Pong - two players, one keyboard");
    println!();
    println!("Usage:");
    println!("  {} [--debug] [--config <path>]", program);
    println!();
    println!("Options:");
    println!(
        "  -d, --debug          Write a debug log to {}",
        debug::LOG_FILE_PATH
    );
    println!(
        "  -c, --config <path>  Config file (default: {})",
        config::get_config_path().display()
    );
    println!("  -h, --help           Show this help");
    println!();
    println!("Controls: W/S left paddle, Up/Down right paddle, Space start, R reset, Q quit");
}
