mod app;
mod domain;
mod input;
mod logging;
mod notifications;
mod persistence;
mod report;
mod ticker;
mod ui;

use anyhow::{Context, Result};
use app::AppState;
use chrono::Local;
use clap::{Parser, Subcommand};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use persistence::{ensure_data_dir, get_data_dir, init_local_data_dir, load_and_migrate, FileStore, LoadSource};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "zenfocus")]
#[command(about = "A calm daily quest board with streaks, in your terminal", long_about = None)]
struct Cli {
    /// Data directory (defaults to the nearest .zenfocus, then ~/.zenfocus)
    #[arg(long, global = true, env = "ZENFOCUS_DIR")]
    dir: Option<PathBuf>,

    /// Use ASCII glyphs instead of emoji for the streak badge
    #[arg(long, global = true)]
    ascii: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a local .zenfocus directory in the current directory
    Init,
    /// Print today's progress, streak and trash count
    Status,
    /// Add a task to today's board without opening the board
    Add {
        /// Task text
        #[arg(required = true)]
        text: Vec<String>,
    },
    /// Render the completed-task history as markdown
    History {
        /// Output file path. Prints to stdout when omitted.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Init) => {
            // Initialize local .zenfocus directory
            let cwd = std::env::current_dir().context("Could not determine current directory")?;
            let data_dir = init_local_data_dir(&cwd)?;
            println!("Initialized zenfocus directory: {}", data_dir.display());
            println!();
            println!("Zen Focus will now use this local directory for its board.");
            println!("Run 'zenfocus' to open the board.");
            Ok(())
        }
        Some(Commands::Status) => {
            let (mut app, _) = open_app(cli.dir.as_deref())?;
            print!("{}", report::render_status(&app.board, app.today));
            app.save()
        }
        Some(Commands::Add { text }) => {
            let (mut app, _) = open_app(cli.dir.as_deref())?;
            let content = text.join(" ");
            match app.add_task(&content) {
                Some(id) => {
                    app.save()?;
                    println!("Added task {}: {}", id, content.trim());
                }
                None => println!("Nothing to add."),
            }
            Ok(())
        }
        Some(Commands::History { output }) => {
            let (app, _) = open_app(cli.dir.as_deref())?;
            let content = report::render_history(&app.board);
            if let Some(path) = report::write_report(&content, output)? {
                println!("History written: {}", path.display());
            }
            Ok(())
        }
        None => {
            // Run the board TUI
            let (mut app, log_path) = open_app(cli.dir.as_deref())?;
            app.use_emoji = !cli.ascii;
            run_tui(app, &log_path)
        }
    }
}

/// Resolve the data directory, start logging, then load the board and bring
/// it up to date for today
fn open_app(dir_override: Option<&Path>) -> Result<(AppState, PathBuf)> {
    let data_dir = ensure_data_dir(&get_data_dir(dir_override)?)?;
    let log_path = logging::init_logging(&data_dir)?;
    log::info!("Using data directory {}", data_dir.display());

    let store = FileStore::new(&data_dir);
    let today = Local::now().date_naive();

    let loaded = load_and_migrate(&store, today).context("Failed to load the board")?;
    if loaded.source == LoadSource::Malformed {
        eprintln!("Warning: stored board was unreadable, starting from defaults");
    }

    let mut app = AppState::new(loaded.board, Box::new(store), today);
    // Persist the rollover right away so a crash cannot replay it
    app.save()?;
    Ok((app, log_path))
}

fn run_tui(mut app: AppState, log_path: &Path) -> Result<()> {
    eprintln!("Logging to {}", log_path.display());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    // Save on exit
    if let Err(e) = app.save() {
        log::error!("Error saving board on exit: {}", e);
        eprintln!("Error saving board: {}", e);
    }

    // Print any errors
    if let Err(err) = result {
        log::error!("Event loop failed: {:#}", err);
        eprintln!("Error: {:#}", err);
    }

    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut AppState) -> Result<()> {
    let tick_rate = ticker::tick_duration();

    loop {
        // Midnight crossing rolls the board over in place
        app.check_day_change(Local::now().date_naive());

        // Render
        terminal.draw(|f| ui::render(f, app))?;

        // Handle events with timeout for ticking
        if event::poll(tick_rate)? {
            match event::read()? {
                // Only process key press events (ignore key release)
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    let should_quit = if input::is_settings_key(app, &key) {
                        // The editor needs the real terminal
                        disable_raw_mode()?;
                        execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;

                        let result = input::handle_key(app, key);

                        enable_raw_mode()?;
                        execute!(terminal.backend_mut(), EnterAlternateScreen, EnableMouseCapture)?;
                        terminal.clear()?;

                        result?
                    } else {
                        input::handle_key(app, key)?
                    };

                    if should_quit {
                        return Ok(());
                    }
                }
                Event::Mouse(mouse) => input::handle_mouse(app, mouse),
                _ => {}
            }
        }

        // Expire the celebration banner
        app.tick(Instant::now());

        // Autosave if needed
        if app.needs_save {
            app.save()?;
        }
    }
}
