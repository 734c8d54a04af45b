//! Munch the Orc - terminal chat game.
//!
//! Talk an angry orc down from a rage, win by offering the amulet while he
//! is calm, lose if his anger hits the ceiling. Replies come from a local
//! llama.cpp server.
//!
//! # Headless Mode
//!
//! Run with `--headless` for a stdin/stdout interface suitable for
//! automated testing:
//!
//! ```bash
//! cargo run -p orc -- --headless --mood 5
//! ```

mod app;
mod events;
mod headless;
mod ui;

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use orc_core::{GameSession, SessionConfig};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, stdout};
use std::time::Duration;

use app::App;
use events::{handle_event, EventResult};
use ui::render::render;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Parse command line arguments
    let args: Vec<String> = std::env::args().collect();

    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_help();
        return Ok(());
    }

    if args.iter().any(|a| a == "--headless") {
        let config = headless::parse_config_from_args(&args);
        return headless::run_headless(config).await;
    }

    // Reach the model server before touching the terminal
    let session = match GameSession::connect(SessionConfig::new()).await {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Could not reach the llama.cpp server: {e}");
            eprintln!(
                "Start one (e.g. `llama-server -m model.gguf`) or point LLAMA_SERVER_URL at it."
            );
            std::process::exit(1);
        }
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let result = run_app(&mut terminal, App::new(session)).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;

    if let Err(e) = result {
        eprintln!("Error: {e}");
    }

    Ok(())
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
) -> io::Result<()> {
    loop {
        // Render
        terminal.draw(|f| render(f, &app))?;

        // Process any pending transcript save
        if let Some(path) = app.pending_save.take() {
            match app.session.save_transcript(&path).await {
                Ok(()) => app.set_status(format!("Transcript saved to {}", path.display())),
                Err(e) => app.set_status(format!("Save failed: {e}")),
            }
        }

        // Process any pending input asynchronously
        if let Some(input) = app.pending_input.take() {
            // Show the player's line and the thinking state before the
            // model call settles
            app.add_narrative(
                input.clone(),
                ui::widgets::narrative::NarrativeKind::Player,
            );
            app.busy = true;
            terminal.draw(|f| render(f, &app))?;

            let report = app.session.submit(&input).await;
            app.busy = false;
            if report.outcome == orc_core::TurnOutcome::Rejected {
                // The game never saw this line; drop the echo again
                app.narrative_history.pop();
            }
            app.apply_report(report);
            app.input_mode = app::InputMode::Normal;
        }

        // Poll for events with timeout so the thinking indicator animates
        if event::poll(Duration::from_millis(100))? {
            let ev = event::read()?;
            match handle_event(&mut app, ev) {
                EventResult::Quit => return Ok(()),
                EventResult::ProcessInput
                | EventResult::NeedsRedraw
                | EventResult::Continue => {}
            }
        } else {
            app.tick();
        }
    }
}

fn print_help() {
    println!("Munch the Orc - talk an angry orc out of smashing you");
    println!();
    println!("USAGE:");
    println!("  orc [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("  -h, --help       Show this help message");
    println!("  --headless       Run as a stdin/stdout loop (no TUI)");
    println!();
    println!("HEADLESS OPTIONS (only with --headless):");
    println!("  --mood <0-9>     Pin the starting mood (default: random 3-7)");
    println!();
    println!("ENVIRONMENT:");
    println!("  LLAMA_SERVER_URL   llama.cpp server base URL (default http://localhost:8080)");
    println!();
    println!("HOW TO PLAY:");
    println!("  Munch's anger runs 0-9. Kind words calm him, insults enrage him.");
    println!("  Offer him the amulet while he is calm (anger 2 or less) to win.");
    println!("  If his anger reaches 9, Munch smashes you.");
}
