//! Headless line mode for scripted runs.
//!
//! Reads player lines from stdin and prints Munch's side to stdout, with
//! the mood shown after each turn. Suitable for piping and for automated
//! testing without a terminal.

use std::io::{self, BufRead, Write};

use orc_core::{GameSession, Mood, SessionConfig, TurnOutcome};

/// Configuration for a headless run.
#[derive(Debug, Clone, Default)]
pub struct HeadlessConfig {
    /// Pin the starting mood instead of the random [3, 7] roll.
    pub starting_mood: Option<u8>,
}

/// Parse headless options out of the raw argument list.
pub fn parse_config_from_args(args: &[String]) -> HeadlessConfig {
    let mut config = HeadlessConfig::default();

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg == "--mood" {
            if let Some(value) = iter.next() {
                config.starting_mood = value.parse().ok();
            }
        }
    }

    config
}

/// Run the game as a stdin/stdout loop.
pub async fn run_headless(config: HeadlessConfig) -> Result<(), Box<dyn std::error::Error>> {
    let mut session_config = SessionConfig::new();
    if let Some(value) = config.starting_mood {
        session_config = session_config.with_starting_mood(Mood::new(value));
    }

    let mut session = GameSession::connect(session_config).await?;

    println!("=== Munch the Orc (headless) ===");
    println!("Type your message and press Enter. 'restart' for a new game, 'quit' to leave.");
    print_munch_line(&session);

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // EOF
        }
        let line = line.trim();

        match line {
            "quit" | "exit" => break,
            "restart" => {
                session.restart();
                println!("--- new game ---");
                print_munch_line(&session);
                continue;
            }
            _ => {}
        }

        let report = session.submit(line).await;

        match report.outcome {
            TurnOutcome::Rejected => {
                println!("(Munch ignores that.)");
                continue;
            }
            TurnOutcome::Continue => {
                if let Some(reply) = &report.reply {
                    println!("Munch [{}]: {reply}", report.mood);
                }
            }
            TurnOutcome::Victory => {
                if let Some(reply) = &report.reply {
                    println!("Munch [{}]: {reply}", report.mood);
                }
                println!("*** You win! Type 'restart' to play again. ***");
            }
            TurnOutcome::GameOver => {
                if let Some(reply) = &report.reply {
                    println!("Munch [{}]: {reply}", report.mood);
                }
                println!("*** Munch smashed you. Type 'restart' to try again. ***");
            }
        }
    }

    Ok(())
}

fn print_munch_line(session: &GameSession) {
    if let Some(seed) = session.history().last() {
        println!("Munch [{}]: {}", session.mood(), seed.text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mood_arg() {
        let args = vec![
            "orc".to_string(),
            "--headless".to_string(),
            "--mood".to_string(),
            "2".to_string(),
        ];
        let config = parse_config_from_args(&args);
        assert_eq!(config.starting_mood, Some(2));
    }

    #[test]
    fn test_parse_missing_mood() {
        let args = vec!["orc".to_string(), "--headless".to_string()];
        let config = parse_config_from_args(&args);
        assert_eq!(config.starting_mood, None);
    }
}
