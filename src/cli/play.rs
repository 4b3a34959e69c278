//! Interactive terminal quiz.
//!
//! Reads one line per action from stdin while printing session events as
//! they arrive from the controller.

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use crate::catalog::source_for;
use crate::config::ResolvedConfig;
use crate::core::{Command, QuizController, QuizSession};
use crate::domain::{EventKind, SessionEvent};

const HELP: &str = "Type a number to answer, `c <category>` to change category, `r` to reset, `q` to quit.";

/// What a line of input asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Send(Command),
    Help,
    Quit,
    Invalid(String),
}

/// Interpret a line against the choices currently shown
pub fn parse_input(line: &str, choices: &[String]) -> Input {
    let line = line.trim();

    match line {
        "q" | "quit" | "exit" => return Input::Quit,
        "r" | "reset" => return Input::Send(Command::Reset),
        "h" | "help" | "?" | "" => return Input::Help,
        _ => {}
    }

    if let Some(id) = line.strip_prefix("c ").or_else(|| line.strip_prefix("category ")) {
        return Input::Send(Command::ChangeCategory(id.trim().to_string()));
    }

    match line.parse::<usize>() {
        Ok(_) if choices.is_empty() => {
            Input::Invalid("No question to answer, wait for the next painting.".to_string())
        }
        Ok(n) if (1..=choices.len()).contains(&n) => {
            Input::Send(Command::Submit(choices[n - 1].clone()))
        }
        Ok(n) => Input::Invalid(format!("No choice {n}")),
        Err(_) => Input::Invalid(format!("Unknown input: {line}")),
    }
}

fn streak_bar(streak: u32, target: u32) -> String {
    let filled = streak.min(target) as usize;
    format!(
        "[{}{}] {}/{}",
        "#".repeat(filled),
        "-".repeat(target as usize - filled),
        streak.min(target),
        target
    )
}

/// Print an event; returns the choices now open for answering when they change
fn render(event: &SessionEvent, target: u32) -> Option<Vec<String>> {
    match &event.kind {
        EventKind::QuestionReady {
            title,
            url,
            choices,
            ..
        } => {
            println!();
            println!("Who painted {}?", if title.is_empty() { "this" } else { title.as_str() });
            println!("  {url}");
            for (i, choice) in choices.iter().enumerate() {
                println!("  {}. {}", i + 1, choice);
            }
            return Some(choices.clone());
        }
        EventKind::Answered {
            correct,
            correct_artist,
            streak,
            ..
        } => {
            if *correct {
                println!("Correct! {}", streak_bar(*streak, target));
            } else {
                println!("Wrong, it was {correct_artist}. {}", streak_bar(*streak, target));
            }
        }
        EventKind::StreakMilestone { streak } => {
            println!("{streak} in a row! Type `r` to start a new streak.");
            return Some(Vec::new());
        }
        EventKind::StreakReset => println!("Streak reset."),
        EventKind::CategoryChanged { label, .. } => println!("Category: {label}"),
        EventKind::NoValidPaintings { category } => {
            println!("No paintings in category '{category}'. Try `c all`.");
            return Some(Vec::new());
        }
        EventKind::InsufficientChoices { category, artists } => {
            println!("Category '{category}' has {artists} painter(s), not enough for a question.");
            return Some(Vec::new());
        }
        EventKind::LoadFailed { error } => println!("Could not load paintings: {error}"),
    }

    None
}

/// Run the quiz until the user quits or stdin closes
pub async fn run(cfg: &ResolvedConfig, category: Option<String>, seed: Option<u64>) -> Result<()> {
    let session = match seed {
        Some(seed) => QuizSession::seeded(cfg.quiz.clone(), seed),
        None => QuizSession::new(cfg.quiz.clone()),
    };
    let session = match category {
        Some(id) => session.with_category(&id),
        None => session,
    };
    let target = cfg.quiz.streak_target;

    println!("Loading paintings from {}...", cfg.data.location);
    println!("{HELP}");

    let source = source_for(&cfg.data.location);
    let (mut events, handle) = QuizController::spawn(session, source, cfg.data.clone());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut choices: Vec<String> = Vec::new();

    loop {
        tokio::select! {
            event = events.recv() => {
                let Some(event) = event else { break };
                let failed = matches!(event.kind, EventKind::LoadFailed { .. });
                if let Some(shown) = render(&event, target) {
                    choices = shown;
                }
                if failed {
                    break;
                }
            }
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match parse_input(&line, &choices) {
                    Input::Send(command) => {
                        debug!(?command, "Sending command");
                        if matches!(command, Command::Submit(_)) {
                            // One answer per painting
                            choices.clear();
                        }
                        handle.send(command).await?;
                    }
                    Input::Help => println!("{HELP}"),
                    Input::Quit => break,
                    Input::Invalid(message) => println!("{message}"),
                }
            }
        }
    }

    let session = handle.shutdown().await?;
    println!("Final streak: {}", session.streak());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn choices() -> Vec<String> {
        vec!["Edvard Munch".to_string(), "Harriet Backer".to_string()]
    }

    #[test]
    fn test_parse_answers() {
        assert_eq!(
            parse_input(" 2 ", &choices()),
            Input::Send(Command::Submit("Harriet Backer".to_string()))
        );
        assert!(matches!(parse_input("3", &choices()), Input::Invalid(_)));
        assert!(matches!(parse_input("0", &choices()), Input::Invalid(_)));
    }

    #[test]
    fn test_answer_without_open_question() {
        assert_eq!(
            parse_input("1", &[]),
            Input::Invalid("No question to answer, wait for the next painting.".to_string())
        );
        assert_eq!(parse_input("r", &[]), Input::Send(Command::Reset));
    }

    #[test]
    fn test_closing_events_clear_choices() {
        let session = uuid::Uuid::new_v4();
        let milestone = SessionEvent::new(session, 1, EventKind::StreakMilestone { streak: 10 });
        let no_data = SessionEvent::new(
            session,
            2,
            EventKind::NoValidPaintings {
                category: "portraits".to_string(),
            },
        );
        let reset = SessionEvent::new(session, 3, EventKind::StreakReset);

        assert_eq!(render(&milestone, 10), Some(Vec::new()));
        assert_eq!(render(&no_data, 10), Some(Vec::new()));
        assert_eq!(render(&reset, 10), None);
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            parse_input("c impressionism", &[]),
            Input::Send(Command::ChangeCategory("impressionism".to_string()))
        );
        assert_eq!(parse_input("r", &[]), Input::Send(Command::Reset));
        assert_eq!(parse_input("q", &[]), Input::Quit);
        assert_eq!(parse_input("", &[]), Input::Help);
    }

    #[test]
    fn test_streak_bar() {
        assert_eq!(streak_bar(3, 5), "[###--] 3/5");
        assert_eq!(streak_bar(7, 5), "[#####] 5/5");
    }
}
