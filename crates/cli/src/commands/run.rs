//! `stacksim run` — Interactive or scripted simulator session.

use std::io::Write;
use std::sync::Arc;

use clap::Args;
use stacksim_config::{AppConfig, ConfigError, InitialDataMode};
use stacksim_core::{DomainEvent, EventBus};
use stacksim_launcher::{LaunchOptions, launch_with_events};
use stacksim_presenter::{Command, CommandParseError, Outcome, Presenter, TextRenderer};
use tokio::sync::broadcast::{self, error::RecvError};

use crate::terminal::{TerminalInput, is_exit_command};

const HELP: &str = "\
  Commands:
    push <value>   Push a number onto the stack
    pop            Remove and show the top element
    peek           Show the top element without removing it
    size           Show how many elements are stored
    is-empty       Check whether the stack is empty
    clear          Replace the stack with an empty one
    show           Redraw the stack
    help           Show this help
    exit           Leave the simulator";

#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Maximum stack size (5–20)
    #[arg(short, long)]
    pub capacity: Option<u32>,

    /// Start with random values, optionally how many (1–10)
    #[arg(long, value_name = "COUNT", num_args = 0..=1, conflicts_with = "empty")]
    pub random: Option<Option<u32>>,

    /// Start with an empty stack
    #[arg(long)]
    pub empty: bool,

    /// Seed for the random values
    #[arg(long)]
    pub seed: Option<u64>,

    /// Redraw immediately after push and pop
    #[arg(long)]
    pub no_animation: bool,

    /// Disable ANSI colours
    #[arg(long)]
    pub no_color: bool,

    /// Run these commands instead of reading from the terminal
    #[arg(short = 'e', long = "exec", value_name = "COMMAND")]
    pub exec: Vec<String>,

    /// With --exec, print the final stack as JSON
    #[arg(long, requires = "exec")]
    pub json: bool,
}

impl RunArgs {
    /// Layer command-line flags over the loaded configuration.
    pub fn apply_to(&self, config: &mut AppConfig) -> Result<(), ConfigError> {
        if let Some(capacity) = self.capacity {
            config.launcher.capacity = capacity;
        }

        if self.empty {
            config.launcher.initial_data = InitialDataMode::Empty;
        }

        if let Some(count) = self.random {
            config.launcher.initial_data = InitialDataMode::Random;
            if let Some(count) = count {
                config.launcher.random_count = count;
            }
        }

        if self.seed.is_some() {
            config.launcher.seed = self.seed;
        }

        if self.no_animation || !self.exec.is_empty() {
            config.display.animate = false;
        }

        if self.no_color || self.json {
            config.display.color = false;
        }

        config.validate()
    }
}

/// A line typed into the session.
#[derive(Debug, PartialEq, Eq)]
enum SessionInput {
    Command(Command),
    Show,
    Help,
    Invalid(CommandParseError),
}

fn classify(line: &str) -> SessionInput {
    match line.trim().to_ascii_lowercase().as_str() {
        "show" | "display" => SessionInput::Show,
        "help" | "?" => SessionInput::Help,
        _ => match line.parse::<Command>() {
            Ok(command) => SessionInput::Command(command),
            Err(e) => SessionInput::Invalid(e),
        },
    }
}

pub async fn run(args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    args.apply_to(&mut config)
        .map_err(|e| format!("Invalid launch options: {e}"))?;

    let events = Arc::new(EventBus::default());
    spawn_event_logger(&events);

    let options = LaunchOptions::from_config(&config);
    let mut presenter = launch_with_events(&options, Some(events))?;
    let renderer = TextRenderer::new(config.display.color);

    if !args.exec.is_empty() {
        let output = run_script(&mut presenter, &renderer, &args.exec, args.json)?;
        print!("{output}");
        return Ok(());
    }

    println!();
    println!("  ╔══════════════════════════════════════════════╗");
    println!("  ║         Stack Operation Simulator            ║");
    println!("  ╚══════════════════════════════════════════════╝");
    println!();
    println!("  Capacity:  {}", options.capacity);
    println!("  Initial:   {} element(s)", presenter.stack().size());
    println!();
    println!("{HELP}");
    println!();
    print!("{}", renderer.render(&presenter.view()));

    let input = TerminalInput::new();
    let mut rx = input.start();

    prompt()?;
    while let Some(result) = rx.recv().await {
        match result {
            Ok(line) => match classify(&line) {
                SessionInput::Command(command) => {
                    let outcome = presenter.dispatch(command);
                    if let Some(alert) = &outcome.alert {
                        eprint!("{}", renderer.alert(alert));
                    }
                    println!("  {}", renderer.feedback(&outcome.feedback));
                    if !outcome.refresh.delay.is_zero() {
                        tokio::time::sleep(outcome.refresh.delay).await;
                    }
                    println!();
                    print!("{}", renderer.render(&outcome.refresh.view));
                }
                SessionInput::Show => print!("{}", renderer.render(&presenter.view())),
                SessionInput::Help => println!("{HELP}"),
                SessionInput::Invalid(e) => {
                    eprintln!("  [warn] {e}. Type 'help' for the list of commands.");
                }
            },
            Err(e) => {
                eprintln!("  [Input Error] {e}");
                break;
            }
        }
        prompt()?;
    }

    println!();
    println!("  Goodbye!");
    println!();

    Ok(())
}

/// Run `lines` in order and collect what an interactive session would print.
///
/// With `json`, the output is only the final view as JSON so it can be piped.
/// An exit word ends the script early.
fn run_script(
    presenter: &mut Presenter,
    renderer: &TextRenderer,
    lines: &[String],
    json: bool,
) -> Result<String, Box<dyn std::error::Error>> {
    let mut out = String::new();

    for line in lines.iter().flat_map(|l| l.split(';')) {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if is_exit_command(&line.to_ascii_lowercase()) {
            break;
        }

        let transcript = match classify(line) {
            SessionInput::Command(command) => {
                let outcome = presenter.dispatch(command);
                describe(renderer, &outcome)
            }
            SessionInput::Show => renderer.render(&presenter.view()),
            SessionInput::Help => format!("{HELP}\n"),
            SessionInput::Invalid(e) => {
                tracing::warn!(line, "Skipping script line: {e}");
                format!("  [warn] {e}\n")
            }
        };

        if !json {
            out.push_str(&format!("> {line}\n"));
            out.push_str(&transcript);
        }
    }

    if json {
        out.push_str(&presenter.view().to_json()?);
        out.push('\n');
    } else {
        out.push('\n');
        out.push_str(&renderer.render(&presenter.view()));
    }

    Ok(out)
}

fn describe(renderer: &TextRenderer, outcome: &Outcome) -> String {
    let mut text = String::new();
    if let Some(alert) = &outcome.alert {
        text.push_str(&renderer.alert(alert));
    }
    text.push_str(&format!("  {}\n", renderer.feedback(&outcome.feedback)));
    text
}

/// Forward session events to the log.
fn spawn_event_logger(events: &EventBus) {
    tokio::spawn(log_events(events.subscribe()));
}

/// Log events until the bus closes, skipping past any lag.
///
/// Returns how many events were logged.
async fn log_events(mut rx: broadcast::Receiver<Arc<DomainEvent>>) -> usize {
    let mut logged = 0;
    loop {
        match rx.recv().await {
            Ok(event) => {
                tracing::debug!(?event, "session event");
                logged += 1;
            }
            Err(RecvError::Lagged(skipped)) => {
                tracing::debug!(skipped, "Event logger lagged");
            }
            Err(RecvError::Closed) => break,
        }
    }
    logged
}

fn prompt() -> std::io::Result<()> {
    print!("  stack > ");
    std::io::stdout().flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use stacksim_launcher::launch;

    fn scripted(capacity: u32, lines: &[&str]) -> String {
        let mut config = AppConfig::default();
        let args = RunArgs {
            capacity: Some(capacity),
            exec: lines.iter().map(|l| l.to_string()).collect(),
            ..RunArgs::default()
        };
        args.apply_to(&mut config).unwrap();
        let mut presenter = launch(&LaunchOptions::from_config(&config)).unwrap();
        let lines: Vec<String> = lines.iter().map(|l| l.to_string()).collect();
        run_script(&mut presenter, &TextRenderer::plain(), &lines, false).unwrap()
    }

    #[test]
    fn classify_meta_commands() {
        assert_eq!(classify("show"), SessionInput::Show);
        assert_eq!(classify(" HELP "), SessionInput::Help);
        assert_eq!(classify("pop"), SessionInput::Command(Command::Pop));
        assert!(matches!(classify("jump"), SessionInput::Invalid(_)));
    }

    #[test]
    fn flags_override_config() {
        let mut config = AppConfig::default();
        let args = RunArgs {
            capacity: Some(8),
            random: Some(Some(3)),
            seed: Some(11),
            no_color: true,
            ..RunArgs::default()
        };
        args.apply_to(&mut config).unwrap();

        assert_eq!(config.launcher.capacity, 8);
        assert_eq!(config.launcher.initial_data, InitialDataMode::Random);
        assert_eq!(config.launcher.random_count, 3);
        assert_eq!(config.launcher.seed, Some(11));
        assert!(!config.display.color);
        assert!(config.display.animate);
    }

    #[test]
    fn random_without_count_keeps_configured_count() {
        let mut config = AppConfig::default();
        let args = RunArgs {
            random: Some(None),
            ..RunArgs::default()
        };
        args.apply_to(&mut config).unwrap();
        assert_eq!(config.launcher.random_count, 5);
    }

    #[test]
    fn out_of_range_flags_rejected() {
        let mut config = AppConfig::default();
        let args = RunArgs {
            capacity: Some(30),
            ..RunArgs::default()
        };
        assert!(args.apply_to(&mut config).is_err());
    }

    #[test]
    fn script_runs_commands_in_order() {
        let out = scripted(5, &["push 10", "push 20; push 30", "peek"]);
        assert!(out.contains("[ok] Pushed: 10"));
        assert!(out.contains("[ok] Pushed: 30"));
        assert!(out.contains("[info] Top element: 30"));
        assert!(out.contains("Current Size: 3"));
    }

    #[test]
    fn script_reports_errors_and_keeps_going() {
        let out = scripted(5, &["pop", "push abc", "dance", "push 1"]);
        assert!(out.contains("[error] Stack Underflow"));
        assert!(out.contains("[warn] Invalid input. Enter numbers only."));
        assert!(out.contains("Unknown command: dance"));
        assert!(out.contains("[ok] Pushed: 1"));
    }

    #[test]
    fn script_json_output_is_only_json() {
        let mut presenter = launch(&LaunchOptions {
            capacity: 5,
            ..LaunchOptions::default()
        })
        .unwrap();
        let lines = vec!["push 4; push 9".to_string(), "pop".to_string()];
        let out = run_script(&mut presenter, &TextRenderer::plain(), &lines, true).unwrap();

        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["size"], 1);
        assert_eq!(value["capacity"], 5);
    }

    #[test]
    fn script_stops_at_exit_word() {
        let out = scripted(5, &["push 1", "EXIT", "push 2"]);
        assert!(out.contains("[ok] Pushed: 1"));
        assert!(!out.contains("Pushed: 2"));
        assert!(!out.contains("Unknown command"));

        let out = scripted(5, &["push 1; quit; push 2"]);
        assert!(!out.contains("Pushed: 2"));
    }

    #[tokio::test]
    async fn event_logger_survives_lag() {
        let bus = EventBus::new(2);
        let rx = bus.subscribe();
        for capacity in 0..5 {
            bus.publish(DomainEvent::StackCleared {
                capacity,
                timestamp: chrono::Utc::now(),
            });
        }
        drop(bus);

        // Three oldest events are overwritten; the last two still arrive
        assert_eq!(log_events(rx).await, 2);
    }
}
