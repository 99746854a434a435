//! Terminal input — reads command lines from stdin.
//!
//! A background task forwards trimmed, non-blank lines over a channel so the
//! session loop handles exactly one command at a time, in order.

use tokio::io::{self, AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

/// Lines that end the session.
pub fn is_exit_command(line: &str) -> bool {
    matches!(line, "exit" | "quit" | "/exit" | "/quit" | ":q")
}

/// Interactive stdin reader for the simulator session.
pub struct TerminalInput {
    buffer: usize,
}

impl TerminalInput {
    pub fn new() -> Self {
        Self { buffer: 32 }
    }

    /// Spawn the reader. The channel closes on EOF (Ctrl+D) or an exit command.
    pub fn start(&self) -> mpsc::Receiver<Result<String, io::Error>> {
        let (tx, rx) = mpsc::channel(self.buffer);

        tokio::spawn(async move {
            let stdin = io::stdin();
            let reader = BufReader::new(stdin);
            let mut lines = reader.lines();

            loop {
                match lines.next_line().await {
                    Ok(Some(line)) => {
                        let line = line.trim().to_string();
                        if line.is_empty() {
                            continue;
                        }

                        if is_exit_command(&line.to_ascii_lowercase()) {
                            break;
                        }

                        if tx.send(Ok(line)).await.is_err() {
                            break;
                        }
                    }
                    Ok(None) => break, // EOF (Ctrl+D)
                    Err(e) => {
                        let _ = tx.send(Err(e)).await;
                        break;
                    }
                }
            }
        });

        rx
    }
}

impl Default for TerminalInput {
    fn default() -> Self {
        Self::new()
    }
}
