//! Line input backed by rustyline.
//!
//! rustyline is synchronous, so it runs on a dedicated thread. Each call to
//! [`LineReader::read_line`] hands the thread a prompt and awaits the line.

use rustyline::{DefaultEditor, error::ReadlineError};
use tokio::sync::mpsc;

/// Async front-end for the readline thread
pub struct LineReader {
    prompt_tx: std::sync::mpsc::Sender<String>,
    line_rx: mpsc::UnboundedReceiver<String>,
}

impl LineReader {
    /// Spawn the readline thread
    pub fn spawn() -> Self {
        let (prompt_tx, prompt_rx) = std::sync::mpsc::channel::<String>();
        let (line_tx, line_rx) = mpsc::unbounded_channel::<String>();

        std::thread::spawn(move || {
            let mut rl = match DefaultEditor::new() {
                Ok(rl) => rl,
                Err(e) => {
                    eprintln!("Failed to initialize readline: {}", e);
                    return;
                }
            };

            while let Ok(prompt) = prompt_rx.recv() {
                match rl.readline(&prompt) {
                    Ok(line) => {
                        if !line.trim().is_empty() {
                            rl.add_history_entry(line.as_str()).ok();
                        }
                        if line_tx.send(line).is_err() {
                            // Channel closed, exit thread
                            break;
                        }
                    }
                    Err(ReadlineError::Interrupted) => {
                        // Ctrl+C
                        tracing::info!("Interrupted");
                        break;
                    }
                    Err(ReadlineError::Eof) => {
                        // Ctrl+D
                        tracing::info!("EOF");
                        break;
                    }
                    Err(err) => {
                        tracing::error!("Readline error: {}", err);
                        break;
                    }
                }
            }
        });

        Self { prompt_tx, line_rx }
    }

    /// Show `prompt` and wait for one line. `None` once input has ended.
    pub async fn read_line(&mut self, prompt: &str) -> Option<String> {
        self.prompt_tx.send(prompt.to_string()).ok()?;
        self.line_rx.recv().await
    }
}
