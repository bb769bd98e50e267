use std::io::{self, BufRead, Write};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use colored::Colorize;

use super::DisplaySurface;
use crate::error::Result;

// CONSOLE DISPLAY COMPONENT ---------------------------------------------------

/// Terminal-backed display surface. Stimulus text goes to stdout; key input
/// is read line-by-line from stdin on a background thread so that polling
/// never blocks the sequencer loop. Typing `escape` and return counts as
/// pressing the abort key.
pub struct ConsoleDisplay {
    keys: Receiver<String>,
}

impl ConsoleDisplay {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let stdin = io::stdin();
            for line in stdin.lock().lines() {
                let line = match line {
                    Ok(l) => l,
                    Err(_) => break,
                };
                if tx.send(line.trim().to_string()).is_err() {
                    break;
                }
            }
        });
        ConsoleDisplay { keys: rx }
    }
}

impl Default for ConsoleDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplaySurface for ConsoleDisplay {
    fn show(&mut self, text: &str) -> Result<()> {
        println!("\n{}\n", text.white().bold());
        io::stdout().flush()?;
        Ok(())
    }

    fn keys_pressed(&mut self) -> Result<Vec<String>> {
        let mut pressed = Vec::new();
        loop {
            match self.keys.try_recv() {
                Ok(key) => pressed.push(key),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        Ok(pressed)
    }

    fn wait_for_key(&mut self) -> Result<()> {
        // blocks until the reader thread forwards a line; EOF counts as a key
        let _ = self.keys.recv();
        Ok(())
    }

    fn prompt(&mut self, title: &str) -> Result<Option<String>> {
        println!("{}", title.cyan().bold());
        print!("> ");
        io::stdout().flush()?;
        match self.keys.recv() {
            Ok(line) if !line.is_empty() => Ok(Some(line)),
            _ => Ok(None),
        }
    }
}
