//! Terminal side of the interactive session: styled output on stdout, a
//! spinner on stderr, and stdin plus Ctrl-C turned into [`InputEvent`]s.

use console::{style, Term};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, BufRead};
use std::time::Duration;
use tokio::signal;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use whatsurname_core::Presentation;

use super::runner::{InputEvent, View};
use crate::render;

const SPINNER_TICK: Duration = Duration::from_millis(80);

pub struct TerminalView {
    term: Term,
    spinner: Option<ProgressBar>,
}

impl TerminalView {
    pub fn new() -> Self {
        Self {
            term: Term::stdout(),
            spinner: None,
        }
    }

    fn clear_spinner(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }
}

impl Default for TerminalView {
    fn default() -> Self {
        Self::new()
    }
}

impl View for TerminalView {
    fn welcome(&mut self, engine: &str) -> io::Result<()> {
        self.term.write_line("")?;
        self.term.write_line(&format!(
            "{}",
            style("Onomastic Intelligence Utility").magenta().bold()
        ))?;
        self.term
            .write_line(&format!("{}", style(format!("Powered by {}", engine)).dim()))?;
        self.term
            .write_line(&format!("{}", style("Type 'quit' or 'exit' to stop").dim()))?;
        self.term.write_line("")
    }

    fn prompt(&mut self) -> io::Result<()> {
        self.term
            .write_str(&format!("{} ", style("Enter a name:").green().bold()))?;
        self.term.flush()
    }

    fn analyzing(&mut self, name: &str) -> io::Result<()> {
        self.clear_spinner();

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.blue} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.set_message(format!("Analyzing '{}'...", name));
        spinner.enable_steady_tick(SPINNER_TICK);
        self.spinner = Some(spinner);
        Ok(())
    }

    fn show(&mut self, presentation: &Presentation) -> io::Result<()> {
        self.clear_spinner();
        self.term.write_line("")?;
        self.term.write_str(&render::styled(presentation, true))?;
        self.term.write_line("")
    }

    fn farewell(&mut self) -> io::Result<()> {
        self.clear_spinner();
        self.term.write_line("")?;
        self.term
            .write_line(&format!("{}", style("Exiting...").yellow()))
    }
}

/// Forward stdin lines, then EOF, into `tx`.
///
/// Runs on a plain thread: a blocking read must not hold up runtime
/// shutdown.
pub fn spawn_stdin_reader(tx: mpsc::UnboundedSender<InputEvent>) -> io::Result<()> {
    std::thread::Builder::new()
        .name("stdin-reader".to_string())
        .spawn(move || {
            for line in io::stdin().lock().lines() {
                match line {
                    Ok(line) => {
                        if tx.send(InputEvent::Line(line)).is_err() {
                            return;
                        }
                    }
                    Err(e) => {
                        warn!("Failed to read stdin: {}", e);
                        break;
                    }
                }
            }
            debug!("stdin closed");
            let _ = tx.send(InputEvent::Eof);
        })?;
    Ok(())
}

/// Forward Ctrl-C into `tx` as [`InputEvent::Interrupt`].
pub fn spawn_interrupt_forwarder(tx: mpsc::UnboundedSender<InputEvent>) {
    tokio::spawn(async move {
        match signal::ctrl_c().await {
            Ok(()) => {
                let _ = tx.send(InputEvent::Interrupt);
            }
            Err(e) => warn!("Failed to install Ctrl+C handler: {}", e),
        }
    });
}
