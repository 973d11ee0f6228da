//! Interactive frontend: a prompt loop that stays responsive while an
//! analysis runs.

mod runner;
mod session;
mod terminal;

use std::io;
use std::sync::Arc;
use tokio::sync::mpsc;

use whatsurname_core::Analyzer;

use terminal::{spawn_interrupt_forwarder, spawn_stdin_reader, TerminalView};

/// Run the session on the current terminal until the user leaves.
pub async fn run(analyzer: Arc<dyn Analyzer>) -> io::Result<()> {
    let (tx, rx) = mpsc::unbounded_channel();
    spawn_stdin_reader(tx.clone())?;
    spawn_interrupt_forwarder(tx);

    let mut view = TerminalView::new();
    runner::run_session(analyzer, rx, &mut view).await
}
