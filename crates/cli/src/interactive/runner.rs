//! The interactive event loop.
//!
//! One loop owns the [`Session`] and the [`View`]. Each analysis runs in
//! its own spawned task and reports back over a channel tagged with its
//! request id, so the loop keeps handling input (including quit) while the
//! engine is busy.

use futures::FutureExt;
use std::any::Any;
use std::io;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use whatsurname_core::{AnalysisFailure, AnalysisResult, Analyzer, Presentation};

use super::session::{Effect, RequestId, Session};

/// Something the user did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Line(String),
    Eof,
    Interrupt,
}

/// Where the session is drawn. Only the loop calls it.
pub trait View {
    fn welcome(&mut self, engine: &str) -> io::Result<()>;
    fn prompt(&mut self) -> io::Result<()>;
    /// A request was dispatched; show a busy indicator.
    fn analyzing(&mut self, name: &str) -> io::Result<()>;
    fn show(&mut self, presentation: &Presentation) -> io::Result<()>;
    fn farewell(&mut self) -> io::Result<()>;
}

type Completion = (RequestId, Result<AnalysisResult, AnalysisFailure>);

fn panic_message(payload: &(dyn Any + Send)) -> String {
    let detail = payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown cause".to_string());
    format!("analysis worker panicked: {}", detail)
}

/// Run the session until a quit sentinel, EOF, an interrupt, or the input
/// channel closing. In-flight work is aborted, not awaited.
pub async fn run_session<V: View>(
    analyzer: Arc<dyn Analyzer>,
    mut inputs: mpsc::UnboundedReceiver<InputEvent>,
    view: &mut V,
) -> io::Result<()> {
    let (done_tx, mut done_rx) = mpsc::unbounded_channel::<Completion>();
    let mut session = Session::new();
    let mut worker: Option<JoinHandle<()>> = None;

    view.welcome(&analyzer.describe())?;
    view.prompt()?;

    loop {
        let effect = tokio::select! {
            input = inputs.recv() => match input {
                Some(InputEvent::Line(line)) => session.submit_line(&line),
                Some(InputEvent::Eof) | Some(InputEvent::Interrupt) | None => session.quit(),
            },
            Some((id, outcome)) = done_rx.recv() => session.complete(id, outcome),
        };
        debug!(state = ?session.state(), "session advanced");

        match effect {
            Effect::Dispatch {
                id,
                request,
                superseded,
            } => {
                if let Some(old) = worker.take() {
                    old.abort();
                }
                if let Some(old_id) = superseded {
                    debug!(old_id, new_id = id, "superseding in-flight analysis");
                }

                view.analyzing(request.name())?;

                let analyzer = Arc::clone(&analyzer);
                let done_tx = done_tx.clone();
                worker = Some(tokio::spawn(async move {
                    let outcome = AssertUnwindSafe(analyzer.analyze(&request))
                        .catch_unwind()
                        .await
                        .unwrap_or_else(|payload| {
                            Err(AnalysisFailure::unexpected(panic_message(payload.as_ref())))
                        });
                    // The loop may be gone already; nothing to report to.
                    let _ = done_tx.send((id, outcome));
                }));
            }
            Effect::Render(presentation) => {
                view.show(&presentation)?;
                view.prompt()?;
            }
            Effect::Discard => {
                debug!("discarded stale analysis result");
            }
            Effect::Quit { abandoned } => {
                if let Some(handle) = worker.take() {
                    handle.abort();
                }
                if let Some(id) = abandoned {
                    debug!(id, "abandoning in-flight analysis");
                }
                view.farewell()?;
                return Ok(());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use async_trait::async_trait;
    use whatsurname_core::{
        testing::{fixtures, MockAnalyzer},
        AnalysisRequest, FailureKind,
    };

    /// Panics on "Anna", answers every other name.
    struct PanickyAnalyzer;

    #[async_trait]
    impl Analyzer for PanickyAnalyzer {
        fn describe(&self) -> String {
            "panicky".to_string()
        }

        async fn analyze(
            &self,
            request: &AnalysisRequest,
        ) -> Result<AnalysisResult, AnalysisFailure> {
            if request.name() == "Anna" {
                panic!("engine client blew up");
            }
            Ok(fixtures::analysis_for(request.name()))
        }
    }

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum ViewEvent {
        Welcome(String),
        Prompt,
        Analyzing(String),
        Show(Presentation),
        Farewell,
    }

    #[derive(Debug, Default)]
    struct RecordingView {
        events: Vec<ViewEvent>,
    }

    impl RecordingView {
        fn shown(&self) -> Vec<&Presentation> {
            self.events
                .iter()
                .filter_map(|event| match event {
                    ViewEvent::Show(presentation) => Some(presentation),
                    _ => None,
                })
                .collect()
        }

        fn shown_names(&self) -> Vec<String> {
            self.shown()
                .into_iter()
                .filter_map(|presentation| match presentation {
                    Presentation::Profile(profile) => Some(profile.name.clone()),
                    Presentation::Failure { .. } => None,
                })
                .collect()
        }
    }

    impl View for RecordingView {
        fn welcome(&mut self, engine: &str) -> io::Result<()> {
            self.events.push(ViewEvent::Welcome(engine.to_string()));
            Ok(())
        }

        fn prompt(&mut self) -> io::Result<()> {
            self.events.push(ViewEvent::Prompt);
            Ok(())
        }

        fn analyzing(&mut self, name: &str) -> io::Result<()> {
            self.events.push(ViewEvent::Analyzing(name.to_string()));
            Ok(())
        }

        fn show(&mut self, presentation: &Presentation) -> io::Result<()> {
            self.events.push(ViewEvent::Show(presentation.clone()));
            Ok(())
        }

        fn farewell(&mut self) -> io::Result<()> {
            self.events.push(ViewEvent::Farewell);
            Ok(())
        }
    }

    /// Start the loop on its own task; the view comes back when it ends.
    fn start(
        analyzer: &MockAnalyzer,
    ) -> (
        mpsc::UnboundedSender<InputEvent>,
        JoinHandle<RecordingView>,
    ) {
        start_with(Arc::new(analyzer.clone()))
    }

    fn start_with(
        analyzer: Arc<dyn Analyzer>,
    ) -> (
        mpsc::UnboundedSender<InputEvent>,
        JoinHandle<RecordingView>,
    ) {
        let (tx, rx) = mpsc::unbounded_channel();
        let handle = tokio::spawn(async move {
            let mut view = RecordingView::default();
            run_session(analyzer, rx, &mut view).await.unwrap();
            view
        });
        (tx, handle)
    }

    fn line(text: &str) -> InputEvent {
        InputEvent::Line(text.to_string())
    }

    #[tokio::test(start_paused = true)]
    async fn test_single_analysis_then_quit() {
        let analyzer = MockAnalyzer::new();
        analyzer.set_delay(Duration::from_secs(2)).await;
        let (tx, handle) = start(&analyzer);

        tx.send(line("Mikhail")).unwrap();
        tokio::time::sleep(Duration::from_secs(5)).await;
        tx.send(line("quit")).unwrap();

        let view = handle.await.unwrap();
        assert_eq!(
            view.events.first(),
            Some(&ViewEvent::Welcome("mock · mock-model".to_string()))
        );
        assert!(view
            .events
            .contains(&ViewEvent::Analyzing("Mikhail".to_string())));
        assert_eq!(view.shown_names(), vec!["Mikhail"]);
        assert_eq!(view.events.last(), Some(&ViewEvent::Farewell));
    }

    #[tokio::test(start_paused = true)]
    async fn test_loop_stays_responsive_while_busy() {
        let analyzer = MockAnalyzer::new();
        analyzer.set_delay(Duration::from_secs(3600)).await;
        let (tx, handle) = start(&analyzer);

        tx.send(line("Mikhail")).unwrap();
        tokio::time::sleep(Duration::from_millis(10)).await;
        tx.send(InputEvent::Interrupt).unwrap();

        let view = handle.await.unwrap();
        assert!(view.shown().is_empty());
        assert_eq!(view.events.last(), Some(&ViewEvent::Farewell));
        assert_eq!(analyzer.recorded_names().await, vec!["Mikhail"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_newer_submission_supersedes_older() {
        let analyzer = MockAnalyzer::new();
        analyzer.set_delay_for("Anna", Duration::from_secs(5)).await;
        analyzer.set_delay_for("Boris", Duration::from_secs(1)).await;
        let (tx, handle) = start(&analyzer);

        tx.send(line("Anna")).unwrap();
        tokio::time::sleep(Duration::from_millis(100)).await;
        tx.send(line("Boris")).unwrap();
        tokio::time::sleep(Duration::from_secs(10)).await;
        tx.send(line("exit")).unwrap();

        let view = handle.await.unwrap();
        assert_eq!(view.shown_names(), vec!["Boris"]);

        let Presentation::Profile(profile) = view.shown()[0] else {
            panic!("expected a profile");
        };
        assert!(profile.rows().all(|row| !row.value.contains("Anna")));
        assert!(profile.reasoning.contains("Boris"));
        assert_eq!(analyzer.recorded_names().await, vec!["Anna", "Boris"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_quit_while_in_flight_leaves_nothing_behind() {
        let analyzer = MockAnalyzer::new();
        analyzer.set_delay_for("Anna", Duration::from_secs(30)).await;
        let (tx, handle) = start(&analyzer);

        tx.send(line("Anna")).unwrap();
        tokio::time::sleep(Duration::from_millis(100)).await;
        tx.send(line("")).unwrap();

        let view = handle.await.unwrap();
        tokio::time::sleep(Duration::from_secs(60)).await;

        assert!(view.shown().is_empty());
        assert_eq!(view.events.last(), Some(&ViewEvent::Farewell));
        // Sends after the loop is gone must not panic or block.
        assert!(tx.send(line("Boris")).is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_keeps_session_alive() {
        let analyzer = MockAnalyzer::new();
        analyzer
            .set_outcome_for("Zed", Err(AnalysisFailure::engine_unavailable("down")))
            .await;
        let (tx, handle) = start(&analyzer);

        tx.send(line("Zed")).unwrap();
        tokio::time::sleep(Duration::from_millis(100)).await;
        tx.send(line("Anna")).unwrap();
        tokio::time::sleep(Duration::from_millis(100)).await;
        tx.send(line("quit")).unwrap();

        let view = handle.await.unwrap();
        let shown = view.shown();
        assert_eq!(shown.len(), 2);
        assert!(matches!(
            shown[0],
            Presentation::Failure {
                kind: FailureKind::EngineUnavailable,
                ..
            }
        ));
        assert_eq!(view.shown_names(), vec!["Anna"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_worker_panic_is_rendered_as_unexpected_failure() {
        let (tx, handle) = start_with(Arc::new(PanickyAnalyzer));

        tx.send(line("Anna")).unwrap();
        tokio::time::sleep(Duration::from_secs(60)).await;
        tx.send(line("Boris")).unwrap();
        tokio::time::sleep(Duration::from_secs(1)).await;
        tx.send(line("quit")).unwrap();

        let view = handle.await.unwrap();
        let shown = view.shown();
        assert_eq!(shown.len(), 2);
        let Presentation::Failure { kind, message } = shown[0] else {
            panic!("expected a failure block");
        };
        assert_eq!(*kind, FailureKind::Unexpected);
        assert!(message.contains("engine client blew up"));
        assert_eq!(view.shown_names(), vec!["Boris"]);
        assert_eq!(view.events.last(), Some(&ViewEvent::Farewell));
    }

    #[tokio::test]
    async fn test_eof_ends_session() {
        let analyzer = MockAnalyzer::new();
        let (tx, handle) = start(&analyzer);

        tx.send(InputEvent::Eof).unwrap();

        let view = handle.await.unwrap();
        assert_eq!(
            view.events,
            vec![
                ViewEvent::Welcome("mock · mock-model".to_string()),
                ViewEvent::Prompt,
                ViewEvent::Farewell
            ]
        );
        assert_eq!(analyzer.call_count().await, 0);
    }

    #[tokio::test]
    async fn test_closed_input_channel_ends_session() {
        let analyzer = MockAnalyzer::new();
        let (tx, handle) = start(&analyzer);
        drop(tx);

        let view = handle.await.unwrap();
        assert_eq!(view.events.last(), Some(&ViewEvent::Farewell));
    }
}
