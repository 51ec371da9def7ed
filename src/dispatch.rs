//! Runs dispatched requests off the UI thread.
//!
//! Each request gets its own worker thread. The answer comes back over an
//! mpsc channel that the UI drains on its poll timer; exactly one
//! [`Resolution`] is sent per request, even if the worker panics.

use std::sync::Arc;
use std::sync::mpsc::Sender;

use crate::client::Classifier;
use crate::error::PredictError;
use crate::prediction::Prediction;
use crate::workflow::{Dispatch, RequestTicket};

#[derive(Debug)]
pub struct Resolution {
    pub ticket: RequestTicket,
    pub result: Result<Prediction, PredictError>,
}

/// Sends `Interrupted` on drop unless a real result went out first.
struct ResolutionGuard {
    ticket: RequestTicket,
    tx: Option<Sender<Resolution>>,
}

impl ResolutionGuard {
    fn finish(mut self, result: Result<Prediction, PredictError>) {
        if let Some(tx) = self.tx.take() {
            let _ = tx.send(Resolution {
                ticket: self.ticket,
                result,
            });
        }
    }
}

impl Drop for ResolutionGuard {
    fn drop(&mut self) {
        if let Some(tx) = self.tx.take() {
            tracing::error!("Prediction worker ended without a result");
            let _ = tx.send(Resolution {
                ticket: self.ticket,
                result: Err(PredictError::Interrupted),
            });
        }
    }
}

pub fn spawn_request(
    classifier: Arc<dyn Classifier>,
    dispatch: Dispatch,
    tx: Sender<Resolution>,
) -> std::thread::JoinHandle<()> {
    let guard = ResolutionGuard {
        ticket: dispatch.ticket,
        tx: Some(tx),
    };
    std::thread::spawn(move || {
        let result = classifier.classify(&dispatch.input);
        guard.finish(result);
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::SelectedInput;
    use crate::workflow::{Trigger, Workflow, WorkflowState};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::mpsc;

    struct FakeClassifier {
        calls: AtomicUsize,
        body: &'static str,
    }

    impl Classifier for FakeClassifier {
        fn classify(&self, _input: &SelectedInput) -> Result<Prediction, PredictError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Prediction::from_json(self.body.as_bytes())
        }
    }

    struct PanickingClassifier;

    impl Classifier for PanickingClassifier {
        fn classify(&self, _input: &SelectedInput) -> Result<Prediction, PredictError> {
            panic!("decoder blew up");
        }
    }

    fn dispatch_for(workflow: &mut Workflow, path: &str) -> Dispatch {
        workflow.select_file(path);
        match workflow.trigger() {
            Trigger::Dispatch(d) => d,
            other => panic!("expected a dispatch, got {other:?}"),
        }
    }

    #[test]
    fn worker_reports_result() {
        let fake = Arc::new(FakeClassifier {
            calls: AtomicUsize::new(0),
            body: r#"{"Random_Forest":"AI"}"#,
        });
        let mut wf = Workflow::new();
        let d = dispatch_for(&mut wf, "a.wav");
        let (tx, rx) = mpsc::channel();

        spawn_request(fake.clone(), d, tx).join().unwrap();
        let resolution = rx.recv().unwrap();
        assert!(wf.resolve(resolution.ticket, resolution.result));
        assert_eq!(wf.state(), WorkflowState::Succeeded);
        assert_eq!(fake.calls.load(Ordering::SeqCst), 1);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn panicking_worker_still_releases_in_flight() {
        let mut wf = Workflow::new();
        let d = dispatch_for(&mut wf, "a.wav");
        let (tx, rx) = mpsc::channel();

        assert!(spawn_request(Arc::new(PanickingClassifier), d, tx).join().is_err());
        let resolution = rx.recv().unwrap();
        assert_eq!(resolution.result, Err(PredictError::Interrupted));
        assert!(wf.resolve(resolution.ticket, resolution.result));
        assert_eq!(wf.state(), WorkflowState::Failed);
        assert!(!wf.is_in_flight());
    }

    #[test]
    fn late_answer_for_old_selection_is_ignored() {
        let fake = Arc::new(FakeClassifier {
            calls: AtomicUsize::new(0),
            body: r#"{"Random_Forest":"Human"}"#,
        });
        let mut wf = Workflow::new();
        let d = dispatch_for(&mut wf, "a.wav");
        let (tx, rx) = mpsc::channel();
        spawn_request(fake, d, tx).join().unwrap();

        wf.select_file("b.wav");
        let resolution = rx.recv().unwrap();
        assert!(!wf.resolve(resolution.ticket, resolution.result));
        assert_eq!(wf.state(), WorkflowState::Ready);
    }
}
