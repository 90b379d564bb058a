//! Submission cycle of the symptom form.
//!
//! One cycle: enter loading, send the form, render whatever comes back,
//! leave loading. The controller knows the page only through
//! [`SubmissionView`] and the network only through [`PredictTransport`].

use std::cell::Cell;
use std::rc::Rc;

use contracts::usecases::u101_symptom_check::PredictionResult;

use super::form_fields::FormFields;

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("network error: {0}")]
    Network(String),
    #[error("HTTP status {0}")]
    Status(u16),
    #[error("invalid response body: {0}")]
    Decode(String),
}

/// Page side of a submission cycle.
pub trait SubmissionView {
    /// In-progress label, spinner shown, submit disabled, result hidden.
    fn enter_loading(&self);
    /// Restores the label, hides the spinner, re-enables submit.
    fn exit_loading(&self);
    /// Replaces the result region with a card for `result` and shows it.
    fn render(&self, result: PredictionResult);
}

/// Network side of a submission cycle.
#[allow(async_fn_in_trait)]
pub trait PredictTransport {
    async fn predict(&self, fields: FormFields) -> Result<PredictionResult, SubmitError>;
}

impl<V: SubmissionView + ?Sized> SubmissionView for Rc<V> {
    fn enter_loading(&self) {
        (**self).enter_loading()
    }

    fn exit_loading(&self) {
        (**self).exit_loading()
    }

    fn render(&self, result: PredictionResult) {
        (**self).render(result)
    }
}

impl<T: PredictTransport + ?Sized> PredictTransport for Rc<T> {
    async fn predict(&self, fields: FormFields) -> Result<PredictionResult, SubmitError> {
        (**self).predict(fields).await
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubmissionState {
    pub in_flight: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A cycle was already in flight; nothing was sent.
    Ignored,
    Completed,
}

struct Inner<T, V> {
    transport: T,
    view: V,
    state: Cell<SubmissionState>,
}

/// Cheap to clone; clones share the same in-flight state.
pub struct SubmissionController<T, V> {
    inner: Rc<Inner<T, V>>,
}

impl<T, V> Clone for SubmissionController<T, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: PredictTransport, V: SubmissionView> SubmissionController<T, V> {
    pub fn new(transport: T, view: V) -> Self {
        Self {
            inner: Rc::new(Inner {
                transport,
                view,
                state: Cell::new(SubmissionState::default()),
            }),
        }
    }

    pub fn state(&self) -> SubmissionState {
        self.inner.state.get()
    }

    /// Enters loading synchronously and hands back the pending cycle.
    /// Returns `None` while another cycle is in flight.
    pub fn begin(&self, fields: FormFields) -> Option<SubmissionCycle<T, V>> {
        let guard = LoadingGuard::acquire(&self.inner)?;
        Some(SubmissionCycle { guard, fields })
    }

    /// `begin` followed by `run`.
    pub async fn submit(&self, fields: FormFields) -> SubmitOutcome {
        match self.begin(fields) {
            Some(cycle) => {
                cycle.run().await;
                SubmitOutcome::Completed
            }
            None => {
                log::debug!("Submission ignored: a request is already in flight");
                SubmitOutcome::Ignored
            }
        }
    }
}

/// Holds the loading state; dropping it releases the state on every exit
/// path, unwinding included.
struct LoadingGuard<T: PredictTransport, V: SubmissionView> {
    inner: Rc<Inner<T, V>>,
}

impl<T: PredictTransport, V: SubmissionView> LoadingGuard<T, V> {
    fn acquire(inner: &Rc<Inner<T, V>>) -> Option<Self> {
        if inner.state.get().in_flight {
            return None;
        }
        inner.state.set(SubmissionState { in_flight: true });
        inner.view.enter_loading();
        Some(Self {
            inner: Rc::clone(inner),
        })
    }
}

impl<T: PredictTransport, V: SubmissionView> Drop for LoadingGuard<T, V> {
    fn drop(&mut self) {
        self.inner.state.set(SubmissionState { in_flight: false });
        self.inner.view.exit_loading();
    }
}

/// A started submission; loading is already entered.
pub struct SubmissionCycle<T: PredictTransport, V: SubmissionView> {
    guard: LoadingGuard<T, V>,
    fields: FormFields,
}

impl<T: PredictTransport, V: SubmissionView> SubmissionCycle<T, V> {
    pub async fn run(self) {
        let Self { guard, fields } = self;
        let inner = Rc::clone(&guard.inner);

        let result = match inner.transport.predict(fields).await {
            Ok(result) => result,
            Err(e) => {
                log::error!("Prediction request failed: {}", e);
                PredictionResult::generic_failure()
            }
        };

        inner.view.render(result);
        drop(guard);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::usecases::u101_symptom_check::GENERIC_ERROR_MESSAGE;
    use futures::channel::oneshot;
    use futures::executor::block_on;
    use futures::FutureExt;
    use std::cell::RefCell;
    use std::collections::VecDeque;

    #[derive(Debug, Clone, PartialEq)]
    enum ViewEvent {
        EnterLoading,
        ExitLoading,
        Render(PredictionResult),
    }

    #[derive(Default)]
    struct RecordingView {
        events: RefCell<Vec<ViewEvent>>,
        panic_on_render: Cell<bool>,
    }

    impl RecordingView {
        fn events(&self) -> Vec<ViewEvent> {
            self.events.borrow().clone()
        }

        fn count(&self, event: &ViewEvent) -> usize {
            self.events.borrow().iter().filter(|e| *e == event).count()
        }
    }

    impl SubmissionView for RecordingView {
        fn enter_loading(&self) {
            self.events.borrow_mut().push(ViewEvent::EnterLoading);
        }

        fn exit_loading(&self) {
            self.events.borrow_mut().push(ViewEvent::ExitLoading);
        }

        fn render(&self, result: PredictionResult) {
            self.events.borrow_mut().push(ViewEvent::Render(result));
            if self.panic_on_render.get() {
                panic!("render failed");
            }
        }
    }

    /// Answers from a queue of canned replies, or waits on a channel.
    #[derive(Default)]
    struct FakeTransport {
        replies: RefCell<VecDeque<Result<PredictionResult, SubmitError>>>,
        pending: RefCell<Option<oneshot::Receiver<Result<PredictionResult, SubmitError>>>>,
        requests: RefCell<Vec<FormFields>>,
    }

    impl FakeTransport {
        fn replying(reply: Result<PredictionResult, SubmitError>) -> Self {
            let transport = Self::default();
            transport.replies.borrow_mut().push_back(reply);
            transport
        }

        fn request_count(&self) -> usize {
            self.requests.borrow().len()
        }
    }

    impl PredictTransport for FakeTransport {
        async fn predict(&self, fields: FormFields) -> Result<PredictionResult, SubmitError> {
            self.requests.borrow_mut().push(fields);
            let pending = self.pending.borrow_mut().take();
            if let Some(rx) = pending {
                return rx.await.unwrap_or_else(|_| Err(SubmitError::Network("dropped".into())));
            }
            self.replies
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Err(SubmitError::Network("no reply queued".into())))
        }
    }

    fn fever_and_cough() -> FormFields {
        FormFields::new()
            .with("symptoms", "fever")
            .with("symptoms", "cough")
    }

    fn flu() -> PredictionResult {
        PredictionResult::Success {
            prediction: "Flu".into(),
            suggestion: "Rest and hydrate.".into(),
            confidence: None,
        }
    }

    #[test]
    fn test_success_renders_between_enter_and_exit() {
        let transport = Rc::new(FakeTransport::replying(Ok(flu())));
        let view = Rc::new(RecordingView::default());
        let controller = SubmissionController::new(transport.clone(), view.clone());

        let outcome = block_on(controller.submit(fever_and_cough()));

        assert_eq!(outcome, SubmitOutcome::Completed);
        assert_eq!(
            view.events(),
            vec![
                ViewEvent::EnterLoading,
                ViewEvent::Render(flu()),
                ViewEvent::ExitLoading
            ]
        );
        assert_eq!(
            transport.requests.borrow()[0].values("symptoms").collect::<Vec<_>>(),
            vec!["fever", "cough"]
        );
        assert!(!controller.state().in_flight);
    }

    #[test]
    fn test_transport_failure_renders_generic_message() {
        let transport = FakeTransport::replying(Err(SubmitError::Status(500)));
        let view = Rc::new(RecordingView::default());
        let controller = SubmissionController::new(transport, view.clone());

        block_on(controller.submit(fever_and_cough()));

        assert_eq!(
            view.events()[1],
            ViewEvent::Render(PredictionResult::failure(GENERIC_ERROR_MESSAGE))
        );
        assert_eq!(view.events().last(), Some(&ViewEvent::ExitLoading));
    }

    #[test]
    fn test_application_error_is_rendered_verbatim() {
        let reply = PredictionResult::failure("Insufficient symptoms provided.");
        let transport = FakeTransport::replying(Ok(reply.clone()));
        let view = Rc::new(RecordingView::default());
        let controller = SubmissionController::new(transport, view.clone());

        block_on(controller.submit(FormFields::new()));

        assert_eq!(view.events()[1], ViewEvent::Render(reply));
    }

    #[test]
    fn test_second_submit_is_ignored_while_in_flight() {
        let (tx, rx) = oneshot::channel();
        let transport = Rc::new(FakeTransport::default());
        *transport.pending.borrow_mut() = Some(rx);
        let view = Rc::new(RecordingView::default());
        let controller = SubmissionController::new(transport.clone(), view.clone());

        let first = controller
            .begin(fever_and_cough())
            .expect("first submission starts");
        assert!(controller.state().in_flight);

        let mut running = Box::pin(first.run());
        assert!(running.as_mut().now_or_never().is_none());
        assert_eq!(transport.request_count(), 1);

        // Second click while the first request is outstanding
        assert!(controller.begin(fever_and_cough()).is_none());
        assert_eq!(
            block_on(controller.submit(fever_and_cough())),
            SubmitOutcome::Ignored
        );
        assert_eq!(transport.request_count(), 1);
        assert_eq!(view.count(&ViewEvent::EnterLoading), 1);

        tx.send(Ok(flu())).expect("receiver alive");
        block_on(running);

        assert!(!controller.state().in_flight);
        assert_eq!(view.count(&ViewEvent::ExitLoading), 1);
        assert!(controller.begin(fever_and_cough()).is_some());
    }

    #[test]
    fn test_loading_enter_and_exit_stay_balanced() {
        let transport = Rc::new(FakeTransport::default());
        {
            let mut replies = transport.replies.borrow_mut();
            replies.push_back(Ok(flu()));
            replies.push_back(Err(SubmitError::Decode("eof".into())));
            replies.push_back(Ok(PredictionResult::failure("nope")));
        }
        let view = Rc::new(RecordingView::default());
        let controller = SubmissionController::new(transport.clone(), view.clone());

        for _ in 0..3 {
            block_on(controller.submit(fever_and_cough()));
        }

        let events = view.events();
        assert_eq!(view.count(&ViewEvent::EnterLoading), 3);
        assert_eq!(view.count(&ViewEvent::ExitLoading), 3);
        // Every exit directly follows the render of its own cycle
        for chunk in events.chunks(3) {
            assert_eq!(chunk[0], ViewEvent::EnterLoading);
            assert!(matches!(chunk[1], ViewEvent::Render(_)));
            assert_eq!(chunk[2], ViewEvent::ExitLoading);
        }
    }

    #[test]
    fn test_identical_submissions_are_not_deduplicated() {
        let transport = Rc::new(FakeTransport::default());
        transport.replies.borrow_mut().extend([Ok(flu()), Ok(flu())]);
        let view = Rc::new(RecordingView::default());
        let controller = SubmissionController::new(transport.clone(), view);

        block_on(controller.submit(fever_and_cough()));
        block_on(controller.submit(fever_and_cough()));

        assert_eq!(transport.request_count(), 2);
    }

    #[test]
    fn test_loading_is_released_when_render_panics() {
        let transport = FakeTransport::replying(Ok(flu()));
        let view = Rc::new(RecordingView::default());
        view.panic_on_render.set(true);
        let controller = SubmissionController::new(transport, view.clone());

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            block_on(controller.submit(fever_and_cough()))
        }));

        assert!(result.is_err());
        assert!(!controller.state().in_flight);
        assert_eq!(view.events().last(), Some(&ViewEvent::ExitLoading));
    }

    #[test]
    fn test_dropping_unstarted_cycle_releases_loading() {
        let transport = FakeTransport::default();
        let view = Rc::new(RecordingView::default());
        let controller = SubmissionController::new(transport, view.clone());

        let cycle = controller.begin(FormFields::new()).expect("starts");
        drop(cycle);

        assert!(!controller.state().in_flight);
        assert_eq!(
            view.events(),
            vec![ViewEvent::EnterLoading, ViewEvent::ExitLoading]
        );
    }
}
