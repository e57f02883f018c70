use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;

use crate::{
    core::{
        msg::ModalMsg,
        state::{ModalSnapshot, ModalTiming},
    },
    domain::modal::ModalSubject,
    infrastructure::scheduler::TokioScheduler,
    integration::coordinator::{ModalCoordinator, ModalObserver},
};

enum Request {
    Dispatch(ModalMsg),
    AddObserver(Box<dyn ModalObserver>),
    Flush(oneshot::Sender<ModalSnapshot>),
    Shutdown,
}

/// The UI loop: a single task that owns the coordinator.
///
/// Every mutation happens here, one request at a time. At the top of each
/// cycle the hops queued by the previous request are delivered, so they
/// always land before the next request is looked at.
pub struct ModalRuntime {
    coordinator: ModalCoordinator<TokioScheduler>,
    requests: mpsc::UnboundedReceiver<Request>,
    timers: mpsc::UnboundedReceiver<ModalMsg>,
}

impl ModalRuntime {
    pub fn new(timing: ModalTiming) -> (Self, ModalHandle) {
        let (scheduler, timers) = TokioScheduler::new();
        let coordinator = ModalCoordinator::new(timing, scheduler);
        let (request_tx, requests) = mpsc::unbounded_channel();
        let handle = ModalHandle {
            requests: request_tx,
            state_rx: coordinator.subscribe(),
        };

        let runtime = Self {
            coordinator,
            requests,
            timers,
        };
        (runtime, handle)
    }

    /// Starts the loop on the current tokio runtime
    pub fn spawn(timing: ModalTiming) -> (ModalHandle, JoinHandle<()>) {
        let (runtime, handle) = Self::new(timing);
        let join = tokio::spawn(runtime.run());
        (handle, join)
    }

    pub async fn run(mut self) {
        tracing::info!("modal loop started");

        loop {
            self.coordinator.tick();

            tokio::select! {
                biased;

                Some(msg) = self.timers.recv() => {
                    self.coordinator.dispatch(msg);
                }
                request = self.requests.recv() => match request {
                    Some(Request::Dispatch(msg)) => self.coordinator.dispatch(msg),
                    Some(Request::AddObserver(observer)) => self.coordinator.add_observer(observer),
                    Some(Request::Flush(reply)) => {
                        let _ = reply.send(self.coordinator.snapshot());
                    }
                    Some(Request::Shutdown) | None => break,
                },
            }
        }

        self.coordinator.shutdown();
        tracing::info!("modal loop stopped");
    }
}

/// Cloneable front door to the UI loop, meant to live in application context.
///
/// Requests are fire-and-forget; state comes back through
/// [`ModalHandle::subscribe`], observers, or [`ModalHandle::flush`].
#[derive(Clone)]
pub struct ModalHandle {
    requests: mpsc::UnboundedSender<Request>,
    state_rx: watch::Receiver<ModalSnapshot>,
}

impl ModalHandle {
    pub fn enable(&self, subject: impl Into<ModalSubject>) {
        self.send(Request::Dispatch(ModalMsg::Enable(subject.into())));
    }

    pub fn disable(&self) {
        self.send(Request::Dispatch(ModalMsg::Disable));
    }

    pub fn add_observer(&self, observer: impl ModalObserver + 'static) {
        self.send(Request::AddObserver(Box::new(observer)));
    }

    /// Latest published state
    pub fn snapshot(&self) -> ModalSnapshot {
        self.state_rx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ModalSnapshot> {
        self.state_rx.clone()
    }

    /// Waits until every request sent before this call has been handled,
    /// including the next-cycle hops they caused. `None` once the loop is gone.
    pub async fn flush(&self) -> Option<ModalSnapshot> {
        let (tx, rx) = oneshot::channel();
        self.requests.send(Request::Flush(tx)).ok()?;
        rx.await.ok()
    }

    pub fn shutdown(&self) {
        self.send(Request::Shutdown);
    }

    pub fn is_closed(&self) -> bool {
        self.requests.is_closed()
    }

    fn send(&self, request: Request) {
        if self.requests.send(request).is_err() {
            tracing::warn!("modal loop is not running; request dropped");
        }
    }
}
