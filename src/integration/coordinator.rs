use std::collections::VecDeque;
use std::time::Duration;

use tokio::sync::watch;

use crate::{
    core::{
        cmd::{Cmd, Task},
        msg::ModalMsg,
        state::{ModalSnapshot, ModalState, ModalTiming},
        update::update,
    },
    domain::modal::ModalSubject,
    infrastructure::scheduler::{ManualScheduler, Scheduler},
};

/// Receives every committed change of the modal state, in order.
///
/// Called on the UI loop, so implementations should hand work off rather
/// than block.
pub trait ModalObserver: Send {
    fn on_change(&mut self, snapshot: &ModalSnapshot);
}

impl<F> ModalObserver for F
where
    F: FnMut(&ModalSnapshot) + Send,
{
    fn on_change(&mut self, snapshot: &ModalSnapshot) {
        self(snapshot)
    }
}

/// Owns the reply-sheet state and is the only thing allowed to mutate it.
///
/// Requests go through [`update`]; the resulting commands are turned into
/// next-cycle hops (kept here) or timers (handed to `S`). Observers and
/// watch subscribers are notified once per dispatch that changed something.
pub struct ModalCoordinator<S: Scheduler> {
    state: ModalState,
    scheduler: S,
    next_tick: VecDeque<(Task, ModalMsg)>,
    observers: Vec<Box<dyn ModalObserver>>,
    state_tx: watch::Sender<ModalSnapshot>,
    revision: u64,
}

impl<S: Scheduler> ModalCoordinator<S> {
    pub fn new(timing: ModalTiming, scheduler: S) -> Self {
        let state = ModalState::new(timing);
        let (state_tx, _) = watch::channel(state.snapshot(0));

        Self {
            state,
            scheduler,
            next_tick: VecDeque::new(),
            observers: Vec::new(),
            state_tx,
            revision: 0,
        }
    }

    pub fn state(&self) -> &ModalState {
        &self.state
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn snapshot(&self) -> ModalSnapshot {
        self.state.snapshot(self.revision)
    }

    pub fn subscribe(&self) -> watch::Receiver<ModalSnapshot> {
        self.state_tx.subscribe()
    }

    pub fn add_observer(&mut self, observer: Box<dyn ModalObserver>) {
        self.observers.push(observer);
    }

    pub fn enable(&mut self, subject: impl Into<ModalSubject>) {
        self.dispatch(ModalMsg::Enable(subject.into()));
    }

    pub fn disable(&mut self) {
        self.dispatch(ModalMsg::Disable);
    }

    /// Whether a next-cycle hop is waiting for [`ModalCoordinator::tick`]
    pub fn has_next_tick(&self) -> bool {
        !self.next_tick.is_empty()
    }

    /// Runs one UI cycle: delivers the hops queued before this call.
    /// Returns how many were delivered.
    pub fn tick(&mut self) -> usize {
        let ready: Vec<(Task, ModalMsg)> = self.next_tick.drain(..).collect();
        let count = ready.len();
        for (task, msg) in ready {
            tracing::trace!(%task, "next-tick delivery");
            self.dispatch(msg);
        }
        count
    }

    pub fn dispatch(&mut self, msg: ModalMsg) {
        let before = self.snapshot();
        let deferred = msg.is_deferred();

        let (state, commands) = update(msg, std::mem::take(&mut self.state));
        self.state = state;

        for cmd in commands {
            self.execute(cmd);
        }

        let after = self.snapshot();
        if after.differs_from(&before) {
            self.publish(deferred);
        }
    }

    /// Cancels every pending hop and timer
    pub fn shutdown(&mut self) {
        self.next_tick.clear();
        self.scheduler.cancel_all();
    }

    fn execute(&mut self, cmd: Cmd) {
        let task = cmd.task();
        let next_tick = cmd.is_next_tick();
        self.next_tick.retain(|(queued, _)| *queued != task);

        match cmd {
            Cmd::Schedule { msg, .. } if next_tick => {
                self.scheduler.cancel(task);
                self.next_tick.push_back((task, msg));
            }
            Cmd::Schedule { delay, msg, .. } => self.scheduler.schedule(task, delay, msg),
            Cmd::Cancel(_) => self.scheduler.cancel(task),
        }
    }

    fn publish(&mut self, deferred: bool) {
        self.revision += 1;
        let snapshot = self.snapshot();
        tracing::debug!(
            revision = snapshot.revision,
            visibility = %snapshot.visibility,
            post = %snapshot.current_post,
            comment = %snapshot.current_comment,
            deferred,
            "modal state changed"
        );

        for observer in self.observers.iter_mut() {
            observer.on_change(&snapshot);
        }
        self.state_tx.send_replace(snapshot);
    }
}

impl ModalCoordinator<ManualScheduler> {
    /// Coordinator for hosts without tokio; time moves only through
    /// [`ModalCoordinator::advance`].
    pub fn manual(timing: ModalTiming) -> Self {
        Self::new(timing, ManualScheduler::new())
    }

    /// Runs pending hops, moves the virtual clock and delivers whatever came due
    pub fn advance(&mut self, by: Duration) {
        self.tick();
        for msg in self.scheduler.advance(by) {
            self.dispatch(msg);
            self.tick();
        }
    }
}
