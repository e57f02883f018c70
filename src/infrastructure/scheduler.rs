use std::collections::HashMap;
use std::time::Duration;

use strum::IntoEnumIterator;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::core::{cmd::Task, msg::ModalMsg};

/// Timer backend for deferred modal work.
///
/// Only non-zero delays reach a scheduler; next-cycle hops are queued by the
/// coordinator itself. Each [`Task`] slot holds at most one pending message:
/// scheduling into an occupied slot replaces it.
pub trait Scheduler {
    fn schedule(&mut self, task: Task, delay: Duration, msg: ModalMsg);

    fn cancel(&mut self, task: Task);

    fn cancel_all(&mut self) {
        for task in Task::iter() {
            self.cancel(task);
        }
    }
}

#[derive(Debug)]
struct Timer {
    token: CancellationToken,
    handle: JoinHandle<()>,
}

impl Timer {
    /// Neither cancelled nor delivered yet
    fn is_live(&self) -> bool {
        !self.token.is_cancelled() && !self.handle.is_finished()
    }
}

/// Scheduler backed by tokio timers.
///
/// Expired messages are posted to the receiver returned by [`TokioScheduler::new`],
/// which the UI loop drains alongside its other inputs. Must be used from
/// within a tokio runtime.
#[derive(Debug)]
pub struct TokioScheduler {
    tx: mpsc::UnboundedSender<ModalMsg>,
    pending: HashMap<Task, Timer>,
}

impl TokioScheduler {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<ModalMsg>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let scheduler = Self {
            tx,
            pending: HashMap::new(),
        };
        (scheduler, rx)
    }

    pub fn is_pending(&self, task: Task) -> bool {
        self.pending.get(&task).is_some_and(Timer::is_live)
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&mut self, task: Task, delay: Duration, msg: ModalMsg) {
        self.cancel(task);
        self.pending.retain(|_, timer| timer.is_live());

        let token = CancellationToken::new();
        let cancelled = token.clone();
        let tx = self.tx.clone();
        let handle = tokio::spawn(async move {
            tokio::select! {
                _ = cancelled.cancelled() => {
                    tracing::trace!(%task, "timer cancelled");
                }
                _ = tokio::time::sleep(delay) => {
                    if tx.send(msg).is_err() {
                        tracing::trace!(%task, "timer fired after the loop stopped");
                    }
                }
            }
        });

        self.pending.insert(task, Timer { token, handle });
    }

    fn cancel(&mut self, task: Task) {
        if let Some(timer) = self.pending.remove(&task) {
            timer.token.cancel();
        }
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

#[derive(Debug, Clone)]
struct Pending {
    task: Task,
    due: Duration,
    seq: u64,
    msg: ModalMsg,
}

/// Virtual-clock scheduler for hosts that drive their own frame loop.
///
/// Nothing fires until [`ManualScheduler::advance`] moves the clock.
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    now: Duration,
    seq: u64,
    pending: Vec<Pending>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pending(&self, task: Task) -> bool {
        self.pending.iter().any(|p| p.task == task)
    }

    /// Moves the clock forward and returns the messages that came due, earliest first
    pub fn advance(&mut self, by: Duration) -> Vec<ModalMsg> {
        self.now += by;

        let now = self.now;
        let (mut due, rest): (Vec<Pending>, Vec<Pending>) =
            self.pending.drain(..).partition(|p| p.due <= now);
        self.pending = rest;

        due.sort_by_key(|p| (p.due, p.seq));
        due.into_iter().map(|p| p.msg).collect()
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&mut self, task: Task, delay: Duration, msg: ModalMsg) {
        self.cancel(task);
        self.seq += 1;
        self.pending.push(Pending {
            task,
            due: self.now + delay,
            seq: self.seq,
            msg,
        });
    }

    fn cancel(&mut self, task: Task) {
        self.pending.retain(|p| p.task != task);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_manual_scheduler_fires_in_order() {
        let mut scheduler = ManualScheduler::new();
        scheduler.schedule(
            Task::Settle,
            Duration::from_millis(400),
            ModalMsg::Settle { epoch: 2 },
        );
        scheduler.schedule(Task::Reveal, Duration::from_millis(10), ModalMsg::Disable);

        assert!(scheduler.advance(Duration::from_millis(9)).is_empty());
        assert_eq!(
            scheduler.advance(Duration::from_millis(500)),
            vec![ModalMsg::Disable, ModalMsg::Settle { epoch: 2 }]
        );
        assert!(!scheduler.is_pending(Task::Reveal));
        assert!(!scheduler.is_pending(Task::Settle));
    }

    #[test]
    fn test_manual_scheduler_replaces_slot() {
        let mut scheduler = ManualScheduler::new();
        scheduler.schedule(
            Task::Settle,
            Duration::from_millis(100),
            ModalMsg::Settle { epoch: 1 },
        );
        scheduler.schedule(
            Task::Settle,
            Duration::from_millis(100),
            ModalMsg::Settle { epoch: 2 },
        );

        assert_eq!(
            scheduler.advance(Duration::from_millis(100)),
            vec![ModalMsg::Settle { epoch: 2 }]
        );
    }

    #[test]
    fn test_manual_scheduler_cancel() {
        let mut scheduler = ManualScheduler::new();
        scheduler.schedule(
            Task::Settle,
            Duration::from_millis(100),
            ModalMsg::Settle { epoch: 1 },
        );
        assert!(scheduler.is_pending(Task::Settle));

        scheduler.cancel(Task::Settle);
        scheduler.cancel(Task::Reveal);

        assert!(!scheduler.is_pending(Task::Settle));
        assert!(scheduler.advance(Duration::from_secs(1)).is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_tokio_scheduler_delivers_after_delay() {
        let (mut scheduler, mut rx) = TokioScheduler::new();
        scheduler.schedule(
            Task::Settle,
            Duration::from_millis(400),
            ModalMsg::Settle { epoch: 7 },
        );
        assert!(scheduler.is_pending(Task::Settle));

        tokio::time::sleep(Duration::from_millis(399)).await;
        assert!(rx.try_recv().is_err());

        assert_eq!(rx.recv().await, Some(ModalMsg::Settle { epoch: 7 }));
    }

    #[tokio::test(start_paused = true)]
    async fn test_tokio_scheduler_slot_frees_after_delivery() {
        let (mut scheduler, mut rx) = TokioScheduler::new();
        scheduler.schedule(
            Task::Settle,
            Duration::from_millis(10),
            ModalMsg::Settle { epoch: 1 },
        );
        assert!(scheduler.is_pending(Task::Settle));

        assert_eq!(rx.recv().await, Some(ModalMsg::Settle { epoch: 1 }));
        tokio::task::yield_now().await;

        assert!(!scheduler.is_pending(Task::Settle));
    }

    #[tokio::test(start_paused = true)]
    async fn test_tokio_scheduler_cancel() {
        let (mut scheduler, mut rx) = TokioScheduler::new();
        scheduler.schedule(
            Task::Settle,
            Duration::from_millis(400),
            ModalMsg::Settle { epoch: 1 },
        );
        scheduler.cancel(Task::Settle);
        assert!(!scheduler.is_pending(Task::Settle));

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_tokio_scheduler_replaces_slot() {
        let (mut scheduler, mut rx) = TokioScheduler::new();
        scheduler.schedule(
            Task::Reveal,
            Duration::from_millis(50),
            ModalMsg::Reveal {
                epoch: 1,
                visibility: crate::domain::modal::Visibility::ShowingPost,
            },
        );
        scheduler.schedule(Task::Reveal, Duration::from_millis(80), ModalMsg::Disable);

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(rx.try_recv().ok(), Some(ModalMsg::Disable));
        assert!(rx.try_recv().is_err());
    }
}
