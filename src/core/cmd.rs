use std::time::Duration;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::core::msg::ModalMsg;

/// Slots for deferred work. Each slot holds at most one pending task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
pub enum Task {
    /// Visibility flip that follows an `enable`
    Reveal,
    /// Subject reset that follows a `disable`
    Settle,
}

/// Side effects requested by `update`, executed by the coordinator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cmd {
    /// Deliver `msg` back to the state machine after `delay`.
    /// Replaces whatever is pending in the same slot.
    Schedule {
        task: Task,
        delay: Duration,
        msg: ModalMsg,
    },
    /// Drop whatever is pending in the slot, if anything
    Cancel(Task),
}

impl Cmd {
    pub fn task(&self) -> Task {
        match self {
            Cmd::Schedule { task, .. } | Cmd::Cancel(task) => *task,
        }
    }

    /// Whether the command runs on the next UI cycle rather than on a timer
    pub fn is_next_tick(&self) -> bool {
        matches!(self, Cmd::Schedule { delay, .. } if delay.is_zero())
    }
}
