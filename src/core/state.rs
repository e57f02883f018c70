use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{
    core::{
        cmd::{Cmd, Task},
        msg::ModalMsg,
    },
    domain::{
        modal::{ModalSubject, Visibility},
        reddit::{CommentRef, PostRef},
    },
};

/// Delays applied to the deferred half of `enable` and `disable`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModalTiming {
    /// Zero means "next UI cycle"
    pub reveal_delay: Duration,
    /// How long a dismissed sheet keeps its subject (dismiss animation)
    pub settle_delay: Duration,
}

impl ModalTiming {
    pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(400);
}

impl Default for ModalTiming {
    fn default() -> Self {
        Self {
            reveal_delay: Duration::ZERO,
            settle_delay: Self::DEFAULT_SETTLE_DELAY,
        }
    }
}

/// Reply-sheet presentation state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalState {
    pub current_post: PostRef,
    pub current_comment: CommentRef,
    pub visibility: Visibility,
    pub timing: ModalTiming,
    /// Bumped by every `Enable` and `Disable`; deferred messages from older
    /// epochs are ignored.
    epoch: u64,
    reveal_pending: bool,
}

impl Default for ModalState {
    fn default() -> Self {
        Self::new(ModalTiming::default())
    }
}

/// Read model handed to observers
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ModalSnapshot {
    pub visibility: Visibility,
    pub current_post: PostRef,
    pub current_comment: CommentRef,
    /// Count of committed changes, this one included
    pub revision: u64,
}

impl ModalSnapshot {
    /// The subject the visible sheet is showing, if any
    pub fn visible_subject(&self) -> Option<ModalSubject> {
        match self.visibility {
            Visibility::None => None,
            Visibility::ShowingPost => Some(ModalSubject::Post(self.current_post.clone())),
            Visibility::ShowingComment => {
                Some(ModalSubject::Comment(self.current_comment.clone()))
            }
        }
    }

    /// Whether the observable fields differ, ignoring `revision`
    pub fn differs_from(&self, other: &ModalSnapshot) -> bool {
        self.visibility != other.visibility
            || self.current_post != other.current_post
            || self.current_comment != other.current_comment
    }
}

impl ModalState {
    pub fn new(timing: ModalTiming) -> Self {
        Self {
            current_post: PostRef::placeholder(),
            current_comment: CommentRef::placeholder(),
            visibility: Visibility::None,
            timing,
            epoch: 0,
            reveal_pending: false,
        }
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Whether an `enable` has recorded its subject but not flipped visibility yet
    pub fn is_reveal_pending(&self) -> bool {
        self.reveal_pending
    }

    pub fn is_showing(&self) -> bool {
        self.visibility.is_showing()
    }

    pub fn snapshot(&self, revision: u64) -> ModalSnapshot {
        ModalSnapshot {
            visibility: self.visibility,
            current_post: self.current_post.clone(),
            current_comment: self.current_comment.clone(),
            revision,
        }
    }

    /// Modal-specific update function
    /// Returns: Generated commands
    pub fn update(&mut self, msg: ModalMsg) -> Vec<Cmd> {
        match msg {
            ModalMsg::Enable(subject) => {
                self.epoch += 1;
                let visibility = subject.visibility();
                match subject {
                    ModalSubject::Post(post) => self.current_post = post,
                    ModalSubject::Comment(comment) => self.current_comment = comment,
                }
                self.reveal_pending = true;

                vec![
                    Cmd::Cancel(Task::Settle),
                    Cmd::Schedule {
                        task: Task::Reveal,
                        delay: self.timing.reveal_delay,
                        msg: ModalMsg::Reveal {
                            epoch: self.epoch,
                            visibility,
                        },
                    },
                ]
            }

            ModalMsg::Disable => {
                if !self.is_showing() && !self.reveal_pending {
                    return vec![];
                }

                self.epoch += 1;
                self.visibility = Visibility::None;
                self.reveal_pending = false;

                vec![
                    Cmd::Cancel(Task::Reveal),
                    Cmd::Schedule {
                        task: Task::Settle,
                        delay: self.timing.settle_delay,
                        msg: ModalMsg::Settle { epoch: self.epoch },
                    },
                ]
            }

            ModalMsg::Reveal { epoch, visibility } => {
                if epoch != self.epoch {
                    tracing::trace!(epoch, current = self.epoch, "stale reveal ignored");
                    return vec![];
                }

                self.visibility = visibility;
                self.reveal_pending = false;
                vec![]
            }

            ModalMsg::Settle { epoch } => {
                if epoch != self.epoch || self.is_showing() {
                    tracing::trace!(epoch, current = self.epoch, "stale settle ignored");
                    return vec![];
                }

                self.current_post = PostRef::placeholder();
                self.current_comment = CommentRef::placeholder();
                vec![]
            }
        }
    }
}
