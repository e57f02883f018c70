use serde::{Deserialize, Serialize};

use crate::domain::modal::{ModalSubject, Visibility};

/// Inputs to the modal state machine.
///
/// `Enable` and `Disable` come from the view layer. `Reveal` and `Settle`
/// are only ever produced by the coordinator itself, as the deferred half of
/// those two requests; they carry the epoch they were scheduled in so that
/// late arrivals can be told apart from current ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModalMsg {
    Enable(ModalSubject),
    Disable,
    Reveal { epoch: u64, visibility: Visibility },
    Settle { epoch: u64 },
}

impl ModalMsg {
    /// Whether this message was scheduled by the coordinator rather than sent by a caller
    pub fn is_deferred(&self) -> bool {
        matches!(self, ModalMsg::Reveal { .. } | ModalMsg::Settle { .. })
    }
}
