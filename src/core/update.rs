use crate::core::{cmd::Cmd, msg::ModalMsg, state::ModalState};

/// Elm-like update function
/// Returns new state and list of commands from current state and message
pub fn update(msg: ModalMsg, mut state: ModalState) -> (ModalState, Vec<Cmd>) {
    let commands = state.update(msg);
    (state, commands)
}
