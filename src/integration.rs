//! Integration layer
//!
//! Binds the pure state machine to a running host:
//! - `coordinator`: owns the state, executes commands, notifies observers
//! - `runtime`: tokio UI loop and the handle the rest of the app talks to

pub mod coordinator;
pub mod runtime;
