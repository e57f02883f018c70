//! Infrastructure layer
//!
//! This module contains the pieces that touch the outside world:
//! - Timer backends for deferred modal work
//! - Configuration loading
//! - CLI arguments and the line protocol of the demo host

pub mod cli;
pub mod command;
pub mod config;
pub mod scheduler;
