//! Core Elm architecture implementation
//!
//! This module contains the pure half of the coordinator:
//! - Messages fed into the state machine
//! - Modal state and its transitions
//! - Commands describing deferred work

pub mod cmd;
pub mod msg;
pub mod state;
pub mod update;
