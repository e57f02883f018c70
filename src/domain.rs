//! Domain types
//!
//! This module contains the data the coordinator reasons about:
//! - Reddit handles (posts and comments)
//! - Modal subjects and visibility

pub mod modal;
pub mod reddit;
