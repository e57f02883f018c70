//! # Replysheet - reply-modal presentation coordinator
//!
//! Decides which reply sheet of a Reddit client is on screen: the one for
//! a post, the one for a comment, or none. Built the Elm way so the state
//! machine stays a pure function and every side effect is a value.
//!
//! ## Architecture Overview
//!
//! - **Model** (`core::state`): reply-sheet state and its snapshot
//! - **Message** (`core::msg`): requests plus the deferred halves of them
//! - **Update** (`core::update`): pure transition function
//! - **Command** (`core::cmd`): next-cycle hops, timers and cancellation
//! - **Coordinator** (`integration`): owns the state on a single UI loop and
//!   pushes every committed change to observers
//!
//! ## Example Usage
//!
//! ```rust
//! use replysheet::{
//!     core::state::ModalTiming,
//!     domain::{modal::Visibility, reddit::PostRef},
//!     integration::coordinator::ModalCoordinator,
//! };
//!
//! let mut coordinator = ModalCoordinator::manual(ModalTiming::default());
//! let post: PostRef = "t3_1abcd".parse().unwrap();
//!
//! coordinator.enable(post.clone());
//! coordinator.tick();
//! assert_eq!(coordinator.snapshot().visibility, Visibility::ShowingPost);
//!
//! coordinator.disable();
//! assert_eq!(coordinator.snapshot().current_post, post);
//! coordinator.advance(ModalTiming::DEFAULT_SETTLE_DELAY);
//! assert!(coordinator.snapshot().current_post.is_placeholder());
//! ```

pub mod core;
pub mod domain;
pub mod infrastructure;
pub mod integration;
pub mod presentation;
pub mod utils;

pub use crate::core::{
    cmd::Cmd,
    msg::ModalMsg,
    state::{ModalSnapshot, ModalState, ModalTiming},
    update::update,
};
pub use domain::{
    modal::{ModalSubject, Visibility},
    reddit::{CommentRef, PostRef},
};
pub use integration::{
    coordinator::{ModalCoordinator, ModalObserver},
    runtime::{ModalHandle, ModalRuntime},
};

/// Result type used throughout the library
pub type Result<T> = color_eyre::eyre::Result<T>;
