//! Presentation layer
//!
//! Turns modal snapshots into something a host can show. The demo host
//! renders to text lines; a graphical host would bind to the same snapshots.

pub mod sheet;
