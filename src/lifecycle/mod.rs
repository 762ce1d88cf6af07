//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Load team data → Init metrics/watcher → Bind listener → Serve
//!
//! Reload (watcher.rs):
//!     Data file changed → Build new Model → Send to server → Atomic swap
//!
//! Shutdown (shutdown.rs, signals.rs):
//!     SIGTERM/SIGINT → Broadcast → Stop accepting → Drain → Exit
//! ```
//!
//! # Design Decisions
//! - Ordered startup: data first, then listeners
//! - A failed reload never replaces the published model

pub mod shutdown;
pub mod signals;
pub mod startup;
pub mod watcher;

pub use shutdown::Shutdown;
pub use watcher::DataWatcher;
