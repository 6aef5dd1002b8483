//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Load config → Init logging → Build connector → Init page
//!
//! Shutdown (shutdown.rs):
//!     Ctrl-C or `quit` → Disconnect wallet → Exit
//! ```

pub mod shutdown;

pub use shutdown::Shutdown;
