//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! controller, connector, blockchain client
//!     → tracing events with structured fields
//!     → logging.rs (EnvFilter + fmt layer on stderr)
//! ```

pub mod logging;
