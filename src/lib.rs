//! Ticket token minter.
//!
//! Wires a page's connect, disconnect and create-token controls to a wallet
//! connector and the `createToken(address, bytes32)` contract call.

pub mod blockchain;
pub mod cli;
pub mod config;
pub mod connector;
pub mod controller;
pub mod lifecycle;
pub mod observability;
pub mod ui;

pub use config::AppConfig;
pub use controller::PageController;
pub use lifecycle::Shutdown;
