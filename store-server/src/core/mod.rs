//! Core module: configuration, state and server lifecycle

pub mod config;
pub mod server;
pub mod state;

pub use config::{BankDetails, Config};
pub use server::Server;
pub use state::ServerState;
