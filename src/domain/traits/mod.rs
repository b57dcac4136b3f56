//! Domain traits - Abstractions for infrastructure implementations

pub mod gateway;
pub mod module;

pub use gateway::Gateway;
pub use module::{CommandModule, CommandSource, EventModule, EventSource};
