//! Application layer errors

use thiserror::Error;

/// General bot errors
#[derive(Error, Debug)]
pub enum BotError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Module load error: {0}")]
    Load(#[from] LoadError),

    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Handler module load errors. Any of these aborts startup: the dispatcher
/// never serves a partially-loaded registry.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Module has no name: {0}")]
    MissingName(String),

    #[error("Malformed manifest {path}: {reason}")]
    Manifest { path: String, reason: String },

    #[error("Manifest {path} names '{manifest}' but the module reports '{module}'")]
    NameMismatch {
        path: String,
        manifest: String,
        module: String,
    },

    #[error("Failed to load library {path}: {reason}")]
    Library { path: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Command execution errors, caught at the error boundary.
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("Invalid arguments: {0}")]
    InvalidArgs(String),

    #[error("Execution failed: {0}")]
    ExecutionFailed(String),

    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),
}

/// Outbound gateway action errors.
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Request failed: {0}")]
    Request(String),

    #[error("Target unavailable: {0}")]
    Unavailable(String),
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Parse error: {0}")]
    Parse(String),
}
