//! Application layer errors

use thiserror::Error;

/// General bot errors
#[derive(Error, Debug)]
pub enum BotError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Command error: {0}")]
    Command(#[from] CommandError),

    #[error("Rejected by host: {0}")]
    Rejected(String),

    #[error("Unsupported destination: {0}")]
    UnsupportedDestination(String),
}

/// Command execution errors
///
/// Every variant is turned into a plain-text reply by the command service,
/// none of them leave the event handler.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("Command not found: {0}")]
    NotFound(String),

    #[error("Invalid arguments: {0}")]
    InvalidArgs(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Admin identity is not configured")]
    AdminUnset,

    #[error("Permission denied")]
    PermissionDenied,

    #[error("Invalid registration: {0}")]
    Registration(String),
}

/// Storage errors
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Alert delivery errors, logged and never shown to the chat
#[derive(Error, Debug)]
pub enum DeliveryError {
    #[error("Admin identity is empty")]
    AdminUnset,

    #[error("Admin identity '{0}' is not numeric")]
    MalformedAdmin(String),

    #[error("Delivery failed: {0}")]
    Send(#[from] BotError),
}

/// Errors produced while turning raw input into domain values
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Malformed session id: {0}")]
    SessionId(String),

    #[error("Unknown message type: {0}")]
    MessageType(String),

    #[error("Malformed event: {0}")]
    Event(String),
}
