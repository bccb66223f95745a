//! Start-request validation.
//!
//! Validation is local and happens before any request is built.  A start
//! request can only be constructed through [`validate_start`], so an invalid
//! port or an empty target never reaches the network.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A rejected start input.
///
/// The `Display` text is the exact message shown to the operator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The port text is empty, non-numeric, or outside `1..=65535`.
    #[error("Please enter a valid port number (1-65535)")]
    InvalidPort(String),

    /// The target server field is empty.
    #[error("Please specify a game server")]
    EmptyTarget,
}

/// Body of `POST /api/start`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartRequest {
    pub port: u16,
    pub server: String,
}

/// Parses the port input.
///
/// Surrounding whitespace is ignored.  Anything that is not a base-10 integer
/// in `1..=65535` is rejected, including `0`, `65536`, `""`, and `"80abc"`.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidPort`] carrying the rejected text.
pub fn parse_port(text: &str) -> Result<u16, ValidationError> {
    let trimmed = text.trim();
    // Parse wide first so that "65536" and "-1" fail the range check rather
    // than the integer parse; both report the same message anyway.
    match trimmed.parse::<i64>() {
        Ok(value) if (1..=i64::from(u16::MAX)).contains(&value) => Ok(value as u16),
        _ => Err(ValidationError::InvalidPort(text.to_string())),
    }
}

/// Checks that the target server field is non-empty and returns it trimmed.
///
/// # Errors
///
/// Returns [`ValidationError::EmptyTarget`] for an empty or blank target.
pub fn validate_target(text: &str) -> Result<String, ValidationError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyTarget);
    }
    Ok(trimmed.to_string())
}

/// Validates both start inputs, port first.
///
/// # Errors
///
/// Returns the first [`ValidationError`] encountered.
pub fn validate_start(port_text: &str, target_text: &str) -> Result<StartRequest, ValidationError> {
    let port = parse_port(port_text)?;
    let server = validate_target(target_text)?;
    Ok(StartRequest { port, server })
}
