//! # Error Types
//!
//! This module defines error types used throughout the pitboss library.
//!
//! Drawing never surfaces errors: an unavailable surface is reported as
//! [`crate::canvas::Unavailable`], logged, and swallowed by the overlay
//! renderer. Everything that reaches the caller goes through [`PitbossError`].

use thiserror::Error;

/// Main error type for pitboss operations
#[derive(Debug, Error)]
pub enum PitbossError {
    /// Transport-level failure talking to the back-office API
    #[error("Network error: {0}")]
    Network(String),

    /// The API answered but refused the request (bad credentials, expired token)
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// User input rejected before reaching the API
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Invalid or unreadable configuration
    #[error("Config error: {0}")]
    Config(String),

    /// Image encoding error (overlay previews)
    #[error("Image error: {0}")]
    Image(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Input rejected before any request is made.
///
/// Meant for inline display next to the offending field; never logged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("El nombre de la zona no puede estar vacío")]
    EmptyZoneName,

    #[error("La zona '{0}' ya existe")]
    DuplicateZone(String),

    #[error("Zona desconocida: {0}")]
    UnknownZone(i64),

    #[error("Usuario y contraseña son obligatorios")]
    MissingCredentials,
}
