use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Contract violations raised by the simulation core.
///
/// Game outcomes (touching lava, collecting the last coin) are level status
/// transitions, never errors.
#[derive(Debug, Error)]
pub enum Error {
    /// A value did not have the shape an operation requires (e.g. a
    /// non-finite vector component).
    #[error("type mismatch: {0}")]
    TypeMismatch(String),

    /// Missing or malformed argument to a query.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Config or level plan JSON could not be decoded.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
