use thiserror::Error;

/// Errors surfaced by the parsing facade.
#[derive(Debug, Error)]
pub enum Error {
    /// The caller requested a kind label outside the registry.
    ///
    /// Raised before any engine interaction; the engine observes nothing.
    #[error("unknown kind \"{0}\"")]
    UnknownKind(String),

    /// The engine could not be loaded or initialized for a language.
    #[error("engine unavailable: {0}")]
    EngineUnavailable(String),

    /// The engine reported an internal failure during extraction.
    #[error("engine parse error: {0}")]
    EngineParse(String),
}
