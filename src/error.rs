/// Unified error type for the spotlight crate.
#[derive(Debug, thiserror::Error)]
pub enum SpotlightError {
    /// The embedded command catalog failed to parse.
    #[error("Malformed command catalog: {0}")]
    MalformedCatalog(#[from] serde_json::Error),

    /// Two catalog entries share the same id. Fatal at startup.
    #[error("Duplicate command id: {0}")]
    DuplicateCommandId(String),

    /// A catalog entry has a blank title. Fatal at startup.
    #[error("Command has empty title: {0}")]
    EmptyTitle(String),

    /// A selection referenced an id absent from the catalog.
    #[error("Unknown command id: {0}")]
    UnknownCommand(String),

    /// A special handler failed mid-dispatch.
    #[error("Dispatch of `{id}` failed: {reason}")]
    DispatchFailed { id: String, reason: String },

    /// The host environment rejected an effect.
    #[error("Host error: {0}")]
    Host(String),

    /// Invalid input provided by the caller.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// An operation that requires an open palette ran while it was closed.
    #[error("Palette is not open")]
    NotOpen,
}

/// Result type alias using [`SpotlightError`].
pub type SpotlightResult<T> = Result<T, SpotlightError>;
