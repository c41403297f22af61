use thiserror::Error;

#[derive(Debug, Error)]
pub enum BoardError {
    /// The URL is already on the board. Surfaced to the user as a notice,
    /// not a failure.
    #[error("product already saved: {source_url}")]
    DuplicateSubmission { source_url: String },

    #[error("no saved product for {source_url}")]
    UnknownProduct { source_url: String },

    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error for {context}: {source}")]
    Json {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}
