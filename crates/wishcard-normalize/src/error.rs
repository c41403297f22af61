use thiserror::Error;

#[derive(Debug, Error)]
pub enum NormalizeError {
    /// The page adapter reported that it could not produce a raw record.
    #[error("source adapter failed: {error} ({})", .detail.as_deref().unwrap_or("no detail"))]
    AdapterFailure {
        error: String,
        detail: Option<String>,
    },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("adapter returned {found} where a JSON object was expected")]
    UnexpectedShape { found: String },
}
