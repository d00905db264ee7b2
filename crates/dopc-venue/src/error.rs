use thiserror::Error;

/// Errors returned by the venue-data client.
#[derive(Debug, Error)]
pub enum VenueError {
    /// The provider has no venue for the requested slug (HTTP 404).
    #[error("No venue with slug of '{0}' was found")]
    NotFound(String),

    /// Network or TLS failure, or a non-2xx status other than 404.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body could not be deserialized into the expected shape.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// Client misconfiguration, e.g. an unusable base URL.
    #[error("venue API error: {0}")]
    Config(String),
}
