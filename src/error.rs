use thiserror::Error;

#[derive(Debug, Error)]
pub enum BacklogError {
    /// The WIQL endpoint answered with a non-success status.
    #[error("API Error ({status}): {body}")]
    QueryRejected { status: u16, body: String },

    /// The work item details endpoint answered with a non-success status.
    #[error("work item details request failed ({status}): {body}")]
    DetailRejected { status: u16, body: String },

    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to parse {what}: {source}")]
    Decode {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write report: {0}")]
    Output(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, BacklogError>;
