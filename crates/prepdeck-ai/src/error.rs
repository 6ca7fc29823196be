use thiserror::Error;

/// Failures of the analysis pipeline. Reply syntax problems and reply schema
/// problems are distinct classes; the HTTP layer collapses all of them into
/// one generic message for callers.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("text generation backend error: {0}")]
    Backend(#[from] anyhow::Error),

    #[error("malformed model reply: {0}")]
    MalformedReply(String),

    #[error("model reply schema violation: {0}")]
    InvalidSchema(String),
}
