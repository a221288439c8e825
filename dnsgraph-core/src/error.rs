use thiserror::Error;

#[derive(Error, Debug)]
pub enum GraphError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("Rendered document has no '{0}' element to attach controls to")]
    MissingAnchor(&'static str),
}

pub type Result<T> = std::result::Result<T, GraphError>;
