use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum CoreError {
    #[error("Camera unavailable: {0}")]
    CameraUnavailable(String),

    #[error("Analysis failed: {0}")]
    AnalysisFailed(String),

    #[error("Persisted inventory is corrupt: {0}")]
    PersistenceCorrupt(String),

    #[error("Local store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Not found")]
    NotFound,
}
