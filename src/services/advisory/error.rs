use std::path::PathBuf;

use thiserror::Error;

use crate::services::advisory::backend::GenerationError;

#[derive(Debug, Error)]
pub enum AdvisoryError {
    #[error("prompt template not found: {0}")]
    TemplateNotFound(String),

    #[error("failed to read prompt template {}: {source}", path.display())]
    TemplateRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Generation(#[from] GenerationError),
}
