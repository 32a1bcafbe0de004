use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExportError {
    #[error("could not decode image: {0}")]
    Decode(String),

    #[error("could not build PDF: {0}")]
    Pdf(String),
}
