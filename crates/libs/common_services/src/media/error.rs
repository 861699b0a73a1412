use thiserror::Error;

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid media key: {0}")]
    InvalidKey(String),

    #[error("image processing failed: {0}")]
    Image(#[from] image::ImageError),
}
