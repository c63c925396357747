use thiserror::Error;

#[derive(Debug, Error)]
pub enum CostMapError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, CostMapError>;

/// Shorthand for building an [`CostMapError::InvalidArgument`].
pub(crate) fn invalid_argument(msg: impl Into<String>) -> CostMapError {
    CostMapError::InvalidArgument(msg.into())
}
