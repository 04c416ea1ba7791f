//! Library error type.

pub type Result<T> = std::result::Result<T, Error>;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
	#[error("IO error: {0}")]
	IO(#[from] std::io::Error),
	#[error("JSON error: {0}")]
	SerdeJSON(#[from] serde_json::Error),
	#[error("registry error: {0}")]
	Registry(#[from] crate::registry::RegistryError),
	#[error("validation error: {0}")]
	Validation(String),
	#[error("downloader failed: {0}")]
	Download(#[from] crate::installation::download::DownloadError),
}
