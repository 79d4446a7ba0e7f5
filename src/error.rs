use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
	#[error("{var} not found! Set it in .env or environment variables.")]
	MissingToken { var: String },

	#[error("Download failed: {0}")]
	DownloadFailed(String),

	#[error("Model download failed after {attempts} attempts: {last_error}")]
	RetriesExhausted { attempts: u32, last_error: String },

	#[error("Invalid input: {0}")]
	InvalidInput(String),

	#[error("Configuration error: {0}")]
	ConfigError(String),

	#[error("IO error: {0}")]
	IoError(#[from] std::io::Error),

	#[error("Serialization error: {0}")]
	SerializationError(String),
}

impl From<hf_hub::api::sync::ApiError> for Error {
	fn from(err: hf_hub::api::sync::ApiError) -> Self {
		Error::DownloadFailed(err.to_string())
	}
}

impl From<toml::de::Error> for Error {
	fn from(err: toml::de::Error) -> Self {
		Error::SerializationError(err.to_string())
	}
}

pub type Result<T> = std::result::Result<T, Error>;
