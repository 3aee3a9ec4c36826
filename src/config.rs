use serde::Deserialize;
use std::env;
use std::path::PathBuf;
use std::sync::OnceLock;
use thiserror::Error;

/// Model used when `SUMMARIZATION_MODEL` is not provided for the Hugging Face backend.
pub const DEFAULT_SUMMARIZATION_MODEL: &str = "facebook/bart-large-cnn";
/// Inference base URL used when `HUGGINGFACE_API_URL` is not provided.
pub const DEFAULT_HUGGINGFACE_API_URL: &str = "https://api-inference.huggingface.co";
/// Ollama runtime address used when `OLLAMA_URL` is not provided.
pub const DEFAULT_OLLAMA_URL: &str = "http://127.0.0.1:11434";
/// Scratch directory used when `SCRATCH_DIR` is not provided.
pub const DEFAULT_SCRATCH_DIR: &str = "temp";
/// Request body ceiling used when `MAX_UPLOAD_BYTES` is not provided.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

/// Errors encountered while loading configuration from environment variables.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Required environment variable was not provided.
    #[error("Missing environment variable: {0}")]
    MissingVariable(String),
    /// Environment variable contained a value that could not be parsed.
    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),
}

/// Runtime configuration for the docsum server.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Optional override for the HTTP server port.
    pub server_port: Option<u16>,
    /// Backend that hosts the summarization model.
    pub summarization_provider: SummarizationProvider,
    /// Model identifier passed to the provider.
    pub summarization_model: String,
    /// Base URL of the Hugging Face inference service.
    pub huggingface_api_url: String,
    /// Optional bearer token for the Hugging Face inference service.
    pub huggingface_api_token: Option<String>,
    /// Base URL of the Ollama runtime.
    pub ollama_url: String,
    /// Directory that holds uploads while they are being processed.
    pub scratch_dir: PathBuf,
    /// Maximum accepted request body size in bytes.
    pub max_upload_bytes: usize,
    /// Explicit log file path; `None` selects `logs/docsum.log`.
    pub log_file: Option<PathBuf>,
}

/// Supported summarization backends.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummarizationProvider {
    /// Hosted or self-hosted Hugging Face inference endpoint running a seq2seq model.
    HuggingFace,
    /// Local Ollama runtime.
    Ollama,
}

impl Config {
    /// Load configuration from environment variables, performing validation along the way.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// Blank values are treated as absent so that `FOO=` in a `.env` file falls back to the
    /// default instead of failing validation.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let optional = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let summarization_provider = match optional("SUMMARIZATION_PROVIDER") {
            Some(value) => value
                .parse()
                .map_err(|()| ConfigError::InvalidValue("SUMMARIZATION_PROVIDER".into()))?,
            None => SummarizationProvider::HuggingFace,
        };

        let summarization_model = match (optional("SUMMARIZATION_MODEL"), summarization_provider)
        {
            (Some(model), _) => model,
            (None, SummarizationProvider::HuggingFace) => DEFAULT_SUMMARIZATION_MODEL.to_string(),
            (None, SummarizationProvider::Ollama) => {
                return Err(ConfigError::MissingVariable("SUMMARIZATION_MODEL".into()));
            }
        };

        Ok(Self {
            server_port: optional("SERVER_PORT")
                .map(|value| {
                    value
                        .trim()
                        .parse()
                        .map_err(|_| ConfigError::InvalidValue("SERVER_PORT".into()))
                })
                .transpose()?,
            summarization_provider,
            summarization_model,
            huggingface_api_url: optional("HUGGINGFACE_API_URL")
                .unwrap_or_else(|| DEFAULT_HUGGINGFACE_API_URL.to_string()),
            huggingface_api_token: optional("HUGGINGFACE_API_TOKEN"),
            ollama_url: optional("OLLAMA_URL").unwrap_or_else(|| DEFAULT_OLLAMA_URL.to_string()),
            scratch_dir: optional("SCRATCH_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_SCRATCH_DIR)),
            max_upload_bytes: optional("MAX_UPLOAD_BYTES")
                .map(|value| {
                    value
                        .trim()
                        .parse()
                        .map_err(|_| ConfigError::InvalidValue("MAX_UPLOAD_BYTES".into()))
                })
                .transpose()?
                .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES),
            log_file: optional("DOCSUM_LOG_FILE").map(PathBuf::from),
        })
    }
}

impl std::str::FromStr for SummarizationProvider {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "huggingface" | "hf" => Ok(Self::HuggingFace),
            "ollama" => Ok(Self::Ollama),
            _ => Err(()),
        }
    }
}

/// Global configuration cache populated during process start.
pub static CONFIG: OnceLock<Config> = OnceLock::new();

/// Load configuration from the environment and install it in the global cache.
///
/// Later calls return the configuration installed by the first successful call.
pub fn init_config() -> Result<&'static Config, ConfigError> {
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;
    Ok(CONFIG.get_or_init(|| config))
}
