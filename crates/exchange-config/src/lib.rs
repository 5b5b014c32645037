//! Configuration loading for the exchange client.
//!
//! Reads TOML, JSON or YAML by file extension, substitutes `${VAR}`
//! references from the environment, then applies `EXCHANGE_` prefixed
//! overrides before validating.

use exchange_order::Domain;
use exchange_types::{parse_address, ConfigSchema};
use regex::Regex;
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

pub mod schema;
pub mod types;

pub use schema::ExchangeConfigSchema;
pub use types::{DomainConfig, ExchangeConfig, LoggingConfig, SignerConfig};

#[derive(Error, Debug)]
pub enum ConfigError {
	#[error("File not found: {0}")]
	FileNotFound(String),

	#[error("Parse error: {0}")]
	ParseError(String),

	#[error("Validation error: {0}")]
	ValidationError(String),

	#[error("Environment variable not found: {0}")]
	EnvVarNotFound(String),

	#[error("IO error: {0}")]
	IoError(#[from] std::io::Error),
}

impl DomainConfig {
	/// The signing domain described by this config.
	pub fn to_domain(&self) -> Result<Domain, ConfigError> {
		let verifying_contract = parse_address(&self.verifying_contract)
			.map_err(|e| ConfigError::ValidationError(format!("verifying_contract: {}", e)))?;

		Ok(Domain {
			name: self.name.clone(),
			version: self.version.clone(),
			chain_id: self.chain_id,
			verifying_contract,
		})
	}
}

/// Configuration loader with environment variable substitution
pub struct ConfigLoader {
	file_path: Option<PathBuf>,
	env_prefix: String,
}

impl Default for ConfigLoader {
	fn default() -> Self {
		Self::new()
	}
}

impl ConfigLoader {
	pub fn new() -> Self {
		Self {
			file_path: None,
			env_prefix: "EXCHANGE_".to_string(),
		}
	}

	pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
		self.file_path = Some(path.as_ref().to_path_buf());
		self
	}

	pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
		self.env_prefix = prefix.into();
		self
	}

	pub async fn load(&self) -> Result<ExchangeConfig, ConfigError> {
		let file_path = self.file_path.as_ref().ok_or_else(|| {
			ConfigError::FileNotFound("No configuration file specified".to_string())
		})?;
		info!("Loading configuration from {:?}", file_path);

		let mut config = self.load_from_file(file_path).await?;
		self.apply_env_overrides(&mut config)?;
		Self::validate_config(&config)?;

		Ok(config)
	}

	async fn load_from_file(&self, path: &Path) -> Result<ExchangeConfig, ConfigError> {
		let content = match tokio::fs::read_to_string(path).await {
			Ok(content) => content,
			Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
				return Err(ConfigError::FileNotFound(path.display().to_string()));
			}
			Err(e) => return Err(e.into()),
		};

		let substituted = Self::substitute_env_vars(&content)?;

		match path.extension().and_then(|s| s.to_str()) {
			Some("toml") => Self::from_toml(&substituted),
			Some("json") => Self::from_json(&substituted),
			Some("yaml") | Some("yml") => Self::from_yaml(&substituted),
			_ => Err(ConfigError::ParseError(format!(
				"Unsupported config format: {:?}",
				path
			))),
		}
	}

	/// Parse from a TOML string
	pub fn from_toml(contents: &str) -> Result<ExchangeConfig, ConfigError> {
		toml::from_str(contents)
			.map_err(|e| ConfigError::ParseError(format!("Failed to parse TOML: {}", e)))
	}

	/// Parse from a JSON string
	pub fn from_json(contents: &str) -> Result<ExchangeConfig, ConfigError> {
		serde_json::from_str(contents)
			.map_err(|e| ConfigError::ParseError(format!("Failed to parse JSON: {}", e)))
	}

	/// Parse from a YAML string
	pub fn from_yaml(contents: &str) -> Result<ExchangeConfig, ConfigError> {
		serde_yaml::from_str(contents)
			.map_err(|e| ConfigError::ParseError(format!("Failed to parse YAML: {}", e)))
	}

	/// Replaces every `${VAR_NAME}` with the variable's value.
	fn substitute_env_vars(content: &str) -> Result<String, ConfigError> {
		let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ConfigError::ParseError(e.to_string()))?;
		let mut result = content.to_string();

		for cap in re.captures_iter(content) {
			let full_match = &cap[0];
			let var_name = &cap[1];

			let env_value = env::var(var_name)
				.map_err(|_| ConfigError::EnvVarNotFound(var_name.to_string()))?;

			result = result.replace(full_match, &env_value);
		}

		Ok(result)
	}

	fn env_var(&self, name: &str) -> Option<String> {
		env::var(format!("{}{}", self.env_prefix, name)).ok()
	}

	fn apply_env_overrides(&self, config: &mut ExchangeConfig) -> Result<(), ConfigError> {
		if let Some(chain_id) = self.env_var("CHAIN_ID") {
			debug!("Overriding chain id from environment");
			config.domain.chain_id = chain_id
				.parse()
				.map_err(|e| ConfigError::ValidationError(format!("Invalid chain id: {}", e)))?;
		}

		if let Some(contract) = self.env_var("VERIFYING_CONTRACT") {
			debug!("Overriding verifying contract from environment");
			config.domain.verifying_contract = contract;
		}

		if let Some(key) = self.env_var("PRIVATE_KEY") {
			debug!("Overriding private key from environment");
			config.signer.private_key = Some(key);
		}

		if let Some(timeout) = self.env_var("SIGNER_TIMEOUT_SECS") {
			config.signer.timeout_secs = Some(timeout.parse().map_err(|e| {
				ConfigError::ValidationError(format!("Invalid signer timeout: {}", e))
			})?);
		}

		if let Some(level) = self.env_var("LOG_LEVEL") {
			config.logging.level = level;
		}

		Ok(())
	}

	/// Checks the config against [`ExchangeConfigSchema`].
	pub fn validate_config(config: &ExchangeConfig) -> Result<(), ConfigError> {
		let value = toml::Value::try_from(config)
			.map_err(|e| ConfigError::ValidationError(e.to_string()))?;

		ExchangeConfigSchema
			.validate(&value)
			.map_err(|e| ConfigError::ValidationError(e.to_string()))
	}
}
