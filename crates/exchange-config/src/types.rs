//! Configuration types for the exchange client.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Complete exchange client configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ExchangeConfig {
	/// EIP-712 signing domain of the exchange contract
	pub domain: DomainConfig,
	/// Signing capability settings
	#[serde(default)]
	pub signer: SignerConfig,
	/// Log output settings
	#[serde(default)]
	pub logging: LoggingConfig,
}

/// Signing domain settings.
///
/// Must describe the same network orders are submitted to; a signature made
/// under another chain id or contract is rejected at settlement.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DomainConfig {
	#[serde(default = "default_domain_name")]
	pub name: String,
	#[serde(default = "default_domain_version")]
	pub version: String,
	pub chain_id: u64,
	/// Exchange contract address, `0x`-prefixed
	pub verifying_contract: String,
}

/// Signer settings. Without a private key, signing is left to an injected
/// wallet.
#[derive(Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct SignerConfig {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub private_key: Option<String>,
	/// Deadline for a single signing request
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub timeout_secs: Option<u64>,
}

/// Log output settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LoggingConfig {
	/// Level or env-filter directive, e.g. `"info"` or `"exchange_order=debug"`
	#[serde(default = "default_log_level")]
	pub level: String,
	#[serde(default)]
	pub json: bool,
}

fn default_domain_name() -> String {
	exchange_order::typed_data::DEFAULT_DOMAIN_NAME.to_string()
}

fn default_domain_version() -> String {
	exchange_order::typed_data::DEFAULT_DOMAIN_VERSION.to_string()
}

fn default_log_level() -> String {
	"info".to_string()
}

impl Default for LoggingConfig {
	fn default() -> Self {
		Self {
			level: default_log_level(),
			json: false,
		}
	}
}

impl SignerConfig {
	/// The table form the account crate's signer factory reads.
	pub fn to_toml(&self) -> toml::Value {
		let mut table = toml::Table::new();
		if let Some(key) = &self.private_key {
			table.insert("private_key".to_string(), toml::Value::String(key.clone()));
		}
		if let Some(secs) = self.timeout_secs {
			let secs = i64::try_from(secs).unwrap_or(i64::MAX);
			table.insert("timeout_secs".to_string(), toml::Value::Integer(secs));
		}
		toml::Value::Table(table)
	}
}

/// Keeps the private key out of logs.
impl fmt::Debug for SignerConfig {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("SignerConfig")
			.field(
				"private_key",
				&self.private_key.as_ref().map(|_| "<redacted>"),
			)
			.field("timeout_secs", &self.timeout_secs)
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_domain_defaults() {
		let domain: DomainConfig = toml::from_str(
			r#"
chain_id = 1
verifying_contract = "0x9757F2d2b135150BBeb65308D4a91804107cd8D6"
"#,
		)
		.unwrap();
		assert_eq!(domain.name, "Exchange");
		assert_eq!(domain.version, "2");
	}

	#[test]
	fn test_logging_defaults() {
		let logging = LoggingConfig::default();
		assert_eq!(logging.level, "info");
		assert!(!logging.json);
	}

	#[test]
	fn test_signer_debug_redacts_key() {
		let signer = SignerConfig {
			private_key: Some("0xdeadbeef".to_string()),
			timeout_secs: Some(30),
		};
		let debug = format!("{:?}", signer);
		assert!(!debug.contains("deadbeef"));
		assert!(debug.contains("<redacted>"));
	}

	#[test]
	fn test_signer_to_toml() {
		let signer = SignerConfig {
			private_key: Some("0xabc".to_string()),
			timeout_secs: Some(30),
		};
		let value = signer.to_toml();
		assert_eq!(value.get("private_key").and_then(|v| v.as_str()), Some("0xabc"));
		assert_eq!(value.get("timeout_secs").and_then(|v| v.as_integer()), Some(30));

		let empty = SignerConfig::default().to_toml();
		assert!(empty.as_table().unwrap().is_empty());
	}
}
