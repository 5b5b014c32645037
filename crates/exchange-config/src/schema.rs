//! Structural checks over the parsed configuration.

use exchange_types::{ConfigSchema, Field, FieldType, Schema, ValidationError};

fn non_blank(what: &'static str) -> impl Fn(&toml::Value) -> Result<(), String> + Send + Sync {
	move |value| match value.as_str() {
		Some(s) if s.trim().is_empty() => Err(format!("{} must not be empty", what)),
		_ => Ok(()),
	}
}

/// Schema for a complete [`crate::ExchangeConfig`].
pub struct ExchangeConfigSchema;

impl ExchangeConfigSchema {
	fn domain() -> Schema {
		Schema::new(
			vec![
				Field::new("name", FieldType::String).with_validator(non_blank("Domain name")),
				Field::new("version", FieldType::String)
					.with_validator(non_blank("Domain version")),
				Field::new(
					"chain_id",
					FieldType::Integer {
						min: Some(1),
						max: None,
					},
				),
				Field::new("verifying_contract", FieldType::Address),
			],
			vec![],
		)
	}

	fn signer() -> Schema {
		Schema::new(
			vec![],
			vec![
				Field::new("private_key", FieldType::HexBytes { len: 32 }),
				Field::new(
					"timeout_secs",
					FieldType::Integer {
						min: Some(1),
						max: None,
					},
				),
			],
		)
	}

	fn logging() -> Schema {
		Schema::new(
			vec![],
			vec![
				Field::new("level", FieldType::String).with_validator(non_blank("Log level")),
				Field::new("json", FieldType::Boolean),
			],
		)
	}
}

impl ConfigSchema for ExchangeConfigSchema {
	fn validate(&self, config: &toml::Value) -> Result<(), ValidationError> {
		let schema = Schema::new(
			vec![Field::new("domain", FieldType::Table(Self::domain()))],
			vec![
				Field::new("signer", FieldType::Table(Self::signer())),
				Field::new("logging", FieldType::Table(Self::logging())),
			],
		);

		schema.validate(config)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn parse(s: &str) -> toml::Value {
		toml::Value::Table(s.parse::<toml::Table>().unwrap())
	}

	#[test]
	fn test_valid_config() {
		let config = parse(
			r#"
[domain]
name = "Exchange"
version = "2"
chain_id = 1
verifying_contract = "0x9757F2d2b135150BBeb65308D4a91804107cd8D6"

[logging]
level = "info"
json = false
"#,
		);
		ExchangeConfigSchema.validate(&config).unwrap();
	}

	#[test]
	fn test_nested_errors_are_prefixed() {
		let config = parse(
			r#"
[domain]
name = "Exchange"
version = "2"
chain_id = 1
verifying_contract = "0x1234"
"#,
		);
		assert!(matches!(
			ExchangeConfigSchema.validate(&config),
			Err(ValidationError::InvalidValue { field, .. }) if field == "domain.verifying_contract"
		));

		let config = parse(
			r#"
[domain]
name = "  "
version = "2"
chain_id = 1
verifying_contract = "0x9757F2d2b135150BBeb65308D4a91804107cd8D6"
"#,
		);
		assert!(matches!(
			ExchangeConfigSchema.validate(&config),
			Err(ValidationError::InvalidValue { field, .. }) if field == "domain.name"
		));
	}

	#[test]
	fn test_signer_and_logging_types() {
		let config = parse(
			r#"
[domain]
name = "Exchange"
version = "2"
chain_id = 1
verifying_contract = "0x9757F2d2b135150BBeb65308D4a91804107cd8D6"

[signer]
private_key = "0x1234"
"#,
		);
		assert!(matches!(
			ExchangeConfigSchema.validate(&config),
			Err(ValidationError::InvalidValue { field, .. }) if field == "signer.private_key"
		));

		let config = parse(
			r#"
[domain]
name = "Exchange"
version = "2"
chain_id = 1
verifying_contract = "0x9757F2d2b135150BBeb65308D4a91804107cd8D6"

[logging]
json = "yes"
"#,
		);
		assert!(matches!(
			ExchangeConfigSchema.validate(&config),
			Err(ValidationError::TypeMismatch { field, .. }) if field == "logging.json"
		));
	}

	#[test]
	fn test_missing_domain() {
		let config = parse("[logging]\nlevel = \"info\"\n");
		assert!(matches!(
			ExchangeConfigSchema.validate(&config),
			Err(ValidationError::MissingField(f)) if f == "domain"
		));
	}
}
