//! Schema validation for TOML configuration tables.

use crate::common::parse_address;
use thiserror::Error;

/// Errors that can occur during configuration validation.
#[derive(Debug, Error)]
pub enum ValidationError {
	/// Error that occurs when a required field is missing.
	#[error("Missing required field: {0}")]
	MissingField(String),
	/// Error that occurs when a field has an invalid value.
	#[error("Invalid value for field '{field}': {message}")]
	InvalidValue { field: String, message: String },
	/// Error that occurs when field type is incorrect.
	#[error("Type mismatch for field '{field}': expected {expected}, got {actual}")]
	TypeMismatch {
		field: String,
		expected: String,
		actual: String,
	},
}

/// Type of a configuration field.
#[derive(Debug)]
pub enum FieldType {
	String,
	Integer { min: Option<i64>, max: Option<i64> },
	Boolean,
	/// A `0x`-prefixed 20 byte address.
	Address,
	/// Hex string of exactly `len` bytes, `0x` prefix optional.
	HexBytes { len: usize },
	Table(Schema),
}

/// Type alias for field validator functions.
pub type FieldValidator = Box<dyn Fn(&toml::Value) -> Result<(), String> + Send + Sync>;

/// A field definition with name and type.
pub struct Field {
	pub name: String,
	pub field_type: FieldType,
	pub validator: Option<FieldValidator>,
}

impl std::fmt::Debug for Field {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Field")
			.field("name", &self.name)
			.field("field_type", &self.field_type)
			.field("validator", &self.validator.is_some())
			.finish()
	}
}

impl Field {
	pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
		Self {
			name: name.into(),
			field_type,
			validator: None,
		}
	}

	/// Adds a custom check that runs after the type check passes.
	pub fn with_validator<F>(mut self, validator: F) -> Self
	where
		F: Fn(&toml::Value) -> Result<(), String> + Send + Sync + 'static,
	{
		self.validator = Some(Box::new(validator));
		self
	}

	fn check(&self, value: &toml::Value) -> Result<(), ValidationError> {
		validate_field_type(&self.name, value, &self.field_type)?;

		if let Some(validator) = &self.validator {
			validator(value).map_err(|message| ValidationError::InvalidValue {
				field: self.name.clone(),
				message,
			})?;
		}

		Ok(())
	}
}

/// Schema definition with required and optional fields.
#[derive(Debug)]
pub struct Schema {
	pub required: Vec<Field>,
	pub optional: Vec<Field>,
}

impl Schema {
	pub fn new(required: Vec<Field>, optional: Vec<Field>) -> Self {
		Self { required, optional }
	}

	/// Validates a TOML value against this schema.
	pub fn validate(&self, config: &toml::Value) -> Result<(), ValidationError> {
		let table = config
			.as_table()
			.ok_or_else(|| mismatch("root", "table", config))?;

		for field in &self.required {
			let value = table
				.get(&field.name)
				.ok_or_else(|| ValidationError::MissingField(field.name.clone()))?;
			field.check(value)?;
		}

		for field in &self.optional {
			if let Some(value) = table.get(&field.name) {
				field.check(value)?;
			}
		}

		Ok(())
	}
}

fn mismatch(field: &str, expected: &str, value: &toml::Value) -> ValidationError {
	ValidationError::TypeMismatch {
		field: field.to_string(),
		expected: expected.to_string(),
		actual: value.type_str().to_string(),
	}
}

fn invalid(field: &str, message: String) -> ValidationError {
	ValidationError::InvalidValue {
		field: field.to_string(),
		message,
	}
}

/// Validates that a value matches the expected field type.
fn validate_field_type(
	field_name: &str,
	value: &toml::Value,
	expected_type: &FieldType,
) -> Result<(), ValidationError> {
	match expected_type {
		FieldType::String => {
			value
				.as_str()
				.ok_or_else(|| mismatch(field_name, "string", value))?;
		}
		FieldType::Integer { min, max } => {
			let int_val = value
				.as_integer()
				.ok_or_else(|| mismatch(field_name, "integer", value))?;

			if let Some(min_val) = min.filter(|min_val| int_val < *min_val) {
				return Err(invalid(
					field_name,
					format!("Value {} is less than minimum {}", int_val, min_val),
				));
			}

			if let Some(max_val) = max.filter(|max_val| int_val > *max_val) {
				return Err(invalid(
					field_name,
					format!("Value {} is greater than maximum {}", int_val, max_val),
				));
			}
		}
		FieldType::Boolean => {
			value
				.as_bool()
				.ok_or_else(|| mismatch(field_name, "boolean", value))?;
		}
		FieldType::Address => {
			let s = value
				.as_str()
				.ok_or_else(|| mismatch(field_name, "address string", value))?;
			parse_address(s).map_err(|e| invalid(field_name, e.to_string()))?;
		}
		FieldType::HexBytes { len } => {
			let s = value
				.as_str()
				.ok_or_else(|| mismatch(field_name, "hex string", value))?;
			let digits = s.strip_prefix("0x").unwrap_or(s);

			if digits.len() != len * 2 {
				return Err(invalid(
					field_name,
					format!("Expected {} hex characters ({} bytes)", len * 2, len),
				));
			}

			hex::decode(digits)
				.map_err(|_| invalid(field_name, "Value must be valid hexadecimal".to_string()))?;
		}
		FieldType::Table(schema) => {
			schema.validate(value).map_err(|e| match e {
				ValidationError::MissingField(f) => {
					ValidationError::MissingField(format!("{}.{}", field_name, f))
				}
				ValidationError::InvalidValue { field, message } => ValidationError::InvalidValue {
					field: format!("{}.{}", field_name, field),
					message,
				},
				ValidationError::TypeMismatch {
					field,
					expected,
					actual,
				} => ValidationError::TypeMismatch {
					field: format!("{}.{}", field_name, field),
					expected,
					actual,
				},
			})?;
		}
	}

	Ok(())
}

/// A configuration schema that can validate TOML values.
pub trait ConfigSchema: Send + Sync {
	fn validate(&self, config: &toml::Value) -> Result<(), ValidationError>;
}

#[cfg(test)]
mod tests {
	use super::*;

	fn domain_schema() -> Schema {
		Schema::new(
			vec![
				Field::new(
					"chain_id",
					FieldType::Integer {
						min: Some(1),
						max: None,
					},
				),
				Field::new("verifying_contract", FieldType::Address),
			],
			vec![Field::new("name", FieldType::String).with_validator(|value| {
				match value.as_str() {
					Some("") => Err("name must not be empty".to_string()),
					_ => Ok(()),
				}
			})],
		)
	}

	fn parse(s: &str) -> toml::Value {
		toml::from_str(s).unwrap()
	}

	#[test]
	fn test_valid_table() {
		let config = parse(
			r#"
chain_id = 1
verifying_contract = "0x9757F2d2b135150BBeb65308D4a91804107cd8D6"
name = "Exchange"
"#,
		);
		domain_schema().validate(&config).unwrap();
	}

	#[test]
	fn test_missing_field() {
		let config = parse("chain_id = 1");
		assert!(matches!(
			domain_schema().validate(&config),
			Err(ValidationError::MissingField(f)) if f == "verifying_contract"
		));
	}

	#[test]
	fn test_bad_address_and_range() {
		let config = parse(
			r#"
chain_id = 1
verifying_contract = "0x1234"
"#,
		);
		assert!(matches!(
			domain_schema().validate(&config),
			Err(ValidationError::InvalidValue { field, .. }) if field == "verifying_contract"
		));

		let config = parse(
			r#"
chain_id = 0
verifying_contract = "0x9757F2d2b135150BBeb65308D4a91804107cd8D6"
"#,
		);
		assert!(domain_schema().validate(&config).is_err());
	}

	#[test]
	fn test_custom_validator_and_type_mismatch() {
		let config = parse(
			r#"
chain_id = 1
verifying_contract = "0x9757F2d2b135150BBeb65308D4a91804107cd8D6"
name = ""
"#,
		);
		assert!(domain_schema().validate(&config).is_err());

		let config = parse(
			r#"
chain_id = "one"
verifying_contract = "0x9757F2d2b135150BBeb65308D4a91804107cd8D6"
"#,
		);
		assert!(matches!(
			domain_schema().validate(&config),
			Err(ValidationError::TypeMismatch { .. })
		));
	}

	#[test]
	fn test_nested_table_prefixes_field() {
		let schema = Schema::new(
			vec![Field::new("domain", FieldType::Table(domain_schema()))],
			vec![],
		);
		let config = parse(
			r#"
[domain]
chain_id = 1
"#,
		);
		assert!(matches!(
			schema.validate(&config),
			Err(ValidationError::MissingField(f)) if f == "domain.verifying_contract"
		));
	}

	#[test]
	fn test_hex_bytes() {
		let schema = Schema::new(
			vec![Field::new("private_key", FieldType::HexBytes { len: 32 })],
			vec![],
		);
		let good = parse(&format!("private_key = \"0x{}\"", "11".repeat(32)));
		schema.validate(&good).unwrap();

		let short = parse("private_key = \"0x1234\"");
		assert!(schema.validate(&short).is_err());

		let not_hex = parse(&format!("private_key = \"{}\"", "zz".repeat(32)));
		assert!(schema.validate(&not_hex).is_err());
	}
}
