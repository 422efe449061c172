//! JSON validation framework for the Waku solver.
//!
//! Every payload crossing the transport boundary is untyped JSON. This
//! module provides a schema framework for validating those values before
//! they are deserialized into typed structures, with support for nested
//! objects, typed arrays, and custom per-field validators.

use thiserror::Error;

/// Errors that can occur during message validation.
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
	/// Error that occurs when deserialization fails after schema checks.
	#[error("Failed to deserialize message: {0}")]
	Deserialization(String),
}

/// Represents the type of a field in a JSON payload.
#[derive(Debug)]
pub enum FieldType {
	/// A string value.
	String,
	/// An integer value with optional minimum and maximum bounds.
	Integer {
		/// Minimum allowed value (inclusive).
		min: Option<i64>,
		/// Maximum allowed value (inclusive).
		max: Option<i64>,
	},
	/// A boolean value.
	Boolean,
	/// A value that may be either a JSON number or a numeric string.
	///
	/// Transaction amounts arrive in both encodings depending on the
	/// peer's serializer, so both are accepted.
	NumberOrString,
	/// An array of values, all of the same type.
	Array(Box<FieldType>),
	/// A nested object with its own schema.
	Object(Schema),
	/// An opaque value whose structure this layer does not define.
	///
	/// Used for protocol-specific instruction blobs that are passed
	/// through to downstream systems untouched.
	Any,
}

/// Type alias for field validator functions.
///
/// Validators perform additional checks beyond type matching. They receive
/// the field's JSON value and return an error message on failure.
pub type FieldValidator = Box<dyn Fn(&serde_json::Value) -> Result<(), String> + Send + Sync>;

/// A named field in a payload schema with a type and an optional custom
/// validator.
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
	/// Creates a new field with the given name and type.
	pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
		Self {
			name: name.into(),
			field_type,
			validator: None,
		}
	}

	/// Adds a custom validator to this field.
	pub fn with_validator<F>(mut self, validator: F) -> Self
	where
		F: Fn(&serde_json::Value) -> Result<(), String> + Send + Sync + 'static,
	{
		self.validator = Some(Box::new(validator));
		self
	}
}

/// A validation schema for a JSON object.
///
/// A schema consists of required fields that must be present and optional
/// fields that may be present. Fields not named by the schema are ignored,
/// matching the tolerance the wire contract demands of consumers.
#[derive(Debug)]
pub struct Schema {
	pub required: Vec<Field>,
	pub optional: Vec<Field>,
}

impl Schema {
	/// Creates a new schema with required and optional fields.
	pub fn new(required: Vec<Field>, optional: Vec<Field>) -> Self {
		Self { required, optional }
	}

	/// Validates a JSON value against this schema.
	///
	/// Checks that the value is an object, that all required fields are
	/// present with the right types, that present optional fields have the
	/// right types, and runs custom validators where defined. Nested
	/// objects are validated recursively.
	pub fn validate(&self, payload: &serde_json::Value) -> Result<(), ValidationError> {
		let object = payload
			.as_object()
			.ok_or_else(|| ValidationError::TypeMismatch {
				field: "root".to_string(),
				expected: "object".to_string(),
				actual: json_type_name(payload).to_string(),
			})?;

		for field in &self.required {
			let value = object
				.get(&field.name)
				.ok_or_else(|| ValidationError::MissingField(field.name.clone()))?;

			validate_field_type(&field.name, value, &field.field_type)?;

			if let Some(validator) = &field.validator {
				validator(value).map_err(|msg| ValidationError::InvalidValue {
					field: field.name.clone(),
					message: msg,
				})?;
			}
		}

		for field in &self.optional {
			// Absent and explicit-null optional fields are both tolerated.
			match object.get(&field.name) {
				None | Some(serde_json::Value::Null) => continue,
				Some(value) => {
					validate_field_type(&field.name, value, &field.field_type)?;

					if let Some(validator) = &field.validator {
						validator(value).map_err(|msg| ValidationError::InvalidValue {
							field: field.name.clone(),
							message: msg,
						})?;
					}
				},
			}
		}

		Ok(())
	}
}

/// Returns the JSON type name of a value for error messages.
fn json_type_name(value: &serde_json::Value) -> &'static str {
	match value {
		serde_json::Value::Null => "null",
		serde_json::Value::Bool(_) => "boolean",
		serde_json::Value::Number(_) => "number",
		serde_json::Value::String(_) => "string",
		serde_json::Value::Array(_) => "array",
		serde_json::Value::Object(_) => "object",
	}
}

/// Validates that a value matches the expected field type, recursing into
/// arrays and nested objects.
fn validate_field_type(
	field_name: &str,
	value: &serde_json::Value,
	expected_type: &FieldType,
) -> Result<(), ValidationError> {
	match expected_type {
		FieldType::String => {
			if !value.is_string() {
				return Err(ValidationError::TypeMismatch {
					field: field_name.to_string(),
					expected: "string".to_string(),
					actual: json_type_name(value).to_string(),
				});
			}
		},
		FieldType::Integer { min, max } => {
			let int_val = value
				.as_i64()
				.ok_or_else(|| ValidationError::TypeMismatch {
					field: field_name.to_string(),
					expected: "integer".to_string(),
					actual: json_type_name(value).to_string(),
				})?;

			if let Some(min_val) = min {
				if int_val < *min_val {
					return Err(ValidationError::InvalidValue {
						field: field_name.to_string(),
						message: format!("Value {} is less than minimum {}", int_val, min_val),
					});
				}
			}

			if let Some(max_val) = max {
				if int_val > *max_val {
					return Err(ValidationError::InvalidValue {
						field: field_name.to_string(),
						message: format!("Value {} is greater than maximum {}", int_val, max_val),
					});
				}
			}
		},
		FieldType::Boolean => {
			if !value.is_boolean() {
				return Err(ValidationError::TypeMismatch {
					field: field_name.to_string(),
					expected: "boolean".to_string(),
					actual: json_type_name(value).to_string(),
				});
			}
		},
		FieldType::NumberOrString => {
			if !value.is_number() && !value.is_string() {
				return Err(ValidationError::TypeMismatch {
					field: field_name.to_string(),
					expected: "number or string".to_string(),
					actual: json_type_name(value).to_string(),
				});
			}
		},
		FieldType::Array(inner_type) => {
			let array = value
				.as_array()
				.ok_or_else(|| ValidationError::TypeMismatch {
					field: field_name.to_string(),
					expected: "array".to_string(),
					actual: json_type_name(value).to_string(),
				})?;

			for (i, item) in array.iter().enumerate() {
				validate_field_type(&format!("{}[{}]", field_name, i), item, inner_type)?;
			}
		},
		FieldType::Object(schema) => {
			schema.validate(value).map_err(|e| match e {
				ValidationError::MissingField(f) => {
					ValidationError::MissingField(format!("{}.{}", field_name, f))
				},
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
				other => other,
			})?;
		},
		FieldType::Any => {},
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	fn sample_schema() -> Schema {
		Schema::new(
			vec![
				Field::new("name", FieldType::String),
				Field::new(
					"count",
					FieldType::Integer {
						min: Some(0),
						max: None,
					},
				),
			],
			vec![
				Field::new("tags", FieldType::Array(Box::new(FieldType::String))),
				Field::new("amount", FieldType::NumberOrString),
				Field::new("extra", FieldType::Any),
			],
		)
	}

	#[test]
	fn test_valid_payload_passes() {
		let payload = json!({
			"name": "swap",
			"count": 3,
			"tags": ["a", "b"],
			"amount": "100",
			"extra": {"anything": [1, 2, 3]}
		});
		assert!(sample_schema().validate(&payload).is_ok());
	}

	#[test]
	fn test_missing_required_field_fails() {
		let payload = json!({"name": "swap"});
		let err = sample_schema().validate(&payload).unwrap_err();
		assert!(matches!(err, ValidationError::MissingField(f) if f == "count"));
	}

	#[test]
	fn test_wrong_type_fails() {
		let payload = json!({"name": 42, "count": 3});
		let err = sample_schema().validate(&payload).unwrap_err();
		assert!(matches!(err, ValidationError::TypeMismatch { field, .. } if field == "name"));
	}

	#[test]
	fn test_integer_bounds_enforced() {
		let payload = json!({"name": "swap", "count": -1});
		let err = sample_schema().validate(&payload).unwrap_err();
		assert!(matches!(err, ValidationError::InvalidValue { field, .. } if field == "count"));
	}

	#[test]
	fn test_number_or_string_accepts_both() {
		let schema = sample_schema();
		assert!(schema
			.validate(&json!({"name": "a", "count": 0, "amount": 100}))
			.is_ok());
		assert!(schema
			.validate(&json!({"name": "a", "count": 0, "amount": "100"}))
			.is_ok());
		assert!(schema
			.validate(&json!({"name": "a", "count": 0, "amount": true}))
			.is_err());
	}

	#[test]
	fn test_unknown_fields_ignored() {
		let payload = json!({"name": "swap", "count": 1, "unlisted": "whatever"});
		assert!(sample_schema().validate(&payload).is_ok());
	}

	#[test]
	fn test_null_optional_field_tolerated() {
		let payload = json!({"name": "swap", "count": 1, "tags": null});
		assert!(sample_schema().validate(&payload).is_ok());
	}

	#[test]
	fn test_array_element_type_checked() {
		let payload = json!({"name": "swap", "count": 1, "tags": ["ok", 5]});
		let err = sample_schema().validate(&payload).unwrap_err();
		assert!(matches!(err, ValidationError::TypeMismatch { field, .. } if field == "tags[1]"));
	}

	#[test]
	fn test_custom_validator_runs() {
		let schema = Schema::new(
			vec![Field::new("chain", FieldType::String).with_validator(|v| {
				if v.as_str() == Some("ethereum") {
					Ok(())
				} else {
					Err("unsupported chain".to_string())
				}
			})],
			vec![],
		);
		assert!(schema.validate(&json!({"chain": "ethereum"})).is_ok());
		let err = schema.validate(&json!({"chain": "mars"})).unwrap_err();
		assert!(matches!(err, ValidationError::InvalidValue { field, .. } if field == "chain"));
	}

	#[test]
	fn test_non_object_root_fails() {
		let err = sample_schema().validate(&json!([1, 2, 3])).unwrap_err();
		assert!(matches!(err, ValidationError::TypeMismatch { field, .. } if field == "root"));
	}
}
