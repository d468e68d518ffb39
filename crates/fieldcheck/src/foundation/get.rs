//! Typed extraction from untyped input.
//!
//! The `get*` entry points check that an opaque value has the expected
//! type before running validators on it. A type mismatch is a hard stop:
//! no validator runs and no partial value is returned.

use std::any::{Any, type_name};

use serde_json::{Map, Value};

use crate::foundation::{Validate, ValidationError, validate_first};

/// Downcasts `input` to `T`, runs `validators` with the first-failure
/// policy and returns a copy of the typed value.
///
/// ```
/// use fieldcheck::foundation::get;
///
/// let raw: Box<dyn std::any::Any> = Box::new(String::from("alice"));
/// let name: String = get(raw.as_ref(), &[]).unwrap();
/// assert_eq!(name, "alice");
///
/// let bytes: Vec<u8> = b"x".to_vec();
/// assert!(get::<String>(&bytes, &[]).is_err());
/// ```
pub fn get<T: Any + Clone>(
    input: &dyn Any,
    validators: &[&dyn Validate<Input = T>],
) -> Result<T, ValidationError> {
    get_ref(input, validators).cloned()
}

/// Like [`get`], but borrows the typed value instead of cloning it.
pub fn get_ref<'a, T: Any>(
    input: &'a dyn Any,
    validators: &[&dyn Validate<Input = T>],
) -> Result<&'a T, ValidationError> {
    let value = input
        .downcast_ref::<T>()
        .ok_or_else(|| ValidationError::type_mismatch(type_name::<T>()))?;
    validate_first(value, validators)?;
    Ok(value)
}

// ============================================================================
// JSON
// ============================================================================

/// Types that can be read out of a JSON value without coercion.
pub trait FromJson: Sized {
    /// JSON type name reported on mismatch.
    const JSON_TYPE: &'static str;

    /// Returns the typed value if `value` has the matching JSON type.
    fn from_json(value: &Value) -> Option<Self>;
}

impl FromJson for String {
    const JSON_TYPE: &'static str = "string";

    fn from_json(value: &Value) -> Option<Self> {
        value.as_str().map(str::to_owned)
    }
}

impl FromJson for bool {
    const JSON_TYPE: &'static str = "boolean";

    fn from_json(value: &Value) -> Option<Self> {
        value.as_bool()
    }
}

impl FromJson for i64 {
    const JSON_TYPE: &'static str = "integer";

    fn from_json(value: &Value) -> Option<Self> {
        value.as_i64()
    }
}

impl FromJson for u64 {
    const JSON_TYPE: &'static str = "unsigned integer";

    fn from_json(value: &Value) -> Option<Self> {
        value.as_u64()
    }
}

impl FromJson for f64 {
    const JSON_TYPE: &'static str = "number";

    fn from_json(value: &Value) -> Option<Self> {
        value.as_f64()
    }
}

impl FromJson for Vec<Value> {
    const JSON_TYPE: &'static str = "array";

    fn from_json(value: &Value) -> Option<Self> {
        value.as_array().cloned()
    }
}

impl FromJson for Map<String, Value> {
    const JSON_TYPE: &'static str = "object";

    fn from_json(value: &Value) -> Option<Self> {
        value.as_object().cloned()
    }
}

/// Returns the JSON type name of `value`.
fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "number",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Reads a `T` out of a JSON value, then runs `validators` with the
/// first-failure policy.
///
/// ```
/// use fieldcheck::foundation::get_json;
/// use fieldcheck::validators::min;
/// use serde_json::json;
///
/// let age: i64 = get_json(&json!(21), &[&min(18)]).unwrap();
/// assert_eq!(age, 21);
///
/// let error = get_json::<i64>(&json!("21"), &[]).unwrap_err();
/// assert_eq!(error.to_string(), "type mismatch: expected integer, got string");
/// ```
pub fn get_json<T: FromJson>(
    value: &Value,
    validators: &[&dyn Validate<Input = T>],
) -> Result<T, ValidationError> {
    let Some(typed) = T::from_json(value) else {
        let actual = json_type(value);
        return Err(ValidationError::new(
            "type_mismatch",
            format!("type mismatch: expected {}, got {actual}", T::JSON_TYPE),
        )
        .with_param("expected", T::JSON_TYPE)
        .with_param("actual", actual));
    };
    validate_first(&typed, validators)?;
    Ok(typed)
}
