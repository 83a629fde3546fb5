//! Request validation: turn a JSON object into the [`Fields`] of a record type.

use crate::error::AppError;
use crate::record::{Fields, Record, MAX_FIELD_LENGTH};
use serde_json::{Map, Value};

pub struct RequestValidator;

impl RequestValidator {
    /// Validate a create body. Every column of `R` must be present; unknown keys are ignored.
    pub fn required<R: Record>(body: &Map<String, Value>) -> Result<Fields, AppError> {
        let mut fields = Fields::new();
        for col in R::COLUMNS {
            match body.get(*col) {
                None | Some(Value::Null) => {
                    return Err(AppError::Validation(format!("{} is required", col)));
                }
                Some(v) => fields.insert(*col, validate_field(col, v)?),
            }
        }
        Ok(fields)
    }

    /// Validate only the columns present in body (for PUT). Unknown keys are ignored.
    pub fn partial<R: Record>(body: &Map<String, Value>) -> Result<Fields, AppError> {
        let mut fields = Fields::new();
        for col in R::COLUMNS {
            if let Some(v) = body.get(*col) {
                fields.insert(*col, validate_field(col, v)?);
            }
        }
        Ok(fields)
    }
}

fn validate_field(col: &str, v: &Value) -> Result<String, AppError> {
    let s = v
        .as_str()
        .ok_or_else(|| AppError::Validation(format!("{} must be a string", col)))?;
    if s.trim().is_empty() {
        return Err(AppError::Validation(format!("{} must not be empty", col)));
    }
    if s.chars().count() > MAX_FIELD_LENGTH {
        return Err(AppError::Validation(format!(
            "{} must be at most {} characters",
            col, MAX_FIELD_LENGTH
        )));
    }
    Ok(s.to_string())
}
