use crate::utils::error::{ParcelError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ParcelError::validation(
            field_name,
            value,
            "Value cannot be empty or whitespace-only",
        ));
    }
    Ok(())
}

pub fn validate_min_integer(field_name: &str, value: u32, min_value: u32) -> Result<()> {
    if value < min_value {
        return Err(ParcelError::validation(
            field_name,
            value,
            format!("Value must be at least {}", min_value),
        ));
    }
    Ok(())
}

/// Rejects NaN and infinities as well as values below `min_value`.
pub fn validate_min_decimal(field_name: &str, value: f64, min_value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(ParcelError::validation(
            field_name,
            value,
            "Value must be a finite number",
        ));
    }
    if value < min_value {
        return Err(ParcelError::validation(
            field_name,
            value,
            format!("Value must be at least {}", min_value),
        ));
    }
    Ok(())
}

pub fn validate_storage_key(field_name: &str, key: &str) -> Result<()> {
    validate_non_empty_string(field_name, key)?;

    let allowed = key
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
    if !allowed || key.starts_with('.') {
        return Err(ParcelError::ConfigError {
            message: format!(
                "{} `{}` may only contain ASCII letters, digits, '-', '_' and '.' and must not start with '.'",
                field_name, key
            ),
        });
    }
    Ok(())
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(ParcelError::ConfigError {
            message: format!("{} cannot be empty", field_name),
        });
    }

    if path.contains('\0') {
        return Err(ParcelError::ConfigError {
            message: format!("{} contains null bytes", field_name),
        });
    }

    Ok(())
}
