//! Text field normalization shared by the account and auth services.
//!
//! Errors are plain messages; callers wrap them in their own validation variant.

/// Trims `value` and requires it to be non-empty and at most `max` characters.
pub fn required(label: &str, value: &str, max: usize) -> Result<String, String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(format!("{label} is required"));
    }
    check_len(label, value, max)?;
    Ok(value.to_string())
}

/// Trims `value`; blank becomes `None`.
pub fn optional(label: &str, value: Option<&str>, max: usize) -> Result<Option<String>, String> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(value) => {
            check_len(label, value, max)?;
            Ok(Some(value.to_string()))
        }
        None => Ok(None),
    }
}

pub fn email(value: &str) -> Result<String, String> {
    let value = value.trim().to_string();
    let valid = value.split_once('@').is_some_and(|(local, domain)| {
        !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
    });

    if !valid || value.chars().any(char::is_whitespace) {
        return Err("Enter a valid email address".to_string());
    }
    check_len("Email", &value, 254)?;
    Ok(value)
}

fn check_len(label: &str, value: &str, max: usize) -> Result<(), String> {
    if value.chars().count() > max {
        return Err(format!("{label} must be {max} characters or less"));
    }
    Ok(())
}
