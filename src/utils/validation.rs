use crate::utils::error::{InitError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(InitError::MissingConfigError {
            field: field_name.to_string(),
        });
    }

    if path.contains('\0') {
        return Err(InitError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: u64, min_value: u64) -> Result<()> {
    if value < min_value {
        return Err(InitError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

/// Empty or whitespace-only strings count as absent.
pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(InitError::MissingConfigError {
            field: field_name.to_string(),
        });
    }
    Ok(())
}

pub fn validate_non_empty_commands(field_name: &str, commands: &[String]) -> Result<()> {
    if commands.is_empty() {
        return Err(InitError::MissingConfigError {
            field: field_name.to_string(),
        });
    }

    if let Some(blank) = commands.iter().find(|c| c.trim().is_empty()) {
        return Err(InitError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: blank.clone(),
            reason: "Command cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path() {
        assert!(validate_path("services", "/etc/init/*.toml").is_ok());
        assert!(validate_path("services", "").is_err());
        assert!(validate_path("services", "bad\0path").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("timeout", 5, 1).is_ok());
        assert!(validate_positive_number("timeout", 0, 1).is_err());
    }

    #[test]
    fn test_validate_non_empty_string() {
        assert!(validate_non_empty_string("name", "sshd").is_ok());
        assert!(matches!(
            validate_non_empty_string("name", "   "),
            Err(InitError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_validate_non_empty_commands() {
        assert!(validate_non_empty_commands("start", &["echo hi".to_string()]).is_ok());
        assert!(validate_non_empty_commands("start", &[]).is_err());
        assert!(validate_non_empty_commands("start", &["echo".to_string(), " ".to_string()]).is_err());
    }
}
