use crate::domain::model::{DEFAULT_START_MESSAGE, DEFAULT_STOP_MESSAGE, DEFAULT_TIMEOUT_SECS};
use crate::utils::error::{InitError, Result};
use crate::utils::validation::{self, Validate};
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// The top-level init file passed on the command line.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InitFile {
    pub timeout: Option<u64>,
    pub start: Option<String>,
    pub stop: Option<String>,
    pub services: Option<String>,
}

impl InitFile {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(InitError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| InitError::from(e).while_loading(path))?;
        Self::from_toml_str(&content).map_err(|e| match e {
            InitError::ConfigParseError { message, .. } => InitError::ConfigParseError {
                path: path.to_path_buf(),
                message,
            },
            other => other,
        })
    }

    /// Parses and validates, substituting `${VAR}` from the process environment.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = substitute_env_vars(content);

        let file: Self = toml::from_str(&processed).map_err(|e| InitError::ConfigParseError {
            path: PathBuf::new(),
            message: format!("TOML parsing error: {}", e),
        })?;
        file.validate()?;
        Ok(file)
    }

    pub fn timeout_secs(&self) -> u64 {
        self.timeout.unwrap_or(DEFAULT_TIMEOUT_SECS)
    }

    /// Empty strings fall back to the default message.
    pub fn start_message(&self) -> &str {
        non_empty(self.start.as_deref()).unwrap_or(DEFAULT_START_MESSAGE)
    }

    pub fn stop_message(&self) -> &str {
        non_empty(self.stop.as_deref()).unwrap_or(DEFAULT_STOP_MESSAGE)
    }

    pub fn services_pattern(&self) -> &str {
        self.services.as_deref().unwrap_or_default()
    }
}

impl Validate for InitFile {
    fn validate(&self) -> Result<()> {
        validation::validate_positive_number("timeout", self.timeout_secs(), 1)?;
        validation::validate_path("services", self.services_pattern())?;
        Ok(())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Replaces `${NAME}` from the process environment.
fn substitute_env_vars(content: &str) -> String {
    substitute_vars(content, |name| std::env::var(name).ok())
}

/// Replaces `${NAME}` with `lookup(NAME)`; unknown names stay verbatim.
fn substitute_vars<F>(content: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    let re = PATTERN.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("valid env var pattern"));

    re.replace_all(content, |caps: &Captures| {
        let var_name = &caps[1];
        lookup(var_name).unwrap_or_else(|| format!("${{{}}}", var_name))
    })
    .into_owned()
}
