use crate::domain::model::{ServiceRecord, DEFAULT_DESCRIPTION};
use crate::utils::error::{InitError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// One service definition file, as written on disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceFile {
    pub name: String,
    pub description: Option<String>,
    pub position: i64,
    pub start: Vec<String>,
    pub stop: Vec<String>,
    pub restart: Vec<String>,
    pub block: bool,
    pub timeout: Option<u64>,
}

impl ServiceFile {
    /// 載入並驗證單一服務定義
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

    /// Commands are kept verbatim: `${VAR}` in a start command is expanded
    /// by the service's shell, not by the loader.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: Self = toml::from_str(content).map_err(|e| InitError::ConfigParseError {
            path: PathBuf::new(),
            message: format!("error parsing service configuration: {}", e),
        })?;
        file.validate()?;
        Ok(file)
    }

    /// Applies defaults. `source` is the file the definition came from.
    pub fn into_record(self, source: Option<PathBuf>) -> ServiceRecord {
        let description = self
            .description
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string());

        ServiceRecord {
            name: self.name,
            description,
            position: self.position,
            start_commands: self.start,
            stop_commands: self.stop,
            restart_commands: self.restart,
            blocking: self.block,
            timeout_secs: self.timeout,
            source,
        }
    }
}

impl Validate for ServiceFile {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("name", &self.name)?;
        validation::validate_non_empty_commands("start", &self.start).map_err(|e| match e {
            InitError::MissingConfigError { .. } => InitError::MissingConfigError {
                field: format!("start (service {})", self.name),
            },
            other => other,
        })
    }
}

/// Loads, validates and converts one service file.
pub fn load_service(path: &Path) -> Result<ServiceRecord> {
    let file = ServiceFile::from_file(path)?;
    Ok(file.into_record(Some(path.to_path_buf())))
}
