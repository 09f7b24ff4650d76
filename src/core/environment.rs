use crate::utils::error::{InitError, Result};
use std::collections::BTreeMap;

pub const DEFAULT_PATH: &str = "/bin:/usr/bin:/sbin:/usr/sbin";
pub const DEFAULT_CONSOLE: &str = "/dev/console";

/// Variables every service inherits.
///
/// The map is handed to the launcher and applied to each child command. Writing
/// it into the supervisor's own process environment happens only through
/// [`Environment::apply`], once, before any service starts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    vars: BTreeMap<String, String>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricted `PATH` plus the `CONSOLE` device.
    pub fn init_defaults() -> Self {
        Self::new()
            .with("PATH", DEFAULT_PATH)
            .with("CONSOLE", DEFAULT_CONSOLE)
    }

    pub fn with(mut self, variable: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(variable, value);
        self
    }

    /// Overwrites any previous value.
    pub fn set(&mut self, variable: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(variable.into(), value.into());
    }

    pub fn get(&self, variable: &str) -> Option<&str> {
        self.vars.get(variable).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn validate(&self) -> Result<()> {
        for (variable, value) in &self.vars {
            let reason = if variable.is_empty() {
                Some("variable name is empty")
            } else if variable.contains('=') {
                Some("variable name contains '='")
            } else if variable.contains('\0') || value.contains('\0') {
                Some("contains a NUL byte")
            } else {
                None
            };

            if let Some(reason) = reason {
                return Err(InitError::EnvironmentError {
                    variable: variable.clone(),
                    reason: reason.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Writes every variable into the current process environment.
    ///
    /// Must run before any launch task is spawned: nothing else writes the
    /// process environment afterwards, so readers need no lock.
    pub fn apply(&self) -> Result<()> {
        self.apply_with(|variable, value| std::env::set_var(variable, value))
    }

    /// Validates everything first, then hands each variable to `set`.
    fn apply_with<F>(&self, mut set: F) -> Result<()>
    where
        F: FnMut(&str, &str),
    {
        self.validate()?;
        for (variable, value) in self.iter() {
            tracing::debug!("setting {}={}", variable, value);
            set(variable, value);
        }
        Ok(())
    }
}
