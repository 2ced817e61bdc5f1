//! Configuration text retrieval scope.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which configuration stores to read.
///
/// Scopes not selected come back as empty strings in the snapshot, and the
/// candidate store is always empty on this family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigScope {
    #[default]
    All,
    Running,
    Startup,
}

impl ConfigScope {
    /// Scope name as spelled on the facts surface.
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigScope::All => "all",
            ConfigScope::Running => "running",
            ConfigScope::Startup => "startup",
        }
    }
}

impl fmt::Display for ConfigScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A scope string no configuration store answers to.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown config scope: '{0}'")]
pub struct ParseScopeError(String);

impl FromStr for ConfigScope {
    type Err = ParseScopeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" | "" => Ok(ConfigScope::All),
            "running" => Ok(ConfigScope::Running),
            "startup" => Ok(ConfigScope::Startup),
            other => Err(ParseScopeError(other.to_string())),
        }
    }
}
