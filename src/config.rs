//! Configuration management
//!
//! Claim release behaviour is configured once at startup: which standard
//! scopes are enabled, and the user-defined scope → claims definitions.
//! Loaded from an optional YAML file merged with `CLAIMS_GATE_`-prefixed
//! environment variables.

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Yaml},
};
use serde::{Deserialize, Serialize};

use crate::scope::StandardScope;
use crate::{Error, Result};

/// Claim release configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClaimsConfig {
    /// Standard scopes enabled for claim release. A standard policy whose
    /// scope name is not listed here is absent from the catalog entirely.
    pub scopes: Vec<String>,
    /// User-defined scope definitions, registered after the standard
    /// policies in listed order.
    pub custom_scopes: Vec<CustomScopeConfig>,
}

impl Default for ClaimsConfig {
    fn default() -> Self {
        Self {
            scopes: StandardScope::all()
                .iter()
                .map(|s| s.name().to_string())
                .collect(),
            custom_scopes: Vec::new(),
        }
    }
}

/// A user-defined scope and the claims it releases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomScopeConfig {
    /// Scope name, matched case-sensitively against declared service scopes.
    pub scope: String,
    /// Claim names this scope releases.
    #[serde(default)]
    pub claims: Vec<String>,
}

impl ClaimsConfig {
    /// Load configuration from an optional YAML file plus environment
    /// variables (`CLAIMS_GATE_` prefix, `__` as nesting separator).
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::new();

        // Load from file if provided
        if let Some(p) = path {
            if !p.exists() {
                return Err(Error::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            figment = figment.merge(Yaml::file(p));
        }

        // Merge environment variables (CLAIMS_GATE_ prefix)
        figment = figment.merge(Env::prefixed("CLAIMS_GATE_").split("__"));

        figment.extract().map_err(|e| Error::Config(e.to_string()))
    }
}

// ============================================================================
// Tests
// ============================================================================
