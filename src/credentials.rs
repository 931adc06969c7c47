//! API credential resolution
//!
//! Resolves the bearer secret from one of three sources with a fixed
//! precedence: explicit value > environment variable > dotenv-format key
//! file. Resolution is read-only and the secret is never logged.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::{Error, Result};

pub const DEFAULT_ENV_VAR: &str = "ARK_API_KEY";

/// Opaque bearer secret. Immutable after construction; the Debug impl
/// redacts the value so it cannot leak through logging.
#[derive(Clone)]
pub struct Credentials {
    secret: String,
}

impl Credentials {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    pub(crate) fn secret(&self) -> &str {
        &self.secret
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credentials(****)")
    }
}

/// Locates the API key. Blank values at any level count as absent and fall
/// through to the next source.
#[derive(Debug, Clone)]
pub struct CredentialResolver {
    explicit: Option<String>,
    env_var: String,
    key_file: Option<PathBuf>,
}

impl CredentialResolver {
    pub fn new() -> Self {
        Self {
            explicit: None,
            env_var: DEFAULT_ENV_VAR.to_string(),
            key_file: None,
        }
    }

    pub fn with_explicit(mut self, secret: impl Into<String>) -> Self {
        self.explicit = Some(secret.into());
        self
    }

    pub fn with_env_var(mut self, name: impl Into<String>) -> Self {
        self.env_var = name.into();
        self
    }

    pub fn with_key_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.key_file = Some(path.into());
        self
    }

    pub fn resolve(&self) -> Result<Credentials> {
        if let Some(secret) = &self.explicit {
            if !secret.trim().is_empty() {
                return Ok(Credentials::new(secret.clone()));
            }
        }

        if let Ok(value) = std::env::var(&self.env_var) {
            if !value.trim().is_empty() {
                return Ok(Credentials::new(value));
            }
        }

        if let Some(path) = &self.key_file {
            if let Some(secret) = self.lookup_key_file(path) {
                return Ok(Credentials::new(secret));
            }
        }

        Err(Error::MissingCredential(format!(
            "no API key found (checked explicit value, ${}, and key file)",
            self.env_var
        )))
    }

    /// Reads a dotenv-format file without mutating process environment and
    /// looks up the configured variable name.
    fn lookup_key_file(&self, path: &Path) -> Option<String> {
        let entries = dotenvy::from_path_iter(path).ok()?;
        entries
            .flatten()
            .find(|(key, _)| key == &self.env_var)
            .map(|(_, value)| value)
            .filter(|value| !value.trim().is_empty())
    }
}

impl Default for CredentialResolver {
    fn default() -> Self {
        Self::new()
    }
}
