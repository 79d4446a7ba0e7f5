use crate::error::{Error, Result};
use std::fmt;

/// Hub API token read from the environment.
#[derive(Clone)]
pub struct Credentials {
    token: String,
}

impl Credentials {
    pub fn from_env(var: &str) -> Result<Self> {
        Self::resolve(var, std::env::var(var).ok())
    }

    pub fn resolve(var: &str, value: Option<String>) -> Result<Self> {
        match value {
            Some(token) if !token.trim().is_empty() => Ok(Self {
                token: token.trim().to_string(),
            }),
            _ => Err(Error::MissingToken {
                var: var.to_string(),
            }),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("token", &"<redacted>")
            .finish()
    }
}
