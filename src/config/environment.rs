//! Snapshot of the variables credentials are read from

use std::collections::HashMap;

use crate::error::AuthError;

/// Environment variables captured once at startup
///
/// Registry logins read credentials from here instead of calling
/// `std::env::var` directly, so tests can supply their own values.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    vars: HashMap<String, String>,
}

impl Environment {
    pub fn from_process() -> Self {
        std::env::vars().collect()
    }

    /// Set variables are returned as-is, including empty ones
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    /// Like `get`, but an unset variable is an error
    pub fn require(&self, key: &str) -> Result<&str, AuthError> {
        self.get(key).ok_or_else(|| AuthError::MissingCredential {
            var: key.to_string(),
        })
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Environment {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
