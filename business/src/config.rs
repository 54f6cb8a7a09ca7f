use std::any::Any;

use roster_states::{State, state_assign_impl};
use serde::Deserialize;
use ustr::Ustr;

/// Where the directory fetches its dataset from.
#[derive(Debug, Clone)]
pub struct BusinessConfig {
    pub api_base_url: String,
}

impl BusinessConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: base_url.into(),
        }
    }

    /// `GET` target for the one-shot dataset fetch.
    pub fn users_url(&self) -> Ustr {
        Ustr::from(&format!(
            "{}/users",
            self.api_base_url.trim_end_matches('/')
        ))
    }

    /// Environment override (`DIRECTORY_API_BASE_URL`), falling back to the
    /// default endpoint.
    pub fn from_env() -> Self {
        let overrides: EnvOverrides = serde_env::from_env().unwrap_or_default();
        match overrides.directory_api_base_url {
            Some(url) if !url.trim().is_empty() => Self::new(url),
            _ => Self::default(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct EnvOverrides {
    #[serde(default)]
    directory_api_base_url: Option<String>,
}

impl Default for BusinessConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://jsonplaceholder.typicode.com".to_owned(),
        }
    }
}

impl State for BusinessConfig {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn snapshot(&self) -> Option<Box<dyn Any + Send>> {
        Some(Box::new(self.clone()))
    }

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
        state_assign_impl(self, new_self);
    }
}
