//! The complete versioned configuration document.

use serde::{Deserialize, Serialize};

use super::backend::BackendSection;
use super::defaults::{Defaults, Global};
use super::frontend::FrontendSection;

/// A full configuration at one version.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Configuration {
    /// Monotonically increasing; advanced only by a successful commit.
    #[serde(default = "first_version")]
    pub version: i64,

    #[serde(default)]
    pub global: Global,

    #[serde(default)]
    pub defaults: Defaults,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub frontends: Vec<FrontendSection>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub backends: Vec<BackendSection>,
}

fn first_version() -> i64 {
    1
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            version: first_version(),
            global: Global::default(),
            defaults: Defaults::default(),
            frontends: Vec::new(),
            backends: Vec::new(),
        }
    }
}

impl Configuration {
    pub fn frontend(&self, name: &str) -> Option<&FrontendSection> {
        self.frontends.iter().find(|f| f.frontend.name == name)
    }

    pub fn frontend_mut(&mut self, name: &str) -> Option<&mut FrontendSection> {
        self.frontends.iter_mut().find(|f| f.frontend.name == name)
    }

    pub fn backend(&self, name: &str) -> Option<&BackendSection> {
        self.backends.iter().find(|b| b.backend.name == name)
    }

    pub fn backend_mut(&mut self, name: &str) -> Option<&mut BackendSection> {
        self.backends.iter_mut().find(|b| b.backend.name == name)
    }
}
