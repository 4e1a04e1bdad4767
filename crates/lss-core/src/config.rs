//! lss.toml controller configuration parser.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{CoreError, CoreResult};
use crate::types::ObjectReference;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControllerConfig {
    /// Which `TargetScheduling` resource to use. Absent means no scheduling.
    pub scheduling: Option<SchedulingConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulingConfig {
    pub name: String,
    pub namespace: String,
}

impl SchedulingConfig {
    pub fn reference(&self) -> ObjectReference {
        ObjectReference::new(self.name.clone(), self.namespace.clone())
    }
}

impl ControllerConfig {
    pub fn from_file(path: &Path) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| CoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> CoreResult<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml_string(&self) -> CoreResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Scaffold a config, optionally pointing at a scheduling resource.
    pub fn scaffold(scheduling: Option<(&str, &str)>) -> Self {
        ControllerConfig {
            scheduling: scheduling.map(|(name, namespace)| SchedulingConfig {
                name: name.to_string(),
                namespace: namespace.to_string(),
            }),
        }
    }
}
