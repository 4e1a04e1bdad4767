//! An already fetched view of the cluster state.
//!
//! The scheduler never talks to the API server. Callers fetch the
//! scheduling resources, target configs, and deployments once and hand
//! them over as a snapshot; decisions are written back into it.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::ControllerConfig;
use crate::error::{CoreError, CoreResult};
use crate::types::{LandscaperDeployment, ObjectReference, ServiceTargetConfig, TargetScheduling};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClusterSnapshot {
    pub target_schedulings: Vec<TargetScheduling>,
    pub service_target_configs: Vec<ServiceTargetConfig>,
    pub landscaper_deployments: Vec<LandscaperDeployment>,
}

impl ClusterSnapshot {
    pub fn from_file(path: &Path) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| CoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let snapshot = Self::from_json_str(&content)?;
        debug!(
            ?path,
            schedulings = snapshot.target_schedulings.len(),
            configs = snapshot.service_target_configs.len(),
            deployments = snapshot.landscaper_deployments.len(),
            "snapshot loaded"
        );
        Ok(snapshot)
    }

    pub fn from_json_str(content: &str) -> CoreResult<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn to_json_string(&self) -> CoreResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// The scheduling resource selected by `config`.
    ///
    /// Returns `None` if scheduling is not configured or the configured
    /// resource does not exist.
    pub fn scheduling(&self, config: &ControllerConfig) -> Option<&TargetScheduling> {
        let Some(scheduling_config) = &config.scheduling else {
            info!("no scheduling configured");
            return None;
        };

        let key = scheduling_config.reference();
        let found = self
            .target_schedulings
            .iter()
            .find(|s| s.metadata.reference() == key);
        if found.is_none() {
            info!(resource = %key, "no scheduling resource configured");
        }
        found
    }

    /// Configs that are visible for scheduling, in snapshot order.
    pub fn visible_service_target_configs(&self) -> Vec<ServiceTargetConfig> {
        self.service_target_configs
            .iter()
            .filter(|c| c.is_visible())
            .cloned()
            .collect()
    }

    pub fn deployment(&self, reference: &ObjectReference) -> Option<&LandscaperDeployment> {
        self.landscaper_deployments
            .iter()
            .find(|d| d.reference() == *reference)
    }
}
