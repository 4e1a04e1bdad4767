//! Repeated scheduling over a cluster snapshot.
//!
//! The `Scheduler` plays the part of the deployment reconciler:
//! - Resolves the configured `TargetScheduling` resource
//! - Offers only visible service target configs to the placer
//! - Writes every decision back, so the next one sees the new usage
//!
//! Deployments that already have a target keep it.

use lss_core::{ClusterSnapshot, ControllerConfig, ObjectReference};
use serde::Serialize;
use tracing::{debug, error, info};

use crate::assignment::assign;
use crate::error::{SchedulingError, SchedulingResult};
use crate::placer::find_service_target_config;

/// Outcome of scheduling one deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub deployment: ObjectReference,
    pub service_target_config: ObjectReference,
    /// False if the deployment had been scheduled before.
    pub newly_scheduled: bool,
}

/// Schedules deployments of a snapshot it owns.
pub struct Scheduler {
    snapshot: ClusterSnapshot,
    config: ControllerConfig,
}

impl Scheduler {
    pub fn new(snapshot: ClusterSnapshot, config: ControllerConfig) -> Self {
        Self { snapshot, config }
    }

    pub fn snapshot(&self) -> &ClusterSnapshot {
        &self.snapshot
    }

    /// Give back the snapshot with all recorded decisions.
    pub fn into_snapshot(self) -> ClusterSnapshot {
        self.snapshot
    }

    /// Schedule a single deployment.
    pub fn schedule(&mut self, deployment: &ObjectReference) -> SchedulingResult<Assignment> {
        let index = self
            .snapshot
            .landscaper_deployments
            .iter()
            .position(|d| d.reference() == *deployment)
            .ok_or_else(|| SchedulingError::DeploymentNotFound(deployment.to_string()))?;

        if let Some(existing) = &self.snapshot.landscaper_deployments[index]
            .status
            .service_target_config_ref
        {
            debug!(deployment = %deployment, config = %existing, "deployment already scheduled");
            return Ok(Assignment {
                deployment: deployment.clone(),
                service_target_config: existing.clone(),
                newly_scheduled: false,
            });
        }

        let target = {
            let snapshot = &self.snapshot;
            let visible = snapshot.visible_service_target_configs();
            let scheduling = snapshot.scheduling(&self.config);
            let winner = find_service_target_config(
                scheduling,
                &snapshot.landscaper_deployments[index],
                &visible,
            )?;
            winner.reference()
        };

        assign(
            &mut self.snapshot.landscaper_deployments[index],
            &target,
            &mut self.snapshot.service_target_configs,
        )?;

        info!(deployment = %deployment, config = %target, "scheduled deployment");
        Ok(Assignment {
            deployment: deployment.clone(),
            service_target_config: target,
            newly_scheduled: true,
        })
    }

    /// Schedule every deployment in snapshot order.
    ///
    /// A failure for one deployment does not stop the others.
    pub fn schedule_all(&mut self) -> Vec<(ObjectReference, SchedulingResult<Assignment>)> {
        let deployments: Vec<ObjectReference> = self
            .snapshot
            .landscaper_deployments
            .iter()
            .map(|d| d.reference())
            .collect();

        deployments
            .into_iter()
            .map(|deployment| {
                let result = self.schedule(&deployment);
                if let Err(e) = &result {
                    error!(deployment = %deployment, error = %e, "unable to find service target config");
                }
                (deployment, result)
            })
            .collect()
    }
}
