//! Placement pipeline: picks the hosting target for one deployment.
//!
//! 1. Scheduling rules nominate config references (if scheduling is set)
//! 2. Without a nomination, every unrestricted config is eligible
//! 3. References are resolved against the live configs and deduplicated
//! 4. The scorer picks the best remaining config

use std::collections::{HashMap, HashSet};

use lss_core::{LandscaperDeployment, ObjectReference, ServiceTargetConfig, TargetScheduling};
use tracing::{debug, info, warn};

use crate::error::{SchedulingError, SchedulingResult};
use crate::rules::evaluate_rules;
use crate::scorer::pick_service_target_config;

/// Find the `ServiceTargetConfig` a deployment should be placed on.
///
/// `scheduling` is `None` when no scheduling resource is configured; that
/// behaves like a scheduling resource without rules.
pub fn find_service_target_config<'a>(
    scheduling: Option<&TargetScheduling>,
    deployment: &LandscaperDeployment,
    service_target_configs: &'a [ServiceTargetConfig],
) -> SchedulingResult<&'a ServiceTargetConfig> {
    let mut config_refs = match scheduling {
        Some(scheduling) => evaluate_rules(scheduling, deployment)?,
        None => Vec::new(),
    };

    if config_refs.is_empty() {
        debug!(
            deployment = %deployment.reference(),
            "no scheduling rule applies, using unrestricted service target configs"
        );
        config_refs = get_unrestricted(service_target_configs);
    }

    let configs = convert_and_filter(&config_refs, service_target_configs);
    if configs.is_empty() {
        return Err(SchedulingError::NoServiceTargetConfigAvailable);
    }

    let winner = pick_service_target_config(&configs)?;
    info!(
        deployment = %deployment.reference(),
        tenant = deployment.tenant_id(),
        config = %winner.reference(),
        "found service target config"
    );
    Ok(winner)
}

/// References to every config that is not restricted, in input order.
pub fn get_unrestricted(service_target_configs: &[ServiceTargetConfig]) -> Vec<ObjectReference> {
    service_target_configs
        .iter()
        .filter(|c| !c.spec.restricted)
        .map(ServiceTargetConfig::reference)
        .collect()
}

/// Resolve references to live configs.
///
/// Duplicates collapse to one entry, kept at the position of their first
/// occurrence. References without a matching config are dropped.
pub fn convert_and_filter<'a>(
    config_refs: &[ObjectReference],
    service_target_configs: &'a [ServiceTargetConfig],
) -> Vec<&'a ServiceTargetConfig> {
    let by_ref: HashMap<ObjectReference, &ServiceTargetConfig> = service_target_configs
        .iter()
        .map(|c| (c.reference(), c))
        .collect();

    let mut seen: HashSet<&ObjectReference> = HashSet::new();
    let mut result = Vec::new();

    for config_ref in config_refs {
        if !seen.insert(config_ref) {
            continue;
        }
        match by_ref.get(config_ref) {
            Some(config) => result.push(*config),
            None => warn!(config = %config_ref, "referenced service target config does not exist"),
        }
    }

    result
}
