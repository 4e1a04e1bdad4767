//! Recording scheduling decisions.
//!
//! A decision is stored on both sides: the deployment's status points at
//! its target, and the target lists the deployment in its instance refs.
//! The instance refs are what later decisions count as usage.

use lss_core::{LandscaperDeployment, ObjectReference, ServiceTargetConfig};
use tracing::debug;

use crate::error::{SchedulingError, SchedulingResult};

/// Place `deployment` on the config identified by `target`.
///
/// The deployment's reference is added to the config's instance refs
/// unless it is already listed.
pub fn assign(
    deployment: &mut LandscaperDeployment,
    target: &ObjectReference,
    service_target_configs: &mut [ServiceTargetConfig],
) -> SchedulingResult<()> {
    let config = service_target_configs
        .iter_mut()
        .find(|c| c.is(target))
        .ok_or_else(|| SchedulingError::ServiceTargetConfigNotFound(target.to_string()))?;

    let deployment_ref = deployment.reference();
    if !config.status.instance_refs.contains(&deployment_ref) {
        config.status.instance_refs.push(deployment_ref.clone());
    }
    deployment.status.service_target_config_ref = Some(target.clone());

    debug!(
        deployment = %deployment_ref,
        config = %target,
        usage = config.usage(),
        "recorded assignment"
    );
    Ok(())
}

/// Undo the assignment of `deployment`, if it has one.
///
/// Returns the config the deployment was released from. A target that no
/// longer exists only clears the deployment's status.
pub fn release(
    deployment: &mut LandscaperDeployment,
    service_target_configs: &mut [ServiceTargetConfig],
) -> Option<ObjectReference> {
    let target = deployment.status.service_target_config_ref.take()?;
    let deployment_ref = deployment.reference();

    if let Some(config) = service_target_configs.iter_mut().find(|c| c.is(&target)) {
        let refs = &mut config.status.instance_refs;
        if let Some(pos) = refs.iter().position(|r| *r == deployment_ref) {
            refs.swap_remove(pos);
        }
        debug!(deployment = %deployment_ref, config = %target, usage = config.usage(), "released assignment");
    }

    Some(target)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configs() -> Vec<ServiceTargetConfig> {
        vec![
            ServiceTargetConfig::new("cfg-1", "laas", 10),
            ServiceTargetConfig::new("cfg-2", "laas", 10),
        ]
    }

    #[test]
    fn assign_records_both_sides() {
        let mut configs = configs();
        let mut deployment = LandscaperDeployment::new("d1", "t1", "tenant01");
        let target = ObjectReference::new("cfg-2", "laas");

        assign(&mut deployment, &target, &mut configs).unwrap();

        assert_eq!(deployment.status.service_target_config_ref, Some(target));
        assert_eq!(configs[0].usage(), 0);
        assert_eq!(configs[1].status.instance_refs, vec![ObjectReference::new("d1", "t1")]);
    }

    #[test]
    fn assign_is_idempotent() {
        let mut configs = configs();
        let mut deployment = LandscaperDeployment::new("d1", "t1", "tenant01");
        let target = ObjectReference::new("cfg-1", "laas");

        assign(&mut deployment, &target, &mut configs).unwrap();
        assign(&mut deployment, &target, &mut configs).unwrap();

        assert_eq!(configs[0].usage(), 1);
    }

    #[test]
    fn assign_to_missing_config() {
        let mut configs = configs();
        let mut deployment = LandscaperDeployment::new("d1", "t1", "tenant01");

        let err = assign(&mut deployment, &ObjectReference::new("gone", "laas"), &mut configs).unwrap_err();
        assert_eq!(err, SchedulingError::ServiceTargetConfigNotFound("laas/gone".to_string()));
        assert!(deployment.status.service_target_config_ref.is_none());
    }

    #[test]
    fn release_removes_instance_ref() {
        let mut configs = configs();
        let mut d1 = LandscaperDeployment::new("d1", "t1", "tenant01");
        let mut d2 = LandscaperDeployment::new("d2", "t2", "tenant02");
        let target = ObjectReference::new("cfg-1", "laas");
        assign(&mut d1, &target, &mut configs).unwrap();
        assign(&mut d2, &target, &mut configs).unwrap();

        assert_eq!(release(&mut d1, &mut configs), Some(target));

        assert!(d1.status.service_target_config_ref.is_none());
        assert_eq!(configs[0].status.instance_refs, vec![ObjectReference::new("d2", "t2")]);
    }

    #[test]
    fn release_unassigned_is_noop() {
        let mut configs = configs();
        let mut deployment = LandscaperDeployment::new("d1", "t1", "tenant01");

        assert_eq!(release(&mut deployment, &mut configs), None);
        assert!(configs.iter().all(|c| c.usage() == 0));
    }
}
