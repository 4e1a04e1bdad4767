//! Load-aware ranking of service target configs.
//!
//! A config's score is its priority divided by its usage plus one, using
//! integer division. Unused targets score their full priority.

use std::cmp::Reverse;

use lss_core::ServiceTargetConfig;
use tracing::debug;

use crate::error::{SchedulingError, SchedulingResult};

/// `priority / (usage + 1)`, floored.
pub fn score(config: &ServiceTargetConfig) -> i64 {
    let usage = i64::try_from(config.usage()).unwrap_or(i64::MAX);
    config.spec.priority / usage.saturating_add(1)
}

/// Sort in place, best score first.
///
/// The sort is stable: configs with equal scores keep their relative order.
/// Only the slice of references is reordered.
pub fn sort_service_target_configs(configs: &mut [&ServiceTargetConfig]) {
    configs.sort_by_key(|c| Reverse(score(c)));
}

/// Return a sorted copy (best first), leaving the input untouched.
pub fn rank_service_target_configs<'a>(
    configs: &[&'a ServiceTargetConfig],
) -> Vec<&'a ServiceTargetConfig> {
    let mut ranked = configs.to_vec();
    sort_service_target_configs(&mut ranked);
    ranked
}

/// Pick the best config: the first one after ranking.
pub fn pick_service_target_config<'a>(
    configs: &[&'a ServiceTargetConfig],
) -> SchedulingResult<&'a ServiceTargetConfig> {
    let ranked = rank_service_target_configs(configs);
    let best = ranked
        .first()
        .copied()
        .ok_or(SchedulingError::NoServiceTargetAvailable)?;

    debug!(
        config = %best.reference(),
        score = score(best),
        candidates = ranked.len(),
        "picked service target config"
    );
    Ok(best)
}
