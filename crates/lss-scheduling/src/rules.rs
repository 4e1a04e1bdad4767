//! Scheduling rule evaluation.
//!
//! Only the highest-priority matching rules contribute candidates. Rules
//! matching at the same priority pool their target lists; a match at a
//! higher priority discards everything collected so far.

use lss_core::{LandscaperDeployment, ObjectReference, TargetScheduling};
use tracing::debug;

use crate::error::{SchedulingError, SchedulingResult};
use crate::selector::evaluate_selector_list;

/// Collect the config references nominated for `deployment`.
///
/// The result may contain duplicates and is empty if no rule matched.
/// A malformed rule aborts the whole evaluation.
pub fn evaluate_rules(
    scheduling: &TargetScheduling,
    deployment: &LandscaperDeployment,
) -> SchedulingResult<Vec<ObjectReference>> {
    let mut highest_found_prio: i64 = -1;
    let mut candidates: Vec<ObjectReference> = Vec::new();

    for (index, rule) in scheduling.rules().iter().enumerate() {
        if rule.service_target_configs.is_empty() {
            return Err(SchedulingError::EmptyRule { index });
        }
        if rule.priority < 0 {
            return Err(SchedulingError::NegativeRulePriority {
                index,
                priority: rule.priority,
            });
        }

        // A better rule has already matched.
        if rule.priority < highest_found_prio {
            continue;
        }

        if !evaluate_selector_list(&rule.selector, deployment) {
            continue;
        }

        if rule.priority > highest_found_prio {
            debug!(rule = index, priority = rule.priority, "rule matched with higher priority");
            highest_found_prio = rule.priority;
            candidates.clear();
        } else {
            debug!(rule = index, priority = rule.priority, "rule matched with equal priority");
        }
        candidates.extend(rule.service_target_configs.iter().cloned());
    }

    Ok(candidates)
}
