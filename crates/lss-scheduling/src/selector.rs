//! Selector evaluation.
//!
//! A selector tree is matched against a deployment's tenant id and labels.
//! `Or` and `And` short-circuit; an empty `Or` is false and an empty `And`
//! is true.

use lss_core::{LandscaperDeployment, Selector};

/// Evaluate a list of selectors as an implicit AND.
///
/// This is the form scheduling rules carry.
pub fn evaluate_selector_list(selectors: &[Selector], deployment: &LandscaperDeployment) -> bool {
    evaluate_and(selectors, deployment)
}

/// Evaluate a single selector node.
pub fn evaluate_selector(selector: &Selector, deployment: &LandscaperDeployment) -> bool {
    match selector {
        Selector::MatchTenant(tenant) => tenant.id == deployment.tenant_id(),
        // Exact key and value only; there is no "label exists" form.
        Selector::MatchLabel(label) => deployment
            .metadata
            .has_label_with_value(&label.name, &label.value),
        Selector::Or(selectors) => evaluate_or(selectors, deployment),
        Selector::And(selectors) => evaluate_and(selectors, deployment),
        Selector::Not(selector) => !evaluate_selector(selector, deployment),
    }
}

fn evaluate_or(selectors: &[Selector], deployment: &LandscaperDeployment) -> bool {
    selectors.iter().any(|s| evaluate_selector(s, deployment))
}

fn evaluate_and(selectors: &[Selector], deployment: &LandscaperDeployment) -> bool {
    selectors.iter().all(|s| evaluate_selector(s, deployment))
}
