//! Resource types for the landscaper service.
//!
//! The shapes follow the custom resources stored in the core cluster:
//! every resource carries `metadata`, a `spec`, and where the controllers
//! write back, a `status`. All types serialize to the camelCase JSON used
//! on the wire.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Label that makes a `ServiceTargetConfig` eligible for scheduling.
///
/// Only the value `"true"` counts as visible.
pub const SERVICE_TARGET_CONFIG_VISIBLE_LABEL: &str = "config.landscaper-service.gardener.cloud/visible";

/// Label carrying the region of the target cluster.
pub const SERVICE_TARGET_CONFIG_REGION_LABEL: &str = "config.landscaper-service.gardener.cloud/region";

// ── References & metadata ─────────────────────────────────────────

/// Identifies a namespaced resource by name.
///
/// Equality and hashing are structural, so references can key maps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjectReference {
    pub name: String,
    pub namespace: String,
}

impl ObjectReference {
    pub fn new(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
        }
    }
}

impl fmt::Display for ObjectReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.namespace, self.name)
    }
}

/// The subset of Kubernetes object metadata the controllers look at.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjectMeta {
    pub name: String,
    pub namespace: String,
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub labels: HashMap<String, String>,
}

impl ObjectMeta {
    pub fn new(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            labels: HashMap::new(),
        }
    }

    pub fn reference(&self) -> ObjectReference {
        ObjectReference::new(self.name.clone(), self.namespace.clone())
    }

    /// True if the label `name` exists and has exactly `value`.
    pub fn has_label_with_value(&self, name: &str, value: &str) -> bool {
        self.labels.get(name).is_some_and(|v| v == value)
    }
}

// ── LandscaperDeployment ──────────────────────────────────────────

/// A tenant's request for a landscaper instance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LandscaperDeployment {
    pub metadata: ObjectMeta,
    pub spec: LandscaperDeploymentSpec,
    pub status: LandscaperDeploymentStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LandscaperDeploymentSpec {
    pub tenant_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LandscaperDeploymentStatus {
    /// The target this deployment was scheduled onto.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_target_config_ref: Option<ObjectReference>,
}

impl LandscaperDeployment {
    pub fn new(name: impl Into<String>, namespace: impl Into<String>, tenant_id: impl Into<String>) -> Self {
        Self {
            metadata: ObjectMeta::new(name, namespace),
            spec: LandscaperDeploymentSpec {
                tenant_id: tenant_id.into(),
            },
            status: LandscaperDeploymentStatus::default(),
        }
    }

    pub fn with_label(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.labels.insert(name.into(), value.into());
        self
    }

    pub fn tenant_id(&self) -> &str {
        &self.spec.tenant_id
    }

    pub fn reference(&self) -> ObjectReference {
        self.metadata.reference()
    }
}

// ── ServiceTargetConfig ───────────────────────────────────────────

/// A cluster that can host landscaper instances.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceTargetConfig {
    pub metadata: ObjectMeta,
    pub spec: ServiceTargetConfigSpec,
    pub status: ServiceTargetConfigStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ServiceTargetConfigSpec {
    /// Infrastructure provider of the target cluster.
    pub provider_type: String,
    pub region: String,
    /// Higher numbers are preferred when scheduling.
    pub priority: i64,
    /// Restricted targets are only reachable through an explicit scheduling rule.
    pub restricted: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ServiceTargetConfigStatus {
    /// Deployments currently placed on this target.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub instance_refs: Vec<ObjectReference>,
}

impl ServiceTargetConfig {
    pub fn new(name: impl Into<String>, namespace: impl Into<String>, priority: i64) -> Self {
        let mut metadata = ObjectMeta::new(name, namespace);
        metadata
            .labels
            .insert(SERVICE_TARGET_CONFIG_VISIBLE_LABEL.to_string(), "true".to_string());
        Self {
            metadata,
            spec: ServiceTargetConfigSpec {
                priority,
                ..Default::default()
            },
            status: ServiceTargetConfigStatus::default(),
        }
    }

    pub fn restricted(mut self, restricted: bool) -> Self {
        self.spec.restricted = restricted;
        self
    }

    pub fn with_label(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.labels.insert(name.into(), value.into());
        self
    }

    pub fn with_instance_refs(mut self, refs: Vec<ObjectReference>) -> Self {
        self.status.instance_refs = refs;
        self
    }

    pub fn reference(&self) -> ObjectReference {
        self.metadata.reference()
    }

    /// True if this config has the given identity.
    pub fn is(&self, reference: &ObjectReference) -> bool {
        self.metadata.name == reference.name && self.metadata.namespace == reference.namespace
    }

    /// Number of deployments already placed on this target.
    pub fn usage(&self) -> usize {
        self.status.instance_refs.len()
    }

    pub fn is_visible(&self) -> bool {
        self.metadata
            .has_label_with_value(SERVICE_TARGET_CONFIG_VISIBLE_LABEL, "true")
    }
}

// ── TargetScheduling ──────────────────────────────────────────────

/// Rules according to which deployments are assigned a `ServiceTargetConfig`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetScheduling {
    pub metadata: ObjectMeta,
    pub spec: TargetSchedulingSpec,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetSchedulingSpec {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<SchedulingRule>,
}

impl TargetScheduling {
    pub fn new(rules: Vec<SchedulingRule>) -> Self {
        Self {
            metadata: ObjectMeta::default(),
            spec: TargetSchedulingSpec { rules },
        }
    }

    pub fn rules(&self) -> &[SchedulingRule] {
        &self.spec.rules
    }
}

/// A priority-ranked, selector-gated list of eligible targets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SchedulingRule {
    /// Rules with a higher number win over rules with a lower number.
    pub priority: i64,
    pub service_target_configs: Vec<ObjectReference>,
    /// Implicitly AND-ed.
    pub selector: Vec<Selector>,
}

impl SchedulingRule {
    pub fn new(priority: i64, service_target_configs: Vec<ObjectReference>, selector: Vec<Selector>) -> Self {
        Self {
            priority,
            service_target_configs,
            selector,
        }
    }
}

// ── Selector ──────────────────────────────────────────────────────

/// Boolean predicate over a deployment's tenant id and labels.
///
/// On the wire a selector is an object with exactly one of the keys
/// `matchTenant`, `matchLabel`, `or`, `and`, `not`. Anything else is
/// rejected while deserializing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SelectorSpec", into = "SelectorSpec")]
pub enum Selector {
    MatchTenant(TenantSelector),
    MatchLabel(LabelSelector),
    Or(Vec<Selector>),
    And(Vec<Selector>),
    Not(Box<Selector>),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TenantSelector {
    pub id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelSelector {
    pub name: String,
    pub value: String,
}

impl Selector {
    pub fn tenant(id: impl Into<String>) -> Self {
        Self::MatchTenant(TenantSelector { id: id.into() })
    }

    pub fn label(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::MatchLabel(LabelSelector {
            name: name.into(),
            value: value.into(),
        })
    }

    pub fn or(selectors: Vec<Selector>) -> Self {
        Self::Or(selectors)
    }

    pub fn and(selectors: Vec<Selector>) -> Self {
        Self::And(selectors)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(selector: Selector) -> Self {
        Self::Not(Box::new(selector))
    }
}

/// Wire form of a [`Selector`]: one optional field per condition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectorSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_tenant: Option<TenantSelector>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_label: Option<LabelSelector>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub or: Option<Vec<Selector>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub and: Option<Vec<Selector>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub not: Option<Box<Selector>>,
}

impl TryFrom<SelectorSpec> for Selector {
    type Error = CoreError;

    fn try_from(spec: SelectorSpec) -> Result<Self, Self::Error> {
        match spec {
            SelectorSpec {
                match_tenant: Some(tenant),
                match_label: None,
                or: None,
                and: None,
                not: None,
            } => Ok(Selector::MatchTenant(tenant)),
            SelectorSpec {
                match_tenant: None,
                match_label: Some(label),
                or: None,
                and: None,
                not: None,
            } => Ok(Selector::MatchLabel(label)),
            SelectorSpec {
                match_tenant: None,
                match_label: None,
                or: Some(selectors),
                and: None,
                not: None,
            } => Ok(Selector::Or(selectors)),
            SelectorSpec {
                match_tenant: None,
                match_label: None,
                or: None,
                and: Some(selectors),
                not: None,
            } => Ok(Selector::And(selectors)),
            SelectorSpec {
                match_tenant: None,
                match_label: None,
                or: None,
                and: None,
                not: Some(selector),
            } => Ok(Selector::Not(selector)),
            _ => Err(CoreError::InvalidSelector),
        }
    }
}

impl From<Selector> for SelectorSpec {
    fn from(selector: Selector) -> Self {
        match selector {
            Selector::MatchTenant(tenant) => SelectorSpec {
                match_tenant: Some(tenant),
                ..Default::default()
            },
            Selector::MatchLabel(label) => SelectorSpec {
                match_label: Some(label),
                ..Default::default()
            },
            Selector::Or(selectors) => SelectorSpec {
                or: Some(selectors),
                ..Default::default()
            },
            Selector::And(selectors) => SelectorSpec {
                and: Some(selectors),
                ..Default::default()
            },
            Selector::Not(selector) => SelectorSpec {
                not: Some(selector),
                ..Default::default()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_reference_is_structural_map_key() {
        let mut m = HashMap::new();
        m.insert(ObjectReference::new("a", "ns"), 1);
        m.insert(ObjectReference::new("a", "ns"), 2);
        m.insert(ObjectReference::new("a", "other"), 3);

        assert_eq!(m.len(), 2);
        assert_eq!(m.get(&ObjectReference::new("a", "ns")), Some(&2));
    }

    #[test]
    fn object_reference_display() {
        assert_eq!(ObjectReference::new("cfg", "laas").to_string(), "laas/cfg");
    }

    #[test]
    fn parses_nested_selector() {
        let json = r#"{
            "and": [
                {"matchTenant": {"id": "t1"}},
                {"not": {"matchLabel": {"name": "k", "value": "v"}}},
                {"or": []}
            ]
        }"#;
        let selector: Selector = serde_json::from_str(json).unwrap();

        assert_eq!(
            selector,
            Selector::and(vec![
                Selector::tenant("t1"),
                Selector::not(Selector::label("k", "v")),
                Selector::or(vec![]),
            ])
        );
    }

    #[test]
    fn rejects_empty_selector() {
        let err = serde_json::from_str::<Selector>("{}").unwrap_err();
        assert!(err.to_string().contains("selector must contain exactly one condition"));
    }

    #[test]
    fn rejects_selector_with_two_conditions() {
        let spec = SelectorSpec {
            match_tenant: Some(TenantSelector { id: "t1".into() }),
            match_label: Some(LabelSelector {
                name: "k".into(),
                value: "v".into(),
            }),
            ..Default::default()
        };
        assert!(matches!(Selector::try_from(spec), Err(CoreError::InvalidSelector)));
    }

    #[test]
    fn rejects_invalid_nested_selector() {
        let json = r#"{"not": {"matchTenant": {"id": "t1"}, "and": []}}"#;
        assert!(serde_json::from_str::<Selector>(json).is_err());
    }

    #[test]
    fn selector_serializes_as_one_of_object() {
        let json = serde_json::to_value(Selector::not(Selector::tenant("t1"))).unwrap();
        assert_eq!(json, serde_json::json!({"not": {"matchTenant": {"id": "t1"}}}));
    }

    #[test]
    fn parses_scheduling_rule() {
        let json = r#"{
            "priority": 4,
            "serviceTargetConfigs": [{"name": "cfg-1", "namespace": "laas"}],
            "selector": [{"matchTenant": {"id": "t1"}}]
        }"#;
        let rule: SchedulingRule = serde_json::from_str(json).unwrap();

        assert_eq!(rule.priority, 4);
        assert_eq!(rule.service_target_configs, vec![ObjectReference::new("cfg-1", "laas")]);
        assert_eq!(rule.selector, vec![Selector::tenant("t1")]);
    }

    #[test]
    fn negative_rule_priority_survives_parsing() {
        let rule: SchedulingRule = serde_json::from_str(r#"{"priority": -1}"#).unwrap();
        assert_eq!(rule.priority, -1);
        assert!(rule.service_target_configs.is_empty());
    }

    #[test]
    fn service_target_config_visibility() {
        let visible = ServiceTargetConfig::new("cfg", "laas", 10);
        assert!(visible.is_visible());

        let hidden = visible.clone().with_label(SERVICE_TARGET_CONFIG_VISIBLE_LABEL, "false");
        assert!(!hidden.is_visible());

        let mut unlabeled = ServiceTargetConfig::new("cfg", "laas", 10);
        unlabeled.metadata.labels.clear();
        assert!(!unlabeled.is_visible());
    }

    #[test]
    fn usage_counts_instance_refs() {
        let config = ServiceTargetConfig::new("cfg", "laas", 10).with_instance_refs(vec![
            ObjectReference::new("d1", "t1"),
            ObjectReference::new("d2", "t2"),
        ]);
        assert_eq!(config.usage(), 2);
    }

    #[test]
    fn parses_service_target_config() {
        let json = r#"{
            "metadata": {"name": "cfg", "namespace": "laas", "labels": {"config.landscaper-service.gardener.cloud/visible": "true"}},
            "spec": {"providerType": "gcp", "region": "eu", "priority": 20, "restricted": true},
            "status": {"instanceRefs": [{"name": "d1", "namespace": "t1"}]}
        }"#;
        let config: ServiceTargetConfig = serde_json::from_str(json).unwrap();

        assert!(config.is_visible());
        assert!(config.spec.restricted);
        assert_eq!(config.spec.priority, 20);
        assert_eq!(config.usage(), 1);
        assert!(config.is(&ObjectReference::new("cfg", "laas")));
    }

    #[test]
    fn deployment_labels() {
        let deployment = LandscaperDeployment::new("d1", "t1", "tenant-1").with_label("k", "v");
        assert!(deployment.metadata.has_label_with_value("k", "v"));
        assert!(!deployment.metadata.has_label_with_value("k", "other"));
        assert!(!deployment.metadata.has_label_with_value("missing", "v"));
        assert_eq!(deployment.tenant_id(), "tenant-1");
    }
}
