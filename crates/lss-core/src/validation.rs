//! Admission-style validation of resources.
//!
//! Each validator walks a resource and collects every problem it finds as
//! a [`FieldError`] pointing at the offending field, e.g.
//! `spec.rules[0].selector[1].matchTenant.id: Required value: tenant id needs to be set`.
//! An empty list means the resource is valid.
//!
//! The one-of shape of selectors is enforced while deserializing, so the
//! selector checks here only look at the content of each condition.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::types::{
    LandscaperDeployment, ObjectMeta, SERVICE_TARGET_CONFIG_REGION_LABEL,
    SERVICE_TARGET_CONFIG_VISIBLE_LABEL, SchedulingRule, Selector, ServiceTargetConfig,
    TargetScheduling,
};

/// Provider types a `ServiceTargetConfig` may declare.
pub const ALLOWED_PROVIDER_TYPES: &[&str] = &["alicloud", "aws", "gcp"];

/// Required length of a deployment's tenant id.
pub const TENANT_ID_LENGTH: usize = 8;

const DNS_LABEL_MAX_LENGTH: usize = 63;

static DNS_LABEL: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]([-a-z0-9]*[a-z0-9])?$").ok());

/// Dotted path to a field, with list indices: `spec.rules[0].priority`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath(String);

impl FieldPath {
    pub fn new(root: &str) -> Self {
        Self(root.to_string())
    }

    pub fn child(&self, name: &str) -> Self {
        if self.0.is_empty() {
            Self(name.to_string())
        } else {
            Self(format!("{}.{}", self.0, name))
        }
    }

    pub fn index(&self, i: usize) -> Self {
        Self(format!("{}[{}]", self.0, i))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("{path}: Required value: {detail}")]
    Required { path: FieldPath, detail: String },

    #[error("{path}: Invalid value: {value:?}: {detail}")]
    Invalid {
        path: FieldPath,
        value: String,
        detail: String,
    },
}

impl FieldError {
    fn required(path: FieldPath, detail: &str) -> Self {
        Self::Required {
            path,
            detail: detail.to_string(),
        }
    }

    fn invalid(path: FieldPath, value: impl ToString, detail: &str) -> Self {
        Self::Invalid {
            path,
            value: value.to_string(),
            detail: detail.to_string(),
        }
    }

    pub fn path(&self) -> &FieldPath {
        match self {
            Self::Required { path, .. } | Self::Invalid { path, .. } => path,
        }
    }
}

pub type FieldErrors = Vec<FieldError>;

// ── TargetScheduling ──────────────────────────────────────────────

pub fn validate_target_scheduling(scheduling: &TargetScheduling) -> FieldErrors {
    let path = FieldPath::new("spec").child("rules");
    scheduling
        .rules()
        .iter()
        .enumerate()
        .flat_map(|(i, rule)| validate_scheduling_rule(rule, &path.index(i)))
        .collect()
}

fn validate_scheduling_rule(rule: &SchedulingRule, path: &FieldPath) -> FieldErrors {
    let mut errs = FieldErrors::new();

    if rule.priority < 0 {
        errs.push(FieldError::invalid(
            path.child("priority"),
            rule.priority,
            "priority must be an integer >= 0",
        ));
    }

    let configs_path = path.child("serviceTargetConfigs");
    if rule.service_target_configs.is_empty() {
        errs.push(FieldError::required(
            configs_path.clone(),
            "at least one serviceTargetConfig is required",
        ));
    }

    for (i, reference) in rule.service_target_configs.iter().enumerate() {
        let config_path = configs_path.index(i);
        if reference.name.is_empty() {
            errs.push(FieldError::required(config_path.child("name"), "name needs to be set"));
        }
        if reference.namespace.is_empty() {
            errs.push(FieldError::required(
                config_path.child("namespace"),
                "namespace needs to be set",
            ));
        }
    }

    let selector_path = path.child("selector");
    for (i, selector) in rule.selector.iter().enumerate() {
        validate_selector(selector, &selector_path.index(i), &mut errs);
    }

    errs
}

fn validate_selector(selector: &Selector, path: &FieldPath, errs: &mut FieldErrors) {
    match selector {
        Selector::MatchTenant(tenant) => {
            if tenant.id.is_empty() {
                errs.push(FieldError::required(
                    path.child("matchTenant").child("id"),
                    "tenant id needs to be set",
                ));
            }
        }
        Selector::MatchLabel(label) => {
            let label_path = path.child("matchLabel");
            if label.name.is_empty() {
                errs.push(FieldError::required(label_path.child("name"), "label name needs to be set"));
            }
            if label.value.is_empty() {
                errs.push(FieldError::required(
                    label_path.child("value"),
                    "label value needs to be set",
                ));
            }
        }
        Selector::And(selectors) => {
            let and_path = path.child("and");
            for (i, s) in selectors.iter().enumerate() {
                validate_selector(s, &and_path.index(i), errs);
            }
        }
        Selector::Or(selectors) => {
            let or_path = path.child("or");
            for (i, s) in selectors.iter().enumerate() {
                validate_selector(s, &or_path.index(i), errs);
            }
        }
        Selector::Not(inner) => validate_selector(inner, &path.child("not"), errs),
    }
}

// ── ServiceTargetConfig ───────────────────────────────────────────

pub fn validate_service_target_config(config: &ServiceTargetConfig) -> FieldErrors {
    let mut errs = FieldErrors::new();

    let meta_path = FieldPath::new("metadata");
    validate_object_meta(&config.metadata, &meta_path, &mut errs);

    let labels_path = meta_path.child("labels");
    let region_path = labels_path.child(SERVICE_TARGET_CONFIG_REGION_LABEL);
    match config.metadata.labels.get(SERVICE_TARGET_CONFIG_REGION_LABEL) {
        None => errs.push(FieldError::required(region_path, "label needs to be set")),
        Some(v) if v.is_empty() => {
            errs.push(FieldError::required(region_path, "label value may not be empty"))
        }
        Some(_) => {}
    }

    let visible_path = labels_path.child(SERVICE_TARGET_CONFIG_VISIBLE_LABEL);
    match config.metadata.labels.get(SERVICE_TARGET_CONFIG_VISIBLE_LABEL) {
        None => errs.push(FieldError::required(visible_path, "label needs to be set")),
        Some(v) if v != "true" && v != "false" => errs.push(FieldError::invalid(
            visible_path,
            v,
            "invalid label value, allowed values: \"true\", \"false\"",
        )),
        Some(_) => {}
    }

    let provider_path = FieldPath::new("spec").child("providerType");
    let provider = config.spec.provider_type.as_str();
    if provider.is_empty() {
        errs.push(FieldError::required(provider_path, "providerType may not be empty"));
    } else if !ALLOWED_PROVIDER_TYPES.contains(&provider) {
        let detail = format!(
            "providerType must be one of the following: [{}]",
            ALLOWED_PROVIDER_TYPES.join(" ")
        );
        errs.push(FieldError::invalid(provider_path, provider, &detail));
    }

    errs
}

// ── LandscaperDeployment ──────────────────────────────────────────

pub fn validate_landscaper_deployment(deployment: &LandscaperDeployment) -> FieldErrors {
    let mut errs = FieldErrors::new();

    validate_object_meta(&deployment.metadata, &FieldPath::new("metadata"), &mut errs);

    let tenant_id = deployment.tenant_id();
    if tenant_id.chars().count() != TENANT_ID_LENGTH {
        errs.push(FieldError::invalid(
            FieldPath::new("spec").child("tenantId"),
            tenant_id,
            &format!("must be exactly of size {TENANT_ID_LENGTH}"),
        ));
    }

    errs
}

fn validate_object_meta(meta: &ObjectMeta, path: &FieldPath, errs: &mut FieldErrors) {
    let name_path = path.child("name");
    if meta.name.is_empty() {
        errs.push(FieldError::required(name_path, "name or generateName is required"));
    } else if !is_dns_label(&meta.name) {
        errs.push(FieldError::invalid(
            name_path,
            &meta.name,
            "a lowercase RFC 1123 label must consist of lower case alphanumeric characters or '-', and must start and end with an alphanumeric character",
        ));
    }

    if meta.namespace.is_empty() {
        errs.push(FieldError::required(path.child("namespace"), "namespace is required"));
    }
}

/// True if `value` is a DNS-1123 label.
pub fn is_dns_label(value: &str) -> bool {
    value.len() <= DNS_LABEL_MAX_LENGTH
        && DNS_LABEL.as_ref().is_some_and(|re| re.is_match(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ObjectReference;

    fn paths(errs: &[FieldError]) -> Vec<&str> {
        errs.iter().map(|e| e.path().as_str()).collect()
    }

    fn valid_rule() -> SchedulingRule {
        SchedulingRule::new(
            1,
            vec![ObjectReference::new("cfg", "laas")],
            vec![Selector::tenant("tenant01")],
        )
    }

    #[test]
    fn field_path_formatting() {
        let path = FieldPath::new("spec").child("rules").index(2).child("priority");
        assert_eq!(path.to_string(), "spec.rules[2].priority");
    }

    #[test]
    fn valid_scheduling_has_no_errors() {
        let scheduling = TargetScheduling::new(vec![valid_rule()]);
        assert!(validate_target_scheduling(&scheduling).is_empty());
    }

    #[test]
    fn empty_scheduling_is_valid() {
        assert!(validate_target_scheduling(&TargetScheduling::default()).is_empty());
    }

    #[test]
    fn rejects_negative_priority() {
        let mut rule = valid_rule();
        rule.priority = -1;
        let errs = validate_target_scheduling(&TargetScheduling::new(vec![rule]));

        assert_eq!(paths(&errs), vec!["spec.rules[0].priority"]);
        assert_eq!(
            errs[0].to_string(),
            "spec.rules[0].priority: Invalid value: \"-1\": priority must be an integer >= 0"
        );
    }

    #[test]
    fn requires_service_target_configs() {
        let mut rule = valid_rule();
        rule.service_target_configs.clear();
        let errs = validate_target_scheduling(&TargetScheduling::new(vec![valid_rule(), rule]));

        assert_eq!(paths(&errs), vec!["spec.rules[1].serviceTargetConfigs"]);
    }

    #[test]
    fn requires_reference_name_and_namespace() {
        let mut rule = valid_rule();
        rule.service_target_configs.push(ObjectReference::default());
        let errs = validate_target_scheduling(&TargetScheduling::new(vec![rule]));

        assert_eq!(
            paths(&errs),
            vec![
                "spec.rules[0].serviceTargetConfigs[1].name",
                "spec.rules[0].serviceTargetConfigs[1].namespace",
            ]
        );
    }

    #[test]
    fn walks_nested_selectors() {
        let mut rule = valid_rule();
        rule.selector = vec![
            Selector::tenant(""),
            Selector::and(vec![
                Selector::label("", "v"),
                Selector::or(vec![Selector::not(Selector::label("k", ""))]),
            ]),
        ];
        let errs = validate_target_scheduling(&TargetScheduling::new(vec![rule]));

        assert_eq!(
            paths(&errs),
            vec![
                "spec.rules[0].selector[0].matchTenant.id",
                "spec.rules[0].selector[1].and[0].matchLabel.name",
                "spec.rules[0].selector[1].and[1].or[0].not.matchLabel.value",
            ]
        );
    }

    #[test]
    fn valid_service_target_config() {
        let mut config = ServiceTargetConfig::new("cfg-1", "laas", 10)
            .with_label(SERVICE_TARGET_CONFIG_REGION_LABEL, "eu");
        config.spec.provider_type = "gcp".to_string();

        assert!(validate_service_target_config(&config).is_empty());
    }

    #[test]
    fn service_target_config_label_and_provider_errors() {
        let mut config = ServiceTargetConfig::new("Cfg_1", "laas", 10)
            .with_label(SERVICE_TARGET_CONFIG_VISIBLE_LABEL, "yes");
        config.spec.provider_type = "azure".to_string();
        let errs = validate_service_target_config(&config);

        assert_eq!(
            paths(&errs),
            vec![
                "metadata.name",
                "metadata.labels.config.landscaper-service.gardener.cloud/region",
                "metadata.labels.config.landscaper-service.gardener.cloud/visible",
                "spec.providerType",
            ]
        );
        assert!(errs[3].to_string().contains("[alicloud aws gcp]"));
    }

    #[test]
    fn deployment_tenant_id_length() {
        let ok = LandscaperDeployment::new("deploy", "tenant", "abcd1234");
        assert!(validate_landscaper_deployment(&ok).is_empty());

        let short = LandscaperDeployment::new("deploy", "tenant", "abc");
        let errs = validate_landscaper_deployment(&short);
        assert_eq!(paths(&errs), vec!["spec.tenantId"]);
    }

    #[test]
    fn dns_labels() {
        assert!(is_dns_label("laas-1"));
        assert!(!is_dns_label("-laas"));
        assert!(!is_dns_label("Laas"));
        assert!(!is_dns_label(&"a".repeat(64)));
    }
}
