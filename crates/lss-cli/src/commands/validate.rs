use std::path::Path;

use anyhow::Context;
use lss_core::ClusterSnapshot;
use lss_core::validation::{
    FieldError, validate_landscaper_deployment, validate_service_target_config,
    validate_target_scheduling,
};

pub fn validate(snapshot_path: &str) -> anyhow::Result<()> {
    let snapshot = ClusterSnapshot::from_file(Path::new(snapshot_path))
        .with_context(|| format!("loading snapshot {snapshot_path}"))?;

    let mut invalid = 0;
    let mut report = |kind: &str, name: String, errs: Vec<FieldError>| {
        if errs.is_empty() {
            return;
        }
        invalid += 1;
        println!("{kind} {name}:");
        for e in errs {
            println!("  {e}");
        }
    };

    for s in &snapshot.target_schedulings {
        report("TargetScheduling", s.metadata.reference().to_string(), validate_target_scheduling(s));
    }
    for c in &snapshot.service_target_configs {
        report("ServiceTargetConfig", c.reference().to_string(), validate_service_target_config(c));
    }
    for d in &snapshot.landscaper_deployments {
        report("LandscaperDeployment", d.reference().to_string(), validate_landscaper_deployment(d));
    }

    if invalid > 0 {
        anyhow::bail!("{invalid} invalid resource(s)");
    }
    println!("✓ all resources valid");
    Ok(())
}
