use std::path::Path;

use anyhow::Context;
use lss_core::{ClusterSnapshot, ControllerConfig};
use lss_scheduling::Scheduler;

pub fn schedule(snapshot_path: &str, config_path: Option<&str>, format: &str) -> anyhow::Result<()> {
    let snapshot = ClusterSnapshot::from_file(Path::new(snapshot_path))
        .with_context(|| format!("loading snapshot {snapshot_path}"))?;
    let config = match config_path {
        Some(path) => ControllerConfig::from_file(Path::new(path))
            .with_context(|| format!("loading config {path}"))?,
        None => ControllerConfig::default(),
    };

    let mut scheduler = Scheduler::new(snapshot, config);
    let results = scheduler.schedule_all();
    let failed = results.iter().filter(|(_, r)| r.is_err()).count();

    match format {
        "json" => {
            println!("{}", scheduler.into_snapshot().to_json_string()?);
        }
        _ => {
            for (deployment, result) in &results {
                match result {
                    Ok(a) if a.newly_scheduled => {
                        println!("{deployment} -> {}", a.service_target_config)
                    }
                    Ok(a) => println!("{deployment} -> {} (unchanged)", a.service_target_config),
                    Err(e) => println!("{deployment} -> error: {e}"),
                }
            }
        }
    }

    if failed > 0 {
        anyhow::bail!("{failed} of {} deployment(s) could not be scheduled", results.len());
    }
    Ok(())
}
