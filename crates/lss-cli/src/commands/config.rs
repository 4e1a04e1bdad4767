use lss_core::ControllerConfig;

pub fn init(scheduling_name: Option<&str>, scheduling_namespace: Option<&str>) -> anyhow::Result<()> {
    let scheduling = scheduling_name.zip(scheduling_namespace);
    let config = ControllerConfig::scaffold(scheduling);
    print!("{}", config.to_toml_string()?);
    Ok(())
}
