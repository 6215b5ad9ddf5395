use ps_domain::config::{Config, ConfigSeverity};

/// Print every validation issue; `true` when there are no errors.
pub fn validate(config: &Config, config_path: &str) -> bool {
    let issues = config.validate();

    if issues.is_empty() {
        println!("Config OK ({config_path})");
        return true;
    }

    for issue in &issues {
        println!("{issue}");
    }

    let error_count = issues
        .iter()
        .filter(|e| e.severity == ConfigSeverity::Error)
        .count();
    println!(
        "\n{error_count} error(s), {} warning(s) in {config_path}",
        issues.len() - error_count,
    );

    error_count == 0
}

/// Dump the resolved config as TOML.  Secrets live in env vars, so the
/// output only names them.
pub fn show(config: &Config) -> anyhow::Result<()> {
    let output = toml::to_string_pretty(config)?;
    print!("{output}");
    Ok(())
}
