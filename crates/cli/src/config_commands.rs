use {clap::Subcommand, steeple_config::SteepleConfig};

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration as TOML.
    Show,
    /// Check the configuration and report diagnostics.
    Validate,
}

pub fn handle(action: ConfigAction, config: &SteepleConfig) -> anyhow::Result<()> {
    match action {
        ConfigAction::Show => show(config),
        ConfigAction::Validate => validate(config),
    }
}

fn show(config: &SteepleConfig) -> anyhow::Result<()> {
    // Render the effective channel list, not the raw (possibly empty) one.
    let mut effective = config.clone();
    effective.channels = config.effective_channels();
    if !effective.youtube.api_key.is_empty() {
        effective.youtube.api_key = "<set>".into();
    }

    println!("# config file: {}", steeple_config::find_or_default_config_path().display());
    println!("# database: {}", steeple_config::database_path(config).display());
    print!("{}", toml::to_string_pretty(&effective)?);
    Ok(())
}

fn validate(config: &SteepleConfig) -> anyhow::Result<()> {
    let result = steeple_config::validate_config(config);
    if result.diagnostics.is_empty() {
        println!("Configuration OK.");
        return Ok(());
    }

    for d in &result.diagnostics {
        println!("{}: {} ({}, {})", d.severity, d.message, d.path, d.category);
    }
    if result.has_errors() {
        anyhow::bail!(
            "{} error(s) found",
            result.count(steeple_config::Severity::Error)
        );
    }
    Ok(())
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use {super::*, steeple_config::ChannelEntry};

    fn valid_config() -> SteepleConfig {
        SteepleConfig {
            youtube: steeple_config::YoutubeConfig {
                api_key: "k".into(),
                max_results: 10,
            },
            channels: vec![ChannelEntry {
                id: Some("UCabc".into()),
                handle: None,
                name: "Ch1".into(),
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_validate_passes_for_valid_config() {
        assert!(validate(&valid_config()).is_ok());
    }

    #[test]
    fn test_validate_fails_without_api_key() {
        let mut config = valid_config();
        config.youtube.api_key = String::new();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_show_renders_toml() {
        assert!(show(&valid_config()).is_ok());
    }
}
