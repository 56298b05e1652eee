use anyhow::{Context, Result};

use smoothscroll_core::AppConfig;

pub fn run(config: &AppConfig, init: bool) -> Result<()> {
    let path = AppConfig::config_path();

    if init {
        if path.exists() {
            println!("Configuration already exists at {}", path.display());
        } else {
            AppConfig::default()
                .save_to(&path)
                .with_context(|| format!("writing {}", path.display()))?;
            println!("Wrote default configuration to {}", path.display());
        }
        return Ok(());
    }

    println!("# {}", path.display());
    let content = toml::to_string_pretty(config).context("serializing configuration")?;
    print!("{}", content);

    Ok(())
}
