//! Config command handlers

use crate::config::Config;

pub fn cmd_init_config() -> anyhow::Result<()> {
    let path = Config::default_config_path();
    if Config::create_default_if_missing(&path)? {
        println!("Created {}", path.display());
    } else {
        println!("{} already exists, leaving it untouched", path.display());
    }
    Ok(())
}

pub fn cmd_show_config(config: &Config) -> anyhow::Result<()> {
    print!("{}", toml::to_string_pretty(config)?);
    Ok(())
}
