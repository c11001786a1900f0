pub mod cli;
pub mod config;
pub mod constants;
pub mod db;
pub mod domain;
pub mod models;
pub mod services;

use clap::Parser;
use cli::{Cli, Commands};
pub use config::Config;
use services::MigrationOptions;
use tracing_subscriber::EnvFilter;

pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;

    init_tracing(&config);

    match cli.command.unwrap_or_default() {
        Commands::Migrate { resume, dry_run } => {
            config.validate()?;
            cli::cmd_migrate(&config, MigrationOptions { resume, dry_run }).await
        }
        Commands::InitConfig => cli::cmd_init_config(),
        Commands::ShowConfig => cli::cmd_show_config(&config),
    }
}

fn init_tracing(config: &Config) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
