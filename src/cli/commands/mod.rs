mod config;
mod migrate;

pub use config::{cmd_init_config, cmd_show_config};
pub use migrate::cmd_migrate;
