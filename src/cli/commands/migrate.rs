//! Migrate command handler

use crate::config::Config;
use crate::db::MongoStore;
use crate::services::{CardMigration, MigrationOptions};
use anyhow::Context;
use rand::SeedableRng;
use rand::rngs::StdRng;

pub async fn cmd_migrate(config: &Config, options: MigrationOptions) -> anyhow::Result<()> {
    let store = MongoStore::connect(&config.database)
        .await
        .with_context(|| format!("Failed to connect to {}", config.database.uri))?;

    let report = CardMigration::new(&store, &config.cards, &config.codes, StdRng::from_os_rng())
        .run(options)
        .await
        .context("Card migration aborted")?;

    println!();
    println!("{:-<70}", "");
    println!("Migration complete!");
    println!("  Characters: {}", report.characters_seen);
    if options.resume {
        println!("  Skipped:    {}", report.characters_skipped);
    }
    if options.dry_run {
        println!("  Planned:    {}", report.cards_planned);
    } else {
        println!("  Inserted:   {}", report.cards_inserted);
    }
    if report.code_conflicts > 0 {
        println!("  Conflicts:  {}", report.code_conflicts);
    }

    Ok(())
}
