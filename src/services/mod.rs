pub mod codes;
pub use codes::CodeGenerator;

pub mod migration;
pub use migration::{CardMigration, MigrationError, MigrationOptions, MigrationReport};
