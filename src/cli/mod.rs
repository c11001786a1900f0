//! CLI module - Command-line interface for hakari-cards
//!
//! This module provides a structured CLI using clap for argument parsing.

mod commands;

use clap::{Parser, Subcommand};

/// hakari-cards - Card generator for the Hakari collection
/// Builds one card per rarity tier for every character
#[derive(Parser, Debug)]
#[command(name = "hakari-cards")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Generate cards for every character (default)
    #[command(alias = "m")]
    Migrate {
        /// Only create the cards a character is still missing
        #[arg(long)]
        resume: bool,
        /// Build and log cards without inserting them
        #[arg(long)]
        dry_run: bool,
    },

    /// Create default config file
    InitConfig,

    /// Print the effective configuration
    ShowConfig,
}

impl Default for Commands {
    fn default() -> Self {
        Self::Migrate {
            resume: false,
            dry_run: false,
        }
    }
}

pub use commands::*;
