//! CLI module - Command-line interface for PICU
//!
//! This module provides a structured CLI using clap for argument parsing.

mod commands;

use clap::{Parser, Subcommand};

/// PICU - creator design submission portal
#[derive(Parser)]
#[command(name = "picu")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the web server
    #[command(alias = "daemon", alias = "-d", alias = "--daemon")]
    Serve,

    /// Create an admin account (skipped if the email exists)
    CreateAdmin {
        #[arg(long, default_value = "admin@picu.com")]
        email: String,

        #[arg(long, default_value = "admin123")]
        password: String,

        /// Full name shown in the dashboard
        #[arg(long, default_value = "Admin PICU")]
        name: String,
    },

    /// Insert the sample product catalog
    #[command(alias = "add-products")]
    SeedProducts,

    /// Create default config file
    #[command(alias = "--init")]
    Init,
}

pub use commands::*;
