//! CLI interface for the resume categorizer

use crate::config::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "resume-categorizer")]
#[command(about = "Sort PDF resumes into job categories")]
#[command(long_about = "Classify PDF resumes into 25 job categories, file them into per-category folders, and export name, contact and skills as CSV")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Categorize resumes from files or directories
    Categorize {
        /// PDF files or directories containing them
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Directory to sort resumes into (defaults to the configured one)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Comma-separated skills every shown resume must mention
        #[arg(short, long)]
        skills: Option<String>,

        /// Also write the filtered results to this CSV file
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Output format: console, json, csv
        #[arg(short, long)]
        format: Option<String>,

        /// Show name, contact and skills for every resume
        #[arg(short, long)]
        detailed: bool,

        /// Only read files directly inside the given directories
        #[arg(long)]
        no_recursive: bool,
    },

    /// Start the web form
    Serve {
        /// Address to listen on (defaults to the configured one)
        #[arg(short, long)]
        bind: Option<String>,
    },

    /// List the category ids and labels
    Categories,

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file path
    Path,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        "csv" => Ok(OutputFormat::Csv),
        _ => Err(format!("Invalid output format: {}. Supported: console, json, csv", format)),
    }
}
