//! Resume categorizer: sort PDF resumes into job categories

use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info};
use resume_categorizer::cli::{self, Cli, Commands, ConfigAction};
use resume_categorizer::config::{Config, OutputFormat};
use resume_categorizer::error::{CategorizerError, Result};
use resume_categorizer::input::manager::InputManager;
use resume_categorizer::output::csv_export::save_csv;
use resume_categorizer::output::formatter::ReportGenerator;
use resume_categorizer::output::report::BatchReport;
use resume_categorizer::processing::category::CATEGORY_MAPPING;
use resume_categorizer::processing::orchestrator::BatchOrchestrator;
use resume_categorizer::server::{self, AppState};
use std::path::PathBuf;
use std::process;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    // Load configuration
    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let config = match Config::load_from(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    // Execute command
    if let Err(e) = run_command(cli.command, config, config_path).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config, config_path: PathBuf) -> Result<()> {
    match command {
        Commands::Categorize {
            paths,
            output_dir,
            skills,
            csv,
            format,
            detailed,
            no_recursive,
        } => {
            let output_format = match format {
                Some(format) => cli::parse_output_format(&format).map_err(CategorizerError::InvalidInput)?,
                None => config.output.format,
            };
            let output_dir = output_dir.unwrap_or_else(|| config.output.default_output_dir.clone());

            let uploads = InputManager::new()
                .with_recursion(!no_recursive)
                .collect(&paths)
                .await?;

            let orchestrator = BatchOrchestrator::from_config(&config)?;

            let progress = if output_format == OutputFormat::Console {
                ProgressBar::new(uploads.len() as u64)
            } else {
                ProgressBar::hidden()
            };
            progress.set_style(
                ProgressStyle::with_template("{spinner} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("=>-"),
            );

            let outcome = orchestrator.run_with_observer(&uploads, &output_dir, |outcome| {
                progress.set_message(outcome.filename().to_string());
                progress.inc(1);
            })?;
            progress.finish_and_clear();

            let report = BatchReport::new(&outcome, skills.as_deref(), &output_dir);
            let generator = ReportGenerator::with_options(config.output.color_output, detailed, true);
            println!("{}", generator.generate_report(&report, &output_format)?);

            if let Some(csv_path) = csv {
                save_csv(&csv_path, &report.records)?;
                info!("Wrote {} records to {}", report.records.len(), csv_path.display());
                if output_format == OutputFormat::Console {
                    println!("{} CSV saved to {}", "✓".green(), csv_path.display());
                }
            }
        }

        Commands::Serve { bind } => {
            let bind = bind.unwrap_or_else(|| config.server.bind_address.clone());
            let orchestrator = BatchOrchestrator::from_config(&config)?;
            let state = AppState::new(orchestrator, &config);

            println!("🚀 Resume categorizer running at http://{}", bind);
            server::serve(state, &bind).await?;
        }

        Commands::Categories => {
            println!("{}", "Categories".bold());
            for (id, category) in CATEGORY_MAPPING.iter() {
                println!("  {:>2}  {}", id, category.label());
            }
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                let content = toml::to_string_pretty(&config).map_err(|e| {
                    CategorizerError::Configuration(format!("Failed to serialize config: {}", e))
                })?;
                println!("⚙️  Current Configuration ({})\n", config_path.display());
                println!("{}", content);
            }

            Some(ConfigAction::Reset) => {
                Config::default().save_to(&config_path)?;
                println!("✅ Configuration reset: {}", config_path.display());
            }

            Some(ConfigAction::Path) => {
                println!("{}", config_path.display());
            }
        },
    }

    Ok(())
}
