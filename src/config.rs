//! Configuration management for the resume categorizer

use crate::error::{CategorizerError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub models: ModelConfig,
    pub processing: ProcessingConfig,
    pub output: OutputConfig,
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Exported TF-IDF vectorizer (JSON)
    pub vectorizer_path: PathBuf,
    /// Exported classifier weights (JSON)
    pub classifier_path: PathBuf,
    /// Optional label -> phrases gazetteer for entity recognition
    #[serde(default)]
    pub entity_gazetteer_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProcessingConfig {
    /// Extra terms appended to the built-in skill dictionary
    #[serde(default)]
    pub additional_skills: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub default_output_dir: PathBuf,
    pub csv_filename: String,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
    Csv,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub bind_address: String,
    pub max_upload_mb: usize,
}

impl Default for Config {
    fn default() -> Self {
        let models_dir = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".resume-categorizer")
            .join("models");

        Self {
            models: ModelConfig {
                vectorizer_path: models_dir.join("tfidf.json"),
                classifier_path: models_dir.join("classifier.json"),
                entity_gazetteer_path: None,
            },
            processing: ProcessingConfig::default(),
            output: OutputConfig {
                format: OutputFormat::Console,
                default_output_dir: PathBuf::from("categorized_resumes"),
                csv_filename: "filtered_categorized_resumes.csv".to_string(),
                color_output: true,
            },
            server: ServerConfig {
                bind_address: "127.0.0.1:8501".to_string(),
                max_upload_mb: 50,
            },
        }
    }
}

impl Config {
    /// Load the file at `config_path`, writing defaults on first run
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = toml::from_str(&content)
                .map_err(|e| CategorizerError::Configuration(format!("Failed to parse config: {}", e)))?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(config_path)?;
            Ok(config)
        }
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| CategorizerError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-categorizer")
            .join("config.toml")
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.server.max_upload_mb.saturating_mul(1024 * 1024)
    }
}
