//! Configuration management for canetrack.
//!
//! Business parameters (default price per tonne, target loss, alert
//! thresholds) and export settings live in a JSON file inside the
//! platform-specific application data directory. Each section is optional so
//! a fresh install runs on built-in defaults and a partial file stays valid.
//!
//! ## File Location
//!
//! - **Windows**: `%LOCALAPPDATA%\canetrack\canetrack\config.json`
//! - **macOS**: `~/Library/Application Support/canetrack/canetrack/config.json`
//! - **Linux**: `~/.local/share/canetrack/canetrack/config.json`
//!
//! ## Defaults Are Explicit
//!
//! The metrics engine never reads configuration on its own. Callers resolve
//! optional inputs through [`HarvestConfig::price_or_default`] and
//! [`HarvestConfig::target_or_default`] and pass plain numbers in:
//!
//! ```rust,no_run
//! use canetrack::libs::config::Config;
//! use canetrack::libs::metrics;
//!
//! let harvest = Config::read()?.harvest_or_default();
//! let price = harvest.price_or_default(None);
//! let loss = metrics::financial_loss_from_inputs(50.0, 95.0, 4.5, price);
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::data_storage::DataStorage;
use crate::libs::messages::Message;
use crate::libs::validation;
use crate::msg_print;
use anyhow::{Context, Result};
use dialoguer::{theme::ColorfulTheme, Input, MultiSelect};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::path::PathBuf;

/// Configuration file name inside the application data directory.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Represents a configurable section offered by the setup wizard.
#[derive(Debug, Clone)]
pub struct ConfigModule {
    pub key: String,
    pub name: String,
}

/// Harvest business parameters.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct HarvestConfig {
    /// Price paid per tonne of cane, used when a harvest omits its own price.
    pub price_per_tonne: f64,

    /// Loss percentage considered achievable; savings are measured against it.
    pub target_loss_pct: f64,

    /// Loss percentage above which a registered harvest triggers a warning.
    pub alert_loss_pct: f64,

    /// Loss percentage considered critical.
    pub critical_loss_pct: f64,

    /// Typical expected yield in tonnes per hectare, offered as a prompt default.
    pub average_yield: f64,
}

/// File export settings.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ExportConfig {
    /// Directory that receives exported reports.
    pub directory: PathBuf,

    /// `chrono` format string for timestamps written into exports.
    pub date_format: String,
}

/// Root configuration object.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub harvest: Option<HarvestConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub export: Option<ExportConfig>,
}

impl Default for HarvestConfig {
    fn default() -> Self {
        HarvestConfig {
            price_per_tonne: 120.0,
            target_loss_pct: 5.0,
            alert_loss_pct: 10.0,
            critical_loss_pct: 15.0,
            average_yield: 100.0,
        }
    }
}

impl HarvestConfig {
    pub fn price_or_default(&self, price_per_tonne: Option<f64>) -> f64 {
        price_per_tonne.unwrap_or(self.price_per_tonne)
    }

    pub fn target_or_default(&self, target_loss_pct: Option<f64>) -> f64 {
        target_loss_pct.unwrap_or(self.target_loss_pct)
    }

    /// True when `loss_pct` exceeds the alert threshold.
    pub fn is_alert(&self, loss_pct: f64) -> bool {
        loss_pct > self.alert_loss_pct
    }

    pub fn is_critical(&self, loss_pct: f64) -> bool {
        loss_pct > self.critical_loss_pct
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        ExportConfig {
            directory: PathBuf::from("data").join("exports"),
            date_format: "%d/%m/%Y %H:%M:%S".to_string(),
        }
    }
}

impl Config {
    /// Loads the configuration file, or defaults when it does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn read() -> Result<Config> {
        Self::read_from(&DataStorage::new())
    }

    pub fn read_from(storage: &DataStorage) -> Result<Config> {
        let config_file_path = storage.get_path(CONFIG_FILE_NAME)?;

        if !config_file_path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(&config_file_path)?;
        let config: Config = serde_json::from_str(&config_str)
            .with_context(|| format!("invalid configuration in {}", config_file_path.display()))?;
        Ok(config)
    }

    /// Writes the configuration as pretty-printed JSON, replacing any previous file.
    pub fn save(&self) -> Result<()> {
        self.save_to(&DataStorage::new())
    }

    pub fn save_to(&self, storage: &DataStorage) -> Result<()> {
        let config_file_path = storage.get_path(CONFIG_FILE_NAME)?;

        let config_file = File::create(&config_file_path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        tracing::debug!(path = %config_file_path.display(), "configuration saved");
        Ok(())
    }

    /// Configuration with every section filled with built-in defaults.
    pub fn with_defaults() -> Self {
        Config {
            harvest: Some(HarvestConfig::default()),
            export: Some(ExportConfig::default()),
        }
    }

    pub fn harvest_or_default(&self) -> HarvestConfig {
        self.harvest.clone().unwrap_or_default()
    }

    pub fn export_or_default(&self) -> ExportConfig {
        self.export.clone().unwrap_or_default()
    }

    /// Runs the interactive setup wizard, starting from the saved values.
    pub fn init() -> Result<Self> {
        let mut config = Self::read().unwrap_or_default();

        let modules = vec![
            ConfigModule {
                key: "harvest".to_string(),
                name: Message::ConfigModuleHarvest.to_string(),
            },
            ConfigModule {
                key: "export".to_string(),
                name: Message::ConfigModuleExport.to_string(),
            },
        ];

        let selected = MultiSelect::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptSelectModules.to_string())
            .items(&modules.iter().map(|module| &module.name).collect::<Vec<_>>())
            .interact()?;

        for &selection in &selected {
            match modules[selection].key.as_str() {
                "harvest" => {
                    let default = config.harvest_or_default();
                    msg_print!(Message::ConfigModuleHarvest);
                    config.harvest = Some(HarvestConfig {
                        price_per_tonne: prompt_positive(Message::PromptPricePerTonne, default.price_per_tonne)?,
                        target_loss_pct: prompt_percentage(Message::PromptTargetLoss, default.target_loss_pct)?,
                        alert_loss_pct: prompt_percentage(Message::PromptAlertLoss, default.alert_loss_pct)?,
                        critical_loss_pct: prompt_percentage(Message::PromptCriticalLoss, default.critical_loss_pct)?,
                        average_yield: prompt_positive(Message::PromptAverageYield, default.average_yield)?,
                    });
                }
                "export" => {
                    let default = config.export_or_default();
                    msg_print!(Message::ConfigModuleExport);
                    let directory: String = Input::with_theme(&ColorfulTheme::default())
                        .with_prompt(Message::PromptExportDirectory.to_string())
                        .default(default.directory.display().to_string())
                        .interact_text()?;
                    let date_format: String = Input::with_theme(&ColorfulTheme::default())
                        .with_prompt(Message::PromptExportDateFormat.to_string())
                        .default(default.date_format)
                        .interact_text()?;
                    config.export = Some(ExportConfig {
                        directory: PathBuf::from(directory),
                        date_format,
                    });
                }
                _ => {}
            }
        }

        Ok(config)
    }
}

fn prompt_positive(prompt: Message, default: f64) -> Result<f64> {
    let field = prompt.to_string();
    let value = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt.to_string())
        .default(default)
        .validate_with(|input: &f64| validation::check_positive(*input, &field).map_err(|e| e.to_string()))
        .interact_text()?;
    Ok(value)
}

fn prompt_percentage(prompt: Message, default: f64) -> Result<f64> {
    let field = prompt.to_string();
    let value = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt.to_string())
        .default(default)
        .validate_with(|input: &f64| validation::check_percentage(*input, &field).map_err(|e| e.to_string()))
        .interact_text()?;
    Ok(value)
}
