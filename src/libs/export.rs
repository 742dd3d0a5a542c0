//! Harvest export to JSON, CSV, Excel and plain-text files.
//!
//! The exporter only reads registry snapshots; it never mutates the
//! registry. JSON exports wrap the records in a metadata envelope so they
//! can be read back with [`read_json_export`] and re-registered.
//!
//! ## Output Location
//!
//! Without an explicit path, files are named `harvests_<YYYYmmdd_HHMMSS>`
//! with the format's extension and placed in the configured export
//! directory, which is created on demand.
//!
//! ```rust,no_run
//! use canetrack::libs::config::ExportConfig;
//! use canetrack::libs::export::{ExportFormat, Exporter};
//! use canetrack::libs::registry::HarvestRegistry;
//!
//! let registry = HarvestRegistry::default();
//! let path = Exporter::new(ExportFormat::Csv, None, &ExportConfig::default()).export(&registry)?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::config::ExportConfig;
use super::formatter::FormattedHarvest;
use super::harvest::HarvestRecord;
use super::registry::HarvestRegistry;
use super::report::{self, APP_METADATA_SYSTEM_NAME, APP_METADATA_VERSION};
use anyhow::Result;
use chrono::{DateTime, Local};
use rust_xlsxwriter::{Format, Workbook};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

const TABLE_HEADER: [&str; 11] = [
    "ID",
    "Farm",
    "Area (ha)",
    "Variety",
    "Yield (t/ha)",
    "Loss (%)",
    "Loss (t)",
    "Loss ($)",
    "Efficiency (%)",
    "Tier",
    "Date",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportFormat {
    /// Metadata envelope plus every record, re-importable
    Json,
    /// One row per record
    Csv,
    /// Spreadsheet with one row per record
    Excel,
    /// Human-readable report
    Text,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 4] = [ExportFormat::Json, ExportFormat::Csv, ExportFormat::Excel, ExportFormat::Text];

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
            ExportFormat::Excel => "xlsx",
            ExportFormat::Text => "txt",
        }
    }

    pub fn from_extension(extension: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|format| format.extension().eq_ignore_ascii_case(extension))
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExportFormat::Json => "JSON",
            ExportFormat::Csv => "CSV",
            ExportFormat::Excel => "Excel",
            ExportFormat::Text => "Text",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub exported_at: String,
    pub record_count: usize,
    pub system: String,
    #[serde(default)]
    pub version: String,
}

/// Root object of a JSON export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HarvestExport {
    pub metadata: ExportMetadata,
    pub harvests: Vec<HarvestRecord>,
}

/// A file found in the export directory.
#[derive(Debug, Clone)]
pub struct ExportedFile {
    pub name: String,
    pub path: PathBuf,
    pub size: u64,
    pub modified: DateTime<Local>,
    pub format: ExportFormat,
}

pub struct Exporter {
    format: ExportFormat,
    output_path: PathBuf,
    date_format: String,
}

impl Exporter {
    pub fn new(format: ExportFormat, output_path: Option<PathBuf>, config: &ExportConfig) -> Self {
        let output_path = output_path.unwrap_or_else(|| {
            let file_name = format!("harvests_{}.{}", Local::now().format("%Y%m%d_%H%M%S"), format.extension());
            config.directory.join(file_name)
        });

        Self {
            format,
            output_path,
            date_format: config.date_format.clone(),
        }
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Writes every registered harvest and returns the path written.
    pub fn export(&self, registry: &HarvestRegistry) -> Result<PathBuf> {
        if let Some(parent) = self.output_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let records = registry.list_all();
        match self.format {
            ExportFormat::Json => self.export_json(&records)?,
            ExportFormat::Csv => self.export_csv(&records)?,
            ExportFormat::Excel => self.export_excel(&records)?,
            ExportFormat::Text => self.export_text(registry)?,
        }

        tracing::debug!(path = %self.output_path.display(), format = %self.format, count = records.len(), "harvests exported");
        Ok(self.output_path.clone())
    }

    fn timestamp(&self) -> String {
        Local::now().format(&self.date_format).to_string()
    }

    fn export_json(&self, records: &[HarvestRecord]) -> Result<()> {
        let export = HarvestExport {
            metadata: ExportMetadata {
                exported_at: self.timestamp(),
                record_count: records.len(),
                system: APP_METADATA_SYSTEM_NAME.to_string(),
                version: APP_METADATA_VERSION.to_string(),
            },
            harvests: records.to_vec(),
        };

        let json = serde_json::to_string_pretty(&export)?;
        File::create(&self.output_path)?.write_all(json.as_bytes())?;
        Ok(())
    }

    fn export_csv(&self, records: &[HarvestRecord]) -> Result<()> {
        let mut wtr = csv::Writer::from_path(&self.output_path)?;
        wtr.write_record(TABLE_HEADER)?;

        for record in records {
            let row = FormattedHarvest::from(record);
            wtr.write_record([
                row.id,
                row.farm,
                row.area,
                row.variety,
                row.expected_yield,
                row.loss_pct,
                row.tonnes_lost,
                row.financial_loss,
                row.efficiency,
                row.tier,
                row.date,
            ])?;
        }

        wtr.flush()?;
        Ok(())
    }

    fn export_excel(&self, records: &[HarvestRecord]) -> Result<()> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name("Harvests")?;

        let header_format = Format::new().set_bold().set_background_color(rust_xlsxwriter::Color::Gray);
        let number_format = Format::new().set_num_format("0.00");

        for (col, title) in TABLE_HEADER.iter().enumerate() {
            worksheet.write_string_with_format(0, col as u16, *title, &header_format)?;
        }

        for (i, record) in records.iter().enumerate() {
            let row = i as u32 + 1;
            worksheet.write_number(row, 0, record.id as f64)?;
            worksheet.write_string(row, 1, &record.farm)?;
            worksheet.write_number_with_format(row, 2, record.area_ha, &number_format)?;
            worksheet.write_string(row, 3, record.variety.label())?;
            worksheet.write_number_with_format(row, 4, record.expected_yield, &number_format)?;
            worksheet.write_number_with_format(row, 5, record.loss_pct, &number_format)?;
            worksheet.write_number_with_format(row, 6, record.tonnes_lost, &number_format)?;
            worksheet.write_number_with_format(row, 7, record.financial_loss, &number_format)?;
            worksheet.write_number_with_format(row, 8, record.efficiency, &number_format)?;
            worksheet.write_string(row, 9, record.tier.as_str())?;
            worksheet.write_string(row, 10, &record.harvest_date.format("%Y-%m-%d").to_string())?;
        }

        worksheet.autofit();
        workbook.save(&self.output_path)?;
        Ok(())
    }

    fn export_text(&self, registry: &HarvestRegistry) -> Result<()> {
        let text = report::text_report(registry, &self.timestamp());
        File::create(&self.output_path)?.write_all(text.as_bytes())?;
        Ok(())
    }
}

/// Parses a JSON export written by [`Exporter`].
pub fn read_json_export(path: &Path) -> Result<HarvestExport> {
    let content = fs::read_to_string(path)?;
    let export: HarvestExport = serde_json::from_str(&content)?;
    Ok(export)
}

/// Exported files in `directory`, newest first.
///
/// A missing directory yields an empty list. Files with unknown extensions
/// are ignored.
pub fn list_exported_files(directory: &Path) -> Result<Vec<ExportedFile>> {
    if !directory.is_dir() {
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(directory)? {
        let entry = entry?;
        let path = entry.path();
        let metadata = entry.metadata()?;
        if !metadata.is_file() {
            continue;
        }

        let Some(format) = path
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(ExportFormat::from_extension)
        else {
            continue;
        };

        files.push(ExportedFile {
            name: entry.file_name().to_string_lossy().into_owned(),
            path,
            size: metadata.len(),
            modified: DateTime::<Local>::from(metadata.modified()?),
            format,
        });
    }

    files.sort_by(|a, b| b.modified.cmp(&a.modified).then_with(|| a.name.cmp(&b.name)));
    Ok(files)
}
