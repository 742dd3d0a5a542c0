//! Text rendering for [`Message`].

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === HARVEST MESSAGES ===
            Message::HarvestRegistered(id) => format!("Harvest #{} registered successfully.", id),
            Message::HarvestUpdated(id) => format!("Harvest #{} updated successfully.", id),
            Message::HarvestRemoved(id) => format!("Harvest #{} removed.", id),
            Message::HarvestNotFound(id) => format!("Harvest #{} not found.", id),
            Message::HarvestsNotFound => "No harvests found.".to_string(),
            Message::HarvestsHeader(count) => format!("Harvests ({}):", count),
            Message::HarvestDetailsHeader(id) => format!("Harvest #{} details:", id),
            Message::HarvestPreview(tonnes, money) => format!("Estimated loss: {:.2} t ({}).", tonnes, money),
            Message::LossAboveAlert(loss, threshold) => {
                format!("Loss of {:.2}% is above the alert threshold of {:.2}%.", loss, threshold)
            }
            Message::LossCritical(loss, threshold) => {
                format!("Loss of {:.2}% exceeds the critical threshold of {:.2}%. Inspect the harvester settings.", loss, threshold)
            }
            Message::NoFieldsToUpdate => "No fields selected, nothing to update.".to_string(),
            Message::ConfirmRemoveHarvest(id, farm) => format!("Remove harvest #{} of farm '{}'?", id, farm),
            Message::ConfirmSaveHarvest => "Save this harvest?".to_string(),
            Message::SampleDataLoaded(count) => format!("Loaded {} sample harvests.", count),

            // === MENU MESSAGES ===
            Message::MenuTitle => "Sugarcane harvest loss tracker".to_string(),
            Message::MenuRegister => "Register harvest".to_string(),
            Message::MenuQuery => "Query harvests".to_string(),
            Message::MenuUpdate => "Update harvest".to_string(),
            Message::MenuRemove => "Remove harvest".to_string(),
            Message::MenuReports => "Reports".to_string(),
            Message::MenuExport => "Export harvests".to_string(),
            Message::MenuImport => "Import harvests from JSON".to_string(),
            Message::MenuSimulate => "Simulations".to_string(),
            Message::MenuFiles => "Exported files".to_string(),
            Message::MenuExit => "Exit".to_string(),
            Message::MenuGoodbye => "Goodbye!".to_string(),
            Message::MenuBack => "Back".to_string(),
            Message::QueryAll => "All harvests".to_string(),
            Message::QueryByFarm => "By farm".to_string(),
            Message::QueryByTier => "By loss tier".to_string(),
            Message::QueryById => "By ID".to_string(),
            Message::QueryCompare => "Compare two harvests".to_string(),
            Message::ReportStatistics => "General statistics".to_string(),
            Message::ReportRanking => "Farm efficiency ranking".to_string(),
            Message::ReportVarieties => "Totals per variety".to_string(),
            Message::ReportText => "Full text report".to_string(),
            Message::SimulateLossTonnage => "Loss in tonnes".to_string(),
            Message::SimulateFinancialLoss => "Financial loss".to_string(),
            Message::SimulatePotentialSavings => "Potential savings".to_string(),
            Message::SimulateAnnualSavings => "Annual savings projection".to_string(),
            Message::SimulateDuration => "Harvest duration".to_string(),

            // === REPORT MESSAGES ===
            Message::StatisticsHeader => "General statistics:".to_string(),
            Message::RankingHeader => "Farm efficiency ranking:".to_string(),
            Message::VarietiesHeader => "Totals per variety:".to_string(),
            Message::SimulationHeader => "Simulation results:".to_string(),
            Message::ComparisonHeader(first, second) => format!("Harvest #{} compared with #{}:", second, first),
            Message::RegistryEmpty => "No harvests registered yet.".to_string(),
            Message::ReportTitle => "SUGARCANE HARVEST LOSS REPORT".to_string(),
            Message::ReportGeneratedAt(timestamp) => format!("Generated at: {}", timestamp),
            Message::ReportDetailsHeader => "Harvest details:".to_string(),
            Message::ReportFooter(system, version) => format!("Report generated by {} v{}", system, version),

            // === EXPORT MESSAGES ===
            Message::ExportingHarvests(count, format) => format!("Exporting {} harvest(s) as {}...", count, format),
            Message::ExportCompleted(path) => format!("Export completed: {}", path),
            Message::NothingToExport => "There are no harvests to export.".to_string(),
            Message::ExportedFilesHeader(count) => format!("Exported files ({}):", count),
            Message::NoExportedFiles(dir) => format!("No exported files found in {}.", dir),
            Message::ImportCompleted(imported, skipped) => {
                format!("Imported {} harvest(s), skipped {}.", imported, skipped)
            }
            Message::ImportRecordSkipped(id, reason) => format!("Skipping exported harvest #{}: {}", id, reason),
            Message::UnsupportedExportFormat(path) => format!("Only JSON exports can be imported: {}", path),

            // === MIRROR MESSAGES ===
            Message::MirrorInserted(id) => format!("Harvest stored in the database with ID {}.", id),
            Message::MirrorUpdated(id) => format!("Database harvest #{} updated.", id),
            Message::MirrorDeleted(id) => format!("Database harvest #{} deleted.", id),
            Message::MirrorNotFound(id) => format!("Database harvest #{} not found.", id),
            Message::MirrorNoResults => "No harvests stored in the database match.".to_string(),
            Message::MirrorStatisticsHeader => "Database statistics:".to_string(),

            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully.".to_string(),
            Message::ConfigModuleHarvest => "Harvest parameters".to_string(),
            Message::ConfigModuleExport => "Export settings".to_string(),

            // === PROMPTS ===
            Message::PromptFarm => "Farm name".to_string(),
            Message::PromptArea => "Harvested area (ha)".to_string(),
            Message::PromptVariety => "Cane variety".to_string(),
            Message::PromptVarietyOther => "Variety name".to_string(),
            Message::PromptYield => "Expected yield (t/ha)".to_string(),
            Message::PromptLoss => "Observed loss (%)".to_string(),
            Message::PromptPrice => "Price per tonne".to_string(),
            Message::PromptHarvester => "Harvester brand".to_string(),
            Message::PromptHarvesterOther => "Harvester brand name".to_string(),
            Message::PromptSpeed => "Operating speed (km/h)".to_string(),
            Message::PromptWeather => "Weather condition".to_string(),
            Message::PromptDate => "Harvest date (today, YYYY-MM-DD or DD/MM/YYYY)".to_string(),
            Message::PromptNotes => "Notes (optional)".to_string(),
            Message::PromptHarvestId => "Harvest ID".to_string(),
            Message::PromptFirstHarvestId => "First harvest ID (baseline)".to_string(),
            Message::PromptSecondHarvestId => "Second harvest ID".to_string(),
            Message::PromptTier => "Loss tier".to_string(),
            Message::PromptTargetLossSimulation => "Target loss (%)".to_string(),
            Message::PromptHarvestsPerYear => "Harvests per year".to_string(),
            Message::PromptImportPath => "Path of the JSON export".to_string(),
            Message::PromptSelectFields => "Select fields to edit (space to select, enter to confirm)".to_string(),
            Message::PromptSelectFormat => "Export format".to_string(),
            Message::PromptSelectModules => "Select sections to configure".to_string(),
            Message::PromptPricePerTonne => "Default price per tonne".to_string(),
            Message::PromptTargetLoss => "Target loss (%)".to_string(),
            Message::PromptAlertLoss => "Alert loss threshold (%)".to_string(),
            Message::PromptCriticalLoss => "Critical loss threshold (%)".to_string(),
            Message::PromptAverageYield => "Average expected yield (t/ha)".to_string(),
            Message::PromptExportDirectory => "Export directory".to_string(),
            Message::PromptExportDateFormat => "Export timestamp format".to_string(),
            Message::OptionOther => "Other".to_string(),
            Message::FieldNotes => "Notes".to_string(),
            Message::FieldLoss => "Loss (%)".to_string(),
            Message::FieldSpeed => "Speed (km/h)".to_string(),

            // === GENERAL MESSAGES ===
            Message::OperationCancelled => "Operation cancelled.".to_string(),
            Message::InvalidInput(reason) => format!("Invalid input: {}", reason),
        };
        write!(f, "{}", text)
    }
}
