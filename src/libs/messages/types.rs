//! Message type definitions for every user-facing string in canetrack.
//!
//! Variants are grouped by the area of the application that emits them.
//! Parameterized variants carry the values interpolated into the text;
//! the trailing comments name what each parameter holds.

#[derive(Debug, Clone)]
pub enum Message {
    // === HARVEST MESSAGES ===
    HarvestRegistered(u32),           // id
    HarvestUpdated(u32),              // id
    HarvestRemoved(u32),              // id
    HarvestNotFound(u32),             // id
    HarvestsNotFound,
    HarvestsHeader(usize),            // count
    HarvestDetailsHeader(u32),        // id
    HarvestPreview(f64, String),      // tonnes lost, formatted money
    LossAboveAlert(f64, f64),         // loss, alert threshold
    LossCritical(f64, f64),           // loss, critical threshold
    NoFieldsToUpdate,
    ConfirmRemoveHarvest(u32, String), // id, farm
    ConfirmSaveHarvest,
    SampleDataLoaded(usize),          // count

    // === MENU MESSAGES ===
    MenuTitle,
    MenuRegister,
    MenuQuery,
    MenuUpdate,
    MenuRemove,
    MenuReports,
    MenuExport,
    MenuImport,
    MenuSimulate,
    MenuFiles,
    MenuExit,
    MenuGoodbye,
    MenuBack,
    QueryAll,
    QueryByFarm,
    QueryByTier,
    QueryById,
    QueryCompare,
    ReportStatistics,
    ReportRanking,
    ReportVarieties,
    ReportText,
    SimulateLossTonnage,
    SimulateFinancialLoss,
    SimulatePotentialSavings,
    SimulateAnnualSavings,
    SimulateDuration,

    // === REPORT MESSAGES ===
    StatisticsHeader,
    RankingHeader,
    VarietiesHeader,
    SimulationHeader,
    ComparisonHeader(u32, u32),       // first id, second id
    RegistryEmpty,
    ReportTitle,
    ReportGeneratedAt(String),        // timestamp
    ReportDetailsHeader,
    ReportFooter(String, String),     // system name, version

    // === EXPORT MESSAGES ===
    ExportingHarvests(usize, String), // count, format
    ExportCompleted(String),          // path
    NothingToExport,
    ExportedFilesHeader(usize),       // count
    NoExportedFiles(String),          // directory
    ImportCompleted(usize, usize),    // imported, skipped
    ImportRecordSkipped(u32, String), // exported id, reason
    UnsupportedExportFormat(String),  // path

    // === MIRROR MESSAGES ===
    MirrorInserted(u32),              // id
    MirrorUpdated(u32),               // id
    MirrorDeleted(u32),               // id
    MirrorNotFound(u32),              // id
    MirrorNoResults,
    MirrorStatisticsHeader,

    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigModuleHarvest,
    ConfigModuleExport,

    // === PROMPTS ===
    PromptFarm,
    PromptArea,
    PromptVariety,
    PromptVarietyOther,
    PromptYield,
    PromptLoss,
    PromptPrice,
    PromptHarvester,
    PromptHarvesterOther,
    PromptSpeed,
    PromptWeather,
    PromptDate,
    PromptNotes,
    PromptHarvestId,
    PromptFirstHarvestId,
    PromptSecondHarvestId,
    PromptTier,
    PromptTargetLossSimulation,
    PromptHarvestsPerYear,
    PromptImportPath,
    PromptSelectFields,
    PromptSelectFormat,
    PromptSelectModules,
    PromptPricePerTonne,
    PromptTargetLoss,
    PromptAlertLoss,
    PromptCriticalLoss,
    PromptAverageYield,
    PromptExportDirectory,
    PromptExportDateFormat,
    OptionOther,
    FieldNotes,
    FieldLoss,
    FieldSpeed,

    // === GENERAL MESSAGES ===
    OperationCancelled,
    InvalidInput(String),             // reason
}
