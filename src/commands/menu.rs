//! Interactive console session over an in-memory harvest registry.
//!
//! Every action collects raw input through `dialoguer` prompts, validates it
//! before it reaches the registry and prints results as tables. Invalid
//! input re-prompts; domain errors are reported and the session returns to
//! the main menu. Only terminal failures end the session early.

use super::files;
use super::simulate::{Simulation, DEFAULT_CUT_WIDTH_M};
use crate::{
    libs::{
        config::{Config, ExportConfig, HarvestConfig},
        error::HarvestResult,
        export::{self, ExportFormat, Exporter},
        formatter::{format_money, format_percent},
        harvest::{CaneVariety, HarvestRecord, HarvestUpdate, HarvesterBrand, NewHarvest, Weather},
        messages::Message,
        metrics::{self, LossTier},
        registry::HarvestRegistry,
        report, validation,
        view::View,
    },
    msg_bail_anyhow, msg_error, msg_error_anyhow, msg_info, msg_print, msg_success, msg_warning,
};
use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, MultiSelect, Select};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct MenuArgs {
    /// Start the session with a few sample harvests
    #[arg(short, long)]
    sample: bool,
}

pub fn cmd(args: MenuArgs) -> Result<()> {
    let config = Config::read()?;
    let mut session = Session::new(config.harvest_or_default(), config.export_or_default());

    if args.sample {
        let count = session.load(sample_harvests())?;
        msg_info!(Message::SampleDataLoaded(count));
    }

    session.run()
}

/// Demonstration harvests covering every loss tier.
pub fn sample_harvests() -> Vec<NewHarvest> {
    let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default();

    vec![
        NewHarvest::new()
            .farm("Santa Rita")
            .area(50.0)
            .variety(CaneVariety::Rb867515)
            .expected_yield(95.0)
            .loss(4.5)
            .harvester(HarvesterBrand::JohnDeere)
            .speed(5.5)
            .weather(Weather::Sunny)
            .date(date(2024, 5, 10))
            .notes("Dry soil, good visibility"),
        NewHarvest::new()
            .farm("Boa Vista")
            .area(32.5)
            .variety(CaneVariety::Sp813250)
            .expected_yield(88.0)
            .loss(7.2)
            .harvester(HarvesterBrand::CaseIh)
            .speed(6.0)
            .weather(Weather::PartlyCloudy)
            .date(date(2024, 5, 18)),
        NewHarvest::new()
            .farm("Santa Rita")
            .area(41.0)
            .variety(CaneVariety::Ctc4)
            .expected_yield(102.0)
            .loss(10.8)
            .harvester(HarvesterBrand::NewHolland)
            .speed(7.5)
            .weather(Weather::LightRain)
            .date(date(2024, 6, 2))
            .notes("Wet straw clogged the chopper"),
        NewHarvest::new()
            .farm("Sao Jose")
            .area(27.0)
            .variety(CaneVariety::Rb966928)
            .expected_yield(91.0)
            .loss(16.5)
            .harvester(HarvesterBrand::Valtra)
            .speed(9.0)
            .weather(Weather::HeavyRain)
            .date(date(2024, 6, 15)),
        NewHarvest::new()
            .farm("Boa Vista")
            .area(38.0)
            .variety("RB92579")
            .expected_yield(84.0)
            .loss(13.4)
            .price(128.0)
            .harvester(HarvesterBrand::MasseyFerguson)
            .speed(8.0)
            .weather(Weather::Drizzle)
            .date(date(2024, 7, 3)),
    ]
}

struct Session {
    registry: HarvestRegistry,
    export: ExportConfig,
}

impl Session {
    fn new(harvest: HarvestConfig, export: ExportConfig) -> Self {
        Session {
            registry: HarvestRegistry::new(harvest),
            export,
        }
    }

    fn config(&self) -> &HarvestConfig {
        self.registry.config()
    }

    fn load(&mut self, harvests: Vec<NewHarvest>) -> Result<usize> {
        let count = harvests.len();
        for new in harvests {
            self.registry.add(new)?;
        }
        Ok(count)
    }

    fn run(&mut self) -> Result<()> {
        let items = [
            Message::MenuRegister,
            Message::MenuQuery,
            Message::MenuUpdate,
            Message::MenuRemove,
            Message::MenuReports,
            Message::MenuExport,
            Message::MenuImport,
            Message::MenuSimulate,
            Message::MenuFiles,
            Message::MenuExit,
        ];

        loop {
            let choice = select(Message::MenuTitle, &items)?;
            let result = match choice {
                0 => self.register(),
                1 => self.query(),
                2 => self.update(),
                3 => self.remove(),
                4 => self.reports(),
                5 => self.export(),
                6 => self.import(),
                7 => self.simulate(),
                8 => files::show(&self.export.directory),
                _ => {
                    msg_print!(Message::MenuGoodbye);
                    return Ok(());
                }
            };

            if let Err(e) = result {
                if e.downcast_ref::<dialoguer::Error>().is_some() {
                    return Err(e);
                }
                msg_error!(e);
            }
        }
    }

    fn register(&mut self) -> Result<()> {
        let config = self.config().clone();

        let farm = prompt(Message::PromptFarm, None, |s| validation::non_empty(s, "farm"))?;
        let area = prompt(Message::PromptArea, None, |s| validation::parse_positive(s, "area"))?;
        let expected_yield = prompt(Message::PromptYield, Some(format!("{:.2}", config.average_yield)), |s| {
            validation::parse_positive(s, "yield")
        })?;
        let variety = choose_variety()?;
        let loss = prompt(Message::PromptLoss, None, |s| validation::parse_percentage(s, "loss"))?;
        let price = prompt(Message::PromptPrice, Some(format!("{:.2}", config.price_per_tonne)), |s| {
            validation::parse_positive(s, "price")
        })?;
        let harvester = choose_harvester()?;
        let speed = prompt(Message::PromptSpeed, None, validation::parse_speed)?;
        let weather = Weather::ALL[select(Message::PromptWeather, &Weather::ALL)?];
        let date = prompt(Message::PromptDate, Some("today".to_string()), validation::parse_date)?;
        let notes = prompt_optional(Message::PromptNotes, None)?;

        let new = NewHarvest::new()
            .farm(farm)
            .area(area)
            .variety(variety)
            .expected_yield(expected_yield)
            .loss(loss)
            .price(price)
            .harvester(harvester)
            .speed(speed)
            .weather(weather)
            .date(date)
            .notes(notes);
        validation::validate_new_harvest(&new)?;

        let tonnes = metrics::loss_tonnage(area, expected_yield, loss);
        let money = metrics::financial_loss_from_inputs(area, expected_yield, loss, price);
        msg_info!(Message::HarvestPreview(tonnes, format_money(money)));

        if !confirm(Message::ConfirmSaveHarvest, true)? {
            msg_info!(Message::OperationCancelled);
            return Ok(());
        }

        let (id, record) = self.registry.add(new)?;
        msg_success!(Message::HarvestRegistered(id));
        warn_thresholds(&config, record.loss_pct);

        Ok(())
    }

    fn query(&self) -> Result<()> {
        let items = [
            Message::QueryAll,
            Message::QueryByFarm,
            Message::QueryByTier,
            Message::QueryById,
            Message::QueryCompare,
            Message::MenuBack,
        ];

        match select(Message::MenuQuery, &items)? {
            0 => show_records(&self.registry.list_all()),
            1 => {
                let farm = prompt(Message::PromptFarm, None, |s| validation::non_empty(s, "farm"))?;
                show_records(&self.registry.filter_by_farm(&farm))
            }
            2 => {
                let tier = LossTier::ALL[select(Message::PromptTier, &LossTier::ALL)?];
                show_records(&self.registry.filter_by_classification(tier))
            }
            3 => {
                let id = prompt_id()?;
                match self.registry.find_by_id(id) {
                    Some(record) => {
                        msg_print!(Message::HarvestDetailsHeader(id));
                        View::harvest(&record)
                    }
                    None => {
                        msg_warning!(Message::HarvestNotFound(id));
                        Ok(())
                    }
                }
            }
            4 => self.compare(),
            _ => Ok(()),
        }
    }

    fn compare(&self) -> Result<()> {
        let first_id = prompt(Message::PromptFirstHarvestId, None, |s| validation::parse_positive_int(s, "id"))?;
        let second_id = prompt(Message::PromptSecondHarvestId, None, |s| validation::parse_positive_int(s, "id"))?;

        let Some(first) = self.registry.find_by_id(first_id) else {
            msg_warning!(Message::HarvestNotFound(first_id));
            return Ok(());
        };
        let Some(second) = self.registry.find_by_id(second_id) else {
            msg_warning!(Message::HarvestNotFound(second_id));
            return Ok(());
        };

        msg_print!(Message::ComparisonHeader(first_id, second_id), true);
        View::summary(&comparison_rows(&first, &second))
    }

    fn update(&mut self) -> Result<()> {
        let Some(record) = self.pick_record()? else {
            return Ok(());
        };
        View::harvest(&record)?;

        let fields = [Message::FieldNotes, Message::FieldLoss, Message::FieldSpeed];
        let labels: Vec<String> = fields.iter().map(ToString::to_string).collect();
        let selected = MultiSelect::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptSelectFields.to_string())
            .items(&labels)
            .interact()?;

        let mut update = HarvestUpdate::default();
        for index in selected {
            match index {
                0 => update.notes = Some(prompt_optional(Message::PromptNotes, Some(record.notes.clone()))?),
                1 => {
                    update.loss_pct = Some(prompt(Message::PromptLoss, Some(record.loss_pct.to_string()), |s| {
                        validation::parse_percentage(s, "loss")
                    })?)
                }
                _ => {
                    update.speed_kmh = Some(prompt(
                        Message::PromptSpeed,
                        Some(record.speed_kmh.to_string()),
                        validation::parse_speed,
                    )?)
                }
            }
        }

        if update.is_empty() {
            msg_info!(Message::NoFieldsToUpdate);
            return Ok(());
        }

        self.registry.update(record.id, &update)?;
        msg_success!(Message::HarvestUpdated(record.id));
        if let Some(loss) = update.loss_pct {
            warn_thresholds(self.config(), loss);
        }

        Ok(())
    }

    fn remove(&mut self) -> Result<()> {
        let Some(record) = self.pick_record()? else {
            return Ok(());
        };

        if !confirm(Message::ConfirmRemoveHarvest(record.id, record.farm.clone()), false)? {
            msg_info!(Message::OperationCancelled);
            return Ok(());
        }

        self.registry.remove(record.id)?;
        msg_success!(Message::HarvestRemoved(record.id));
        Ok(())
    }

    fn reports(&self) -> Result<()> {
        if self.registry.is_empty() {
            msg_info!(Message::RegistryEmpty);
            return Ok(());
        }

        let items = [
            Message::ReportStatistics,
            Message::ReportRanking,
            Message::ReportVarieties,
            Message::ReportText,
            Message::MenuBack,
        ];

        match select(Message::MenuReports, &items)? {
            0 => {
                msg_print!(Message::StatisticsHeader, true);
                View::statistics(&self.registry.statistics(), &self.registry.loss_statistics())
            }
            1 => {
                msg_print!(Message::RankingHeader, true);
                View::ranking(&self.registry.farm_ranking())
            }
            2 => {
                msg_print!(Message::VarietiesHeader, true);
                View::varieties(&self.registry.totals_by_cane_variety())
            }
            3 => {
                let generated_at = Local::now().format(&self.export.date_format).to_string();
                msg_print!(report::text_report(&self.registry, &generated_at));
                Ok(())
            }
            _ => Ok(()),
        }
    }

    fn export(&self) -> Result<()> {
        if self.registry.is_empty() {
            msg_info!(Message::NothingToExport);
            return Ok(());
        }

        let format = ExportFormat::ALL[select(Message::PromptSelectFormat, &ExportFormat::ALL)?];
        msg_info!(Message::ExportingHarvests(self.registry.len(), format.to_string()));

        let path = Exporter::new(format, None, &self.export).export(&self.registry)?;
        msg_success!(Message::ExportCompleted(path.display().to_string()));
        Ok(())
    }

    fn import(&mut self) -> Result<()> {
        let path = PathBuf::from(prompt(Message::PromptImportPath, None, |s| validation::non_empty(s, "path"))?);
        let format = path.extension().and_then(|ext| ext.to_str()).and_then(ExportFormat::from_extension);
        if format != Some(ExportFormat::Json) {
            msg_bail_anyhow!(Message::UnsupportedExportFormat(path.display().to_string()));
        }
        let data = export::read_json_export(&path).map_err(|e| msg_error_anyhow!(Message::InvalidInput(e.to_string())))?;

        let (imported, skipped) = import_records(&mut self.registry, &data.harvests);
        msg_success!(Message::ImportCompleted(imported, skipped));
        Ok(())
    }

    fn simulate(&self) -> Result<()> {
        let items = [
            Message::SimulateLossTonnage,
            Message::SimulateFinancialLoss,
            Message::SimulatePotentialSavings,
            Message::SimulateAnnualSavings,
            Message::SimulateDuration,
            Message::MenuBack,
        ];
        let choice = select(Message::MenuSimulate, &items)?;
        if choice >= 5 {
            return Ok(());
        }

        let area = prompt(Message::PromptArea, None, |s| validation::parse_positive(s, "area"))?;
        if choice == 4 {
            let speed = prompt(Message::PromptSpeed, None, validation::parse_speed)?;
            let hours = metrics::harvest_duration_hours(area, speed, DEFAULT_CUT_WIDTH_M);
            msg_print!(Message::SimulationHeader, true);
            return View::summary(&[("Estimated duration".to_string(), format!("{:.2} h", hours))]);
        }

        let config = self.config();
        let expected_yield = prompt(Message::PromptYield, Some(format!("{:.2}", config.average_yield)), |s| {
            validation::parse_positive(s, "yield")
        })?;
        let loss = prompt(Message::PromptLoss, None, |s| validation::parse_percentage(s, "loss"))?;
        let mut simulation = Simulation::new(area, expected_yield, loss, config);

        if choice >= 1 {
            simulation.price_per_tonne = prompt(Message::PromptPrice, Some(format!("{:.2}", config.price_per_tonne)), |s| {
                validation::parse_positive(s, "price")
            })?;
        }
        if choice >= 2 {
            simulation.target_loss_pct = prompt(
                Message::PromptTargetLossSimulation,
                Some(format!("{:.1}", config.target_loss_pct)),
                |s| validation::parse_percentage(s, "target"),
            )?;
        }
        if choice == 3 {
            simulation.harvests_per_year = prompt(Message::PromptHarvestsPerYear, Some("1".to_string()), |s| {
                validation::parse_positive_int(s, "harvests per year")
            })?;
        }

        let outcome = simulation.outcome();
        let row = match choice {
            0 => ("Tonnes lost".to_string(), format!("{:.2} t", outcome.tonnes_lost)),
            1 => ("Financial loss".to_string(), format_money(outcome.financial_loss)),
            2 => (
                format!(
                    "Savings from {} to {}",
                    format_percent(simulation.loss_pct),
                    format_percent(simulation.target_loss_pct)
                ),
                format_money(outcome.potential_savings),
            ),
            _ => (
                format!("Annual savings ({} harvest(s))", simulation.harvests_per_year),
                format_money(outcome.annual_savings),
            ),
        };

        msg_print!(Message::SimulationHeader, true);
        View::summary(&[row])
    }

    /// Prompts for an id and looks it up, reporting a missing record.
    fn pick_record(&self) -> Result<Option<HarvestRecord>> {
        if self.registry.is_empty() {
            msg_info!(Message::RegistryEmpty);
            return Ok(None);
        }

        let id = prompt_id()?;
        let record = self.registry.find_by_id(id);
        if record.is_none() {
            msg_warning!(Message::HarvestNotFound(id));
        }
        Ok(record)
    }
}

/// Re-registers exported records under fresh ids, skipping invalid ones.
///
/// Returns `(imported, skipped)`.
pub fn import_records(registry: &mut HarvestRegistry, records: &[HarvestRecord]) -> (usize, usize) {
    let mut imported = 0;
    let mut skipped = 0;

    for record in records {
        let new = NewHarvest::from(record);
        let result = validation::validate_new_harvest(&new).and_then(|_| registry.add(new).map(|_| ()));
        match result {
            Ok(()) => imported += 1,
            Err(e) => {
                msg_warning!(Message::ImportRecordSkipped(record.id, e.to_string()));
                skipped += 1;
            }
        }
    }

    (imported, skipped)
}

/// Loss and harvested-tonnage change from `first` to `second`.
pub fn comparison_rows(first: &HarvestRecord, second: &HarvestRecord) -> Vec<(String, String)> {
    let comparison = metrics::compare_harvests(
        (first.loss_pct, first.tonnes_harvested),
        (second.loss_pct, second.tonnes_harvested),
    );

    vec![
        (
            "Loss".to_string(),
            format!("{} -> {}", format_percent(first.loss_pct), format_percent(second.loss_pct)),
        ),
        ("Loss change".to_string(), format!("{:+.2} pp", comparison.loss_pct_delta)),
        ("Harvested change".to_string(), format!("{:+.2} t", comparison.tonnes_delta)),
        ("Improved".to_string(), if comparison.improved { "yes" } else { "no" }.to_string()),
    ]
}

fn show_records(records: &[HarvestRecord]) -> Result<()> {
    if records.is_empty() {
        msg_info!(Message::HarvestsNotFound);
        return Ok(());
    }

    msg_print!(Message::HarvestsHeader(records.len()));
    View::harvests(records)
}

fn warn_thresholds(config: &HarvestConfig, loss_pct: f64) {
    if config.is_critical(loss_pct) {
        msg_warning!(Message::LossCritical(loss_pct, config.critical_loss_pct));
    } else if config.is_alert(loss_pct) {
        msg_warning!(Message::LossAboveAlert(loss_pct, config.alert_loss_pct));
    }
}

fn select<T: ToString>(prompt: Message, items: &[T]) -> Result<usize> {
    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt.to_string())
        .items(items)
        .default(0)
        .interact()?;
    Ok(selection)
}

fn confirm(prompt: Message, default: bool) -> Result<bool> {
    let confirmed = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt.to_string())
        .default(default)
        .interact()?;
    Ok(confirmed)
}

/// Asks until `parse` accepts the answer.
fn prompt<T>(prompt: Message, default: Option<String>, parse: impl Fn(&str) -> HarvestResult<T>) -> Result<T> {
    let theme = ColorfulTheme::default();
    let mut input = Input::<String>::with_theme(&theme).with_prompt(prompt.to_string());
    if let Some(default) = default {
        input = input.default(default);
    }

    let raw = input
        .validate_with(|value: &String| parse(value).map(|_| ()).map_err(|e| e.to_string()))
        .interact_text()?;
    Ok(parse(&raw)?)
}

fn prompt_optional(prompt: Message, default: Option<String>) -> Result<String> {
    let theme = ColorfulTheme::default();
    let mut input = Input::<String>::with_theme(&theme)
        .with_prompt(prompt.to_string())
        .allow_empty(true);
    if let Some(default) = default {
        input = input.default(default);
    }

    Ok(input.interact_text()?.trim().to_string())
}

fn prompt_id() -> Result<u32> {
    prompt(Message::PromptHarvestId, None, |s| validation::parse_positive_int(s, "id"))
}

fn choose_variety() -> Result<CaneVariety> {
    let mut items: Vec<String> = CaneVariety::KNOWN.iter().map(ToString::to_string).collect();
    items.push(Message::OptionOther.to_string());

    let selection = select(Message::PromptVariety, &items)?;
    if let Some(variety) = CaneVariety::KNOWN.get(selection) {
        return Ok(variety.clone());
    }

    let name = prompt(Message::PromptVarietyOther, None, |s| validation::non_empty(s, "variety"))?;
    Ok(CaneVariety::from(name))
}

fn choose_harvester() -> Result<HarvesterBrand> {
    let mut items: Vec<String> = HarvesterBrand::KNOWN.iter().map(ToString::to_string).collect();
    items.push(Message::OptionOther.to_string());

    let selection = select(Message::PromptHarvester, &items)?;
    if let Some(brand) = HarvesterBrand::KNOWN.get(selection) {
        return Ok(brand.clone());
    }

    let name = prompt(Message::PromptHarvesterOther, None, |s| validation::non_empty(s, "harvester"))?;
    Ok(HarvesterBrand::from(name))
}
