use super::export::ExportedFile;
use super::formatter::{format_file_size, format_money, format_percent, FormattedHarvest};
use super::harvest::HarvestRecord;
use super::metrics::LossStatistics;
use super::registry::{FarmRanking, RegistryStatistics, VarietyTotals};
use anyhow::Result;
use prettytable::{row, Table};
use std::collections::BTreeMap;

pub struct View {}

impl View {
    pub fn harvests(records: &[HarvestRecord]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row![
            "ID", "FARM", "AREA (HA)", "VARIETY", "YIELD (T/HA)", "LOSS (%)", "LOSS (T)", "LOSS ($)", "EFFICIENCY", "TIER", "DATE"
        ]);
        for record in records {
            let f = FormattedHarvest::from(record);
            table.add_row(row![
                f.id,
                f.farm,
                r->f.area,
                f.variety,
                r->f.expected_yield,
                r->f.loss_pct,
                r->f.tonnes_lost,
                r->format_money(record.financial_loss),
                r->f.efficiency,
                f.tier,
                f.date
            ]);
        }
        table.printstd();

        Ok(())
    }

    pub fn harvest(record: &HarvestRecord) -> Result<()> {
        let rows = vec![
            ("ID".to_string(), record.id.to_string()),
            ("Farm".to_string(), record.farm.clone()),
            ("Date".to_string(), record.harvest_date.format("%Y-%m-%d").to_string()),
            ("Area".to_string(), format!("{:.2} ha", record.area_ha)),
            ("Variety".to_string(), record.variety.to_string()),
            ("Expected yield".to_string(), format!("{:.2} t/ha", record.expected_yield)),
            ("Gross tonnage".to_string(), format!("{:.2} t", record.gross_tonnage())),
            ("Harvested".to_string(), format!("{:.2} t", record.tonnes_harvested)),
            ("Loss".to_string(), format_percent(record.loss_pct)),
            ("Tonnes lost".to_string(), format!("{:.2} t", record.tonnes_lost)),
            ("Price per tonne".to_string(), format_money(record.price_per_tonne)),
            ("Financial loss".to_string(), format_money(record.financial_loss)),
            ("Efficiency".to_string(), format_percent(record.efficiency)),
            ("Tier".to_string(), record.tier.to_string()),
            ("Harvester".to_string(), record.harvester.to_string()),
            ("Speed".to_string(), format!("{:.2} km/h", record.speed_kmh)),
            ("Weather".to_string(), record.weather.to_string()),
            ("Notes".to_string(), record.notes.clone()),
        ];
        Self::summary(&rows)
    }

    pub fn statistics(stats: &RegistryStatistics, losses: &LossStatistics) -> Result<()> {
        let rows = vec![
            ("Harvests".to_string(), stats.count.to_string()),
            ("Total area".to_string(), format!("{:.2} ha", stats.total_area)),
            ("Mean loss".to_string(), format_percent(stats.mean_loss_pct)),
            ("Lowest loss".to_string(), format_percent(losses.min)),
            ("Highest loss".to_string(), format_percent(losses.max)),
            ("Total tonnes lost".to_string(), format!("{:.2} t", stats.total_tonnes_lost)),
            ("Total financial loss".to_string(), format_money(stats.total_financial_loss)),
            ("Mean efficiency".to_string(), format_percent(stats.mean_efficiency)),
        ];
        Self::summary(&rows)
    }

    pub fn ranking(ranking: &[FarmRanking]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["#", "FARM", "HARVESTS", "MEAN EFFICIENCY", "MEAN LOSS"]);
        for (position, farm) in ranking.iter().enumerate() {
            table.add_row(row![
                position + 1,
                farm.farm,
                r->farm.count,
                r->format_percent(farm.mean_efficiency),
                r->format_percent(farm.mean_loss_pct)
            ]);
        }
        table.printstd();

        Ok(())
    }

    pub fn varieties(totals: &BTreeMap<String, VarietyTotals>) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["VARIETY", "HARVESTS", "TOTAL AREA (HA)", "MEAN LOSS"]);
        for (variety, total) in totals {
            table.add_row(row![
                variety,
                r->total.count,
                r->format!("{:.2}", total.total_area),
                r->format_percent(total.mean_loss_pct)
            ]);
        }
        table.printstd();

        Ok(())
    }

    pub fn files(files: &[ExportedFile]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["FILE", "FORMAT", "SIZE", "MODIFIED"]);
        for file in files {
            table.add_row(row![
                file.name,
                file.format,
                r->format_file_size(file.size),
                file.modified.format("%Y-%m-%d %H:%M:%S")
            ]);
        }
        table.printstd();

        Ok(())
    }

    /// Two-column label/value table.
    pub fn summary(rows: &[(String, String)]) -> Result<()> {
        let mut table = Table::new();

        for (label, value) in rows {
            table.add_row(row![b->label, value]);
        }
        table.printstd();

        Ok(())
    }
}
