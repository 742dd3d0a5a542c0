//! Plain-text harvest report.
//!
//! The report is assembled from registry snapshots only: general statistics,
//! the farm efficiency ranking, totals per variety and one block per record.

use super::formatter::{format_money, format_percent};
use super::harvest::HarvestRecord;
use super::messages::Message;
use super::registry::HarvestRegistry;

include!(concat!(env!("OUT_DIR"), "/app_metadata.rs"));

const RULE_WIDTH: usize = 64;

/// Renders the complete report; `generated_at` is printed verbatim in the header.
pub fn text_report(registry: &HarvestRegistry, generated_at: &str) -> String {
    let mut lines = Vec::new();
    let rule = "=".repeat(RULE_WIDTH);

    lines.push(rule.clone());
    lines.push(Message::ReportTitle.to_string());
    lines.push(format!("{} v{}", APP_METADATA_SYSTEM_NAME, APP_METADATA_VERSION));
    lines.push(Message::ReportGeneratedAt(generated_at.to_string()).to_string());
    lines.push(rule.clone());
    lines.push(String::new());

    if registry.is_empty() {
        lines.push(Message::RegistryEmpty.to_string());
    } else {
        statistics_section(registry, &mut lines);
        ranking_section(registry, &mut lines);
        varieties_section(registry, &mut lines);

        lines.push(Message::ReportDetailsHeader.to_string());
        for record in registry.list_all() {
            record_block(&record, &mut lines);
        }
    }

    lines.push("-".repeat(RULE_WIDTH));
    lines.push(Message::ReportFooter(APP_METADATA_SYSTEM_NAME.to_string(), APP_METADATA_VERSION.to_string()).to_string());
    lines.push(String::new());

    lines.join("\n")
}

fn statistics_section(registry: &HarvestRegistry, lines: &mut Vec<String>) {
    let stats = registry.statistics();
    let losses = registry.loss_statistics();

    lines.push(Message::StatisticsHeader.to_string());
    lines.push(format!("  {:<24}{}", "Harvests:", stats.count));
    lines.push(format!("  {:<24}{:.2} ha", "Total area:", stats.total_area));
    lines.push(format!("  {:<24}{}", "Mean loss:", format_percent(stats.mean_loss_pct)));
    lines.push(format!(
        "  {:<24}{} / {}",
        "Loss range:",
        format_percent(losses.min),
        format_percent(losses.max)
    ));
    lines.push(format!("  {:<24}{:.2} t", "Total tonnes lost:", stats.total_tonnes_lost));
    lines.push(format!("  {:<24}{}", "Total financial loss:", format_money(stats.total_financial_loss)));
    lines.push(format!("  {:<24}{}", "Mean efficiency:", format_percent(stats.mean_efficiency)));
    lines.push(String::new());
}

fn ranking_section(registry: &HarvestRegistry, lines: &mut Vec<String>) {
    lines.push(Message::RankingHeader.to_string());
    for (position, farm) in registry.farm_ranking().iter().enumerate() {
        lines.push(format!(
            "  {}. {:<20} efficiency {:>8}  loss {:>7}  ({} harvest(s))",
            position + 1,
            farm.farm,
            format_percent(farm.mean_efficiency),
            format_percent(farm.mean_loss_pct),
            farm.count
        ));
    }
    lines.push(String::new());
}

fn varieties_section(registry: &HarvestRegistry, lines: &mut Vec<String>) {
    lines.push(Message::VarietiesHeader.to_string());
    for (variety, totals) in registry.totals_by_cane_variety() {
        lines.push(format!(
            "  {:<16} harvests: {:<4} area: {:>10.2} ha  mean loss: {}",
            variety,
            totals.count,
            totals.total_area,
            format_percent(totals.mean_loss_pct)
        ));
    }
    lines.push(String::new());
}

fn record_block(record: &HarvestRecord, lines: &mut Vec<String>) {
    lines.push(format!("  #{} {} ({})", record.id, record.farm, record.harvest_date.format("%Y-%m-%d")));
    lines.push(format!(
        "     Variety: {}, Harvester: {}, Weather: {}",
        record.variety, record.harvester, record.weather
    ));
    lines.push(format!(
        "     Area: {:.2} ha, Yield: {:.2} t/ha, Speed: {:.2} km/h",
        record.area_ha, record.expected_yield, record.speed_kmh
    ));
    lines.push(format!(
        "     Loss: {} ({:.2} t, {}), Efficiency: {}, Tier: {}",
        format_percent(record.loss_pct),
        record.tonnes_lost,
        format_money(record.financial_loss),
        format_percent(record.efficiency),
        record.tier
    ));
    if !record.notes.is_empty() {
        lines.push(format!("     Notes: {}", record.notes));
    }
    lines.push(String::new());
}
