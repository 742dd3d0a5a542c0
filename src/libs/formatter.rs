//! Display formatting for money, sizes and harvest rows.
//!
//! Values are formatted once here so console tables, text reports and CSV
//! exports agree on precision and separators.
//!
//! ```rust
//! use canetrack::libs::formatter::{format_file_size, format_money};
//!
//! assert_eq!(format_money(25650.0), "$ 25,650.00");
//! assert_eq!(format_file_size(1536), "1.5 KB");
//! ```

use super::harvest::HarvestRecord;
use super::metrics::round2;
use serde::{Deserialize, Serialize};

const SIZE_UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// A harvest record with every field pre-rendered as text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormattedHarvest {
    pub id: String,
    pub farm: String,
    pub area: String,
    pub variety: String,
    pub expected_yield: String,
    pub loss_pct: String,
    pub tonnes_lost: String,
    pub financial_loss: String,
    pub efficiency: String,
    pub tier: String,
    pub date: String,
}

impl From<&HarvestRecord> for FormattedHarvest {
    fn from(record: &HarvestRecord) -> Self {
        FormattedHarvest {
            id: record.id.to_string(),
            farm: record.farm.clone(),
            area: format!("{:.2}", record.area_ha),
            variety: record.variety.to_string(),
            expected_yield: format!("{:.2}", record.expected_yield),
            loss_pct: format!("{:.2}", record.loss_pct),
            tonnes_lost: format!("{:.2}", record.tonnes_lost),
            financial_loss: format!("{:.2}", record.financial_loss),
            efficiency: format!("{:.2}", record.efficiency),
            tier: record.tier.to_string(),
            date: record.harvest_date.format("%Y-%m-%d").to_string(),
        }
    }
}

/// Currency amount with two decimals and comma thousands separators.
pub fn format_money(value: f64) -> String {
    let rounded = round2(value);
    let sign = if rounded < 0.0 { "-" } else { "" };
    let cents = (rounded.abs() * 100.0).round() as u64;

    format!("{}$ {}.{:02}", sign, group_thousands(cents / 100), cents % 100)
}

pub fn format_percent(value: f64) -> String {
    format!("{:.2}%", value)
}

/// Human-readable byte count using binary multiples.
pub fn format_file_size(bytes: u64) -> String {
    if bytes < 1024 {
        return format!("{} B", bytes);
    }

    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }

    format!("{:.1} {}", size, SIZE_UNITS[unit])
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn money_groups_thousands() {
        assert_eq!(format_money(0.0), "$ 0.00");
        assert_eq!(format_money(999.5), "$ 999.50");
        assert_eq!(format_money(1234567.891), "$ 1,234,567.89");
        assert_eq!(format_money(-4320.0), "-$ 4,320.00");
    }

    #[test]
    fn file_sizes() {
        assert_eq!(format_file_size(0), "0 B");
        assert_eq!(format_file_size(1023), "1023 B");
        assert_eq!(format_file_size(1024 * 1024), "1.0 MB");
        assert_eq!(format_file_size(5 * 1024 * 1024 * 1024), "5.0 GB");
    }
}
