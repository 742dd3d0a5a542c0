//! Input validation for raw harvest attributes.
//!
//! These checks run before data reaches the registry, which only verifies
//! that required fields are present. Each helper names the offending field
//! in the returned [`HarvestError::Validation`] so prompts can re-ask with a
//! precise message.

use super::error::{HarvestError, HarvestResult};
use super::harvest::NewHarvest;
use chrono::{Local, NaiveDate};

/// Upper bound accepted for harvester operating speed, in km/h.
pub const MAX_SPEED_KMH: f64 = 20.0;

pub fn check_positive(value: f64, field: &str) -> HarvestResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(HarvestError::validation(field, "must be greater than zero"));
    }
    Ok(())
}

pub fn check_percentage(value: f64, field: &str) -> HarvestResult<()> {
    if !(0.0..=100.0).contains(&value) {
        return Err(HarvestError::validation(field, "must be between 0 and 100"));
    }
    Ok(())
}

pub fn check_speed(value: f64) -> HarvestResult<()> {
    if !value.is_finite() || value <= 0.0 || value > MAX_SPEED_KMH {
        return Err(HarvestError::validation("speed", format!("must be greater than 0 and at most {} km/h", MAX_SPEED_KMH)));
    }
    Ok(())
}

fn parse_number(input: &str, field: &str) -> HarvestResult<f64> {
    input
        .trim()
        .replace(',', ".")
        .parse::<f64>()
        .map_err(|_| HarvestError::validation(field, "must be a valid number"))
}

pub fn parse_positive(input: &str, field: &str) -> HarvestResult<f64> {
    let value = parse_number(input, field)?;
    check_positive(value, field)?;
    Ok(value)
}

pub fn parse_percentage(input: &str, field: &str) -> HarvestResult<f64> {
    let value = parse_number(input, field)?;
    check_percentage(value, field)?;
    Ok(value)
}

pub fn parse_speed(input: &str) -> HarvestResult<f64> {
    let value = parse_number(input, "speed")?;
    check_speed(value)?;
    Ok(value)
}

/// Parses a whole number greater than zero, such as an identifier or a count.
pub fn parse_positive_int(input: &str, field: &str) -> HarvestResult<u32> {
    match input.trim().parse::<u32>() {
        Ok(value) if value > 0 => Ok(value),
        _ => Err(HarvestError::validation(field, "must be a whole number greater than zero")),
    }
}

/// Trims `input` and rejects blank text.
pub fn non_empty(input: &str, field: &str) -> HarvestResult<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(HarvestError::validation(field, "cannot be empty"));
    }
    Ok(trimmed.to_string())
}

/// Accepts `today`, `YYYY-MM-DD` or `DD/MM/YYYY`.
pub fn parse_date(input: &str) -> HarvestResult<NaiveDate> {
    let input = input.trim();
    if input.eq_ignore_ascii_case("today") {
        return Ok(Local::now().date_naive());
    }

    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(input, "%d/%m/%Y"))
        .map_err(|_| HarvestError::validation("date", "expected YYYY-MM-DD or DD/MM/YYYY"))
}

/// Range-checks every supplied field of a pending harvest.
///
/// Absent fields are left for the registry to report as missing.
pub fn validate_new_harvest(new: &NewHarvest) -> HarvestResult<()> {
    if let Some(farm) = &new.farm {
        non_empty(farm, "farm")?;
    }
    if let Some(area) = new.area_ha {
        check_positive(area, "area")?;
    }
    if let Some(expected_yield) = new.expected_yield {
        check_positive(expected_yield, "yield")?;
    }
    if let Some(loss) = new.loss_pct {
        check_percentage(loss, "loss")?;
    }
    if let Some(price) = new.price_per_tonne {
        check_positive(price, "price")?;
    }
    if let Some(speed) = new.speed_kmh {
        check_speed(speed)?;
    }
    Ok(())
}
