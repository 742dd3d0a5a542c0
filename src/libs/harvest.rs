//! Harvest records and the raw inputs they are built from.
//!
//! A [`HarvestRecord`] carries its source attributes plus five derived
//! metrics (tonnes lost, tonnes harvested, financial loss, efficiency and
//! loss tier). Derived values are only ever produced by [`HarvestRecord::build`]
//! and [`HarvestRecord::apply`], so they cannot drift from their inputs.

use super::config::HarvestConfig;
use super::error::{HarvestError, HarvestResult};
use super::metrics::{self, LossTier};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sugarcane variety. Unlisted varieties are kept as free text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum CaneVariety {
    Sp813250,
    Rb867515,
    Rb966928,
    Ctc4,
    Ctc9,
    Iacsp955000,
    Other(String),
}

impl CaneVariety {
    pub const KNOWN: [CaneVariety; 6] = [
        CaneVariety::Sp813250,
        CaneVariety::Rb867515,
        CaneVariety::Rb966928,
        CaneVariety::Ctc4,
        CaneVariety::Ctc9,
        CaneVariety::Iacsp955000,
    ];

    pub fn label(&self) -> &str {
        match self {
            CaneVariety::Sp813250 => "SP81-3250",
            CaneVariety::Rb867515 => "RB867515",
            CaneVariety::Rb966928 => "RB966928",
            CaneVariety::Ctc4 => "CTC4",
            CaneVariety::Ctc9 => "CTC9",
            CaneVariety::Iacsp955000 => "IACSP95-5000",
            CaneVariety::Other(name) => name,
        }
    }
}

impl From<String> for CaneVariety {
    fn from(value: String) -> Self {
        CaneVariety::KNOWN
            .into_iter()
            .find(|variety| variety.label() == value)
            .unwrap_or(CaneVariety::Other(value))
    }
}

impl From<&str> for CaneVariety {
    fn from(value: &str) -> Self {
        CaneVariety::from(value.to_string())
    }
}

impl From<CaneVariety> for String {
    fn from(value: CaneVariety) -> Self {
        value.label().to_string()
    }
}

impl fmt::Display for CaneVariety {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Harvester manufacturer. Unlisted brands are kept as free text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum HarvesterBrand {
    CaseIh,
    JohnDeere,
    NewHolland,
    Valtra,
    MasseyFerguson,
    Other(String),
}

impl HarvesterBrand {
    pub const KNOWN: [HarvesterBrand; 5] = [
        HarvesterBrand::CaseIh,
        HarvesterBrand::JohnDeere,
        HarvesterBrand::NewHolland,
        HarvesterBrand::Valtra,
        HarvesterBrand::MasseyFerguson,
    ];

    pub fn label(&self) -> &str {
        match self {
            HarvesterBrand::CaseIh => "Case IH",
            HarvesterBrand::JohnDeere => "John Deere",
            HarvesterBrand::NewHolland => "New Holland",
            HarvesterBrand::Valtra => "Valtra",
            HarvesterBrand::MasseyFerguson => "Massey Ferguson",
            HarvesterBrand::Other(name) => name,
        }
    }
}

impl From<String> for HarvesterBrand {
    fn from(value: String) -> Self {
        HarvesterBrand::KNOWN
            .into_iter()
            .find(|brand| brand.label() == value)
            .unwrap_or(HarvesterBrand::Other(value))
    }
}

impl From<&str> for HarvesterBrand {
    fn from(value: &str) -> Self {
        HarvesterBrand::from(value.to_string())
    }
}

impl From<HarvesterBrand> for String {
    fn from(value: HarvesterBrand) -> Self {
        value.label().to_string()
    }
}

impl fmt::Display for HarvesterBrand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Weather during the harvest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Weather {
    Sunny,
    PartlyCloudy,
    Cloudy,
    Drizzle,
    LightRain,
    HeavyRain,
}

impl Weather {
    pub const ALL: [Weather; 6] = [
        Weather::Sunny,
        Weather::PartlyCloudy,
        Weather::Cloudy,
        Weather::Drizzle,
        Weather::LightRain,
        Weather::HeavyRain,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Weather::Sunny => "Sunny",
            Weather::PartlyCloudy => "Partly Cloudy",
            Weather::Cloudy => "Cloudy",
            Weather::Drizzle => "Drizzle",
            Weather::LightRain => "Light Rain",
            Weather::HeavyRain => "Heavy Rain",
        }
    }
}

impl FromStr for Weather {
    type Err = HarvestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Weather::ALL
            .into_iter()
            .find(|weather| weather.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| HarvestError::validation("weather", format!("unknown condition '{}'", s)))
    }
}

impl TryFrom<String> for Weather {
    type Error = HarvestError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Weather> for String {
    fn from(value: Weather) -> Self {
        value.label().to_string()
    }
}

impl fmt::Display for Weather {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Raw attributes supplied when registering a harvest.
///
/// Every field is optional here; [`HarvestRecord::build`] reports the first
/// missing required one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewHarvest {
    pub farm: Option<String>,
    pub area_ha: Option<f64>,
    pub variety: Option<CaneVariety>,
    pub expected_yield: Option<f64>,
    pub loss_pct: Option<f64>,
    pub price_per_tonne: Option<f64>,
    pub harvester: Option<HarvesterBrand>,
    pub speed_kmh: Option<f64>,
    pub weather: Option<Weather>,
    pub harvest_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

impl NewHarvest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn farm(mut self, farm: impl Into<String>) -> Self {
        self.farm = Some(farm.into());
        self
    }

    pub fn area(mut self, area_ha: f64) -> Self {
        self.area_ha = Some(area_ha);
        self
    }

    pub fn variety(mut self, variety: impl Into<CaneVariety>) -> Self {
        self.variety = Some(variety.into());
        self
    }

    pub fn expected_yield(mut self, tonnes_per_ha: f64) -> Self {
        self.expected_yield = Some(tonnes_per_ha);
        self
    }

    pub fn loss(mut self, loss_pct: f64) -> Self {
        self.loss_pct = Some(loss_pct);
        self
    }

    pub fn price(mut self, price_per_tonne: f64) -> Self {
        self.price_per_tonne = Some(price_per_tonne);
        self
    }

    pub fn harvester(mut self, brand: impl Into<HarvesterBrand>) -> Self {
        self.harvester = Some(brand.into());
        self
    }

    pub fn speed(mut self, speed_kmh: f64) -> Self {
        self.speed_kmh = Some(speed_kmh);
        self
    }

    pub fn weather(mut self, weather: Weather) -> Self {
        self.weather = Some(weather);
        self
    }

    pub fn date(mut self, date: NaiveDate) -> Self {
        self.harvest_date = Some(date);
        self
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// Re-registers a previously exported record; its identifier is dropped.
impl From<&HarvestRecord> for NewHarvest {
    fn from(record: &HarvestRecord) -> Self {
        NewHarvest {
            farm: Some(record.farm.clone()),
            area_ha: Some(record.area_ha),
            variety: Some(record.variety.clone()),
            expected_yield: Some(record.expected_yield),
            loss_pct: Some(record.loss_pct),
            price_per_tonne: Some(record.price_per_tonne),
            harvester: Some(record.harvester.clone()),
            speed_kmh: Some(record.speed_kmh),
            weather: Some(record.weather),
            harvest_date: Some(record.harvest_date),
            notes: Some(record.notes.clone()),
        }
    }
}

/// Partial update restricted to the editable fields.
///
/// Farm, area, variety, yield, price, equipment, weather and date are fixed
/// once a harvest is registered.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HarvestUpdate {
    pub notes: Option<String>,
    pub loss_pct: Option<f64>,
    pub speed_kmh: Option<f64>,
}

impl HarvestUpdate {
    pub fn is_empty(&self) -> bool {
        self.notes.is_none() && self.loss_pct.is_none() && self.speed_kmh.is_none()
    }
}

/// One logged harvest with its derived metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HarvestRecord {
    pub id: u32,
    pub farm: String,
    pub area_ha: f64,
    pub variety: CaneVariety,
    pub expected_yield: f64,
    pub loss_pct: f64,
    pub price_per_tonne: f64,
    pub harvester: HarvesterBrand,
    pub speed_kmh: f64,
    pub weather: Weather,
    pub harvest_date: NaiveDate,
    pub notes: String,
    pub tonnes_harvested: f64,
    pub tonnes_lost: f64,
    pub financial_loss: f64,
    pub efficiency: f64,
    pub tier: LossTier,
}

impl HarvestRecord {
    /// Builds a record from raw inputs, computing every derived field.
    ///
    /// Price falls back to `config`, date to today and notes to empty text.
    ///
    /// # Errors
    ///
    /// [`HarvestError::MissingField`] naming the first absent required field.
    pub fn build(id: u32, new: NewHarvest, config: &HarvestConfig) -> HarvestResult<Self> {
        let farm = new.farm.ok_or(HarvestError::MissingField("farm"))?;
        let area_ha = new.area_ha.ok_or(HarvestError::MissingField("area"))?;
        let variety = new.variety.ok_or(HarvestError::MissingField("variety"))?;
        let expected_yield = new.expected_yield.ok_or(HarvestError::MissingField("yield"))?;
        let loss_pct = new.loss_pct.ok_or(HarvestError::MissingField("loss"))?;
        let harvester = new.harvester.ok_or(HarvestError::MissingField("harvester"))?;
        let speed_kmh = new.speed_kmh.ok_or(HarvestError::MissingField("speed"))?;
        let weather = new.weather.ok_or(HarvestError::MissingField("weather"))?;

        let mut record = HarvestRecord {
            id,
            farm,
            area_ha,
            variety,
            expected_yield,
            loss_pct,
            price_per_tonne: config.price_or_default(new.price_per_tonne),
            harvester,
            speed_kmh,
            weather,
            harvest_date: new.harvest_date.unwrap_or_else(|| Local::now().date_naive()),
            notes: new.notes.unwrap_or_default(),
            tonnes_harvested: 0.0,
            tonnes_lost: 0.0,
            financial_loss: 0.0,
            efficiency: 0.0,
            tier: LossTier::Optimal,
        };
        record.recompute();

        Ok(record)
    }

    /// Applies an update; a new loss percentage refreshes all derived fields.
    pub fn apply(&mut self, update: &HarvestUpdate) {
        if let Some(notes) = &update.notes {
            self.notes = notes.clone();
        }
        if let Some(speed) = update.speed_kmh {
            self.speed_kmh = speed;
        }
        if let Some(loss) = update.loss_pct {
            self.loss_pct = loss;
            self.recompute();
        }
    }

    fn recompute(&mut self) {
        self.tonnes_lost = metrics::loss_tonnage(self.area_ha, self.expected_yield, self.loss_pct);
        self.tonnes_harvested = metrics::harvested_tonnage(self.area_ha, self.expected_yield, self.loss_pct);
        self.financial_loss = metrics::financial_loss_from_inputs(self.area_ha, self.expected_yield, self.loss_pct, self.price_per_tonne);
        self.efficiency = metrics::efficiency(self.loss_pct);
        self.tier = metrics::classify(self.loss_pct);
    }

    pub fn gross_tonnage(&self) -> f64 {
        metrics::round2(self.area_ha * self.expected_yield)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_labels_map_to_variants() {
        assert_eq!(CaneVariety::from("CTC4"), CaneVariety::Ctc4);
        assert_eq!(CaneVariety::from("RB92579"), CaneVariety::Other("RB92579".to_string()));
        assert_eq!(HarvesterBrand::from("John Deere"), HarvesterBrand::JohnDeere);
        assert_eq!("light rain".parse::<Weather>().unwrap(), Weather::LightRain);
        assert!("Snow".parse::<Weather>().is_err());
    }

    #[test]
    fn labels_serialize_as_plain_strings() {
        let json = serde_json::to_string(&CaneVariety::Iacsp955000).unwrap();
        assert_eq!(json, "\"IACSP95-5000\"");
        let weather: Weather = serde_json::from_str("\"Partly Cloudy\"").unwrap();
        assert_eq!(weather, Weather::PartlyCloudy);
    }
}
