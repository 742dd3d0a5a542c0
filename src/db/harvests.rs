//! SQLite mirror of harvest records.
//!
//! The mirror stores the same records as the in-memory registry, with
//! derived values persisted as columns. It is an independent store: nothing
//! keeps it in sync with a registry. Identifiers come from `AUTOINCREMENT`
//! and are never reused after deletion.

use super::db::Db;
use crate::libs::config::HarvestConfig;
use crate::libs::harvest::{CaneVariety, HarvestRecord, HarvestUpdate, HarvesterBrand, NewHarvest, Weather};
use crate::libs::metrics::LossTier;
use anyhow::Result;
use rusqlite::types::Type;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};
use std::path::Path;

const SCHEMA_HARVESTS: &str = "CREATE TABLE IF NOT EXISTS harvests (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    farm TEXT NOT NULL,
    area_ha REAL NOT NULL,
    variety TEXT NOT NULL,
    expected_yield REAL NOT NULL,
    loss_pct REAL NOT NULL,
    price_per_tonne REAL NOT NULL,
    harvester TEXT NOT NULL,
    speed_kmh REAL NOT NULL,
    weather TEXT NOT NULL,
    harvest_date DATE NOT NULL,
    tonnes_harvested REAL NOT NULL,
    tonnes_lost REAL NOT NULL,
    financial_loss REAL NOT NULL,
    efficiency REAL NOT NULL,
    tier TEXT NOT NULL,
    notes TEXT NOT NULL DEFAULT '',
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
);
CREATE INDEX IF NOT EXISTS idx_harvests_farm ON harvests(farm);
CREATE INDEX IF NOT EXISTS idx_harvests_date ON harvests(harvest_date);";

const HARVEST_COLUMNS: &str = "id, farm, area_ha, variety, expected_yield, loss_pct, price_per_tonne, harvester, speed_kmh, weather, harvest_date, notes, tonnes_harvested, tonnes_lost, financial_loss, efficiency, tier";
const INSERT_HARVEST: &str = "INSERT INTO harvests (farm, area_ha, variety, expected_yield, loss_pct, price_per_tonne, harvester, speed_kmh, weather, harvest_date, notes, tonnes_harvested, tonnes_lost, financial_loss, efficiency, tier) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)";
const UPDATE_HARVEST: &str = "UPDATE harvests SET loss_pct = ?1, speed_kmh = ?2, notes = ?3, tonnes_harvested = ?4, tonnes_lost = ?5, financial_loss = ?6, efficiency = ?7, tier = ?8 WHERE id = ?9";
const DELETE_HARVEST: &str = "DELETE FROM harvests WHERE id = ?1";
const SELECT_STATISTICS: &str = "SELECT COUNT(*), SUM(area_ha), AVG(loss_pct), MIN(loss_pct), MAX(loss_pct), SUM(tonnes_lost), SUM(financial_loss) FROM harvests";

/// Query shapes supported by [`Harvests::fetch`].
#[derive(Debug, Clone)]
pub enum HarvestFilter {
    /// Newest harvest date first, optionally capped.
    Recent(Option<u32>),
    /// Case-insensitive (Unicode) substring match on the farm name.
    Farm(String),
    /// Exact tier, lowest loss first.
    Tier(LossTier),
}

/// Aggregates over every stored harvest.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HarvestStatistics {
    pub count: u32,
    pub total_area: f64,
    pub mean_loss_pct: f64,
    pub min_loss_pct: f64,
    pub max_loss_pct: f64,
    pub total_tonnes_lost: f64,
    pub total_financial_loss: f64,
}

pub struct Harvests {
    pub conn: Connection,
}

impl Harvests {
    pub fn new() -> Result<Harvests> {
        Self::init(Db::new()?)
    }

    pub fn open(path: &Path) -> Result<Harvests> {
        Self::init(Db::open(path)?)
    }

    fn init(db: Db) -> Result<Harvests> {
        db.conn.execute_batch(SCHEMA_HARVESTS)?;
        Ok(Harvests { conn: db.conn })
    }

    /// Builds a record from raw inputs and stores it, returning the new id.
    pub fn insert_new(&mut self, new: NewHarvest, config: &HarvestConfig) -> Result<u32> {
        let record = HarvestRecord::build(0, new, config)?;
        self.insert(&record)
    }

    /// Stores `record` under a fresh id; `record.id` is ignored.
    pub fn insert(&mut self, record: &HarvestRecord) -> Result<u32> {
        let tx = self.conn.transaction()?;
        tx.execute(
            INSERT_HARVEST,
            params![
                record.farm,
                record.area_ha,
                record.variety.label(),
                record.expected_yield,
                record.loss_pct,
                record.price_per_tonne,
                record.harvester.label(),
                record.speed_kmh,
                record.weather.label(),
                record.harvest_date,
                record.notes,
                record.tonnes_harvested,
                record.tonnes_lost,
                record.financial_loss,
                record.efficiency,
                record.tier.as_str(),
            ],
        )?;
        let id = u32::try_from(tx.last_insert_rowid())?;
        tx.commit()?;

        tracing::debug!(id, farm = %record.farm, "harvest stored in database");
        Ok(id)
    }

    pub fn get_by_id(&mut self, id: u32) -> Result<Option<HarvestRecord>> {
        let sql = format!("SELECT {} FROM harvests WHERE id = ?1", HARVEST_COLUMNS);
        let record = self.conn.query_row(&sql, params![id], map_harvest).optional()?;

        Ok(record)
    }

    pub fn list(&mut self, limit: Option<u32>) -> Result<Vec<HarvestRecord>> {
        self.fetch(HarvestFilter::Recent(limit))
    }

    pub fn by_farm(&mut self, farm: &str) -> Result<Vec<HarvestRecord>> {
        self.fetch(HarvestFilter::Farm(farm.to_string()))
    }

    pub fn by_tier(&mut self, tier: LossTier) -> Result<Vec<HarvestRecord>> {
        self.fetch(HarvestFilter::Tier(tier))
    }

    pub fn fetch(&mut self, filter: HarvestFilter) -> Result<Vec<HarvestRecord>> {
        let select = format!("SELECT {} FROM harvests", HARVEST_COLUMNS);
        let (sql, params): (String, Vec<String>) = match &filter {
            HarvestFilter::Recent(None) | HarvestFilter::Farm(_) => (format!("{} ORDER BY harvest_date DESC, id DESC", select), vec![]),
            HarvestFilter::Recent(Some(limit)) => (format!("{} ORDER BY harvest_date DESC, id DESC LIMIT {}", select, limit), vec![]),
            HarvestFilter::Tier(tier) => (
                format!("{} WHERE tier = ?1 ORDER BY loss_pct ASC, id ASC", select),
                vec![tier.as_str().to_string()],
            ),
        };

        let mut stmt = self.conn.prepare(&sql)?;
        let harvest_iter = stmt.query_map(params_from_iter(params.iter()), map_harvest)?;

        let mut harvests = Vec::new();
        for harvest in harvest_iter {
            harvests.push(harvest?);
        }

        // SQLite's LOWER only folds ASCII, so farm matching happens here
        if let HarvestFilter::Farm(farm) = &filter {
            let needle = farm.to_lowercase();
            harvests.retain(|harvest| harvest.farm.to_lowercase().contains(&needle));
        }

        Ok(harvests)
    }

    /// Applies `update` and rewrites the editable and derived columns.
    ///
    /// Returns `false` when no harvest has this id.
    pub fn update(&mut self, id: u32, update: &HarvestUpdate) -> Result<bool> {
        let Some(mut record) = self.get_by_id(id)? else {
            return Ok(false);
        };
        record.apply(update);

        let tx = self.conn.transaction()?;
        tx.execute(
            UPDATE_HARVEST,
            params![
                record.loss_pct,
                record.speed_kmh,
                record.notes,
                record.tonnes_harvested,
                record.tonnes_lost,
                record.financial_loss,
                record.efficiency,
                record.tier.as_str(),
                id,
            ],
        )?;
        tx.commit()?;

        tracing::debug!(id, "database harvest updated");
        Ok(true)
    }

    /// Returns `false` when no harvest has this id.
    pub fn delete(&mut self, id: u32) -> Result<bool> {
        let tx = self.conn.transaction()?;
        let affected = tx.execute(DELETE_HARVEST, params![id])?;
        tx.commit()?;

        Ok(affected > 0)
    }

    pub fn statistics(&mut self) -> Result<HarvestStatistics> {
        let stats = self.conn.query_row(SELECT_STATISTICS, [], |row| {
            Ok(HarvestStatistics {
                count: row.get(0)?,
                total_area: row.get::<_, Option<f64>>(1)?.unwrap_or(0.0),
                mean_loss_pct: row.get::<_, Option<f64>>(2)?.unwrap_or(0.0),
                min_loss_pct: row.get::<_, Option<f64>>(3)?.unwrap_or(0.0),
                max_loss_pct: row.get::<_, Option<f64>>(4)?.unwrap_or(0.0),
                total_tonnes_lost: row.get::<_, Option<f64>>(5)?.unwrap_or(0.0),
                total_financial_loss: row.get::<_, Option<f64>>(6)?.unwrap_or(0.0),
            })
        })?;

        Ok(stats)
    }
}

fn map_harvest(row: &Row) -> rusqlite::Result<HarvestRecord> {
    let weather: String = row.get(9)?;
    let tier: String = row.get(16)?;

    Ok(HarvestRecord {
        id: row.get(0)?,
        farm: row.get(1)?,
        area_ha: row.get(2)?,
        variety: CaneVariety::from(row.get::<_, String>(3)?),
        expected_yield: row.get(4)?,
        loss_pct: row.get(5)?,
        price_per_tonne: row.get(6)?,
        harvester: HarvesterBrand::from(row.get::<_, String>(7)?),
        speed_kmh: row.get(8)?,
        weather: weather
            .parse::<Weather>()
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(9, Type::Text, Box::new(e)))?,
        harvest_date: row.get(10)?,
        notes: row.get(11)?,
        tonnes_harvested: row.get(12)?,
        tonnes_lost: row.get(13)?,
        financial_loss: row.get(14)?,
        efficiency: row.get(15)?,
        tier: tier
            .parse::<LossTier>()
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(16, Type::Text, Box::new(e)))?,
    })
}
