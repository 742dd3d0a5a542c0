//! In-memory registry of harvest records.
//!
//! The registry owns an insertion-ordered list of [`HarvestRecord`]s and a
//! monotonically increasing identifier counter. Identifiers start at 1, are
//! never reused after removal and reset only when a new registry is built.
//!
//! Records leave the registry as clones: mutating a returned record does not
//! change registry state. Every operation is synchronous and either applies
//! completely or not at all. There is no internal locking; hosts sharing a
//! registry across threads must wrap it in their own mutex.
//!
//! ## Usage
//!
//! ```rust
//! use canetrack::libs::harvest::{HarvestUpdate, NewHarvest, Weather};
//! use canetrack::libs::registry::HarvestRegistry;
//!
//! let mut registry = HarvestRegistry::default();
//! let (id, record) = registry.add(
//!     NewHarvest::new()
//!         .farm("Sao Joao")
//!         .area(50.0)
//!         .variety("RB867515")
//!         .expected_yield(95.0)
//!         .loss(4.5)
//!         .price(120.0)
//!         .harvester("John Deere")
//!         .speed(5.5)
//!         .weather(Weather::Sunny),
//! )?;
//! assert_eq!(record.tonnes_lost, 213.75);
//!
//! registry.update(id, &HarvestUpdate { loss_pct: Some(9.0), ..Default::default() })?;
//! # Ok::<(), canetrack::libs::error::HarvestError>(())
//! ```

use super::config::HarvestConfig;
use super::error::{HarvestError, HarvestResult};
use super::harvest::{HarvestRecord, HarvestUpdate, NewHarvest};
use super::metrics::{self, round2, LossStatistics, LossTier};
use serde::Serialize;
use std::collections::BTreeMap;

/// Totals over every stored record.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct RegistryStatistics {
    pub count: usize,
    pub total_area: f64,
    pub mean_loss_pct: f64,
    pub total_financial_loss: f64,
    pub total_tonnes_lost: f64,
    pub mean_efficiency: f64,
}

/// Per-farm averages used for the efficiency ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FarmRanking {
    pub farm: String,
    pub count: usize,
    pub mean_efficiency: f64,
    pub mean_loss_pct: f64,
}

/// Per-variety totals.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct VarietyTotals {
    pub count: usize,
    pub total_area: f64,
    pub mean_loss_pct: f64,
}

#[derive(Debug, Clone)]
pub struct HarvestRegistry {
    records: Vec<HarvestRecord>,
    next_id: u32,
    config: HarvestConfig,
}

impl Default for HarvestRegistry {
    fn default() -> Self {
        Self::new(HarvestConfig::default())
    }
}

impl HarvestRegistry {
    pub fn new(config: HarvestConfig) -> Self {
        HarvestRegistry {
            records: Vec::new(),
            next_id: 1,
            config,
        }
    }

    pub fn config(&self) -> &HarvestConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Registers a harvest and returns its new identifier with a snapshot.
    ///
    /// Duplicate content is accepted. The counter only advances on success.
    pub fn add(&mut self, new: NewHarvest) -> HarvestResult<(u32, HarvestRecord)> {
        let id = self.next_id;
        let record = HarvestRecord::build(id, new, &self.config)?;

        self.next_id += 1;
        self.records.push(record.clone());
        tracing::debug!(id, farm = %record.farm, tier = %record.tier, "harvest registered");

        Ok((id, record))
    }

    pub fn find_by_id(&self, id: u32) -> Option<HarvestRecord> {
        self.records.iter().find(|record| record.id == id).cloned()
    }

    pub fn list_all(&self) -> Vec<HarvestRecord> {
        self.records.clone()
    }

    /// Case-insensitive exact match on the farm name.
    pub fn filter_by_farm(&self, name: &str) -> Vec<HarvestRecord> {
        let needle = name.to_lowercase();
        self.records
            .iter()
            .filter(|record| record.farm.to_lowercase() == needle)
            .cloned()
            .collect()
    }

    pub fn filter_by_classification(&self, tier: LossTier) -> Vec<HarvestRecord> {
        self.records.iter().filter(|record| record.tier == tier).cloned().collect()
    }

    /// Applies the editable fields of `update` to record `id`.
    pub fn update(&mut self, id: u32, update: &HarvestUpdate) -> HarvestResult<()> {
        let record = self
            .records
            .iter_mut()
            .find(|record| record.id == id)
            .ok_or(HarvestError::NotFound(id))?;

        record.apply(update);
        tracing::debug!(id, recomputed = update.loss_pct.is_some(), "harvest updated");

        Ok(())
    }

    pub fn remove(&mut self, id: u32) -> HarvestResult<()> {
        let position = self
            .records
            .iter()
            .position(|record| record.id == id)
            .ok_or(HarvestError::NotFound(id))?;

        let removed = self.records.remove(position);
        tracing::debug!(id, farm = %removed.farm, "harvest removed");

        Ok(())
    }

    /// Sums and means over every record, rounded to two decimals.
    pub fn statistics(&self) -> RegistryStatistics {
        if self.records.is_empty() {
            return RegistryStatistics::default();
        }

        let count = self.records.len();
        let total_area: f64 = self.records.iter().map(|r| r.area_ha).sum();
        let loss_sum: f64 = self.records.iter().map(|r| r.loss_pct).sum();
        let total_financial_loss: f64 = self.records.iter().map(|r| r.financial_loss).sum();
        let total_tonnes_lost: f64 = self.records.iter().map(|r| r.tonnes_lost).sum();
        let efficiency_sum: f64 = self.records.iter().map(|r| r.efficiency).sum();

        RegistryStatistics {
            count,
            total_area: round2(total_area),
            mean_loss_pct: round2(loss_sum / count as f64),
            total_financial_loss: round2(total_financial_loss),
            total_tonnes_lost: round2(total_tonnes_lost),
            mean_efficiency: round2(efficiency_sum / count as f64),
        }
    }

    pub fn loss_statistics(&self) -> LossStatistics {
        let losses: Vec<f64> = self.records.iter().map(|r| r.loss_pct).collect();
        metrics::loss_statistics(&losses)
    }

    /// Farms ordered by mean efficiency, best first.
    ///
    /// Grouping is case-sensitive. Farms with equal efficiency keep the order
    /// in which they were first registered.
    pub fn farm_ranking(&self) -> Vec<FarmRanking> {
        // (farm, count, efficiency sum, loss sum) in first-seen order
        let mut groups: Vec<(&str, usize, f64, f64)> = Vec::new();

        for record in &self.records {
            match groups.iter_mut().find(|(farm, ..)| *farm == record.farm) {
                Some(group) => {
                    group.1 += 1;
                    group.2 += record.efficiency;
                    group.3 += record.loss_pct;
                }
                None => groups.push((record.farm.as_str(), 1, record.efficiency, record.loss_pct)),
            }
        }

        let mut ranking: Vec<FarmRanking> = groups
            .into_iter()
            .map(|(farm, count, efficiency_sum, loss_sum)| FarmRanking {
                farm: farm.to_string(),
                count,
                mean_efficiency: efficiency_sum / count as f64,
                mean_loss_pct: loss_sum / count as f64,
            })
            .collect();

        ranking.sort_by(|a, b| b.mean_efficiency.total_cmp(&a.mean_efficiency));
        ranking
    }

    /// Count, area and mean loss grouped by exact variety label.
    pub fn totals_by_cane_variety(&self) -> BTreeMap<String, VarietyTotals> {
        let mut totals: BTreeMap<String, (usize, f64, f64)> = BTreeMap::new();

        for record in &self.records {
            let entry = totals.entry(record.variety.to_string()).or_insert((0, 0.0, 0.0));
            entry.0 += 1;
            entry.1 += record.area_ha;
            entry.2 += record.loss_pct;
        }

        totals
            .into_iter()
            .map(|(variety, (count, total_area, loss_sum))| {
                (
                    variety,
                    VarietyTotals {
                        count,
                        total_area,
                        mean_loss_pct: loss_sum / count as f64,
                    },
                )
            })
            .collect()
    }
}
