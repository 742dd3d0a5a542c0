#[cfg(test)]
mod tests {
    use canetrack::db::harvests::{HarvestFilter, Harvests};
    use canetrack::libs::config::HarvestConfig;
    use canetrack::libs::harvest::{HarvestUpdate, NewHarvest, Weather};
    use canetrack::libs::metrics::LossTier;
    use chrono::NaiveDate;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct MirrorTestContext {
        _temp_dir: TempDir,
        harvests: Harvests,
        config: HarvestConfig,
    }

    impl TestContext for MirrorTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let harvests = Harvests::open(&temp_dir.path().join("canetrack.db")).unwrap();
            MirrorTestContext {
                _temp_dir: temp_dir,
                harvests,
                config: HarvestConfig::default(),
            }
        }
    }

    fn harvest(farm: &str, loss: f64, day: u32) -> NewHarvest {
        NewHarvest::new()
            .farm(farm)
            .area(50.0)
            .variety("SP81-3250")
            .expected_yield(95.0)
            .loss(loss)
            .harvester("New Holland")
            .speed(6.0)
            .weather(Weather::PartlyCloudy)
            .date(NaiveDate::from_ymd_opt(2024, 7, day).unwrap())
    }

    #[test_context(MirrorTestContext)]
    #[test]
    fn test_insert_and_get(ctx: &mut MirrorTestContext) {
        let id = ctx.harvests.insert_new(harvest("Sao Joao", 4.5, 1).notes("First cut"), &ctx.config).unwrap();
        assert_eq!(id, 1);

        let record = ctx.harvests.get_by_id(id).unwrap().unwrap();
        assert_eq!(record.id, 1);
        assert_eq!(record.farm, "Sao Joao");
        assert_eq!(record.variety.label(), "SP81-3250");
        assert_eq!(record.weather, Weather::PartlyCloudy);
        assert_eq!(record.price_per_tonne, 120.0);
        assert_eq!(record.tonnes_lost, 213.75);
        assert_eq!(record.financial_loss, 25650.0);
        assert_eq!(record.tier, LossTier::Optimal);
        assert_eq!(record.notes, "First cut");

        assert!(ctx.harvests.get_by_id(42).unwrap().is_none());
    }

    #[test_context(MirrorTestContext)]
    #[test]
    fn test_insert_missing_field_fails(ctx: &mut MirrorTestContext) {
        let mut incomplete = harvest("Sao Joao", 4.5, 1);
        incomplete.speed_kmh = None;

        assert!(ctx.harvests.insert_new(incomplete, &ctx.config).is_err());
        assert!(ctx.harvests.list(None).unwrap().is_empty());
    }

    #[test_context(MirrorTestContext)]
    #[test]
    fn test_list_newest_first(ctx: &mut MirrorTestContext) {
        ctx.harvests.insert_new(harvest("A", 4.0, 3), &ctx.config).unwrap();
        ctx.harvests.insert_new(harvest("B", 4.0, 9), &ctx.config).unwrap();
        ctx.harvests.insert_new(harvest("C", 4.0, 5), &ctx.config).unwrap();

        let all = ctx.harvests.list(None).unwrap();
        assert_eq!(all.iter().map(|r| r.farm.as_str()).collect::<Vec<_>>(), vec!["B", "C", "A"]);

        let limited = ctx.harvests.fetch(HarvestFilter::Recent(Some(2))).unwrap();
        assert_eq!(limited.len(), 2);
        assert_eq!(limited[0].farm, "B");
    }

    #[test_context(MirrorTestContext)]
    #[test]
    fn test_filters(ctx: &mut MirrorTestContext) {
        ctx.harvests.insert_new(harvest("Fazenda Sao Joao", 11.0, 1), &ctx.config).unwrap();
        ctx.harvests.insert_new(harvest("Boa Vista", 9.0, 2), &ctx.config).unwrap();
        ctx.harvests.insert_new(harvest("SAO JOAO II", 3.0, 3), &ctx.config).unwrap();

        let by_farm = ctx.harvests.by_farm("sao joao").unwrap();
        assert_eq!(by_farm.len(), 2);

        let regular = ctx.harvests.by_tier(LossTier::Regular).unwrap();
        assert_eq!(regular.iter().map(|r| r.loss_pct).collect::<Vec<_>>(), vec![9.0, 11.0]);
        assert!(ctx.harvests.by_tier(LossTier::Critical).unwrap().is_empty());
    }

    #[test_context(MirrorTestContext)]
    #[test]
    fn test_farm_search_folds_accented_capitals(ctx: &mut MirrorTestContext) {
        ctx.harvests.insert_new(harvest("SÃO JOÃO", 4.0, 1), &ctx.config).unwrap();
        ctx.harvests.insert_new(harvest("Usina Ipê", 4.0, 2), &ctx.config).unwrap();

        assert_eq!(ctx.harvests.by_farm("são joão").unwrap().len(), 1);
        assert_eq!(ctx.harvests.by_farm("SÃO JOÃO").unwrap().len(), 1);
        assert_eq!(ctx.harvests.by_farm("sÃo").unwrap()[0].farm, "SÃO JOÃO");
        assert_eq!(ctx.harvests.by_farm("IPÊ").unwrap()[0].farm, "Usina Ipê");
        assert!(ctx.harvests.by_farm("jose").unwrap().is_empty());
    }

    #[test_context(MirrorTestContext)]
    #[test]
    fn test_update_recomputes(ctx: &mut MirrorTestContext) {
        let id = ctx.harvests.insert_new(harvest("Sao Joao", 4.5, 1), &ctx.config).unwrap();

        let update = HarvestUpdate {
            loss_pct: Some(16.0),
            speed_kmh: Some(8.0),
            ..Default::default()
        };
        assert!(ctx.harvests.update(id, &update).unwrap());

        let record = ctx.harvests.get_by_id(id).unwrap().unwrap();
        assert_eq!(record.loss_pct, 16.0);
        assert_eq!(record.speed_kmh, 8.0);
        assert_eq!(record.tonnes_lost, 760.0);
        assert_eq!(record.efficiency, 84.0);
        assert_eq!(record.tier, LossTier::Critical);

        assert!(!ctx.harvests.update(99, &update).unwrap());
    }

    #[test_context(MirrorTestContext)]
    #[test]
    fn test_delete_does_not_reuse_ids(ctx: &mut MirrorTestContext) {
        ctx.harvests.insert_new(harvest("A", 4.0, 1), &ctx.config).unwrap();
        let second = ctx.harvests.insert_new(harvest("B", 4.0, 2), &ctx.config).unwrap();

        assert!(ctx.harvests.delete(second).unwrap());
        assert!(!ctx.harvests.delete(second).unwrap());

        let third = ctx.harvests.insert_new(harvest("C", 4.0, 3), &ctx.config).unwrap();
        assert_eq!(third, 3);
    }

    #[test_context(MirrorTestContext)]
    #[test]
    fn test_statistics(ctx: &mut MirrorTestContext) {
        let empty = ctx.harvests.statistics().unwrap();
        assert_eq!(empty.count, 0);
        assert_eq!(empty.total_area, 0.0);
        assert_eq!(empty.mean_loss_pct, 0.0);

        ctx.harvests.insert_new(harvest("A", 4.0, 1), &ctx.config).unwrap();
        ctx.harvests.insert_new(harvest("B", 8.0, 2), &ctx.config).unwrap();

        let stats = ctx.harvests.statistics().unwrap();
        assert_eq!(stats.count, 2);
        assert_eq!(stats.total_area, 100.0);
        assert_eq!(stats.mean_loss_pct, 6.0);
        assert_eq!(stats.min_loss_pct, 4.0);
        assert_eq!(stats.max_loss_pct, 8.0);
        assert_eq!(stats.total_tonnes_lost, 570.0);
        assert_eq!(stats.total_financial_loss, 68400.0);
    }
}
