#[cfg(test)]
mod tests {
    use canetrack::libs::metrics::{self, round2, LossTier};

    #[test]
    fn test_reference_harvest() {
        let tonnes = metrics::loss_tonnage(50.0, 95.0, 4.5);
        assert_eq!(tonnes, 213.75);
        assert_eq!(metrics::financial_loss(tonnes, 120.0), 25650.0);
        assert_eq!(metrics::financial_loss_from_inputs(50.0, 95.0, 4.5, 120.0), 25650.0);
        assert_eq!(metrics::harvested_tonnage(50.0, 95.0, 4.5), 4536.25);
        assert_eq!(metrics::efficiency(4.5), 95.5);
        assert_eq!(metrics::classify(4.5), LossTier::Optimal);
    }

    #[test]
    fn test_harvested_plus_lost_is_gross() {
        let areas = [0.5, 1.0, 12.3, 50.0, 333.33];
        let yields = [10.0, 72.5, 95.0, 120.75];
        let losses = [0.0, 0.01, 4.5, 7.77, 12.0, 33.3, 100.0];

        for &area in &areas {
            for &yield_per_ha in &yields {
                for &loss in &losses {
                    let harvested = metrics::harvested_tonnage(area, yield_per_ha, loss);
                    let lost = metrics::loss_tonnage(area, yield_per_ha, loss);
                    let gross = area * yield_per_ha;
                    assert!(
                        (harvested + lost - gross).abs() <= 0.01 + 1e-9,
                        "area={} yield={} loss={}",
                        area,
                        yield_per_ha,
                        loss
                    );
                }
            }
        }
    }

    #[test]
    fn test_classification_boundaries() {
        assert_eq!(metrics::classify(0.0), LossTier::Optimal);
        assert_eq!(metrics::classify(5.0), LossTier::Optimal);
        assert_eq!(metrics::classify(5.01), LossTier::Good);
        assert_eq!(metrics::classify(8.0), LossTier::Good);
        assert_eq!(metrics::classify(8.01), LossTier::Regular);
        assert_eq!(metrics::classify(12.0), LossTier::Regular);
        assert_eq!(metrics::classify(12.01), LossTier::High);
        assert_eq!(metrics::classify(15.0), LossTier::High);
        assert_eq!(metrics::classify(15.01), LossTier::Critical);
        assert_eq!(metrics::classify(100.0), LossTier::Critical);
    }

    #[test]
    fn test_tier_names() {
        let names: Vec<String> = LossTier::ALL.iter().map(ToString::to_string).collect();
        assert_eq!(names, vec!["Optimal", "Good", "Regular", "High", "Critical"]);
        assert_eq!("High".parse::<LossTier>().unwrap(), LossTier::High);
        assert!("Severe".parse::<LossTier>().is_err());
    }

    #[test]
    fn test_efficiency_floor() {
        assert_eq!(metrics::efficiency(0.0), 100.0);
        assert_eq!(metrics::efficiency(100.0), 0.0);
        assert_eq!(metrics::efficiency(120.0), 0.0);
        assert_eq!(metrics::efficiency(12.34), 87.66);
    }

    #[test]
    fn test_no_savings_at_or_below_target() {
        for &(area, yield_per_ha) in &[(1.0, 1.0), (50.0, 95.0), (1000.0, 140.0)] {
            assert_eq!(metrics::potential_savings(area, yield_per_ha, 5.0, 5.0, 120.0), 0.0);
            assert_eq!(metrics::potential_savings(area, yield_per_ha, 3.2, 5.0, 120.0), 0.0);
            assert_eq!(metrics::projected_annual_savings(area, yield_per_ha, 0.0, 5.0, 120.0, 3), 0.0);
        }
    }

    #[test]
    fn test_savings_above_target() {
        // 4750 t * 4.5% = 213.75 t recovered at 120 per tonne
        assert_eq!(metrics::potential_savings(50.0, 95.0, 9.5, 5.0, 120.0), 25650.0);
        assert_eq!(metrics::projected_annual_savings(50.0, 95.0, 9.5, 5.0, 120.0, 2), 51300.0);
    }

    #[test]
    fn test_loss_statistics() {
        let empty = metrics::loss_statistics(&[]);
        assert_eq!(empty.count, 0);
        assert_eq!((empty.mean, empty.min, empty.max), (0.0, 0.0, 0.0));

        let stats = metrics::loss_statistics(&[4.5, 10.0, 7.25]);
        assert_eq!(stats.count, 3);
        assert_eq!(stats.mean, 7.25);
        assert_eq!(stats.min, 4.5);
        assert_eq!(stats.max, 10.0);
    }

    #[test]
    fn test_compare_harvests() {
        let comparison = metrics::compare_harvests((9.0, 4322.5), (4.5, 4536.25));
        assert_eq!(comparison.loss_pct_delta, -4.5);
        assert_eq!(comparison.tonnes_delta, 213.75);
        assert!(comparison.improved);

        let worse = metrics::compare_harvests((4.5, 100.0), (6.0, 90.0));
        assert!(!worse.improved);
        assert_eq!(worse.tonnes_delta, -10.0);
    }

    #[test]
    fn test_rounding_is_consistent() {
        assert_eq!(round2(0.125), 0.13);
        assert_eq!(round2(-0.125), -0.13);
        assert_eq!(round2(213.754_999), 213.75);
    }
}
