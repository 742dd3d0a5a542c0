#[cfg(test)]
mod tests {
    use canetrack::libs::config::{Config, ExportConfig, HarvestConfig, CONFIG_FILE_NAME};
    use canetrack::libs::data_storage::DataStorage;
    use std::path::PathBuf;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    /// Keeps configuration files in a temporary data directory.
    struct ConfigTestContext {
        _temp_dir: TempDir,
        storage: DataStorage,
    }

    impl TestContext for ConfigTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let storage = DataStorage::at(temp_dir.path().join("canetrack"));
            ConfigTestContext {
                _temp_dir: temp_dir,
                storage,
            }
        }
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.harvest.is_none());
        assert!(config.export.is_none());

        let harvest = config.harvest_or_default();
        assert_eq!(harvest.price_per_tonne, 120.0);
        assert_eq!(harvest.target_loss_pct, 5.0);
        assert_eq!(harvest.alert_loss_pct, 10.0);
        assert_eq!(harvest.critical_loss_pct, 15.0);
        assert_eq!(config.export_or_default(), ExportConfig::default());
    }

    #[test]
    fn test_explicit_values_win_over_defaults() {
        let harvest = HarvestConfig {
            price_per_tonne: 140.0,
            target_loss_pct: 4.0,
            ..HarvestConfig::default()
        };

        assert_eq!(harvest.price_or_default(None), 140.0);
        assert_eq!(harvest.price_or_default(Some(99.5)), 99.5);
        assert_eq!(harvest.target_or_default(None), 4.0);
        assert_eq!(harvest.target_or_default(Some(0.0)), 0.0);
    }

    #[test]
    fn test_thresholds_are_exclusive() {
        let harvest = HarvestConfig::default();
        assert!(!harvest.is_alert(10.0));
        assert!(harvest.is_alert(10.01));
        assert!(!harvest.is_critical(15.0));
        assert!(harvest.is_critical(15.5));
    }

    #[test]
    fn test_partial_file_keeps_defaults_for_missing_sections() {
        let json = r#"{ "harvest": { "price_per_tonne": 130.0, "target_loss_pct": 6.0, "alert_loss_pct": 9.0, "critical_loss_pct": 14.0, "average_yield": 90.0 } }"#;
        let config: Config = serde_json::from_str(json).unwrap();

        assert_eq!(config.harvest_or_default().price_per_tonne, 130.0);
        assert!(config.export.is_none());
        assert_eq!(config.export_or_default().directory, PathBuf::from("data").join("exports"));
    }

    #[test]
    fn test_empty_sections_are_not_serialized() {
        let json = serde_json::to_string(&Config::default()).unwrap();
        assert_eq!(json, "{}");
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_read_nonexistent_config(ctx: &mut ConfigTestContext) {
        let config = Config::read_from(&ctx.storage).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_save_and_read_config(ctx: &mut ConfigTestContext) {
        let config = Config {
            harvest: Some(HarvestConfig {
                price_per_tonne: 135.5,
                target_loss_pct: 4.0,
                alert_loss_pct: 8.0,
                critical_loss_pct: 12.0,
                average_yield: 88.0,
            }),
            export: Some(ExportConfig {
                directory: PathBuf::from("reports"),
                date_format: "%Y-%m-%d".to_string(),
            }),
        };
        config.save_to(&ctx.storage).unwrap();
        assert_eq!(Config::read_from(&ctx.storage).unwrap(), config);

        Config::with_defaults().save_to(&ctx.storage).unwrap();
        let defaults = Config::read_from(&ctx.storage).unwrap();
        assert_eq!(defaults.harvest, Some(HarvestConfig::default()));
        assert_eq!(defaults.export, Some(ExportConfig::default()));
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_invalid_config_file(ctx: &mut ConfigTestContext) {
        let path = ctx.storage.get_path(CONFIG_FILE_NAME).unwrap();
        std::fs::write(path, "{ \"harvest\": 42 }").unwrap();

        assert!(Config::read_from(&ctx.storage).is_err());
    }
}
