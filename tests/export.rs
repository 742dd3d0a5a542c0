#[cfg(test)]
mod tests {
    use canetrack::libs::config::ExportConfig;
    use canetrack::libs::export::{list_exported_files, read_json_export, ExportFormat, Exporter};
    use canetrack::libs::harvest::{NewHarvest, Weather};
    use canetrack::libs::registry::HarvestRegistry;
    use chrono::NaiveDate;
    use std::fs::{self, File};
    use std::time::{Duration, SystemTime};
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct ExportTestContext {
        temp_dir: TempDir,
        registry: HarvestRegistry,
        config: ExportConfig,
    }

    impl TestContext for ExportTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let config = ExportConfig {
                directory: temp_dir.path().join("exports"),
                date_format: "%Y-%m-%d %H:%M".to_string(),
            };

            let mut registry = HarvestRegistry::default();
            for (farm, loss) in [("Sao Joao", 4.5), ("Boa Vista", 13.0)] {
                registry
                    .add(
                        NewHarvest::new()
                            .farm(farm)
                            .area(50.0)
                            .variety("RB867515")
                            .expected_yield(95.0)
                            .loss(loss)
                            .price(120.0)
                            .harvester("Case IH")
                            .speed(5.0)
                            .weather(Weather::Cloudy)
                            .date(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap())
                            .notes("Night shift"),
                    )
                    .unwrap();
            }

            ExportTestContext { temp_dir, registry, config }
        }
    }

    #[test_context(ExportTestContext)]
    #[test]
    fn test_default_path_uses_configured_directory(ctx: &mut ExportTestContext) {
        let exporter = Exporter::new(ExportFormat::Csv, None, &ctx.config);
        let path = exporter.output_path();

        assert_eq!(path.parent().unwrap(), ctx.config.directory.as_path());
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("harvests_"));
        assert!(name.ends_with(".csv"));

        let written = exporter.export(&ctx.registry).unwrap();
        assert!(written.exists());
    }

    #[test_context(ExportTestContext)]
    #[test]
    fn test_json_export_round_trip(ctx: &mut ExportTestContext) {
        let path = ctx.temp_dir.path().join("out").join("harvests.json");
        Exporter::new(ExportFormat::Json, Some(path.clone()), &ctx.config)
            .export(&ctx.registry)
            .unwrap();

        let export = read_json_export(&path).unwrap();
        assert_eq!(export.metadata.record_count, 2);
        assert_eq!(export.metadata.system, "CaneTrack");
        assert_eq!(export.harvests, ctx.registry.list_all());
    }

    #[test_context(ExportTestContext)]
    #[test]
    fn test_csv_export(ctx: &mut ExportTestContext) {
        let path = ctx.temp_dir.path().join("harvests.csv");
        Exporter::new(ExportFormat::Csv, Some(path.clone()), &ctx.config)
            .export(&ctx.registry)
            .unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("ID,Farm,Area (ha)"));
        assert_eq!(lines[1], "1,Sao Joao,50.00,RB867515,95.00,4.50,213.75,25650.00,95.50,Optimal,2024-06-01");
        assert!(lines[2].contains("Boa Vista") && lines[2].ends_with("High,2024-06-01"));
    }

    #[test_context(ExportTestContext)]
    #[test]
    fn test_text_and_excel_exports(ctx: &mut ExportTestContext) {
        let text_path = ctx.temp_dir.path().join("report.txt");
        Exporter::new(ExportFormat::Text, Some(text_path.clone()), &ctx.config)
            .export(&ctx.registry)
            .unwrap();
        let text = fs::read_to_string(&text_path).unwrap();
        assert!(text.contains("SUGARCANE HARVEST LOSS REPORT"));
        assert!(text.contains("Night shift"));

        let excel_path = ctx.temp_dir.path().join("harvests.xlsx");
        Exporter::new(ExportFormat::Excel, Some(excel_path.clone()), &ctx.config)
            .export(&ctx.registry)
            .unwrap();
        assert!(fs::metadata(&excel_path).unwrap().len() > 0);
    }

    #[test_context(ExportTestContext)]
    #[test]
    fn test_empty_registry_exports(ctx: &mut ExportTestContext) {
        let path = ctx.temp_dir.path().join("empty.json");
        Exporter::new(ExportFormat::Json, Some(path.clone()), &ctx.config)
            .export(&HarvestRegistry::default())
            .unwrap();

        let export = read_json_export(&path).unwrap();
        assert_eq!(export.metadata.record_count, 0);
        assert!(export.harvests.is_empty());
    }

    #[test]
    fn test_read_json_export_rejects_garbage() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(read_json_export(&path).is_err());
        assert!(read_json_export(&temp_dir.path().join("missing.json")).is_err());
    }

    #[test]
    fn test_list_exported_files() {
        let temp_dir = tempfile::tempdir().unwrap();
        let dir = temp_dir.path();
        let now = SystemTime::now();

        for (name, age_secs) in [("old.csv", 300), ("new.json", 10), ("middle.xlsx", 60), ("notes.md", 0)] {
            let path = dir.join(name);
            fs::write(&path, "x").unwrap();
            File::options()
                .write(true)
                .open(&path)
                .unwrap()
                .set_modified(now - Duration::from_secs(age_secs))
                .unwrap();
        }
        fs::create_dir(dir.join("nested.txt")).unwrap();

        let files = list_exported_files(dir).unwrap();
        let names: Vec<&str> = files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["new.json", "middle.xlsx", "old.csv"]);
        assert_eq!(files[1].format, ExportFormat::Excel);
        assert_eq!(files[0].size, 1);
    }

    #[test]
    fn test_list_missing_directory_is_empty() {
        let temp_dir = tempfile::tempdir().unwrap();
        let files = list_exported_files(&temp_dir.path().join("nope")).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_format_extensions() {
        assert_eq!(ExportFormat::from_extension("XLSX"), Some(ExportFormat::Excel));
        assert_eq!(ExportFormat::from_extension("pdf"), None);
        assert_eq!(ExportFormat::Text.extension(), "txt");
        assert_eq!(ExportFormat::Json.to_string(), "JSON");
    }
}
