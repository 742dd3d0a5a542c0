#[cfg(test)]
mod tests {
    use canetrack::libs::error::HarvestError;
    use canetrack::libs::harvest::NewHarvest;
    use canetrack::libs::validation;
    use chrono::NaiveDate;

    fn field_of(error: HarvestError) -> String {
        match error {
            HarvestError::Validation { field, .. } => field,
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_parse_positive() {
        assert_eq!(validation::parse_positive("50", "area").unwrap(), 50.0);
        assert_eq!(validation::parse_positive(" 12,5 ", "area").unwrap(), 12.5);
        assert_eq!(field_of(validation::parse_positive("0", "area").unwrap_err()), "area");
        assert!(validation::parse_positive("-3", "yield").is_err());
        assert!(validation::parse_positive("abc", "yield").is_err());
        assert!(validation::parse_positive("NaN", "yield").is_err());
    }

    #[test]
    fn test_parse_percentage() {
        assert_eq!(validation::parse_percentage("0", "loss").unwrap(), 0.0);
        assert_eq!(validation::parse_percentage("100", "loss").unwrap(), 100.0);
        assert_eq!(validation::parse_percentage("4.5", "loss").unwrap(), 4.5);
        assert!(validation::parse_percentage("100.01", "loss").is_err());
        assert!(validation::parse_percentage("-0.5", "loss").is_err());
    }

    #[test]
    fn test_speed_bounds() {
        assert!(validation::check_speed(0.0).is_err());
        assert!(validation::check_speed(0.1).is_ok());
        assert!(validation::check_speed(validation::MAX_SPEED_KMH).is_ok());
        assert!(validation::check_speed(20.5).is_err());
        assert_eq!(validation::parse_speed("5,5").unwrap(), 5.5);
    }

    #[test]
    fn test_parse_positive_int() {
        assert_eq!(validation::parse_positive_int(" 3 ", "id").unwrap(), 3);
        assert!(validation::parse_positive_int("0", "id").is_err());
        assert!(validation::parse_positive_int("1.5", "id").is_err());
        assert!(validation::parse_positive_int("-2", "id").is_err());
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(validation::non_empty("  Sao Joao ", "farm").unwrap(), "Sao Joao");
        assert_eq!(field_of(validation::non_empty("   ", "farm").unwrap_err()), "farm");
    }

    #[test]
    fn test_parse_date() {
        let expected = NaiveDate::from_ymd_opt(2024, 5, 10).unwrap();
        assert_eq!(validation::parse_date("2024-05-10").unwrap(), expected);
        assert_eq!(validation::parse_date("10/05/2024").unwrap(), expected);
        assert!(validation::parse_date("TODAY").is_ok());
        assert!(validation::parse_date("2024-13-01").is_err());
        assert!(validation::parse_date("yesterday").is_err());
    }

    #[test]
    fn test_validate_new_harvest() {
        assert!(validation::validate_new_harvest(&NewHarvest::new()).is_ok());

        let valid = NewHarvest::new().farm("Sao Joao").area(50.0).expected_yield(95.0).loss(4.5).speed(5.5);
        assert!(validation::validate_new_harvest(&valid).is_ok());

        let bad_loss = valid.clone().loss(120.0);
        assert_eq!(field_of(validation::validate_new_harvest(&bad_loss).unwrap_err()), "loss");

        let bad_speed = valid.clone().speed(35.0);
        assert_eq!(field_of(validation::validate_new_harvest(&bad_speed).unwrap_err()), "speed");

        let blank_farm = valid.farm(" ");
        assert_eq!(field_of(validation::validate_new_harvest(&blank_farm).unwrap_err()), "farm");
    }
}
