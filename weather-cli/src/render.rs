use serde_json::json;
use weather_core::{
    Comparison, WeatherReading,
    display::{capitalize_words, format_temperature},
};

pub fn card(reading: &WeatherReading) -> String {
    let mut lines = vec![
        capitalize_words(&reading.city),
        format!(
            "  {}  {}",
            format_temperature(reading.temperature, &reading.temperature_unit),
            reading.description
        ),
    ];

    if let Some(wind) = reading.wind_speed {
        lines.push(format!("  Wind: {wind} {}", reading.wind_speed_unit));
    }

    lines.push(format!("  Updated: {}", reading.timestamp.format("%Y-%m-%d %H:%M:%S UTC")));
    lines.join("\n")
}

/// Cards in input order, with an error line in place of each failed entry.
pub fn comparison(inputs: &[String], comparison: &Comparison) -> String {
    let mut blocks = Vec::new();

    for (index, input) in inputs.iter().enumerate() {
        if let Some(reading) = comparison.results.get(&index) {
            blocks.push(card(reading));
        } else if let Some(err) = comparison.errors.get(&index) {
            blocks.push(format!("{}\n  Error: {err}", input.trim()));
        }
    }

    if blocks.is_empty() {
        return "No cities to compare.".to_string();
    }

    blocks.join("\n\n")
}

/// One-line tally of a comparison, e.g. `2 succeeded, 1 failed`.
pub fn summary(comparison: &Comparison) -> String {
    format!(
        "{} succeeded, {} failed",
        comparison.results.len(),
        comparison.errors.len()
    )
}

pub fn comparison_json(comparison: &Comparison) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&json!({
        "results": comparison.results,
        "errors": comparison.errors,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use weather_core::WeatherError;

    fn reading(city: &str, wind_speed: Option<f64>) -> WeatherReading {
        WeatherReading {
            city: city.to_string(),
            temperature: Some(22.5),
            temperature_unit: "°C".into(),
            description: "Mainly clear".into(),
            weather_code: Some(1),
            wind_speed,
            wind_speed_unit: "km/h".into(),
            timestamp: Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn card_shows_capitalized_city_and_rounded_temperature() {
        let text = card(&reading("new york", Some(4.2)));

        assert!(text.starts_with("New York\n"));
        assert!(text.contains("23°C  Mainly clear"));
        assert!(text.contains("Wind: 4.2 km/h"));
        assert!(text.contains("2026-10-19 12:00:00 UTC"));
    }

    #[test]
    fn card_omits_missing_wind() {
        assert!(!card(&reading("oslo", None)).contains("Wind"));
    }

    #[test]
    fn comparison_keeps_input_order_and_skips_blanks() {
        let inputs = vec!["London".to_string(), "  ".to_string(), "Unknown City".to_string()];
        let mut outcome = Comparison::default();
        outcome.results.insert(0, reading("London", None));
        outcome.errors.insert(2, WeatherError::not_found("Unknown City"));

        let text = comparison(&inputs, &outcome);

        let london = text.find("London").unwrap();
        let unknown = text.find("Error: City \"Unknown City\" not found").unwrap();
        assert!(london < unknown);
    }

    #[test]
    fn summary_counts_results_and_errors() {
        let mut outcome = Comparison::default();
        outcome.results.insert(0, reading("London", None));
        outcome.results.insert(3, reading("Paris", None));
        outcome.errors.insert(2, WeatherError::not_found("Unknown City"));

        assert_eq!(summary(&outcome), "2 succeeded, 1 failed");
        assert_eq!(summary(&Comparison::default()), "0 succeeded, 0 failed");
    }

    #[test]
    fn empty_comparison_message() {
        assert_eq!(comparison(&[], &Comparison::default()), "No cities to compare.");
    }

    #[test]
    fn comparison_json_keys_by_index() {
        let mut outcome = Comparison::default();
        outcome.errors.insert(1, WeatherError::not_found("Atlantis"));

        let text = comparison_json(&outcome).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["errors"]["1"]["kind"], "notFound");
        assert!(value["results"].as_object().unwrap().is_empty());
    }
}
