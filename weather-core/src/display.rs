//! Presentation helpers for rendering a [`WeatherReading`](crate::WeatherReading).

/// Rounded temperature followed by its unit, or `N/A` when absent.
pub fn format_temperature(value: Option<f64>, unit: &str) -> String {
    match value {
        // `+ 0.0` folds -0 into 0
        Some(value) => format!("{}{unit}", value.round() + 0.0),
        None => "N/A".to_string(),
    }
}

/// Upper-case the first letter of each space-separated word and lower-case the rest.
pub fn capitalize_words(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
