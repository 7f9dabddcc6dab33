//! Best-effort weather field extraction from advisory prose.
//!
//! Scans the engine's free text for temperature, humidity, and a coarse
//! condition keyword so the frontend can show structured chips. Purely
//! a display aid: order-sensitive, first-match, no correctness
//! guarantee. Finding nothing is a valid outcome, not an error.

use regex::Regex;
use std::sync::LazyLock;

use gt_protocol::{AdvisoryResult, WeatherConditions};

/// First run of digits, optionally followed by a degree sign and C/F.
static TEMPERATURE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)°?[CF]?").expect("valid temperature pattern"));

/// Digits adjacent to a `%` that sits near the word "humidity".
static HUMIDITY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+)%.*humidity|humidity.*(\d+)%").expect("valid humidity pattern")
});

/// Condition keywords in priority order: multi-word phrases before the
/// shorter substrings they contain ("partly cloudy" before "cloudy",
/// "overcast" before "clear").
const CONDITION_KEYWORDS: &[&str] = &[
    "partly cloudy",
    "overcast",
    "sunny",
    "cloudy",
    "rainy",
    "windy",
    "clear",
];

/// Extract whatever weather fields the advisory text mentions.
///
/// The search buffer is the summary followed by a JSON rendering of the
/// details mapping; the three scans are independent, so any subset of
/// fields may be present. Returns `None` when all three scans miss.
pub fn extract(result: &AdvisoryResult) -> Option<WeatherConditions> {
    let buffer = format!("{} {}", result.summary, result.details);

    let mut conditions = WeatherConditions::default();

    if let Some(caps) = TEMPERATURE_RE.captures(&buffer) {
        conditions.temperature = caps[1].parse().ok();
    }

    if let Some(caps) = HUMIDITY_RE.captures(&buffer) {
        conditions.humidity = caps
            .get(1)
            .or_else(|| caps.get(2))
            .and_then(|m| m.as_str().parse().ok());
    }

    let lowered = buffer.to_lowercase();
    conditions.condition = CONDITION_KEYWORDS
        .iter()
        .find(|keyword| lowered.contains(*keyword))
        .map(|keyword| (*keyword).to_string());

    if conditions.is_empty() {
        None
    } else {
        Some(conditions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn advisory(summary: &str) -> AdvisoryResult {
        AdvisoryResult::new(summary, json!({}))
    }

    #[test]
    fn extracts_all_three_fields() {
        let result = advisory("22°C with 65% humidity, partly cloudy");
        let wc = extract(&result).unwrap();
        assert_eq!(wc.temperature, Some(22));
        assert_eq!(wc.humidity, Some(65));
        assert_eq!(wc.condition.as_deref(), Some("partly cloudy"));
    }

    #[test]
    fn nothing_found_returns_none() {
        assert!(extract(&advisory("all good")).is_none());
    }

    #[test]
    fn partial_extraction_keeps_found_subset() {
        let wc = extract(&advisory("Expect a sunny afternoon")).unwrap();
        assert!(wc.temperature.is_none());
        assert!(wc.humidity.is_none());
        assert_eq!(wc.condition.as_deref(), Some("sunny"));
    }

    #[test]
    fn multi_word_keyword_shadows_substring() {
        let wc = extract(&advisory("Tomorrow looks partly cloudy at best")).unwrap();
        assert_eq!(wc.condition.as_deref(), Some("partly cloudy"));
    }

    #[test]
    fn overcast_wins_over_clear() {
        // "overcast" contains no "clear", but both appearing picks the
        // higher-priority keyword.
        let wc = extract(&advisory("Overcast now, clear by evening")).unwrap();
        assert_eq!(wc.condition.as_deref(), Some("overcast"));
    }

    #[test]
    fn humidity_word_before_number() {
        let wc = extract(&advisory("humidity around 80%")).unwrap();
        assert_eq!(wc.humidity, Some(80));
    }

    #[test]
    fn scans_details_text_too() {
        let result = AdvisoryResult::new(
            "See per-plant notes",
            json!({"Rose": "Protect from wind; 18°C expected, rainy spells"}),
        );
        let wc = extract(&result).unwrap();
        assert_eq!(wc.temperature, Some(18));
        assert_eq!(wc.condition.as_deref(), Some("rainy"));
    }

    #[test]
    fn first_number_wins_even_without_degree_sign() {
        // The leading digits are taken as temperature whether or not a
        // unit follows; the scan is order-sensitive.
        let wc = extract(&advisory("3 plants need water at 65% humidity")).unwrap();
        assert_eq!(wc.temperature, Some(3));
        assert_eq!(wc.humidity, Some(65));
    }
}
