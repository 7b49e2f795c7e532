use chrono::{DateTime, NaiveDate, Utc};

/// Splits a comma-separated query value, dropping blanks.
pub fn split_csv(raw: Option<&str>) -> Vec<String> {
    raw.map(|value| {
        value
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

pub fn parse_bool(raw: Option<&str>) -> Option<bool> {
    match raw.map(|value| value.trim().to_ascii_lowercase()) {
        Some(value) if value == "true" || value == "1" => Some(true),
        Some(value) if value == "false" || value == "0" => Some(false),
        _ => None,
    }
}

/// Accepts RFC 3339 timestamps or bare `YYYY-MM-DD` dates (midnight UTC).
pub fn parse_datetime(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

pub fn non_empty(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn csv_values_are_trimmed() {
        assert_eq!(
            split_csv(Some("pending, confirmed,,")),
            vec!["pending".to_string(), "confirmed".to_string()]
        );
        assert!(split_csv(None).is_empty());
    }

    #[test]
    fn bool_accepts_common_spellings() {
        assert_eq!(parse_bool(Some("TRUE")), Some(true));
        assert_eq!(parse_bool(Some("0")), Some(false));
        assert_eq!(parse_bool(Some("maybe")), None);
    }

    #[test]
    fn bare_dates_parse_as_midnight() {
        let parsed = parse_datetime("2024-03-05").unwrap();
        assert_eq!((parsed.year(), parsed.month(), parsed.day()), (2024, 3, 5));
        assert_eq!(parsed.hour(), 0);
        assert!(parse_datetime("2024-03-05T10:30:00Z").is_some());
        assert!(parse_datetime("yesterday").is_none());
    }
}
