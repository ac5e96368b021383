use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::services::config::AppConfig;

/// Local wall-clock time from the browser
pub fn browser_now() -> NaiveDateTime {
    use js_sys::Date;
    let now = Date::new_0();
    let year = now.get_full_year() as i32;
    let month = now.get_month() + 1; // JavaScript months are 0-indexed
    let day = now.get_date();

    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(now.get_hours(), now.get_minutes(), now.get_seconds()))
        .unwrap_or_default()
}

/// "Now" for expiry math. A configured operational date is taken at midnight.
pub fn operational_now(config: &AppConfig) -> NaiveDateTime {
    match config.operational_date {
        Some(date) => date.and_time(NaiveTime::MIN),
        None => browser_now(),
    }
}

/// "Today" for form defaults and completion stamps
pub fn operational_today(config: &AppConfig) -> NaiveDate {
    operational_now(config).date()
}

/// YYYY-MM-DD, the format of `<input type="date">` and of the backend
pub fn format_input_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn format_optional_date(date: Option<NaiveDate>) -> String {
    date.map(format_input_date).unwrap_or_else(|| "N/A".to_string())
}

/// An empty or malformed date input reads as no date
pub fn parse_input_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

/// Format YYYY-MM-DD date string for display, e.g. "December 1, 2025"
pub fn format_date_for_display(date_str: &str) -> String {
    match parse_input_date(date_str) {
        Some(date) => date.format("%B %-d, %Y").to_string(),
        None => date_str.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operational_date_pins_midnight() {
        let config = AppConfig {
            operational_date: NaiveDate::from_ymd_opt(2025, 12, 1),
            ..AppConfig::default()
        };
        let now = operational_now(&config);
        assert_eq!(now.time(), NaiveTime::MIN);
        assert_eq!(operational_today(&config), NaiveDate::from_ymd_opt(2025, 12, 1).unwrap());
    }

    #[test]
    fn test_input_dates() {
        assert_eq!(parse_input_date("2025-12-04"), NaiveDate::from_ymd_opt(2025, 12, 4));
        assert_eq!(parse_input_date(""), None);
        assert_eq!(parse_input_date("12/04/2025"), None);
        assert_eq!(format_optional_date(None), "N/A");
        assert_eq!(format_optional_date(NaiveDate::from_ymd_opt(2025, 1, 9)), "2025-01-09");
    }

    #[test]
    fn test_display_format() {
        assert_eq!(format_date_for_display("2025-12-01"), "December 1, 2025");
        assert_eq!(format_date_for_display("not a date"), "not a date");
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod browser_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_unpinned_config_follows_browser_clock() {
        let config = AppConfig::default();
        let today = operational_today(&config);
        assert!(today >= NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
    }
}
