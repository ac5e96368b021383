use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use log::LevelFilter;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api";

/// Runtime settings for the dashboard
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Root of the REST API, without a trailing slash
    pub api_base_url: String,
    /// Fixed "today" for expiry math and completion stamps. `None` uses the
    /// browser clock.
    pub operational_date: Option<NaiveDate>,
    /// Horizon for the inventory "expiring soon" banner
    pub inventory_expiry_horizon_days: u32,
    /// Horizon for the dashboard expiring-units table
    pub dashboard_expiry_horizon_days: u32,
    /// Blood types with fewer available units than this are low stock
    pub low_stock_threshold: u32,
    /// Rows shown in the dashboard expiring-units table
    pub dashboard_expiring_rows: usize,
    pub log_level: LevelFilter,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            operational_date: None,
            inventory_expiry_horizon_days: 20,
            dashboard_expiry_horizon_days: 7,
            low_stock_threshold: 5,
            dashboard_expiring_rows: 10,
            log_level: LevelFilter::Info,
        }
    }
}

impl AppConfig {
    /// Defaults overridden by `BLOODBANK_API_URL`, `BLOODBANK_OPERATIONAL_DATE`
    /// and `BLOODBANK_LOG_LEVEL` as seen at build time.
    pub fn from_build_env() -> Result<Self> {
        Self::with_overrides(
            option_env!("BLOODBANK_API_URL"),
            option_env!("BLOODBANK_OPERATIONAL_DATE"),
            option_env!("BLOODBANK_LOG_LEVEL"),
        )
    }

    pub fn with_overrides(
        api_url: Option<&str>,
        operational_date: Option<&str>,
        log_level: Option<&str>,
    ) -> Result<Self> {
        let mut config = Self::default();

        if let Some(url) = api_url {
            config.api_base_url = parse_base_url(url)?;
        }

        if let Some(date) = operational_date.map(str::trim).filter(|d| !d.is_empty()) {
            let parsed = NaiveDate::parse_from_str(date, "%Y-%m-%d")
                .with_context(|| format!("BLOODBANK_OPERATIONAL_DATE is not YYYY-MM-DD: {date}"))?;
            config.operational_date = Some(parsed);
        }

        if let Some(level) = log_level {
            config.log_level = level
                .trim()
                .parse()
                .with_context(|| format!("BLOODBANK_LOG_LEVEL is not a log level: {level}"))?;
        }

        Ok(config)
    }
}

fn parse_base_url(raw: &str) -> Result<String> {
    let url = raw.trim().trim_end_matches('/');
    if url.is_empty() {
        bail!("BLOODBANK_API_URL is empty");
    }
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        bail!("BLOODBANK_API_URL must start with http:// or https://: {url}");
    }
    Ok(url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.api_base_url, "http://localhost:5000/api");
        assert_eq!(config.inventory_expiry_horizon_days, 20);
        assert_eq!(config.dashboard_expiry_horizon_days, 7);
        assert_eq!(config.low_stock_threshold, 5);
        assert_eq!(config.dashboard_expiring_rows, 10);
        assert!(config.operational_date.is_none());
    }

    #[test]
    fn test_overrides_apply() {
        let config = AppConfig::with_overrides(
            Some("https://bank.example.org/api/"),
            Some("2025-12-01"),
            Some("debug"),
        )
        .unwrap();

        assert_eq!(config.api_base_url, "https://bank.example.org/api");
        assert_eq!(config.operational_date, NaiveDate::from_ymd_opt(2025, 12, 1));
        assert_eq!(config.log_level, LevelFilter::Debug);
    }

    #[test]
    fn test_blank_date_keeps_browser_clock() {
        let config = AppConfig::with_overrides(None, Some("  "), None).unwrap();
        assert!(config.operational_date.is_none());
    }

    #[test]
    fn test_bad_values_are_reported() {
        let err = AppConfig::with_overrides(None, Some("12/01/2025"), None).unwrap_err();
        assert!(err.to_string().contains("BLOODBANK_OPERATIONAL_DATE"));

        assert!(AppConfig::with_overrides(Some("localhost:5000"), None, None).is_err());
        assert!(AppConfig::with_overrides(None, None, Some("loud")).is_err());
    }
}
