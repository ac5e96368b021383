use serde::{Deserialize, Serialize};

use crate::aggregates::{DashboardSummary, LowStock};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Critical,
    Warning,
    Info,
}

impl AlertSeverity {
    pub fn css_class(&self) -> &'static str {
        match self {
            AlertSeverity::Critical => "critical",
            AlertSeverity::Warning => "warning",
            AlertSeverity::Info => "info",
        }
    }
}

/// One banner in the dashboard alerts section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardAlert {
    pub severity: AlertSeverity,
    pub message: String,
    /// Short call to action shown on the right of the banner
    pub action: String,
}

impl DashboardAlert {
    pub fn new(severity: AlertSeverity, message: String, action: &str) -> Self {
        Self {
            severity,
            message,
            action: action.to_string(),
        }
    }
}

/// Alert banners for the backend's counts. A banner only exists when its
/// count is above zero; the low-stock banner only when at least one type is
/// low.
pub fn dashboard_alerts(summary: &DashboardSummary, low_stock: &LowStock) -> Vec<DashboardAlert> {
    let mut alerts = Vec::new();

    if summary.expired_units > 0 {
        alerts.push(DashboardAlert::new(
            AlertSeverity::Critical,
            format!("{} units have expired", summary.expired_units),
            "Action required",
        ));
    }

    if summary.expiring_24h > 0 {
        alerts.push(DashboardAlert::new(
            AlertSeverity::Critical,
            format!("{} units expiring within 24 hours", summary.expiring_24h),
            "Critical",
        ));
    }

    if summary.expiring_7days > 0 {
        alerts.push(DashboardAlert::new(
            AlertSeverity::Warning,
            format!("{} units expiring within 7 days", summary.expiring_7days),
            "Warning",
        ));
    }

    if !low_stock.is_empty() {
        let types: Vec<&str> = low_stock.keys().map(|bt| bt.as_str()).collect();
        alerts.push(DashboardAlert::new(
            AlertSeverity::Warning,
            format!("Low Stock Units: {}", types.join(", ")),
            "Restock needed",
        ));
    }

    if summary.urgent_requests > 0 {
        alerts.push(DashboardAlert::new(
            AlertSeverity::Info,
            format!("{} urgent requests pending", summary.urgent_requests),
            "Review needed",
        ));
    }

    alerts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BloodType;

    #[test]
    fn test_quiet_dashboard_has_no_alerts() {
        let alerts = dashboard_alerts(&DashboardSummary::default(), &LowStock::new());
        assert!(alerts.is_empty());
    }

    #[test]
    fn test_empty_low_stock_suppresses_banner() {
        let summary = DashboardSummary {
            expired_units: 2,
            ..DashboardSummary::default()
        };
        let alerts = dashboard_alerts(&summary, &LowStock::new());

        assert_eq!(alerts.len(), 1);
        assert!(alerts.iter().all(|a| !a.message.starts_with("Low Stock")));
    }

    #[test]
    fn test_low_stock_lists_types_in_order() {
        let mut low_stock = LowStock::new();
        low_stock.insert(BloodType::ONegative, 1);
        low_stock.insert(BloodType::ANegative, 3);

        let alerts = dashboard_alerts(&DashboardSummary::default(), &low_stock);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].severity, AlertSeverity::Warning);
        assert_eq!(alerts[0].message, "Low Stock Units: A-, O-");
    }

    #[test]
    fn test_alert_order_and_severity() {
        let summary = DashboardSummary {
            expired_units: 1,
            expiring_24h: 2,
            expiring_7days: 5,
            urgent_requests: 4,
            ..DashboardSummary::default()
        };
        let alerts = dashboard_alerts(&summary, &LowStock::new());

        let severities: Vec<_> = alerts.iter().map(|a| a.severity).collect();
        assert_eq!(
            severities,
            vec![
                AlertSeverity::Critical,
                AlertSeverity::Critical,
                AlertSeverity::Warning,
                AlertSeverity::Info,
            ]
        );
        assert_eq!(alerts[3].message, "4 urgent requests pending");
    }
}
