use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::{BloodType, Donor};
use crate::resource::EntityId;

/// Available units per blood type
pub type InventoryByType = BTreeMap<BloodType, u32>;

/// Blood types whose available count is under the requested threshold.
/// Empty when every type is stocked.
pub type LowStock = BTreeMap<BloodType, u32>;

/// Counts computed by the backend for the dashboard. Missing counters read
/// as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardSummary {
    /// The backend's operational date (YYYY-MM-DD)
    pub system_date: String,
    pub total_donors: u32,
    /// Donors whose last donation is outside the backend's eligibility window
    pub eligible_donors: u32,
    pub total_hospitals: u32,
    pub total_units: u32,
    pub available_units: u32,
    pub expiring_24h: u32,
    pub expiring_7days: u32,
    pub expired_units: u32,
    pub urgent_requests: u32,
    pub pending_requests: u32,
    pub completed_requests_today: u32,
    pub inventory_by_type: InventoryByType,
}

/// Donors collected at one blood drive
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DonorsByDrive {
    pub drive_id: EntityId,
    pub donor_count: u32,
    pub donors: Vec<Donor>,
}

/// Result of the operator "mark expired" action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkExpiredResponse {
    pub message: String,
    pub count: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_defaults_missing_counters() {
        let summary: DashboardSummary =
            serde_json::from_str(r#"{"system_date": "2025-12-01", "expired_units": 3}"#).unwrap();
        assert_eq!(summary.system_date, "2025-12-01");
        assert_eq!(summary.expired_units, 3);
        assert_eq!(summary.urgent_requests, 0);
        assert!(summary.inventory_by_type.is_empty());
    }

    #[test]
    fn test_inventory_keys_are_blood_type_labels() {
        let inventory: InventoryByType =
            serde_json::from_str(r#"{"AB-": 2, "A+": 12, "O-": 0}"#).unwrap();
        let ordered: Vec<_> = inventory.keys().map(|bt| bt.as_str()).collect();
        assert_eq!(ordered, vec!["A+", "AB-", "O-"]);
        assert_eq!(inventory[&BloodType::APositive], 12);
    }
}
