//! Values computed from loaded collections for display: cross-entity name
//! resolution, expiry arithmetic and stock levels. Nothing here fails; a
//! dangling reference resolves to a placeholder label.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::index::EntityIndex;
use crate::models::{BloodDrive, BloodType, BloodUnit, Donor, Hospital};
use crate::resource::EntityId;

pub const UNKNOWN_LABEL: &str = "Unknown";
pub const NO_DRIVE_LABEL: &str = "N/A";

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Blood type of the donor, if the donor is known
pub fn donor_blood_type(donors: &EntityIndex<Donor>, donor_id: EntityId) -> Option<BloodType> {
    donors.get(donor_id).map(|donor| donor.blood_type)
}

/// Blood type of the unit's donor, if the unit has one and it is known
pub fn unit_blood_type(donors: &EntityIndex<Donor>, unit: &BloodUnit) -> Option<BloodType> {
    unit.donor_id.and_then(|id| donor_blood_type(donors, id))
}

pub fn resolve_donor_blood_type(donors: &EntityIndex<Donor>, donor_id: EntityId) -> String {
    donor_blood_type(donors, donor_id)
        .map(|bt| bt.to_string())
        .unwrap_or_else(|| UNKNOWN_LABEL.to_string())
}

pub fn resolve_hospital_name(hospitals: &EntityIndex<Hospital>, hospital_id: EntityId) -> String {
    hospitals
        .get(hospital_id)
        .map(|h| h.hospital_name.clone())
        .unwrap_or_else(|| format!("Hospital #{}", hospital_id))
}

pub fn resolve_drive_name(drives: &EntityIndex<BloodDrive>, drive_id: Option<EntityId>) -> String {
    match drive_id {
        None => NO_DRIVE_LABEL.to_string(),
        Some(id) => drives
            .get(id)
            .map(|d| d.drive_name.clone())
            .unwrap_or_else(|| format!("Drive #{}", id)),
    }
}

/// Display facts about the unit a request points at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitInfo {
    pub blood_type: String,
    pub status: String,
}

pub fn resolve_unit_info(
    units: &EntityIndex<BloodUnit>,
    donors: &EntityIndex<Donor>,
    unit_id: EntityId,
) -> UnitInfo {
    match units.get(unit_id) {
        None => UnitInfo {
            blood_type: UNKNOWN_LABEL.to_string(),
            status: UNKNOWN_LABEL.to_string(),
        },
        Some(unit) => UnitInfo {
            blood_type: unit_blood_type(donors, unit)
                .map(|bt| bt.to_string())
                .unwrap_or_else(|| UNKNOWN_LABEL.to_string()),
            status: unit.unit_status.to_string(),
        },
    }
}

/// Whole days from `now` until the start of `expiry`, rounded up.
///
/// A unit whose expiry date is today yields 0 at any time of day; a unit that
/// expired yesterday yields -1.
pub fn days_until_expiry(expiry: NaiveDate, now: NaiveDateTime) -> i64 {
    let remaining = (expiry.and_time(NaiveTime::MIN) - now).num_milliseconds();
    let whole = remaining.div_euclid(MILLIS_PER_DAY);
    if remaining.rem_euclid(MILLIS_PER_DAY) == 0 {
        whole
    } else {
        whole + 1
    }
}

/// Date-only form of [`days_until_expiry`]
pub fn days_until_expiry_on(expiry: NaiveDate, today: NaiveDate) -> i64 {
    expiry.signed_duration_since(today).num_days()
}

/// Urgency bucket for a unit's remaining shelf life
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpiryBucket {
    Expired,
    Critical,
    Warning,
    Good,
}

impl ExpiryBucket {
    /// Ordered threshold checks, first match wins
    pub fn from_days(days: i64) -> Self {
        if days < 0 {
            ExpiryBucket::Expired
        } else if days <= 1 {
            ExpiryBucket::Critical
        } else if days <= 7 {
            ExpiryBucket::Warning
        } else {
            ExpiryBucket::Good
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            ExpiryBucket::Expired => "expired",
            ExpiryBucket::Critical => "critical",
            ExpiryBucket::Warning => "warning",
            ExpiryBucket::Good => "good",
        }
    }
}

/// Text for the "Days Left" column
pub fn days_left_label(days: i64) -> String {
    if days < 0 {
        "EXPIRED".to_string()
    } else {
        format!("{} days", days)
    }
}

/// The "Days Left" pill only distinguishes three states
pub fn days_left_class(days: i64) -> &'static str {
    if days < 0 {
        "expired"
    } else if days <= 7 {
        "warning"
    } else {
        "good"
    }
}

/// Stock level of one blood type in the inventory grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StockLevel {
    Low,
    Medium,
    Good,
}

impl StockLevel {
    /// Under `low_threshold` is low, under twice that is medium. This is the
    /// same threshold the backend's low-stock endpoint is queried with.
    pub fn from_count(count: u32, low_threshold: u32) -> Self {
        if count < low_threshold {
            StockLevel::Low
        } else if count < low_threshold.saturating_mul(2) {
            StockLevel::Medium
        } else {
            StockLevel::Good
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            StockLevel::Low => "low-stock",
            StockLevel::Medium => "medium-stock",
            StockLevel::Good => "good-stock",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UnitStatus;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn at(day: NaiveDate, h: u32, min: u32) -> NaiveDateTime {
        day.and_hms_opt(h, min, 0).unwrap()
    }

    fn donor(id: EntityId, blood_type: BloodType) -> Donor {
        Donor {
            donor_id: id,
            first_name: "Test".to_string(),
            last_name: "Donor".to_string(),
            blood_type,
            phone_num: "555".to_string(),
            last_donated_date: None,
            drive_id: None,
        }
    }

    #[test]
    fn test_expiring_later_today_is_zero_days() {
        let today = date(2025, 12, 1);
        assert_eq!(days_until_expiry(today, at(today, 14, 30)), 0);
        assert_eq!(days_until_expiry(today, at(today, 0, 0)), 0);
    }

    #[test]
    fn test_days_round_up() {
        let today = date(2025, 12, 1);
        assert_eq!(days_until_expiry(date(2025, 12, 4), at(today, 9, 0)), 3);
        assert_eq!(days_until_expiry(date(2025, 12, 4), at(today, 0, 0)), 3);
        assert_eq!(days_until_expiry(date(2025, 11, 30), at(today, 9, 0)), -1);
        assert_eq!(days_until_expiry(date(2025, 11, 30), at(today, 0, 0)), -1);
    }

    #[test]
    fn test_date_only_difference() {
        let today = date(2025, 12, 1);
        assert_eq!(days_until_expiry_on(date(2025, 12, 21), today), 20);
        assert_eq!(days_until_expiry_on(date(2025, 11, 25), today), -6);
    }

    #[test]
    fn test_bucket_boundaries() {
        assert_eq!(ExpiryBucket::from_days(-1), ExpiryBucket::Expired);
        assert_eq!(ExpiryBucket::from_days(0), ExpiryBucket::Critical);
        assert_eq!(ExpiryBucket::from_days(1), ExpiryBucket::Critical);
        assert_eq!(ExpiryBucket::from_days(2), ExpiryBucket::Warning);
        assert_eq!(ExpiryBucket::from_days(7), ExpiryBucket::Warning);
        assert_eq!(ExpiryBucket::from_days(8), ExpiryBucket::Good);
    }

    #[test]
    fn test_days_left_text() {
        assert_eq!(days_left_label(-3), "EXPIRED");
        assert_eq!(days_left_label(0), "0 days");
        assert_eq!(days_left_class(5), "warning");
        assert_eq!(days_left_class(30), "good");
    }

    #[test]
    fn test_unit_three_days_out_is_warning_with_donor_badge() {
        let today = date(2025, 12, 1);
        let donors = EntityIndex::build(vec![donor(1, BloodType::APositive)]);
        let unit = BloodUnit {
            unit_id: 10,
            donor_id: Some(1),
            donation_date: date(2025, 11, 1),
            expiry_date: date(2025, 12, 4),
            unit_status: UnitStatus::Available,
        };

        let days = days_until_expiry(unit.expiry_date, at(today, 10, 0));
        assert_eq!(ExpiryBucket::from_days(days), ExpiryBucket::Warning);
        assert_eq!(resolve_donor_blood_type(&donors, 1), "A+");
        assert_eq!(unit_blood_type(&donors, &unit), Some(BloodType::APositive));
    }

    #[test]
    fn test_missing_references_fall_back_to_placeholders() {
        let donors: EntityIndex<Donor> = EntityIndex::default();
        let hospitals: EntityIndex<Hospital> = EntityIndex::default();
        let drives: EntityIndex<BloodDrive> = EntityIndex::default();
        let units: EntityIndex<BloodUnit> = EntityIndex::default();

        assert_eq!(resolve_donor_blood_type(&donors, 42), UNKNOWN_LABEL);
        assert_eq!(resolve_hospital_name(&hospitals, 8), "Hospital #8");
        assert_eq!(resolve_drive_name(&drives, None), NO_DRIVE_LABEL);
        assert_eq!(resolve_drive_name(&drives, Some(3)), "Drive #3");
        assert_eq!(
            resolve_unit_info(&units, &donors, 10),
            UnitInfo {
                blood_type: UNKNOWN_LABEL.to_string(),
                status: UNKNOWN_LABEL.to_string(),
            }
        );
    }

    #[test]
    fn test_unit_info_without_donor() {
        let donors: EntityIndex<Donor> = EntityIndex::default();
        let units = EntityIndex::build(vec![BloodUnit {
            unit_id: 4,
            donor_id: None,
            donation_date: date(2025, 11, 1),
            expiry_date: date(2025, 12, 10),
            unit_status: UnitStatus::Reserved,
        }]);

        let info = resolve_unit_info(&units, &donors, 4);
        assert_eq!(info.blood_type, UNKNOWN_LABEL);
        assert_eq!(info.status, "Reserved");
    }

    #[test]
    fn test_stock_levels() {
        assert_eq!(StockLevel::from_count(0, 5), StockLevel::Low);
        assert_eq!(StockLevel::from_count(4, 5), StockLevel::Low);
        assert_eq!(StockLevel::from_count(5, 5), StockLevel::Medium);
        assert_eq!(StockLevel::from_count(9, 5), StockLevel::Medium);
        assert_eq!(StockLevel::from_count(10, 5).css_class(), "good-stock");
    }

    #[test]
    fn test_stock_levels_follow_configured_threshold() {
        // the backend reports a type as low when its count is under `amount`
        let threshold = 8;
        assert_eq!(StockLevel::from_count(6, threshold), StockLevel::Low);
        assert_eq!(StockLevel::from_count(8, threshold), StockLevel::Medium);
        assert_eq!(StockLevel::from_count(16, threshold), StockLevel::Good);
    }
}
