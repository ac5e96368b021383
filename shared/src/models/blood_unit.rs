use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ParseEnumError;
use crate::resource::{Draft, EntityId, Resource};

/// Lifecycle status of a collected unit.
///
/// Any status may follow any other: the inventory screen exposes every value
/// in a free dropdown and the backend accepts all of them. See
/// [`UnitStatus::transition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitStatus {
    Available,
    Reserved,
    Issued,
    Transfused,
    Expired,
    Discarded,
}

impl UnitStatus {
    pub const ALL: [UnitStatus; 6] = [
        UnitStatus::Available,
        UnitStatus::Reserved,
        UnitStatus::Issued,
        UnitStatus::Transfused,
        UnitStatus::Expired,
        UnitStatus::Discarded,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            UnitStatus::Available => "Available",
            UnitStatus::Reserved => "Reserved",
            UnitStatus::Issued => "Issued",
            UnitStatus::Transfused => "Transfused",
            UnitStatus::Expired => "Expired",
            UnitStatus::Discarded => "Discarded",
        }
    }

    /// CSS modifier for status badges
    pub fn css_class(&self) -> &'static str {
        match self {
            UnitStatus::Available => "available",
            UnitStatus::Reserved => "reserved",
            UnitStatus::Issued => "issued",
            UnitStatus::Transfused => "transfused",
            UnitStatus::Expired => "expired",
            UnitStatus::Discarded => "discarded",
        }
    }

    /// Unconstrained: every target status is reachable from every status.
    pub fn transition(self, to: UnitStatus) -> UnitStatus {
        to
    }
}

impl Default for UnitStatus {
    fn default() -> Self {
        UnitStatus::Available
    }
}

impl fmt::Display for UnitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UnitStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UnitStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ParseEnumError::UnitStatus(s.to_string()))
    }
}

/// One collected, trackable quantity of blood
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BloodUnit {
    pub unit_id: EntityId,
    /// The backend does not require a donor on units
    #[serde(default)]
    pub donor_id: Option<EntityId>,
    pub donation_date: NaiveDate,
    pub expiry_date: NaiveDate,
    pub unit_status: UnitStatus,
}

impl BloodUnit {
    /// Draft for the inline status select: every field kept, status replaced.
    pub fn with_status(&self, status: UnitStatus) -> BloodUnitDraft {
        BloodUnitDraft {
            unit_status: self.unit_status.transition(status),
            ..self.draft()
        }
    }

    pub fn is_available(&self) -> bool {
        self.unit_status == UnitStatus::Available
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BloodUnitDraft {
    pub donor_id: Option<EntityId>,
    pub donation_date: Option<NaiveDate>,
    pub expiry_date: Option<NaiveDate>,
    pub unit_status: UnitStatus,
}

impl Draft for BloodUnitDraft {
    fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.donor_id.is_none() {
            missing.push("donor_id");
        }
        if self.donation_date.is_none() {
            missing.push("donation_date");
        }
        if self.expiry_date.is_none() {
            missing.push("expiry_date");
        }
        missing
    }
}

impl Resource for BloodUnit {
    type Draft = BloodUnitDraft;

    const COLLECTION: &'static str = "bloodunits";
    const LABEL: &'static str = "blood unit";

    fn id(&self) -> EntityId {
        self.unit_id
    }

    fn draft(&self) -> BloodUnitDraft {
        BloodUnitDraft {
            donor_id: self.donor_id,
            donation_date: Some(self.donation_date),
            expiry_date: Some(self.expiry_date),
            unit_status: self.unit_status,
        }
    }

    fn new_draft(_today: NaiveDate) -> BloodUnitDraft {
        BloodUnitDraft::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit() -> BloodUnit {
        BloodUnit {
            unit_id: 10,
            donor_id: Some(1),
            donation_date: NaiveDate::from_ymd_opt(2025, 11, 1).unwrap(),
            expiry_date: NaiveDate::from_ymd_opt(2025, 12, 4).unwrap(),
            unit_status: UnitStatus::Available,
        }
    }

    #[test]
    fn test_any_status_reaches_any_other() {
        for from in UnitStatus::ALL {
            for to in UnitStatus::ALL {
                assert_eq!(from.transition(to), to);
            }
        }
    }

    #[test]
    fn test_with_status_keeps_other_fields() {
        let draft = unit().with_status(UnitStatus::Discarded);
        assert_eq!(draft.unit_status, UnitStatus::Discarded);
        assert_eq!(draft.donor_id, Some(1));
        assert_eq!(draft.expiry_date, NaiveDate::from_ymd_opt(2025, 12, 4));
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn test_deserialize_backend_unit() {
        let json = r#"{"unit_id": 3, "donor_id": null, "donation_date": "2025-10-01",
                       "expiry_date": "2025-11-12", "unit_status": "Reserved"}"#;
        let unit: BloodUnit = serde_json::from_str(json).unwrap();
        assert_eq!(unit.donor_id, None);
        assert_eq!(unit.unit_status, UnitStatus::Reserved);
        assert!(!unit.is_available());
    }

    #[test]
    fn test_status_parse_rejects_lowercase() {
        assert_eq!("Issued".parse::<UnitStatus>(), Ok(UnitStatus::Issued));
        assert!("issued".parse::<UnitStatus>().is_err());
    }
}
