//! Client-side table filters. Every filter is a conjunction of its
//! predicates; an empty search and an unset choice both match everything.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::derived::unit_blood_type;
use crate::index::EntityIndex;
use crate::models::{
    BloodDrive, BloodRequest, BloodType, BloodUnit, Donor, Hospital, RequestStatus, UnitStatus,
};
use crate::resource::EntityId;

/// Select value meaning "no restriction"
pub const ALL_OPTION: &str = "All";

/// Parse a select value; the "All" option and unparsable values clear the
/// restriction.
pub fn parse_choice<T: FromStr>(value: &str) -> Option<T> {
    if value.is_empty() || value == ALL_OPTION {
        None
    } else {
        value.parse().ok()
    }
}

/// Select value for an optional restriction
pub fn choice_value<T: ToString>(choice: &Option<T>) -> String {
    choice
        .as_ref()
        .map(|c| c.to_string())
        .unwrap_or_else(|| ALL_OPTION.to_string())
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn id_contains(id: EntityId, needle: &str) -> bool {
    id.to_string().contains(needle)
}

fn matches_choice<T: PartialEq>(choice: &Option<T>, value: &T) -> bool {
    choice.as_ref().map_or(true, |c| c == value)
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DonorFilter {
    /// Matches first name, last name (case-insensitive) or id
    pub search: String,
    pub blood_type: Option<BloodType>,
}

impl DonorFilter {
    pub fn matches(&self, donor: &Donor) -> bool {
        let term = self.search.trim();
        let matches_search = term.is_empty()
            || contains_ignore_case(&donor.first_name, term)
            || contains_ignore_case(&donor.last_name, term)
            || id_contains(donor.donor_id, term);

        matches_search && matches_choice(&self.blood_type, &donor.blood_type)
    }

    pub fn apply<'a>(&self, donors: &'a [Donor]) -> Vec<&'a Donor> {
        donors.iter().filter(|d| self.matches(d)).collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HospitalFilter {
    /// Matches name or address, case-insensitive
    pub search: String,
}

impl HospitalFilter {
    pub fn matches(&self, hospital: &Hospital) -> bool {
        let term = self.search.trim();
        term.is_empty()
            || contains_ignore_case(&hospital.hospital_name, term)
            || contains_ignore_case(&hospital.address, term)
    }

    pub fn apply<'a>(&self, hospitals: &'a [Hospital]) -> Vec<&'a Hospital> {
        hospitals.iter().filter(|h| self.matches(h)).collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitFilter {
    /// Substring of the unit id
    pub search_id: String,
    /// Compared against the donor's blood type
    pub blood_type: Option<BloodType>,
    pub status: Option<UnitStatus>,
}

impl UnitFilter {
    pub fn matches(&self, unit: &BloodUnit, donors: &EntityIndex<Donor>) -> bool {
        let term = self.search_id.trim();
        let matches_search = term.is_empty() || id_contains(unit.unit_id, term);
        // A unit whose donor cannot be resolved only passes the "All" choice
        let matches_type = match self.blood_type {
            None => true,
            Some(bt) => unit_blood_type(donors, unit) == Some(bt),
        };

        matches_search && matches_type && matches_choice(&self.status, &unit.unit_status)
    }

    pub fn apply<'a>(&self, units: &'a [BloodUnit], donors: &EntityIndex<Donor>) -> Vec<&'a BloodUnit> {
        units.iter().filter(|u| self.matches(u, donors)).collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestFilter {
    /// Substring of the request id or the requested unit id
    pub search_id: String,
    pub hospital_id: Option<EntityId>,
    pub status: Option<RequestStatus>,
}

impl RequestFilter {
    pub fn matches(&self, request: &BloodRequest) -> bool {
        let term = self.search_id.trim();
        let matches_search = term.is_empty()
            || id_contains(request.request_id, term)
            || id_contains(request.unit_id, term);

        matches_search
            && matches_choice(&self.hospital_id, &request.hospital_id)
            && matches_choice(&self.status, &request.req_status)
    }

    pub fn apply<'a>(&self, requests: &'a [BloodRequest]) -> Vec<&'a BloodRequest> {
        requests.iter().filter(|r| self.matches(r)).collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriveFilter {
    /// Matches drive name, address or either manager name, case-insensitive
    pub search: String,
}

impl DriveFilter {
    pub fn matches(&self, drive: &BloodDrive) -> bool {
        let term = self.search.trim();
        term.is_empty()
            || contains_ignore_case(&drive.drive_name, term)
            || contains_ignore_case(&drive.drive_address, term)
            || contains_ignore_case(&drive.manager_first_name, term)
            || contains_ignore_case(&drive.manager_last_name, term)
    }

    pub fn apply<'a>(&self, drives: &'a [BloodDrive]) -> Vec<&'a BloodDrive> {
        drives.iter().filter(|d| self.matches(d)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn donor(id: EntityId, first: &str, last: &str, blood_type: BloodType) -> Donor {
        Donor {
            donor_id: id,
            first_name: first.to_string(),
            last_name: last.to_string(),
            blood_type,
            phone_num: "555-0100".to_string(),
            last_donated_date: None,
            drive_id: None,
        }
    }

    fn unit(id: EntityId, donor_id: Option<EntityId>, status: UnitStatus) -> BloodUnit {
        BloodUnit {
            unit_id: id,
            donor_id,
            donation_date: NaiveDate::from_ymd_opt(2025, 11, 1).unwrap(),
            expiry_date: NaiveDate::from_ymd_opt(2025, 12, 20).unwrap(),
            unit_status: status,
        }
    }

    fn request(id: EntityId, hospital_id: EntityId, unit_id: EntityId, status: RequestStatus) -> BloodRequest {
        BloodRequest {
            request_id: id,
            hospital_id,
            unit_id,
            request_date: NaiveDate::from_ymd_opt(2025, 11, 30).unwrap(),
            req_status: status,
            completed_date: None,
        }
    }

    #[test]
    fn test_blood_type_and_search_combine() {
        let donors = vec![
            donor(1, "Ada", "Lee", BloodType::ONegative),
            donor(2, "Bo", "Lee", BloodType::APositive),
            donor(3, "Cy", "Park", BloodType::ONegative),
            donor(4, "Leena", "Ray", BloodType::ONegative),
        ];
        let filter = DonorFilter {
            search: "Lee".to_string(),
            blood_type: Some(BloodType::ONegative),
        };

        let ids: Vec<_> = filter.apply(&donors).iter().map(|d| d.donor_id).collect();
        assert_eq!(ids, vec![1, 4]);
    }

    #[test]
    fn test_donor_search_is_case_insensitive_and_matches_id() {
        let donors = vec![donor(12, "Ada", "Lee", BloodType::ONegative), donor(3, "Bo", "Kim", BloodType::BPositive)];
        let by_name = DonorFilter { search: "lEe".to_string(), blood_type: None };
        let by_id = DonorFilter { search: "12".to_string(), blood_type: None };

        assert_eq!(by_name.apply(&donors).len(), 1);
        assert_eq!(by_id.apply(&donors)[0].donor_id, 12);
        assert_eq!(DonorFilter::default().apply(&donors).len(), 2);
    }

    #[test]
    fn test_unit_filter_resolves_blood_type_through_donor() {
        let donors = EntityIndex::build(vec![
            donor(1, "Ada", "Lee", BloodType::APositive),
            donor(2, "Bo", "Kim", BloodType::ONegative),
        ]);
        let units = vec![
            unit(10, Some(1), UnitStatus::Available),
            unit(11, Some(2), UnitStatus::Available),
            unit(12, None, UnitStatus::Available),
            unit(110, Some(1), UnitStatus::Reserved),
        ];

        let a_pos = UnitFilter { blood_type: Some(BloodType::APositive), ..UnitFilter::default() };
        let ids: Vec<_> = a_pos.apply(&units, &donors).iter().map(|u| u.unit_id).collect();
        assert_eq!(ids, vec![10, 110]);

        let available_11 = UnitFilter {
            search_id: "11".to_string(),
            status: Some(UnitStatus::Available),
            ..UnitFilter::default()
        };
        let ids: Vec<_> = available_11.apply(&units, &donors).iter().map(|u| u.unit_id).collect();
        assert_eq!(ids, vec![11]);

        assert_eq!(UnitFilter::default().apply(&units, &donors).len(), 4);
    }

    #[test]
    fn test_request_search_hits_request_or_unit_id() {
        let requests = vec![
            request(1, 5, 77, RequestStatus::Pending),
            request(77, 6, 2, RequestStatus::Completed),
            request(3, 5, 4, RequestStatus::Pending),
        ];

        let search = RequestFilter { search_id: "77".to_string(), ..RequestFilter::default() };
        assert_eq!(search.apply(&requests).len(), 2);

        let scoped = RequestFilter {
            search_id: "77".to_string(),
            hospital_id: Some(5),
            status: Some(RequestStatus::Pending),
        };
        let ids: Vec<_> = scoped.apply(&requests).iter().map(|r| r.request_id).collect();
        assert_eq!(ids, vec![1]);
    }

    #[test]
    fn test_drive_search_covers_manager_names() {
        let drives = vec![BloodDrive {
            drive_id: 1,
            drive_name: "Downtown".to_string(),
            drive_address: "123 Main Street".to_string(),
            manager_first_name: "Rosa".to_string(),
            manager_last_name: "Diaz".to_string(),
            phone_num: "555-123-4567".to_string(),
            last_drive_date: None,
        }];

        for term in ["downtown", "MAIN", "rosa", "diaz"] {
            let filter = DriveFilter { search: term.to_string() };
            assert_eq!(filter.apply(&drives).len(), 1, "term {term}");
        }
        assert!(DriveFilter { search: "uptown".to_string() }.apply(&drives).is_empty());
    }

    #[test]
    fn test_hospital_search_on_address() {
        let hospitals = vec![Hospital {
            hospital_id: 1,
            hospital_name: "Mercy".to_string(),
            address: "9 Elm Road".to_string(),
        }];
        assert_eq!(HospitalFilter { search: "elm".to_string() }.apply(&hospitals).len(), 1);
    }

    #[test]
    fn test_choice_parsing() {
        assert_eq!(parse_choice::<BloodType>(ALL_OPTION), None);
        assert_eq!(parse_choice::<BloodType>(""), None);
        assert_eq!(parse_choice::<BloodType>("O-"), Some(BloodType::ONegative));
        assert_eq!(parse_choice::<EntityId>("14"), Some(14));
        assert_eq!(choice_value(&Some(UnitStatus::Expired)), "Expired");
        assert_eq!(choice_value::<UnitStatus>(&None), ALL_OPTION);
    }
}
