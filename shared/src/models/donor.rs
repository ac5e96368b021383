use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::blood_type::BloodType;
use crate::resource::{deserialize_optional_id, is_blank, Draft, EntityId, Resource};

/// A registered blood donor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Donor {
    pub donor_id: EntityId,
    pub first_name: String,
    pub last_name: String,
    pub blood_type: BloodType,
    pub phone_num: String,
    #[serde(default)]
    pub last_donated_date: Option<NaiveDate>,
    /// Blood drive the donor was collected at, if any. The aggregate
    /// endpoints send it as text.
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub drive_id: Option<EntityId>,
}

impl Donor {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DonorDraft {
    pub first_name: String,
    pub last_name: String,
    pub blood_type: BloodType,
    pub phone_num: String,
    pub last_donated_date: Option<NaiveDate>,
    pub drive_id: Option<EntityId>,
}

impl Default for DonorDraft {
    fn default() -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            blood_type: BloodType::APositive,
            phone_num: String::new(),
            last_donated_date: None,
            drive_id: None,
        }
    }
}

impl Draft for DonorDraft {
    fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if is_blank(&self.first_name) {
            missing.push("first_name");
        }
        if is_blank(&self.last_name) {
            missing.push("last_name");
        }
        if is_blank(&self.phone_num) {
            missing.push("phone_num");
        }
        if self.last_donated_date.is_none() {
            missing.push("last_donated_date");
        }
        missing
    }
}

impl Resource for Donor {
    type Draft = DonorDraft;

    const COLLECTION: &'static str = "donors";
    const LABEL: &'static str = "donor";

    fn id(&self) -> EntityId {
        self.donor_id
    }

    fn draft(&self) -> DonorDraft {
        DonorDraft {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            blood_type: self.blood_type,
            phone_num: self.phone_num.clone(),
            last_donated_date: self.last_donated_date,
            drive_id: self.drive_id,
        }
    }

    fn new_draft(_today: NaiveDate) -> DonorDraft {
        DonorDraft::default()
    }
}
