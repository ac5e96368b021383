use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::resource::{is_blank, Draft, EntityId, Resource};

/// A hospital that files blood requests
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hospital {
    pub hospital_id: EntityId,
    pub hospital_name: String,
    pub address: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HospitalDraft {
    pub hospital_name: String,
    pub address: String,
}

impl Draft for HospitalDraft {
    fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if is_blank(&self.hospital_name) {
            missing.push("hospital_name");
        }
        if is_blank(&self.address) {
            missing.push("address");
        }
        missing
    }
}

impl Resource for Hospital {
    type Draft = HospitalDraft;

    const COLLECTION: &'static str = "hospitals";
    const LABEL: &'static str = "hospital";

    fn id(&self) -> EntityId {
        self.hospital_id
    }

    fn draft(&self) -> HospitalDraft {
        HospitalDraft {
            hospital_name: self.hospital_name.clone(),
            address: self.address.clone(),
        }
    }

    fn new_draft(_today: NaiveDate) -> HospitalDraft {
        HospitalDraft::default()
    }
}
