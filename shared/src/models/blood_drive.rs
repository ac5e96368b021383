use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::resource::{is_blank, Draft, EntityId, Resource};

/// An organized donation event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BloodDrive {
    pub drive_id: EntityId,
    pub drive_name: String,
    pub drive_address: String,
    pub manager_first_name: String,
    pub manager_last_name: String,
    pub phone_num: String,
    #[serde(default)]
    pub last_drive_date: Option<NaiveDate>,
}

impl BloodDrive {
    pub fn manager_name(&self) -> String {
        format!("{} {}", self.manager_first_name, self.manager_last_name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BloodDriveDraft {
    pub drive_name: String,
    pub drive_address: String,
    pub manager_first_name: String,
    pub manager_last_name: String,
    pub phone_num: String,
    pub last_drive_date: Option<NaiveDate>,
}

impl Draft for BloodDriveDraft {
    fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if is_blank(&self.drive_name) {
            missing.push("drive_name");
        }
        if is_blank(&self.drive_address) {
            missing.push("drive_address");
        }
        if is_blank(&self.manager_first_name) {
            missing.push("manager_first_name");
        }
        if is_blank(&self.manager_last_name) {
            missing.push("manager_last_name");
        }
        if is_blank(&self.phone_num) {
            missing.push("phone_num");
        }
        if self.last_drive_date.is_none() {
            missing.push("last_drive_date");
        }
        missing
    }
}

impl Resource for BloodDrive {
    type Draft = BloodDriveDraft;

    const COLLECTION: &'static str = "blooddrives";
    const LABEL: &'static str = "blood drive";

    fn id(&self) -> EntityId {
        self.drive_id
    }

    fn draft(&self) -> BloodDriveDraft {
        BloodDriveDraft {
            drive_name: self.drive_name.clone(),
            drive_address: self.drive_address.clone(),
            manager_first_name: self.manager_first_name.clone(),
            manager_last_name: self.manager_last_name.clone(),
            phone_num: self.phone_num.clone(),
            last_drive_date: self.last_drive_date,
        }
    }

    fn new_draft(_today: NaiveDate) -> BloodDriveDraft {
        BloodDriveDraft::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_manager_is_missing() {
        let draft = BloodDriveDraft {
            drive_name: "Downtown".to_string(),
            drive_address: "123 Main".to_string(),
            manager_first_name: "  ".to_string(),
            manager_last_name: "Ng".to_string(),
            phone_num: "555-123-4567".to_string(),
            last_drive_date: NaiveDate::from_ymd_opt(2025, 11, 15),
        };
        assert_eq!(draft.missing_fields(), vec!["manager_first_name"]);
    }
}
