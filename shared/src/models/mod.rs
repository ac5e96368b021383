pub mod blood_drive;
pub mod blood_type;
pub mod blood_unit;
pub mod donor;
pub mod hospital;
pub mod request;

pub use blood_drive::{BloodDrive, BloodDriveDraft};
pub use blood_type::BloodType;
pub use blood_unit::{BloodUnit, BloodUnitDraft, UnitStatus};
pub use donor::{Donor, DonorDraft};
pub use hospital::{Hospital, HospitalDraft};
pub use request::{
    count_with_status, status_color, BloodRequest, BloodRequestDraft, RequestStatus,
    NEUTRAL_STATUS_COLOR,
};
