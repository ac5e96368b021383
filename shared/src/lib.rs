//! Domain model for the blood bank dashboard: the backend's entities and
//! aggregate responses, plus everything the views compute from them.

pub mod aggregates;
pub mod dashboard;
pub mod derived;
pub mod error;
pub mod filters;
pub mod index;
pub mod models;
pub mod reload;
pub mod resource;
pub mod view_state;

pub use aggregates::{DashboardSummary, DonorsByDrive, InventoryByType, LowStock, MarkExpiredResponse};
pub use dashboard::{dashboard_alerts, AlertSeverity, DashboardAlert};
pub use derived::{
    days_left_class, days_left_label, days_until_expiry, days_until_expiry_on, resolve_donor_blood_type,
    resolve_drive_name, resolve_hospital_name, resolve_unit_info, unit_blood_type, ExpiryBucket, StockLevel,
    UnitInfo,
};
pub use error::{DraftError, ParseEnumError};
pub use filters::{choice_value, parse_choice, ALL_OPTION, DonorFilter, DriveFilter, HospitalFilter, RequestFilter, UnitFilter};
pub use index::EntityIndex;
pub use models::*;
pub use reload::{FullReload, Mutation, Reload, ReloadPolicy};
pub use resource::{Draft, EntityId, Resource};
pub use view_state::{CrudViewState, LoadState, ModalState, SubmitTarget, Submission, ViewAction};
