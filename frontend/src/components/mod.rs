pub mod alert_dialog;
pub mod confirm_dialog;
pub mod form_fields;
pub mod modal;
pub mod page;
pub mod sidebar;

pub use alert_dialog::AlertDialog;
pub use confirm_dialog::ConfirmDialog;
pub use form_fields::{DateField, Select, SelectField, SelectOption, TextAreaField, TextField};
pub use modal::FormModal;
pub use page::{AlertItem, ErrorBanner, LoadingView, PageHeader, StatCard};
pub use sidebar::Sidebar;
