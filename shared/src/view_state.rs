//! Per-view UI state for the CRUD screens and the reducer that drives it.
//!
//! Every screen holds one `CrudViewState`: its filter, the add/edit modal,
//! a pending delete awaiting confirmation, the last mutation error and the
//! in-flight flag. The state is plain data so it can be inspected, logged
//! and tested without a browser.

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::resource::{EntityId, Resource};

/// The add/edit form and the draft it is editing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ModalState<D> {
    Closed,
    Adding { draft: D },
    Editing { id: EntityId, draft: D },
}

impl<D> ModalState<D> {
    pub fn is_open(&self) -> bool {
        !matches!(self, ModalState::Closed)
    }

    pub fn draft(&self) -> Option<&D> {
        match self {
            ModalState::Closed => None,
            ModalState::Adding { draft } | ModalState::Editing { draft, .. } => Some(draft),
        }
    }

    /// Title prefix for the modal, "Add" or "Edit"
    pub fn verb(&self) -> &'static str {
        match self {
            ModalState::Editing { .. } => "Edit",
            _ => "Add",
        }
    }
}

impl<D> Default for ModalState<D> {
    fn default() -> Self {
        ModalState::Closed
    }
}

/// Which call a form submission turns into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubmitTarget {
    /// POST to the collection
    Create,
    /// PATCH the record
    Update(EntityId),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Submission<D> {
    pub target: SubmitTarget,
    pub draft: D,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(
    serialize = "F: Serialize",
    deserialize = "F: DeserializeOwned"
))]
pub struct CrudViewState<R: Resource, F> {
    pub filter: F,
    pub modal: ModalState<R::Draft>,
    /// Record awaiting delete confirmation
    pub pending_delete: Option<EntityId>,
    /// Message for the blocking alert after a failed mutation
    pub mutation_error: Option<String>,
    pub submitting: bool,
}

impl<R: Resource, F: Default> Default for CrudViewState<R, F> {
    fn default() -> Self {
        Self {
            filter: F::default(),
            modal: ModalState::Closed,
            pending_delete: None,
            mutation_error: None,
            submitting: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViewAction<R: Resource, F> {
    SetFilter(F),
    /// Open the add form pre-filled for `today`
    OpenAdd { today: NaiveDate },
    OpenEdit(R),
    /// Replace the draft in the open form; ignored when the form is closed
    EditDraft(R::Draft),
    CloseModal,
    SubmitStarted,
    SubmitSucceeded,
    RequestDelete(EntityId),
    CancelDelete,
    DeleteConfirmed,
    MutationFailed(String),
    DismissError,
}

impl<R: Resource, F> CrudViewState<R, F> {
    pub fn apply(self, action: ViewAction<R, F>) -> Self {
        match action {
            ViewAction::SetFilter(filter) => Self { filter, ..self },
            ViewAction::OpenAdd { today } => Self {
                modal: ModalState::Adding {
                    draft: R::new_draft(today),
                },
                mutation_error: None,
                ..self
            },
            ViewAction::OpenEdit(record) => Self {
                modal: ModalState::Editing {
                    id: record.id(),
                    draft: record.draft(),
                },
                mutation_error: None,
                ..self
            },
            ViewAction::EditDraft(draft) => {
                let modal = match self.modal {
                    ModalState::Closed => ModalState::Closed,
                    ModalState::Adding { .. } => ModalState::Adding { draft },
                    ModalState::Editing { id, .. } => ModalState::Editing { id, draft },
                };
                Self { modal, ..self }
            }
            ViewAction::CloseModal => Self {
                modal: ModalState::Closed,
                mutation_error: None,
                ..self
            },
            ViewAction::SubmitStarted => Self {
                submitting: true,
                mutation_error: None,
                ..self
            },
            ViewAction::SubmitSucceeded => Self {
                modal: ModalState::Closed,
                submitting: false,
                mutation_error: None,
                ..self
            },
            ViewAction::RequestDelete(id) => Self {
                pending_delete: Some(id),
                ..self
            },
            ViewAction::CancelDelete => Self {
                pending_delete: None,
                ..self
            },
            ViewAction::DeleteConfirmed => Self {
                pending_delete: None,
                submitting: true,
                mutation_error: None,
                ..self
            },
            // The form stays open so the user can correct and resubmit
            ViewAction::MutationFailed(message) => Self {
                submitting: false,
                mutation_error: Some(message),
                ..self
            },
            ViewAction::DismissError => Self {
                mutation_error: None,
                ..self
            },
        }
    }

    /// What submitting the open form would send, or `None` when it is closed
    pub fn submission(&self) -> Option<Submission<R::Draft>> {
        match &self.modal {
            ModalState::Closed => None,
            ModalState::Adding { draft } => Some(Submission {
                target: SubmitTarget::Create,
                draft: draft.clone(),
            }),
            ModalState::Editing { id, draft } => Some(Submission {
                target: SubmitTarget::Update(*id),
                draft: draft.clone(),
            }),
        }
    }
}

/// Data behind a view: loading, loaded, or the load error message
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> LoadState<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            LoadState::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }
}

impl<T> Default for LoadState<T> {
    fn default() -> Self {
        LoadState::Loading
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::DonorFilter;
    use crate::models::{BloodType, Donor, DonorDraft};
    use crate::resource::Draft;

    type DonorView = CrudViewState<Donor, DonorFilter>;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 12, 1).unwrap()
    }

    fn donor() -> Donor {
        Donor {
            donor_id: 7,
            first_name: "Ada".to_string(),
            last_name: "Lee".to_string(),
            blood_type: BloodType::ONegative,
            phone_num: "555-0107".to_string(),
            last_donated_date: Some(NaiveDate::from_ymd_opt(2025, 9, 1).unwrap()),
            drive_id: None,
        }
    }

    #[test]
    fn test_open_edit_prefills_and_targets_update() {
        let state = DonorView::default().apply(ViewAction::OpenEdit(donor()));

        let submission = state.submission().unwrap();
        assert_eq!(submission.target, SubmitTarget::Update(7));
        assert_eq!(submission.draft.first_name, "Ada");
        assert_eq!(state.modal.verb(), "Edit");
    }

    #[test]
    fn test_add_flow_targets_create() {
        let state = DonorView::default().apply(ViewAction::OpenAdd { today: today() });
        assert_eq!(state.modal.verb(), "Add");

        let draft = DonorDraft {
            first_name: "Bo".to_string(),
            ..state.modal.draft().unwrap().clone()
        };
        let state = state.apply(ViewAction::EditDraft(draft));

        let submission = state.submission().unwrap();
        assert_eq!(submission.target, SubmitTarget::Create);
        assert_eq!(submission.draft.first_name, "Bo");
        assert!(submission.draft.validate().is_err());
    }

    #[test]
    fn test_failure_keeps_form_open_with_message() {
        let state = DonorView::default()
            .apply(ViewAction::OpenEdit(donor()))
            .apply(ViewAction::SubmitStarted)
            .apply(ViewAction::MutationFailed("Failed to save donor".to_string()));

        assert!(state.modal.is_open());
        assert!(!state.submitting);
        assert_eq!(state.mutation_error.as_deref(), Some("Failed to save donor"));

        let state = state.apply(ViewAction::DismissError);
        assert!(state.mutation_error.is_none());
        assert!(state.modal.is_open());
    }

    #[test]
    fn test_success_closes_modal() {
        let state = DonorView::default()
            .apply(ViewAction::OpenAdd { today: today() })
            .apply(ViewAction::SubmitStarted)
            .apply(ViewAction::SubmitSucceeded);

        assert_eq!(state.modal, ModalState::Closed);
        assert!(state.submission().is_none());
        assert!(!state.submitting);
    }

    #[test]
    fn test_delete_needs_confirmation() {
        let state = DonorView::default().apply(ViewAction::RequestDelete(7));
        assert_eq!(state.pending_delete, Some(7));

        let cancelled = state.clone().apply(ViewAction::CancelDelete);
        assert_eq!(cancelled.pending_delete, None);
        assert!(!cancelled.submitting);

        let confirmed = state.apply(ViewAction::DeleteConfirmed);
        assert_eq!(confirmed.pending_delete, None);
        assert!(confirmed.submitting);
    }

    #[test]
    fn test_edit_draft_ignored_when_closed() {
        let state = DonorView::default().apply(ViewAction::EditDraft(DonorDraft::default()));
        assert_eq!(state.modal, ModalState::Closed);
    }

    #[test]
    fn test_filter_survives_modal_changes() {
        let filter = DonorFilter {
            search: "Lee".to_string(),
            blood_type: Some(BloodType::ONegative),
        };
        let state = DonorView::default()
            .apply(ViewAction::SetFilter(filter.clone()))
            .apply(ViewAction::OpenEdit(donor()))
            .apply(ViewAction::CloseModal);
        assert_eq!(state.filter, filter);
    }

    #[test]
    fn test_state_serializes_modal_mode() {
        let state = DonorView::default().apply(ViewAction::OpenEdit(donor()));
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["modal"]["mode"], "editing");
        assert_eq!(json["modal"]["id"], 7);

        let back: DonorView = serde_json::from_value(json).unwrap();
        assert_eq!(back, state);
    }
}
