use chrono::NaiveDate;
use futures::future::{FutureExt, LocalBoxFuture};
use shared::{BloodDrive, BloodDriveDraft, Draft, DonorsByDrive, DriveFilter, EntityId, LoadState, ModalState};
use std::rc::Rc;
use web_sys::MouseEvent;
use yew::prelude::*;

use crate::components::{
    AlertDialog, ConfirmDialog, DateField, ErrorBanner, FormModal, LoadingView, PageHeader, TextField,
};
use crate::hooks::use_app_context::use_app_context;
use crate::hooks::use_crud::use_crud;
use crate::hooks::use_request_scope::use_request_scope;
use crate::hooks::use_view_data::{use_view_data, ViewData};
use crate::services::api::{ApiClient, ApiError};
use crate::services::config::AppConfig;
use crate::services::date_utils::{format_input_date, format_optional_date};
use crate::views::{draft_field, search_input};

pub struct BloodDrivesData {
    pub drives: Vec<BloodDrive>,
}

impl ViewData for BloodDrivesData {
    const NAME: &'static str = "blooddrive";
    const LOAD_ERROR: &'static str = "Failed to load blood drives";

    fn load(api: ApiClient, _config: Rc<AppConfig>) -> LocalBoxFuture<'static, Result<Self, ApiError>> {
        async move {
            let drives = api.list::<BloodDrive>().await?;
            Ok(Self { drives })
        }
        .boxed_local()
    }
}

#[derive(Properties, PartialEq)]
struct DriveDonorsModalProps {
    roster: DonorsByDrive,
    on_close: Callback<()>,
}

/// Read-only roster of the donors collected at one drive
#[function_component(DriveDonorsModal)]
fn drive_donors_modal(props: &DriveDonorsModalProps) -> Html {
    let on_close = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };
    let roster = &props.roster;

    html! {
        <div class="modal-overlay">
            <div class="modal-content modal-large">
                <div class="modal-header">
                    <h3>{format!("Donors from Drive #{}", roster.drive_id)}</h3>
                    <button class="modal-close" onclick={on_close.clone()}>{"×"}</button>
                </div>
                <div class="modal-body">
                    <p>{format!("Total Donors: {}", roster.donor_count)}</p>
                    if roster.donors.is_empty() {
                        <p class="empty-message">{"No donors found for this drive"}</p>
                    } else {
                        <table>
                            <thead>
                                <tr>
                                    <th>{"Donor ID"}</th>
                                    <th>{"Name"}</th>
                                    <th>{"Blood Type"}</th>
                                    <th>{"Phone"}</th>
                                    <th>{"Last Donated"}</th>
                                </tr>
                            </thead>
                            <tbody>
                                {for roster.donors.iter().map(|donor| html! {
                                    <tr key={donor.donor_id}>
                                        <td>{format!("#{}", donor.donor_id)}</td>
                                        <td>{donor.full_name()}</td>
                                        <td><span class="blood-type-badge">{donor.blood_type.to_string()}</span></td>
                                        <td>{donor.phone_num.clone()}</td>
                                        <td>{format_optional_date(donor.last_donated_date)}</td>
                                    </tr>
                                })}
                            </tbody>
                        </table>
                    }
                </div>
                <div class="modal-actions">
                    <button class="btn btn-secondary" onclick={on_close}>{"Close"}</button>
                </div>
            </div>
        </div>
    }
}

#[function_component(BloodDrivesView)]
pub fn blood_drives_view() -> Html {
    let context = use_app_context();
    let scope = use_request_scope();
    let data = use_view_data::<BloodDrivesData>(&scope);
    let crud = use_crud::<BloodDrive, DriveFilter>(&scope, data.reload.clone());
    let roster = use_state(|| None::<DonorsByDrive>);
    let roster_error = use_state(|| None::<String>);
    let state = &crud.state;
    let actions = &crud.actions;

    let view_donors = {
        let api = context.api.clone();
        let scope = scope.clone();
        let roster = roster.clone();
        let roster_error = roster_error.clone();
        Callback::from(move |drive_id: EntityId| {
            let api = api.clone();
            let roster = roster.clone();
            let roster_error = roster_error.clone();
            scope.spawn_in("roster", async move {
                match api.donors_by_drive(drive_id).await {
                    Ok(result) => roster.set(Some(result)),
                    Err(e) => {
                        log::error!(target: "blooddrive", "donors for drive #{} failed: {}", drive_id, e);
                        roster_error.set(Some("Failed to load donors for this drive".to_string()));
                    }
                }
            });
        })
    };

    let close_roster = {
        let roster = roster.clone();
        Callback::from(move |_: ()| roster.set(None))
    };
    let dismiss_roster_error = {
        let roster_error = roster_error.clone();
        Callback::from(move |_: ()| roster_error.set(None))
    };

    let data = match &data.state {
        LoadState::Loading => return html! { <LoadingView message="Loading blood drives..." /> },
        LoadState::Failed(message) => {
            return html! {
                <div>
                    <PageHeader title="Blood Drives" />
                    <ErrorBanner message={message.clone()} />
                </div>
            }
        }
        LoadState::Ready(data) => data.clone(),
    };

    let rows = state.filter.apply(&data.drives);

    let modal = match &state.modal {
        ModalState::Closed => html! {},
        modal => {
            let editing = matches!(modal, ModalState::Editing { .. });
            let draft: BloodDriveDraft = modal.draft().cloned().unwrap_or_default();
            let edit = &actions.edit_draft;
            html! {
                <FormModal
                    title={if editing { "Edit Blood Drive" } else { "Add New Blood Drive" }}
                    submit_label={if editing { "✓ Update Blood Drive" } else { "+ Add Blood Drive" }}
                    submitting={state.submitting}
                    missing={draft.missing_fields()}
                    on_submit={actions.submit.clone()}
                    on_close={actions.close_modal.clone()}
                >
                    <TextField
                        label="Drive Name"
                        placeholder="e.g., Downtown Blood Drive"
                        value={draft.drive_name.clone()}
                        on_change={draft_field(&draft, edit, |d, v: String| d.drive_name = v)}
                    />
                    <TextField
                        label="Address"
                        placeholder="e.g., 123 Main Street, New York, NY 10001"
                        value={draft.drive_address.clone()}
                        on_change={draft_field(&draft, edit, |d, v: String| d.drive_address = v)}
                    />
                    <div class="form-row">
                        <TextField
                            label="Manager First Name"
                            value={draft.manager_first_name.clone()}
                            on_change={draft_field(&draft, edit, |d, v: String| d.manager_first_name = v)}
                        />
                        <TextField
                            label="Manager Last Name"
                            value={draft.manager_last_name.clone()}
                            on_change={draft_field(&draft, edit, |d, v: String| d.manager_last_name = v)}
                        />
                    </div>
                    <div class="form-row">
                        <TextField
                            label="Phone Number"
                            input_type="tel"
                            placeholder="555-123-4567"
                            value={draft.phone_num.clone()}
                            on_change={draft_field(&draft, edit, |d, v: String| d.phone_num = v)}
                        />
                        <DateField
                            label="Last Drive Date"
                            value={draft.last_drive_date}
                            on_change={draft_field(&draft, edit, |d, v: Option<NaiveDate>| d.last_drive_date = v)}
                        />
                    </div>
                </FormModal>
            }
        }
    };

    let on_add = {
        let open_add = actions.open_add.clone();
        Callback::from(move |_: MouseEvent| open_add.emit(()))
    };

    html! {
        <div>
            <PageHeader title="Blood Drives" subtitle={format!("Total Drives: {}", data.drives.len())} />

            <div class="controls-container">
                <input
                    type="text"
                    class="search-input"
                    placeholder="Search by drive name, address, or manager..."
                    value={state.filter.search.clone()}
                    oninput={search_input(&state.filter, &actions.set_filter, |f, v| f.search = v)}
                />
                <button class="btn btn-primary" onclick={on_add}>{"+ Add Blood Drive"}</button>
            </div>

            <div class="data-table">
                <table>
                    <thead>
                        <tr>
                            <th>{"Drive ID"}</th>
                            <th>{"Drive Name"}</th>
                            <th>{"Address"}</th>
                            <th>{"Manager"}</th>
                            <th>{"Phone"}</th>
                            <th>{"Last Drive Date"}</th>
                            <th>{"Actions"}</th>
                        </tr>
                    </thead>
                    <tbody>
                        if rows.is_empty() {
                            <tr><td colspan="7" class="empty-message">{"No blood drives found"}</td></tr>
                        } else {
                            {for rows.iter().map(|drive| {
                                let id = drive.drive_id;
                                let on_view = {
                                    let view_donors = view_donors.clone();
                                    Callback::from(move |_: MouseEvent| view_donors.emit(id))
                                };
                                let on_edit = {
                                    let open_edit = actions.open_edit.clone();
                                    let drive = (*drive).clone();
                                    Callback::from(move |_: MouseEvent| open_edit.emit(drive.clone()))
                                };
                                let on_delete = {
                                    let request_delete = actions.request_delete.clone();
                                    Callback::from(move |_: MouseEvent| request_delete.emit(id))
                                };
                                html! {
                                    <tr key={id}>
                                        <td><strong>{format!("#{}", id)}</strong></td>
                                        <td>{drive.drive_name.clone()}</td>
                                        <td>{drive.drive_address.clone()}</td>
                                        <td>{drive.manager_name()}</td>
                                        <td>{drive.phone_num.clone()}</td>
                                        <td>{drive.last_drive_date.map(format_input_date).unwrap_or_default()}</td>
                                        <td>
                                            <button class="btn btn-success btn-small" onclick={on_view}>{"View Donors"}</button>
                                            <button class="btn btn-primary btn-small" onclick={on_edit}>{"Edit"}</button>
                                            <button class="btn btn-danger btn-small" onclick={on_delete}>{"Delete"}</button>
                                        </td>
                                    </tr>
                                }
                            })}
                        }
                    </tbody>
                </table>
            </div>

            {modal}

            if let Some(result) = (*roster).clone() {
                <DriveDonorsModal roster={result} on_close={close_roster} />
            }

            <ConfirmDialog
                is_open={state.pending_delete.is_some()}
                message="Are you sure you want to delete this blood drive?"
                on_confirm={actions.confirm_delete.clone()}
                on_cancel={actions.cancel_delete.clone()}
            />
            <AlertDialog message={state.mutation_error.clone()} on_dismiss={actions.dismiss_error.clone()} />
            <AlertDialog message={(*roster_error).clone()} on_dismiss={dismiss_roster_error} />
        </div>
    }
}
