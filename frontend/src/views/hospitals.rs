use futures::future::{FutureExt, LocalBoxFuture};
use shared::{Hospital, HospitalDraft, HospitalFilter, LoadState, ModalState};
use std::rc::Rc;
use web_sys::MouseEvent;
use yew::prelude::*;

use crate::components::{AlertDialog, ConfirmDialog, ErrorBanner, FormModal, LoadingView, PageHeader, TextAreaField, TextField};
use crate::hooks::use_crud::use_crud;
use crate::hooks::use_request_scope::use_request_scope;
use crate::hooks::use_view_data::{use_view_data, ViewData};
use crate::services::api::{ApiClient, ApiError};
use crate::services::config::AppConfig;
use crate::views::{draft_field, search_input};

#[derive(Clone, PartialEq)]
pub struct HospitalsData {
    pub hospitals: Vec<Hospital>,
}

impl ViewData for HospitalsData {
    const NAME: &'static str = "hospitals";
    const LOAD_ERROR: &'static str = "Failed to load hospitals";

    fn load(api: ApiClient, _config: Rc<AppConfig>) -> LocalBoxFuture<'static, Result<Self, ApiError>> {
        async move {
            let hospitals = api.list::<Hospital>().await?;
            Ok(Self { hospitals })
        }
        .boxed_local()
    }
}

#[function_component(HospitalsView)]
pub fn hospitals_view() -> Html {
    let scope = use_request_scope();
    let data = use_view_data::<HospitalsData>(&scope);
    let crud = use_crud::<Hospital, HospitalFilter>(&scope, data.reload.clone());
    let state = &crud.state;
    let actions = &crud.actions;

    let data = match &data.state {
        LoadState::Loading => return html! { <LoadingView message="Loading hospitals" /> },
        LoadState::Failed(message) => {
            return html! {
                <div>
                    <PageHeader title="Hospitals" />
                    <ErrorBanner message={message.clone()} />
                </div>
            }
        }
        LoadState::Ready(data) => data.clone(),
    };

    let rows = state.filter.apply(&data.hospitals);

    let modal = match &state.modal {
        ModalState::Closed => html! {},
        modal => {
            let editing = matches!(modal, ModalState::Editing { .. });
            let draft: HospitalDraft = modal.draft().cloned().unwrap_or_default();
            let edit = &actions.edit_draft;
            html! {
                <FormModal
                    title={if editing { "Edit Hospital" } else { "Add New Hospital" }}
                    submit_label={if editing { "Update Hospital" } else { "Add Hospital" }}
                    submitting={state.submitting}
                    missing={shared::Draft::missing_fields(&draft)}
                    on_submit={actions.submit.clone()}
                    on_close={actions.close_modal.clone()}
                >
                    <TextField
                        label="Hospital Name"
                        value={draft.hospital_name.clone()}
                        on_change={draft_field(&draft, edit, |d, v: String| d.hospital_name = v)}
                    />
                    <TextAreaField
                        label="Address"
                        value={draft.address.clone()}
                        on_change={draft_field(&draft, edit, |d, v: String| d.address = v)}
                    />
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
            <PageHeader title="Hospitals" subtitle={format!("Total Hospitals: {}", data.hospitals.len())} />

            <div class="controls-container">
                <input
                    type="text"
                    class="search-input"
                    placeholder="Search by name or address..."
                    value={state.filter.search.clone()}
                    oninput={search_input(&state.filter, &actions.set_filter, |f, v| f.search = v)}
                />
                <button class="btn btn-primary" onclick={on_add}>{"+ Add Hospital"}</button>
            </div>

            <div class="data-table">
                <table>
                    <thead>
                        <tr>
                            <th>{"ID"}</th>
                            <th>{"Hospital Name"}</th>
                            <th>{"Address"}</th>
                            <th>{"Actions"}</th>
                        </tr>
                    </thead>
                    <tbody>
                        if rows.is_empty() {
                            <tr><td colspan="4" class="empty-message">{"No hospitals found"}</td></tr>
                        } else {
                            {for rows.iter().map(|hospital| {
                                let on_edit = {
                                    let open_edit = actions.open_edit.clone();
                                    let hospital = (*hospital).clone();
                                    Callback::from(move |_: MouseEvent| open_edit.emit(hospital.clone()))
                                };
                                let on_delete = {
                                    let request_delete = actions.request_delete.clone();
                                    let id = hospital.hospital_id;
                                    Callback::from(move |_: MouseEvent| request_delete.emit(id))
                                };
                                html! {
                                    <tr key={hospital.hospital_id}>
                                        <td>{format!("#{}", hospital.hospital_id)}</td>
                                        <td><strong>{hospital.hospital_name.clone()}</strong></td>
                                        <td>{hospital.address.clone()}</td>
                                        <td>
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

            <ConfirmDialog
                is_open={state.pending_delete.is_some()}
                message="Are you sure you want to delete this hospital?"
                on_confirm={actions.confirm_delete.clone()}
                on_cancel={actions.cancel_delete.clone()}
            />
            <AlertDialog message={state.mutation_error.clone()} on_dismiss={actions.dismiss_error.clone()} />
        </div>
    }
}
