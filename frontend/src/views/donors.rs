use chrono::NaiveDate;
use futures::future::{FutureExt, LocalBoxFuture};
use shared::{
    choice_value, parse_choice, resolve_drive_name, BloodDrive, BloodType, Donor, DonorDraft, DonorFilter, Draft,
    EntityIndex, LoadState, ModalState, ALL_OPTION,
};
use std::rc::Rc;
use web_sys::MouseEvent;
use yew::prelude::*;

use crate::components::{
    AlertDialog, ConfirmDialog, DateField, ErrorBanner, FormModal, LoadingView, PageHeader, Select, SelectField,
    SelectOption, TextField,
};
use crate::hooks::use_crud::use_crud;
use crate::hooks::use_request_scope::use_request_scope;
use crate::hooks::use_view_data::{use_view_data, ViewData};
use crate::services::api::{ApiClient, ApiError};
use crate::services::config::AppConfig;
use crate::services::date_utils::format_input_date;
use crate::views::{draft_field, search_input};

pub struct DonorsData {
    pub donors: Vec<Donor>,
    pub drives: EntityIndex<BloodDrive>,
}

impl ViewData for DonorsData {
    const NAME: &'static str = "donors";
    const LOAD_ERROR: &'static str = "Failed to load data";

    fn load(api: ApiClient, _config: Rc<AppConfig>) -> LocalBoxFuture<'static, Result<Self, ApiError>> {
        async move {
            let (donors, drives) = futures::try_join!(api.list::<Donor>(), api.list::<BloodDrive>())?;
            Ok(Self {
                donors,
                drives: EntityIndex::build(drives),
            })
        }
        .boxed_local()
    }
}

fn blood_type_options(with_all: bool) -> Vec<SelectOption> {
    let all = with_all.then(|| SelectOption::new(ALL_OPTION, "All Blood Types"));
    all.into_iter()
        .chain(BloodType::ALL.iter().map(|bt| SelectOption::new(bt, bt)))
        .collect()
}

fn drive_options(drives: &EntityIndex<BloodDrive>) -> Vec<SelectOption> {
    std::iter::once(SelectOption::new(ALL_OPTION, "No Blood Drive"))
        .chain(drives.iter().map(|drive| {
            let date = drive
                .last_drive_date
                .map(format_input_date)
                .unwrap_or_default();
            SelectOption::new(drive.drive_id, format!("{} - {}", drive.drive_name, date))
        }))
        .collect()
}

#[function_component(DonorsView)]
pub fn donors_view() -> Html {
    let scope = use_request_scope();
    let data = use_view_data::<DonorsData>(&scope);
    let crud = use_crud::<Donor, DonorFilter>(&scope, data.reload.clone());
    let state = &crud.state;
    let actions = &crud.actions;

    let data = match &data.state {
        LoadState::Loading => return html! { <LoadingView message="Loading donors" /> },
        LoadState::Failed(message) => {
            return html! {
                <div>
                    <PageHeader title="Donors" />
                    <ErrorBanner message={message.clone()} />
                </div>
            }
        }
        LoadState::Ready(data) => data.clone(),
    };

    let rows = state.filter.apply(&data.donors);

    let modal = match &state.modal {
        ModalState::Closed => html! {},
        modal => {
            let editing = matches!(modal, ModalState::Editing { .. });
            let draft: DonorDraft = modal.draft().cloned().unwrap_or_default();
            let edit = &actions.edit_draft;
            html! {
                <FormModal
                    title={if editing { "Edit Donor" } else { "Add New Donor" }}
                    submit_label={if editing { "Update Donor" } else { "Add Donor" }}
                    submitting={state.submitting}
                    missing={draft.missing_fields()}
                    on_submit={actions.submit.clone()}
                    on_close={actions.close_modal.clone()}
                >
                    <div class="form-row">
                        <TextField
                            label="First Name"
                            value={draft.first_name.clone()}
                            on_change={draft_field(&draft, edit, |d, v: String| d.first_name = v)}
                        />
                        <TextField
                            label="Last Name"
                            value={draft.last_name.clone()}
                            on_change={draft_field(&draft, edit, |d, v: String| d.last_name = v)}
                        />
                    </div>
                    <div class="form-row">
                        <SelectField
                            label="Blood Type"
                            value={draft.blood_type.to_string()}
                            options={blood_type_options(false)}
                            on_change={draft_field(&draft, edit, |d, v: String| {
                                if let Some(bt) = parse_choice(&v) {
                                    d.blood_type = bt;
                                }
                            })}
                        />
                        <TextField
                            label="Phone Number"
                            input_type="tel"
                            value={draft.phone_num.clone()}
                            on_change={draft_field(&draft, edit, |d, v: String| d.phone_num = v)}
                        />
                    </div>
                    <DateField
                        label="Last Donated Date"
                        required=false
                        value={draft.last_donated_date}
                        on_change={draft_field(&draft, edit, |d, v: Option<NaiveDate>| d.last_donated_date = v)}
                    />
                    <div class="form-group">
                        <label>{"Blood Drive"}</label>
                        <Select
                            class="form-input"
                            value={choice_value(&draft.drive_id)}
                            options={drive_options(&data.drives)}
                            on_change={draft_field(&draft, edit, |d, v: String| d.drive_id = parse_choice(&v))}
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
            <PageHeader title="Donors" subtitle={format!("Total Donors: {}", data.donors.len())} />

            <div class="controls-container">
                <input
                    type="text"
                    class="search-input"
                    placeholder="Search by name or ID"
                    value={state.filter.search.clone()}
                    oninput={search_input(&state.filter, &actions.set_filter, |f, v| f.search = v)}
                />
                <Select
                    value={choice_value(&state.filter.blood_type)}
                    options={blood_type_options(true)}
                    on_change={draft_field(&state.filter, &actions.set_filter, |f, v: String| f.blood_type = parse_choice(&v))}
                />
                <button class="btn btn-primary" onclick={on_add}>{"+ Add Donor"}</button>
            </div>

            <div class="data-table">
                <table>
                    <thead>
                        <tr>
                            <th>{"ID"}</th>
                            <th>{"Name"}</th>
                            <th>{"Blood Type"}</th>
                            <th>{"Phone"}</th>
                            <th>{"Last Donated"}</th>
                            <th>{"Blood Drive"}</th>
                            <th>{"Actions"}</th>
                        </tr>
                    </thead>
                    <tbody>
                        if rows.is_empty() {
                            <tr><td colspan="7" class="empty-message">{"No donors found"}</td></tr>
                        } else {
                            {for rows.iter().map(|donor| {
                                let on_edit = {
                                    let open_edit = actions.open_edit.clone();
                                    let donor = (*donor).clone();
                                    Callback::from(move |_: MouseEvent| open_edit.emit(donor.clone()))
                                };
                                let on_delete = {
                                    let request_delete = actions.request_delete.clone();
                                    let id = donor.donor_id;
                                    Callback::from(move |_: MouseEvent| request_delete.emit(id))
                                };
                                let last_donated = donor
                                    .last_donated_date
                                    .map(format_input_date)
                                    .unwrap_or_else(|| "Never".to_string());
                                html! {
                                    <tr key={donor.donor_id}>
                                        <td>{format!("#{}", donor.donor_id)}</td>
                                        <td><strong>{donor.full_name()}</strong></td>
                                        <td><span class="blood-type-badge">{donor.blood_type.to_string()}</span></td>
                                        <td>{donor.phone_num.clone()}</td>
                                        <td>{last_donated}</td>
                                        <td>{resolve_drive_name(&data.drives, donor.drive_id)}</td>
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
                message="Are you sure you want to delete this donor?"
                on_confirm={actions.confirm_delete.clone()}
                on_cancel={actions.cancel_delete.clone()}
            />
            <AlertDialog message={state.mutation_error.clone()} on_dismiss={actions.dismiss_error.clone()} />
        </div>
    }
}
