use chrono::NaiveDate;
use futures::future::{FutureExt, LocalBoxFuture};
use shared::{
    choice_value, count_with_status, parse_choice, resolve_hospital_name, resolve_unit_info, BloodRequest,
    BloodRequestDraft, BloodUnit, Donor, Draft, EntityIndex, Hospital, LoadState, ModalState, RequestFilter,
    RequestStatus, ALL_OPTION,
};
use std::rc::Rc;
use web_sys::MouseEvent;
use yew::prelude::*;

use crate::components::{
    AlertDialog, ConfirmDialog, DateField, ErrorBanner, FormModal, LoadingView, PageHeader, Select, SelectField,
    SelectOption, StatCard,
};
use crate::hooks::use_app_context::use_app_context;
use crate::hooks::use_crud::use_crud;
use crate::hooks::use_request_scope::use_request_scope;
use crate::hooks::use_view_data::{use_view_data, ViewData};
use crate::services::api::{ApiClient, ApiError};
use crate::services::config::AppConfig;
use crate::services::date_utils::{format_input_date, operational_today};
use crate::views::{draft_field, search_input};

pub struct RequestsData {
    pub requests: Vec<BloodRequest>,
    pub hospitals: EntityIndex<Hospital>,
    pub units: EntityIndex<BloodUnit>,
    pub donors: EntityIndex<Donor>,
    pub urgent: Vec<BloodRequest>,
}

impl ViewData for RequestsData {
    const NAME: &'static str = "requests";
    const LOAD_ERROR: &'static str = "Failed to load requests";

    fn load(api: ApiClient, _config: Rc<AppConfig>) -> LocalBoxFuture<'static, Result<Self, ApiError>> {
        async move {
            let (requests, hospitals, units, donors, urgent) = futures::try_join!(
                api.list::<BloodRequest>(),
                api.list::<Hospital>(),
                api.list::<BloodUnit>(),
                api.list::<Donor>(),
                api.urgent_requests(),
            )?;
            Ok(Self {
                requests,
                hospitals: EntityIndex::build(hospitals),
                units: EntityIndex::build(units),
                donors: EntityIndex::build(donors),
                urgent,
            })
        }
        .boxed_local()
    }
}

fn status_options() -> Vec<SelectOption> {
    RequestStatus::ALL
        .iter()
        .map(|s| SelectOption::new(s, s.label()))
        .collect()
}

fn hospital_options(hospitals: &EntityIndex<Hospital>, placeholder: &str) -> Vec<SelectOption> {
    std::iter::once(SelectOption::new(ALL_OPTION, placeholder))
        .chain(
            hospitals
                .iter()
                .map(|h| SelectOption::new(h.hospital_id, &h.hospital_name)),
        )
        .collect()
}

/// Units a request may point at. Only available units are offered, plus the
/// unit the edited request already holds.
fn unit_options(data: &RequestsData, current: Option<u32>) -> Vec<SelectOption> {
    let offered: Vec<&BloodUnit> = data
        .units
        .iter()
        .filter(|unit| unit.is_available() || Some(unit.unit_id) == current)
        .collect();

    std::iter::once(SelectOption::new(ALL_OPTION, "Select Blood Unit"))
        .chain(offered.into_iter().map(|unit| {
            let info = resolve_unit_info(&data.units, &data.donors, unit.unit_id);
            SelectOption::new(
                unit.unit_id,
                format!("Unit #{} - {} ({})", unit.unit_id, info.blood_type, info.status),
            )
        }))
        .collect()
}

#[function_component(RequestsView)]
pub fn requests_view() -> Html {
    let context = use_app_context();
    let scope = use_request_scope();
    let data = use_view_data::<RequestsData>(&scope);
    let crud = use_crud::<BloodRequest, RequestFilter>(&scope, data.reload.clone());
    let state = &crud.state;
    let actions = &crud.actions;

    let data = match &data.state {
        LoadState::Loading => return html! { <LoadingView message="Loading requests..." /> },
        LoadState::Failed(message) => {
            return html! {
                <div>
                    <PageHeader title="Blood Requests" />
                    <ErrorBanner message={message.clone()} />
                </div>
            }
        }
        LoadState::Ready(data) => data.clone(),
    };

    let today = operational_today(&context.config);
    let rows = state.filter.apply(&data.requests);
    let count = |status| count_with_status(&data.requests, status) as u32;

    let modal = match &state.modal {
        ModalState::Closed => html! {},
        modal => {
            let editing = matches!(modal, ModalState::Editing { .. });
            let draft: BloodRequestDraft = modal.draft().cloned().unwrap_or_default();
            let edit = &actions.edit_draft;
            let available = data.units.iter().filter(|unit| unit.is_available()).count();
            html! {
                <FormModal
                    title={if editing { "Edit Request" } else { "Create New Request" }}
                    submit_label={if editing { "✓ Update Request" } else { "+ Create Request" }}
                    submitting={state.submitting}
                    missing={draft.missing_fields()}
                    on_submit={actions.submit.clone()}
                    on_close={actions.close_modal.clone()}
                >
                    <SelectField
                        label="Hospital"
                        value={choice_value(&draft.hospital_id)}
                        options={hospital_options(&data.hospitals, "Select Hospital")}
                        on_change={draft_field(&draft, edit, |d, v: String| d.hospital_id = parse_choice(&v))}
                    />
                    <SelectField
                        label={format!("Blood Unit ({} available)", available)}
                        value={choice_value(&draft.unit_id)}
                        options={unit_options(&data, draft.unit_id)}
                        on_change={draft_field(&draft, edit, |d, v: String| d.unit_id = parse_choice(&v))}
                    />
                    <div class="form-row">
                        <DateField
                            label="Request Date"
                            value={draft.request_date}
                            on_change={draft_field(&draft, edit, |d, v: Option<NaiveDate>| d.request_date = v)}
                        />
                        <SelectField
                            label="Status"
                            value={draft.req_status.to_string()}
                            options={status_options()}
                            on_change={draft_field(&draft, edit, |d, v: String| {
                                if let Some(status) = parse_choice(&v) {
                                    d.req_status = status;
                                }
                            })}
                        />
                    </div>
                    if draft.req_status == RequestStatus::Completed {
                        <DateField
                            label="Completed Date"
                            required=false
                            value={draft.completed_date}
                            on_change={draft_field(&draft, edit, |d, v: Option<NaiveDate>| d.completed_date = v)}
                        />
                    }
                </FormModal>
            }
        }
    };

    let on_add = {
        let open_add = actions.open_add.clone();
        Callback::from(move |_: MouseEvent| open_add.emit(()))
    };

    let status_filter: Vec<SelectOption> = std::iter::once(SelectOption::new(ALL_OPTION, "All Status"))
        .chain(status_options())
        .collect();

    html! {
        <div>
            <PageHeader
                title="Blood Requests"
                subtitle={format!("Total Requests: {} | Urgent: {}", data.requests.len(), data.urgent.len())}
            />

            if !data.urgent.is_empty() {
                <div class="alert-item critical">
                    <div>
                        <strong>{"Urgent Requests"}</strong>
                        <p>{format!("{} urgent requests require immediate attention", data.urgent.len())}</p>
                    </div>
                    <span>{"Action needed"}</span>
                </div>
            }

            <div class="stats-grid">
                <StatCard title="Pending" value={count(RequestStatus::Pending)} variant="warning" />
                <StatCard title="Processing" value={count(RequestStatus::Processing)} variant="info" />
                <StatCard title="In Transit" value={count(RequestStatus::Transit)} variant="info" />
                <StatCard title="Completed" value={count(RequestStatus::Completed)} variant="success" />
            </div>

            <div class="controls-container">
                <input
                    type="text"
                    class="search-input"
                    placeholder="Search by Request ID or Unit ID..."
                    value={state.filter.search_id.clone()}
                    oninput={search_input(&state.filter, &actions.set_filter, |f, v| f.search_id = v)}
                />
                <Select
                    value={choice_value(&state.filter.hospital_id)}
                    options={hospital_options(&data.hospitals, "All Hospitals")}
                    on_change={draft_field(&state.filter, &actions.set_filter, |f, v: String| f.hospital_id = parse_choice(&v))}
                />
                <Select
                    value={choice_value(&state.filter.status)}
                    options={status_filter}
                    on_change={draft_field(&state.filter, &actions.set_filter, |f, v: String| f.status = parse_choice(&v))}
                />
                <button class="btn btn-primary" onclick={on_add}>{"+ New Request"}</button>
            </div>

            <div class="data-table">
                <table>
                    <thead>
                        <tr>
                            <th>{"Request ID"}</th>
                            <th>{"Hospital"}</th>
                            <th>{"Unit ID"}</th>
                            <th>{"Blood Type"}</th>
                            <th>{"Request Date"}</th>
                            <th>{"Status"}</th>
                            <th>{"Completed Date"}</th>
                            <th>{"Actions"}</th>
                        </tr>
                    </thead>
                    <tbody>
                        if rows.is_empty() {
                            <tr><td colspan="8" class="empty-message">{"No requests found"}</td></tr>
                        } else {
                            {for rows.iter().map(|request| {
                                let info = resolve_unit_info(&data.units, &data.donors, request.unit_id);
                                let urgent = request.req_status.is_urgent();

                                let on_status = {
                                    let change_status = actions.change_status.clone();
                                    let request = (*request).clone();
                                    Callback::from(move |value: String| {
                                        if let Some(status) = parse_choice::<RequestStatus>(&value) {
                                            change_status.emit((request.request_id, request.with_status(status, today)));
                                        }
                                    })
                                };
                                let on_edit = {
                                    let open_edit = actions.open_edit.clone();
                                    let request = (*request).clone();
                                    Callback::from(move |_: MouseEvent| open_edit.emit(request.clone()))
                                };
                                let on_delete = {
                                    let request_delete = actions.request_delete.clone();
                                    let id = request.request_id;
                                    Callback::from(move |_: MouseEvent| request_delete.emit(id))
                                };
                                let status_style = format!(
                                    "background-color: {}; color: white;",
                                    request.req_status.color()
                                );

                                html! {
                                    <tr key={request.request_id} class={classes!(urgent.then_some("urgent-row"))}>
                                        <td><strong>{format!("#{}", request.request_id)}</strong></td>
                                        <td>{resolve_hospital_name(&data.hospitals, request.hospital_id)}</td>
                                        <td>{format!("#{}", request.unit_id)}</td>
                                        <td><span class="blood-type-badge">{info.blood_type}</span></td>
                                        <td>{format_input_date(request.request_date)}</td>
                                        <td>
                                            <Select
                                                class="status-select"
                                                style={AttrValue::from(status_style)}
                                                value={request.req_status.to_string()}
                                                options={status_options()}
                                                on_change={on_status}
                                            />
                                        </td>
                                        <td>
                                            {request.completed_date.map(format_input_date).unwrap_or_else(|| "-".to_string())}
                                        </td>
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
                message="Are you sure you want to delete this request?"
                on_confirm={actions.confirm_delete.clone()}
                on_cancel={actions.cancel_delete.clone()}
            />
            <AlertDialog message={state.mutation_error.clone()} on_dismiss={actions.dismiss_error.clone()} />
        </div>
    }
}
