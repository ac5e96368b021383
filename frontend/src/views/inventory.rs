use chrono::NaiveDate;
use futures::future::{FutureExt, LocalBoxFuture};
use shared::{
    choice_value, days_left_class, days_left_label, days_until_expiry, parse_choice, unit_blood_type, BloodType,
    BloodUnit, BloodUnitDraft, Donor, Draft, EntityIndex, ExpiryBucket, InventoryByType, LoadState, ModalState,
    Mutation, Reload, ReloadPolicy, Resource, StockLevel, UnitFilter, UnitStatus, ALL_OPTION,
};
use std::rc::Rc;
use web_sys::MouseEvent;
use yew::prelude::*;

use crate::components::{
    AlertDialog, ConfirmDialog, DateField, ErrorBanner, FormModal, LoadingView, PageHeader, Select, SelectField,
    SelectOption,
};
use crate::hooks::use_app_context::use_app_context;
use crate::hooks::use_crud::use_crud;
use crate::hooks::use_request_scope::use_request_scope;
use crate::hooks::use_view_data::{use_view_data, ViewData};
use crate::services::api::{ApiClient, ApiError};
use crate::services::config::AppConfig;
use crate::services::date_utils::{format_input_date, operational_now};
use crate::views::{draft_field, id_label, search_input};

pub struct InventoryData {
    pub units: Vec<BloodUnit>,
    pub donors: EntityIndex<Donor>,
    pub by_type: InventoryByType,
    /// Units inside the inventory expiry horizon
    pub expiring: Vec<BloodUnit>,
}

impl ViewData for InventoryData {
    const NAME: &'static str = "inventory";
    const LOAD_ERROR: &'static str = "Failed to load inventory";

    fn load(api: ApiClient, config: Rc<AppConfig>) -> LocalBoxFuture<'static, Result<Self, ApiError>> {
        async move {
            let (units, donors, by_type, expiring) = futures::try_join!(
                api.list::<BloodUnit>(),
                api.list::<Donor>(),
                api.inventory_by_type(),
                api.expiring_units(config.inventory_expiry_horizon_days),
            )?;
            Ok(Self {
                units,
                donors: EntityIndex::build(donors),
                by_type,
                expiring,
            })
        }
        .boxed_local()
    }
}

impl InventoryData {
    pub fn available_count(&self) -> usize {
        self.units.iter().filter(|unit| unit.is_available()).count()
    }
}

fn status_options() -> Vec<SelectOption> {
    UnitStatus::ALL.iter().map(|s| SelectOption::new(s, s)).collect()
}

fn donor_options(donors: &EntityIndex<Donor>) -> Vec<SelectOption> {
    std::iter::once(SelectOption::new(ALL_OPTION, "Select Donor"))
        .chain(donors.iter().map(|donor| {
            SelectOption::new(
                donor.donor_id,
                format!("#{} - {} ({})", donor.donor_id, donor.full_name(), donor.blood_type),
            )
        }))
        .collect()
}

/// Marking expired units is a bulk change to the unit collection
fn reloads_after_mark_expired(policy: &dyn ReloadPolicy) -> bool {
    policy.after(BloodUnit::COLLECTION, &Mutation::Bulk) == Reload::Full
}

#[derive(Properties, PartialEq)]
struct StockGridProps {
    by_type: InventoryByType,
    low_threshold: u32,
}

#[function_component(StockGrid)]
fn stock_grid(props: &StockGridProps) -> Html {
    html! {
        <div class="inventory-section">
            <h3>{"Inventory by Blood Type"}</h3>
            <div class="blood-type-grid">
                {for BloodType::ALL.iter().map(|bt| {
                    let count = props.by_type.get(bt).copied().unwrap_or(0);
                    let level = StockLevel::from_count(count, props.low_threshold);
                    html! {
                        <div class={classes!("blood-type-card", level.css_class())}>
                            <div class="blood-type">{bt.as_str()}</div>
                            <div class="count">{count}</div>
                            <div class="label">{"available"}</div>
                        </div>
                    }
                })}
            </div>
        </div>
    }
}

#[function_component(InventoryView)]
pub fn inventory_view() -> Html {
    let context = use_app_context();
    let scope = use_request_scope();
    let data = use_view_data::<InventoryData>(&scope);
    let crud = use_crud::<BloodUnit, UnitFilter>(&scope, data.reload.clone());
    let notice = use_state(|| None::<String>);
    let state = &crud.state;
    let actions = &crud.actions;

    let on_mark_expired = {
        let api = context.api.clone();
        let policy = context.reload_policy.clone();
        let scope = scope.clone();
        let reload = data.reload.clone();
        let notice = notice.clone();
        Callback::from(move |_: MouseEvent| {
            let api = api.clone();
            let policy = policy.clone();
            let reload = reload.clone();
            let notice = notice.clone();
            scope.spawn(async move {
                match api.mark_expired().await {
                    Ok(response) => {
                        log::info!(target: "inventory", "marked {} units expired", response.count);
                        notice.set(Some(response.message));
                        if reloads_after_mark_expired(policy.as_ref()) {
                            reload.emit(());
                        }
                    }
                    Err(e) => {
                        log::error!(target: "inventory", "mark expired failed: {}", e);
                        notice.set(Some(e.user_message("Failed to mark expired units")));
                    }
                }
            });
        })
    };

    let dismiss_notice = {
        let notice = notice.clone();
        Callback::from(move |_: ()| notice.set(None))
    };

    let data = match &data.state {
        LoadState::Loading => return html! { <LoadingView message="Loading inventory..." /> },
        LoadState::Failed(message) => {
            return html! {
                <div>
                    <PageHeader title="Blood Inventory" />
                    <ErrorBanner message={message.clone()} />
                </div>
            }
        }
        LoadState::Ready(data) => data.clone(),
    };

    let now = operational_now(&context.config);
    let horizon = context.config.inventory_expiry_horizon_days;
    let rows = state.filter.apply(&data.units, &data.donors);

    let modal = match &state.modal {
        ModalState::Closed => html! {},
        modal => {
            let editing = matches!(modal, ModalState::Editing { .. });
            let draft: BloodUnitDraft = modal.draft().cloned().unwrap_or_default();
            let edit = &actions.edit_draft;
            html! {
                <FormModal
                    title={if editing { "Edit Blood Unit" } else { "Add New Blood Unit" }}
                    submit_label={if editing { "Update Unit" } else { "Add Unit" }}
                    submitting={state.submitting}
                    missing={draft.missing_fields()}
                    on_submit={actions.submit.clone()}
                    on_close={actions.close_modal.clone()}
                >
                    <SelectField
                        label="Donor"
                        value={choice_value(&draft.donor_id)}
                        options={donor_options(&data.donors)}
                        on_change={draft_field(&draft, edit, |d, v: String| d.donor_id = parse_choice(&v))}
                    />
                    <div class="form-row">
                        <DateField
                            label="Donation Date"
                            value={draft.donation_date}
                            on_change={draft_field(&draft, edit, |d, v: Option<NaiveDate>| d.donation_date = v)}
                        />
                        <DateField
                            label="Expiry Date"
                            value={draft.expiry_date}
                            on_change={draft_field(&draft, edit, |d, v: Option<NaiveDate>| d.expiry_date = v)}
                        />
                    </div>
                    <SelectField
                        label="Status"
                        value={draft.unit_status.to_string()}
                        options={status_options()}
                        on_change={draft_field(&draft, edit, |d, v: String| {
                            if let Some(status) = parse_choice(&v) {
                                d.unit_status = status;
                            }
                        })}
                    />
                </FormModal>
            }
        }
    };

    let on_add = {
        let open_add = actions.open_add.clone();
        Callback::from(move |_: MouseEvent| open_add.emit(()))
    };

    let blood_type_filter: Vec<SelectOption> = std::iter::once(SelectOption::new(ALL_OPTION, "All Blood Types"))
        .chain(BloodType::ALL.iter().map(|bt| SelectOption::new(bt, bt)))
        .collect();
    let status_filter: Vec<SelectOption> = std::iter::once(SelectOption::new(ALL_OPTION, "All Status"))
        .chain(status_options())
        .collect();

    html! {
        <div>
            <PageHeader
                title="Blood Inventory"
                subtitle={format!("Total Units: {} | Available: {}", data.units.len(), data.available_count())}
            />

            <StockGrid by_type={data.by_type.clone()} low_threshold={context.config.low_stock_threshold} />

            if !data.expiring.is_empty() {
                <div class="alert-item warning">
                    <div>
                        <strong>{format!("Units Expiring Soon ({} Days)", horizon)}</strong>
                        <p>{format!("{} units will expire in the next {} days", data.expiring.len(), horizon)}</p>
                    </div>
                    <span>{"Review inventory"}</span>
                </div>
            }

            <div class="controls-container">
                <input
                    type="text"
                    class="search-input"
                    placeholder="Search by Unit ID..."
                    value={state.filter.search_id.clone()}
                    oninput={search_input(&state.filter, &actions.set_filter, |f, v| f.search_id = v)}
                />
                <Select
                    value={choice_value(&state.filter.blood_type)}
                    options={blood_type_filter}
                    on_change={draft_field(&state.filter, &actions.set_filter, |f, v: String| f.blood_type = parse_choice(&v))}
                />
                <Select
                    value={choice_value(&state.filter.status)}
                    options={status_filter}
                    on_change={draft_field(&state.filter, &actions.set_filter, |f, v: String| f.status = parse_choice(&v))}
                />
                <button class="btn btn-primary" onclick={on_add}>{"+ Add Blood Unit"}</button>
                <button class="btn btn-warning" onclick={on_mark_expired}>{"Mark Expired Units"}</button>
            </div>

            <div class="data-table">
                <table>
                    <thead>
                        <tr>
                            <th>{"Unit ID"}</th>
                            <th>{"Blood Type"}</th>
                            <th>{"Donor ID"}</th>
                            <th>{"Donation Date"}</th>
                            <th>{"Expiry Date"}</th>
                            <th>{"Days Left"}</th>
                            <th>{"Status"}</th>
                            <th>{"Actions"}</th>
                        </tr>
                    </thead>
                    <tbody>
                        if rows.is_empty() {
                            <tr><td colspan="8" class="empty-message">{"No blood units found"}</td></tr>
                        } else {
                            {for rows.iter().map(|unit| {
                                let days = days_until_expiry(unit.expiry_date, now);
                                let bucket = ExpiryBucket::from_days(days);
                                let blood_type = unit_blood_type(&data.donors, unit)
                                    .map(|bt| bt.to_string())
                                    .unwrap_or_else(|| shared::derived::UNKNOWN_LABEL.to_string());

                                let on_status = {
                                    let change_status = actions.change_status.clone();
                                    let unit = (*unit).clone();
                                    Callback::from(move |value: String| {
                                        if let Some(status) = parse_choice::<UnitStatus>(&value) {
                                            change_status.emit((unit.unit_id, unit.with_status(status)));
                                        }
                                    })
                                };
                                let on_edit = {
                                    let open_edit = actions.open_edit.clone();
                                    let unit = (*unit).clone();
                                    Callback::from(move |_: MouseEvent| open_edit.emit(unit.clone()))
                                };
                                let on_delete = {
                                    let request_delete = actions.request_delete.clone();
                                    let id = unit.unit_id;
                                    Callback::from(move |_: MouseEvent| request_delete.emit(id))
                                };

                                html! {
                                    <tr key={unit.unit_id} class={classes!("unit-row", bucket.css_class())}>
                                        <td><strong>{format!("#{}", unit.unit_id)}</strong></td>
                                        <td><span class="blood-type-badge">{blood_type}</span></td>
                                        <td>{id_label(unit.donor_id)}</td>
                                        <td>{format_input_date(unit.donation_date)}</td>
                                        <td>{format_input_date(unit.expiry_date)}</td>
                                        <td>
                                            <span class={classes!("days-left", days_left_class(days))}>
                                                {days_left_label(days)}
                                            </span>
                                        </td>
                                        <td>
                                            <Select
                                                class="status-select"
                                                value={unit.unit_status.to_string()}
                                                options={status_options()}
                                                on_change={on_status}
                                            />
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
                message="Are you sure you want to delete this blood unit?"
                on_confirm={actions.confirm_delete.clone()}
                on_cancel={actions.cancel_delete.clone()}
            />
            <AlertDialog message={state.mutation_error.clone()} on_dismiss={actions.dismiss_error.clone()} />
            <AlertDialog title="Inventory" message={(*notice).clone()} on_dismiss={dismiss_notice} />
        </div>
    }
}
