use futures::future::{FutureExt, LocalBoxFuture};
use shared::{dashboard_alerts, BloodUnit, DashboardSummary, LoadState, LowStock};
use std::rc::Rc;
use yew::prelude::*;

use crate::components::{AlertItem, ErrorBanner, LoadingView, PageHeader, StatCard};
use crate::hooks::use_app_context::use_app_context;
use crate::hooks::use_request_scope::use_request_scope;
use crate::hooks::use_view_data::{use_view_data, ViewData};
use crate::services::api::{ApiClient, ApiError};
use crate::services::config::AppConfig;
use crate::services::date_utils::{format_date_for_display, format_input_date};
use crate::views::id_label;

/// The three aggregate responses behind the dashboard, fetched together
pub struct DashboardData {
    pub summary: DashboardSummary,
    pub expiring: Vec<BloodUnit>,
    pub low_stock: LowStock,
}

impl ViewData for DashboardData {
    const NAME: &'static str = "dashboard";
    const LOAD_ERROR: &'static str = "unavailable";

    fn load(api: ApiClient, config: Rc<AppConfig>) -> LocalBoxFuture<'static, Result<Self, ApiError>> {
        async move {
            let (summary, expiring, low_stock) = futures::try_join!(
                api.dashboard_summary(),
                api.expiring_units(config.dashboard_expiry_horizon_days),
                api.low_stock(config.low_stock_threshold),
            )?;
            Ok(Self {
                summary,
                expiring,
                low_stock,
            })
        }
        .boxed_local()
    }
}

/// One stat card: title, count and color variant
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryCard {
    pub title: &'static str,
    pub value: u32,
    pub variant: &'static str,
}

impl SummaryCard {
    fn new(title: &'static str, value: u32, variant: &'static str) -> Self {
        Self { title, value, variant }
    }
}

/// The backend's expiring counter is fixed at seven days, independent of the
/// expiring-units table horizon.
pub fn summary_cards(summary: &DashboardSummary) -> Vec<SummaryCard> {
    vec![
        SummaryCard::new("Total Donors", summary.total_donors, "info"),
        SummaryCard::new(
            "Eligible Donors (Last seen at least 60 days before)",
            summary.eligible_donors,
            "success",
        ),
        SummaryCard::new("Available Units", summary.available_units, "info"),
        SummaryCard::new("Expiring (Within 7 Days)", summary.expiring_7days, "warning"),
        SummaryCard::new("Expired Units", summary.expired_units, "alert"),
        SummaryCard::new("Urgent Requests", summary.urgent_requests, "alert"),
        SummaryCard::new("Request Completed Today", summary.completed_requests_today, "success"),
    ]
}

#[function_component(DashboardView)]
pub fn dashboard_view() -> Html {
    let context = use_app_context();
    let scope = use_request_scope();
    let data = use_view_data::<DashboardData>(&scope);

    let data = match &data.state {
        LoadState::Loading => return html! { <LoadingView message="Loading" /> },
        LoadState::Failed(message) => {
            return html! {
                <div>
                    <PageHeader title="Dashboard" />
                    <ErrorBanner message={message.clone()} />
                </div>
            }
        }
        LoadState::Ready(data) => data.clone(),
    };

    let summary = &data.summary;
    let alerts = dashboard_alerts(summary, &data.low_stock);
    let horizon = context.config.dashboard_expiry_horizon_days;
    let expiring: Vec<&BloodUnit> = data
        .expiring
        .iter()
        .take(context.config.dashboard_expiring_rows)
        .collect();

    html! {
        <div>
            <PageHeader
                title="Dashboard"
                subtitle={format!("System Date: {}", format_date_for_display(&summary.system_date))}
            />

            <div class="stats-grid">
                {for summary_cards(summary).into_iter().map(|card| html! {
                    <StatCard title={card.title} value={card.value} variant={card.variant} />
                })}
            </div>

            if !alerts.is_empty() {
                <div class="alerts-section">
                    <h3>{"Alerts"}</h3>
                    {for alerts.into_iter().map(|alert| html! { <AlertItem {alert} /> })}
                </div>
            }

            if !expiring.is_empty() {
                <div class="data-table">
                    <h3>{format!("Units Expiring Soon ({} Days)", horizon)}</h3>
                    <table>
                        <thead>
                            <tr>
                                <th>{"Unit ID"}</th>
                                <th>{"Donor ID"}</th>
                                <th>{"Donation Date"}</th>
                                <th>{"Expiry Date"}</th>
                                <th>{"Status"}</th>
                            </tr>
                        </thead>
                        <tbody>
                            {for expiring.iter().map(|unit| html! {
                                <tr key={unit.unit_id}>
                                    <td>{format!("#{}", unit.unit_id)}</td>
                                    <td>{id_label(unit.donor_id)}</td>
                                    <td>{format_input_date(unit.donation_date)}</td>
                                    <td>{format_input_date(unit.expiry_date)}</td>
                                    <td>
                                        <span class={classes!("status-badge", unit.unit_status.css_class())}>
                                            {unit.unit_status.to_string()}
                                        </span>
                                    </td>
                                </tr>
                            })}
                        </tbody>
                    </table>
                </div>
            }
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expiring_card_shows_seven_day_counter() {
        let summary = DashboardSummary {
            expiring_24h: 1,
            expiring_7days: 4,
            ..DashboardSummary::default()
        };

        let cards = summary_cards(&summary);
        let expiring = cards
            .iter()
            .find(|card| card.title.starts_with("Expiring"))
            .unwrap();
        assert_eq!(expiring.title, "Expiring (Within 7 Days)");
        assert_eq!(expiring.value, 4);
        assert_eq!(cards.len(), 7);
    }
}
