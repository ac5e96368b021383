use shared::DashboardAlert;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct PageHeaderProps {
    pub title: AttrValue,
    #[prop_or_default]
    pub subtitle: AttrValue,
}

#[function_component(PageHeader)]
pub fn page_header(props: &PageHeaderProps) -> Html {
    html! {
        <div class="page-header">
            <h2>{props.title.clone()}</h2>
            if !props.subtitle.is_empty() {
                <p>{props.subtitle.clone()}</p>
            }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct MessageProps {
    pub message: AttrValue,
}

#[function_component(LoadingView)]
pub fn loading_view(props: &MessageProps) -> Html {
    html! { <div class="loading">{props.message.clone()}</div> }
}

/// Page-level load failure, shown instead of the view's content
#[function_component(ErrorBanner)]
pub fn error_banner(props: &MessageProps) -> Html {
    html! { <div class="error">{props.message.clone()}</div> }
}

#[derive(Properties, PartialEq)]
pub struct StatCardProps {
    pub title: AttrValue,
    pub value: u32,
    /// info, success, warning or alert
    #[prop_or_else(|| AttrValue::from("info"))]
    pub variant: AttrValue,
}

#[function_component(StatCard)]
pub fn stat_card(props: &StatCardProps) -> Html {
    html! {
        <div class={classes!("stat-card", props.variant.to_string())}>
            <h3>{props.title.clone()}</h3>
            <div class="value">{props.value}</div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct AlertItemProps {
    pub alert: DashboardAlert,
}

/// One banner row in an alerts section
#[function_component(AlertItem)]
pub fn alert_item(props: &AlertItemProps) -> Html {
    html! {
        <div class={classes!("alert-item", props.alert.severity.css_class())}>
            <span>{props.alert.message.clone()}</span>
            <span>{props.alert.action.clone()}</span>
        </div>
    }
}
