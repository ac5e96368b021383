use yew::prelude::*;
use yew_router::prelude::*;

use crate::components::PageHeader;
use crate::routes::Route;

#[function_component(NotFoundView)]
pub fn not_found_view() -> Html {
    html! {
        <div>
            <PageHeader title="Page Not Found" />
            <p>{"The page you are looking for does not exist."}</p>
            <Link<Route> to={Route::Dashboard} classes={classes!("btn", "btn-primary")}>{"Back to Dashboard"}</Link<Route>>
        </div>
    }
}
