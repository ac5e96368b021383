use yew::prelude::*;
use yew_router::prelude::*;

use crate::routes::Route;

#[function_component(Sidebar)]
pub fn sidebar() -> Html {
    let current = use_route::<Route>();

    html! {
        <div class="sidebar">
            <h1>{"Blood Bank"}</h1>
            <nav>
                <ul>
                    {for Route::NAV.iter().map(|route| {
                        let active = current.as_ref() == Some(route);
                        html! {
                            <li>
                                <Link<Route> to={*route} classes={classes!(active.then_some("active"))}>
                                    {route.label()}
                                </Link<Route>>
                            </li>
                        }
                    })}
                </ul>
            </nav>
        </div>
    }
}
