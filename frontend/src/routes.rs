use yew::prelude::*;
use yew_router::prelude::*;

use crate::views::blood_drives::BloodDrivesView;
use crate::views::dashboard::DashboardView;
use crate::views::donors::DonorsView;
use crate::views::hospitals::HospitalsView;
use crate::views::inventory::InventoryView;
use crate::views::not_found::NotFoundView;
use crate::views::requests::RequestsView;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Routable)]
pub enum Route {
    #[at("/")]
    Dashboard,
    #[at("/donors")]
    Donors,
    #[at("/inventory")]
    Inventory,
    #[at("/hospitals")]
    Hospitals,
    #[at("/requests")]
    Requests,
    #[at("/blooddrive")]
    BloodDrives,
    #[not_found]
    #[at("/404")]
    NotFound,
}

impl Route {
    /// Sidebar entries, top to bottom
    pub const NAV: [Route; 6] = [
        Route::Dashboard,
        Route::Donors,
        Route::Inventory,
        Route::Hospitals,
        Route::Requests,
        Route::BloodDrives,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Route::Dashboard => "Dashboard",
            Route::Donors => "Donors",
            Route::Inventory => "Inventory",
            Route::Hospitals => "Hospitals",
            Route::Requests => "Requests",
            Route::BloodDrives => "Blood Drives",
            Route::NotFound => "Not Found",
        }
    }
}

pub fn switch(route: Route) -> Html {
    match route {
        Route::Dashboard => html! { <DashboardView /> },
        Route::Donors => html! { <DonorsView /> },
        Route::Inventory => html! { <InventoryView /> },
        Route::Hospitals => html! { <HospitalsView /> },
        Route::Requests => html! { <RequestsView /> },
        Route::BloodDrives => html! { <BloodDrivesView /> },
        Route::NotFound => html! { <NotFoundView /> },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_resolve_to_views() {
        assert_eq!(Route::recognize("/"), Some(Route::Dashboard));
        assert_eq!(Route::recognize("/donors"), Some(Route::Donors));
        assert_eq!(Route::recognize("/blooddrive"), Some(Route::BloodDrives));
        assert_eq!(Route::not_found_route(), Some(Route::NotFound));
    }

    #[test]
    fn test_nav_paths() {
        let paths: Vec<String> = Route::NAV.iter().map(|route| route.to_path()).collect();
        assert_eq!(
            paths,
            vec!["/", "/donors", "/inventory", "/hospitals", "/requests", "/blooddrive"]
        );
    }
}
