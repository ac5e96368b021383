use futures::future::LocalBoxFuture;
use shared::LoadState;
use std::rc::Rc;
use yew::prelude::*;

use crate::hooks::use_app_context::use_app_context;
use crate::services::api::{ApiClient, ApiError};
use crate::services::config::AppConfig;
use crate::services::request_scope::RequestScope;

/// Everything one view fetches on mount and after each mutation.
///
/// The load fans out over every collection the view needs; a single failed
/// request fails the whole load and the view shows no data.
pub trait ViewData: Sized + 'static {
    /// Log target for this view
    const NAME: &'static str;

    /// Page-level message when the load fails
    const LOAD_ERROR: &'static str;

    fn load(api: ApiClient, config: Rc<AppConfig>) -> LocalBoxFuture<'static, Result<Self, ApiError>>;
}

pub struct UseViewDataResult<D> {
    pub state: LoadState<Rc<D>>,
    pub reload: Callback<()>,
}

#[hook]
pub fn use_view_data<D: ViewData>(scope: &RequestScope) -> UseViewDataResult<D> {
    let context = use_app_context();
    let state = use_state(|| LoadState::<Rc<D>>::Loading);

    let reload = {
        let state = state.clone();
        let scope = scope.clone();
        let api = context.api.clone();
        let config = context.config.clone();

        use_callback((), move |_: (), _| {
            let state = state.clone();
            let load = D::load(api.clone(), config.clone());

            scope.spawn_in("load", async move {
                match load.await {
                    Ok(data) => {
                        log::debug!(target: D::NAME, "data loaded");
                        state.set(LoadState::Ready(Rc::new(data)));
                    }
                    Err(e) => {
                        log::error!(target: D::NAME, "load failed: {}", e);
                        state.set(LoadState::Failed(D::LOAD_ERROR.to_string()));
                    }
                }
            });
        })
    };

    {
        let reload = reload.clone();
        use_effect_with((), move |_| {
            reload.emit(());
            || ()
        });
    }

    UseViewDataResult {
        state: (*state).clone(),
        reload,
    }
}
