use shared::{CrudViewState, Draft, EntityId, Mutation, Reload, Resource, SubmitTarget, ViewAction};
use std::rc::Rc;
use yew::prelude::*;

use crate::hooks::use_app_context::use_app_context;
use crate::services::date_utils::operational_today;
use crate::services::request_scope::RequestScope;

/// Yew reducer around the shared view state
pub struct CrudReducer<R: Resource, F>(pub CrudViewState<R, F>);

impl<R: Resource, F: Clone + 'static> Reducible for CrudReducer<R, F> {
    type Action = ViewAction<R, F>;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let current = Rc::try_unwrap(self)
            .map(|reducer| reducer.0)
            .unwrap_or_else(|shared| shared.0.clone());
        Rc::new(CrudReducer(current.apply(action)))
    }
}

pub struct UseCrudResult<R: Resource, F> {
    pub state: CrudViewState<R, F>,
    pub actions: UseCrudActions<R, F>,
}

#[derive(Clone)]
pub struct UseCrudActions<R: Resource, F> {
    pub set_filter: Callback<F>,
    pub open_add: Callback<()>,
    pub open_edit: Callback<R>,
    pub edit_draft: Callback<R::Draft>,
    pub close_modal: Callback<()>,
    pub submit: Callback<()>,
    pub request_delete: Callback<EntityId>,
    pub confirm_delete: Callback<()>,
    pub cancel_delete: Callback<()>,
    /// Send a record's draft with only its status changed
    pub change_status: Callback<(EntityId, R::Draft)>,
    pub dismiss_error: Callback<()>,
}

/// Modal, delete and status flows shared by every CRUD view. `reload` runs
/// whenever the reload policy asks for a refetch after a mutation.
#[hook]
pub fn use_crud<R, F>(scope: &RequestScope, reload: Callback<()>) -> UseCrudResult<R, F>
where
    R: Resource,
    F: Clone + Default + 'static,
{
    let context = use_app_context();
    let state = use_reducer(|| CrudReducer::<R, F>(CrudViewState::default()));

    let after_mutation: Rc<dyn Fn(Mutation)> = {
        let policy = context.reload_policy.clone();
        let reload = reload.clone();
        Rc::new(move |mutation: Mutation| {
            if policy.after(R::COLLECTION, &mutation) == Reload::Full {
                reload.emit(());
            }
        })
    };

    let dispatch = |action: fn() -> ViewAction<R, F>| {
        let state = state.clone();
        Callback::from(move |_: ()| state.dispatch(action()))
    };

    let set_filter = {
        let state = state.clone();
        Callback::from(move |filter: F| state.dispatch(ViewAction::SetFilter(filter)))
    };

    let open_add = {
        let state = state.clone();
        let config = context.config.clone();
        Callback::from(move |_: ()| {
            state.dispatch(ViewAction::OpenAdd {
                today: operational_today(&config),
            })
        })
    };

    let open_edit = {
        let state = state.clone();
        Callback::from(move |record: R| state.dispatch(ViewAction::OpenEdit(record)))
    };

    let edit_draft = {
        let state = state.clone();
        Callback::from(move |draft: R::Draft| state.dispatch(ViewAction::EditDraft(draft)))
    };

    let submit = {
        let state = state.clone();
        let scope = scope.clone();
        let api = context.api.clone();
        let after_mutation = after_mutation.clone();

        Callback::from(move |_: ()| {
            if state.0.submitting {
                return;
            }
            let Some(submission) = state.0.submission() else {
                return;
            };
            if let Err(e) = submission.draft.validate() {
                log::debug!(target: R::COLLECTION, "not submitting: {}", e);
                return;
            }

            state.dispatch(ViewAction::SubmitStarted);
            let state = state.clone();
            let api = api.clone();
            let after_mutation = after_mutation.clone();

            scope.spawn(async move {
                let result = match submission.target {
                    SubmitTarget::Create => api
                        .create::<R>(&submission.draft)
                        .await
                        .map(|_| Mutation::Created),
                    SubmitTarget::Update(id) => api
                        .update::<R>(id, &submission.draft)
                        .await
                        .map(|_| Mutation::Updated(id)),
                };

                match result {
                    Ok(mutation) => {
                        log::info!(target: R::COLLECTION, "saved {}: {:?}", R::LABEL, mutation);
                        state.dispatch(ViewAction::SubmitSucceeded);
                        after_mutation(mutation);
                    }
                    Err(e) => {
                        log::error!(target: R::COLLECTION, "saving {} failed: {}", R::LABEL, e);
                        let message = e.user_message(&format!("Failed to save {}", R::LABEL));
                        state.dispatch(ViewAction::MutationFailed(message));
                    }
                }
            });
        })
    };

    let request_delete = {
        let state = state.clone();
        Callback::from(move |id: EntityId| state.dispatch(ViewAction::RequestDelete(id)))
    };

    let confirm_delete = {
        let state = state.clone();
        let scope = scope.clone();
        let api = context.api.clone();
        let after_mutation = after_mutation.clone();

        Callback::from(move |_: ()| {
            let Some(id) = state.0.pending_delete else {
                return;
            };

            state.dispatch(ViewAction::DeleteConfirmed);
            let state = state.clone();
            let api = api.clone();
            let after_mutation = after_mutation.clone();

            scope.spawn(async move {
                match api.delete::<R>(id).await {
                    Ok(()) => {
                        log::info!(target: R::COLLECTION, "deleted {} #{}", R::LABEL, id);
                        state.dispatch(ViewAction::SubmitSucceeded);
                        after_mutation(Mutation::Deleted(id));
                    }
                    Err(e) => {
                        log::error!(target: R::COLLECTION, "deleting {} #{} failed: {}", R::LABEL, id, e);
                        let message = e.user_message(&format!("Failed to delete {}", R::LABEL));
                        state.dispatch(ViewAction::MutationFailed(message));
                    }
                }
            });
        })
    };

    let change_status = {
        let state = state.clone();
        let scope = scope.clone();
        let api = context.api.clone();
        let after_mutation = after_mutation.clone();

        Callback::from(move |(id, draft): (EntityId, R::Draft)| {
            let state = state.clone();
            let api = api.clone();
            let after_mutation = after_mutation.clone();

            scope.spawn(async move {
                match api.update::<R>(id, &draft).await {
                    Ok(()) => {
                        log::info!(target: R::COLLECTION, "changed status of {} #{}", R::LABEL, id);
                        after_mutation(Mutation::StatusChanged(id));
                    }
                    Err(e) => {
                        log::error!(target: R::COLLECTION, "status change on #{} failed: {}", id, e);
                        state.dispatch(ViewAction::MutationFailed(e.user_message("Failed to update status")));
                    }
                }
            });
        })
    };

    let actions = UseCrudActions {
        set_filter,
        open_add,
        open_edit,
        edit_draft,
        close_modal: dispatch(|| ViewAction::CloseModal),
        submit,
        request_delete,
        confirm_delete,
        cancel_delete: dispatch(|| ViewAction::CancelDelete),
        change_status,
        dismiss_error: dispatch(|| ViewAction::DismissError),
    };

    UseCrudResult {
        state: state.0.clone(),
        actions,
    }
}
