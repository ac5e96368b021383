use yew::prelude::*;

use crate::services::request_scope::RequestScope;

/// A request scope that lives as long as the calling component and is
/// closed when it unmounts.
#[hook]
pub fn use_request_scope() -> RequestScope {
    let scope = use_memo((), |_| RequestScope::new());

    {
        let scope = (*scope).clone();
        use_effect_with((), move |_| move || scope.close());
    }

    (*scope).clone()
}
