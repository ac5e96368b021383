pub mod blood_drives;
pub mod dashboard;
pub mod donors;
pub mod hospitals;
pub mod inventory;
pub mod not_found;
pub mod requests;

use web_sys::HtmlInputElement;
use yew::prelude::*;

/// Callback that writes one field into a copy of `draft` and emits the copy
pub fn draft_field<D, V>(draft: &D, edit: &Callback<D>, set: fn(&mut D, V)) -> Callback<V>
where
    D: Clone + 'static,
    V: 'static,
{
    let draft = draft.clone();
    let edit = edit.clone();
    Callback::from(move |value: V| {
        let mut next = draft.clone();
        set(&mut next, value);
        edit.emit(next);
    })
}

/// `oninput` handler for a search box over filter `F`
pub fn search_input<F>(filter: &F, set_filter: &Callback<F>, set: fn(&mut F, String)) -> Callback<InputEvent>
where
    F: Clone + 'static,
{
    let filter = filter.clone();
    let set_filter = set_filter.clone();
    Callback::from(move |e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        let mut next = filter.clone();
        set(&mut next, input.value());
        set_filter.emit(next);
    })
}

/// `#12`, or `#-` for a missing id
pub fn id_label(id: Option<u32>) -> String {
    match id {
        Some(id) => format!("#{id}"),
        None => "#-".to_string(),
    }
}
