use web_sys::MouseEvent;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct FormModalProps {
    pub title: AttrValue,
    pub submit_label: AttrValue,
    pub submitting: bool,
    /// Required fields that are still empty; submit stays disabled until
    /// this is empty
    #[prop_or_default]
    pub missing: Vec<&'static str>,
    pub on_submit: Callback<()>,
    pub on_close: Callback<()>,
    #[prop_or_default]
    pub children: Html,
}

/// "first_name" → "First Name"
pub fn humanize_field(field: &str) -> String {
    field
        .split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Add/edit form shell shared by the CRUD views
#[function_component(FormModal)]
pub fn form_modal(props: &FormModalProps) -> Html {
    let on_backdrop_click = {
        let on_close = props.on_close.clone();
        let submitting = props.submitting;
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            if !submitting {
                on_close.emit(());
            }
        })
    };

    let on_modal_click = Callback::from(|e: MouseEvent| {
        e.stop_propagation();
    });

    let on_submit = {
        let on_submit = props.on_submit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            on_submit.emit(());
        })
    };

    let on_cancel = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    let blocked = props.submitting || !props.missing.is_empty();

    html! {
        <div class="modal-overlay" onclick={on_backdrop_click}>
            <div class="modal-content" onclick={on_modal_click}>
                <h3>{props.title.clone()}</h3>

                <form onsubmit={on_submit}>
                    {props.children.clone()}

                    {if props.missing.is_empty() {
                        html! {}
                    } else {
                        let fields: Vec<String> = props.missing.iter().map(|f| humanize_field(f)).collect();
                        html! {
                            <div class="form-missing">
                                {format!("Required: {}", fields.join(", "))}
                            </div>
                        }
                    }}

                    <div class="modal-actions">
                        <button
                            type="button"
                            class="btn btn-cancel"
                            onclick={on_cancel}
                            disabled={props.submitting}
                        >
                            {"Cancel"}
                        </button>
                        <button type="submit" class="btn btn-primary" disabled={blocked}>
                            {if props.submitting {
                                "Saving...".to_string()
                            } else {
                                props.submit_label.to_string()
                            }}
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_humanize_field() {
        assert_eq!(humanize_field("first_name"), "First Name");
        assert_eq!(humanize_field("last_donated_date"), "Last Donated Date");
        assert_eq!(humanize_field("address"), "Address");
    }
}
