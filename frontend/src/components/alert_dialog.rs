use web_sys::MouseEvent;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct AlertDialogProps {
    /// Nothing renders while this is `None`
    pub message: Option<String>,
    pub on_dismiss: Callback<()>,
    #[prop_or_else(|| AttrValue::from("Error"))]
    pub title: AttrValue,
}

/// Blocking message box; everything behind it is inert until dismissed
#[function_component(AlertDialog)]
pub fn alert_dialog(props: &AlertDialogProps) -> Html {
    let Some(message) = props.message.clone() else {
        return html! {};
    };

    let on_ok = {
        let on_dismiss = props.on_dismiss.clone();
        Callback::from(move |_: MouseEvent| on_dismiss.emit(()))
    };

    let on_modal_click = Callback::from(|e: MouseEvent| e.stop_propagation());

    html! {
        <div class="modal-overlay alert-overlay">
            <div class="modal-content alert-dialog" role="alertdialog" onclick={on_modal_click}>
                <h3>{props.title.clone()}</h3>
                <p class="alert-message">{message}</p>
                <div class="modal-actions">
                    <button type="button" class="btn btn-primary" onclick={on_ok} autofocus=true>
                        {"OK"}
                    </button>
                </div>
            </div>
        </div>
    }
}
