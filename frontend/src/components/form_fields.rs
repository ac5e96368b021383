//! Labelled inputs for the add/edit forms. Each field reports the new value
//! through `on_change`; the views fold it into their draft.

use chrono::NaiveDate;
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;

use crate::services::date_utils::{format_input_date, parse_input_date};

#[derive(Properties, PartialEq)]
pub struct TextFieldProps {
    pub label: AttrValue,
    pub value: String,
    pub on_change: Callback<String>,
    #[prop_or_else(|| AttrValue::from("text"))]
    pub input_type: AttrValue,
    #[prop_or(true)]
    pub required: bool,
    #[prop_or_default]
    pub placeholder: AttrValue,
}

#[function_component(TextField)]
pub fn text_field(props: &TextFieldProps) -> Html {
    let oninput = {
        let on_change = props.on_change.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_change.emit(input.value());
        })
    };

    html! {
        <div class="form-group">
            <label>{props.label.clone()}</label>
            <input
                type={props.input_type.clone()}
                class="form-input"
                value={props.value.clone()}
                placeholder={props.placeholder.clone()}
                required={props.required}
                {oninput}
            />
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct TextAreaFieldProps {
    pub label: AttrValue,
    pub value: String,
    pub on_change: Callback<String>,
    #[prop_or_default]
    pub placeholder: AttrValue,
}

#[function_component(TextAreaField)]
pub fn text_area_field(props: &TextAreaFieldProps) -> Html {
    let oninput = {
        let on_change = props.on_change.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlTextAreaElement = e.target_unchecked_into();
            on_change.emit(input.value());
        })
    };

    html! {
        <div class="form-group">
            <label>{props.label.clone()}</label>
            <textarea
                class="form-textarea"
                rows="3"
                value={props.value.clone()}
                placeholder={props.placeholder.clone()}
                required=true
                {oninput}
            />
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct DateFieldProps {
    pub label: AttrValue,
    pub value: Option<NaiveDate>,
    pub on_change: Callback<Option<NaiveDate>>,
    #[prop_or(true)]
    pub required: bool,
}

#[function_component(DateField)]
pub fn date_field(props: &DateFieldProps) -> Html {
    let onchange = {
        let on_change = props.on_change.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_change.emit(parse_input_date(&input.value()));
        })
    };

    html! {
        <div class="form-group">
            <label>{props.label.clone()}</label>
            <input
                type="date"
                class="form-input"
                value={props.value.map(format_input_date).unwrap_or_default()}
                required={props.required}
                {onchange}
            />
        </div>
    }
}

/// One `<option>`: submitted value and visible text
#[derive(Debug, Clone, PartialEq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl ToString, label: impl ToString) -> Self {
        Self {
            value: value.to_string(),
            label: label.to_string(),
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct SelectProps {
    pub value: String,
    pub options: Vec<SelectOption>,
    pub on_change: Callback<String>,
    #[prop_or_else(|| AttrValue::from("filter-select"))]
    pub class: AttrValue,
    #[prop_or_default]
    pub style: Option<AttrValue>,
    #[prop_or(false)]
    pub required: bool,
}

/// Bare select used for filters and inline status edits
#[function_component(Select)]
pub fn select(props: &SelectProps) -> Html {
    let onchange = {
        let on_change = props.on_change.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            on_change.emit(select.value());
        })
    };

    html! {
        <select class={props.class.to_string()} style={props.style.clone()} required={props.required} {onchange}>
            {for props.options.iter().map(|option| html! {
                <option value={option.value.clone()} selected={option.value == props.value}>
                    {option.label.clone()}
                </option>
            })}
        </select>
    }
}

#[derive(Properties, PartialEq)]
pub struct SelectFieldProps {
    pub label: AttrValue,
    pub value: String,
    pub options: Vec<SelectOption>,
    pub on_change: Callback<String>,
}

#[function_component(SelectField)]
pub fn select_field(props: &SelectFieldProps) -> Html {
    html! {
        <div class="form-group">
            <label>{props.label.clone()}</label>
            <Select
                class="form-input"
                value={props.value.clone()}
                options={props.options.clone()}
                on_change={props.on_change.clone()}
                required=true
            />
        </div>
    }
}
