use dioxus::prelude::*;

/// Text input bound to a value owned by the caller.
#[component]
pub fn Input(
    id: String,
    value: String,
    #[props(default = "text".to_string())] r#type: String,
    #[props(default)] placeholder: String,
    #[props(default)] required: bool,
    oninput: EventHandler<FormEvent>,
) -> Element {
    rsx! {
        input {
            class: "input",
            id: "{id}",
            name: "{id}",
            r#type: "{r#type}",
            placeholder: "{placeholder}",
            required,
            value: "{value}",
            oninput: move |evt| oninput.call(evt),
        }
    }
}

#[component]
pub fn Textarea(
    id: String,
    value: String,
    #[props(default)] placeholder: String,
    #[props(default)] required: bool,
    oninput: EventHandler<FormEvent>,
) -> Element {
    rsx! {
        textarea {
            class: "input textarea",
            id: "{id}",
            name: "{id}",
            placeholder: "{placeholder}",
            required,
            value: "{value}",
            oninput: move |evt| oninput.call(evt),
        }
    }
}
