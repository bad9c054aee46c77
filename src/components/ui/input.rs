use leptos::html;
use leptos::prelude::*;
use tw_merge::tw_merge;
use wasm_bindgen::JsCast;

const FIELD_CLASS: &str = "placeholder:text-muted-foreground selection:bg-primary selection:text-primary-foreground border-input w-full min-w-0 rounded-md border bg-transparent px-3 py-1 text-sm shadow-xs outline-none transition-[color,box-shadow] focus-visible:border-ring focus-visible:ring-2 focus-visible:ring-ring/50 disabled:pointer-events-none disabled:cursor-not-allowed disabled:opacity-50";

fn event_value(ev: &web_sys::Event) -> Option<String> {
    let target = ev.target()?;
    if let Some(input) = target.dyn_ref::<web_sys::HtmlInputElement>() {
        return Some(input.value());
    }
    target
        .dyn_ref::<web_sys::HtmlTextAreaElement>()
        .map(|area| area.value())
}

/// Single-line text field.
///
/// The value is owned by the caller: `value` is rendered, `on_change` receives
/// every edit. This lets the field write straight into the document store.
#[component]
pub fn Input(
    #[prop(into, optional)] class: String,
    #[prop(into, default = "text")] r#type: &'static str,
    #[prop(into, optional)] placeholder: String,
    #[prop(into, optional)] id: String,
    #[prop(optional)] disabled: bool,
    #[prop(optional)] autofocus: bool,

    value: Signal<String>,
    on_change: Callback<String>,

    #[prop(optional)] node_ref: NodeRef<html::Input>,
) -> impl IntoView {
    let merged_class = tw_merge!("flex h-9", FIELD_CLASS, class);

    let on_input = move |ev: web_sys::Event| {
        if let Some(v) = event_value(&ev) {
            on_change.run(v);
        }
    };

    view! {
        <input
            data-name="Input"
            type=r#type
            class=merged_class
            placeholder=placeholder
            id=id
            disabled=disabled
            autofocus=autofocus
            prop:value=move || value.get()
            on:input=on_input
            node_ref=node_ref
        />
    }
}

/// Multi-line text field. `on_keydown` runs before the browser's default
/// handling, so callers can intercept Enter.
#[component]
pub fn Textarea(
    #[prop(into, optional)] class: String,
    #[prop(into, optional)] placeholder: String,
    #[prop(default = 3)] rows: u32,
    #[prop(optional)] readonly: bool,

    value: Signal<String>,
    on_change: Callback<String>,
    #[prop(optional, into)] on_keydown: Option<Callback<web_sys::KeyboardEvent>>,
) -> impl IntoView {
    let merged_class = tw_merge!("flex resize-none py-2", FIELD_CLASS, class);

    let on_input = move |ev: web_sys::Event| {
        if let Some(v) = event_value(&ev) {
            on_change.run(v);
        }
    };

    view! {
        <textarea
            data-name="Textarea"
            class=merged_class
            placeholder=placeholder
            rows=rows
            readonly=readonly
            prop:value=move || value.get()
            on:input=on_input
            on:keydown=move |ev: web_sys::KeyboardEvent| {
                if let Some(cb) = on_keydown {
                    cb.run(ev);
                }
            }
        />
    }
}
