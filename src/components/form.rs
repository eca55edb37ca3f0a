//! Small form building blocks shared by the pages.

use leptos::prelude::*;

/// Labelled text input bound to a string signal.
#[component]
pub fn TextField(
    label: &'static str,
    value: RwSignal<String>,
    #[prop(default = "text")] kind: &'static str,
    #[prop(optional)] placeholder: &'static str,
) -> impl IntoView {
    view! {
        <label class="field">
            <span class="field__label">{label}</span>
            <input
                class="field__input"
                type=kind
                placeholder=placeholder
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            />
        </label>
    }
}

/// Inline error line; renders nothing while the signal is `None`.
#[component]
pub fn ErrorLine(message: RwSignal<Option<String>>) -> impl IntoView {
    move || message.get().map(|text| view! { <p class="form__error" role="alert">{text}</p> })
}

/// Inline success line.
#[component]
pub fn NoticeLine(message: RwSignal<Option<String>>) -> impl IntoView {
    move || message.get().map(|text| view! { <p class="form__notice">{text}</p> })
}
