//! Reusable UI components

use leptos::*;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ButtonKind {
    #[default]
    Primary,
    Ghost,
    Danger,
}

impl ButtonKind {
    fn class(self) -> &'static str {
        match self {
            ButtonKind::Primary => "btn-primary",
            ButtonKind::Ghost => "btn-ghost",
            ButtonKind::Danger => "btn-danger",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ButtonSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl ButtonSize {
    fn class(self) -> &'static str {
        match self {
            ButtonSize::Small => "btn-sm",
            ButtonSize::Medium => "btn-md",
            ButtonSize::Large => "btn-lg",
        }
    }
}

#[component]
pub fn Button(
    #[prop(into)] on_click: Callback<web_sys::MouseEvent>,
    #[prop(optional)] kind: ButtonKind,
    #[prop(optional)] size: ButtonSize,
    #[prop(into, optional)] disabled: MaybeSignal<bool>,
    children: Children,
) -> impl IntoView {
    let class = format!("btn {} {}", kind.class(), size.class());

    view! {
        <button
            class=class
            disabled=move || disabled.get()
            on:click=move |ev| on_click.call(ev)
        >
            {children()}
        </button>
    }
}

/// Labelled single-line input bound to a signal
#[component]
pub fn TextInput(
    #[prop(into)] value: Signal<String>,
    #[prop(into)] on_input: Callback<String>,
    #[prop(into, optional)] label: Option<String>,
    #[prop(into, optional)] placeholder: String,
    #[prop(optional)] password: bool,
    #[prop(optional)] autofocus: bool,
    /// Fired on Enter
    #[prop(into, optional)]
    on_submit: Option<Callback<()>>,
) -> impl IntoView {
    let handle_keydown = move |ev: web_sys::KeyboardEvent| {
        if ev.key() == "Enter" {
            if let Some(on_submit) = on_submit.as_ref() {
                ev.prevent_default();
                on_submit.call(());
            }
        }
    };

    view! {
        <label class="field">
            {label.map(|text| view! { <span class="field-label">{text}</span> })}
            <input
                class="field-input"
                type=if password { "password" } else { "text" }
                placeholder=placeholder
                autofocus=autofocus
                prop:value=move || value.get()
                on:input=move |ev| on_input.call(event_target_value(&ev))
                on:keydown=handle_keydown
            />
        </label>
    }
}

#[component]
pub fn Card(#[prop(into, optional)] title: Option<String>, children: Children) -> impl IntoView {
    view! {
        <section class="card">
            {title.map(|title| view! { <div class="card-header">{title}</div> })}
            <div class="card-body">{children()}</div>
        </section>
    }
}
