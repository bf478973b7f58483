use shared::constants::INVALID_EMAIL_ERROR;
use shared::validation::is_valid_email;
use web_sys::{HtmlInputElement, InputEvent, SubmitEvent};
use yew::prelude::*;

use crate::styles;

#[derive(Clone, Copy, PartialEq)]
enum InputHint {
    Empty,
    Valid,
    Invalid,
}

impl InputHint {
    fn of(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() {
            Self::Empty
        } else if is_valid_email(value) {
            Self::Valid
        } else {
            Self::Invalid
        }
    }

    fn class(self) -> &'static str {
        match self {
            Self::Empty => styles::INPUT,
            Self::Valid => styles::INPUT_VALID,
            Self::Invalid => styles::INPUT_ERROR,
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct EmailFormProps {
    /// Receives the raw input value. The session does the real validation.
    pub on_submit: Callback<String>,
    pub submitting: bool,
    pub error: Option<String>,
}

#[function_component(EmailForm)]
pub fn email_form(props: &EmailFormProps) -> Html {
    let input_ref = use_node_ref();
    let hint = use_state(|| InputHint::Empty);

    {
        let input_ref = input_ref.clone();
        use_effect_with((), move |_| {
            // Skip autofocus on narrow screens so the keyboard does not pop up
            let wide = web_sys::window()
                .and_then(|w| w.inner_width().ok())
                .and_then(|v| v.as_f64())
                .map(|w| w > 768.0)
                .unwrap_or(false);
            if wide {
                if let Some(input) = input_ref.cast::<HtmlInputElement>() {
                    let _ = input.focus();
                }
            }
            || ()
        });
    }

    let on_input = {
        let hint = hint.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            hint.set(InputHint::of(&input.value()));
        })
    };

    let on_submit = {
        let input_ref = input_ref.clone();
        let callback = props.on_submit.clone();
        let submitting = props.submitting;
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if submitting {
                return;
            }
            if let Some(input) = input_ref.cast::<HtmlInputElement>() {
                callback.emit(input.value());
            }
        })
    };

    html! {
        <form class={styles::FORM} onsubmit={on_submit} novalidate=true>
            <input
                ref={input_ref}
                type="email"
                autocomplete="email"
                placeholder="Enter your email"
                aria-label="Email address"
                class={hint.class()}
                oninput={on_input}
                disabled={props.submitting}
            />
            if let Some(error) = &props.error {
                <p class={styles::TEXT_ERROR} role="alert">{error}</p>
            } else if *hint == InputHint::Invalid {
                <p class={styles::TEXT_SMALL}>{INVALID_EMAIL_ERROR}</p>
            }
            <button type="submit" class={styles::BUTTON_PRIMARY} disabled={props.submitting}>
                {"Spin to win"}
            </button>
        </form>
    }
}
