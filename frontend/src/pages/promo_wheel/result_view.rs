use shared::shared_wheel_game::{result_copy, PrizeSegment};
use yew::prelude::*;

use crate::styles;

#[derive(Properties, PartialEq)]
pub struct ResultViewProps {
    pub segment: PrizeSegment,
    pub email: Option<String>,
    pub on_action: Callback<MouseEvent>,
}

#[function_component(ResultView)]
pub fn result_view(props: &ResultViewProps) -> Html {
    let copy = result_copy(props.segment.kind);

    html! {
        <div class="text-center">
            <div class={styles::RESULT_PRIZE}>{props.segment.label}</div>
            <p class={styles::TEXT_BODY}>{copy.message}</p>
            if copy.shows_email {
                if let Some(email) = &props.email {
                    <p class={classes!(styles::TEXT_SMALL, "mb-6")}>
                        {"Sent to "}<span class="font-semibold">{email}</span>
                    </p>
                }
            }
            <button class={styles::BUTTON_PRIMARY} onclick={props.on_action.clone()}>
                {copy.action_label}
            </button>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct ClaimedViewProps {
    pub segment: PrizeSegment,
    pub email: Option<String>,
    pub on_reset: Callback<MouseEvent>,
}

#[function_component(ClaimedView)]
pub fn claimed_view(props: &ClaimedViewProps) -> Html {
    html! {
        <div class="text-center">
            <h2 class={styles::TEXT_H1}>{"Enjoy your reward!"}</h2>
            <p class={styles::TEXT_BODY}>
                {format!("{} is reserved", props.segment.label)}
                {
                    match &props.email {
                        Some(email) => format!(" for {}.", email),
                        None => ".".to_string(),
                    }
                }
            </p>
            <button class={styles::BUTTON_SECONDARY} onclick={props.on_reset.clone()}>
                {"Start over"}
            </button>
        </div>
    }
}
