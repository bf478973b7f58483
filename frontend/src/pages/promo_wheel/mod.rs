mod email_form;
mod result_view;
mod wheel_view;

use std::cell::RefCell;
use std::rc::Rc;

use gloo_events::EventListener;
use gloo_timers::callback::Timeout;
use shared::constants::INVALID_EMAIL_ERROR;
use shared::session::{Phase, SessionError, SubmissionAck, WheelSession};
use shared::shared_wheel_game::{FollowUp, SPIN_EASING};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::KeyboardEvent;
use yew::prelude::*;

use crate::api::submit_email;
use crate::hooks::use_online::{connection_notice, use_online};
use crate::styles;
use email_form::EmailForm;
use result_view::{ClaimedView, ResultView};
use wheel_view::WheelView;

type SharedSession = Rc<RefCell<WheelSession>>;

fn spin(session: &SharedSession, refresh: &UseForceUpdateHandle) {
    let ticket = match session.borrow_mut().start_spin(&mut rand::thread_rng()) {
        Some(ticket) => ticket,
        // Already spinning or not on the wheel yet
        None => return,
    };
    let duration = session.borrow().config().duration_ms;
    refresh.force_update();

    let session = session.clone();
    let refresh = refresh.clone();
    Timeout::new(duration, move || {
        if let Some(outcome) = session.borrow_mut().finish_spin(&ticket) {
            log::info!("🎡 Wheel stopped on {} ({:?})", ticket.plan.segment.label, outcome);
            refresh.force_update();
        }
    })
    .forget();
}

fn reset(session: &SharedSession, error: &UseStateHandle<Option<String>>, refresh: &UseForceUpdateHandle) {
    session.borrow_mut().reset();
    error.set(None);
    refresh.force_update();
}

#[function_component(PromoWheel)]
pub fn promo_wheel() -> Html {
    let session = use_mut_ref(WheelSession::default);
    let refresh = use_force_update();
    let form_error = use_state(|| None::<String>);
    let online = use_online();

    let on_email = {
        let session = session.clone();
        let refresh = refresh.clone();
        let form_error = form_error.clone();

        Callback::from(move |raw: String| {
            let ticket = match session.borrow_mut().begin_submission(&raw) {
                Ok(ticket) => ticket,
                Err(SessionError::Invalid(_)) => {
                    form_error.set(Some(INVALID_EMAIL_ERROR.to_string()));
                    return;
                }
                Err(SessionError::Busy) => return,
            };
            form_error.set(None);
            refresh.force_update();

            let session = session.clone();
            let refresh = refresh.clone();
            spawn_local(async move {
                let delivered = match submit_email(&ticket.email).await {
                    Ok(response) => response.success,
                    Err(e) => {
                        log::error!("❌ Error saving email {}: {}", ticket.email, e);
                        false
                    }
                };

                match session.borrow_mut().complete_submission(&ticket, delivered) {
                    SubmissionAck::Saved => {}
                    SubmissionAck::ContinuedWithoutSaving => {
                        log::warn!("Continuing to the wheel without a saved email");
                    }
                    SubmissionAck::Stale => {
                        log::debug!("Ignoring submission result for a reset session");
                        return;
                    }
                }
                refresh.force_update();
            });
        })
    };

    let on_spin = {
        let session = session.clone();
        let refresh = refresh.clone();
        Callback::from(move |_: MouseEvent| spin(&session, &refresh))
    };

    let on_follow_up = {
        let session = session.clone();
        let form_error = form_error.clone();
        let refresh = refresh.clone();
        Callback::from(move |_: MouseEvent| {
            if session.borrow_mut().follow_up() == Some(FollowUp::StartOver) {
                form_error.set(None);
            }
            refresh.force_update();
        })
    };

    let on_reset = {
        let session = session.clone();
        let form_error = form_error.clone();
        let refresh = refresh.clone();
        Callback::from(move |_: MouseEvent| reset(&session, &form_error, &refresh))
    };

    // Enter spins, Escape starts over
    {
        let session = session.clone();
        let form_error = form_error.clone();
        let refresh = refresh.clone();

        use_effect_with((), move |_| {
            let listener = web_sys::window().and_then(|w| w.document()).map(|document| {
                EventListener::new(&document, "keydown", move |event| {
                    let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                        return;
                    };
                    match event.key().as_str() {
                        "Enter" => {
                            let ready = matches!(session.borrow().phase(), Phase::WheelReady);
                            if ready {
                                event.prevent_default();
                                spin(&session, &refresh);
                            }
                        }
                        "Escape" => reset(&session, &form_error, &refresh),
                        _ => {}
                    }
                })
            });
            move || drop(listener)
        });
    }

    let (phase, email, rotation, duration_ms) = {
        let session = session.borrow();
        (
            session.phase().clone(),
            session.email().map(|e| e.original().to_string()),
            session.rotation(),
            session.config().duration_ms,
        )
    };

    let content = match &phase {
        Phase::AwaitingEmail | Phase::Submitting => html! {
            <>
                <h1 class={styles::TEXT_H1}>{"Spin the wheel!"}</h1>
                <p class={styles::TEXT_BODY}>{"Enter your email for a chance to win a discount or a free gift."}</p>
                <EmailForm
                    on_submit={on_email}
                    submitting={phase == Phase::Submitting}
                    error={(*form_error).clone()}
                />
            </>
        },
        Phase::WheelReady | Phase::Spinning { .. } => {
            let (angle, transition) = match &phase {
                Phase::Spinning { plan } => (
                    plan.final_rotation,
                    Some(format!("transform {}ms {}", duration_ms, SPIN_EASING)),
                ),
                _ => (rotation, None),
            };
            html! {
                <WheelView
                    rotation={angle}
                    transition={transition}
                    spinning={matches!(phase, Phase::Spinning { .. })}
                    on_spin={on_spin}
                />
            }
        }
        Phase::ResultShown { segment } => html! {
            <ResultView segment={*segment} email={email.clone()} on_action={on_follow_up} />
        },
        Phase::Claimed { segment } => html! {
            <ClaimedView segment={*segment} email={email} on_reset={on_reset} />
        },
    };

    html! {
        <div class={styles::CONTAINER}>
            <div class={styles::CARD}>
                if let Some(notice) = connection_notice(online) {
                    <p class={styles::NOTICE_OFFLINE} role="status">{notice}</p>
                }
                { content }
            </div>
            if phase == Phase::Submitting {
                <div class={styles::LOADING_OVERLAY}>
                    <div class={styles::LOADING_SPINNER}></div>
                </div>
            }
        </div>
    }
}
