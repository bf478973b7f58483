use gloo_events::EventListener;
use web_sys::window;
use yew::prelude::*;

pub const OFFLINE_NOTICE: &str =
    "You appear to be offline. Please check your internet connection and try again.";

/// Inline message for the current connection state, `None` while online.
pub fn connection_notice(online: bool) -> Option<&'static str> {
    (!online).then_some(OFFLINE_NOTICE)
}

fn navigator_online() -> bool {
    window().map(|w| w.navigator().on_line()).unwrap_or(true)
}

/// Tracks the browser's `online`/`offline` events.
#[hook]
pub fn use_online() -> bool {
    let online = use_state(navigator_online);

    {
        let online = online.clone();
        use_effect_with((), move |_| {
            let listeners = window().map(|window| {
                let on_online = {
                    let online = online.clone();
                    EventListener::new(&window, "online", move |_| {
                        log::info!("Connection restored");
                        online.set(true);
                    })
                };
                let on_offline = EventListener::new(&window, "offline", move |_| {
                    log::warn!("Connection lost");
                    online.set(false);
                });
                (on_online, on_offline)
            });
            move || drop(listeners)
        });
    }

    *online
}
