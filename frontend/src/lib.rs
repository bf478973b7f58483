pub mod api;
pub mod config;
pub mod hooks;
pub mod pages;
pub mod styles;

use yew::prelude::*;
use crate::pages::promo_wheel::PromoWheel;

#[function_component(App)]
pub fn app() -> Html {
    html! {
        <div class="min-h-screen w-full">
            <div class="mx-auto">
                <PromoWheel />
            </div>
        </div>
    }
}
