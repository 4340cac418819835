//! PIN entry page.
//!
//! SYSTEM CONTEXT
//! ==============
//! The only route reachable without a session. The gate sends users here with
//! `?redirect=<path>`; after an accepted PIN the page replaces itself with
//! that path. When the server has no PIN configured the page forwards
//! straight away.

use leptos::prelude::*;
use leptos_router::hooks::{use_navigate, use_query_map};
use zettelwirtschaft::router::intent::{REDIRECT_PARAM, redirect_target};
use zettelwirtschaft::router::route::PIN_ROUTE_PATH;

use crate::net::navigator::replace_options;
use crate::state::session::SessionHandle;

pub const EMPTY_PIN_MESSAGE: &str = "Bitte PIN eingeben";
pub const NON_DIGIT_PIN_MESSAGE: &str = "Der PIN darf nur Ziffern enthalten";

/// Trim and check a typed PIN before it is sent.
///
/// # Errors
///
/// Returns the message to show when the input is empty or not all digits.
pub fn validate_pin_input(raw: &str) -> Result<String, &'static str> {
    let pin = raw.trim();
    if pin.is_empty() {
        return Err(EMPTY_PIN_MESSAGE);
    }
    if !pin.chars().all(|c| c.is_ascii_digit()) {
        return Err(NON_DIGIT_PIN_MESSAGE);
    }
    Ok(pin.to_owned())
}

#[component]
pub fn PinLoginPage() -> impl IntoView {
    let session = expect_context::<SessionHandle>();
    let query = use_query_map();
    let navigate = use_navigate();
    let snapshot = session.snapshot();

    let pin = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let forward_to = RwSignal::new(None::<String>);
    let return_target = move || redirect_target(query.with(|q| q.get(REDIRECT_PARAM)).as_deref(), PIN_ROUTE_PATH);

    Effect::new(move || {
        if let Some(target) = forward_to.get() {
            navigate(&target, replace_options());
        }
    });

    #[cfg(feature = "csr")]
    leptos::task::spawn_local(async move {
        let ctx = session.context();
        ctx.session.ensure_probed().await;
        let state = ctx.session.snapshot();
        if !state.pin_enabled || state.is_authenticated {
            forward_to.set(Some(return_target()));
        }
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if snapshot.get_untracked().loading {
            return;
        }
        let value = match validate_pin_input(&pin.get_untracked()) {
            Ok(value) => value,
            Err(message) => {
                error.set(Some(message.to_owned()));
                return;
            }
        };
        error.set(None);

        #[cfg(feature = "csr")]
        leptos::task::spawn_local(async move {
            match session.context().session.login(&value).await {
                zettelwirtschaft::LoginResult::Accepted => forward_to.set(Some(return_target())),
                zettelwirtschaft::LoginResult::Rejected { detail } => {
                    pin.set(String::new());
                    error.set(Some(detail));
                }
            }
        });
        #[cfg(not(feature = "csr"))]
        let _ = value;
    };

    view! {
        <div class="pin-page">
            <div class="pin-card">
                <h1>"Zettelwirtschaft"</h1>
                <p class="pin-card__subtitle">"Bitte PIN eingeben, um fortzufahren."</p>
                <form class="pin-form" on:submit=on_submit>
                    <input
                        class="pin-input"
                        type="password"
                        inputmode="numeric"
                        autocomplete="current-password"
                        placeholder="PIN"
                        prop:value=move || pin.get()
                        on:input=move |ev| pin.set(event_target_value(&ev))
                    />
                    <button class="pin-button" type="submit" disabled=move || snapshot.get().loading>
                        {move || if snapshot.get().loading { "Prüfe..." } else { "Anmelden" }}
                    </button>
                </form>
                <Show when=move || error.get().is_some()>
                    <p class="pin-message pin-message--error">{move || error.get().unwrap_or_default()}</p>
                </Show>
            </div>
        </div>
    }
}

#[cfg(test)]
#[path = "pin_login_test.rs"]
mod tests;
