//! Router integration for the navigation gate.
//!
//! SYSTEM CONTEXT
//! ==============
//! `leptos_router` has no before-enter hook, so each gated route view is
//! wrapped in [`RouteGate`]. The gate runs the core admission decision for the
//! current location and renders its children only once that decision is
//! `Allow`. A `Redirect` becomes a replacing navigation to PIN entry, so the
//! gated view never appears and Back does not return to it.

use leptos::prelude::*;
use leptos_router::hooks::{use_location, use_navigate};
use zettelwirtschaft::{GateDecision, GatePhase};

use crate::net::navigator::{current_full_path, replace_options};
use crate::state::session::SessionHandle;

/// Whether a decision started for `started_for` still belongs to the page at
/// `now`. A later navigation (even to the same route with another param)
/// runs its own decision; the older one is dropped.
#[must_use]
pub fn decision_applies(started_for: &str, now: &str) -> bool {
    strip_fragment(started_for) == strip_fragment(now)
}

fn strip_fragment(full_path: &str) -> &str {
    full_path.split_once('#').map_or(full_path, |(path, _)| path)
}

#[component]
pub fn RouteGate(children: ChildrenFn) -> impl IntoView {
    let session = expect_context::<SessionHandle>();
    let location = use_location();
    let navigate = use_navigate();
    let phase = RwSignal::new(GatePhase::Probing);

    Effect::new(move || {
        location.pathname.track();
        location.search.track();
        let gate = session.context().gate;
        let path = current_full_path();
        match gate.initial_phase(&path) {
            GatePhase::Decided(decision) => phase.set(GatePhase::Decided(decision)),
            GatePhase::Probing => {
                phase.set(GatePhase::Probing);
                #[cfg(feature = "csr")]
                leptos::task::spawn_local(async move {
                    let decision = gate.decide(&path).await;
                    if decision_applies(&path, &current_full_path()) {
                        phase.set(GatePhase::Decided(decision));
                    }
                });
            }
        }
    });

    Effect::new(move || {
        if let GatePhase::Decided(GateDecision::Redirect(intent)) = phase.get() {
            leptos::logging::log!("route gated; redirecting to {}", intent.href());
            navigate(&intent.href(), replace_options());
        }
    });

    let allowed = move || matches!(phase.get(), GatePhase::Decided(GateDecision::Allow));

    view! {
        <Show when=allowed fallback=|| view! { <div class="route-gate__pending"></div> }>
            {children()}
        </Show>
    }
}

#[cfg(test)]
#[path = "route_gate_test.rs"]
mod tests;
