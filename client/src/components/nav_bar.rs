//! Top navigation with section links and logout.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use zettelwirtschaft::router::route::{RouteDef, RouteTable, Visibility};

use crate::net::navigator::replace_options;
use crate::state::notifications::Notifier;
use crate::state::session::SessionHandle;

pub const LOGOUT_MESSAGE: &str = "Abgemeldet";

/// Routes that get a nav link: gated and without path parameters.
#[must_use]
pub fn nav_links(table: &RouteTable) -> Vec<RouteDef> {
    table
        .routes()
        .iter()
        .filter(|r| r.visibility == Visibility::Gated && !r.path.contains(':'))
        .cloned()
        .collect()
}

#[component]
pub fn NavBar() -> impl IntoView {
    let session = expect_context::<SessionHandle>();
    let notifier = expect_context::<Notifier>();
    let navigate = use_navigate();
    let snapshot = session.snapshot();
    let logged_out = RwSignal::new(false);

    Effect::new(move || {
        if logged_out.get() {
            logged_out.set(false);
            navigate(session.context().pin_path(), replace_options());
        }
    });

    let on_logout = move |_| {
        #[cfg(feature = "csr")]
        leptos::task::spawn_local(async move {
            session.context().session.logout().await;
            notifier.success(LOGOUT_MESSAGE);
            logged_out.set(true);
        });
        #[cfg(not(feature = "csr"))]
        let _ = notifier;
    };

    let links = nav_links(session.context().gate.routes());

    view! {
        <nav class="nav-bar">
            <a class="nav-bar__brand" href="/">"Zettelwirtschaft"</a>
            <ul class="nav-bar__links">
                {links
                    .into_iter()
                    .map(|route| view! {
                        <li><a href=route.path>{route.title}</a></li>
                    })
                    .collect_view()}
            </ul>
            <Show when=move || snapshot.get().pin_enabled>
                <button class="nav-bar__logout" on:click=on_logout>
                    "Abmelden"
                </button>
            </Show>
        </nav>
    }
}

#[cfg(test)]
#[path = "nav_bar_test.rs"]
mod tests;
