//! Root application component with routing and context providers.

use std::rc::Rc;

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{Route, Router, Routes},
    hooks::use_navigate,
};

use crate::components::{nav_bar::NavBar, route_gate::RouteGate, toasts::ToastHost};
use crate::net::navigator::RouterNavigator;
use crate::pages::{pin_login::PinLoginPage, section::SectionPage};
use crate::state::{notifications::Notifier, session::SessionHandle};

/// Root application component.
///
/// Provides the toast store, then mounts the router. The session context is
/// installed one level down because its navigator needs the router.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();
    Notifier::provide();

    view! {
        <Title text="Zettelwirtschaft"/>

        <Router>
            <AppShell/>
        </Router>
        <ToastHost/>
    }
}

#[component]
fn AppShell() -> impl IntoView {
    SessionHandle::install(Rc::new(RouterNavigator::new(use_navigate())));

    view! {
        <NavBar/>
        <main class="app-main">
            <Routes fallback=|| view! { <RouteGate>"Seite nicht gefunden."</RouteGate> }>
                <Route path=StaticSegment("pin") view=PinLoginPage/>
                <Route path=StaticSegment("") view=|| gated("dashboard")/>
                <Route path=StaticSegment("dokumente") view=|| gated("documents")/>
                <Route path=(StaticSegment("dokumente"), ParamSegment("id")) view=|| gated("document-detail")/>
                <Route path=StaticSegment("upload") view=|| gated("upload")/>
                <Route path=StaticSegment("pruefen") view=|| gated("review")/>
                <Route path=StaticSegment("suche") view=|| gated("search")/>
                <Route path=StaticSegment("steuer") view=|| gated("tax")/>
                <Route path=StaticSegment("garantien") view=|| gated("warranties")/>
                <Route path=StaticSegment("scan") view=|| gated("scan")/>
                <Route path=StaticSegment("einstellungen") view=|| gated("settings")/>
            </Routes>
        </main>
    }
}

fn gated(name: &'static str) -> impl IntoView {
    view! {
        <RouteGate>
            <SectionPage name=name/>
        </RouteGate>
    }
}
