//! Placeholder screen for a gated section of the document manager.

use leptos::prelude::*;
use leptos_router::hooks::use_params_map;

use crate::state::session::SessionHandle;

#[component]
pub fn SectionPage(name: &'static str) -> impl IntoView {
    let session = expect_context::<SessionHandle>();
    let params = use_params_map();
    let title = session
        .context()
        .gate
        .routes()
        .routes()
        .iter()
        .find(|r| r.name == name)
        .map_or(name, |r| r.title);

    view! {
        <section class="section-page" data-route=name>
            <h1>{title}</h1>
            {move || params.with(|p| p.get("id")).map(|id| view! { <p class="section-page__id">"Nr. "{id}</p> })}
        </section>
    }
}
