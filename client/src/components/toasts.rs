//! Toast stack rendered in a fixed corner of the viewport.

use leptos::prelude::*;

use crate::state::notifications::Notifier;

#[component]
pub fn ToastHost() -> impl IntoView {
    let notifier = expect_context::<Notifier>();

    view! {
        <div class="toast-host" role="status" aria-live="polite">
            <For
                each=move || notifier.toasts()
                key=|toast| toast.id
                children=move |toast| {
                    let id = toast.id;
                    view! {
                        <div class=toast.kind.css_class()>
                            <span class="toast__message">{toast.message}</span>
                            <button class="toast__close" on:click=move |_| notifier.remove(id)>
                                "×"
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}
