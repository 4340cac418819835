//! [`Navigator`] backed by `leptos_router`.
//!
//! The invalidator fires from inside request futures, outside any view, so it
//! cannot call `use_navigate` itself. The navigate closure is captured once
//! under the `<Router>` and replayed here.

use std::rc::Rc;

use leptos_router::NavigateOptions;
use zettelwirtschaft::router::intent::NavigationIntent;
use zettelwirtschaft::router::navigator::Navigator;

type NavigateFn = Rc<dyn Fn(&str, NavigateOptions)>;

pub struct RouterNavigator {
    navigate: NavigateFn,
}

impl RouterNavigator {
    pub fn new<F>(navigate: F) -> Self
    where
        F: Fn(&str, NavigateOptions) + 'static,
    {
        Self { navigate: Rc::new(navigate) }
    }
}

impl Navigator for RouterNavigator {
    fn current_path(&self) -> String {
        current_full_path()
    }

    fn replace(&self, intent: &NavigationIntent) {
        (self.navigate)(&intent.href(), replace_options());
    }
}

/// Options for every gate-issued navigation: the left view must not stay in
/// the history stack.
#[must_use]
pub fn replace_options() -> NavigateOptions {
    NavigateOptions { replace: true, ..NavigateOptions::default() }
}

/// Path, query and fragment of the page the browser is showing.
#[must_use]
pub fn current_full_path() -> String {
    #[cfg(feature = "csr")]
    {
        let location = web_sys::window().map(|w| w.location());
        let parts = location.and_then(|l| Some((l.pathname().ok()?, l.search().ok()?, l.hash().ok()?)));
        if let Some((path, search, hash)) = parts {
            return format!("{path}{search}{hash}");
        }
    }
    "/".to_owned()
}
