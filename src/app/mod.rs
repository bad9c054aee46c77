use crate::pages::AppLayout;
use crate::state::DocumentContext;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    // Hydrates from localStorage and registers the window listeners.
    DocumentContext::provide();

    view! { <AppLayout /> }
}
