use leptos::prelude::*;

#[component]
pub fn LoadingSpinner(#[prop(into, optional)] message: Option<String>) -> impl IntoView {
    view! {
        <div class="loading">
            <div class="loading__spinner"></div>
            <p class="loading__text">{message.unwrap_or_else(|| "Loading...".to_string())}</p>
        </div>
    }
}
