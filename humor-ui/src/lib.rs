#![recursion_limit = "256"]
pub mod auth;
pub mod components;
pub mod pages;

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;

use pages::{CaptionsPage, GatedContentPage, HomePage, VotedHistory};

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="Humor Captions"/>
        <Meta name="description" content="Vote on image captions and see what makes people laugh"/>

        <Router>
            <header class="site-header">
                <a href="/" class="site-header__brand">"Humor Captions"</a>
            </header>
            <main class="container">
                <Routes fallback=|| "Page not found">
                    <Route path=path!("/") view=HomePage/>
                    <Route path=path!("/captions") view=CaptionsPage/>
                    <Route path=path!("/voted-history") view=VotedHistory/>
                    <Route path=path!("/gated-content") view=GatedContentPage/>
                </Routes>
            </main>
        </Router>
    }
}

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    leptos::mount::hydrate_body(App);
}
