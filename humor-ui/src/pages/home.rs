use crate::auth::get_current_user;
use crate::components::{server_error_message, ErrorDisplay};
use humor_app::domain::SessionUser;
use leptos::prelude::*;

#[component]
pub fn HomePage() -> impl IntoView {
    let user = Resource::new(|| (), |_| get_current_user());

    view! {
        <div class="hero">
            <h1 class="hero__title">"Humor Captions"</h1>
            <p class="hero__subtitle">
                "Vote on captions, see how they score, and help decide what is actually funny."
            </p>
        </div>

        <Suspense fallback=move || view! { <p class="auth-section__loading">"Checking sign-in..."</p> }>
            {move || {
                user.get().map(|result| match result {
                    Ok(Some(user)) => view! { <SignedIn user=user/> }.into_any(),
                    Ok(None) => view! { <SignedOut/> }.into_any(),
                    Err(e) => view! { <ErrorDisplay message={server_error_message(&e)}/> }.into_any(),
                })
            }}
        </Suspense>
    }
}

#[component]
fn SignedOut() -> impl IntoView {
    view! {
        <div class="auth-section">
            <a href="/auth/login" rel="external" class="google-login-btn">
                "Sign in with Google"
            </a>
            <p class="auth-section__hint">"Sign in to start voting on captions"</p>
        </div>
    }
}

#[component]
fn SignedIn(user: SessionUser) -> impl IntoView {
    view! {
        <div class="auth-section auth-section--logged-in">
            <p class="user-info">"Signed in as " <strong>{user.email}</strong></p>
            <nav class="home-nav">
                <a href="/captions" class="home-nav__link">"Rate captions"</a>
                <a href="/voted-history" class="home-nav__link">"Your votes"</a>
                <a href="/gated-content" class="home-nav__link">"Caption examples"</a>
            </nav>
            <form action="/auth/logout" method="post" class="logout-form">
                <button type="submit" class="logout-btn">"Logout"</button>
            </form>
        </div>
    }
}
