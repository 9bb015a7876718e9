use super::{server_error_message, ErrorDisplay, LoadingSpinner};
use crate::auth::get_current_user;
use leptos::prelude::*;
use leptos_router::components::Redirect;

/// Renders `children` for signed-in users and sends everyone else to `/`.
#[component]
pub fn RequireLogin(children: ChildrenFn) -> impl IntoView {
    let user = Resource::new(|| (), |_| get_current_user());

    view! {
        <Suspense fallback=move || view! { <LoadingSpinner/> }>
            {move || {
                user.get().map(|result| match result {
                    Ok(Some(_)) => children().into_any(),
                    Ok(None) => view! { <Redirect path="/"/> }.into_any(),
                    Err(e) => view! { <ErrorDisplay message={server_error_message(&e)}/> }.into_any(),
                })
            }}
        </Suspense>
    }
}
