use humor_app::domain::SessionUser;
use leptos::prelude::*;
use server_fn::ServerFnError;

#[server(GetCurrentUserFn, "/api", endpoint = "current_user")]
pub async fn get_current_user() -> Result<Option<SessionUser>, ServerFnError> {
    viewer().await
}

/// The signed-in user of the request being served, read from its session.
#[cfg(feature = "ssr")]
pub(crate) async fn viewer() -> Result<Option<SessionUser>, ServerFnError> {
    use humor_app::infrastructure::auth::session;
    use tower_sessions::Session;

    let session = leptos_axum::extract::<Session>().await?;
    session::current_user(&session).await.map_err(|e| {
        tracing::error!("Failed to read session: {}", e);
        ServerFnError::new(e.to_string())
    })
}
