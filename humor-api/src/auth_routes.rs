use axum::{
    extract::Query,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Json, Router,
};
use humor_app::domain::SessionUser;
use humor_app::infrastructure::auth::session;
use humor_app::AppContext;
use humor_errors::AppError;
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    code: Option<String>,
    state: Option<String>,
    error: Option<String>,
}

#[derive(Debug, Serialize)]
struct MeResponse {
    authenticated: bool,
    user: Option<SessionUser>,
}

/// Google sign-in flow plus the session-only endpoints.
pub fn routes<S>(ctx: AppContext) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route(
            "/auth/login",
            get({
                let ctx = ctx.clone();
                move |session: Session| {
                    let ctx = ctx.clone();
                    async move { login(ctx, session).await }
                }
            }),
        )
        .route(
            "/auth/callback",
            get({
                let ctx = ctx.clone();
                move |session: Session, Query(params): Query<CallbackParams>| {
                    let ctx = ctx.clone();
                    async move { callback(ctx, session, params).await }
                }
            }),
        )
        .merge(session_routes())
}

fn session_routes<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/auth/logout", post(logout))
        .route("/auth/me", get(me))
}

async fn login(ctx: AppContext, session: Session) -> Response {
    let (auth_url, csrf_token, pkce_verifier) = ctx.oauth.authorize_url();

    if let Err(e) = session::store_login_challenge(&session, &csrf_token, &pkce_verifier).await {
        tracing::error!("Failed to start sign-in: {}", e);
        return e.into_response();
    }

    Redirect::to(&auth_url).into_response()
}

async fn callback(ctx: AppContext, session: Session, params: CallbackParams) -> Redirect {
    if let Err(e) = complete_sign_in(&ctx, &session, params).await {
        tracing::warn!("Sign-in failed: {}", e);
    }
    Redirect::to("/")
}

async fn complete_sign_in(
    ctx: &AppContext,
    session: &Session,
    params: CallbackParams,
) -> Result<(), AppError> {
    if let Some(error) = params.error {
        return Err(AppError::Auth(error));
    }
    let code = params
        .code
        .ok_or_else(|| AppError::Auth("missing authorization code".to_string()))?;
    let state = params
        .state
        .ok_or_else(|| AppError::Auth("missing state".to_string()))?;

    let verifier = session::take_login_challenge(session, &state).await?;
    let user = ctx.complete_login(&code, verifier).await?;
    session::sign_in(session, &user).await
}

async fn logout(session: Session) -> Redirect {
    if let Err(e) = session::sign_out(&session).await {
        tracing::error!("Failed to clear session: {}", e);
    }
    Redirect::to("/")
}

async fn me(session: Session) -> Json<MeResponse> {
    let user = session::current_user(&session).await.unwrap_or_else(|e| {
        tracing::error!("Failed to read session: {}", e);
        None
    });

    Json(MeResponse {
        authenticated: user.is_some(),
        user,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use tower::ServiceExt;
    use tower_sessions::{MemoryStore, SessionManagerLayer};

    fn app() -> Router {
        session_routes().layer(SessionManagerLayer::new(MemoryStore::default()))
    }

    #[tokio::test]
    async fn test_me_without_session() {
        let response = app()
            .oneshot(Request::get("/auth/me").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["authenticated"], false);
        assert!(json["user"].is_null());
    }

    #[tokio::test]
    async fn test_logout_redirects_home() {
        let response = app()
            .oneshot(Request::post("/auth/logout").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/");
    }
}
