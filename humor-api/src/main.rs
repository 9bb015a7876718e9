mod auth_routes;

use axum::{routing::post, Router};
use humor_app::{AppContext, Config};
use humor_ui::components::{GetUserVoteFn, SubmitVoteFn};
use humor_ui::pages::{
    GetCaptionByIdFn, GetRandomUnvotedCaptionFn, GetVotedHistoryFn, ListCaptionExamplesFn,
};
use humor_ui::{auth::GetCurrentUserFn, App};
use leptos::prelude::*;
use leptos_axum::{generate_route_list, handle_server_fns_with_context, LeptosRoutes};
use tower_http::compression::CompressionLayer;
use tower_sessions::cookie::SameSite;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let conf = get_configuration(Some("Cargo.toml")).expect("Failed to load Leptos config");
    let leptos_options = conf.leptos_options;
    let addr = leptos_options.site_addr;

    let config = Config::from_env().expect("Invalid configuration");
    let app_context = AppContext::connect(&config)
        .await
        .expect("Failed to initialize application");

    let session_layer = SessionManagerLayer::new(MemoryStore::default())
        .with_secure(config.secure_cookies)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(time::Duration::days(7)));

    let routes = generate_route_list(App);

    server_fn::axum::register_explicit::<SubmitVoteFn>();
    server_fn::axum::register_explicit::<GetUserVoteFn>();
    server_fn::axum::register_explicit::<GetRandomUnvotedCaptionFn>();
    server_fn::axum::register_explicit::<GetCaptionByIdFn>();
    server_fn::axum::register_explicit::<GetVotedHistoryFn>();
    server_fn::axum::register_explicit::<ListCaptionExamplesFn>();
    server_fn::axum::register_explicit::<GetCurrentUserFn>();
    tracing::info!("Registered server functions");

    let app = Router::new()
        .merge(auth_routes::routes(app_context.clone()))
        .route("/api/{*fn_name}", post({
            let ctx = app_context.clone();
            move |req| {
                let ctx = ctx.clone();
                async move {
                    handle_server_fns_with_context(
                        move || provide_context(ctx.clone()),
                        req
                    ).await
                }
            }
        }))
        .leptos_routes_with_context(
            &leptos_options,
            routes,
            {
                let ctx = app_context.clone();
                move || provide_context(ctx.clone())
            },
            {
                let leptos_options = leptos_options.clone();
                move || shell(leptos_options.clone())
            },
        )
        .fallback(leptos_axum::file_and_error_handler(shell))
        .layer(session_layer)
        .layer(CompressionLayer::new())
        .with_state(leptos_options);

    tracing::info!("Listening on http://{}", addr);
    tracing::info!("Vote limits: 30/min, 600/hour per profile");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind address");

    axum::serve(listener, app.into_make_service())
        .await
        .expect("Server error");
}

fn shell(options: LeptosOptions) -> impl IntoView {
    use leptos_meta::*;

    let css = r#"
        :root {
            --base: #faf4ed;
            --surface: #fffaf3;
            --overlay: #f2e9e1;
            --muted: #9893a5;
            --subtle: #797593;
            --text: #575279;
            --love: #b4637a;
            --gold: #ea9d34;
            --pine: #286983;
            --foam: #56949f;
        }
        * { box-sizing: border-box; margin: 0; padding: 0; }
        body {
            font-family: 'Inter', -apple-system, sans-serif;
            background: var(--base);
            color: var(--text);
            min-height: 100vh;
        }
        a { color: var(--pine); }
        .container { max-width: 960px; margin: 0 auto; padding: 1.5rem; }
        .site-header { padding: 1rem 1.5rem; border-bottom: 1px solid var(--overlay); }
        .site-header__brand { font-weight: 800; color: var(--love); text-decoration: none; }
        .page-title { color: var(--love); font-size: 1.6rem; margin: 1.5rem 0 1rem; }
        .hero { text-align: center; padding: 3rem 0 2rem; }
        .hero__title { font-size: clamp(2rem, 5vw, 3rem); color: var(--love); font-weight: 800; margin-bottom: 0.75rem; }
        .hero__subtitle { color: var(--subtle); font-size: 1.1rem; max-width: 500px; margin: 0 auto; }
        .auth-section { display: flex; flex-direction: column; align-items: center; gap: 1rem; }
        .auth-section__hint, .auth-section__loading { color: var(--muted); text-align: center; }
        .google-login-btn { padding: 0.75rem 1.5rem; background: var(--pine); color: var(--base); border-radius: 8px; text-decoration: none; font-weight: 600; }
        .home-nav { display: flex; gap: 1rem; flex-wrap: wrap; justify-content: center; }
        .home-nav__link { padding: 0.5rem 1rem; border: 2px solid var(--overlay); border-radius: 8px; text-decoration: none; }
        .logout-btn { padding: 0.5rem 1rem; background: none; border: 1px solid var(--muted); border-radius: 4px; cursor: pointer; color: var(--subtle); }
        .loading { display: flex; flex-direction: column; align-items: center; padding: 3rem; }
        .loading__spinner {
            width: 50px; height: 50px; border: 4px solid var(--overlay);
            border-top-color: var(--gold); border-radius: 50%; animation: spin 1s linear infinite;
        }
        @keyframes spin { to { transform: rotate(360deg); } }
        .loading__text { margin-top: 1rem; color: var(--subtle); font-style: italic; }
        .caption-card { background: var(--surface); border: 2px solid var(--overlay); border-radius: 12px; padding: 1rem; }
        .caption-card__image { width: 100%; max-height: 420px; object-fit: contain; border-radius: 8px; margin-bottom: 0.75rem; }
        .caption-card__text { font-size: 1.15rem; line-height: 1.6; }
        .caption-card__meta { display: flex; gap: 0.75rem; margin-top: 0.5rem; color: var(--muted); font-size: 0.9rem; }
        .badge { padding: 0.1rem 0.5rem; border-radius: 999px; font-size: 0.8rem; font-weight: 600; }
        .badge--featured { background: var(--gold); color: var(--base); }
        .badge--up { background: var(--foam); color: var(--base); }
        .badge--down { background: var(--love); color: var(--base); }
        .voting__nav { display: flex; justify-content: space-between; align-items: center; margin-bottom: 1rem; }
        .voting__nav-btn, .voting__skip { padding: 0.5rem 1rem; border: 2px solid var(--overlay); background: var(--surface); border-radius: 8px; cursor: pointer; }
        .voting__nav-btn:disabled, .voting__skip:disabled { color: var(--muted); cursor: not-allowed; }
        .voting__notice { padding: 1rem; background: var(--overlay); border-radius: 8px; margin-bottom: 1rem; }
        .voting__actions { display: flex; justify-content: center; align-items: center; gap: 1.5rem; margin: 1rem 0; }
        .voting__score { font-size: 1.4rem; font-weight: 700; }
        .voting__skip { display: block; margin: 1rem auto 0; }
        .vote-controls { display: flex; align-items: center; gap: 0.5rem; margin-top: 0.5rem; flex-wrap: wrap; }
        .vote-btn { padding: 0.5rem 1rem; border: 2px solid var(--overlay); background: var(--surface); border-radius: 8px; cursor: pointer; font-weight: 600; }
        .vote-btn--active.vote-btn--up { background: var(--foam); color: var(--base); }
        .vote-btn--active.vote-btn--down { background: var(--love); color: var(--base); }
        .vote-error { color: var(--love); font-size: 0.9rem; }
        .history__summary { color: var(--subtle); margin-bottom: 1rem; }
        .history__grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(260px, 1fr)); gap: 1rem; }
        .history__item { display: flex; flex-direction: column; gap: 0.5rem; }
        .history__empty { text-align: center; padding: 2rem; }
        .pagination { display: flex; justify-content: center; gap: 1rem; margin: 1.5rem 0; }
        .examples { overflow-x: auto; }
        .examples__table { width: 100%; border-collapse: collapse; }
        .examples__table th, .examples__table td { padding: 0.5rem; border-bottom: 1px solid var(--overlay); text-align: left; vertical-align: top; }
        .examples__error { color: var(--love); }
        .expandable__toggle { background: none; border: none; color: var(--pine); cursor: pointer; font-size: 0.85rem; }
        .error { background: #fce8ec; border: 2px solid var(--love); border-radius: 8px; padding: 1.25rem; margin: 2rem 0; }
        .error__title { color: var(--love); font-weight: 700; margin-bottom: 0.5rem; }
        .error__message { color: #8b3d4d; }
        .error__retry { margin-top: 1rem; padding: 0.5rem 1rem; background: var(--love); color: var(--base); border: none; border-radius: 4px; cursor: pointer; }
    "#;

    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <title>"Humor Captions"</title>
                <style>{css}</style>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}
