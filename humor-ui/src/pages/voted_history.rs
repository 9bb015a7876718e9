use crate::components::{
    server_error_message, CaptionCard, ErrorDisplay, LoadingSpinner, RequireLogin, VoteControls,
};
use humor_app::domain::{CaptionWithVotes, VoteValue, VotedHistoryPage, DEFAULT_PER_PAGE};
use leptos::prelude::*;
use leptos_router::hooks::use_query_map;
use server_fn::ServerFnError;

#[server(GetVotedHistoryFn, "/api", endpoint = "voted_caption_history")]
pub async fn get_voted_caption_history(
    page: u64,
    per_page: Option<u64>,
) -> Result<VotedHistoryPage, ServerFnError> {
    use humor_app::AppContext;

    let ctx = expect_context::<AppContext>();
    let viewer = crate::auth::viewer().await?;
    let per_page = per_page.unwrap_or(DEFAULT_PER_PAGE);

    Ok(ctx
        .browse
        .voted_history(viewer.as_ref(), page, per_page)
        .await
        .unwrap_or_else(|e| VotedHistoryPage::failed(page.max(1), e.user_message())))
}

#[component]
pub fn VotedHistory() -> impl IntoView {
    view! {
        <RequireLogin>
            <HistoryGrid/>
        </RequireLogin>
    }
}

#[component]
fn HistoryGrid() -> impl IntoView {
    let query = use_query_map();
    let page = move || {
        query
            .with(|q| q.get("page"))
            .and_then(|p| p.parse::<u64>().ok())
            .unwrap_or(1)
    };
    let history = Resource::new(page, |page| get_voted_caption_history(page, None));

    view! {
        <h1 class="page-title">"Your Voted Captions"</h1>
        <Suspense fallback=move || view! { <LoadingSpinner/> }>
            {move || {
                history.get().map(|result| match result {
                    Ok(page) => history_view(page).into_any(),
                    Err(e) => view! { <ErrorDisplay message={server_error_message(&e)}/> }.into_any(),
                })
            }}
        </Suspense>
    }
}

fn history_view(page: VotedHistoryPage) -> impl IntoView {
    if let Some(error) = page.error.clone() {
        return view! {
            <div class="history__empty">
                <p>{error}</p>
                <a href="/captions" class="home-nav__link">"Start voting"</a>
            </div>
        }
        .into_any();
    }

    let pagination = (page.total_pages > 1).then(|| {
        let current = page.current_page;
        view! {
            <nav class="pagination">
                {page.has_previous().then(|| view! {
                    <a class="pagination__link" href={format!("/voted-history?page={}", current - 1)}>
                        "← Previous"
                    </a>
                })}
                <span class="pagination__status">
                    {format!("Page {} of {}", current, page.total_pages)}
                </span>
                {page.has_next().then(|| view! {
                    <a class="pagination__link" href={format!("/voted-history?page={}", current + 1)}>
                        "Next →"
                    </a>
                })}
            </nav>
        }
    });

    view! {
        <p class="history__summary">{format!("{} captions voted", page.total_count)}</p>
        <div class="history__grid">
            {page
                .captions
                .into_iter()
                .map(|caption| view! { <HistoryItem caption=caption/> })
                .collect::<Vec<_>>()}
        </div>
        {pagination}
    }
    .into_any()
}

#[component]
fn HistoryItem(caption: CaptionWithVotes) -> impl IntoView {
    let badge = caption.user_vote.map(|vote| match vote {
        VoteValue::Up => view! { <span class="badge badge--up">"Upvoted"</span> }.into_any(),
        VoteValue::Down => view! { <span class="badge badge--down">"Downvoted"</span> }.into_any(),
    });
    let caption_id = caption.id();
    let initial = caption.vote_state();

    view! {
        <div class="history__item">
            {badge}
            <CaptionCard details={caption.details}/>
            <VoteControls caption_id=caption_id initial=initial signed_in=true/>
        </div>
    }
}
