use crate::components::{
    server_error_message, submission_from, submit_vote, CaptionCard, ErrorFlash, LoadingSpinner,
    RequireLogin,
};
use humor_app::domain::{CaptionLookup, VoteValue, VotingQueue};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_query_map;
use server_fn::ServerFnError;
use uuid::Uuid;

#[server(GetRandomUnvotedCaptionFn, "/api", endpoint = "random_unvoted_caption")]
pub async fn get_random_unvoted_caption() -> Result<CaptionLookup, ServerFnError> {
    use humor_app::AppContext;

    let ctx = expect_context::<AppContext>();
    let viewer = crate::auth::viewer().await?;

    Ok(ctx.browse.random_unvoted(viewer.as_ref()).await.into())
}

#[server(GetCaptionByIdFn, "/api", endpoint = "caption_by_id")]
pub async fn get_caption_by_id(caption_id: Uuid) -> Result<CaptionLookup, ServerFnError> {
    use humor_app::AppContext;

    let ctx = expect_context::<AppContext>();
    let viewer = crate::auth::viewer().await?;

    Ok(ctx.browse.by_id(viewer.as_ref(), caption_id).await.into())
}

#[component]
pub fn CaptionsPage() -> impl IntoView {
    view! {
        <RequireLogin>
            <CaptionsLoader/>
        </RequireLogin>
    }
}

/// Loads the first caption: the one named by `?caption=<id>`, else a random one.
#[component]
fn CaptionsLoader() -> impl IntoView {
    let query = use_query_map();
    let requested = move || {
        query
            .with(|q| q.get("caption"))
            .and_then(|id| Uuid::parse_str(&id).ok())
    };
    let first = Resource::new(requested, |requested| async move {
        match requested {
            Some(id) => get_caption_by_id(id).await,
            None => get_random_unvoted_caption().await,
        }
    });

    view! {
        <h1 class="page-title">"Rate Captions"</h1>
        <Suspense fallback=move || view! { <LoadingSpinner message="Finding a caption..."/> }>
            {move || {
                first.get().map(|result| {
                    let initial = result.unwrap_or_else(|e| CaptionLookup {
                        caption: None,
                        error: Some(server_error_message(&e)),
                    });
                    view! { <VotingInterface initial=initial/> }
                })
            }}
        </Suspense>
    }
}

#[component]
fn VotingInterface(initial: CaptionLookup) -> impl IntoView {
    let queue = RwSignal::new(VotingQueue::new(initial.caption));
    let fetch_error = RwSignal::new(initial.error);
    let flash = ErrorFlash::new();
    let loading = RwSignal::new(false);
    let preloading = RwSignal::new(false);

    let preload = move || {
        if preloading.get_untracked() || !queue.with_untracked(|q| q.needs_preload()) {
            return;
        }
        preloading.set(true);
        spawn_local(async move {
            if let Ok(CaptionLookup {
                caption: Some(caption),
                ..
            }) = get_random_unvoted_caption().await
            {
                queue.update(|q| {
                    q.set_preloaded(caption);
                });
            }
            preloading.set(false);
        });
    };

    let load_next = move || {
        if let Some(caption) = queue.try_update(|q| q.take_preloaded()).flatten() {
            queue.update(|q| q.push(caption));
            return;
        }
        loading.set(true);
        spawn_local(async move {
            match get_random_unvoted_caption().await {
                Ok(CaptionLookup {
                    caption: Some(caption),
                    ..
                }) => {
                    fetch_error.set(None);
                    queue.update(|q| {
                        if !q.contains(caption.id()) {
                            q.push(caption);
                        }
                    });
                }
                Ok(CaptionLookup { error, .. }) => {
                    fetch_error.set(Some(
                        error.unwrap_or_else(|| "No more captions to show".to_string()),
                    ));
                }
                Err(e) => fetch_error.set(Some(server_error_message(&e))),
            }
            loading.set(false);
        });
    };

    Effect::new(move |_| {
        if queue.with(|q| q.needs_preload()) {
            preload();
        }
    });

    let on_vote = move |action: VoteValue| {
        let Some(vote) = queue.try_update(|q| q.apply_vote(action)).flatten() else {
            return;
        };
        flash.clear();

        spawn_local(async move {
            let outcome = submission_from(submit_vote(vote.caption_id, action.as_i16()).await);
            if outcome.success {
                let still_at_end =
                    queue.with_untracked(|q| q.is_at_end() && q.current_index() == vote.index);
                if still_at_end {
                    load_next();
                }
            } else {
                queue.update(|q| q.revert_vote(vote));
                flash.show(
                    outcome
                        .error
                        .unwrap_or_else(|| "Failed to submit vote".to_string()),
                );
            }
        });
    };

    let on_skip = move |_| {
        flash.clear();
        if queue.with_untracked(|q| q.is_empty() || q.is_at_end()) {
            load_next();
        } else {
            queue.update(|q| {
                q.go_forward();
            });
        }
    };

    let on_previous = move |_| {
        flash.clear();
        queue.update(|q| {
            q.go_back();
        });
    };

    let on_next = move |_| {
        flash.clear();
        queue.update(|q| {
            q.go_forward();
        });
    };

    let at_end = move || queue.with(|q| q.is_empty() || q.is_at_end());

    view! {
        <div class="voting">
            <div class="voting__nav">
                <button
                    class="voting__nav-btn"
                    prop:disabled=move || !queue.with(|q| q.can_go_back())
                    on:click=on_previous
                >
                    "← Previous"
                </button>
                <span class="voting__position">
                    {move || queue.with(|q| {
                        if q.is_empty() {
                            String::new()
                        } else {
                            format!("{} / {}", q.current_index() + 1, q.len())
                        }
                    })}
                </span>
                <button
                    class="voting__nav-btn"
                    prop:disabled=move || !queue.with(|q| q.can_go_forward())
                    on:click=on_next
                >
                    "Next →"
                </button>
            </div>

            {move || {
                fetch_error
                    .get()
                    .filter(|_| at_end())
                    .map(|message| view! { <p class="voting__notice">{message}</p> })
            }}

            {move || {
                queue.with(|q| q.current().cloned()).map(|entry| {
                    let state = entry.state;
                    view! {
                        <CaptionCard details={entry.caption.details}/>
                        <div class="voting__actions">
                            <button
                                class="vote-btn vote-btn--down"
                                class:vote-btn--active={state.vote == Some(VoteValue::Down)}
                                on:click=move |_| on_vote(VoteValue::Down)
                            >
                                "▼ Downvote"
                            </button>
                            <span class="voting__score">{state.score}</span>
                            <button
                                class="vote-btn vote-btn--up"
                                class:vote-btn--active={state.vote == Some(VoteValue::Up)}
                                on:click=move |_| on_vote(VoteValue::Up)
                            >
                                "▲ Upvote"
                            </button>
                        </div>
                    }
                })
            }}

            {move || flash.get().map(|message| view! { <p class="vote-error">{message}</p> })}

            <button
                class="voting__skip"
                prop:disabled=move || loading.get()
                on:click=on_skip
            >
                {move || if loading.get() { "Loading..." } else { "Skip" }}
            </button>
        </div>
    }
}
