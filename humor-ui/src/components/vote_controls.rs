use super::server_error_message;
use chrono::Utc;
use humor_app::domain::{
    VoteReconciler, VoteState, VoteSubmission, VoteValue, LOGIN_REQUIRED_MESSAGE,
    VOTE_ERROR_DISPLAY,
};
use leptos::prelude::*;
use leptos::task::spawn_local;
use server_fn::ServerFnError;
use std::time::Duration;
use uuid::Uuid;

// Browser timers can fire a few milliseconds early.
const TIMER_SLACK: Duration = Duration::from_millis(25);

#[server(SubmitVoteFn, "/api", endpoint = "submit_vote")]
pub async fn submit_vote(
    caption_id: Uuid,
    vote_value: i16,
) -> Result<VoteSubmission, ServerFnError> {
    use humor_app::AppContext;

    let ctx = expect_context::<AppContext>();
    let viewer = crate::auth::viewer().await?;

    let value = match VoteValue::try_from(vote_value) {
        Ok(value) => value,
        Err(e) => {
            return Ok(VoteSubmission {
                success: false,
                error: Some(e),
            })
        }
    };

    if let Some(user) = &viewer {
        if let Err(e) = ctx.vote_limiter.check_vote(user.id) {
            tracing::warn!(profile_id = %user.id, "vote throttled");
            return Ok(VoteSubmission::failed(&e));
        }
    }

    let result = ctx
        .submit_vote
        .execute(viewer.as_ref(), caption_id, value)
        .await
        .map(|_| ());
    Ok(VoteSubmission::from(result))
}

#[server(GetUserVoteFn, "/api", endpoint = "user_vote")]
pub async fn get_user_vote(caption_id: Uuid) -> Result<Option<VoteValue>, ServerFnError> {
    use humor_app::AppContext;

    let ctx = expect_context::<AppContext>();
    let viewer = crate::auth::viewer().await?;

    ctx.submit_vote
        .user_vote(viewer.as_ref(), caption_id)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))
}

/// Folds a transport failure into the same shape as a rejected vote.
pub fn submission_from(result: Result<VoteSubmission, ServerFnError>) -> VoteSubmission {
    result.unwrap_or_else(|e| VoteSubmission {
        success: false,
        error: Some(server_error_message(&e)),
    })
}

/// Up/down buttons and score for one caption, updated optimistically.
#[component]
pub fn VoteControls(caption_id: Uuid, initial: VoteState, signed_in: bool) -> impl IntoView {
    let reconciler = RwSignal::new(VoteReconciler::new(caption_id, initial));

    let schedule_clear = move || {
        set_timeout(
            move || {
                reconciler.update(|r| {
                    r.clear_expired(Utc::now());
                })
            },
            VOTE_ERROR_DISPLAY + TIMER_SLACK,
        );
    };

    let on_vote = move |action: VoteValue| {
        if !signed_in {
            reconciler.update(|r| r.refuse(LOGIN_REQUIRED_MESSAGE, Utc::now()));
            schedule_clear();
            return;
        }

        let Some(pending) = reconciler.try_update(|r| r.begin(action)) else {
            return;
        };

        spawn_local(async move {
            let outcome = submission_from(submit_vote(caption_id, action.as_i16()).await);
            reconciler.update(|r| r.settle(pending, &outcome, Utc::now()));
            if !outcome.success {
                schedule_clear();
            }
        });
    };

    let current = move || reconciler.with(|r| r.state());
    let error = move || reconciler.with(|r| r.error(Utc::now()).map(str::to_string));

    view! {
        <div class="vote-controls">
            <button
                class="vote-btn vote-btn--up"
                class:vote-btn--active=move || current().vote == Some(VoteValue::Up)
                title={VoteValue::Up.label()}
                on:click=move |_| on_vote(VoteValue::Up)
            >
                "▲"
            </button>
            <span class="vote-controls__score">{move || current().score}</span>
            <button
                class="vote-btn vote-btn--down"
                class:vote-btn--active=move || current().vote == Some(VoteValue::Down)
                title={VoteValue::Down.label()}
                on:click=move |_| on_vote(VoteValue::Down)
            >
                "▼"
            </button>
            {move || error().map(|message| view! {
                <p class="vote-error">{message}</p>
            })}
        </div>
    }
}
