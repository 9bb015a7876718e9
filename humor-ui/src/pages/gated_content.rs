use crate::components::{ExpandableText, LoadingSpinner, RequireLogin};
use humor_app::domain::CaptionExample;
use leptos::prelude::*;
use server_fn::ServerFnError;

#[server(ListCaptionExamplesFn, "/api", endpoint = "caption_examples")]
pub async fn list_caption_examples() -> Result<Vec<CaptionExample>, ServerFnError> {
    use humor_app::AppContext;

    let ctx = expect_context::<AppContext>();
    let viewer = crate::auth::viewer().await?;

    ctx.browse
        .caption_examples(viewer.as_ref())
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))
}

#[component]
pub fn GatedContentPage() -> impl IntoView {
    view! {
        <RequireLogin>
            <CaptionExamples/>
        </RequireLogin>
    }
}

#[component]
fn CaptionExamples() -> impl IntoView {
    let examples = Resource::new(|| (), |_| list_caption_examples());

    view! {
        <h1 class="page-title">"Caption Examples"</h1>
        <Suspense fallback=move || view! { <LoadingSpinner/> }>
            {move || {
                examples.get().map(|result| match result {
                    Ok(rows) if rows.is_empty() => view! {
                        <p class="examples__empty">"No caption examples yet."</p>
                    }.into_any(),
                    Ok(rows) => view! { <ExamplesTable rows=rows/> }.into_any(),
                    Err(_) => view! {
                        <p class="examples__error">
                            "Could not fetch caption examples. Please try again later."
                        </p>
                    }.into_any(),
                })
            }}
        </Suspense>
    }
}

#[component]
fn ExamplesTable(rows: Vec<CaptionExample>) -> impl IntoView {
    view! {
        <div class="examples">
            <table class="examples__table">
                <thead>
                    <tr>
                        <th>"ID"</th>
                        <th>"Created"</th>
                        <th>"Image description"</th>
                        <th>"Caption"</th>
                        <th>"Explanation"</th>
                        <th>"Priority"</th>
                        <th>"Image"</th>
                    </tr>
                </thead>
                <tbody>
                    {rows.into_iter().map(|row| {
                        view! {
                            <tr>
                                <td>{row.id}</td>
                                <td>{row.created_at.format("%Y-%m-%d").to_string()}</td>
                                <td><ExpandableText text={row.image_description}/></td>
                                <td><ExpandableText text={row.caption}/></td>
                                <td><ExpandableText text={row.explanation}/></td>
                                <td>{row.priority}</td>
                                <td class="examples__image-id">
                                    {row.image_id.map(|id| id.to_string()).unwrap_or_else(|| "-".to_string())}
                                </td>
                            </tr>
                        }
                    }).collect::<Vec<_>>()}
                </tbody>
            </table>
        </div>
    }
}
