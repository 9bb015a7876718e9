use humor_app::domain::CaptionDetails;
use leptos::prelude::*;

#[component]
pub fn CaptionCard(details: CaptionDetails) -> impl IntoView {
    let image = details.image_url().map(|url| {
        view! { <img class="caption-card__image" src={url.to_string()} alt={details.image_alt().to_string()}/> }
    });
    let author = details
        .author
        .as_ref()
        .and_then(|a| a.display_name())
        .map(|name| view! { <span class="caption-card__author">"by " {name}</span> });

    view! {
        <article class="caption-card">
            {image}
            <p class="caption-card__text">{details.text().to_string()}</p>
            <div class="caption-card__meta">
                {author}
                {details.caption.is_featured.then(|| view! {
                    <span class="badge badge--featured">"Featured"</span>
                })}
                <span class="caption-card__likes">{details.caption.like_count} " likes"</span>
            </div>
        </article>
    }
}
