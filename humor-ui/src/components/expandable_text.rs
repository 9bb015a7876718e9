use leptos::prelude::*;

pub const TRUNCATE_AT: usize = 50;

/// The first `max` characters of `text`, or `None` if it already fits.
pub fn truncate_chars(text: &str, max: usize) -> Option<String> {
    let (cut, _) = text.char_indices().nth(max)?;
    Some(format!("{}...", &text[..cut]))
}

#[component]
pub fn ExpandableText(
    #[prop(into)] text: String,
    #[prop(default = TRUNCATE_AT)] max_chars: usize,
) -> impl IntoView {
    let Some(short) = truncate_chars(&text, max_chars) else {
        return view! { <span class="expandable">{text}</span> }.into_any();
    };

    let expanded = RwSignal::new(false);

    view! {
        <span class="expandable">
            {move || if expanded.get() { text.clone() } else { short.clone() }}
            " "
            <button
                class="expandable__toggle"
                on:click=move |_| expanded.update(|e| *e = !*e)
            >
                {move || if expanded.get() { "Show less" } else { "Show more" }}
            </button>
        </span>
    }
    .into_any()
}
