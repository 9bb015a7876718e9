use humor_errors::AppError;
use leptos::prelude::*;
use server_fn::ServerFnError;
use std::str::FromStr;

/// Text to show for a server function call that failed outright.
pub fn server_error_message(err: &ServerFnError) -> String {
    match err {
        ServerFnError::ServerError(msg) => match AppError::from_str(msg) {
            Ok(app_error) => app_error.user_message(),
            Err(never) => match never {},
        },
        _ => "Network error. Please try again.".to_string(),
    }
}

#[component]
pub fn ErrorDisplay(
    #[prop(into)] message: String,
    #[prop(optional)] on_retry: Option<Callback<()>>,
) -> impl IntoView {
    view! {
        <div class="error">
            <p class="error__title">"Something went wrong"</p>
            <p class="error__message">{message}</p>
            {move || on_retry.map(|retry| view! {
                <button
                    class="error__retry"
                    on:click=move |_| retry.run(())
                >
                    "Try again"
                </button>
            })}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_errors_use_app_messages() {
        let err = ServerFnError::new("You must be logged in");
        assert_eq!(server_error_message(&err), "You must be logged in");

        let err = ServerFnError::new("Database error: connection refused");
        assert_eq!(server_error_message(&err), "Database error: connection refused");
    }

    #[test]
    fn test_transport_errors_are_generic() {
        let err: ServerFnError = ServerFnError::Request("connection reset".to_string());
        assert_eq!(server_error_message(&err), "Network error. Please try again.");
    }
}
