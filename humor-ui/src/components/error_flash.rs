use humor_app::domain::VOTE_ERROR_DISPLAY;
use leptos::prelude::*;

/// A message that hides itself after [`VOTE_ERROR_DISPLAY`].
///
/// Each `show` gets its own id so an older timer never hides a newer message.
#[derive(Clone, Copy)]
pub struct ErrorFlash {
    message: RwSignal<Option<(u64, String)>>,
    shown: StoredValue<u64>,
}

impl ErrorFlash {
    pub fn new() -> Self {
        Self {
            message: RwSignal::new(None),
            shown: StoredValue::new(0),
        }
    }

    pub fn show(&self, message: impl Into<String>) {
        let id = self.shown.get_value() + 1;
        self.shown.set_value(id);
        self.message.set(Some((id, message.into())));

        let slot = self.message;
        set_timeout(
            move || {
                slot.update(|current| {
                    if matches!(current, Some((shown, _)) if *shown == id) {
                        *current = None;
                    }
                })
            },
            VOTE_ERROR_DISPLAY,
        );
    }

    pub fn clear(&self) {
        self.message.set(None);
    }

    pub fn get(&self) -> Option<String> {
        self.message.with(|m| m.as_ref().map(|(_, text)| text.clone()))
    }
}

impl Default for ErrorFlash {
    fn default() -> Self {
        Self::new()
    }
}
