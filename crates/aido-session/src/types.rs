use aido_core::dispatch::{DispatchError, DispatchRequest, StaleEdit};
use aido_core::settings::{Settings, TriggerMethod};

/// One user action on the keyboard, already decoded by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyEvent {
    /// Text committed by a key press (usually one char, or a pasted chunk).
    Text(String),
    Backspace,
    Enter,
    /// Move the cursor by a signed number of chars.
    MoveCursor(i64),
    /// The user tapped a word in the suggestion strip.
    PickSuggestion(String),
    /// Explicit trigger scan, e.g. from a toolbar button.
    InvokeTrigger,
    Undo,
    Redo,
}

impl KeyEvent {
    pub fn text(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

/// Suggestion strip action, exactly one of three states.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuggestionAction {
    /// Leave the strip as-is.
    Keep,
    Show { words: Vec<String> },
    Hide,
}

/// User-visible no-op notices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    NothingToUndo,
    NothingToRedo,
}

/// What the host should do after a key event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyResponse {
    pub suggestions: SuggestionAction,
    /// A resolved trigger to send to the provider.
    pub dispatch: Option<DispatchRequest>,
    pub notice: Option<Notice>,
}

impl KeyResponse {
    pub(crate) fn keep() -> Self {
        Self {
            suggestions: SuggestionAction::Keep,
            dispatch: None,
            notice: None,
        }
    }

    pub(crate) fn hide() -> Self {
        Self {
            suggestions: SuggestionAction::Hide,
            ..Self::keep()
        }
    }

    pub(crate) fn notice(notice: Notice) -> Self {
        Self {
            notice: Some(notice),
            ..Self::keep()
        }
    }
}

/// Result of handing a finished dispatch back to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The span was replaced by the reply.
    Applied,
    /// The document moved on; nothing was changed.
    Stale(StaleEdit),
    /// The call failed; nothing was changed.
    Failed(DispatchError),
}

#[derive(Debug, Clone)]
pub(crate) struct SessionConfig {
    pub(crate) trigger_enabled: bool,
    pub(crate) trigger_method: TriggerMethod,
    /// Chars read before the cursor to find the last word.
    pub(crate) context_window: usize,
}

impl SessionConfig {
    pub(crate) fn from_settings(s: &Settings) -> Self {
        Self {
            trigger_enabled: s.trigger.enabled,
            trigger_method: s.trigger.method,
            context_window: s.suggestions.context_window,
        }
    }
}
