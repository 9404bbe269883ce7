use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackLevel {
    Info,
    Success,
    Error,
}

/// A page-level message shown in the feedback panel
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FeedbackMessage {
    pub level: FeedbackLevel,
    pub text: String,
    /// Sticky messages stay until dismissed instead of fading out
    pub sticky: bool,
}

impl FeedbackMessage {
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: FeedbackLevel::Error,
            text: text.into(),
            sticky: false,
        }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self {
            level: FeedbackLevel::Info,
            text: text.into(),
            sticky: false,
        }
    }

    pub fn sticky(mut self) -> Self {
        self.sticky = true;
        self
    }
}
