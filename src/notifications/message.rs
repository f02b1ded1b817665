//! Transport-agnostic outbound messages

use serde::Serialize;

/// One email, ready to hand to a mail transport
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    pub from: String,
    pub to: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<String>,
    pub subject: String,
    pub text_body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html_body: Option<String>,
}

impl Message {
    /// Build a message, folding any line breaks out of the subject so user
    /// input can never start a new header.
    pub fn new(
        from: impl Into<String>,
        to: impl Into<String>,
        subject: &str,
        text_body: String,
    ) -> Self {
        Self {
            from: from.into(),
            to: vec![to.into()],
            reply_to: None,
            subject: single_line(subject),
            text_body,
            html_body: None,
        }
    }

    pub fn with_html(mut self, html_body: String) -> Self {
        self.html_body = Some(html_body);
        self
    }

    pub fn with_reply_to(mut self, reply_to: impl Into<String>) -> Self {
        self.reply_to = Some(reply_to.into());
        self
    }
}

/// The pair of notifications produced for one submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComposedMessages {
    pub customer: Message,
    pub business: Message,
}

fn single_line(value: &str) -> String {
    value
        .split(['\r', '\n'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
