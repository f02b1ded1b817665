//! SendGrid v3 mail transport
//!
//! Gated behind the `sendgrid` feature flag:
//! ```toml
//! [dependencies]
//! honeybee = { version = "0.1", features = ["sendgrid"] }
//! ```

use super::message::Message;
use super::transport::MailTransport;
use crate::core::error::DispatchFault;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Serialize;

pub const SENDGRID_ENDPOINT: &str = "https://api.sendgrid.com/v3/mail/send";

/// Transport posting messages to the SendGrid `mail/send` endpoint
#[derive(Clone)]
pub struct SendGridTransport {
    client: reqwest::Client,
    api_key: String,
    endpoint: String,
}

impl SendGridTransport {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_endpoint(api_key, SENDGRID_ENDPOINT)
    }

    /// Point the transport at another endpoint (sandbox, local mock)
    pub fn with_endpoint(api_key: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            endpoint: endpoint.into(),
        }
    }
}

#[derive(Debug, Serialize)]
struct Address<'a> {
    email: &'a str,
}

#[derive(Debug, Serialize)]
struct Personalization<'a> {
    to: Vec<Address<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    value: &'a str,
}

#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    personalizations: Vec<Personalization<'a>>,
    from: Address<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to: Option<Address<'a>>,
    subject: &'a str,
    content: Vec<Content<'a>>,
}

impl<'a> From<&'a Message> for SendRequest<'a> {
    fn from(message: &'a Message) -> Self {
        // text/plain must come first
        let mut content = vec![Content {
            kind: "text/plain",
            value: &message.text_body,
        }];
        if let Some(html) = &message.html_body {
            content.push(Content {
                kind: "text/html",
                value: html,
            });
        }

        Self {
            personalizations: vec![Personalization {
                to: message.to.iter().map(|email| Address { email }).collect(),
            }],
            from: Address {
                email: &message.from,
            },
            reply_to: message.reply_to.as_deref().map(|email| Address { email }),
            subject: &message.subject,
            content,
        }
    }
}

fn classify_status(status: StatusCode, body: String) -> DispatchFault {
    let message = format!("{}: {}", status, body.trim());
    match status {
        StatusCode::BAD_REQUEST => DispatchFault::MalformedHeader { message },
        _ => DispatchFault::Rejected { message },
    }
}

fn classify_error(error: reqwest::Error) -> DispatchFault {
    DispatchFault::Connection {
        message: error.to_string(),
    }
}

#[async_trait]
impl MailTransport for SendGridTransport {
    async fn send(&self, message: &Message) -> Result<(), DispatchFault> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&SendRequest::from(message))
            .send()
            .await
            .map_err(classify_error)?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(classify_status(status, body))
    }

    fn name(&self) -> &'static str {
        "sendgrid"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_shape() {
        let message = Message::new(
            "hello@honeybee.test",
            "ada@example.com",
            "Hi",
            "plain".to_string(),
        )
        .with_html("<p>html</p>".to_string())
        .with_reply_to("reply@honeybee.test");

        let json = serde_json::to_value(SendRequest::from(&message)).unwrap();
        assert_eq!(json["personalizations"][0]["to"][0]["email"], "ada@example.com");
        assert_eq!(json["from"]["email"], "hello@honeybee.test");
        assert_eq!(json["reply_to"]["email"], "reply@honeybee.test");
        assert_eq!(json["subject"], "Hi");
        assert_eq!(json["content"][0]["type"], "text/plain");
        assert_eq!(json["content"][1]["type"], "text/html");
    }

    #[test]
    fn test_request_without_html_or_reply_to() {
        let message = Message::new("a@b.c", "d@e.f", "Hi", "plain".to_string());
        let json = serde_json::to_value(SendRequest::from(&message)).unwrap();
        assert!(json.get("reply_to").is_none());
        assert_eq!(json["content"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_status_classification() {
        assert_eq!(
            classify_status(StatusCode::BAD_REQUEST, "bad from".to_string()).kind(),
            "malformed_header"
        );
        assert_eq!(
            classify_status(StatusCode::FORBIDDEN, String::new()).kind(),
            "rejected"
        );
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_a_connection_fault() {
        let transport = SendGridTransport::with_endpoint("key", "http://127.0.0.1:9/v3/mail/send");
        let message = Message::new("a@b.c", "d@e.f", "Hi", "plain".to_string());
        let fault = transport.send(&message).await.unwrap_err();
        assert_eq!(fault.kind(), "connection");
    }
}
