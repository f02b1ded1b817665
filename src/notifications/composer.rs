//! Builds notification messages from submissions
//!
//! Composition is a pure function of the submission and the configured
//! addresses: composing the same order twice gives identical messages.

use super::message::{ComposedMessages, Message};
use super::templates::{self, MessageTemplates, TemplateError};
use crate::config::AppConfig;
use crate::core::order::Order;
use crate::core::validation::ClubSignup;
use serde::Serialize;
use std::sync::Arc;

/// Date format used in message subjects and bodies (e.g. `Dec 24, 2025`)
pub const EMAIL_DATE_FORMAT: &str = "%b %d, %Y";

const CREATED_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

#[derive(Serialize)]
struct OrderContext<'a> {
    order_id: String,
    created: String,
    name: &'a str,
    email: &'a str,
    phone: &'a str,
    choice: &'static str,
    date_needed: String,
    details: &'a str,
    from_email: &'a str,
}

#[derive(Serialize)]
struct ClubContext<'a> {
    name: &'a str,
    email: &'a str,
    from_email: &'a str,
}

/// Renders the customer confirmation and the business alert
#[derive(Debug, Clone)]
pub struct Composer {
    templates: Arc<MessageTemplates>,
    from_email: String,
    business_email: String,
}

impl Composer {
    pub fn new(config: &AppConfig) -> Result<Self, TemplateError> {
        Ok(Self {
            templates: Arc::new(MessageTemplates::new()?),
            from_email: config.default_from_email.clone(),
            business_email: config.business_email.clone(),
        })
    }

    /// Compose both notifications for a stored order.
    ///
    /// The business alert carries every order field including the generated
    /// id, and sets Reply-To to the customer. The customer confirmation only
    /// names the shop's sending address.
    pub fn compose(&self, order: &Order) -> Result<ComposedMessages, TemplateError> {
        let context = OrderContext {
            order_id: order.id.to_string(),
            created: order.created.format(CREATED_FORMAT).to_string(),
            name: &order.name,
            email: &order.email,
            phone: &order.phone,
            choice: order.choice.display_name(),
            date_needed: order.date_needed.format(EMAIL_DATE_FORMAT).to_string(),
            details: &order.details,
            from_email: &self.from_email,
        };

        let customer = Message::new(
            &self.from_email,
            &order.email,
            &self.templates.render(templates::CUSTOMER_SUBJECT, &context)?,
            self.templates.render(templates::CUSTOMER_TEXT, &context)?,
        )
        .with_html(self.templates.render(templates::CUSTOMER_HTML, &context)?);

        let business = Message::new(
            &self.from_email,
            &self.business_email,
            &self.templates.render(templates::BUSINESS_SUBJECT, &context)?,
            self.templates.render(templates::BUSINESS_TEXT, &context)?,
        )
        .with_html(self.templates.render(templates::BUSINESS_HTML, &context)?)
        .with_reply_to(&order.email);

        Ok(ComposedMessages { customer, business })
    }

    /// Compose the welcome message and the business alert for a club signup
    pub fn compose_club(&self, signup: &ClubSignup) -> Result<ComposedMessages, TemplateError> {
        let context = ClubContext {
            name: &signup.name,
            email: &signup.email,
            from_email: &self.from_email,
        };

        let customer = Message::new(
            &self.from_email,
            &signup.email,
            &self.templates.render(templates::CLUB_MEMBER_SUBJECT, &context)?,
            self.templates.render(templates::CLUB_MEMBER_TEXT, &context)?,
        )
        .with_html(self.templates.render(templates::CLUB_MEMBER_HTML, &context)?);

        let business = Message::new(
            &self.from_email,
            &self.business_email,
            &self.templates.render(templates::CLUB_BUSINESS_SUBJECT, &context)?,
            self.templates.render(templates::CLUB_BUSINESS_TEXT, &context)?,
        )
        .with_reply_to(&signup.email);

        Ok(ComposedMessages { customer, business })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::order::{Fulfillment, NewOrder};
    use chrono::{NaiveDate, TimeZone, Utc};
    use uuid::Uuid;

    fn composer() -> Composer {
        Composer::new(&AppConfig::for_testing()).unwrap()
    }

    fn order(choice: Fulfillment, details: &str) -> Order {
        Order::from_new(
            NewOrder {
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
                phone: "555-1212".to_string(),
                choice,
                date_needed: NaiveDate::from_ymd_opt(2025, 12, 24).unwrap(),
                details: details.to_string(),
            },
            Uuid::new_v4(),
            Utc.with_ymd_and_hms(2025, 12, 1, 9, 30, 0).unwrap(),
        )
    }

    #[test]
    fn test_business_message_has_full_detail() {
        let order = order(Fulfillment::Delivery, "2 dozen sugar cookies");
        let messages = composer().compose(&order).unwrap();
        let business = &messages.business;
        let order_id = order.id.to_string();

        assert_eq!(business.to, vec!["kitchen@honeybee.test".to_string()]);
        assert_eq!(business.reply_to.as_deref(), Some("ada@example.com"));
        assert_eq!(business.subject, "New Honeybee Order from Ada (Delivery) on Dec 24, 2025");
        for expected in [
            "Ada",
            "ada@example.com",
            "555-1212",
            "Delivery",
            "Dec 24, 2025",
            "2 dozen sugar cookies",
            order_id.as_str(),
        ] {
            assert!(business.text_body.contains(expected), "text missing {expected}");
            assert!(
                business.html_body.as_ref().unwrap().contains(expected),
                "html missing {expected}"
            );
        }
    }

    #[test]
    fn test_choice_is_never_rendered_as_code() {
        let messages = composer().compose(&order(Fulfillment::PickUp, "pie")).unwrap();
        assert!(messages.business.subject.contains("(Pick-up)"));
        assert!(messages.business.text_body.contains("Pickup/Delivery: Pick-up"));
        assert!(!messages.business.text_body.contains("Pickup/Delivery: P\n"));
        assert!(messages.customer.text_body.contains("your pick-up on Dec 24, 2025"));
    }

    #[test]
    fn test_customer_message_hides_business_inbox() {
        let messages = composer().compose(&order(Fulfillment::Delivery, "pie")).unwrap();
        let customer = &messages.customer;

        assert_eq!(customer.to, vec!["ada@example.com".to_string()]);
        assert_eq!(customer.from, "hello@honeybee.test");
        assert_eq!(customer.reply_to, None);
        let rendered = serde_json::to_string(customer).unwrap();
        assert!(!rendered.contains("kitchen@honeybee.test"));
        assert!(customer.text_body.contains("Hi Ada,"));
        assert!(customer.text_body.contains("pie"));
        assert!(customer.text_body.contains("Dec 24, 2025"));
    }

    #[test]
    fn test_html_bodies_escape_details() {
        let messages = composer()
            .compose(&order(Fulfillment::Delivery, "<script>alert(1)</script>"))
            .unwrap();

        for html in [&messages.customer.html_body, &messages.business.html_body] {
            let html = html.as_ref().unwrap();
            assert!(!html.contains("<script>"));
            assert!(html.contains("&lt;script&gt;alert(1)"));
        }
        // plaintext bodies keep the text as typed
        assert!(messages.business.text_body.contains("<script>alert(1)</script>"));
    }

    #[test]
    fn test_compose_is_deterministic() {
        let composer = composer();
        let order = order(Fulfillment::Delivery, "3 pecan pies\nno nuts on one");
        assert_eq!(composer.compose(&order).unwrap(), composer.compose(&order).unwrap());
    }

    #[test]
    fn test_club_messages() {
        let signup = ClubSignup {
            name: "Grace".to_string(),
            email: "grace@example.com".to_string(),
        };
        let messages = composer().compose_club(&signup).unwrap();

        assert_eq!(messages.customer.to, vec!["grace@example.com".to_string()]);
        assert!(messages.customer.subject.contains("Southern Sweets Club"));
        assert!(!serde_json::to_string(&messages.customer).unwrap().contains("kitchen@"));
        assert_eq!(messages.business.to, vec!["kitchen@honeybee.test".to_string()]);
        assert!(messages.business.text_body.contains("grace@example.com"));
        assert_eq!(messages.business.html_body, None);
    }
}
