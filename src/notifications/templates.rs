//! Named, versioned notification templates
//!
//! Template names carry their output format as a suffix. Names ending in
//! `.html` are rendered with HTML autoescaping; `.txt` names are rendered
//! verbatim. Bumping a template's wording means adding a new version name,
//! never editing what an old name renders.

use serde::Serialize;
use tera::{Context, Tera};
use thiserror::Error;

pub const CUSTOMER_SUBJECT: &str = "order/customer_subject.v1.txt";
pub const CUSTOMER_TEXT: &str = "order/customer_body.v1.txt";
pub const CUSTOMER_HTML: &str = "order/customer_body.v1.html";
pub const BUSINESS_SUBJECT: &str = "order/business_subject.v1.txt";
pub const BUSINESS_TEXT: &str = "order/business_body.v1.txt";
pub const BUSINESS_HTML: &str = "order/business_body.v1.html";
pub const CLUB_MEMBER_SUBJECT: &str = "club/member_subject.v1.txt";
pub const CLUB_MEMBER_TEXT: &str = "club/member_body.v1.txt";
pub const CLUB_MEMBER_HTML: &str = "club/member_body.v1.html";
pub const CLUB_BUSINESS_SUBJECT: &str = "club/business_subject.v1.txt";
pub const CLUB_BUSINESS_TEXT: &str = "club/business_body.v1.txt";

/// Template rendering failure
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("failed to load notification templates: {0}")]
    Load(#[source] tera::Error),

    #[error("failed to render template '{template}': {source}")]
    Render {
        template: String,
        #[source]
        source: tera::Error,
    },

    #[error("invalid template context: {0}")]
    Context(#[source] tera::Error),
}

/// The compiled notification templates
#[derive(Debug, Clone)]
pub struct MessageTemplates {
    tera: Tera,
}

impl MessageTemplates {
    /// Compile every built-in template
    pub fn new() -> Result<Self, TemplateError> {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![".html"]);
        tera.add_raw_templates(SOURCES.to_vec())
            .map_err(TemplateError::Load)?;
        Ok(Self { tera })
    }

    /// Render a named template with a serializable context
    pub fn render<C: Serialize>(
        &self,
        template: &str,
        context: &C,
    ) -> Result<String, TemplateError> {
        let context = Context::from_serialize(context).map_err(TemplateError::Context)?;
        self.tera
            .render(template, &context)
            .map_err(|source| TemplateError::Render {
                template: template.to_string(),
                source,
            })
    }

    /// Names of all loaded templates
    pub fn names(&self) -> Vec<&str> {
        self.tera.get_template_names().collect()
    }
}

const SOURCES: &[(&str, &str)] = &[
    (CUSTOMER_SUBJECT, "🐝 Your Honeybee Bakehouse Order Is Buzzing Our Way!"),
    (
        CUSTOMER_TEXT,
        r#"Hi {{ name }},

Thank you kindly for your order from Honeybee Bakehouse!
We've got it in the kitchen queue and can't wait to bake up something sweet just for you.

Order Details:
{{ details }}

We'll reach out if we have any questions before your {{ choice | lower }} on {{ date_needed }}.

💌 A quick note: Sometimes our emails wander into spam or promotions folders (bless their hearts).
If you spot us there, please mark us as Not Spam so future updates land right in your inbox.

Thanks for supporting our small, Southern kitchen. We're so glad you're part of the Honeybee family!

With love and frosting,
The Honeybee Bakehouse Crew 🐝
{{ from_email }}
"#,
    ),
    (
        CUSTOMER_HTML,
        r#"<!DOCTYPE html>
<html>
<body style="font-family: Georgia, serif; color: #3b2a1a;">
<p>Hi {{ name }},</p>
<p>Thank you kindly for your order from Honeybee Bakehouse!
We've got it in the kitchen queue and can't wait to bake up something sweet just for you.</p>
<h3>Order Details</h3>
<p style="white-space: pre-wrap;">{{ details }}</p>
<p>We'll reach out if we have any questions before your {{ choice | lower }} on <strong>{{ date_needed }}</strong>.</p>
<p>💌 A quick note: Sometimes our emails wander into spam or promotions folders (bless their hearts).
If you spot us there, please mark us as Not Spam so future updates land right in your inbox.</p>
<p>With love and frosting,<br>The Honeybee Bakehouse Crew 🐝<br>{{ from_email }}</p>
</body>
</html>
"#,
    ),
    (
        BUSINESS_SUBJECT,
        "New Honeybee Order from {{ name }} ({{ choice }}) on {{ date_needed }}",
    ),
    (
        BUSINESS_TEXT,
        r#"A new order just came in. 🐝

Order #: {{ order_id }}
Received: {{ created }}
Name: {{ name }}
Email: {{ email }}
Phone: {{ phone }}
Pickup/Delivery: {{ choice }}
Date needed: {{ date_needed }}

Details:
{{ details }}
"#,
    ),
    (
        BUSINESS_HTML,
        r#"<!DOCTYPE html>
<html>
<body style="font-family: sans-serif;">
<p>A new order just came in. 🐝</p>
<table>
<tr><th align="left">Order #</th><td>{{ order_id }}</td></tr>
<tr><th align="left">Received</th><td>{{ created }}</td></tr>
<tr><th align="left">Name</th><td>{{ name }}</td></tr>
<tr><th align="left">Email</th><td>{{ email }}</td></tr>
<tr><th align="left">Phone</th><td>{{ phone }}</td></tr>
<tr><th align="left">Pickup/Delivery</th><td>{{ choice }}</td></tr>
<tr><th align="left">Date needed</th><td>{{ date_needed }}</td></tr>
</table>
<h3>Details</h3>
<p style="white-space: pre-wrap;">{{ details }}</p>
</body>
</html>
"#,
    ),
    (
        CLUB_MEMBER_SUBJECT,
        "🍑 Welcome to the Southern Sweets Club!",
    ),
    (
        CLUB_MEMBER_TEXT,
        r#"Hi {{ name }},

Welcome to the Southern Sweets Club! You'll be the first to hear about seasonal bakes,
holiday pre-orders and members-only treats from the Honeybee Bakehouse kitchen.

With love and frosting,
The Honeybee Bakehouse Crew 🐝
{{ from_email }}
"#,
    ),
    (
        CLUB_MEMBER_HTML,
        r#"<!DOCTYPE html>
<html>
<body style="font-family: Georgia, serif; color: #3b2a1a;">
<p>Hi {{ name }},</p>
<p>Welcome to the <strong>Southern Sweets Club</strong>! You'll be the first to hear about seasonal bakes,
holiday pre-orders and members-only treats from the Honeybee Bakehouse kitchen.</p>
<p>With love and frosting,<br>The Honeybee Bakehouse Crew 🐝<br>{{ from_email }}</p>
</body>
</html>
"#,
    ),
    (
        CLUB_BUSINESS_SUBJECT,
        "New Southern Sweets Club member: {{ name }}",
    ),
    (
        CLUB_BUSINESS_TEXT,
        r#"Someone just joined the Southern Sweets Club. 🐝

Name: {{ name }}
Email: {{ email }}
"#,
    ),
];
