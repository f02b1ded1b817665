//! HTML pages served to customers
//!
//! Page templates end in `.html`, so tera escapes every interpolated value.

use crate::core::error::HoneybeeError;
use crate::core::order::Fulfillment;
use crate::core::validation::order::{EMAIL_MAX_LENGTH, NAME_MAX_LENGTH, PHONE_MAX_LENGTH};
use crate::core::validation::{ClubForm, FieldErrors, OrderForm};
use serde::Serialize;
use tera::{Context, Tera};

pub const ORDER_FORM: &str = "order_form.html";
pub const ORDER_THANKS: &str = "thanks.html";
pub const CLUB_FORM: &str = "club_form.html";
pub const CLUB_THANKS: &str = "club_thanks.html";

const BASE: &str = r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{% block title %}Honeybee Bakehouse{% endblock title %}</title>
</head>
<body>
  <header>
    <a href="/">Honeybee Bakehouse</a> &middot; <a href="/club/">Southern Sweets Club</a>
  </header>
  <main>
{% block content %}{% endblock content %}
  </main>
</body>
</html>
"#;

const FIELDS: &str = r#"{% for field in fields %}
<p class="field{% if field.errors %} has-errors{% endif %}">
  <label for="id_{{ field.name }}">{{ field.label }}</label>
  {% if field.input == "textarea" -%}
  <textarea name="{{ field.name }}" id="id_{{ field.name }}" rows="5" required>{{ field.value }}</textarea>
  {%- elif field.input == "select" -%}
  <select name="{{ field.name }}" id="id_{{ field.name }}" required>
    <option value="">---------</option>
    {% for option in field.options -%}
    <option value="{{ option.value }}"{% if option.selected %} selected{% endif %}>{{ option.label }}</option>
    {% endfor -%}
  </select>
  {%- else -%}
  <input type="{{ field.input }}" name="{{ field.name }}" id="id_{{ field.name }}" value="{{ field.value }}"{% if field.max_length %} maxlength="{{ field.max_length }}"{% endif %} required>
  {%- endif %}
  {% for message in field.errors -%}
  <span class="error">{{ message }}</span>
  {% endfor -%}
</p>
{% endfor %}"#;

const ORDER_FORM_SOURCE: &str = r#"{% extends "base.html" %}
{% block content %}
<h1>Place an Order</h1>
{% if has_errors %}<p class="errornote">Please correct the errors below.</p>{% endif %}
<form method="post" action="/order/">
{% include "fields.html" %}
  <button type="submit">Send my order</button>
</form>
{% endblock content %}
"#;

const ORDER_THANKS_SOURCE: &str = r#"{% extends "base.html" %}
{% block title %}Thank you! | Honeybee Bakehouse{% endblock title %}
{% block content %}
<h1>Thank you!</h1>
<p>Your order is in the kitchen queue. A confirmation is on its way to your inbox.</p>
<p>If you don't see it, please peek in your spam or promotions folder.</p>
<p><a href="/">Place another order</a></p>
{% endblock content %}
"#;

const CLUB_FORM_SOURCE: &str = r#"{% extends "base.html" %}
{% block title %}Southern Sweets Club | Honeybee Bakehouse{% endblock title %}
{% block content %}
<h1>Join the Southern Sweets Club</h1>
<p>Be the first to hear about seasonal bakes and members-only treats.</p>
{% if has_errors %}<p class="errornote">Please correct the errors below.</p>{% endif %}
<form method="post" action="/club/">
{% include "fields.html" %}
  <button type="submit">Sign me up</button>
</form>
{% endblock content %}
"#;

const CLUB_THANKS_SOURCE: &str = r#"{% extends "base.html" %}
{% block title %}Welcome to the club! | Honeybee Bakehouse{% endblock title %}
{% block content %}
<h1>Welcome to the Southern Sweets Club!</h1>
<p>Sweet news is headed your way. Keep an eye on your inbox.</p>
<p><a href="/">Place an order</a></p>
{% endblock content %}
"#;

#[derive(Serialize)]
struct ChoiceOption {
    value: &'static str,
    label: &'static str,
    selected: bool,
}

#[derive(Serialize)]
struct FieldView<'a> {
    name: &'static str,
    label: &'static str,
    input: &'static str,
    value: &'a str,
    max_length: Option<usize>,
    errors: &'a [String],
    options: Vec<ChoiceOption>,
}

impl<'a> FieldView<'a> {
    fn new(
        name: &'static str,
        label: &'static str,
        input: &'static str,
        value: &'a str,
        errors: &'a FieldErrors,
    ) -> Self {
        Self {
            name,
            label,
            input,
            value,
            max_length: None,
            errors: errors.get(name).unwrap_or(&[]),
            options: Vec::new(),
        }
    }

    fn max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }
}

/// Renders the customer-facing pages
#[derive(Debug, Clone)]
pub struct Pages {
    tera: Tera,
}

impl Pages {
    pub fn new() -> Result<Self, tera::Error> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            ("base.html", BASE),
            ("fields.html", FIELDS),
            (ORDER_FORM, ORDER_FORM_SOURCE),
            (ORDER_THANKS, ORDER_THANKS_SOURCE),
            (CLUB_FORM, CLUB_FORM_SOURCE),
            (CLUB_THANKS, CLUB_THANKS_SOURCE),
        ])?;
        Ok(Self { tera })
    }

    /// The order form, refilled with `form` and annotated with `errors`
    pub fn order_form(
        &self,
        form: &OrderForm,
        errors: &FieldErrors,
    ) -> Result<String, HoneybeeError> {
        let selected = form.choice.trim();
        let mut choice =
            FieldView::new("choice", "Pick-up or delivery", "select", &form.choice, errors);
        choice.options = Fulfillment::ALL
            .iter()
            .map(|option| ChoiceOption {
                value: option.code(),
                label: option.display_name(),
                selected: option.code() == selected,
            })
            .collect();

        let fields = vec![
            FieldView::new("name", "Name", "text", &form.name, errors).max_length(NAME_MAX_LENGTH),
            FieldView::new("email", "Email", "email", &form.email, errors)
                .max_length(EMAIL_MAX_LENGTH),
            FieldView::new("phone", "Phone", "tel", &form.phone, errors)
                .max_length(PHONE_MAX_LENGTH),
            choice,
            FieldView::new("date_needed", "Date needed", "date", &form.date_needed, errors),
            FieldView::new("details", "Order details", "textarea", &form.details, errors),
        ];

        self.render_form(ORDER_FORM, &fields, errors)
    }

    pub fn thanks(&self) -> Result<String, HoneybeeError> {
        self.render(ORDER_THANKS, &Context::new())
    }

    pub fn club_form(
        &self,
        form: &ClubForm,
        errors: &FieldErrors,
    ) -> Result<String, HoneybeeError> {
        let fields = vec![
            FieldView::new("name", "Name", "text", &form.name, errors).max_length(NAME_MAX_LENGTH),
            FieldView::new("email", "Email", "email", &form.email, errors)
                .max_length(EMAIL_MAX_LENGTH),
        ];

        self.render_form(CLUB_FORM, &fields, errors)
    }

    pub fn club_thanks(&self) -> Result<String, HoneybeeError> {
        self.render(CLUB_THANKS, &Context::new())
    }

    fn render_form(
        &self,
        template: &str,
        fields: &[FieldView<'_>],
        errors: &FieldErrors,
    ) -> Result<String, HoneybeeError> {
        let mut context = Context::new();
        context.insert("fields", fields);
        context.insert("has_errors", &!errors.is_empty());
        self.render(template, &context)
    }

    fn render(&self, template: &str, context: &Context) -> Result<String, HoneybeeError> {
        self.tera
            .render(template, context)
            .map_err(|e| HoneybeeError::Render {
                template: template.to_string(),
                message: e.to_string(),
            })
    }
}
