//! HTTP handlers for the order and club pages

use axum::{
    Form,
    extract::State,
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
};
use std::sync::Arc;

use super::club::{ClubOutcome, ClubWorkflow};
use super::workflow::{OrderWorkflow, SubmissionOutcome};
use crate::core::error::HoneybeeError;
use crate::core::validation::{ClubForm, FieldErrors, OrderForm};
use crate::server::pages::Pages;

pub const THANKS_PATH: &str = "/thanks/";
pub const CLUB_THANKS_PATH: &str = "/club/thanks/";

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub orders: OrderWorkflow,
    pub club: ClubWorkflow,
    pub pages: Arc<Pages>,
}

/// 302 to a confirmation page
fn found(location: &'static str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location)]).into_response()
}

/// GET / and /order/
pub async fn order_form(State(state): State<AppState>) -> Result<Html<String>, HoneybeeError> {
    let page = state
        .pages
        .order_form(&OrderForm::default(), &FieldErrors::new())?;
    Ok(Html(page))
}

/// POST / and /order/
///
/// The body is read as raw pairs so a repeated field is a validation input,
/// not an extractor rejection.
pub async fn submit_order(
    State(state): State<AppState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Response, HoneybeeError> {
    let form: OrderForm = pairs.into_iter().collect();
    match state.orders.submit(form).await? {
        SubmissionOutcome::Rejected { form, errors } => {
            Ok(Html(state.pages.order_form(&form, &errors)?).into_response())
        }
        SubmissionOutcome::Accepted { .. } => Ok(found(THANKS_PATH)),
    }
}

/// GET /thanks/
pub async fn thanks(State(state): State<AppState>) -> Result<Html<String>, HoneybeeError> {
    Ok(Html(state.pages.thanks()?))
}

/// GET /club/
pub async fn club_form(State(state): State<AppState>) -> Result<Html<String>, HoneybeeError> {
    let page = state
        .pages
        .club_form(&ClubForm::default(), &FieldErrors::new())?;
    Ok(Html(page))
}

/// POST /club/
pub async fn submit_club(
    State(state): State<AppState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Response, HoneybeeError> {
    let form: ClubForm = pairs.into_iter().collect();
    match state.club.join(form).await {
        ClubOutcome::Rejected { form, errors } => {
            Ok(Html(state.pages.club_form(&form, &errors)?).into_response())
        }
        ClubOutcome::Joined { .. } => Ok(found(CLUB_THANKS_PATH)),
    }
}

/// GET /club/thanks/
pub async fn club_thanks(State(state): State<AppState>) -> Result<Html<String>, HoneybeeError> {
    Ok(Html(state.pages.club_thanks()?))
}
