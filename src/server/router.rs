//! Route table for the order site

use crate::orders::handlers::{
    AppState, club_form, club_thanks, order_form, submit_club, submit_order, thanks,
};
use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

/// Build the site routes
///
/// - GET/POST / and /order/ - Order form
/// - GET /thanks/ - Order confirmation
/// - GET/POST /club/ - Southern Sweets Club signup
/// - GET /club/thanks/ - Club confirmation
pub fn build_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(order_form).post(submit_order))
        .route("/order/", get(order_form).post(submit_order))
        .route("/thanks/", get(thanks))
        .route("/club/", get(club_form).post(submit_club))
        .route("/club/thanks/", get(club_thanks))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
