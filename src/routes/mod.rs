use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::AppState;

pub mod web;


// Server-side rendered pages backed by the posts API.
pub fn get_web_router() -> Router<Arc<AppState>> {
    Router::new()
        // Front Page
        .route("/", get(web::list))
        // Posts
        .route("/post/{post_id}", get(web::view))
        .route("/create", get(web::create_form).post(web::create))
        .route("/edit/{post_id}", get(web::edit_form).post(web::edit))
        .route("/delete/{post_id}", post(web::delete))
}

pub fn build_app(app_state: Arc<AppState>) -> Router {
    let static_dir = ServeDir::new(&app_state.static_dir);

    Router::new()
        .merge(get_web_router())
        // STATIC CONTENT
        .nest_service("/static", static_dir)
        .layer(TraceLayer::new_for_http())
        // STATE
        .with_state(app_state)
}
