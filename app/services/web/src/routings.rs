use crate::handlers::{chat::*, export::*, index::*, login::*, questions::*, stats::*, user::*};
use app_middleware::web_auth_middleware;
use app_state::AppState;
use axum::{
    Router, middleware,
    routing::{get, post, put},
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/test", get(get_test))
        .route("/api/chat", post(post_chat))
        .route("/api/questions", get(get_questions))
        .route("/api/auth/login", post(post_login))
        .route("/api/auth/register", post(post_register))
        .route(
            "/api/auth/verify",
            get(get_verify).route_layer(middleware::from_fn_with_state(
                state.clone(),
                web_auth_middleware,
            )),
        )
        .nest(
            "/api/admin",
            Router::new()
                .route(
                    "/questions",
                    get(get_admin_questions).post(post_admin_question),
                )
                .route(
                    "/questions/{id}",
                    put(put_admin_question).delete(delete_admin_question),
                )
                .route("/stats", get(get_stats))
                .route("/export", get(get_export))
                .layer(middleware::from_fn_with_state(
                    state.clone(),
                    web_auth_middleware,
                )),
        )
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
