pub mod ai;
pub mod assessments;
pub mod billing;
pub mod credits;
pub mod health;
pub mod insights;
pub mod letters;
pub mod resumes;

use crate::{
    app_state::AppState,
    middleware::{
        create_rate_limiter, jwt_auth_middleware, logging_middleware, service_key_middleware,
    },
};
use axum::{
    middleware,
    routing::{delete, get, patch, post},
    Router,
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer};

/// Create the main API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", api_v1_routes(state.clone()))
        .layer(
            ServiceBuilder::new()
                .layer(CorsLayer::permissive())
                .layer(TimeoutLayer::new(Duration::from_secs(120))),
        )
        .with_state(state)
}

/// API v1 routes
fn api_v1_routes(state: AppState) -> Router<AppState> {
    // Generation endpoints: authenticated and rate limited. These are the
    // only routes that spend credits.
    let rate_limiter = create_rate_limiter(state.redis.clone());
    let generation_routes = Router::new()
        .route("/ai/improve", post(ai::improve_text))
        .route("/letters", post(letters::generate_letter))
        .route("/insights", post(insights::generate_insight))
        .route("/assessments/quiz", post(assessments::generate_quiz))
        .route_layer(middleware::from_fn(rate_limiter))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            jwt_auth_middleware,
        ));

    // Authenticated routes without rate limiting
    let auth_only_routes = Router::new()
        .route("/credits", get(credits::get_credit_status))
        .route("/credits/provision", post(credits::provision_credits))
        .route("/resumes", post(resumes::create_resume))
        .route("/resumes", get(resumes::list_resumes))
        .route("/resumes/{id}", get(resumes::get_resume))
        .route("/resumes/{id}", patch(resumes::update_resume))
        .route("/resumes/{id}", delete(resumes::delete_resume))
        .route("/resumes/{id}/visibility", post(resumes::set_visibility))
        .route("/resumes/{id}/thumbnail", post(resumes::upload_thumbnail))
        .route("/letters", get(letters::list_letters))
        .route("/letters/{id}", get(letters::get_letter))
        .route("/letters/{id}", delete(letters::delete_letter))
        .route("/letters/{id}/complete", post(letters::complete_letter))
        .route("/insights", get(insights::list_insights))
        .route("/insights/{industry}", get(insights::get_insight))
        .route("/assessments/result", post(assessments::save_result))
        .route("/assessments", get(assessments::list_assessments))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            jwt_auth_middleware,
        ));

    // Service-to-service routes, guarded by the shared billing key
    let service_routes = Router::new()
        .route("/billing/activate", post(billing::activate))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            service_key_middleware,
        ));

    // Public routes
    let public_routes = Router::new().route("/health", get(health::health_check));

    Router::new()
        .merge(generation_routes)
        .merge(auth_only_routes)
        .merge(service_routes)
        .merge(public_routes)
        .layer(middleware::from_fn(logging_middleware))
}
