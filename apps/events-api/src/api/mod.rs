use axum::Router;

pub mod events;
pub mod health;
pub mod users;

/// Creates the resource routes.
///
/// Returns a stateless Router (all sub-routers have state already applied).
/// Only the pool handle is cloned into each domain repository.
pub fn routes(state: &crate::state::AppState) -> Router {
    Router::new()
        .nest("/events", events::router(state))
        .nest("/users", users::router(state))
}

/// Creates a router with the /ready endpoint that performs actual health checks.
///
/// This router has state applied and can be merged with the stateless app router
/// from `create_router`.
pub fn ready_router(state: crate::state::AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}
