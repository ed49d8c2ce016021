//! Patient-facing HTTP API router.
//!
//! Returns a composable `Router` that can be mounted on any axum server.
//! Routes are nested under `/api/`.

use std::sync::Arc;

use axum::routing::{get, post, put};
use axum::Router;

use crate::api::endpoints;
use crate::api::middleware;
use crate::api::types::ApiContext;
use crate::app_state::AppState;

/// Build the patient API router.
///
/// Middleware uses `Extension<ApiContext>` (injected as the outermost
/// layer). Endpoint handlers use `State<ApiContext>` (provided via
/// `with_state`).
pub fn api_router(state: Arc<AppState>) -> Router {
    let ctx = ApiContext::new(state);
    build_router(ctx)
}

/// Build router from a pre-constructed `ApiContext`.
///
/// Used by integration tests that need to keep the session store alive
/// across several one-shot requests.
#[cfg(test)]
pub(crate) fn api_router_with_ctx(ctx: ApiContext) -> Router {
    build_router(ctx)
}

fn build_router(ctx: ApiContext) -> Router {
    // Protected routes — bearer session required.
    //
    // .with_state() converts Router<ApiContext> → Router<()> so the
    // from_fn middleware (state = ()) composes. Extension must be
    // outermost so the auth middleware can extract ApiContext.
    //
    // NOTE: Path params use `:param` syntax (matchit 0.7 / axum 0.7).
    let protected = Router::new()
        .route(
            "/appointments",
            get(endpoints::appointments::list).post(endpoints::appointments::book),
        )
        .route(
            "/appointments/:id",
            put(endpoints::appointments::reschedule).delete(endpoints::appointments::cancel),
        )
        .route("/auth/logout", post(endpoints::auth::logout))
        .with_state(ctx.clone())
        .layer(axum::middleware::from_fn(middleware::auth::require_auth))
        .layer(axum::Extension(ctx.clone()));

    // Public routes — registration, login and doctor discovery work
    // without a session.
    let public = Router::new()
        .route("/health", get(endpoints::health::check))
        .route("/auth/register", post(endpoints::auth::register))
        .route("/auth/login", post(endpoints::auth::login))
        .route("/doctors", get(endpoints::doctors::list))
        .route("/doctors/recommend", post(endpoints::doctors::recommend))
        .with_state(ctx);

    Router::new().nest("/api", protected).nest("/api", public)
}
