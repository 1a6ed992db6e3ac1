use crate::app_context::AppContext;
use crate::http::middleware;
use crate::resize;
use axum::{routing::post, Router};
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;

pub fn new(app_context: AppContext) -> Router {
    let resize_routes = Router::new()
        .route("/resize", post(resize::handlers::resize))
        .with_state(app_context);
    tracing::info!("Initialized HTTP routes.");

    with_middleware(resize_routes)
}

/// Wraps every route of `router` in request logging and panic recovery. Logging sits outside
/// so recovered panics are logged with their 500 status.
pub fn with_middleware(router: Router) -> Router {
    router.layer(
        ServiceBuilder::new()
            .layer(axum::middleware::from_fn(middleware::tracing))
            .layer(CatchPanicLayer::custom(middleware::recover_panic)),
    )
}
