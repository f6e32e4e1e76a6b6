use axum::{
    extract::Request,
    http::{header, Method},
    middleware,
    routing::post,
    Router,
};
use log::{info, warn};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::handlers::{
    accept_handlers::accept_invite,
    invite_handlers::{create_invite_link, send_invite},
};
use nourishplate_shared::auth::auth_middleware;
use nourishplate_shared::config::InviteConfig;
use nourishplate_shared::email::EmailClient;
use nourishplate_shared::store::{rest::RestFamilyStore, FamilyStore};

/// Shared request state: the family store, the configured email client and
/// the base URL invite links point at.
pub struct AppState<S: FamilyStore> {
    pub store: Arc<S>,
    pub email: EmailClient,
    pub app_base_url: String,
}

/// Creates a router against the managed database collaborator.
pub fn create_router(config: InviteConfig) -> Router {
    info!("Creating router with REST family store");

    let store = Arc::new(RestFamilyStore::new(
        config.database_url,
        config.database_service_key,
    ));
    let email = EmailClient::new(config.email_api_key, config.sender);

    create_router_with_state(AppState {
        store,
        email,
        app_base_url: config.app_base_url,
    })
}

/// Creates a router with a given state, used directly by tests.
pub fn create_router_with_state<S>(state: AppState<S>) -> Router
where
    S: FamilyStore + 'static,
{
    // CORS contract: any origin, POST/OPTIONS, Content-Type/Authorization.
    // The layer answers preflight OPTIONS with 200 and no body.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    // Logging middleware to trace all requests
    async fn logging_middleware(
        req: Request,
        next: axum::middleware::Next,
    ) -> impl axum::response::IntoResponse {
        info!(
            "Router received request: method={}, uri={}",
            req.method(),
            req.uri()
        );
        next.run(req).await
    }

    let state = Arc::new(state);

    // Acceptance requires a signed-in user; sending and link minting are
    // called by the app's own UI with no session.
    let accept_routes = Router::new()
        .route("/invites/accept", post(accept_invite))
        .layer(middleware::from_fn(auth_middleware))
        .with_state(state.clone());

    let open_routes = Router::new()
        .route("/invites/send", post(send_invite))
        .route("/invites/link", post(create_invite_link))
        .with_state(state);

    open_routes
        .merge(accept_routes)
        .layer(cors)
        .layer(middleware::from_fn(logging_middleware))
        .fallback(|req: Request| async move {
            warn!("No route matched for: {} {}", req.method(), req.uri());
            (
                axum::http::StatusCode::NOT_FOUND,
                "The requested resource was not found".to_string(),
            )
        })
}
