use axum::{
    Router,
    routing::{delete, get, post},
};
use std::sync::Arc;

use crate::presentation::http::handlers::CredentialHandler;

pub fn credential_routes(handler: Arc<CredentialHandler>) -> Router {
    Router::new()
        .route("/credentials", post(CredentialHandler::store_credential))
        .route("/credentials", get(CredentialHandler::list_credentials))
        .route(
            "/credentials/{credential_id}",
            delete(CredentialHandler::revoke_credential),
        )
        .with_state(handler)
}
